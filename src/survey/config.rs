use serde::{Deserialize, Serialize};

use crate::survey::question::QuestionDef;

/// What a title placeholder renders as when it cannot be resolved.
///
/// A placeholder is unresolved when its root name has no answer yet, or when
/// the nested property it names is `Missing`.
///
/// In JSON the variants are written `"empty"`, `"keep"` and
/// `{ "text": "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderFallback {
    /// Replace the placeholder with nothing.
    #[default]
    Empty,
    /// Leave the original `{{...}}` text in the title.
    Keep,
    /// Replace the placeholder with fixed text.
    Text(String),
}

/// Options for a [`ReactiveModel`](crate::survey::model::ReactiveModel).
///
/// # Example
/// ```
/// use showif::survey::config::{ModelOptions, PlaceholderFallback};
///
/// let options: ModelOptions =
///     serde_json::from_str(r#"{ "placeholder_fallback": { "text": "this season" } }"#).unwrap();
///
/// assert_eq!(options.placeholder_fallback, PlaceholderFallback::Text("this season".into()));
/// assert_eq!(serde_json::from_str::<ModelOptions>("{}").unwrap(), ModelOptions::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Rendering of unresolved title placeholders.
    #[serde(default)]
    pub placeholder_fallback: PlaceholderFallback,
}

/// A complete survey file: options plus the ordered question list.
///
/// ```json
/// {
///   "options": { "placeholder_fallback": "keep" },
///   "questions": [
///     { "name": "A", "title": "Do you like colors?" },
///     { "name": "B", "title": "Which one?", "visible_when": "A.answer = 'Yes'" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    /// Model options. Omitted options take their defaults.
    #[serde(default)]
    pub options:   ModelOptions,
    /// Questions in survey order.
    #[serde(default)]
    pub questions: Vec<QuestionDef>,
}
