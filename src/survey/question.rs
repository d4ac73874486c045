use serde::{Deserialize, Serialize};

use crate::{engine::CompiledExpression, survey::template::Template};

/// A question as written in a survey definition.
///
/// The condition may be given as `visible_when` or `visibleWhen`. A missing or
/// blank condition means the question is always visible.
///
/// # Example
/// ```
/// use showif::survey::question::QuestionDef;
///
/// let def: QuestionDef = serde_json::from_str(
///     r#"{ "name": "B", "title": "Why?", "visibleWhen": "A.answer = 'Yes'" }"#,
/// ).unwrap();
///
/// assert_eq!(def, QuestionDef::new("B", "Why?").with_condition("A.answer = 'Yes'"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDef {
    /// Unique question name.
    pub name:         String,
    /// Title template, possibly holding `{{ placeholders }}`.
    pub title:        String,
    /// Visibility condition source.
    #[serde(default, alias = "visibleWhen", skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<String>,
}

impl QuestionDef {
    /// Creates an unconditional question.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self { name:         name.into(),
               title:        title.into(),
               visible_when: None, }
    }

    /// Sets the visibility condition.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.visible_when = Some(condition.into());
        self
    }

    /// The condition source, if one is set and not blank.
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.visible_when.as_deref().map(str::trim).filter(|source| !source.is_empty())
    }
}

/// A loaded question.
///
/// Holds the parsed title and compiled condition next to the current
/// visibility and rendered title. Only the owning model changes the state.
#[derive(Debug, Clone)]
pub struct Question {
    pub(crate) name:           String,
    pub(crate) index:          usize,
    pub(crate) template:       Template,
    pub(crate) condition:      Option<CompiledExpression>,
    pub(crate) is_visible:     bool,
    pub(crate) rendered_title: String,
}

impl Question {
    /// Unique question name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in survey order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The title template source.
    #[must_use]
    pub fn title(&self) -> &str {
        self.template.source()
    }

    /// The parsed title.
    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// The compiled visibility condition.
    #[must_use]
    pub const fn condition(&self) -> Option<&CompiledExpression> {
        self.condition.as_ref()
    }

    /// Current visibility.
    ///
    /// Always `true` without a condition. A condition that reads no answers,
    /// such as `1 < 2`, is decided when the model loads; any other condition
    /// starts `false` until its first evaluation.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// The title with its placeholders substituted.
    #[must_use]
    pub fn rendered_title(&self) -> &str {
        &self.rendered_title
    }
}
