use std::collections::BTreeSet;

use logos::Logos;

use crate::{interpreter::environment::Environment, survey::config::PlaceholderFallback};

/// Raw pieces of a title, as scanned.
///
/// Every character is covered by one of the patterns, so scanning never
/// fails. Whether a `{{ ... }}` run is a placeholder is decided afterwards.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum Piece {
    #[token("{")]
    Open,
    #[token("}")]
    Close,
    #[regex(r"[^{}]+")]
    Text,
}

/// One part of a parsed title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, copied as is.
    Text(String),
    /// A `{{ path }}` placeholder.
    Placeholder {
        /// The dotted path, without braces or whitespace.
        path: String,
        /// The placeholder exactly as written.
        raw:  String,
    },
}

/// A title template: literal text interleaved with `{{ path }}` placeholders.
///
/// A template is parsed once and rendered from its segments every time, so
/// re-rendering never sees the text of an earlier rendering.
///
/// # Example
/// ```
/// use showif::{
///     interpreter::environment::Environment,
///     survey::{config::PlaceholderFallback, template::Template},
/// };
///
/// let template = Template::parse("Why do you like {{favorite_color}}?");
///
/// let mut env = Environment::new();
/// env.define("favorite_color", "blue");
///
/// assert_eq!(template.render(&env, &PlaceholderFallback::Empty), "Why do you like blue?");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source:   String,
    segments: Vec<Segment>,
}

impl Template {
    /// Splits a title into text and placeholder segments.
    ///
    /// A `{{ ... }}` whose content is not a dotted name stays literal text, and
    /// adjacent literal pieces are merged, so `"{ {x} }"` is one text segment.
    /// Extra braces around a placeholder are literal: `"{{{x}}}"` is `{`, the
    /// placeholder `x`, then `}`.
    ///
    /// # Example
    /// ```
    /// use showif::survey::template::{Segment, Template};
    ///
    /// let template = Template::parse("{{{ x }}}");
    ///
    /// assert_eq!(template.segments(),
    ///            [Segment::Text("{".to_string()),
    ///             Segment::Placeholder { path: "x".to_string(),
    ///                                    raw:  "{{ x }}".to_string(), },
    ///             Segment::Text("}".to_string())]);
    /// ```
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let pieces: Vec<(Piece, &str)> = Piece::lexer(source).spanned()
                                                             .map(|(piece, span)| {
                                                                 (piece.unwrap_or(Piece::Text),
                                                                  &source[span])
                                                             })
                                                             .collect();

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut i = 0;

        while i < pieces.len() {
            if let [(Piece::Open, _),
                    (Piece::Open, _),
                    (Piece::Text, inner),
                    (Piece::Close, _),
                    (Piece::Close, _),
                    ..] = &pieces[i..]
               && is_path(inner.trim())
            {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Placeholder { path: inner.trim().to_string(),
                                                     raw:  format!("{{{{{inner}}}}}"), });
                i += 5;
                continue;
            }

            text.push_str(pieces[i].1);
            i += 1;
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Self { source: source.to_string(),
               segments }
    }

    /// The title as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The placeholder paths in order of appearance, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
                                Segment::Placeholder { path, .. } => Some(path.as_str()),
                                Segment::Text(_) => None,
                            })
    }

    /// The distinct root names the placeholders read.
    ///
    /// # Example
    /// ```
    /// use showif::survey::template::Template;
    ///
    /// let template = Template::parse("{{ A.answer }} and {{A.score}} from {{B}}");
    /// assert_eq!(template.roots().into_iter().collect::<Vec<_>>(), ["A", "B"]);
    /// ```
    #[must_use]
    pub fn roots(&self) -> BTreeSet<&str> {
        self.placeholders().filter_map(|path| path.split('.').next()).collect()
    }

    /// Substitutes every placeholder with its value's text.
    ///
    /// A placeholder whose root is unbound, or whose nested property is
    /// `Missing`, renders according to `fallback`.
    ///
    /// # Example
    /// ```
    /// use showif::{
    ///     interpreter::environment::Environment,
    ///     survey::{config::PlaceholderFallback, template::Template},
    /// };
    ///
    /// let template = Template::parse("Plans for {{ season }}?");
    /// let env = Environment::new();
    ///
    /// assert_eq!(template.render(&env, &PlaceholderFallback::Empty), "Plans for ?");
    /// assert_eq!(template.render(&env, &PlaceholderFallback::Keep), "Plans for {{ season }}?");
    /// assert_eq!(template.render(&env, &PlaceholderFallback::Text("this season".into())),
    ///            "Plans for this season?");
    /// ```
    #[must_use]
    pub fn render(&self, env: &Environment, fallback: &PlaceholderFallback) -> String {
        let mut rendered = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => rendered.push_str(text),
                Segment::Placeholder { path, raw } => match env.resolve_path(path) {
                    Some(value) if !value.is_missing() => rendered.push_str(&value.to_string()),
                    _ => match fallback {
                        PlaceholderFallback::Empty => {},
                        PlaceholderFallback::Keep => rendered.push_str(raw),
                        PlaceholderFallback::Text(text) => rendered.push_str(text),
                    },
                },
            }
        }

        rendered
    }
}

/// Checks `identifier(.identifier)*`, with the identifier rules of conditions.
fn is_path(text: &str) -> bool {
    text.split('.').all(|segment| {
                       let mut chars = segment.chars();
                       chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                       && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                   })
}
