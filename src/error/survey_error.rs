use crate::error::SyntaxError;

/// Errors raised while loading question definitions into a model.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    /// Two questions share the same name.
    #[error("Question '{name}' is defined more than once.")]
    DuplicateQuestion {
        /// The repeated name.
        name: String,
    },
    /// A visibility condition failed to compile.
    #[error("Visibility condition of question '{question}' is invalid: {source}")]
    InvalidCondition {
        /// The question carrying the condition.
        question: String,
        /// The underlying syntax error.
        source:   SyntaxError,
    },
}
