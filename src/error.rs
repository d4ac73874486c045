/// Syntax errors.
///
/// Defines all error types that can occur while tokenizing or parsing a
/// condition or binding. A syntax error is unrecoverable for that one
/// expression and is surfaced when the survey is loaded, never during an
/// answer update.
pub mod syntax_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating an expression
/// against an environment: undefined variables, division by zero, type
/// mismatches, and operators a node cannot carry.
pub mod runtime_error;
/// Survey loading errors.
///
/// Raised while building a reactive model from question definitions.
pub mod survey_error;

pub use runtime_error::RuntimeError;
pub use survey_error::SurveyError;
pub use syntax_error::SyntaxError;

/// Any error the engine can report.
///
/// Library operations return the narrow error of their phase; this umbrella
/// type is used by the convenience entry points that span several phases.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Tokenizing or parsing failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// Building a survey model failed.
    #[error(transparent)]
    Survey(#[from] SurveyError),
}
