/// Represents all errors that can occur during evaluation.
///
/// Only an unresolved *root* identifier is an error; a missing nested property
/// evaluates to `Value::Missing` instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Tried to read a top-level name the environment does not define.
    #[error("Error at {position}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name:     String,
        /// Source offset of the identifier.
        position: usize,
    },
    /// Attempted division by zero.
    #[error("Error at {position}: Division by zero.")]
    DivisionByZero {
        /// Source offset of the operator.
        position: usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error at {position}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details:  String,
        /// Source offset of the operator.
        position: usize,
    },
    /// An operator appeared in a node kind that cannot carry it.
    ///
    /// The parser never builds such nodes; this only guards hand-built trees.
    #[error("Error at {position}: Operator '{operator}' is not supported here.")]
    UnsupportedOperator {
        /// The operator as written in source.
        operator: String,
        /// Source offset of the operator.
        position: usize,
    },
}
