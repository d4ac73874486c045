/// Binary operator evaluation logic.
///
/// Handles arithmetic, loose equality, ordering, range checks, membership
/// and the short-circuiting logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements numeric negation and logical NOT.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the main `eval` dispatch over every expression kind and the
/// evaluator's result type.
pub mod core;

/// Utility functions for evaluation.
///
/// Provides the loose-equality and ordering rules shared by the operators.
pub mod utils;
