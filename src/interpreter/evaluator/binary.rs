/// Dispatch from a binary operator to its handler.
pub mod core;

/// Numeric operators: `+`, `-`, `*`, `/` and `^`.
pub mod arithmetic;

/// Loose equality, ordering and `is between`.
pub mod comparison;

/// Array membership through `contains` and `in`.
pub mod membership;

/// Short-circuiting `and` / `or`.
pub mod logic;
