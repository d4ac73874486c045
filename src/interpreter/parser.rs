/// Parser entry points.
///
/// Holds [`core::parse`] for conditions, [`core::parse_binding`] for
/// evaluate-and-bind sources, and the shared expression entry point both
/// descend from.
pub mod core;

/// Binary operator parsing.
///
/// One function per precedence level, from logical `or` down to
/// exponentiation, plus the `is between ... and ...` range form.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles prefix operators, literals, member chains, parenthesized groups and
/// array literals.
pub mod unary;

/// Shared parsing helpers.
///
/// Comma separated lists, expected-token checks and error construction.
pub mod utils;
