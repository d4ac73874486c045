/// The environment module holds the live answer bindings.
///
/// An [`environment::Environment`] maps top-level answer names to values and
/// supports dotted writes such as `A.answer`, which build nested records.
/// The evaluator is implemented as methods on it.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, reads answers from the environment,
/// performs arithmetic, comparison and logical operations and produces a
/// value. Only assignments write back into the environment.
///
/// # Responsibilities
/// - Evaluates every expression kind with an exhaustive `match`.
/// - Applies the loose-equality and ordering rules of conditions.
/// - Reports runtime errors such as undefined variables or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source text for further parsing.
///
/// The lexer reads a condition or binding and produces a stream of tokens,
/// each paired with its byte offset: numbers, strings, booleans, keywords,
/// identifiers, operators and delimiters. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source offsets.
/// - Reports unterminated string literals.
/// - Skips unrecognized characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a recursive descent over the token stream, one function per
/// precedence level. It has an expression mode for conditions and a binding
/// mode that also accepts a leading `member = expression`.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Values are numbers, strings, booleans, arrays, records and the `Missing`
/// sentinel for unresolved nested properties.
pub mod value;
