use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::SyntaxError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            binary::parse_logical_or,
            unary::parse_member,
            utils::expect_end,
        },
    },
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// How many levels deep a parsed tree may grow, counting the leaves.
///
/// Deeper sources fail with [`SyntaxError::NestingTooDeep`] instead of
/// exhausting the stack while parsing or evaluating.
pub const MAX_DEPTH: usize = 64;

/// Parses a condition from a token list.
///
/// In a condition `=` is loose equality, so `A.answer = 'Yes'` is a
/// comparison. The whole token list must be consumed.
///
/// # Errors
/// Returns a [`SyntaxError`] when a required token is missing, an unexpected
/// token is found, tokens remain after a complete expression, or the tree
/// would be more than [`MAX_DEPTH`] levels deep.
///
/// # Example
/// ```
/// use showif::{
///     ast::{BinaryOperator, Expr},
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize("A.answer = 'Yes'").unwrap();
/// let ast = parse(&tokens).unwrap();
///
/// assert!(matches!(ast, Expr::BinaryOp { op: BinaryOperator::Equal, .. }));
/// ```
pub fn parse(tokens: &[Spanned]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter, 0)?;
    expect_end(&mut iter)?;
    Ok(expr)
}

/// Parses an evaluate-and-bind source from a token list.
///
/// When the source starts with an identifier or member chain followed by `=`,
/// the result is an [`Expr::Assignment`]. Anything else parses exactly as in
/// [`parse`].
///
/// Grammar: `binding := member "=" expression | expression`
///
/// # Errors
/// Same as [`parse`].
///
/// # Example
/// ```
/// use showif::{
///     ast::Expr,
///     interpreter::{lexer::tokenize, parser::core::parse_binding},
/// };
///
/// let tokens = tokenize("total = 2 * 3 ^ 2").unwrap();
/// let ast = parse_binding(&tokens).unwrap();
///
/// assert!(matches!(ast, Expr::Assignment { .. }));
/// ```
pub fn parse_binding(tokens: &[Spanned]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = match parse_assignment(&mut iter)? {
        Some(assignment) => assignment,
        None => parse_expression(&mut iter, 0)?,
    };
    expect_end(&mut iter)?;
    Ok(expr)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, position)` pairs.
/// - `depth`: Number of tree levels above the expression being parsed.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_logical_or(tokens, depth)
}

/// Parses a leading `member = expression` if one is present.
///
/// Scans ahead on a cloned iterator for an identifier, any number of
/// `.identifier` segments and a single `=`. Only when that shape is found are
/// tokens consumed.
///
/// # Returns
/// - `Ok(Some(Expr::Assignment))` when an assignment was parsed,
/// - `Ok(None)` when the tokens do not start with an assignment.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if !matches!(tokens.peek(), Some((Token::Identifier(_), _))) {
        return Ok(None);
    }

    let mut lookahead = tokens.clone();
    lookahead.next();
    while let Some((Token::Dot, _)) = lookahead.peek() {
        lookahead.next();
        if !matches!(lookahead.next(), Some((Token::Identifier(_), _))) {
            return Ok(None);
        }
    }

    let Some((Token::Assign, position)) = lookahead.peek() else {
        return Ok(None);
    };
    let position = *position;

    let target = parse_member(tokens, 1)?;
    tokens.next();
    let value = parse_expression(tokens, 1)?;

    Expr::assignment(target, value, position).map(Some)
}
