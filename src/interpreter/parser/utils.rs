use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::SyntaxError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::core::{MAX_DEPTH, ParseResult},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// It repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `SyntaxError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, position)) => {
                return Err(unexpected(tok, *position, format!("',' or {}", closing.describe())));
            },
            None => return Err(end_of_input(closing.describe())),
        }
    }
    Ok(items)
}

/// Consumes the next token if it equals `expected`.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// Returns a `SyntaxError` naming `expected` if the next token differs or the
/// input has ended.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((tok, position)) if tok == expected => Ok(*position),
        Some((tok, position)) => Err(unexpected(tok, *position, expected.describe())),
        None => Err(end_of_input(expected.describe())),
    }
}

/// Fails if any token is left after a complete expression.
pub(in crate::interpreter::parser) fn expect_end<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<()>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((tok, position)) => {
            Err(SyntaxError::UnexpectedTrailingTokens { token:    tok.describe(),
                                                        position: *position, })
        },
        None => Ok(()),
    }
}

/// Steps one level down for the operand of the token at `position`.
///
/// # Returns
/// The depth at which the operand is parsed.
///
/// # Errors
/// Returns [`SyntaxError::NestingTooDeep`] once the operand could no longer fit
/// within [`MAX_DEPTH`].
pub(in crate::interpreter::parser) fn descend(depth: usize,
                                              position: usize)
                                              -> ParseResult<usize> {
    if depth + 1 >= MAX_DEPTH {
        return Err(SyntaxError::NestingTooDeep { position });
    }
    Ok(depth + 1)
}

/// Fails if `node`, sitting `depth` levels below the root, reaches past
/// [`MAX_DEPTH`].
///
/// Operator chains such as `a or b or c` deepen the tree without recursing,
/// so they are checked on the node they build.
pub(in crate::interpreter::parser) fn within_depth(node: Expr,
                                                   depth: usize,
                                                   position: usize)
                                                   -> ParseResult<Expr> {
    if node.deeper_than(MAX_DEPTH.saturating_sub(depth)) {
        return Err(SyntaxError::NestingTooDeep { position });
    }
    Ok(node)
}

pub(in crate::interpreter::parser) fn unexpected(found: &Token,
                                                 position: usize,
                                                 expected: impl Into<String>)
                                                 -> SyntaxError {
    SyntaxError::UnexpectedToken { found: found.describe(),
                                   expected: expected.into(),
                                   position }
}

pub(in crate::interpreter::parser) fn end_of_input(expected: impl Into<String>) -> SyntaxError {
    SyntaxError::UnexpectedEndOfInput { expected: expected.into() }
}
