use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{descend, end_of_input, expect, parse_comma_separated, unexpected, within_depth},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!` and `not`  (logical not)
///
/// Unary operators are right-associative, so an input like `not -x` is parsed
/// as `not (-x)`. They bind tighter than `^`: `-2 ^ 2` is `(-2) ^ 2`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!" | "not") unary
///            | primary
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `depth`: Number of tree levels above this expression.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Bang | Token::Not, _)) => UnaryOperator::Not,
        _ => return parse_primary(tokens, depth),
    };

    let position = tokens.next().map_or(0, |(_, position)| *position);
    let operand = parse_unary(tokens, descend(depth, position)?)?;
    Ok(Expr::UnaryOp { op,
                       operand: Box::new(operand),
                       position })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - number, string and boolean literals
/// - identifiers and member chains
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
///
/// Grammar (simplified):
/// ```text
///     primary := NUMBER | STRING | BOOLEAN
///              | member
///              | "(" expression ")"
///              | "[" elements "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `SyntaxError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let (token, position) = tokens.peek().ok_or_else(|| end_of_input("expression"))?;
    let position = *position;

    match token {
        Token::Number(value) => {
            tokens.next();
            Ok(Expr::NumberLiteral { value: *value,
                                     position })
        },
        Token::Str(value) => {
            tokens.next();
            Ok(Expr::StringLiteral { value: value.clone(),
                                     position })
        },
        Token::Bool(value) => {
            tokens.next();
            Ok(Expr::BooleanLiteral { value: *value,
                                      position })
        },
        Token::Identifier(_) => parse_member(tokens, depth),
        Token::LParen => parse_grouping(tokens, depth),
        Token::LBracket => parse_array_literal(tokens, depth),
        tok => Err(unexpected(tok, position, "expression")),
    }
}

/// Parses an identifier followed by any number of `.property` segments.
///
/// `a.b.c` becomes `MemberAccess(MemberAccess(Identifier(a), b), c)`.
///
/// Grammar: `member := IDENTIFIER ("." IDENTIFIER)*`
///
/// # Errors
/// Returns a `SyntaxError` if the chain does not start with an identifier,
/// a `.` is not followed by one, or the chain is too long to fit below
/// `depth`.
pub(crate) fn parse_member<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut node = match tokens.next() {
        Some((Token::Identifier(name), position)) => Expr::Identifier { name:     name.clone(),
                                                                        position: *position, },
        Some((tok, position)) => return Err(unexpected(tok, *position, "identifier")),
        None => return Err(end_of_input("identifier")),
    };

    while let Some((Token::Dot, position)) = tokens.peek() {
        tokens.next();
        let property = match tokens.next() {
            Some((Token::Identifier(name), _)) => name.clone(),
            Some((tok, at)) => return Err(unexpected(tok, *at, "property name")),
            None => return Err(end_of_input("property name")),
        };
        node = within_depth(Expr::MemberAccess { object: Box::new(node),
                                                 property,
                                                 position: *position },
                            depth,
                            *position)?;
    }

    Ok(node)
}

/// Parses a parenthesized expression `( expression )`.
///
/// The parentheses are kept as an [`Expr::Grouping`] node so the tree can be
/// printed back with the same shape.
///
/// # Errors
/// Returns a `SyntaxError` if the inner expression fails or `)` is missing.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let position = expect(tokens, &Token::LParen)?;
    let inner = parse_expression(tokens, descend(depth, position)?)?;
    expect(tokens, &Token::RParen)?;
    Ok(Expr::Grouping { inner: Box::new(inner),
                        position })
}

/// Parses an array literal of the form `[ expr1, expr2, ..., exprN ]`.
///
/// An empty array `[]` is accepted.
///
/// Grammar: `array := "[" (expression ("," expression)*)? "]"`.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let position = expect(tokens, &Token::LBracket)?;
    let depth = descend(depth, position)?;
    let elements =
        parse_comma_separated(tokens, |tokens| parse_expression(tokens, depth), &Token::RBracket)?;
    Ok(Expr::ArrayLiteral { elements,
                            position })
}
