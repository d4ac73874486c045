use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::ParseResult,
            unary::parse_unary,
            utils::{descend, expect, within_depth},
        },
    },
};

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `or` / `OR`.
///
/// The rule is: `or := and (("or" | "OR") and)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// An `Expr::LogicalOp` tree, or the inner expression when no `or` follows.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_logical_and(tokens, depth)?;
    while let Some((Token::Or, position)) = tokens.peek() {
        tokens.next();
        let right = parse_logical_and(tokens, descend(depth, *position)?)?;
        left = within_depth(Expr::LogicalOp { op:       LogicalOperator::Or,
                                              left:     Box::new(left),
                                              right:    Box::new(right),
                                              position: *position, },
                            depth,
                            *position)?;
    }
    Ok(left)
}

/// Parses logical AND expressions.
///
/// Handles left-associative chains of `and` / `AND`.
///
/// The rule is: `and := equality (("and" | "AND") equality)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// An `Expr::LogicalOp` tree, or the inner expression when no `and` follows.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_equality(tokens, depth)?;
    while let Some((Token::And, position)) = tokens.peek() {
        tokens.next();
        let right = parse_equality(tokens, descend(depth, *position)?)?;
        left = within_depth(Expr::LogicalOp { op:       LogicalOperator::And,
                                              left:     Box::new(left),
                                              right:    Box::new(right),
                                              position: *position, },
                            depth,
                            *position)?;
    }
    Ok(left)
}

/// Parses equality operators.
///
/// `=`, `==` and `is` are loose equality; `!=` and `is not` its negation.
/// A `not` directly after `is` is folded into the operator rather than parsed
/// as a unary prefix of the right operand.
///
/// The rule is: `equality := relational (("=" | "==" | "!=" | "is" | "is not")
/// relational)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// A left-associative `Expr::BinaryOp` tree.
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_relational(tokens, depth)?;

    while let Some((token, position)) = tokens.peek() {
        let position = *position;
        let op = match token {
            Token::Is => {
                tokens.next();
                if let Some((Token::Not, _)) = tokens.peek() {
                    tokens.next();
                    BinaryOperator::NotEqual
                } else {
                    BinaryOperator::Equal
                }
            },
            _ => match token_to_binary_operator(token) {
                Some(op) if is_equality_op(op) => {
                    tokens.next();
                    op
                },
                _ => break,
            },
        };

        let right = parse_relational(tokens, descend(depth, position)?)?;
        left = within_depth(Expr::BinaryOp { op,
                                             left: Box::new(left),
                                             right: Box::new(right),
                                             position },
                            depth,
                            position)?;
    }

    Ok(left)
}

/// Parses relational, membership and range operators.
///
/// Handles `<`, `<=`, `>`, `>=`, `contains` and `in` as left-associative
/// binary operators, and `is between <lower> and <upper>` as a single
/// [`Expr::Between`] node. An `is` that is not followed by `between` is left
/// for [`parse_equality`].
///
/// The rule is:
/// ```text
/// relational := additive (("<" | "<=" | ">" | ">=" | "contains" | "in") additive
///                        | "is" "between" additive "and" additive)*
/// ```
///
/// # Parameters
/// - `tokens`: Token stream (token + position) wrapped in a `Peekable`.
///
/// # Returns
/// A possibly nested `Expr::BinaryOp` or `Expr::Between` tree.
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_additive(tokens, depth)?;

    while let Some((token, position)) = tokens.peek() {
        let position = *position;

        if let Some(op) = token_to_binary_operator(token)
           && is_relational_op(op)
        {
            tokens.next(); // consume operator
            let right = parse_additive(tokens, descend(depth, position)?)?;
            left = within_depth(Expr::BinaryOp { op,
                                                 left: Box::new(left),
                                                 right: Box::new(right),
                                                 position },
                                depth,
                                position)?;
            continue;
        }

        if *token == Token::Is && starts_between(tokens) {
            tokens.next(); // `is`
            tokens.next(); // `between`
            let lower = parse_additive(tokens, descend(depth, position)?)?;
            expect(tokens, &Token::And)?;
            let upper = parse_additive(tokens, descend(depth, position)?)?;
            left = within_depth(Expr::Between { subject: Box::new(left),
                                                lower: Box::new(lower),
                                                upper: Box::new(upper),
                                                position },
                                depth,
                                position)?;
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_multiplicative(tokens, depth)?;
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens, descend(depth, *position)?)?;
            left = within_depth(Expr::BinaryOp { op,
                                                 left: Box::new(left),
                                                 right: Box::new(right),
                                                 position: *position },
                                depth,
                                *position)?;
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*` and `/`.
///
/// The rule is: `multiplicative := power (("*" | "/") power)*`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// A binary expression tree combining power-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = parse_power(tokens, depth)?;
    loop {
        if let Some((token, position)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            let right = parse_power(tokens, descend(depth, *position)?)?;
            left = within_depth(Expr::BinaryOp { op,
                                                 left: Box::new(left),
                                                 right: Box::new(right),
                                                 position: *position },
                                depth,
                                *position)?;
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ^ b ^ c` parses as `a ^ (b ^ c)`,
/// and it binds tighter than `*`, so `2 * 3 ^ 2` is `2 * (3 ^ 2)`.
///
/// The rule is: `power := unary ("^" power)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let base = parse_unary(tokens, depth)?;
    if let Some((Token::Caret, position)) = tokens.peek() {
        tokens.next();
        let exponent = parse_power(tokens, descend(depth, *position)?)?;
        return within_depth(Expr::BinaryOp { op:       BinaryOperator::Pow,
                                             left:     Box::new(base),
                                             right:    Box::new(exponent),
                                             position: *position, },
                            depth,
                            *position);
    }
    Ok(base)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token on its own represents a
/// binary operator. `is` is not mapped here because its meaning depends on the
/// tokens that follow it.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token corresponds to a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use showif::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Assign), Some(BinaryOperator::Equal));
/// assert_eq!(token_to_binary_operator(&Token::In), Some(BinaryOperator::In));
/// assert_eq!(token_to_binary_operator(&Token::Is), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::Assign | Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::Contains => Some(BinaryOperator::Contains),
        Token::In => Some(BinaryOperator::In),
        _ => None,
    }
}

const fn is_equality_op(op: BinaryOperator) -> bool {
    matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
}

const fn is_relational_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::LessEqual
             | BinaryOperator::Greater
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Contains
             | BinaryOperator::In)
}

/// Checks, without consuming anything, whether the stream is at `is between`.
fn starts_between<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut lookahead = tokens.clone();
    matches!(lookahead.next(), Some((Token::Is, _)))
    && matches!(lookahead.next(), Some((Token::Identifier(word), _)) if word == "between")
}
