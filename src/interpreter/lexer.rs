use logos::Logos;

use crate::error::SyntaxError;

/// A token paired with the byte offset where it starts in the source.
pub type Spanned = (Token, usize);

/// Represents a lexical token in a condition or binding source string.
/// A token is a minimal but meaningful unit of text produced by the lexer.
///
/// Keywords are plain `#[token]` patterns. Because logos always prefers the
/// longest match, `android` lexes as a single identifier instead of `and`
/// followed by `roid`, so a keyword is only recognized when the next character
/// cannot continue an identifier.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// Quoted string literal, either `'...'` or `"..."`. The quotes are
    /// stripped, the contents are taken verbatim.
    #[regex(r#""[^"]*""#, unquote)]
    #[regex(r"'[^']*'", unquote)]
    Str(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    #[token("TRUE", parse_bool)]
    #[token("FALSE", parse_bool)]
    Bool(bool),
    /// `and` / `AND`
    #[token("and")]
    #[token("AND")]
    And,
    /// `or` / `OR`
    #[token("or")]
    #[token("OR")]
    Or,
    /// `not` / `NOT`
    #[token("not")]
    #[token("NOT")]
    Not,
    /// `contains`
    #[token("contains")]
    Contains,
    /// `in`
    #[token("in")]
    In,
    /// `is`, which starts `is not` and `is between`.
    #[token("is")]
    Is,
    /// Identifier tokens: question names and record properties such as
    /// `favorite_color` or `Participant-Age`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_\-]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `.`
    #[token(".")]
    Dot,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `=`, loose equality in conditions and assignment in bindings.
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
}

impl Token {
    /// Short human readable description used in syntax errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Str(s) => format!("string '{s}'"),
            Self::Bool(b) => format!("boolean {b}"),
            Self::Identifier(name) => format!("identifier '{name}'"),
            Self::And => "'and'".to_string(),
            Self::Or => "'or'".to_string(),
            Self::Not => "'not'".to_string(),
            Self::Contains => "'contains'".to_string(),
            Self::In => "'in'".to_string(),
            Self::Is => "'is'".to_string(),
            Self::Dot => "'.'".to_string(),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::LBracket => "'['".to_string(),
            Self::RBracket => "']'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Assign => "'='".to_string(),
            Self::EqualEqual => "'=='".to_string(),
            Self::BangEqual => "'!='".to_string(),
            Self::LessEqual => "'<='".to_string(),
            Self::GreaterEqual => "'>='".to_string(),
            Self::Less => "'<'".to_string(),
            Self::Greater => "'>'".to_string(),
            Self::Bang => "'!'".to_string(),
        }
    }
}

/// Converts a source string into a flat list of tokens with byte offsets.
///
/// Whitespace is skipped. Characters that do not start any token (such as `$`
/// or `#`) are dropped silently; they are reported at `trace` level only.
///
/// # Errors
/// Returns [`SyntaxError::UnterminatedString`] when a quote character has no
/// matching closing quote.
///
/// # Example
/// ```
/// use showif::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("A.answer = 'Yes'").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(tok, _)| tok).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Identifier("A".to_string()),
///                 Token::Dot,
///                 Token::Identifier("answer".to_string()),
///                 Token::Assign,
///                 Token::Str("Yes".to_string())]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                let slice = lexer.slice();
                if slice.starts_with(['"', '\'']) {
                    return Err(SyntaxError::UnterminatedString { position });
                }
                tracing::trace!(position, skipped = slice, "skipping unrecognized input");
            },
        }
    }

    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quote characters from a string literal slice.
fn unquote(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

/// Parses a boolean literal from the current token slice.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" | "TRUE" => Some(true),
        "false" | "FALSE" => Some(false),
        _ => None,
    }
}
