use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    rc::Rc,
};

use crate::{
    ast::Expr,
    error::{Error, RuntimeError, SyntaxError},
    interpreter::{
        environment::Environment,
        lexer::tokenize,
        parser::core::{parse, parse_binding},
        value::Value,
    },
};

/// A parsed expression together with the source it came from.
///
/// Compiling once and evaluating many times is the intended use: the AST is
/// shared behind an `Rc`, so cloning a compiled expression is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    source: Rc<str>,
    ast:    Rc<Expr>,
}

impl CompiledExpression {
    /// The parsed tree.
    #[must_use]
    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// The source text this expression was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every distinct top-level name the expression reads.
    ///
    /// # Example
    /// ```
    /// let condition = showif::compile("A.answer = 'Yes' and (B.score > 3 or A.skipped)").unwrap();
    ///
    /// assert_eq!(condition.root_identifiers().into_iter().collect::<Vec<_>>(), ["A", "B"]);
    /// ```
    #[must_use]
    pub fn root_identifiers(&self) -> BTreeSet<&str> {
        self.ast.root_identifiers()
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Compiles a condition.
///
/// In a condition `=` is loose equality.
///
/// # Errors
/// Returns a [`SyntaxError`] if the source cannot be tokenized or parsed.
///
/// # Example
/// ```
/// use showif::interpreter::{environment::Environment, value::Value};
///
/// let condition = showif::compile("Participant_Age.answer is between 18 and 30").unwrap();
///
/// let mut env = Environment::new();
/// env.set("Participant_Age.answer", 25);
///
/// assert_eq!(showif::evaluate(&condition, &mut env).unwrap(), Value::Bool(true));
/// ```
pub fn compile(source: &str) -> Result<CompiledExpression, SyntaxError> {
    let tokens = tokenize(source)?;
    let ast = parse(&tokens)?;
    Ok(CompiledExpression { source: Rc::from(source),
                            ast:    Rc::new(ast), })
}

/// Compiles an evaluate-and-bind source.
///
/// A leading `member = expression` becomes an assignment that writes its
/// result into the environment when evaluated.
///
/// # Errors
/// Returns a [`SyntaxError`] if the source cannot be tokenized or parsed.
///
/// # Example
/// ```
/// use showif::interpreter::{environment::Environment, value::Value};
///
/// let binding = showif::compile_binding("total = 2 * 3 ^ 2").unwrap();
///
/// let mut env = Environment::new();
/// showif::evaluate(&binding, &mut env).unwrap();
///
/// assert_eq!(env.lookup("total"), Some(&Value::Number(18.0)));
/// ```
pub fn compile_binding(source: &str) -> Result<CompiledExpression, SyntaxError> {
    let tokens = tokenize(source)?;
    let ast = parse_binding(&tokens)?;
    Ok(CompiledExpression { source: Rc::from(source),
                            ast:    Rc::new(ast), })
}

/// Evaluates a compiled expression against an environment.
///
/// # Errors
/// Returns a [`RuntimeError`] when evaluation fails.
pub fn evaluate(compiled: &CompiledExpression, env: &mut Environment) -> Result<Value, RuntimeError> {
    env.eval(compiled.ast())
}

/// Compiles a binding source and evaluates it in one step.
///
/// # Errors
/// Returns [`Error::Syntax`] or [`Error::Runtime`] depending on the phase
/// that failed.
///
/// # Example
/// ```
/// use showif::interpreter::{environment::Environment, value::Value};
///
/// let mut env = Environment::new();
/// env.define("age", 15);
///
/// assert_eq!(showif::evaluate_str("age < 20 or unknown", &mut env).unwrap(), Value::Bool(true));
/// assert!(showif::evaluate_str("unknown", &mut env).is_err());
/// ```
pub fn evaluate_str(source: &str, env: &mut Environment) -> Result<Value, Error> {
    let compiled = compile_binding(source)?;
    Ok(evaluate(&compiled, env)?)
}

/// Memoizes compiled conditions by their source text.
///
/// Surveys often repeat the same condition on several questions; each
/// distinct source is tokenized and parsed once.
#[derive(Debug, Default)]
pub struct ExpressionCache {
    compiled: HashMap<String, CompiledExpression>,
}

impl ExpressionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled condition for `source`, compiling it on first use.
    ///
    /// Failures are not cached.
    ///
    /// # Errors
    /// Returns a [`SyntaxError`] if the source does not compile.
    ///
    /// # Example
    /// ```
    /// use showif::ExpressionCache;
    ///
    /// let mut cache = ExpressionCache::new();
    /// let first = cache.compile("A.answer = 'Yes'").unwrap();
    /// let second = cache.compile("A.answer = 'Yes'").unwrap();
    ///
    /// assert_eq!(first, second);
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn compile(&mut self, source: &str) -> Result<CompiledExpression, SyntaxError> {
        if let Some(compiled) = self.compiled.get(source) {
            tracing::trace!(source, "expression cache hit");
            return Ok(compiled.clone());
        }

        let compiled = compile(source)?;
        self.compiled.insert(source.to_string(), compiled.clone());
        Ok(compiled)
    }

    /// Number of distinct sources compiled so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Returns `true` when nothing has been compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
