use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{environment::Environment, value::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl Environment {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, identifiers and member
    /// chains, array literals, unary, binary and logical operations, groupings,
    /// range checks and assignments.
    ///
    /// Evaluation only mutates the environment for [`Expr::Assignment`]; every
    /// other node is a pure read.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed [`Value`].
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] for an unbound root identifier, a type
    /// mismatch in arithmetic or ordering, or a division by zero.
    ///
    /// # Example
    /// ```
    /// use showif::interpreter::{environment::Environment, value::Value};
    ///
    /// let mut env = Environment::new();
    /// env.set("Participant_Age.answer", 25);
    ///
    /// let ast = showif::compile("Participant_Age.answer is between 18 and 30").unwrap();
    /// assert_eq!(env.eval(ast.ast()).unwrap(), Value::Bool(true));
    /// ```
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::NumberLiteral { value, .. } => Ok(Value::Number(*value)),
            Expr::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
            Expr::BooleanLiteral { value, .. } => Ok(Value::Bool(*value)),
            Expr::Identifier { name, position } => self.get(name, *position).cloned(),
            Expr::MemberAccess { object, property, .. } => {
                Ok(self.eval(object)?.property(property))
            },
            Expr::ArrayLiteral { elements, .. } => self.eval_array_literal(elements),
            Expr::UnaryOp { op, operand, position } => {
                let value = self.eval(operand)?;
                Self::eval_unary(*op, &value, *position)
            },
            Expr::BinaryOp { op,
                             left,
                             right,
                             position, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *position)
            },
            Expr::LogicalOp { op, left, right, .. } => self.eval_logical(*op, left, right),
            Expr::Grouping { inner, .. } => self.eval(inner),
            Expr::Between { subject,
                            lower,
                            upper,
                            position, } => {
                let subject = self.eval(subject)?;
                let lower = self.eval(lower)?;
                let upper = self.eval(upper)?;
                Self::eval_between(&subject, &lower, &upper, *position)
            },
            Expr::Assignment { target, value, .. } => self.eval_assignment(target, value),
        }
    }

    /// Evaluates each element of an array literal in order.
    ///
    /// # Errors
    /// Propagates the first element's error.
    fn eval_array_literal(&mut self, elements: &[Expr]) -> EvalResult<Value> {
        let values = elements.iter().map(|e| self.eval(e)).collect::<EvalResult<Vec<_>>>()?;
        Ok(Value::from(values))
    }

    /// Evaluates the right-hand side and stores it under the target's path.
    ///
    /// The target is validated when the node is built, so a target without a
    /// member path only arises from a hand-made tree and is reported as an
    /// unsupported operator.
    fn eval_assignment(&mut self, target: &Expr, value: &Expr) -> EvalResult<Value> {
        let path = target.member_path()
                         .map(|segments| segments.join("."))
                         .ok_or_else(|| RuntimeError::UnsupportedOperator { operator: "=".to_string(),
                                                                            position: target.position(), })?;

        let value = self.eval(value)?;
        self.set(&path, value.clone());
        Ok(value)
    }
}
