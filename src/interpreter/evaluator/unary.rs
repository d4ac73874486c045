use crate::{
    ast::UnaryOperator,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::Value},
};

impl Environment {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation. Any non-number is a type error.
    /// - `Not`: inverts the value's truthiness, so it accepts every type.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `position`: Source offset for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use showif::{
    ///     ast::UnaryOperator,
    ///     interpreter::{environment::Environment, value::Value},
    /// };
    ///
    /// let negated = Environment::eval_unary(UnaryOperator::Negate, &Value::from(4), 0);
    /// assert_eq!(negated.unwrap(), Value::Number(-4.0));
    ///
    /// let inverted = Environment::eval_unary(UnaryOperator::Not, &Value::from(""), 0);
    /// assert_eq!(inverted.unwrap(), Value::Bool(true));
    ///
    /// assert!(Environment::eval_unary(UnaryOperator::Negate, &Value::from("x"), 0).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, position: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => Ok(Value::Number(-value.as_number(position)?)),
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
