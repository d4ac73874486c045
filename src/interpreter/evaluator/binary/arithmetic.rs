use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::Value},
};

impl Environment {
    /// Evaluates an arithmetic operation between two numbers.
    ///
    /// Both operands must be numbers; strings are never concatenated and are
    /// not coerced. `^` uses floating point `powf`.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul`, `Div`, `Pow`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Source offset for error reporting.
    ///
    /// # Errors
    /// - `RuntimeError::TypeError` if either operand is not a number.
    /// - `RuntimeError::DivisionByZero` for a zero divisor.
    /// - `RuntimeError::UnsupportedOperator` for a non-arithmetic operator.
    ///
    /// # Example
    /// ```
    /// use showif::{
    ///     ast::BinaryOperator,
    ///     interpreter::{environment::Environment, value::Value},
    /// };
    ///
    /// let power = Environment::eval_arithmetic(BinaryOperator::Pow,
    ///                                          &Value::from(2),
    ///                                          &Value::from(10),
    ///                                          0);
    /// assert_eq!(power.unwrap(), Value::Number(1024.0));
    ///
    /// let division = Environment::eval_arithmetic(BinaryOperator::Div,
    ///                                             &Value::from(1),
    ///                                             &Value::from(0),
    ///                                             0);
    /// assert!(division.is_err());
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           position: usize)
                           -> EvalResult<Value> {
        let (Value::Number(a), Value::Number(b)) = (left, right) else {
            return Err(RuntimeError::TypeError { details: format!("cannot apply '{op}' to {} and {}",
                                                                  left.type_name(),
                                                                  right.type_name()),
                                                 position });
        };

        let result = match op {
            BinaryOperator::Add => a + b,
            BinaryOperator::Sub => a - b,
            BinaryOperator::Mul => a * b,
            BinaryOperator::Div => {
                if *b == 0.0 {
                    return Err(RuntimeError::DivisionByZero { position });
                }
                a / b
            },
            BinaryOperator::Pow => a.powf(*b),
            other => {
                return Err(RuntimeError::UnsupportedOperator { operator: other.to_string(),
                                                               position });
            },
        };

        Ok(Value::Number(result))
    }
}
