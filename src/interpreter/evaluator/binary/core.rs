use crate::{
    ast::BinaryOperator,
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::Value},
};

impl Environment {
    /// Evaluates a binary operation between two already evaluated values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator. Arithmetic goes to `eval_arithmetic`, equality and
    /// ordering to `eval_equality` and `eval_ordering`, and membership to
    /// `eval_membership`.
    ///
    /// The logical operators are not binary operators here: they need the
    /// unevaluated right operand to short-circuit, see `eval_logical`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Source offset for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use showif::{
    ///     ast::BinaryOperator,
    ///     interpreter::{environment::Environment, value::Value},
    /// };
    ///
    /// let sum = Environment::eval_binary(BinaryOperator::Add, &Value::from(3), &Value::from(4), 0);
    /// assert_eq!(sum.unwrap(), Value::Number(7.0));
    ///
    /// let eq = Environment::eval_binary(BinaryOperator::Equal, &Value::from("7"), &Value::from(7), 0);
    /// assert_eq!(eq.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       position: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Contains, Div, Equal, Greater, GreaterEqual, In, Less, LessEqual, Mul, NotEqual,
            Pow, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Pow => Self::eval_arithmetic(op, left, right, position),
            Equal | NotEqual => Ok(Self::eval_equality(op, left, right)),
            Less | LessEqual | Greater | GreaterEqual => {
                Self::eval_ordering(op, left, right, position)
            },
            Contains | In => Ok(Self::eval_membership(op, left, right)),
        }
    }
}
