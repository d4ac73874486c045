use crate::{
    ast::{Expr, LogicalOperator},
    interpreter::{environment::Environment, evaluator::core::EvalResult, value::Value},
};

impl Environment {
    /// Evaluates a logical operation with short-circuiting.
    ///
    /// The operands are converted to booleans by truthiness and the result is
    /// always a boolean. `and` stops at a falsy left operand and `or` at a
    /// truthy one; the right operand is then never evaluated, so it cannot
    /// raise an error.
    ///
    /// # Parameters
    /// - `op`: The logical operator.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean.
    ///
    /// # Example
    /// ```
    /// use showif::interpreter::{environment::Environment, value::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define("age", 15);
    ///
    /// let guarded = showif::compile("age > 20 and unknown < 18").unwrap();
    /// assert_eq!(env.eval(guarded.ast()).unwrap(), Value::Bool(false));
    /// ```
    pub fn eval_logical(&mut self,
                        op: LogicalOperator,
                        left: &Expr,
                        right: &Expr)
                        -> EvalResult<Value> {
        let left = self.eval(left)?.is_truthy();

        let result = match op {
            LogicalOperator::And => left && self.eval(right)?.is_truthy(),
            LogicalOperator::Or => left || self.eval(right)?.is_truthy(),
        };

        Ok(Value::Bool(result))
    }
}
