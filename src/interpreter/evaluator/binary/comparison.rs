use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::EvalResult,
            utils::{compare, loose_eq},
        },
        value::Value,
    },
};

impl Environment {
    /// Evaluates `=`, `==`, `is` (all `Equal`) and `!=`, `is not`
    /// (`NotEqual`) with loose equality.
    ///
    /// Equality never fails: values that cannot be coerced are simply unequal.
    ///
    /// # Example
    /// ```
    /// use showif::{
    ///     ast::BinaryOperator,
    ///     interpreter::{environment::Environment, value::Value},
    /// };
    ///
    /// let ne = Environment::eval_equality(BinaryOperator::NotEqual, &Value::Missing, &Value::from(""));
    /// assert_eq!(ne, Value::Bool(true));
    /// ```
    #[must_use]
    pub fn eval_equality(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        let equal = loose_eq(left, right);
        Value::Bool(if op == BinaryOperator::NotEqual { !equal } else { equal })
    }

    /// Evaluates an ordering operator (`<`, `<=`, `>`, `>=`).
    ///
    /// Any comparison involving `Missing` is `false`.
    ///
    /// # Parameters
    /// - `op`: The relational operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Source offset for error reporting.
    ///
    /// # Returns
    /// A boolean [`Value`].
    ///
    /// # Errors
    /// `RuntimeError::TypeError` when the operands cannot be ordered, for
    /// example a boolean against a number.
    pub fn eval_ordering(op: BinaryOperator,
                         left: &Value,
                         right: &Value,
                         position: usize)
                         -> EvalResult<Value> {
        let Some(ordering) = compare(left, right, position)? else {
            return Ok(Value::Bool(false));
        };

        let result = match op {
            BinaryOperator::Less => ordering == Ordering::Less,
            BinaryOperator::LessEqual => ordering != Ordering::Greater,
            BinaryOperator::Greater => ordering == Ordering::Greater,
            BinaryOperator::GreaterEqual => ordering != Ordering::Less,
            other => {
                return Err(RuntimeError::UnsupportedOperator { operator: other.to_string(),
                                                               position });
            },
        };

        Ok(Value::Bool(result))
    }

    /// Evaluates `subject is between lower and upper`.
    ///
    /// Both bounds are inclusive and use the same ordering rules as `<=`.
    ///
    /// # Example
    /// ```
    /// use showif::interpreter::{environment::Environment, value::Value};
    ///
    /// let inside = Environment::eval_between(&Value::from(18),
    ///                                        &Value::from(18),
    ///                                        &Value::from(30),
    ///                                        0);
    /// assert_eq!(inside.unwrap(), Value::Bool(true));
    ///
    /// let missing = Environment::eval_between(&Value::Missing,
    ///                                         &Value::from(18),
    ///                                         &Value::from(30),
    ///                                         0);
    /// assert_eq!(missing.unwrap(), Value::Bool(false));
    /// ```
    ///
    /// # Errors
    /// `RuntimeError::TypeError` when the subject cannot be ordered against a
    /// bound.
    pub fn eval_between(subject: &Value,
                        lower: &Value,
                        upper: &Value,
                        position: usize)
                        -> EvalResult<Value> {
        let above = Self::eval_ordering(BinaryOperator::LessEqual, lower, subject, position)?;
        if !above.is_truthy() {
            return Ok(Value::Bool(false));
        }
        Self::eval_ordering(BinaryOperator::LessEqual, subject, upper, position)
    }
}
