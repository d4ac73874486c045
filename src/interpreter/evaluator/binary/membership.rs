use crate::{
    ast::BinaryOperator,
    interpreter::{environment::Environment, evaluator::utils::loose_eq, value::Value},
};

impl Environment {
    /// Evaluates `collection contains item` and `item in collection`.
    ///
    /// The result is `true` iff the collection side is an array holding an
    /// element loosely equal to the item. A collection side that is not an
    /// array gives `false`.
    ///
    /// # Example
    /// ```
    /// use showif::{
    ///     ast::BinaryOperator,
    ///     interpreter::{environment::Environment, value::Value},
    /// };
    ///
    /// let themes = Value::array(["dark", "contrast"]);
    ///
    /// let found = Environment::eval_membership(BinaryOperator::In, &Value::from("dark"), &themes);
    /// assert_eq!(found, Value::Bool(true));
    ///
    /// let scalar = Environment::eval_membership(BinaryOperator::Contains,
    ///                                           &Value::from("dark"),
    ///                                           &Value::from("d"));
    /// assert_eq!(scalar, Value::Bool(false));
    /// ```
    #[must_use]
    pub fn eval_membership(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        let (collection, item) = if op == BinaryOperator::In { (right, left) } else { (left, right) };

        let found = match collection {
            Value::Array(items) => items.iter().any(|element| loose_eq(element, item)),
            _ => false,
        };

        Value::Bool(found)
    }
}
