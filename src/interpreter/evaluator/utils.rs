use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Checks loose equality between two values.
///
/// Rules:
/// - Values of the same kind compare directly. Arrays compare element by
///   element and records field by field, both using loose equality.
/// - A boolean against a non-boolean is first turned into `1` or `0`.
/// - A number against a string parses the trimmed string as a number; the
///   empty string counts as `0` and unparsable text is never equal.
/// - An array against a scalar compares the array's comma-joined text.
/// - `Missing` equals only `Missing`.
///
/// # Parameters
/// - `left`: First value.
/// - `right`: Second value.
///
/// # Returns
/// `true` if the values are loosely equal.
///
/// # Example
/// ```
/// use showif::interpreter::{evaluator::utils::loose_eq, value::Value};
///
/// assert!(loose_eq(&Value::from(25), &Value::from(" 25 ")));
/// assert!(loose_eq(&Value::from(true), &Value::from(1)));
/// assert!(loose_eq(&Value::array([1, 2]), &Value::from("1,2")));
/// assert!(!loose_eq(&Value::Missing, &Value::from("")));
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    use Value::{Array, Bool, Missing, Number, Record, String};

    match (left, right) {
        (Missing, Missing) => true,
        (Missing, _) | (_, Missing) => false,

        (Number(a), Number(b)) => a == b,
        (String(a), String(b)) => a == b,
        (Bool(a), Bool(b)) => a == b,
        (Array(a), Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| loose_eq(x, y))
        },
        (Record(a), Record(b)) => {
            a.len() == b.len()
            && a.iter().all(|(key, x)| b.get(key).is_some_and(|y| loose_eq(x, y)))
        },

        (Bool(b), other) => loose_eq(&Number(bool_to_number(*b)), other),
        (other, Bool(b)) => loose_eq(other, &Number(bool_to_number(*b))),

        (Number(n), String(s)) | (String(s), Number(n)) => parse_numeric(s) == Some(*n),

        (Array(items), scalar @ (Number(_) | String(_)))
        | (scalar @ (Number(_) | String(_)), Array(items)) => {
            loose_eq(&String(join_text(items)), scalar)
        },

        _ => false,
    }
}

/// Orders two values.
///
/// Numbers compare numerically and strings lexicographically. A number and a
/// string compare numerically when the string parses as a number.
///
/// # Parameters
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `position`: Source offset for error reporting.
///
/// # Returns
/// - `Ok(Some(ordering))` for comparable values,
/// - `Ok(None)` when either side is `Missing` or a number is `NaN`, which
///   makes every ordering operator false,
/// - `Err(RuntimeError::TypeError)` for any other combination.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
///
/// use showif::interpreter::{evaluator::utils::compare, value::Value};
///
/// assert_eq!(compare(&Value::from(3), &Value::from("10"), 0).unwrap(), Some(Ordering::Less));
/// assert_eq!(compare(&Value::from("b"), &Value::from("a"), 0).unwrap(), Some(Ordering::Greater));
/// assert_eq!(compare(&Value::Missing, &Value::from(1), 0).unwrap(), None);
/// assert!(compare(&Value::from(true), &Value::from(1), 0).is_err());
/// ```
pub fn compare(left: &Value, right: &Value, position: usize) -> EvalResult<Option<Ordering>> {
    use Value::{Missing, Number, String};

    match (left, right) {
        (Missing, _) | (_, Missing) => Ok(None),
        (Number(a), Number(b)) => Ok(a.partial_cmp(b)),
        (String(a), String(b)) => Ok(Some(a.cmp(b))),
        (Number(a), String(s)) => {
            parse_numeric(s).map(|b| a.partial_cmp(&b))
                            .ok_or_else(|| unorderable(left, right, position))
        },
        (String(s), Number(b)) => {
            parse_numeric(s).map(|a| a.partial_cmp(b))
                            .ok_or_else(|| unorderable(left, right, position))
        },
        _ => Err(unorderable(left, right, position)),
    }
}

fn unorderable(left: &Value, right: &Value, position: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("cannot order {} and {}",
                                               left.type_name(),
                                               right.type_name()),
                              position }
}

/// Parses text as a number the way loose comparisons read it.
///
/// Surrounding whitespace is ignored and the empty string is `0`.
///
/// # Example
/// ```
/// use showif::interpreter::evaluator::utils::parse_numeric;
///
/// assert_eq!(parse_numeric(" 2.5 "), Some(2.5));
/// assert_eq!(parse_numeric(""), Some(0.0));
/// assert_eq!(parse_numeric("blue"), None);
/// ```
#[must_use]
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Joins array elements with `,` and no spaces, for scalar comparisons.
fn join_text(items: &[Value]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

const fn bool_to_number(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
