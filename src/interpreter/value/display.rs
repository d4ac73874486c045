use std::fmt;

use crate::interpreter::value::Value;

/// Formats a value the way it appears inside a rendered title.
///
/// Numbers use their shortest form (`25`, not `25.0`), strings are written
/// without quotes, arrays are joined with `", "` and records are written as
/// `{key: value}`. `Missing` renders as the empty string; templates apply their
/// own fallback before reaching this point.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            },
            Self::Record(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
            Self::Missing => Ok(()),
        }
    }
}
