//! Text to typed value conversion.

use crate::error::CoercionError;
use crate::{OptionKind, Value};

/// Converts `text` into a [`Value`] of the requested kind.
///
/// - `bool` accepts exactly `"true"` and `"false"`.
/// - `int` accepts base-10 signed 64-bit integers.
/// - `float` accepts 64-bit floating-point literals.
/// - `string` accepts anything, including the empty string.
///
/// # Examples
///
/// ```
/// use pagoda_core::{OptionKind, Value, coerce};
///
/// assert_eq!(coerce("42", OptionKind::Int), Ok(Value::Int(42)));
/// assert!(coerce("4.2", OptionKind::Int).is_err());
/// assert_eq!(coerce("false", OptionKind::Bool), Ok(Value::Bool(false)));
/// ```
pub fn coerce(text: &str, kind: OptionKind) -> Result<Value, CoercionError> {
    let mismatch = || CoercionError {
        value: text.to_string(),
        kind,
    };

    match kind {
        OptionKind::Bool => match text {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(mismatch()),
        },
        OptionKind::Int => text.parse::<i64>().map(Value::Int).map_err(|_| mismatch()),
        OptionKind::Float => text.parse::<f64>().map(Value::Float).map_err(|_| mismatch()),
        OptionKind::String => Ok(Value::String(text.to_string())),
    }
}
