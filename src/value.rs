use crate::error::ConversionCause;
use std::{fmt, num::ParseFloatError, str::FromStr};

/// Bit width of a signed integer field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    /// Platform pointer width (`isize`)
    Native,
}

/// Precision of a floating point field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FloatWidth {
    W32,
    W64,
}

/// The declared type of a configuration field
///
/// This is a closed set: every supported type has exactly one coercion rule
/// in [`ValueType::coerce`]. Fields whose Rust type has no rule are declared
/// as [`ValueType::Unsupported`] with the type's name, so binding can report
/// them instead of silently skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValueType {
    Text,
    Int(IntWidth),
    Float(FloatWidth),
    Bool,
    Unsupported(&'static str),
}

impl ValueType {
    pub const STRING: Self = Self::Text;
    pub const I8: Self = Self::Int(IntWidth::W8);
    pub const I16: Self = Self::Int(IntWidth::W16);
    pub const I32: Self = Self::Int(IntWidth::W32);
    pub const I64: Self = Self::Int(IntWidth::W64);
    pub const ISIZE: Self = Self::Int(IntWidth::Native);
    pub const F32: Self = Self::Float(FloatWidth::W32);
    pub const F64: Self = Self::Float(FloatWidth::W64);
    pub const BOOL: Self = Self::Bool;

    /// Rust name of the declared type, used in error messages and docs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "String",
            Self::Int(IntWidth::W8) => "i8",
            Self::Int(IntWidth::W16) => "i16",
            Self::Int(IntWidth::W32) => "i32",
            Self::Int(IntWidth::W64) => "i64",
            Self::Int(IntWidth::Native) => "isize",
            Self::Float(FloatWidth::W32) => "f32",
            Self::Float(FloatWidth::W64) => "f64",
            Self::Bool => "bool",
            Self::Unsupported(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Convert a raw textual value into this type
    ///
    /// Returns `None` for [`ValueType::Unsupported`]; callers decide how to
    /// report that.
    pub fn coerce(&self, raw: &str) -> Option<Result<Value, ConversionCause>> {
        let value = match self {
            Self::Text => Ok(Value::Text(raw.to_string())),
            Self::Int(width) => parse_int(raw, *width),
            Self::Float(FloatWidth::W32) => parse_float::<f32>(raw).map(Value::F32),
            Self::Float(FloatWidth::W64) => parse_float::<f64>(raw).map(Value::F64),
            Self::Bool => parse_bool(raw).map(Value::Bool),
            Self::Unsupported(_) => return None,
        };
        Some(value)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed field value, ready to be written through a [`Slot`](crate::Slot)
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    F32(f32),
    F64(f64),
    Bool(bool),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Text(_) => ValueType::STRING,
            Self::I8(_) => ValueType::I8,
            Self::I16(_) => ValueType::I16,
            Self::I32(_) => ValueType::I32,
            Self::I64(_) => ValueType::I64,
            Self::Isize(_) => ValueType::ISIZE,
            Self::F32(_) => ValueType::F32,
            Self::F64(_) => ValueType::F64,
            Self::Bool(_) => ValueType::BOOL,
        }
    }
}

// Base 10 only; the std parsers reject whitespace and out of range values.
fn parse_int(raw: &str, width: IntWidth) -> Result<Value, ConversionCause> {
    let value = match width {
        IntWidth::W8 => Value::I8(raw.parse()?),
        IntWidth::W16 => Value::I16(raw.parse()?),
        IntWidth::W32 => Value::I32(raw.parse()?),
        IntWidth::W64 => Value::I64(raw.parse()?),
        IntWidth::Native => Value::Isize(raw.parse()?),
    };
    Ok(value)
}

// std rounds overflowing literals to infinity; only an explicit inf/infinity
// literal may produce one.
fn parse_float<T>(raw: &str) -> Result<T, ConversionCause>
where
    T: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
    let value: T = raw.parse()?;
    if value.into().is_infinite() && !is_infinity_literal(raw) {
        return Err(ConversionCause::OutOfRange(raw.to_string()));
    }
    Ok(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Accepts the canonical boolean literals: 1, t, T, TRUE, true, True and
/// their false counterparts.
pub fn parse_bool(raw: &str) -> Result<bool, ConversionCause> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConversionCause::InvalidBool(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce(ty: ValueType, raw: &str) -> Result<Value, ConversionCause> {
        ty.coerce(raw).expect("supported type")
    }

    #[test]
    fn test_text_is_verbatim() {
        assert_eq!(
            coerce(ValueType::STRING, "  spaced value "),
            Ok(Value::Text("  spaced value ".to_string()))
        );
        assert_eq!(coerce(ValueType::STRING, ""), Ok(Value::Text(String::new())));
    }

    #[test]
    fn test_int_widths() {
        assert_eq!(coerce(ValueType::I8, "-128"), Ok(Value::I8(-128)));
        assert_eq!(coerce(ValueType::I16, "32767"), Ok(Value::I16(32767)));
        assert_eq!(coerce(ValueType::I32, "+87"), Ok(Value::I32(87)));
        assert_eq!(coerce(ValueType::I64, "6152"), Ok(Value::I64(6152)));
        assert_eq!(coerce(ValueType::ISIZE, "5000"), Ok(Value::Isize(5000)));
    }

    #[test]
    fn test_int_overflow_is_an_error() {
        assert!(matches!(
            coerce(ValueType::I8, "128"),
            Err(ConversionCause::Int(_))
        ));
        assert!(matches!(
            coerce(ValueType::I16, "-32769"),
            Err(ConversionCause::Int(_))
        ));
        assert!(coerce(ValueType::I64, "9223372036854775807").is_ok());
        assert!(coerce(ValueType::I64, "9223372036854775808").is_err());
    }

    #[test]
    fn test_int_rejects_non_decimal_input() {
        for raw in ["5a", "0x10", " 5", "5 ", "1_000", "--5", "5-", "1.0", ""] {
            assert!(
                coerce(ValueType::I32, raw).is_err(),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_float_widths() {
        assert_eq!(coerce(ValueType::F32, "61.45"), Ok(Value::F32(61.45)));
        assert_eq!(coerce(ValueType::F64, "86.74"), Ok(Value::F64(86.74)));
        assert_eq!(coerce(ValueType::F64, "1e3"), Ok(Value::F64(1000.0)));
        assert!(matches!(
            coerce(ValueType::F64, "5a.23"),
            Err(ConversionCause::Float(_))
        ));
    }

    #[test]
    fn test_float_overflow_is_an_error() {
        assert_eq!(
            coerce(ValueType::F64, "1e400"),
            Err(ConversionCause::OutOfRange("1e400".to_string()))
        );
        assert_eq!(
            coerce(ValueType::F32, "1e40"),
            Err(ConversionCause::OutOfRange("1e40".to_string()))
        );
        assert_eq!(
            coerce(ValueType::F32, "-1e40"),
            Err(ConversionCause::OutOfRange("-1e40".to_string()))
        );
        assert_eq!(coerce(ValueType::F64, "1e40"), Ok(Value::F64(1e40)));
    }

    #[test]
    fn test_float_infinity_literals_are_accepted() {
        for raw in ["inf", "+Inf", "-infinity", "INFINITY"] {
            let Ok(Value::F64(value)) = coerce(ValueType::F64, raw) else {
                panic!("expected {raw:?} to parse");
            };
            assert!(value.is_infinite(), "{raw}");
        }
        assert!(matches!(
            coerce(ValueType::F32, "-inf"),
            Ok(Value::F32(v)) if v == f32::NEG_INFINITY
        ));
    }

    #[test]
    fn test_float_width_only_affects_precision() {
        let Ok(Value::F32(narrow)) = coerce(ValueType::F32, "0.1") else {
            panic!("expected f32");
        };
        let Ok(Value::F64(wide)) = coerce(ValueType::F64, "0.1") else {
            panic!("expected f64");
        };
        assert_eq!(narrow, 0.1f32);
        assert_eq!(wide, 0.1f64);
        assert_ne!(narrow as f64, wide);
    }

    #[test]
    fn test_bool_literals() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(raw), Ok(true), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(raw), Ok(false), "{raw}");
        }
    }

    #[test]
    fn test_bool_rejects_other_literals() {
        for raw in ["not false", "yes", "tRUE", "", " true"] {
            assert_eq!(
                parse_bool(raw),
                Err(ConversionCause::InvalidBool(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_unsupported_has_no_coercion() {
        assert!(ValueType::Unsupported("u32").coerce("321").is_none());
        assert!(!ValueType::Unsupported("u32").is_supported());
    }

    #[test]
    fn test_names() {
        assert_eq!(ValueType::STRING.to_string(), "String");
        assert_eq!(ValueType::ISIZE.to_string(), "isize");
        assert_eq!(ValueType::F32.to_string(), "f32");
        assert_eq!(ValueType::Unsupported("u64").to_string(), "u64");
    }

    #[test]
    fn test_value_reports_its_type() {
        assert_eq!(Value::I16(2).value_type(), ValueType::I16);
        assert_eq!(Value::Bool(true).value_type(), ValueType::BOOL);
        assert_eq!(Value::Text("x".into()).value_type(), ValueType::STRING);
    }
}
