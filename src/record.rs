use crate::error::BindError;
use crate::field::Schema;
use crate::value::{Value, ValueType};
use std::fmt;

/// The shape of a bind target, as reported by [`BindError::Shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Reference,
    Structure,
    /// A non-structure value, named by its kind (`string`, `int`, ...)
    Primitive(&'static str),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Structure => write!(f, "structure"),
            Self::Primitive(kind) => write!(f, "{}", kind),
        }
    }
}

/// A typed, mutable handle to one field of a [`Record`]
#[derive(Debug)]
pub enum Slot<'a> {
    Text(&'a mut String),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
    /// A field whose type has no coercion rule, named by that type
    Unsupported(&'static str),
}

impl Slot<'_> {
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
            Self::Unsupported(name) => ValueType::Unsupported(name),
        }
    }

    /// Write `value` through the handle
    ///
    /// Returns the value back if its type does not match the slot.
    pub fn set(self, value: Value) -> Result<(), Value> {
        match (self, value) {
            (Self::Text(slot), Value::Text(v)) => *slot = v,
            (Self::I8(slot), Value::I8(v)) => *slot = v,
            (Self::I16(slot), Value::I16(v)) => *slot = v,
            (Self::I32(slot), Value::I32(v)) => *slot = v,
            (Self::I64(slot), Value::I64(v)) => *slot = v,
            (Self::Isize(slot), Value::Isize(v)) => *slot = v,
            (Self::F32(slot), Value::F32(v)) => *slot = v,
            (Self::F64(slot), Value::F64(v)) => *slot = v,
            (Self::Bool(slot), Value::Bool(v)) => *slot = v,
            (_, value) => return Err(value),
        }
        Ok(())
    }
}

macro_rules! slot_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for Slot<'a> {
                fn from(field: &'a mut $ty) -> Self {
                    Self::$variant(field)
                }
            }
        )*
    };
}

slot_from! {
    String => Text,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

/// A structure that can be populated by the binder
///
/// Usually implemented by [`define_config!`](crate::define_config), which
/// also derives the schema from the field attributes.
pub trait Record {
    /// The declared schema, in field order
    fn schema() -> Schema
    where
        Self: Sized;

    /// A typed handle to the field called `name`
    fn slot(&mut self, name: &str) -> Option<Slot<'_>>;
}

/// Anything that may be handed to the binder as a target
///
/// Only `&mut R` for a [`Record`] is accepted; records passed by value and
/// references to non-structures produce a [`BindError::Shape`].
pub trait Bindable<'a> {
    fn into_record(self) -> Result<&'a mut dyn Record, BindError>;
}

impl<'a> Bindable<'a> for &'a mut dyn Record {
    fn into_record(self) -> Result<&'a mut dyn Record, BindError> {
        Ok(self)
    }
}
