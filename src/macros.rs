// Shape rejections for targets that are not records. The accepting
// `Bindable` impls for records are emitted by `define_config!`.

use crate::error::BindError;
use crate::record::{Bindable, Record, Shape};

macro_rules! reject_primitive {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl<'a> Bindable<'a> for &'a mut $ty {
                fn into_record(self) -> Result<&'a mut dyn Record, BindError> {
                    Err(BindError::shape(Shape::Structure, Shape::Primitive($kind)))
                }
            }
        )*
    };
}

reject_primitive! {
    String => "string",
    &'static str => "string",
    i8 => "int8",
    i16 => "int16",
    i32 => "int32",
    i64 => "int64",
    isize => "int",
    u8 => "uint8",
    u16 => "uint16",
    u32 => "uint32",
    u64 => "uint64",
    usize => "uint",
    f32 => "float32",
    f64 => "float64",
    bool => "bool",
}

/// Emits the by-value rejection for a record type
///
/// Used by generated code; a record handed over by value cannot be written
/// back to the caller.
#[doc(hidden)]
#[macro_export]
macro_rules! __reject_by_value {
    ($ty:ty) => {
        impl<'a> $crate::Bindable<'a> for $ty {
            fn into_record(self) -> ::std::result::Result<&'a mut dyn $crate::Record, $crate::BindError> {
                ::std::result::Result::Err($crate::BindError::shape(
                    $crate::Shape::Reference,
                    $crate::Shape::Structure,
                ))
            }
        }
    };
}
