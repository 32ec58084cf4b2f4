pub mod binder;
pub mod environment;
pub mod error;
pub mod field;
pub mod macros;
pub mod record;
pub mod value;

// Re-export main types
pub use binder::{Binder, bind, bind_first_error};
pub use environment::{Environment, MapEnv, ProcessEnv};
pub use error::{BindError, ConversionCause, format_bind_errors};
pub use field::{FieldDescriptor, Schema};
pub use record::{Bindable, Record, Shape, Slot};
pub use value::{FloatWidth, IntWidth, Value, ValueType};

// Re-export macro
pub use env_binder_macros::define_config;

/// Trait for loading a whole record from the environment
///
/// Implemented for every [`Record`] that has a [`Default`], which provides
/// the zero values left in place for unset variables.
pub trait Load: Sized {
    /// Load from the process environment, panicking on binding errors
    fn load() -> Self;

    /// Load from the process environment, returning errors instead of panicking
    fn load_or_error() -> Result<Self, Vec<BindError>>;

    /// Load from an arbitrary environment
    fn load_from<E: Environment + ?Sized>(env: &E) -> Result<Self, Vec<BindError>>;
}

impl<R: Record + Default> Load for R {
    fn load() -> Self {
        match Self::load_or_error() {
            Ok(record) => record,
            Err(errors) => panic!("{}", format_bind_errors(&errors)),
        }
    }

    fn load_or_error() -> Result<Self, Vec<BindError>> {
        let _ = dotenvy::dotenv();
        Self::load_from(&ProcessEnv)
    }

    fn load_from<E: Environment + ?Sized>(env: &E) -> Result<Self, Vec<BindError>> {
        let mut record = Self::default();
        Binder::new().bind_record(&mut record, &Self::schema(), env)?;
        Ok(record)
    }
}
