use crate::environment::Environment;
use crate::error::BindError;
use crate::field::FieldDescriptor;
use crate::record::{Bindable, Record};
use crate::value::ValueType;
use tracing::{debug, trace};

/// Populates records from an [`Environment`], one schema field at a time
///
/// By default every field is processed and all field errors are returned
/// together, in schema order.
///
/// # Example
/// ```rust
/// use env_binder::{define_config, Binder, MapEnv, Record};
///
/// define_config! {
///     #[derive(Debug, Default)]
///     pub struct Config {
///         #[field(env = "PORT", default = "8080")]
///         pub port: i32,
///     }
/// }
///
/// let mut config = Config::default();
/// let env = MapEnv::new().set("PORT", "5000");
/// Binder::new().bind(&mut config, &Config::schema(), &env).unwrap();
/// assert_eq!(config.port, 5000);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Binder {
    fail_fast: bool,
    allow_bool: bool,
}

impl Binder {
    pub fn new() -> Self {
        Self {
            fail_fast: false,
            allow_bool: true,
        }
    }

    /// Stop at the first field error instead of collecting all of them
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Whether `bool` fields are bound; when disabled they are reported as
    /// unsupported
    pub fn allow_bool(mut self, allow_bool: bool) -> Self {
        self.allow_bool = allow_bool;
        self
    }

    /// Bind `target` according to `schema`
    ///
    /// The target must be a mutable reference to a record; anything else
    /// yields a single [`BindError::Shape`] and nothing is read or written.
    pub fn bind<'a, E>(
        &self,
        target: impl Bindable<'a>,
        schema: &[FieldDescriptor],
        env: &E,
    ) -> Result<(), Vec<BindError>>
    where
        E: Environment + ?Sized,
    {
        let record = target.into_record().map_err(|e| vec![e])?;
        self.bind_record(record, schema, env)
    }

    /// Bind an already validated record
    pub fn bind_record<E>(
        &self,
        record: &mut dyn Record,
        schema: &[FieldDescriptor],
        env: &E,
    ) -> Result<(), Vec<BindError>>
    where
        E: Environment + ?Sized,
    {
        let mut errors = Vec::new();

        for field in schema {
            if let Err(e) = self.bind_field(record, field, env) {
                debug!(field = field.name, env = field.env, error = %e, "failed to bind field");
                errors.push(e);
                if self.fail_fast {
                    break;
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn bind_field<E>(
        &self,
        record: &mut dyn Record,
        field: &FieldDescriptor,
        env: &E,
    ) -> Result<(), BindError>
    where
        E: Environment + ?Sized,
    {
        let raw = match (env.lookup(field.env), field.default) {
            (Some(value), _) => value,
            (None, Some(default)) => {
                debug!(field = field.name, env = field.env, default, "using default");
                default.to_string()
            }
            (None, None) => {
                trace!(field = field.name, env = field.env, "not set, leaving field as is");
                return Ok(());
            }
        };

        let declared = self.effective_type(field.value_type);
        let value = match declared.coerce(&raw) {
            Some(Ok(value)) => value,
            Some(Err(source)) => {
                return Err(BindError::Conversion {
                    field: field.name,
                    raw,
                    declared,
                    source,
                });
            }
            None => {
                return Err(BindError::UnsupportedType {
                    field: field.name,
                    declared,
                });
            }
        };

        let slot = record
            .slot(field.name)
            .ok_or(BindError::UnknownField { field: field.name })?;
        let actual = slot.value_type();
        slot.set(value).map_err(|_| BindError::TypeMismatch {
            field: field.name,
            declared,
            actual,
        })?;

        trace!(field = field.name, env = field.env, "assigned");
        Ok(())
    }

    fn effective_type(&self, declared: ValueType) -> ValueType {
        match declared {
            ValueType::Bool if !self.allow_bool => ValueType::Unsupported("bool"),
            other => other,
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

/// Bind `target` with the default, error-collecting [`Binder`]
pub fn bind<'a, E>(
    target: impl Bindable<'a>,
    schema: &[FieldDescriptor],
    env: &E,
) -> Result<(), Vec<BindError>>
where
    E: Environment + ?Sized,
{
    Binder::new().bind(target, schema, env)
}

/// Bind `target`, stopping at the first error
pub fn bind_first_error<'a, E>(
    target: impl Bindable<'a>,
    schema: &[FieldDescriptor],
    env: &E,
) -> Result<(), BindError>
where
    E: Environment + ?Sized,
{
    Binder::new()
        .fail_fast(true)
        .bind(target, schema, env)
        .map_err(|mut errors| errors.remove(0))
}
