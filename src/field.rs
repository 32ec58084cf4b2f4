use crate::value::ValueType;
use std::{borrow::Cow, fs, ops::Deref, path::Path};

/// Describes how one record field maps to an environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDescriptor {
    /// Field name on the record
    pub name: &'static str,
    /// Environment variable key
    pub env: &'static str,
    /// Literal parsed in place of the variable when it is not set
    pub default: Option<&'static str>,
    /// Human-readable description, only used for documentation
    pub description: &'static str,
    pub value_type: ValueType,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, env: &'static str, value_type: ValueType) -> Self {
        Self {
            name,
            env,
            default: None,
            description: "",
            value_type,
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// An ordered list of field descriptors
///
/// Generated records borrow a `'static` descriptor table; hand-built schemas
/// own theirs.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Schema {
    fields: Cow<'static, [FieldDescriptor]>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn from_static(fields: &'static [FieldDescriptor]) -> Self {
        Self {
            fields: Cow::Borrowed(fields),
        }
    }

    /// Append a field, keeping declaration order
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.to_mut().push(field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Render the schema as a markdown table of environment variables
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("## Environment Variables Summary\n\n");
        md.push_str("| Variable | Field | Type | Default | Description |\n");
        md.push_str("|----------|-------|------|---------|-------------|\n");
        for field in self.fields.iter() {
            let default_display = match field.default {
                Some(default) if !default.is_empty() => format!("`{}`", default),
                Some(_) => "`\"\"`".to_string(),
                None => "-".to_string(),
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                field.env, field.name, field.value_type, default_display, field.description
            ));
        }

        md
    }

    /// Write configuration documentation to a markdown file
    ///
    /// # Example
    /// ```no_run
    /// use env_binder::{FieldDescriptor, Schema, ValueType};
    ///
    /// let schema = Schema::new()
    ///     .field(FieldDescriptor::new("port", "PORT", ValueType::I32).with_default("8080"));
    /// schema.write_docs("CONFIG.md").unwrap();
    /// ```
    pub fn write_docs(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.to_markdown())
    }
}

impl Deref for Schema {
    type Target = [FieldDescriptor];

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl From<Vec<FieldDescriptor>> for Schema {
    fn from(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            fields: Cow::Owned(fields),
        }
    }
}

impl FromIterator<FieldDescriptor> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
