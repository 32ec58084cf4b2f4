use std::{collections::HashMap, env, path::Path};

/// Read-only key/value lookup the binder resolves variables through
pub trait Environment {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        // Non UTF-8 values are kept (lossily) so they fail to parse loudly
        // instead of looking unset.
        env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

/// An in-memory snapshot of variables
///
/// Deterministic stand-in for the process environment, mostly for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Snapshot of the current process environment
    pub fn capture() -> Self {
        env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    /// Parse a dotenv file without touching the process environment
    pub fn from_dotenv(path: impl AsRef<Path>) -> Result<Self, dotenvy::Error> {
        dotenvy::from_path_iter(path)?.collect()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Environment for MapEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<F> Environment for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}
