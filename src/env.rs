use std::collections::HashMap;
use std::ffi::OsString;

/// Snapshot of the variables a step reads: inputs, file-command paths and
/// the `GITHUB_*` context. Captured once so nothing downstream touches the
/// process environment.
#[derive(Debug, Clone, Default)]
pub struct ActionEnv {
    vars: HashMap<String, String>,
}

impl ActionEnv {
    pub fn from_process() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// Pairs that are not valid UTF-8 are skipped with a warning; no step
    /// input or `GITHUB_*` variable can be read through them anyway.
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_pairs(pairs.into_iter().filter_map(|(k, v)| {
            match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (Ok(k), Err(_)) => {
                    tracing::warn!(var = %k, "skipping environment variable with non-UTF-8 value");
                    None
                }
                (Err(k), _) => {
                    tracing::warn!(
                        var = %k.to_string_lossy(),
                        "skipping environment variable with non-UTF-8 name"
                    );
                    None
                }
            }
        }))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Like `get`, but treats an empty value the same as a missing one.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn is_debug(&self) -> bool {
        self.get("RUNNER_DEBUG") == Some("1")
    }
}

/// `INPUT_<NAME>`: spaces become underscores, then upper-cased.
pub fn input_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}
