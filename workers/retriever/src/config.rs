use std::str::FromStr;

use crate::engine_warn;

pub static ENV_VAR_MAX_RESULTS: &str = "BOOLSEARCH_MAX_RESULTS";
pub static ENV_VAR_SNIPPET_LENGTH: &str = "BOOLSEARCH_SNIPPET_LENGTH";

pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_SNIPPET_LENGTH: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrieverConfig {
    /// Upper bound on the results returned per query.
    pub max_results: usize,
    /// Characters of document text shown in each result snippet.
    pub snippet_length: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        RetrieverConfig {
            max_results: DEFAULT_MAX_RESULTS,
            snippet_length: DEFAULT_SNIPPET_LENGTH,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            engine_warn!("Config", name, "ignoring unparsable value '{}'", raw);
            default
        }),
    }
}

impl RetrieverConfig {
    /// Read the configuration from the process environment, falling back to
    /// the defaults for missing or malformed variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        RetrieverConfig {
            max_results: parse_var(
                ENV_VAR_MAX_RESULTS,
                lookup(ENV_VAR_MAX_RESULTS),
                DEFAULT_MAX_RESULTS,
            ),
            snippet_length: parse_var(
                ENV_VAR_SNIPPET_LENGTH,
                lookup(ENV_VAR_SNIPPET_LENGTH),
                DEFAULT_SNIPPET_LENGTH,
            ),
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_snippet_length(mut self, snippet_length: usize) -> Self {
        self.snippet_length = snippet_length;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RetrieverConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, RetrieverConfig::default());
        assert_eq!(config.max_results, 10);
    }

    #[test]
    fn test_values_from_environment() {
        let config = RetrieverConfig::from_lookup(lookup_from(&[
            (ENV_VAR_MAX_RESULTS, "25"),
            (ENV_VAR_SNIPPET_LENGTH, " 80 "),
        ]));
        assert_eq!(config.max_results, 25);
        assert_eq!(config.snippet_length, 80);
    }

    #[test]
    fn test_malformed_value_falls_back() {
        let config = RetrieverConfig::from_lookup(lookup_from(&[(ENV_VAR_MAX_RESULTS, "lots")]));
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_builder_overrides() {
        let config = RetrieverConfig::default()
            .with_max_results(3)
            .with_snippet_length(20);
        assert_eq!(config.max_results, 3);
        assert_eq!(config.snippet_length, 20);
    }
}
