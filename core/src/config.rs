use crate::engine::DEFAULT_MAX_HITS;
use serde::{Deserialize, Serialize};

pub const ENV_MAX_HITS: &str = "FEEDSEARCH_MAX_HITS";
pub const ENV_STOPWORDS: &str = "FEEDSEARCH_STOPWORDS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Hits beyond this many are silently dropped (lowest ids kept).
    pub max_hits: usize,
    /// Filter the English stop set at index time.
    pub english_stopwords: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_hits: DEFAULT_MAX_HITS, english_stopwords: false }
    }
}

impl SearchConfig {
    /// Defaults overridden by `FEEDSEARCH_MAX_HITS` / `FEEDSEARCH_STOPWORDS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MAX_HITS) {
            match raw.trim().parse::<usize>() {
                Ok(n) => config.max_hits = n.max(1),
                Err(_) => tracing::warn!(key = ENV_MAX_HITS, value = %raw, "ignoring unparseable value"),
            }
        }
        if let Some(raw) = lookup(ENV_STOPWORDS) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.english_stopwords = true,
                "0" | "false" | "no" | "off" => config.english_stopwords = false,
                _ => tracing::warn!(key = ENV_STOPWORDS, value = %raw, "ignoring unparseable value"),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_defaults() {
        let config = SearchConfig::from_lookup(lookup(&[(ENV_MAX_HITS, "25"), (ENV_STOPWORDS, "true")]));
        assert_eq!(config, SearchConfig { max_hits: 25, english_stopwords: true });
    }

    #[test]
    fn bad_values_are_ignored() {
        let config = SearchConfig::from_lookup(lookup(&[(ENV_MAX_HITS, "lots"), (ENV_STOPWORDS, "maybe")]));
        assert_eq!(config, SearchConfig::default());
        assert_eq!(SearchConfig::from_lookup(lookup(&[(ENV_MAX_HITS, "0")])).max_hits, 1);
    }

    #[test]
    fn deserializes_partial_json() {
        let config: SearchConfig = serde_json::from_str(r#"{"max_hits": 10}"#).unwrap();
        assert_eq!(config.max_hits, 10);
        assert!(!config.english_stopwords);
    }
}
