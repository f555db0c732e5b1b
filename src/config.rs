// Runtime configuration. Everything comes from environment variables with a
// sensible default, so the CLI runs with no setup at all.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_RANDOM_WORD_URL: &str = "https://random-word-api.herokuapp.com/word";
pub const DEFAULT_RELATED_WORD_URL: &str = "https://api.datamuse.com/words";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PACING_MS: u64 = 300;
pub const DEFAULT_USER_AGENT: &str =
    concat!("username-gen-cli/", env!("CARGO_PKG_VERSION"), " (random username generator)");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub random_word_url: String,
    pub related_word_url: String,
    /// Upper bound for each word service call.
    pub timeout: Duration,
    /// Pause between batch items for the network-backed methods.
    pub pacing: Duration,
    pub user_agent: String,
    /// Seed for a reproducible session; `None` means OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            random_word_url: DEFAULT_RANDOM_WORD_URL.into(),
            related_word_url: DEFAULT_RELATED_WORD_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
            user_agent: DEFAULT_USER_AGENT.into(),
            seed: None,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment:
    ///
    /// - `USERNAME_GEN_RANDOM_WORD_URL`
    /// - `USERNAME_GEN_DATAMUSE_URL`
    /// - `USERNAME_GEN_TIMEOUT_SECS`
    /// - `USERNAME_GEN_PACING_MS`
    /// - `USERNAME_GEN_USER_AGENT`
    /// - `USERNAME_GEN_SEED`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Config {
            random_word_url: lookup("USERNAME_GEN_RANDOM_WORD_URL")
                .unwrap_or(defaults.random_word_url),
            related_word_url: lookup("USERNAME_GEN_DATAMUSE_URL")
                .unwrap_or(defaults.related_word_url),
            timeout: parsed(&lookup, "USERNAME_GEN_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            pacing: parsed(&lookup, "USERNAME_GEN_PACING_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.pacing),
            user_agent: lookup("USERNAME_GEN_USER_AGENT").unwrap_or(defaults.user_agent),
            seed: parsed(&lookup, "USERNAME_GEN_SEED"),
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.pacing, Duration::from_millis(300));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("USERNAME_GEN_RANDOM_WORD_URL", "http://localhost:9000/word"),
            ("USERNAME_GEN_TIMEOUT_SECS", "3"),
            ("USERNAME_GEN_PACING_MS", "0"),
            ("USERNAME_GEN_SEED", "42"),
        ]));
        assert_eq!(config.random_word_url, "http://localhost:9000/word");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.pacing, Duration::ZERO);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("USERNAME_GEN_TIMEOUT_SECS", "soon"),
            ("USERNAME_GEN_SEED", "-1"),
        ]));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.seed, None);
    }
}
