// Word-supply module: a small blocking HTTP client for the two public word
// services. Both calls are best-effort; callers go through the `*_or_empty`
// helpers so a network problem only ever shows up as "no words".

use crate::config::Config;
use crate::words::normalize_supplied;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Words requested from the related-words service per call.
pub const RELATED_REQUEST_MAX: usize = 10;
/// Words kept from a related-words answer.
pub const RELATED_KEEP: usize = 5;

/// Why a word service call produced nothing.
#[derive(Debug, Error)]
pub enum SupplyError {
    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("service answered with status {status}")]
    BadStatus { status: u16 },

    #[error("unexpected response shape: {0}")]
    Malformed(String),
}

/// Relation kinds understood by the related-words service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Synonym,
    Trigger,
    Antonym,
    Rhyme,
    MoreGeneral,
}

impl Relation {
    /// Code used in the `rel_<code>` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Relation::Synonym => "syn",
            Relation::Trigger => "trg",
            Relation::Antonym => "ant",
            Relation::Rhyme => "rhy",
            Relation::MoreGeneral => "gen",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Source of externally supplied words.
///
/// Implementations return already-normalized words: alphabetic, at least
/// three characters, capitalized.
#[cfg_attr(test, mockall::automock)]
pub trait WordSupplier {
    /// Up to `count` random words.
    fn random_words(&self, count: usize) -> Result<Vec<String>, SupplyError>;

    /// Up to five words related to `seed`.
    fn related_words(&self, seed: &str, relation: Relation) -> Result<Vec<String>, SupplyError>;
}

/// Random words, or an empty list (with a warning) when the service fails.
pub fn random_words_or_empty<S: WordSupplier + ?Sized>(supplier: &S, count: usize) -> Vec<String> {
    supplier.random_words(count).unwrap_or_else(|e| {
        warn!("random word service unavailable: {e}");
        Vec::new()
    })
}

/// Related words, or an empty list (with a warning) when the service fails.
pub fn related_words_or_empty<S: WordSupplier + ?Sized>(
    supplier: &S,
    seed: &str,
    relation: Relation,
) -> Vec<String> {
    supplier.related_words(seed, relation).unwrap_or_else(|e| {
        warn!("related word service unavailable: {e}");
        Vec::new()
    })
}

/// Blocking HTTP implementation talking to the random-word API and Datamuse.
#[derive(Clone)]
pub struct HttpWordSupplier {
    client: Client,
    random_word_url: String,
    related_word_url: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct RelatedWord {
    word: String,
}

impl HttpWordSupplier {
    /// Build the client from the loaded configuration. The timeout and
    /// user agent apply to every request.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpWordSupplier {
            client,
            random_word_url: config.random_word_url.clone(),
            related_word_url: config.related_word_url.clone(),
            timeout: config.timeout,
        })
    }

    fn get_text(&self, url: &str, query: &[(String, String)]) -> Result<String, SupplyError> {
        debug!(url, ?query, "requesting words");
        let res = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| self.classify(e))?;
        if !res.status().is_success() {
            return Err(SupplyError::BadStatus { status: res.status().as_u16() });
        }
        res.text().map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> SupplyError {
        if err.is_timeout() {
            SupplyError::Timeout { timeout: self.timeout }
        } else {
            SupplyError::Transport(err)
        }
    }
}

impl WordSupplier for HttpWordSupplier {
    fn random_words(&self, count: usize) -> Result<Vec<String>, SupplyError> {
        let query = random_words_query(count);
        let body = self.get_text(&self.random_word_url, &query)?;
        parse_random_words(&body)
    }

    fn related_words(&self, seed: &str, relation: Relation) -> Result<Vec<String>, SupplyError> {
        let query = related_words_query(seed, relation);
        let body = self.get_text(&self.related_word_url, &query)?;
        parse_related_words(&body)
    }
}

pub fn random_words_query(count: usize) -> Vec<(String, String)> {
    vec![("number".to_string(), count.to_string())]
}

pub fn related_words_query(seed: &str, relation: Relation) -> Vec<(String, String)> {
    vec![
        (format!("rel_{}", relation.code()), seed.to_string()),
        ("max".to_string(), RELATED_REQUEST_MAX.to_string()),
    ]
}

/// Parse a random-word answer: a JSON array of strings.
pub fn parse_random_words(body: &str) -> Result<Vec<String>, SupplyError> {
    let raw: Vec<String> =
        serde_json::from_str(body).map_err(|e| SupplyError::Malformed(e.to_string()))?;
    Ok(normalize_supplied(raw))
}

/// Parse a related-words answer: a JSON array of objects with a `word` field.
/// Only the first five usable words are kept.
pub fn parse_related_words(body: &str) -> Result<Vec<String>, SupplyError> {
    let raw: Vec<RelatedWord> =
        serde_json::from_str(body).map_err(|e| SupplyError::Malformed(e.to_string()))?;
    let mut words = normalize_supplied(raw.into_iter().map(|w| w.word));
    words.truncate(RELATED_KEEP);
    Ok(words)
}
