// Username composer: the four generation strategies and the batch loop that
// drives them. Randomness is always passed in by the caller so a seeded RNG
// gives reproducible output.

use crate::api::{random_words_or_empty, WordSupplier};
use crate::words::{is_alphabetic, is_pool_word, title_case, Theme, WordBank};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 100;
/// Word counts a request may ask for.
pub const WORD_COUNTS: [usize; 2] = [5, 6];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("cannot pick {requested} distinct words from a pool of {available}")]
    InsufficientPool { requested: usize, available: usize },

    #[error("word category {0} is empty")]
    EmptyCategory(&'static str),

    #[error("word count must be 5 or 6, got {0}")]
    InvalidWordCount(usize),
}

/// How usernames are built. Only the themed method carries a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Local,
    Api,
    Hybrid,
    Themed(Theme),
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::Local => "local",
            Method::Api => "api",
            Method::Hybrid => "hybrid",
            Method::Themed(_) => "themed",
        }
    }

    pub fn theme(&self) -> Option<&Theme> {
        match self {
            Method::Themed(theme) => Some(theme),
            _ => None,
        }
    }

    /// Methods that call the word services and are paced between items.
    pub fn uses_network(&self) -> bool {
        matches!(self, Method::Api | Method::Hybrid)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(self.name()))
    }
}

/// Clamp a requested quantity into `MIN_COUNT..=MAX_COUNT`.
pub fn clamp_count(requested: i64) -> usize {
    requested.clamp(MIN_COUNT as i64, MAX_COUNT as i64) as usize
}

/// Parameters for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    count: usize,
    word_count: usize,
    method: Method,
}

impl GenerationRequest {
    /// `count` is clamped into range; `word_count` must be 5 or 6.
    pub fn new(count: i64, word_count: usize, method: Method) -> Result<Self, GenerateError> {
        if !WORD_COUNTS.contains(&word_count) {
            return Err(GenerateError::InvalidWordCount(word_count));
        }
        Ok(GenerationRequest { count: clamp_count(count), word_count, method })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

/// Usernames produced by a batch, with the request that produced them.
/// May hold fewer than `request.count()` entries when items failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub request: GenerationRequest,
    pub usernames: Vec<String>,
}

/// Progress notification emitted once per batch item.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    Generated { index: usize, total: usize, username: &'a str },
    Failed { index: usize, total: usize, error: &'a GenerateError },
}

/// Pick `k` distinct positions of `pool` in random order.
///
/// Fails instead of returning a shorter list when the pool is too small.
pub fn sample_distinct<T, R>(pool: &[T], k: usize, rng: &mut R) -> Result<Vec<T>, GenerateError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if k > pool.len() {
        return Err(GenerateError::InsufficientPool { requested: k, available: pool.len() });
    }
    let mut scratch = pool.to_vec();
    let (picked, _) = scratch.partial_shuffle(rng, k);
    Ok(picked.to_vec())
}

/// Run `produce` for each of `total` items in order.
///
/// Failed items are reported through `on_event` and left out of the
/// returned list. With `pacing` set, the loop sleeps between items.
pub fn run_batch<P, F>(total: usize, pacing: Option<Duration>, mut produce: P, mut on_event: F) -> Vec<String>
where
    P: FnMut(usize) -> Result<String, GenerateError>,
    F: FnMut(BatchEvent<'_>),
{
    let mut usernames = Vec::with_capacity(total);
    for i in 0..total {
        let index = i + 1;
        match produce(i) {
            Ok(username) => {
                on_event(BatchEvent::Generated { index, total, username: &username });
                usernames.push(username);
            }
            Err(error) => on_event(BatchEvent::Failed { index, total, error: &error }),
        }
        if let Some(delay) = pacing {
            if index < total && !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    }
    usernames
}

/// Builds usernames from the local word bank and a [`WordSupplier`].
pub struct Composer<S> {
    supplier: S,
    bank: WordBank,
    pacing: Duration,
}

impl<S: WordSupplier> Composer<S> {
    pub fn new(supplier: S) -> Self {
        Composer {
            supplier,
            bank: WordBank::standard(),
            pacing: Duration::from_millis(crate::config::DEFAULT_PACING_MS),
        }
    }

    pub fn with_bank(mut self, bank: WordBank) -> Self {
        self.bank = bank;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// One word per position, cycling through the categories in a shuffled
    /// order.
    pub fn local<R: Rng + ?Sized>(&self, rng: &mut R, word_count: usize) -> Result<String, GenerateError> {
        Ok(self.local_words(rng, word_count)?.concat())
    }

    /// Random words from the service only. `Ok(None)` when too few usable
    /// words came back; the caller decides how to fall back.
    pub fn api<R: Rng + ?Sized>(&self, rng: &mut R, word_count: usize) -> Result<Option<String>, GenerateError> {
        Ok(self.api_words(rng, word_count)?.map(|words| words.concat()))
    }

    /// Service words mixed with a local sample, falling back to
    /// [`Composer::local`] when the merged pool is too small.
    pub fn hybrid<R: Rng + ?Sized>(&self, rng: &mut R, word_count: usize) -> Result<String, GenerateError> {
        Ok(self.hybrid_words(rng, word_count)?.concat())
    }

    /// Theme words plus a local sample. The result holds fewer than
    /// `word_count` words when the alphabetic pool is smaller than that.
    pub fn themed<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        theme: &Theme,
        word_count: usize,
    ) -> Result<String, GenerateError> {
        Ok(self.themed_words(rng, theme, word_count)?.concat())
    }

    /// Candidate pool for the themed strategy: the theme's own words followed
    /// by `2 * word_count` distinct picks from adjectives, nouns and actions,
    /// keeping alphabetic entries only.
    pub fn themed_pool<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        theme: &Theme,
        word_count: usize,
    ) -> Result<Vec<&'static str>, GenerateError> {
        let extras = WordBank::join(&[self.bank.adjectives, self.bank.nouns, self.bank.actions]);
        let mut pool = theme.words(&self.bank);
        pool.extend(sample_distinct(&extras, word_count * 2, rng)?);
        pool.retain(|w| is_alphabetic(w));
        Ok(pool)
    }

    /// One username for `method`. The api method falls back to local words
    /// when the service does not deliver enough.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        method: &Method,
        word_count: usize,
    ) -> Result<String, GenerateError> {
        match method {
            Method::Local => self.local(rng, word_count),
            Method::Api => match self.api(rng, word_count)? {
                Some(username) => Ok(username),
                None => {
                    debug!(word_count, "api pool too small, using local words");
                    self.local(rng, word_count)
                }
            },
            Method::Hybrid => self.hybrid(rng, word_count),
            Method::Themed(theme) => self.themed(rng, theme, word_count),
        }
    }

    /// Run a whole batch without progress reporting.
    pub fn generate<R: Rng + ?Sized>(&self, request: &GenerationRequest, rng: &mut R) -> GenerationResult {
        self.generate_with(request, rng, |_| {})
    }

    /// Run a whole batch, reporting each item through `on_event`.
    pub fn generate_with<R, F>(&self, request: &GenerationRequest, rng: &mut R, on_event: F) -> GenerationResult
    where
        R: Rng + ?Sized,
        F: FnMut(BatchEvent<'_>),
    {
        let method = request.method();
        let pacing = method.uses_network().then_some(self.pacing);
        debug!(count = request.count(), word_count = request.word_count(), %method, "starting batch");

        let usernames = run_batch(
            request.count(),
            pacing,
            |_| self.compose(rng, method, request.word_count()),
            on_event,
        );
        GenerationResult { request: request.clone(), usernames }
    }

    fn local_words<R: Rng + ?Sized>(&self, rng: &mut R, word_count: usize) -> Result<Vec<&'static str>, GenerateError> {
        let mut categories = self.bank.categories();
        categories.shuffle(rng);

        let mut words = Vec::with_capacity(word_count);
        for i in 0..word_count {
            let category = categories[i % categories.len()];
            let word = category
                .words
                .choose(rng)
                .ok_or(GenerateError::EmptyCategory(category.name))?;
            words.push(*word);
        }
        Ok(words)
    }

    fn api_words<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        word_count: usize,
    ) -> Result<Option<Vec<String>>, GenerateError> {
        let pool: Vec<String> = random_words_or_empty(&self.supplier, word_count * 2)
            .into_iter()
            .filter(|w| is_pool_word(w))
            .collect();
        if pool.len() < word_count {
            debug!(usable = pool.len(), word_count, "not enough service words");
            return Ok(None);
        }
        sample_distinct(&pool, word_count, rng).map(Some)
    }

    fn hybrid_words<R: Rng + ?Sized>(&self, rng: &mut R, word_count: usize) -> Result<Vec<String>, GenerateError> {
        let mut pool = random_words_or_empty(&self.supplier, word_count);
        let local = sample_distinct(&self.bank.all_words(), word_count * 2, rng)?;
        pool.extend(local.into_iter().map(String::from));
        pool.retain(|w| is_pool_word(w));

        if pool.len() >= word_count {
            return sample_distinct(&pool, word_count, rng);
        }
        debug!(usable = pool.len(), word_count, "hybrid pool too small, using local words");
        Ok(self
            .local_words(rng, word_count)?
            .into_iter()
            .map(String::from)
            .collect())
    }

    fn themed_words<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        theme: &Theme,
        word_count: usize,
    ) -> Result<Vec<&'static str>, GenerateError> {
        let pool = self.themed_pool(rng, theme, word_count)?;
        let take = word_count.min(pool.len());
        if take < word_count {
            debug!(%theme, available = pool.len(), word_count, "themed pool smaller than requested");
        }
        sample_distinct(&pool, take, rng)
    }
}
