//! Two-syllable phrase assembly and concurrent dictionary matching.
//!
//! The candidate list is squared into `"w1 w2"` phrases and each phrase is
//! checked against a read-only [`Lexicon`]. Rows of the square are split
//! into contiguous blocks, one per scoped worker; each worker collects its
//! matches locally and merges them into the shared accumulator once.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::thread;

use tracing::{debug, debug_span};

use crate::lexicon::Lexicon;
use crate::settings::MatcherSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("matcher worker panicked")]
    WorkerPanicked,
    #[error("match accumulator poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    /// 0 = `available_parallelism()`.
    pub workers: usize,
    pub min_rows_per_worker: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            min_rows_per_worker: 16,
        }
    }
}

impl From<&MatcherSettings> for MatcherConfig {
    fn from(s: &MatcherSettings) -> Self {
        Self {
            workers: s.workers,
            min_rows_per_worker: s.min_rows_per_worker,
        }
    }
}

impl MatcherConfig {
    fn worker_count(&self, rows: usize) -> usize {
        let max = if self.workers == 0 {
            thread::available_parallelism().map_or(1, NonZeroUsize::get)
        } else {
            self.workers
        };
        (rows / self.min_rows_per_worker.max(1)).clamp(1, max)
    }
}

/// Distinct candidates, first occurrence wins.
fn unique_candidates(candidates: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .map(String::as_str)
        .filter(|c| seen.insert(*c))
        .collect()
}

/// The full ordered Cartesian square of `candidates` as phrases,
/// including each candidate paired with itself.
pub fn compound_phrases(candidates: &[String]) -> Vec<String> {
    let mut phrases = Vec::with_capacity(candidates.len() * candidates.len());
    for w1 in candidates {
        for w2 in candidates {
            phrases.push(format!("{w1} {w2}"));
        }
    }
    phrases
}

fn match_rows(rows: &[&str], columns: &[&str], lexicon: &dyn Lexicon) -> Vec<String> {
    let mut matched = Vec::new();
    let mut phrase = String::new();
    for w1 in rows {
        for w2 in columns {
            phrase.clear();
            phrase.push_str(w1);
            phrase.push(' ');
            phrase.push_str(w2);
            if lexicon.contains(&phrase) {
                matched.push(phrase.clone());
            }
        }
    }
    matched
}

/// Every distinct two-syllable phrase built from `candidates` that the
/// lexicon contains. Result order is unspecified.
pub fn match_phrases(
    candidates: &[String],
    lexicon: &dyn Lexicon,
    config: &MatcherConfig,
) -> Result<Vec<String>, MatchError> {
    let unique = unique_candidates(candidates);
    let _span = debug_span!("match_phrases", candidates = unique.len()).entered();
    if unique.is_empty() {
        return Ok(Vec::new());
    }

    let workers = config.worker_count(unique.len());
    if workers == 1 {
        let matched = match_rows(&unique, &unique, lexicon);
        debug!(workers, matched = matched.len());
        return Ok(matched);
    }

    let block = unique.len().div_ceil(workers);
    let accumulator = Mutex::new(Vec::new());
    thread::scope(|s| {
        let handles: Vec<_> = unique
            .chunks(block)
            .map(|rows| {
                let unique = &unique;
                let accumulator = &accumulator;
                s.spawn(move || -> Result<(), MatchError> {
                    let local = match_rows(rows, unique, lexicon);
                    if !local.is_empty() {
                        accumulator
                            .lock()
                            .map_err(|_| MatchError::Poisoned)?
                            .extend(local);
                    }
                    Ok(())
                })
            })
            .collect();

        // Join every handle so no panicked worker is left for the scope to re-raise.
        let mut outcome = Ok(());
        for h in handles {
            let joined = h
                .join()
                .map_err(|_| MatchError::WorkerPanicked)
                .and_then(|r| r);
            if outcome.is_ok() {
                outcome = joined;
            }
        }
        outcome
    })?;

    let matched = accumulator
        .into_inner()
        .map_err(|_| MatchError::Poisoned)?;
    debug!(workers, matched = matched.len());
    Ok(matched)
}

/// Distinct single-syllable candidates present in the lexicon.
pub fn match_words(candidates: &[String], lexicon: &dyn Lexicon) -> Vec<String> {
    unique_candidates(candidates)
        .into_iter()
        .filter(|w| lexicon.contains(w))
        .map(str::to_string)
        .collect()
}
