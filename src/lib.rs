//! Search facade: accent-free letters in, dictionary phrases out.
//!
//! Wires the query pipeline together: normalize → letter inventory →
//! candidate syllables → two-syllable phrases → lexicon filter.

pub mod trace_init;


use std::path::Path;
use std::sync::Arc;

use tracing::{debug, debug_span};

use vtv_core::compound::{match_phrases, match_words, MatchError, MatcherConfig};
use vtv_core::lexicon::{Lexicon, LexiconError, WordList};
use vtv_core::normalize::{normalize, LetterInventory};
use vtv_core::phonetics::{self, PhoneticTables};
use vtv_core::settings::{settings, SearchSettings};
use vtv_core::syllable::generate_syllables;

pub use trace_init::init_tracing;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("word list error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("matching failed: {0}")]
    Match(#[from] MatchError),
    #[error("query must be {min} to {max} characters long, got {len}")]
    QueryLength { len: usize, min: usize, max: usize },
}

/// Result of one search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub query: String,
    pub normalized: String,
    pub syllable_count: usize,
    /// Matched two-syllable phrases, sorted.
    pub phrases: Vec<String>,
    /// Matched single syllables, sorted. Empty unless enabled.
    pub words: Vec<String>,
}

impl SearchOutcome {
    pub fn total(&self) -> usize {
        self.phrases.len() + self.words.len()
    }
}

pub struct Engine {
    lexicon: Arc<dyn Lexicon>,
    tables: &'static PhoneticTables,
    matcher: MatcherConfig,
    include_single_syllables: bool,
}

impl Engine {
    /// Build over an already loaded lexicon, taking matcher and search
    /// options from the global settings.
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        let s = settings();
        Self {
            lexicon,
            tables: phonetics::tables(),
            matcher: MatcherConfig::from(&s.matcher),
            include_single_syllables: s.search.include_single_syllables,
        }
    }

    /// Load a word list (text or compiled). Fails before any search runs.
    pub fn open(path: &Path) -> Result<Self, EngineError> {
        let list = WordList::open(path)?;
        Ok(Self::new(Arc::new(list)))
    }

    pub fn with_matcher(mut self, matcher: MatcherConfig) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_single_syllables(mut self, enabled: bool) -> Self {
        self.include_single_syllables = enabled;
        self
    }

    pub fn lexicon(&self) -> &dyn Lexicon {
        self.lexicon.as_ref()
    }

    fn inventory(&self, normalized: &str) -> LetterInventory {
        LetterInventory::from_normalized(normalized, self.tables)
    }

    /// Candidate syllables for `query`, without matching.
    pub fn syllables(&self, query: &str) -> Vec<String> {
        generate_syllables(&self.inventory(&normalize(query)), self.tables)
    }

    pub fn search(&self, query: &str) -> Result<SearchOutcome, EngineError> {
        let _span = debug_span!("search", query).entered();
        let normalized = normalize(query);
        let inv = self.inventory(&normalized);
        let syllables = generate_syllables(&inv, self.tables);

        let mut phrases = match_phrases(&syllables, self.lexicon.as_ref(), &self.matcher)?;
        phrases.sort_unstable();
        let mut words = if self.include_single_syllables {
            match_words(&syllables, self.lexicon.as_ref())
        } else {
            Vec::new()
        };
        words.sort_unstable();

        debug!(
            syllables = syllables.len(),
            phrases = phrases.len(),
            words = words.len()
        );
        Ok(SearchOutcome {
            query: query.to_string(),
            normalized,
            syllable_count: syllables.len(),
            phrases,
            words,
        })
    }
}

/// Length bound the interactive front ends put on raw queries, counted in
/// characters before normalisation.
pub fn check_query_length(query: &str, bounds: &SearchSettings) -> Result<(), EngineError> {
    let len = query.chars().count();
    if len < bounds.min_query_chars || len > bounds.max_query_chars {
        return Err(EngineError::QueryLength {
            len,
            min: bounds.min_query_chars,
            max: bounds.max_query_chars,
        });
    }
    Ok(())
}
