//! Word-list storage: the membership oracle the matcher filters against.
//!
//! `WordList` loads either the plain-text format (one entry per line) or a
//! compiled VTWL file (magic + version + bincode-encoded sorted entries).


use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, debug_span};
use unicode_normalization::UnicodeNormalization;

const MAGIC: &[u8; 4] = b"VTWL";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected VTWL)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("word list has no entries")]
    Empty,
}

/// Trim and NFC-compose `raw` into the form entries are stored in.
pub fn compose_entry(raw: &str) -> String {
    raw.trim().nfc().collect()
}

/// Read-only set-membership oracle over words and phrases.
pub trait Lexicon: Send + Sync {
    fn contains(&self, entry: &str) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Lexicon for HashSet<String> {
    fn contains(&self, entry: &str) -> bool {
        HashSet::contains(self, entry)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

/// Immutable set of Vietnamese words and multi-syllable phrases.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    entries: HashSet<String>,
}

impl WordList {
    /// Build from lines. Entries are trimmed and NFC-composed; blank
    /// lines are skipped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = lines
            .into_iter()
            .map(|line| compose_entry(line.as_ref()))
            .filter(|entry| !entry.is_empty())
            .collect();
        Self { entries }
    }

    /// Parse the plain-text format. An empty source is an error.
    pub fn read_text<R: io::Read>(reader: R) -> Result<Self, LexiconError> {
        let lines = BufReader::new(reader)
            .lines()
            .collect::<Result<Vec<String>, io::Error>>()?;
        let list = Self::from_lines(lines);
        if list.entries.is_empty() {
            return Err(LexiconError::Empty);
        }
        Ok(list)
    }

    pub fn open_text(path: &Path) -> Result<Self, LexiconError> {
        Self::read_text(fs::File::open(path)?)
    }

    /// Open a word list, detecting the compiled format by its magic bytes.
    pub fn open(path: &Path) -> Result<Self, LexiconError> {
        let _span = debug_span!("open_word_list", path = %path.display()).entered();
        let bytes = fs::read(path)?;
        let list = if bytes.starts_with(MAGIC) {
            Self::from_bytes(&bytes)?
        } else {
            Self::read_text(bytes.as_slice())?
        };
        debug!(entries = list.len());
        Ok(list)
    }

    /// Serialize to bytes (VTWL format). Entries are written sorted so the
    /// output is reproducible.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LexiconError> {
        let body = bincode::serialize(&self.entries()).map_err(LexiconError::Serialize)?;
        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (VTWL format).
    pub fn from_bytes(data: &[u8]) -> Result<Self, LexiconError> {
        if data.len() < HEADER_SIZE {
            return Err(LexiconError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(LexiconError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(LexiconError::UnsupportedVersion(data[4]));
        }
        let entries: Vec<String> =
            bincode::deserialize(&data[HEADER_SIZE..]).map_err(LexiconError::Deserialize)?;
        if entries.is_empty() {
            return Err(LexiconError::Empty);
        }
        Ok(Self {
            entries: entries.into_iter().collect(),
        })
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), LexiconError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// All entries, sorted.
    pub fn entries(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    /// Single-syllable entries.
    pub fn word_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.contains(' ')).count()
    }

    /// Multi-syllable entries.
    pub fn phrase_count(&self) -> usize {
        self.entries.len() - self.word_count()
    }
}

impl Lexicon for WordList {
    fn contains(&self, entry: &str) -> bool {
        self.entries.contains(entry)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
