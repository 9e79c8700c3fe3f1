//! Phonetic inventory and phonotactic constraint tables, loaded from TOML.
//!
//! Same OnceLock pattern as the settings module:
//! - `init_custom(toml_content)` installs a replacement before first `tables()` call
//! - `tables()` returns `&'static PhoneticTables` (lazy-init singleton)
//! - Defaults are embedded via `include_str!("default_phonetics.toml")`

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_PHONETICS_TOML: &str = include_str!("default_phonetics.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `tables()` call.
pub fn init_custom(toml_content: String) -> Result<(), PhoneticsError> {
    parse_phonetics_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| PhoneticsError::AlreadyInitialized)
}

/// Get or initialize the global table singleton.
pub fn tables() -> &'static PhoneticTables {
    static INSTANCE: OnceLock<PhoneticTables> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_PHONETICS_TOML);
        parse_phonetics_toml(toml_str).expect("phonetics TOML must be valid")
    })
}

/// Returns the embedded default phonetics TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_PHONETICS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum PhoneticsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("{0} is empty")]
    EmptyList(&'static str),
    #[error("{field}: expected a single letter, got {value:?}")]
    NotALetter { field: &'static str, value: String },
    #[error("{0} contains an empty spelling")]
    EmptySpelling(&'static str),
    #[error("phonetic tables already initialized")]
    AlreadyInitialized,
}

#[derive(Deserialize)]
struct PhoneticsConfig {
    letters: LettersSection,
    clusters: ClustersSection,
    finals: FinalsSection,
    onset: OnsetSection,
}

#[derive(Deserialize)]
struct LettersSection {
    consonants: Vec<String>,
    vowels: Vec<String>,
}

#[derive(Deserialize)]
struct ClustersSection {
    double_consonants: Vec<String>,
    double_vowels: Vec<String>,
    #[serde(default)]
    untoned_diphthongs: Vec<String>,
    #[serde(default)]
    vowels_without_final_consonant: Vec<String>,
}

#[derive(Deserialize)]
struct FinalsSection {
    front_vowels: Vec<String>,
    front_vowel_consonants: Vec<String>,
    final_consonants: Vec<String>,
    acute_dot_consonants: Vec<String>,
}

#[derive(Deserialize)]
struct OnsetSection {
    #[serde(default)]
    vowels_without_onset: Vec<String>,
    #[serde(default)]
    vowel_exclusions: HashMap<String, Vec<String>>,
    #[serde(default)]
    rhyme_exclusions: HashMap<String, Vec<String>>,
}

/// Which kind of unit follows an onset consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A bare or toned vowel / diphthong.
    Vowel,
    /// A vowel closed by a final consonant.
    Rhyme,
}

/// The complete rule base. Immutable after construction and shared by
/// reference across matcher workers.
#[derive(Debug, Clone)]
pub struct PhoneticTables {
    consonants: Vec<char>,
    vowels: Vec<char>,
    double_consonants: HashSet<String>,
    double_vowels: HashSet<String>,
    untoned_diphthongs: HashSet<String>,
    vowels_without_final_consonant: HashSet<String>,
    front_vowels: HashSet<String>,
    front_vowel_consonants: HashSet<String>,
    final_consonants: HashSet<String>,
    acute_dot_consonants: HashSet<String>,
    vowels_without_onset: HashSet<String>,
    vowel_exclusions: HashMap<String, HashSet<String>>,
    rhyme_exclusions: HashMap<String, HashSet<String>>,
}

impl PhoneticTables {
    pub fn consonants(&self) -> &[char] {
        &self.consonants
    }

    pub fn vowels(&self) -> &[char] {
        &self.vowels
    }

    pub fn is_consonant(&self, c: char) -> bool {
        self.consonants.contains(&c)
    }

    pub fn is_vowel(&self, c: char) -> bool {
        self.vowels.contains(&c)
    }

    pub fn is_double_consonant(&self, s: &str) -> bool {
        self.double_consonants.contains(s)
    }

    pub fn is_double_vowel(&self, s: &str) -> bool {
        self.double_vowels.contains(s)
    }

    /// Diphthongs that only appear without a tone on their first letter.
    pub fn is_untoned_diphthong(&self, s: &str) -> bool {
        self.untoned_diphthongs.contains(s)
    }

    pub fn lacks_final_consonant(&self, s: &str) -> bool {
        self.vowels_without_final_consonant.contains(s)
    }

    pub fn is_front_vowel(&self, s: &str) -> bool {
        self.front_vowels.contains(s)
    }

    pub fn is_front_vowel_consonant(&self, s: &str) -> bool {
        self.front_vowel_consonants.contains(s)
    }

    pub fn is_final_consonant(&self, s: &str) -> bool {
        self.final_consonants.contains(s)
    }

    pub fn is_acute_dot_consonant(&self, s: &str) -> bool {
        self.acute_dot_consonants.contains(s)
    }

    /// Finals that need neither a front vowel nor an acute/dot tone.
    pub fn is_plain_final(&self, s: &str) -> bool {
        self.is_final_consonant(s)
            && !self.is_front_vowel_consonant(s)
            && !self.is_acute_dot_consonant(s)
    }

    /// Whether `onset` may precede the exact spelling `unit`.
    pub fn onset_allowed(&self, onset: &str, unit: &str, kind: UnitKind) -> bool {
        let exclusions = match kind {
            UnitKind::Vowel => {
                if self.vowels_without_onset.contains(unit) {
                    return false;
                }
                &self.vowel_exclusions
            }
            UnitKind::Rhyme => &self.rhyme_exclusions,
        };
        exclusions
            .get(unit)
            .map_or(true, |onsets| !onsets.contains(onset))
    }
}

pub fn parse_phonetics_toml(toml_str: &str) -> Result<PhoneticTables, PhoneticsError> {
    let config: PhoneticsConfig =
        toml::from_str(toml_str).map_err(|e| PhoneticsError::Parse(e.to_string()))?;

    let consonants = parse_letters("letters.consonants", &config.letters.consonants)?;
    let vowels = parse_letters("letters.vowels", &config.letters.vowels)?;

    Ok(PhoneticTables {
        consonants,
        vowels,
        double_consonants: spelling_set(
            "clusters.double_consonants",
            config.clusters.double_consonants,
        )?,
        double_vowels: spelling_set("clusters.double_vowels", config.clusters.double_vowels)?,
        untoned_diphthongs: spelling_set(
            "clusters.untoned_diphthongs",
            config.clusters.untoned_diphthongs,
        )?,
        vowels_without_final_consonant: spelling_set(
            "clusters.vowels_without_final_consonant",
            config.clusters.vowels_without_final_consonant,
        )?,
        front_vowels: spelling_set("finals.front_vowels", config.finals.front_vowels)?,
        front_vowel_consonants: spelling_set(
            "finals.front_vowel_consonants",
            config.finals.front_vowel_consonants,
        )?,
        final_consonants: spelling_set("finals.final_consonants", config.finals.final_consonants)?,
        acute_dot_consonants: spelling_set(
            "finals.acute_dot_consonants",
            config.finals.acute_dot_consonants,
        )?,
        vowels_without_onset: spelling_set(
            "onset.vowels_without_onset",
            config.onset.vowels_without_onset,
        )?,
        vowel_exclusions: exclusion_map("onset.vowel_exclusions", config.onset.vowel_exclusions)?,
        rhyme_exclusions: exclusion_map("onset.rhyme_exclusions", config.onset.rhyme_exclusions)?,
    })
}

fn parse_letters(field: &'static str, raw: &[String]) -> Result<Vec<char>, PhoneticsError> {
    if raw.is_empty() {
        return Err(PhoneticsError::EmptyList(field));
    }
    let mut letters = Vec::with_capacity(raw.len());
    for value in raw {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                if !letters.contains(&c) {
                    letters.push(c);
                }
            }
            _ => {
                return Err(PhoneticsError::NotALetter {
                    field,
                    value: value.clone(),
                })
            }
        }
    }
    Ok(letters)
}

fn spelling_set(
    field: &'static str,
    raw: Vec<String>,
) -> Result<HashSet<String>, PhoneticsError> {
    if raw.iter().any(|s| s.is_empty()) {
        return Err(PhoneticsError::EmptySpelling(field));
    }
    Ok(raw.into_iter().collect())
}

fn exclusion_map(
    field: &'static str,
    raw: HashMap<String, Vec<String>>,
) -> Result<HashMap<String, HashSet<String>>, PhoneticsError> {
    raw.into_iter()
        .map(|(unit, onsets)| {
            if unit.is_empty() {
                return Err(PhoneticsError::EmptySpelling(field));
            }
            Ok((unit, spelling_set(field, onsets)?))
        })
        .collect()
}
