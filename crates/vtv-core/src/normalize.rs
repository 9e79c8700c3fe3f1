//! Query normalisation and the consonant/vowel letter inventory.

use crate::phonetics::PhoneticTables;
use crate::tone::strip_all_tones;

/// Lowercase, drop whitespace and strip all five tone marks.
pub fn normalize(query: &str) -> String {
    let compact: String = query.chars().filter(|c| !c.is_whitespace()).collect();
    strip_all_tones(&compact)
}

/// The distinct consonant and vowel letters available to the generator.
///
/// Letters keep first-occurrence order; each contributes once no matter how
/// often it repeats in the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterInventory {
    pub consonants: Vec<char>,
    pub vowels: Vec<char>,
}

impl LetterInventory {
    /// Build from explicit letter lists, dropping repeats.
    pub fn new(
        consonants: impl IntoIterator<Item = char>,
        vowels: impl IntoIterator<Item = char>,
    ) -> Self {
        let mut inv = Self::default();
        for c in consonants {
            push_unique(&mut inv.consonants, c);
        }
        for v in vowels {
            push_unique(&mut inv.vowels, v);
        }
        inv
    }

    /// Split already-normalised text. Characters that are neither a
    /// consonant nor a vowel are skipped.
    pub fn from_normalized(text: &str, tables: &PhoneticTables) -> Self {
        let mut inv = Self::default();
        for c in text.chars() {
            if tables.is_consonant(c) {
                push_unique(&mut inv.consonants, c);
            } else if tables.is_vowel(c) {
                push_unique(&mut inv.vowels, c);
            }
        }
        inv
    }

    pub fn is_empty(&self) -> bool {
        self.consonants.is_empty() && self.vowels.is_empty()
    }

    pub fn contains_letter(&self, c: char) -> bool {
        self.consonants.contains(&c) || self.vowels.contains(&c)
    }
}

fn push_unique(letters: &mut Vec<char>, c: char) {
    if !letters.contains(&c) {
        letters.push(c);
    }
}
