//! Candidate syllable generation.
//!
//! Builds every admissible syllable spelling from a letter inventory in four
//! stages: onset consonants, vowel units (bare and toned), vowel units closed
//! by a final consonant, then onset + nucleus assembly filtered by the onset
//! exclusion tables. Output may contain duplicates; callers that need a set
//! deduplicate downstream.

#[cfg(test)]
mod tests;

use tracing::{debug, debug_span};

use crate::normalize::LetterInventory;
use crate::phonetics::{PhoneticTables, UnitKind};
use crate::tone::{add_tone, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Single,
    Double,
}

/// A vowel nucleus candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VowelCandidate {
    pub spelling: String,
    pub arity: Arity,
    pub tone: Option<Tone>,
    /// `false` for diphthongs that never take a closing consonant.
    pub allows_final_consonant: bool,
}

impl VowelCandidate {
    fn is_acute_or_dot(&self) -> bool {
        self.tone.is_some_and(Tone::is_acute_or_dot)
    }
}

/// Every intermediate stage of one generation run.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub consonants: Vec<String>,
    pub vowels: Vec<VowelCandidate>,
    pub rhymes: Vec<String>,
    pub syllables: Vec<String>,
}

/// Single onset consonants plus every ordered pair that forms a cluster.
pub fn consonant_units(inv: &LetterInventory, tables: &PhoneticTables) -> Vec<String> {
    let mut units = Vec::new();
    for &r1 in &inv.consonants {
        units.push(r1.to_string());
        for &r2 in &inv.consonants {
            let pair: String = [r1, r2].iter().collect();
            if tables.is_double_consonant(&pair) {
                units.push(pair);
            }
        }
    }
    units
}

/// Bare and toned single vowels, then diphthongs.
///
/// A diphthong takes its tone on the first letter, unless it is listed as
/// untoned, in which case only the bare spelling is produced.
pub fn vowel_units(inv: &LetterInventory, tables: &PhoneticTables) -> Vec<VowelCandidate> {
    let mut units = Vec::new();
    for &r1 in &inv.vowels {
        let first = r1.to_string();
        units.push(VowelCandidate {
            spelling: first.clone(),
            arity: Arity::Single,
            tone: None,
            allows_final_consonant: true,
        });
        for tone in Tone::ALL {
            units.push(VowelCandidate {
                spelling: add_tone(&first, tone),
                arity: Arity::Single,
                tone: Some(tone),
                allows_final_consonant: true,
            });
        }

        for &r2 in &inv.vowels {
            let pair: String = [r1, r2].iter().collect();
            if !tables.is_double_vowel(&pair) {
                continue;
            }
            let allows_final_consonant = !tables.lacks_final_consonant(&pair);
            let toned = !tables.is_untoned_diphthong(&pair);
            units.push(VowelCandidate {
                spelling: pair,
                arity: Arity::Double,
                tone: None,
                allows_final_consonant,
            });
            if toned {
                for tone in Tone::ALL {
                    let mut spelling = add_tone(&first, tone);
                    spelling.push(r2);
                    units.push(VowelCandidate {
                        spelling,
                        arity: Arity::Double,
                        tone: Some(tone),
                        allows_final_consonant,
                    });
                }
            }
        }
    }
    units
}

/// Vowel units closed by a final consonant.
///
/// Rules, first match wins:
/// 1. a bare front vowel takes only a front-vowel final (nh, ch);
/// 2. an acute/dot vowel takes only an acute/dot final, and of those the
///    front-vowel finals again require a front vowel;
/// 3. anything else takes the plain finals.
pub fn rhymes(
    vowels: &[VowelCandidate],
    consonants: &[String],
    tables: &PhoneticTables,
) -> Vec<String> {
    let mut out = Vec::new();
    for v in vowels {
        let front = tables.is_front_vowel(&v.spelling);
        if front {
            for c in consonants {
                if tables.is_front_vowel_consonant(c) {
                    out.push(format!("{}{}", v.spelling, c));
                }
            }
        } else if v.is_acute_or_dot() && v.allows_final_consonant {
            for c in consonants {
                if !tables.is_acute_dot_consonant(c) {
                    continue;
                }
                // Unreachable for nh/ch: `front` is false on this branch.
                if tables.is_front_vowel_consonant(c) {
                    if front {
                        out.push(format!("{}{}", v.spelling, c));
                    }
                } else {
                    out.push(format!("{}{}", v.spelling, c));
                }
            }
        } else if v.allows_final_consonant {
            for c in consonants {
                if tables.is_plain_final(c) {
                    out.push(format!("{}{}", v.spelling, c));
                }
            }
        }
    }
    out
}

/// Run all stages and keep the intermediates.
pub fn generate(inv: &LetterInventory, tables: &PhoneticTables) -> Generation {
    let _span = debug_span!(
        "generate_syllables",
        consonants = inv.consonants.len(),
        vowels = inv.vowels.len()
    )
    .entered();

    let consonants = consonant_units(inv, tables);
    let vowels = vowel_units(inv, tables);
    let closed = rhymes(&vowels, &consonants, tables);

    let mut syllables: Vec<String> = vowels.iter().map(|v| v.spelling.clone()).collect();
    syllables.extend(closed.iter().cloned());

    for onset in &consonants {
        for v in &vowels {
            if tables.onset_allowed(onset, &v.spelling, UnitKind::Vowel) {
                syllables.push(format!("{onset}{}", v.spelling));
            }
        }
        for rhyme in &closed {
            if tables.onset_allowed(onset, rhyme, UnitKind::Rhyme) {
                syllables.push(format!("{onset}{rhyme}"));
            }
        }
    }

    debug!(
        consonant_units = consonants.len(),
        vowel_units = vowels.len(),
        rhymes = closed.len(),
        syllables = syllables.len()
    );

    Generation {
        consonants,
        vowels,
        rhymes: closed,
        syllables,
    }
}

/// Candidate syllables only.
pub fn generate_syllables(inv: &LetterInventory, tables: &PhoneticTables) -> Vec<String> {
    generate(inv, tables).syllables
}
