use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use vtv_core::normalize::{normalize, LetterInventory};
use vtv_core::phonetics::tables;
use vtv_core::settings::settings;
use vtv_core::syllable::generate_syllables;
use vtv_engine::{check_query_length, Engine};

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    normalized: &'a str,
    syllables: usize,
    total: usize,
    phrases: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    words: &'a [String],
}

#[derive(Serialize)]
struct SyllableReport<'a> {
    query: &'a str,
    normalized: &'a str,
    syllables: Vec<String>,
}

/// Split results into display rows of `per_line` entries.
pub fn rows(results: &[String], per_line: usize) -> Vec<String> {
    results
        .chunks(per_line.max(1))
        .map(|chunk| chunk.join("  |  "))
        .collect()
}

pub fn search(word_list: &str, query: &str, json: bool, no_limit: bool, single: bool) {
    let s = settings();
    if !no_limit {
        die!(check_query_length(query, &s.search), "Error: {}");
    }

    let engine = die!(
        Engine::open(Path::new(word_list)),
        "Error loading {word_list}: {}"
    );
    debug!(word_list, entries = engine.lexicon().len(), "word list loaded");
    let engine = if single {
        engine.with_single_syllables(true)
    } else {
        engine
    };
    let outcome = die!(engine.search(query), "Error: {}");

    if json {
        let report = SearchReport {
            query,
            normalized: &outcome.normalized,
            syllables: outcome.syllable_count,
            total: outcome.total(),
            phrases: &outcome.phrases,
            words: &outcome.words,
        };
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "Error: {}")
        );
        return;
    }

    if outcome.total() == 0 {
        println!("Không tìm thấy từ nào.");
        return;
    }
    println!("Kết quả: {} từ.", outcome.total());
    let per_line = s.output.words_per_line;
    for row in rows(&outcome.words, per_line) {
        println!("{row}");
    }
    for row in rows(&outcome.phrases, per_line) {
        println!("{row}");
    }
}

pub fn syllables(query: &str, json: bool) {
    let normalized = normalize(query);
    let inv = LetterInventory::from_normalized(&normalized, tables());
    let mut seen = HashSet::new();
    let syllables: Vec<String> = generate_syllables(&inv, tables())
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect();

    if json {
        let report = SyllableReport {
            query,
            normalized: &normalized,
            syllables,
        };
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "Error: {}")
        );
        return;
    }

    eprintln!(
        "{} consonants, {} vowels -> {} syllables",
        inv.consonants.len(),
        inv.vowels.len(),
        syllables.len()
    );
    for s in &syllables {
        println!("{s}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_split_by_width() {
        let items: Vec<String> = ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let r = rows(&items, 5);
        assert_eq!(r, vec!["a  |  b  |  c  |  d  |  e", "f  |  g"]);
    }

    #[test]
    fn rows_empty() {
        assert!(rows(&[], 5).is_empty());
    }
}
