use std::collections::HashSet;

use proptest::prelude::*;

use super::*;
use crate::phonetics::{parse_phonetics_toml, DEFAULT_PHONETICS_TOML};
use crate::tone::{split_tone, strip_all_tones};

fn tables() -> PhoneticTables {
    parse_phonetics_toml(DEFAULT_PHONETICS_TOML).unwrap()
}

fn inv(consonants: &str, vowels: &str) -> LetterInventory {
    LetterInventory::new(consonants.chars(), vowels.chars())
}

fn syllable_set(consonants: &str, vowels: &str) -> HashSet<String> {
    generate_syllables(&inv(consonants, vowels), &tables())
        .into_iter()
        .collect()
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn single_consonant_single_vowel() {
    let g = generate(&inv("b", "a"), &tables());
    assert_eq!(g.consonants, vec!["b"]);
    let got: HashSet<String> = g.syllables.into_iter().collect();
    assert_eq!(
        got,
        set(&["a", "à", "á", "ả", "ã", "ạ", "ba", "bà", "bá", "bả", "bã", "bạ"])
    );
}

#[test]
fn empty_inventory_yields_nothing() {
    let g = generate(&LetterInventory::default(), &tables());
    assert!(g.consonants.is_empty());
    assert!(g.vowels.is_empty());
    assert!(g.rhymes.is_empty());
    assert!(g.syllables.is_empty());
}

#[test]
fn consonants_only_yield_no_syllables() {
    let g = generate(&inv("bcn", ""), &tables());
    assert!(!g.consonants.is_empty());
    assert!(g.syllables.is_empty());
}

#[test]
fn consonant_clusters_from_ordered_pairs() {
    let units = consonant_units(&inv("nght", ""), &tables());
    let got: HashSet<String> = units.into_iter().collect();
    assert_eq!(got, set(&["n", "g", "h", "t", "ng", "nh", "gh", "th"]));
}

#[test]
fn trigraph_is_never_formed_from_pairs() {
    let units = consonant_units(&inv("ngh", ""), &tables());
    assert!(!units.iter().any(|u| u == "ngh"));
}

#[test]
fn single_vowel_has_six_forms() {
    let units = vowel_units(&inv("", "ư"), &tables());
    assert_eq!(units.len(), 6);
    assert!(units.iter().all(|u| u.arity == Arity::Single));
    assert_eq!(units[0].tone, None);
    let tones: Vec<Option<Tone>> = units[1..].iter().map(|u| u.tone).collect();
    assert_eq!(tones, Tone::ALL.iter().copied().map(Some).collect::<Vec<_>>());
}

#[test]
fn diphthong_tone_on_first_letter() {
    let units = vowel_units(&inv("", "oa"), &tables());
    let doubles: Vec<&str> = units
        .iter()
        .filter(|u| u.arity == Arity::Double)
        .map(|u| u.spelling.as_str())
        .collect();
    for spelling in ["oa", "òa", "óa", "ỏa", "õa", "ọa"] {
        assert!(doubles.contains(&spelling), "missing {spelling}");
    }
    assert!(!doubles.contains(&"oà"));
}

#[test]
fn untoned_diphthong_is_bare_only() {
    let units = vowel_units(&inv("", "o"), &tables());
    let doubles: Vec<&VowelCandidate> =
        units.iter().filter(|u| u.arity == Arity::Double).collect();
    assert_eq!(doubles.len(), 1);
    assert_eq!(doubles[0].spelling, "oo");
    assert_eq!(doubles[0].tone, None);
}

#[test]
fn open_diphthong_never_takes_final() {
    let t = tables();
    let g = generate(&inv("mn", "ai"), &t);
    let ai: Vec<&VowelCandidate> = g
        .vowels
        .iter()
        .filter(|v| v.arity == Arity::Double && strip_all_tones(&v.spelling) == "ai")
        .collect();
    assert_eq!(ai.len(), 6);
    assert!(ai.iter().all(|v| !v.allows_final_consonant));
    assert!(!g.rhymes.iter().any(|r| r.starts_with("ai")));
    assert!(!g.rhymes.iter().any(|r| r.starts_with("ái")));
}

#[test]
fn front_vowel_finals_are_nh_or_ch() {
    let t = tables();
    let consonants = consonant_units(&inv("nhcmtgp", ""), &t);
    let front: Vec<VowelCandidate> = vowel_units(&inv("", "aêi"), &t)
        .into_iter()
        .filter(|v| t.is_front_vowel(&v.spelling))
        .collect();
    assert_eq!(front.len(), 3);
    let closed = rhymes(&front, &consonants, &t);
    assert!(!closed.is_empty());
    for r in &closed {
        let tail = &r[front
            .iter()
            .find(|v| r.starts_with(v.spelling.as_str()))
            .unwrap()
            .spelling
            .len()..];
        assert!(tail == "nh" || tail == "ch", "{r} has final {tail}");
    }
}

#[test]
fn acute_dot_vowels_take_stop_finals() {
    let got = syllable_set("ptcmn", "o");
    for s in ["óp", "ót", "óc", "ọp", "ọt", "ọc"] {
        assert!(got.contains(s), "missing {s}");
    }
    for s in ["óm", "ón", "ọm"] {
        assert!(!got.contains(s), "unexpected {s}");
    }
}

#[test]
fn other_tones_take_plain_finals() {
    let got = syllable_set("ptcmng", "o");
    for s in ["om", "òn", "ỏng", "õm", "ong"] {
        assert!(got.contains(s), "missing {s}");
    }
    for s in ["op", "òt", "oc", "onh"] {
        assert!(!got.contains(s), "unexpected {s}");
    }
}

#[test]
fn acute_front_vowel_branch_adds_nothing() {
    // The stop-final rule would admit "ch" after a front vowel, but a toned
    // vowel is never an exact front-vowel spelling, so "ách" is not produced.
    let got = syllable_set("cht", "a");
    assert!(got.contains("ach"));
    assert!(got.contains("át"));
    assert!(got.contains("ác"));
    assert!(!got.contains("ách"));
    assert!(!got.contains("ạch"));
}

#[test]
fn q_excluded_before_bare_u() {
    let got = syllable_set("q", "u");
    assert!(!got.contains("qu"));
    assert!(got.contains("qú"));
}

#[test]
fn c_excluded_before_bare_e_circumflex() {
    let got = syllable_set("ct", "ê");
    assert!(!got.contains("cê"));
    assert!(got.contains("tê"));
    assert!(got.contains("cế"));
}

#[test]
fn em_exclusion_never_reached_by_generator() {
    // bare "ê" only takes nh/ch, so "êm" is never assembled
    let got = syllable_set("trm", "ê");
    assert!(!got.contains("êm"));
    assert!(!got.contains("trêm"));
    assert!(got.contains("rê"));

    let t = tables();
    assert!(!t.onset_allowed("tr", "êm", UnitKind::Rhyme));
    assert!(!t.onset_allowed("r", "êm", UnitKind::Rhyme));
    assert!(t.onset_allowed("t", "êm", UnitKind::Rhyme));
}

#[test]
fn vowels_without_onset() {
    let got = syllable_set("bn", "âuiê");
    assert!(got.contains("â"));
    assert!(!got.contains("bâ"));
    assert!(!got.contains("buâ"));
    assert!(!got.contains("biê"));
    // toned forms are not covered by the exclusion
    assert!(got.contains("bấ"));
}

#[test]
fn vowel_exclusions() {
    let got = syllable_set("qmcnh", "âuêi");
    assert!(!got.contains("qâu"));
    assert!(!got.contains("miu"));
    assert!(got.contains("niu"));
    for onset in ["c", "ch", "q", "nh"] {
        assert!(!got.contains(&format!("{onset}êu")), "{onset}êu");
    }
    assert!(got.contains("mêu"));
}

#[test]
fn rhyme_exclusions() {
    let got = syllable_set("nqt", "â");
    assert!(got.contains("ân"));
    assert!(got.contains("tân"));
    assert!(!got.contains("nân"));
    assert!(!got.contains("qân"));

    let got = syllable_set("cnt", "uâ");
    assert!(got.contains("tuân"));
    assert!(!got.contains("cuân"));
    assert!(!got.contains("nuân"));

    let got = syllable_set("mrt", "iê");
    assert!(got.contains("tiêm"));
    assert!(!got.contains("miêm"));
    assert!(!got.contains("riêm"));
    assert!(!got.contains("triêm"));
}

#[test]
fn standalone_nuclei_are_included() {
    let g = generate(&inv("n", "a"), &tables());
    assert!(g.syllables.iter().any(|s| s == "a"));
    assert!(g.syllables.iter().any(|s| s == "ạ"));
}

fn arb_inventory() -> impl Strategy<Value = LetterInventory> {
    let t = tables();
    (
        prop::sample::subsequence(t.consonants().to_vec(), 0..=5),
        prop::sample::subsequence(t.vowels().to_vec(), 0..=4),
    )
        .prop_map(|(c, v)| LetterInventory::new(c, v))
}

proptest! {
    #[test]
    fn generation_is_deterministic(inv in arb_inventory()) {
        let t = tables();
        prop_assert_eq!(generate_syllables(&inv, &t), generate_syllables(&inv, &t));
    }

    #[test]
    fn syllables_use_only_inventory_letters(inv in arb_inventory()) {
        let t = tables();
        for s in generate_syllables(&inv, &t) {
            for c in s.chars() {
                let base = split_tone(c).map_or(c, |(b, _)| b);
                prop_assert!(inv.contains_letter(base), "{} not in inventory ({})", base, s);
            }
        }
    }

    #[test]
    fn every_syllable_has_a_vowel(inv in arb_inventory()) {
        let t = tables();
        for s in generate_syllables(&inv, &t) {
            prop_assert!(strip_all_tones(&s).chars().any(|c| t.is_vowel(c)));
        }
    }
}
