//! Tone-mark transforms for Vietnamese vowels.
//!
//! Each of the 12 base vowels has exactly one precomposed glyph per tone.
//! Transforms decompose the input, lowercase it, recompose, remap base
//! glyphs through [`TONE_TABLE`], then recompose again. Anything outside
//! the table passes through unchanged.

use unicode_normalization::UnicodeNormalization;

/// One of the five tone diacritics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// huyền
    Grave,
    /// sắc
    Acute,
    /// hỏi
    Hook,
    /// ngã
    Tilde,
    /// nặng
    Dot,
}

impl Tone {
    /// Removal order used by [`strip_all_tones`].
    pub const ALL: [Tone; 5] = [Tone::Grave, Tone::Acute, Tone::Hook, Tone::Tilde, Tone::Dot];

    fn column(self) -> usize {
        match self {
            Tone::Grave => 0,
            Tone::Acute => 1,
            Tone::Hook => 2,
            Tone::Tilde => 3,
            Tone::Dot => 4,
        }
    }

    /// Tones that pair with stop-consonant codas.
    pub fn is_acute_or_dot(self) -> bool {
        matches!(self, Tone::Acute | Tone::Dot)
    }
}

/// Base vowel → precomposed glyph for grave, acute, hook, tilde, dot.
pub static TONE_TABLE: [(char, [char; 5]); 12] = [
    ('a', ['à', 'á', 'ả', 'ã', 'ạ']),
    ('ă', ['ằ', 'ắ', 'ẳ', 'ẵ', 'ặ']),
    ('â', ['ầ', 'ấ', 'ẩ', 'ẫ', 'ậ']),
    ('e', ['è', 'é', 'ẻ', 'ẽ', 'ẹ']),
    ('ê', ['ề', 'ế', 'ể', 'ễ', 'ệ']),
    ('i', ['ì', 'í', 'ỉ', 'ĩ', 'ị']),
    ('o', ['ò', 'ó', 'ỏ', 'õ', 'ọ']),
    ('ô', ['ồ', 'ố', 'ổ', 'ỗ', 'ộ']),
    ('ơ', ['ờ', 'ớ', 'ở', 'ỡ', 'ợ']),
    ('u', ['ù', 'ú', 'ủ', 'ũ', 'ụ']),
    ('ư', ['ừ', 'ứ', 'ử', 'ữ', 'ự']),
    ('y', ['ỳ', 'ý', 'ỷ', 'ỹ', 'ỵ']),
];

fn toned_char(c: char, tone: Tone) -> char {
    TONE_TABLE
        .iter()
        .find(|(base, _)| *base == c)
        .map_or(c, |(_, forms)| forms[tone.column()])
}

fn untoned_char(c: char, tone: Tone) -> char {
    let col = tone.column();
    TONE_TABLE
        .iter()
        .find(|(_, forms)| forms[col] == c)
        .map_or(c, |(base, _)| *base)
}

/// Decompose, case-fold and recompose so that every toned vowel is a
/// single precomposed lowercase glyph before remapping.
fn transform(s: &str, f: impl Fn(char) -> char) -> String {
    let folded: String = s.nfd().flat_map(char::to_lowercase).nfc().collect();
    folded.chars().map(f).nfc().collect()
}

/// Put `tone` on every base vowel in `s`.
///
/// Already-toned vowels are left alone: a glyph carries at most one tone.
pub fn add_tone(s: &str, tone: Tone) -> String {
    transform(s, |c| toned_char(c, tone))
}

/// Remove `tone` from every vowel in `s` that carries it.
pub fn remove_tone(s: &str, tone: Tone) -> String {
    transform(s, |c| untoned_char(c, tone))
}

/// Remove all five tone marks. Shape diacritics (ă, â, ê, ô, ơ, ư) stay.
pub fn strip_all_tones(s: &str) -> String {
    Tone::ALL
        .iter()
        .fold(s.to_string(), |acc, &tone| remove_tone(&acc, tone))
}

/// Split a precomposed glyph into its base vowel and tone, if it has one.
pub fn split_tone(c: char) -> Option<(char, Tone)> {
    TONE_TABLE.iter().find_map(|(base, forms)| {
        Tone::ALL
            .iter()
            .find(|t| forms[t.column()] == c)
            .map(|&t| (*base, t))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_tone_on_bare_vowels() {
        assert_eq!(add_tone("a", Tone::Grave), "à");
        assert_eq!(add_tone("ă", Tone::Acute), "ắ");
        assert_eq!(add_tone("â", Tone::Hook), "ẩ");
        assert_eq!(add_tone("ê", Tone::Tilde), "ễ");
        assert_eq!(add_tone("ư", Tone::Dot), "ự");
        assert_eq!(add_tone("y", Tone::Tilde), "ỹ");
    }

    #[test]
    fn add_tone_passes_through_non_vowels() {
        assert_eq!(add_tone("b", Tone::Acute), "b");
        assert_eq!(add_tone("đ", Tone::Dot), "đ");
        assert_eq!(add_tone("", Tone::Grave), "");
    }

    #[test]
    fn add_tone_lowercases() {
        assert_eq!(add_tone("A", Tone::Acute), "á");
        assert_eq!(add_tone("Ê", Tone::Dot), "ệ");
    }

    #[test]
    fn add_tone_keeps_existing_tone() {
        assert_eq!(add_tone("á", Tone::Grave), "á");
    }

    #[test]
    fn decomposed_input_is_recomposed() {
        // "a" + combining acute
        assert_eq!(remove_tone("a\u{301}", Tone::Acute), "a");
        // "e" + combining circumflex, then grave
        assert_eq!(add_tone("e\u{302}", Tone::Grave), "ề");
    }

    #[test]
    fn remove_tone_only_targets_one_mark() {
        assert_eq!(remove_tone("à", Tone::Grave), "a");
        assert_eq!(remove_tone("à", Tone::Acute), "à");
        assert_eq!(remove_tone("tiếng", Tone::Acute), "tiêng");
    }

    #[test]
    fn strip_all_tones_on_words() {
        assert_eq!(strip_all_tones("tiếng việt"), "tiêng viêt");
        assert_eq!(strip_all_tones("Hà Nội"), "ha nôi");
        assert_eq!(strip_all_tones("đường"), "đương");
        assert_eq!(strip_all_tones("abc"), "abc");
    }

    #[test]
    fn split_tone_reports_base_and_mark() {
        assert_eq!(split_tone('ộ'), Some(('ô', Tone::Dot)));
        assert_eq!(split_tone('ý'), Some(('y', Tone::Acute)));
        assert_eq!(split_tone('ô'), None);
        assert_eq!(split_tone('b'), None);
    }

    #[test]
    fn table_glyphs_are_precomposed() {
        for (base, forms) in &TONE_TABLE {
            assert_eq!(base.to_string().nfc().count(), 1);
            for f in forms {
                assert_eq!(f.to_string().nfc().collect::<String>(), f.to_string());
            }
        }
    }

    fn base_vowel() -> impl Strategy<Value = char> {
        prop::sample::select(TONE_TABLE.iter().map(|(b, _)| *b).collect::<Vec<_>>())
    }

    fn tone() -> impl Strategy<Value = Tone> {
        prop::sample::select(Tone::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn remove_inverts_add(b in base_vowel(), t in tone()) {
            let s = b.to_string();
            prop_assert_eq!(remove_tone(&add_tone(&s, t), t), s);
        }

        #[test]
        fn strip_all_is_idempotent(s in "[a-zA-Zàáảãạăắằẳẵặâấầẩẫậđèéẻẽẹêếềểễệìíỉĩịòóỏõọôốồổỗộơớờởỡợùúủũụưứừửữựỳýỷỹỵ ]{0,24}") {
            let once = strip_all_tones(&s);
            prop_assert_eq!(strip_all_tones(&once), once);
        }

        #[test]
        fn stripped_text_has_no_tone(s in "[aăâeêioôơuưy]{1,8}", t in tone()) {
            let toned = add_tone(&s, t);
            prop_assert!(strip_all_tones(&toned).chars().all(|c| split_tone(c).is_none()));
        }
    }
}
