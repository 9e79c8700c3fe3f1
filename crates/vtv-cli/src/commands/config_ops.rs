use std::fs;

pub fn settings_export() {
    print!("{}", vtv_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        vtv_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: matcher.workers={}, search.min_query_chars={}, search.max_query_chars={}, output.words_per_line={}",
        s.matcher.workers, s.search.min_query_chars, s.search.max_query_chars, s.output.words_per_line
    );
}

pub fn phonetics_export() {
    print!("{}", vtv_core::phonetics::default_toml());
}

pub fn phonetics_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let t = die!(
        vtv_core::phonetics::parse_phonetics_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: {} consonants, {} vowels",
        t.consonants().len(),
        t.vowels().len()
    );
}

/// Install `--settings` / `--phonetics` overrides before anything reads them.
pub fn apply_overrides(settings: Option<&str>, phonetics: Option<&str>) {
    if let Some(file) = settings {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(vtv_core::settings::init_custom(content), "Error in {file}: {}");
    }
    if let Some(file) = phonetics {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(vtv_core::phonetics::init_custom(content), "Error in {file}: {}");
    }
}
