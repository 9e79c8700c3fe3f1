use std::path::Path;

use tracing::{debug, info};

use vtv_core::lexicon::{compose_entry, Lexicon, WordList};

pub fn compile(input: &str, output: &str) {
    let list = die!(WordList::open_text(Path::new(input)), "Error reading {input}: {}");
    debug!(input, entries = list.len(), "text word list loaded");
    die!(list.save(Path::new(output)), "Error writing {output}: {}");
    info!(output, entries = list.len(), "compiled word list written");
    eprintln!("Compiled {} entries into {output}", list.len());
}

pub fn info(file: &str) {
    let list = die!(WordList::open(Path::new(file)), "Error opening {file}: {}");
    println!("entries: {}", list.len());
    println!("words:   {}", list.word_count());
    println!("phrases: {}", list.phrase_count());
}

/// Membership test for an entry typed on the command line.
pub fn has_entry(list: &dyn Lexicon, entry: &str) -> bool {
    let composed = compose_entry(entry);
    debug!(entry = %composed, "lookup");
    list.contains(&composed)
}

pub fn lookup(file: &str, entry: &str) {
    let list = die!(WordList::open(Path::new(file)), "Error opening {file}: {}");
    if has_entry(&list, entry) {
        println!("{entry}: found");
    } else {
        println!("{entry}: not found");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_composes_decomposed_input() {
        let list = WordList::from_lines(["mẹ", "bà ba"]);
        assert!(has_entry(&list, "me\u{323}"));
        assert!(has_entry(&list, " bà ba "));
        assert!(!has_entry(&list, "me"));
    }
}
