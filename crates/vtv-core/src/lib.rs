//! Vietnamese syllable candidate generation and dictionary matching.

pub mod compound;
pub mod lexicon;
pub mod normalize;
pub mod phonetics;
pub mod settings;
pub mod syllable;
pub mod tone;
