//! Name Generation
//!
//! Pronounceable agent names built from a fixed syllable table.

use rand::Rng;

const SYLLABLES: &[&str] = &[
    "ka", "lo", "mi", "re", "su", "ta", "ven", "dor", "el", "sha", "nu", "pi", "ro", "thi",
    "ga", "bel", "zu", "an", "wen", "kor", "li", "ma", "ost", "fa", "ye", "dri", "sol", "ul",
    "ne", "var", "ith", "cae",
];

/// Build a capitalised name from `syllables` random syllables (at least one).
pub fn generate_name<R: Rng + ?Sized>(rng: &mut R, syllables: usize) -> String {
    let mut name = String::new();
    for _ in 0..syllables.max(1) {
        name.push_str(SYLLABLES[rng.gen_range(0..SYLLABLES.len())]);
    }
    capitalise(&name)
}

/// Build a name of one to three syllables.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let syllables = rng.gen_range(1..=3);
    generate_name(rng, syllables)
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
