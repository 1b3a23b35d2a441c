use crate::models::{NumberPlacement, NumberToken};
use crate::utils::strings;
use rand::Rng;

pub fn apply_casing(words: &mut [String], capitalize_first: bool) {
    for word in words.iter_mut() {
        if capitalize_first {
            strings::capitalize_word(word);
        } else {
            strings::lowercase_word(word);
        }
    }
}

/// Draw a number in `0..=token.max` and place it among the words.
pub fn insert_number(words: &mut Vec<String>, token: &NumberToken, rng: &mut impl Rng) {
    let number = rng.random_range(0..=token.max);
    let slot = match token.placement {
        NumberPlacement::Anywhere => rng.random_range(0..=words.len()),
        NumberPlacement::Trailing => words.len(),
    };
    words.insert(slot, number.to_string());
}
