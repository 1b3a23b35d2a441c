use super::formatting;
use crate::error::{Error, Result};
use crate::models::GenerationParams;
use rand::Rng;

/// Draw up to `word_count` words from `words`.
///
/// Sampling works on an owned pool. With `unique` set each drawn word is
/// removed by position so it cannot come up again, and the draw stops
/// early once the pool runs dry.
pub fn draw_words(
    words: &[String],
    word_count: usize,
    unique: bool,
    rng: &mut impl Rng,
) -> Vec<String> {
    let mut pool = words.to_vec();
    let mut picked = Vec::with_capacity(word_count);

    for _ in 0..word_count {
        if pool.is_empty() {
            break;
        }
        let idx = rng.random_range(0..pool.len());
        if unique {
            picked.push(pool.remove(idx));
        } else {
            picked.push(pool[idx].clone());
        }
    }

    picked
}

pub fn compose(
    words: &[String],
    params: &GenerationParams,
    rng: &mut impl Rng,
) -> Result<String> {
    if words.is_empty() {
        return Err(Error::EmptyWordSource);
    }

    let mut parts = draw_words(words, params.word_count, params.unique_words, rng);
    formatting::apply_casing(&mut parts, params.capitalize_first);

    if let Some(token) = &params.numbers {
        formatting::insert_number(&mut parts, token, rng);
    }

    Ok(parts.join(&params.separator))
}
