use crate::error::Result;
use crate::models::GenerationParams;
use super::composer;
use super::sourcing::WordSource;
use tracing::debug;

pub struct PasswordGenerator {
    source: WordSource,
}

impl PasswordGenerator {
    pub fn new(source: WordSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &WordSource {
        &self.source
    }

    pub fn generate(&self, params: &GenerationParams) -> Result<String> {
        let mut rng = rand::rng();
        self.generate_with(params, &mut rng)
    }

    pub fn generate_with(&self, params: &GenerationParams, rng: &mut impl rand::Rng) -> Result<String> {
        let words = self.source.words();
        debug!(
            pool = words.len(),
            word_count = params.word_count,
            unique = params.unique_words,
            numbers = params.numbers.is_some(),
            "composing password"
        );
        composer::compose(&words, params, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generator::sourcing::{LengthBounds, WordOrigin};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    #[test]
    fn missing_asset_surfaces_empty_source() {
        let generator = PasswordGenerator::new(WordSource::new(
            WordOrigin::File(PathBuf::from("/definitely/not/here/words.txt")),
            LengthBounds::default(),
            false,
        ));
        let err = generator.generate(&GenerationParams::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyWordSource));
    }

    #[test]
    fn bounds_that_exclude_everything() {
        let generator = PasswordGenerator::new(WordSource::new(
            WordOrigin::default(),
            LengthBounds { min: 40, max: 50 },
            true,
        ));
        assert!(generator.generate(&GenerationParams::default()).is_err());
    }

    #[test]
    fn builtin_generation_has_requested_words() {
        let generator = PasswordGenerator::new(WordSource::new(
            WordOrigin::default(),
            LengthBounds::default(),
            true,
        ));
        let params = GenerationParams {
            word_count: 4,
            separator: "-".into(),
            ..GenerationParams::default()
        };
        let mut rng = StdRng::seed_from_u64(99);
        let out = generator.generate_with(&params, &mut rng).unwrap();
        assert_eq!(out.split('-').count(), 4);
    }
}
