use crate::error::Error;
use crate::generator::sourcing::{LengthBounds, WordOrigin, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN};
use crate::models::{GenerationParams, NumberToken, DEFAULT_NUMBER_MAX, DEFAULT_WORD_COUNT};
use anyhow::Result;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WordlistConfig {
    /// file to read words from, the embedded list is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
    pub min_length: usize,
    pub max_length: usize,
    /// parse the list once and keep it for the life of the process
    pub cache: bool,
}

impl WordlistConfig {
    pub fn origin(&self) -> WordOrigin {
        match &self.path {
            Some(path) => WordOrigin::File(path.clone()),
            None => WordOrigin::default(),
        }
    }

    pub fn bounds(&self) -> LengthBounds {
        LengthBounds {
            min: self.min_length,
            max: self.max_length,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorDefaults {
    pub word_count: usize,
    pub separator: String,
    pub add_numbers: bool,
    pub number_max: u32,
    pub capitalize_first: bool,
    pub unique_words: bool,
}

impl GeneratorDefaults {
    pub fn params(&self) -> Result<GenerationParams, Error> {
        GenerationParams {
            word_count: self.word_count,
            separator: self.separator.clone(),
            numbers: self.add_numbers.then_some(NumberToken {
                max: self.number_max,
                ..NumberToken::default()
            }),
            capitalize_first: self.capitalize_first,
            unique_words: self.unique_words,
        }
        .validate()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub wordlist: WordlistConfig,
    pub generator: GeneratorDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:8080".to_string(),
            },
            wordlist: WordlistConfig {
                path: None,
                min_length: DEFAULT_MIN_LEN,
                max_length: DEFAULT_MAX_LEN,
                cache: true,
            },
            generator: GeneratorDefaults {
                word_count: DEFAULT_WORD_COUNT,
                separator: params.separator,
                add_numbers: params.numbers.is_some(),
                number_max: DEFAULT_NUMBER_MAX,
                capitalize_first: params.capitalize_first,
                unique_words: params.unique_words,
            },
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "wordpass").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Defaults, then `config.toml` from the platform config dir (or
    /// `explicit` when given), then `WORDPASS__SECTION__KEY` variables.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        let defaults = AppConfig::default();

        let mut builder = Config::builder()
            .set_default("server.bind", defaults.server.bind)?
            .set_default("wordlist.min_length", defaults.wordlist.min_length as u64)?
            .set_default("wordlist.max_length", defaults.wordlist.max_length as u64)?
            .set_default("wordlist.cache", defaults.wordlist.cache)?
            .set_default("generator.word_count", defaults.generator.word_count as u64)?
            .set_default("generator.separator", defaults.generator.separator)?
            .set_default("generator.add_numbers", defaults.generator.add_numbers)?
            .set_default("generator.number_max", defaults.generator.number_max as u64)?
            .set_default("generator.capitalize_first", defaults.generator.capitalize_first)?
            .set_default("generator.unique_words", defaults.generator.unique_words)?;

        match explicit {
            Some(path) => {
                builder = builder.add_source(File::from(path));
            }
            None => {
                if let Some(path) = Self::config_path() {
                    if path.exists() {
                        builder = builder.add_source(File::from(path));
                    }
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("WORDPASS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let app_config: AppConfig = cfg.try_deserialize()?;

        if app_config.wordlist.min_length > app_config.wordlist.max_length {
            return Err(Error::invalid(
                "wordlist bounds",
                format!(
                    "min_length {} exceeds max_length {}",
                    app_config.wordlist.min_length, app_config.wordlist.max_length
                ),
            )
            .into());
        }
        app_config.generator.params()?;

        Ok(app_config)
    }
}
