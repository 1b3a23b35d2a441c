use crate::error::{Error, Result};
use crate::utils::strings;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MIN_WORDS: usize = 2;
pub const MAX_WORDS: usize = 5;

pub const DEFAULT_WORD_COUNT: usize = 3;
pub const DEFAULT_NUMBER_MAX: u32 = 999;

/// separators offered to clients, any other string is still accepted
pub const SUGGESTED_SEPARATORS: [&str; 5] = ["", "-", "_", ".", " "];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberPlacement {
    /// any of the `words + 1` slots, chosen uniformly
    Anywhere,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberToken {
    /// inclusive upper bound, the lower bound is always 0
    pub max: u32,
    pub placement: NumberPlacement,
}

impl Default for NumberToken {
    fn default() -> Self {
        Self {
            max: DEFAULT_NUMBER_MAX,
            placement: NumberPlacement::Anywhere,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// every option chosen by the caller
    #[default]
    Custom,
    /// two words run together with a single trailing digit
    Classic,
}

impl Preset {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "custom" => Some(Preset::Custom),
            "classic" => Some(Preset::Classic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub word_count: usize,
    pub separator: String,
    pub numbers: Option<NumberToken>,
    pub capitalize_first: bool,
    pub unique_words: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            separator: String::new(),
            numbers: None,
            capitalize_first: true,
            unique_words: true,
        }
    }
}

impl GenerationParams {
    pub fn classic() -> Self {
        Self {
            word_count: 2,
            separator: String::new(),
            numbers: Some(NumberToken {
                max: 9,
                placement: NumberPlacement::Trailing,
            }),
            capitalize_first: false,
            unique_words: false,
        }
    }

    pub fn validate(self) -> Result<Self> {
        if !(MIN_WORDS..=MAX_WORDS).contains(&self.word_count) {
            return Err(Error::invalid(
                "wordCount",
                format!(
                    "{} is outside {}..={}",
                    self.word_count, MIN_WORDS, MAX_WORDS
                ),
            ));
        }
        if let Some(token) = &self.numbers {
            if token.max == 0 {
                return Err(Error::invalid("number max", "must be at least 1"));
            }
        }
        Ok(self)
    }

    /// Build parameters from raw form fields.
    ///
    /// Absent fields take the value from `defaults`. A `wordCount` that does
    /// not parse falls back to the default, one that parses but sits outside
    /// `MIN_WORDS..=MAX_WORDS` is clamped. Unrecognised boolean text keeps
    /// the default. Each adjustment is logged at debug level.
    pub fn from_form(form: &GenerateForm, defaults: &GenerationParams) -> Self {
        let mut params = match form.preset.as_deref().map(Preset::parse) {
            Some(Some(Preset::Classic)) => return Self::classic(),
            Some(None) => {
                debug!(preset = ?form.preset, "unknown preset, using custom");
                defaults.clone()
            }
            _ => defaults.clone(),
        };

        if let Some(raw) = form.word_count.as_deref() {
            params.word_count = parse_word_count(raw, defaults.word_count);
        }

        if let Some(sep) = &form.separator {
            if !SUGGESTED_SEPARATORS.contains(&sep.as_str()) {
                debug!(separator = %sep, "accepting non-standard separator");
            }
            params.separator = sep.clone();
        }

        if let Some(add) = flag_field("addNumbers", form.add_numbers.as_deref()) {
            params.numbers = if add {
                Some(defaults.numbers.unwrap_or_default())
            } else {
                None
            };
        }

        if let Some(cap) = flag_field("capitalizeFirst", form.capitalize_first.as_deref()) {
            params.capitalize_first = cap;
        }

        if let Some(unique) = flag_field("uniqueWords", form.unique_words.as_deref()) {
            params.unique_words = unique;
        }

        params
    }
}

fn parse_word_count(raw: &str, fallback: usize) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(n) => {
            let clamped = n.clamp(MIN_WORDS as i64, MAX_WORDS as i64) as usize;
            if clamped as i64 != n {
                let err = Error::invalid("wordCount", format!("{n} clamped to {clamped}"));
                debug!("{}", err);
            }
            clamped
        }
        Err(_) => {
            let err = Error::invalid("wordCount", format!("{raw:?} is not a number"));
            debug!(fallback, "{}", err);
            fallback
        }
    }
}

fn flag_field(name: &'static str, raw: Option<&str>) -> Option<bool> {
    let raw = raw?;
    let parsed = strings::parse_flag(raw);
    if parsed.is_none() {
        let err = Error::invalid(name, format!("{raw:?} is not a boolean"));
        debug!("{}", err);
    }
    parsed
}

/// Raw fields of a generation request, exactly as the browser sends them.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateForm {
    pub action: Option<String>,
    pub preset: Option<String>,
    pub word_count: Option<String>,
    pub separator: Option<String>,
    pub add_numbers: Option<String>,
    pub capitalize_first: Option<String>,
    pub unique_words: Option<String>,
}

impl GenerateForm {
    pub fn wants_generate(&self) -> bool {
        self.action.as_deref() == Some("generate")
    }

    /// Store one named part of a multipart body, ignoring unknown names.
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "action" => &mut self.action,
            "preset" => &mut self.preset,
            "wordCount" => &mut self.word_count,
            "separator" => &mut self.separator,
            "addNumbers" => &mut self.add_numbers,
            "capitalizeFirst" => &mut self.capitalize_first,
            "uniqueWords" => &mut self.unique_words,
            _ => {
                debug!(name, "ignoring unknown form field");
                return;
            }
        };
        *slot = Some(value);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PasswordResponse {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> GenerateForm {
        GenerateForm {
            action: Some("generate".into()),
            ..Default::default()
        }
    }

    #[test]
    fn named_defaults() {
        let p = GenerationParams::default();
        assert_eq!(p.word_count, 3);
        assert_eq!(p.separator, "");
        assert!(p.numbers.is_none());
        assert!(p.capitalize_first);
        assert!(p.unique_words);
    }

    #[test]
    fn absent_fields_take_defaults() {
        let p = GenerationParams::from_form(&form(), &GenerationParams::default());
        assert_eq!(p, GenerationParams::default());
    }

    #[test]
    fn word_count_clamped_or_defaulted() {
        let defaults = GenerationParams::default();

        let mut f = form();
        f.word_count = Some("9".into());
        assert_eq!(GenerationParams::from_form(&f, &defaults).word_count, MAX_WORDS);

        f.word_count = Some("-4".into());
        assert_eq!(GenerationParams::from_form(&f, &defaults).word_count, MIN_WORDS);

        f.word_count = Some("lots".into());
        assert_eq!(GenerationParams::from_form(&f, &defaults).word_count, 3);

        f.word_count = Some(" 4 ".into());
        assert_eq!(GenerationParams::from_form(&f, &defaults).word_count, 4);
    }

    #[test]
    fn flags_and_separator_from_form() {
        let mut f = form();
        f.separator = Some("_".into());
        f.add_numbers = Some("true".into());
        f.capitalize_first = Some("false".into());
        f.unique_words = Some("nonsense".into());

        let p = GenerationParams::from_form(&f, &GenerationParams::default());
        assert_eq!(p.separator, "_");
        assert_eq!(p.numbers, Some(NumberToken::default()));
        assert!(!p.capitalize_first);
        // unrecognised text keeps the default
        assert!(p.unique_words);
    }

    #[test]
    fn classic_preset_ignores_other_fields() {
        let mut f = form();
        f.preset = Some("Classic".into());
        f.word_count = Some("5".into());
        let p = GenerationParams::from_form(&f, &GenerationParams::default());
        assert_eq!(p, GenerationParams::classic());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let mut p = GenerationParams::default();
        p.word_count = 0;
        assert!(matches!(
            p.validate(),
            Err(Error::InvalidParameter { name: "wordCount", .. })
        ));

        let mut p = GenerationParams::default();
        p.numbers = Some(NumberToken {
            max: 0,
            placement: NumberPlacement::Anywhere,
        });
        assert!(p.validate().is_err());

        assert!(GenerationParams::classic().validate().is_ok());
    }

    #[test]
    fn set_field_maps_camel_case_names() {
        let mut f = GenerateForm::default();
        f.set_field("action", "generate".into());
        f.set_field("wordCount", "4".into());
        f.set_field("uniqueWords", "false".into());
        f.set_field("colour", "blue".into());

        assert!(f.wants_generate());
        assert_eq!(f.word_count.as_deref(), Some("4"));
        assert_eq!(f.unique_words.as_deref(), Some("false"));
        assert!(f.separator.is_none());
    }

    #[test]
    fn action_must_be_generate() {
        assert!(form().wants_generate());
        let other = GenerateForm {
            action: Some("history".into()),
            ..Default::default()
        };
        assert!(!other.wants_generate());
        assert!(!GenerateForm::default().wants_generate());
    }
}
