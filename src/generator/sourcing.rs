use crate::error::{Error, Result};
use crate::utils::strings;
use rust_embed::RustEmbed;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(RustEmbed)]
#[folder = "resources/"]
struct Asset;

pub const BUILTIN_WORDLIST: &str = "wordlists/default.txt";

pub const DEFAULT_MIN_LEN: usize = 3;
pub const DEFAULT_MAX_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordOrigin {
    File(PathBuf),
    /// a list compiled into the binary under `resources/`
    Builtin(String),
}

impl Default for WordOrigin {
    fn default() -> Self {
        WordOrigin::Builtin(BUILTIN_WORDLIST.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_LEN,
            max: DEFAULT_MAX_LEN,
        }
    }
}

pub fn read_asset(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "wordlist read failed");
        Error::AssetMissing(path.to_path_buf())
    })
}

/// Every quoted token of the asset at `path`, in order.
///
/// A missing or unreadable asset gives an empty list; callers treat an
/// empty list as the word source being unavailable.
pub fn load(path: &Path) -> Vec<String> {
    match read_asset(path) {
        Ok(content) => strings::extract_quoted(&content),
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

fn load_builtin(name: &str) -> Vec<String> {
    let Some(file) = Asset::get(name) else {
        warn!(name, "embedded wordlist not found");
        return Vec::new();
    };
    match std::str::from_utf8(file.data.as_ref()) {
        Ok(content) => strings::extract_quoted(content),
        Err(e) => {
            warn!(name, error = %e, "embedded wordlist is not utf-8");
            Vec::new()
        }
    }
}

/// Keep words whose lowercased length lies in `min..=max`.
/// Original casing, order and duplicates are preserved.
pub fn filter(words: &[String], min: usize, max: usize) -> Vec<String> {
    words
        .iter()
        .filter(|w| (min..=max).contains(&strings::visible_len(w)))
        .cloned()
        .collect()
}

/// Loads and length-filters the candidate pool, optionally caching it for
/// the life of the process.
pub struct WordSource {
    origin: WordOrigin,
    bounds: LengthBounds,
    cache: Option<OnceLock<Vec<String>>>,
}

impl WordSource {
    pub fn new(origin: WordOrigin, bounds: LengthBounds, cached: bool) -> Self {
        Self {
            origin,
            bounds,
            cache: cached.then(OnceLock::new),
        }
    }

    pub fn origin(&self) -> &WordOrigin {
        &self.origin
    }

    fn load_filtered(&self) -> Vec<String> {
        let raw = match &self.origin {
            WordOrigin::File(path) => load(path),
            WordOrigin::Builtin(name) => load_builtin(name),
        };
        let filtered = filter(&raw, self.bounds.min, self.bounds.max);
        debug!(
            loaded = raw.len(),
            kept = filtered.len(),
            min = self.bounds.min,
            max = self.bounds.max,
            "wordlist filtered"
        );
        filtered
    }

    /// An owned copy of the filtered list; callers may mutate it freely.
    pub fn words(&self) -> Vec<String> {
        match &self.cache {
            Some(cell) => cell.get_or_init(|| self.load_filtered()).clone(),
            None => self.load_filtered(),
        }
    }
}
