//! Emotion to genre keyword mapping.
//!
//! The map is fixed once the process starts. Lookups lowercase the label and
//! fall back to [`DEFAULT_GENRES`] for anything the map does not know, so a
//! lookup never fails.

use crate::error::ConfigError;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Keywords used for emotions the map has no entry for.
pub const DEFAULT_GENRES: &[&str] = &["pop"];

lazy_static::lazy_static! {
    /// Built-in emotion table, shared by every [`GenreMap::default`].
    static ref BUILTIN: BTreeMap<String, Vec<String>> = {
        let table: &[(&str, &[&str])] = &[
            ("joy", &["pop", "dance", "electronic"]),
            ("happiness", &["pop", "dance", "electronic"]),
            ("sadness", &["acoustic", "soft rock", "ballad"]),
            ("anger", &["rock", "metal", "rap"]),
            ("fear", &["dark ambient", "classical", "lofi"]),
            ("surprise", &["indie", "experimental", "jazz"]),
            ("disgust", &["punk", "grunge"]),
            ("love", &["r&b", "soul", "romantic pop"]),
            ("neutral", &["chill", "instrumental", "lofi"]),
        ];
        table
            .iter()
            .map(|(emotion, genres)| {
                (emotion.to_string(), genres.iter().map(|g| g.to_string()).collect())
            })
            .collect()
    };
}

/// Read-only mapping from emotion labels to ordered genre keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl Default for GenreMap {
    fn default() -> Self {
        Self {
            entries: BUILTIN.clone(),
        }
    }
}

impl GenreMap {
    /// Build a map from explicit entries. Labels and keywords are lowercased.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(emotion, genres)| {
                let genres = genres
                    .into_iter()
                    .map(|g| g.as_ref().trim().to_lowercase())
                    .filter(|g| !g.is_empty())
                    .collect();
                (emotion.as_ref().trim().to_lowercase(), genres)
            })
            .collect();
        Self { entries }
    }

    /// Load a JSON override of the form `{"joy": ["pop", "dance"], ...}`.
    ///
    /// The file replaces the built-in table entirely. Labels and keywords are
    /// lowercased like [`GenreMap::from_entries`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::GenreMapIo`] if the file cannot be read
    /// - [`ConfigError::GenreMapFormat`] if it is not a JSON object of string lists
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::GenreMapIo {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: BTreeMap<String, Vec<String>> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::GenreMapFormat {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded genre map with {} emotions from {}", parsed.len(), path.display());
        Ok(Self::from_entries(parsed))
    }

    /// Genre keywords for `emotion`, or [`DEFAULT_GENRES`] if unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use moodtune::genre::GenreMap;
    ///
    /// let map = GenreMap::default();
    /// assert_eq!(map.genres_for("Anger"), vec!["rock", "metal", "rap"]);
    /// assert_eq!(map.genres_for("bewilderment"), vec!["pop"]);
    /// ```
    #[must_use]
    pub fn genres_for(&self, emotion: &str) -> Vec<String> {
        self.entries
            .get(&emotion.trim().to_lowercase())
            .cloned()
            .unwrap_or_else(|| DEFAULT_GENRES.iter().map(|g| g.to_string()).collect())
    }

    /// Whether `emotion` has its own entry.
    #[must_use]
    pub fn contains(&self, emotion: &str) -> bool {
        self.entries.contains_key(&emotion.trim().to_lowercase())
    }

    /// Known emotions in sorted order.
    pub fn emotions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries in sorted emotion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

}
