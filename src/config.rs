//! # Configuration Module
//!
//! Startup configuration for Moodtune. All settings come from command-line
//! flags with environment-variable fallbacks (see [`crate::cli`]) and are
//! validated here once, then handed to the constructors that need them.
//! Nothing below the CLI reads the process environment.
//!
//! ## Dataset Location
//!
//! When no dataset path is given, Moodtune looks for `spotify_plus_youtube.csv`
//! in the working directory first, then in the platform data directory
//! (nothing is created if neither exists):
//! - Linux: `~/.local/share/moodtune/`
//! - macOS: `~/Library/Application Support/moodtune/`
//! - Windows: `%APPDATA%\moodtune\`

use crate::error::ConfigError;
use crate::genre::GenreMap;
use crate::recommend::DEFAULT_SEED;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Hosted emotion model queried when no other endpoint is configured.
pub const DEFAULT_API_URL: &str =
    "https://router.huggingface.co/hf-inference/models/cointegrated/rubert-tiny2-cedr-emotion-detection";

/// Request timeout for the inference call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// File name of the bundled track dataset.
pub const DATASET_FILE_NAME: &str = "spotify_plus_youtube.csv";

/// Where to look for the dataset when none is configured.
///
/// Prefers `./spotify_plus_youtube.csv`, then the copy under the platform
/// data directory. Falls back to the bare file name so the eventual "not
/// found" error names something meaningful.
///
/// # Examples
///
/// ```no_run
/// use moodtune::config::{default_dataset_path, DATASET_FILE_NAME};
///
/// let path = default_dataset_path();
/// assert_eq!(path.file_name().unwrap(), DATASET_FILE_NAME);
/// ```
///
/// # Design Notes
///
/// This is a lookup only. Nothing is created on disk, so running a command
/// with a bad configuration leaves no `moodtune` directory behind.
#[must_use]
pub fn default_dataset_path() -> PathBuf {
    locate_dataset(dirs::data_dir().as_deref())
}

/// [`default_dataset_path`] against an explicit data root.
#[must_use]
pub fn locate_dataset(data_root: Option<&Path>) -> PathBuf {
    let local = PathBuf::from(DATASET_FILE_NAME);
    if local.is_file() {
        return local;
    }

    match data_root.map(|root| root.join("moodtune").join(DATASET_FILE_NAME)) {
        Some(candidate) if candidate.is_file() => candidate,
        _ => {
            debug!("No {DATASET_FILE_NAME} in the working or data directory");
            local
        }
    }
}

/// Settings for the remote emotion classifier.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub timeout: Duration,
}

impl fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClassifierConfig {
    /// Validate classifier settings.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingToken`] if `token` is absent or blank
    /// - [`ConfigError::InvalidTimeout`] if `timeout_secs` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use moodtune::config::{ClassifierConfig, DEFAULT_API_URL};
    /// use moodtune::error::ConfigError;
    ///
    /// let cfg = ClassifierConfig::new(DEFAULT_API_URL, Some("hf_abc".into()), 10)?;
    /// assert_eq!(cfg.timeout.as_secs(), 10);
    ///
    /// let missing = ClassifierConfig::new(DEFAULT_API_URL, None, 10);
    /// assert!(matches!(missing, Err(ConfigError::MissingToken)));
    /// # Ok::<(), ConfigError>(())
    /// ```
    pub fn new(
        api_url: impl Into<String>,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(timeout_secs));
        }

        Ok(Self {
            api_url: api_url.into(),
            token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Settings for dataset loading and track selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    pub dataset_path: PathBuf,
    pub genre_map_path: Option<PathBuf>,
    pub seed: u64,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            genre_map_path: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl RecommendConfig {
    /// Create configuration with explicit dataset path
    pub fn with_dataset_path(dataset_path: PathBuf) -> Self {
        Self {
            dataset_path,
            genre_map_path: None,
            seed: DEFAULT_SEED,
        }
    }

    /// The genre map to use: the override file if configured, else the built-in table.
    ///
    /// # Errors
    ///
    /// Propagates [`GenreMap::from_json_file`] failures for a configured override.
    pub fn load_genre_map(&self) -> Result<GenreMap, ConfigError> {
        match &self.genre_map_path {
            Some(path) => GenreMap::from_json_file(path),
            None => Ok(GenreMap::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_rejected() {
        let err = ClassifierConfig::new(DEFAULT_API_URL, None, 10).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));

        let err = ClassifierConfig::new(DEFAULT_API_URL, Some("   ".into()), 10).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = ClassifierConfig::new(DEFAULT_API_URL, Some("hf_abc".into()), 0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(0)));
    }

    #[test]
    fn test_classifier_config_valid() {
        let cfg = ClassifierConfig::new("http://localhost:1/model", Some(" hf_abc ".into()), 3).unwrap();
        assert_eq!(cfg.token, "hf_abc");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_token_not_in_debug_or_json() {
        let cfg = ClassifierConfig::new(DEFAULT_API_URL, Some("hf_secret".into()), 10).unwrap();
        assert!(!format!("{cfg:?}").contains("hf_secret"));
        assert!(!serde_json::to_string(&cfg).unwrap().contains("hf_secret"));
    }

    #[test]
    fn test_default_dataset_path_names_dataset_file() {
        let path = default_dataset_path();
        assert_eq!(path.file_name().unwrap(), DATASET_FILE_NAME);
    }

    #[test]
    fn test_locate_dataset_in_data_dir() {
        let root = tempfile::TempDir::new().unwrap();
        let dir = root.path().join("moodtune");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join(DATASET_FILE_NAME), "playlist_genre\npop\n").unwrap();

        // Only meaningful when the working directory has no copy of its own
        if !Path::new(DATASET_FILE_NAME).is_file() {
            assert_eq!(locate_dataset(Some(root.path())), dir.join(DATASET_FILE_NAME));
        }
    }

    #[test]
    fn test_locate_dataset_creates_nothing() {
        let root = tempfile::TempDir::new().unwrap();
        let path = locate_dataset(Some(root.path()));

        assert_eq!(path.file_name().unwrap(), DATASET_FILE_NAME);
        assert!(!root.path().join("moodtune").exists());
        assert_eq!(locate_dataset(None).file_name().unwrap(), DATASET_FILE_NAME);
    }

    #[test]
    fn test_recommend_config_builtin_genre_map() {
        let cfg = RecommendConfig::with_dataset_path(PathBuf::from("/tmp/tracks.csv"));
        assert_eq!(cfg.seed, DEFAULT_SEED);
        assert_eq!(cfg.load_genre_map().unwrap(), GenreMap::default());
    }
}
