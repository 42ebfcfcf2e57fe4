//! Genre matching and seeded sampling.
//!
//! [`RecommendationSelector::recommend`] turns an emotion label into a small,
//! reproducible sample of tracks:
//!
//! 1. lowercase the label and look up genre keywords (default `["pop"]`)
//! 2. keep rows whose lowercased genre contains any keyword as a substring
//! 3. draw `min(n, matches)` rows without replacement using a fixed seed
//! 4. project each sampled row onto [`PREFERRED_COLUMNS`]
//!
//! The same `(dataset, label, n)` always produces the same tracks in the same
//! order. Placeholder text for missing fields is left to [`crate::display`].

use crate::dataset::Dataset;
use crate::genre::GenreMap;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Default number of tracks returned per request.
pub const DEFAULT_COUNT: usize = 10;

/// Default sampling seed.
pub const DEFAULT_SEED: u64 = 42;

/// Output columns, in output order. Columns missing from the dataset are skipped.
pub const PREFERRED_COLUMNS: &[&str] = &[
    "track_name",
    "track_album_name",
    "track_artist",
    "playlist_genre",
    "youtube_link",
];

/// A sampled row, projected onto the preferred columns the dataset has.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track {
    fields: Vec<(String, String)>,
}

impl Track {
    /// Build a track from column/value pairs.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Value of `column`, if the column was projected. Empty cells count as absent.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// Projected column names, in output order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for Track {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Result of a single recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Recommendation {
    /// Lowercased emotion label that was looked up
    pub emotion: String,
    /// Genre keywords used for matching
    pub genres: Vec<String>,
    /// Sampled tracks in sampled order
    pub tracks: Vec<Track>,
}

impl Recommendation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Maps emotions to tracks. Holds only immutable configuration.
#[derive(Debug, Clone)]
pub struct RecommendationSelector {
    genre_map: GenreMap,
    seed: u64,
}

impl Default for RecommendationSelector {
    fn default() -> Self {
        Self::new(GenreMap::default(), DEFAULT_SEED)
    }
}

impl RecommendationSelector {
    #[must_use]
    pub fn new(genre_map: GenreMap, seed: u64) -> Self {
        Self { genre_map, seed }
    }

    /// Recommend up to `n` tracks for `emotion`.
    ///
    /// Never fails: an unknown label uses the default genres and a label with
    /// no matching rows yields an empty track list alongside the genres used.
    ///
    /// # Examples
    ///
    /// ```
    /// use moodtune::dataset::Dataset;
    /// use moodtune::recommend::RecommendationSelector;
    ///
    /// let dataset = Dataset::from_rows(
    ///     ["Track_Name", "Playlist_Genre"],
    ///     vec![vec!["Glow", "electropop"], vec!["Nocturne", "classical"]],
    /// )?;
    /// let rec = RecommendationSelector::default().recommend(&dataset, "Joy", 10);
    ///
    /// assert_eq!(rec.genres, vec!["pop", "dance", "electronic"]);
    /// assert_eq!(rec.tracks[0].get("track_name"), Some("Glow"));
    /// # Ok::<(), moodtune::error::DatasetError>(())
    /// ```
    ///
    /// # Design Notes
    ///
    /// A fresh RNG is seeded on every call rather than kept in the selector,
    /// so a request's result does not depend on the requests before it.
    #[must_use]
    pub fn recommend(&self, dataset: &Dataset, emotion: &str, n: usize) -> Recommendation {
        let emotion = emotion.trim().to_lowercase();
        if !self.genre_map.contains(&emotion) {
            debug!("No genre mapping for '{emotion}', using default");
        }
        let genres = self.genre_map.genres_for(&emotion);

        let matches = matching_rows(dataset, &genres);
        debug!(
            "{} of {} tracks match genres {genres:?} for '{emotion}'",
            matches.len(),
            dataset.len()
        );

        let sampled = self.sample(&matches, n);
        let projection = projection(dataset);
        let tracks = sampled
            .into_iter()
            .map(|row| {
                trace!("Sampled row {row}: {}", dataset.genre(row));
                Track::from_fields(projection.iter().map(|&(name, idx)| {
                    (name, dataset.value(row, idx).unwrap_or_default())
                }))
            })
            .collect();

        Recommendation {
            emotion,
            genres,
            tracks,
        }
    }

    /// Pick `min(n, rows.len())` distinct rows in seeded random order.
    fn sample(&self, rows: &[usize], n: usize) -> Vec<usize> {
        let amount = n.min(rows.len());
        if amount == 0 {
            return Vec::new();
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        index::sample(&mut rng, rows.len(), amount)
            .into_iter()
            .map(|i| rows[i])
            .collect()
    }
}

/// Row indices whose genre contains any of `genres` (case-insensitive substring).
#[must_use]
pub fn matching_rows(dataset: &Dataset, genres: &[String]) -> Vec<usize> {
    let genres: Vec<String> = genres.iter().map(|g| g.to_lowercase()).collect();
    (0..dataset.len())
        .filter(|&row| genre_matches(dataset.genre(row), &genres))
        .collect()
}

/// Whether a raw genre cell contains any (already lowercased) keyword.
#[must_use]
pub fn genre_matches(genre_cell: &str, keywords: &[String]) -> bool {
    let cell = genre_cell.to_lowercase();
    keywords.iter().any(|k| cell.contains(k.as_str()))
}

fn projection(dataset: &Dataset) -> Vec<(&'static str, usize)> {
    PREFERRED_COLUMNS
        .iter()
        .filter_map(|&name| dataset.column_index(name).map(|idx| (name, idx)))
        .collect()
}
