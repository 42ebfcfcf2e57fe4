//! Terminal presentation.
//!
//! The only place placeholder text is substituted. [`crate::recommend`] hands
//! over raw fields; this module decides what a missing title or artist looks
//! like and renders the result as text or JSON.

use crate::emotion::EmotionScore;
use crate::genre::GenreMap;
use crate::recommend::{Recommendation, Track};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write as _;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_GENRE: &str = "N/A";
pub const NO_LINK: &str = "No link available";

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to describe your mood.";
pub const NO_EMOTION_MESSAGE: &str =
    "Could not detect a dominant emotion from your input. Try a different prompt.";

const RULE_WIDTH: usize = 65;

/// Output format for recommendation commands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// Display title: `track_name`, then `track_album_name`, then a placeholder.
#[must_use]
pub fn title(track: &Track) -> &str {
    track
        .get("track_name")
        .or_else(|| track.get("track_album_name"))
        .unwrap_or(UNKNOWN_TITLE)
}

#[must_use]
pub fn artist(track: &Track) -> &str {
    track.get("track_artist").unwrap_or(UNKNOWN_ARTIST)
}

#[must_use]
pub fn genre(track: &Track) -> &str {
    track.get("playlist_genre").unwrap_or(UNKNOWN_GENRE)
}

#[must_use]
pub fn dataset_link(track: &Track) -> &str {
    track.get("youtube_link").unwrap_or(NO_LINK)
}

/// YouTube search URL for `title` and `artist`, spaces encoded as `+`.
///
/// Not a deep link: it opens a results page the user picks from.
///
/// # Examples
///
/// ```
/// use moodtune::display::search_link;
///
/// assert_eq!(
///     search_link("One More Time", "Daft Punk"),
///     "https://www.youtube.com/results?search_query=One+More+Time+Daft+Punk"
/// );
/// ```
#[must_use]
pub fn search_link(title: &str, artist: &str) -> String {
    let query = format!("{title} {artist}").replace(' ', "+");
    format!("https://www.youtube.com/results?search_query={query}")
}

/// "soft rock" -> "Soft Rock"
#[must_use]
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Message for a mood with no matching tracks.
#[must_use]
pub fn no_matches_message(rec: &Recommendation) -> String {
    format!(
        "No songs found matching genres for {} ({}).",
        rec.emotion.to_uppercase(),
        rec.genres.join(", ")
    )
}

/// Render a recommendation as a numbered listing.
#[must_use]
pub fn render_text(rec: &Recommendation, score: Option<&EmotionScore>) -> String {
    let mut out = String::new();
    match score {
        Some(s) => {
            let _ = writeln!(out, "Detected Emotion: {} ({:.0}%)", rec.emotion.to_uppercase(), s.score * 100.0);
        }
        None => {
            let _ = writeln!(out, "Emotion: {}", rec.emotion.to_uppercase());
        }
    }

    if rec.is_empty() {
        let _ = writeln!(out, "{}", no_matches_message(rec));
        return out;
    }

    let genres: Vec<String> = rec.genres.iter().map(|g| title_case(g)).collect();
    let _ = writeln!(out, "Target Genres: {}", genres.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "Top {} Recommendations for your mood:", rec.tracks.len());
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for (idx, track) in rec.tracks.iter().enumerate() {
        let (title, artist) = (title(track), artist(track));
        let _ = writeln!(out, "{}. {title}  by {artist}", idx + 1);
        let _ = writeln!(out, "   Genre: {}", genre(track));
        let _ = writeln!(out, "   Link:  {}", dataset_link(track));
        let _ = writeln!(out, "   Play:  {}", search_link(title, artist));
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    out
}

#[derive(Serialize)]
struct JsonTrack<'a> {
    #[serde(flatten)]
    fields: &'a Track,
    search_link: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    emotion: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    genres: &'a [String],
    tracks: Vec<JsonTrack<'a>>,
}

/// Render a recommendation as pretty JSON.
pub fn render_json(rec: &Recommendation, score: Option<&EmotionScore>) -> serde_json::Result<String> {
    let report = JsonReport {
        emotion: &rec.emotion,
        score: score.map(|s| s.score),
        genres: &rec.genres,
        tracks: rec
            .tracks
            .iter()
            .map(|t| JsonTrack {
                fields: t,
                search_link: search_link(title(t), artist(t)),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

/// Render the active genre map, one emotion per line.
#[must_use]
pub fn render_genre_map(map: &GenreMap) -> String {
    let width = map.emotions().map(str::len).max().unwrap_or(0);
    let mut out = String::new();
    for (emotion, genres) in map.iter() {
        let _ = writeln!(out, "{emotion:<width$}  {}", genres.join(", "));
    }
    let _ = writeln!(out, "{:<width$}  pop", "(other)");
    out
}
