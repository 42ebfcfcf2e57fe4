//! # Command-Line Interface Module
//!
//! Clap definitions for Moodtune. Every setting is a global flag with an
//! environment-variable fallback so the same binary works from a shell
//! profile or a one-off invocation.
//!
//! ## Commands
//!
//! - `recommend`: classify a mood description and list matching songs
//! - `interactive`: prompt for moods repeatedly against one loaded dataset
//! - `emotion`: skip classification and recommend for a given emotion label
//! - `classify`: print the dominant emotion only
//! - `genres`: show the emotion to genre table in use
//! - `completion`: generate shell completion scripts
//!
//! ## Examples
//!
//! ```bash
//! HF_TOKEN=hf_xxx moodtune recommend "I just got promoted, I'm overjoyed"
//! moodtune emotion sadness -n 5 --format json
//! moodtune --dataset ~/music/tracks.csv interactive
//! ```

use crate::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::display::OutputFormat;
use crate::recommend::{DEFAULT_COUNT, DEFAULT_SEED};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "moodtune")]
#[command(about = "Moodtune: describe how you feel, get songs that fit")]
#[command(version)]
pub struct Args {
    /// Track dataset (CSV with a playlist_genre column)
    ///
    /// Defaults to ./spotify_plus_youtube.csv, then the copy in the
    /// platform data directory.
    #[arg(long, global = true, env = "MOODTUNE_DATASET", value_hint = clap::ValueHint::FilePath)]
    pub dataset: Option<PathBuf>,

    /// JSON file replacing the built-in emotion to genre table
    #[arg(long, global = true, env = "MOODTUNE_GENRE_MAP", value_hint = clap::ValueHint::FilePath)]
    pub genre_map: Option<PathBuf>,

    /// Seed for track sampling; equal seeds give equal picks
    #[arg(long, global = true, env = "MOODTUNE_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Inference API settings
    #[command(flatten)]
    pub api: ApiArgs,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Settings for the hosted emotion model.
#[derive(ClapArgs, Debug, Clone)]
pub struct ApiArgs {
    /// Bearer token for the inference API
    #[arg(long, global = true, env = "HF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Emotion classification endpoint
    #[arg(long, global = true, env = "MOODTUNE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "MOODTUNE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recommend songs for a mood description
    ///
    /// Sends the text to the emotion model, maps the dominant emotion to
    /// genres and samples matching songs from the dataset.
    Recommend {
        /// How you feel, in your own words
        text: String,

        /// Number of songs to recommend
        #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Describe moods one after another
    ///
    /// Loads the dataset once, then reads one mood description per line
    /// from standard input. Type `quit` or press Ctrl-D to leave.
    Interactive {
        /// Number of songs to recommend per mood
        #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Recommend songs for an emotion label directly
    ///
    /// Skips the emotion model; no API token needed. Unknown labels use
    /// the default genre (pop).
    Emotion {
        /// Emotion label, e.g. joy, sadness, anger
        #[arg(value_hint = clap::ValueHint::Other)]
        label: String,

        /// Number of songs to recommend
        #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the dominant emotion of a text
    Classify {
        /// Text to classify
        text: String,
    },

    /// Show the emotion to genre table
    Genres,

    /// Generate shell completions
    ///
    /// Usage: moodtune completion bash > ~/.local/share/bash-completion/completions/moodtune
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_recommend_defaults() {
        let args = Args::try_parse_from(["moodtune", "recommend", "feeling great"]).unwrap();
        assert_eq!(args.seed, DEFAULT_SEED);
        assert_eq!(args.api.api_url, DEFAULT_API_URL);
        assert_eq!(args.api.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(DEFAULT_TIMEOUT_SECS, 10);
        match args.command {
            Command::Recommend { text, count, format } => {
                assert_eq!(text, "feeling great");
                assert_eq!(count, DEFAULT_COUNT);
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "moodtune", "emotion", "sadness", "-n", "3", "--format", "json", "--dataset", "tracks.csv", "--seed", "7",
        ])
        .unwrap();
        assert_eq!(args.dataset, Some(PathBuf::from("tracks.csv")));
        assert_eq!(args.seed, 7);
        match args.command {
            Command::Emotion { label, count, format } => {
                assert_eq!(label, "sadness");
                assert_eq!(count, 3);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_only_documented_commands_exist() {
        assert!(Args::try_parse_from(["moodtune", "complete-emotions"]).is_err());
        let names: Vec<_> = Args::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .filter(|name| name != "help")
            .collect();
        assert_eq!(
            names,
            vec!["recommend", "interactive", "emotion", "classify", "genres", "completion"]
        );
    }

    #[test]
    fn test_recommend_requires_text() {
        assert!(Args::try_parse_from(["moodtune", "recommend"]).is_err());
    }
}
