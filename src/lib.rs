//! Mood-based music recommendations.
//!
//! Core modules:
//! - [`emotion`] - Remote emotion classification
//! - [`genre`] - Emotion to genre keyword table
//! - [`dataset`] - CSV track dataset
//! - [`recommend`] - Genre matching and seeded sampling
//! - [`pipeline`] - Text to recommendation orchestration
//!
//! ### Supporting Modules
//!
//! - [`config`] - Startup configuration and data directory lookup
//! - [`error`] - Typed startup errors
//! - [`display`] - Text/JSON rendering and placeholder substitution
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use moodtune::config::{ClassifierConfig, RecommendConfig, DEFAULT_API_URL};
//! use moodtune::emotion::EmotionClassifier;
//! use moodtune::pipeline::{self, MoodPipeline, Outcome};
//!
//! let classifier = EmotionClassifier::new(ClassifierConfig::new(
//!     DEFAULT_API_URL,
//!     std::env::var("HF_TOKEN").ok(),
//!     10,
//! )?)?;
//! let (selector, dataset) = pipeline::open_selector(&RecommendConfig::default())?;
//! let pipeline = MoodPipeline::new(classifier, selector, dataset);
//!
//! if let Outcome::Recommended { recommendation, .. } = pipeline.run("I'm overjoyed", 10) {
//!     println!("{} songs for {}", recommendation.tracks.len(), recommendation.emotion);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Selection Details
//!
//! - Labels are lowercased, then looked up; unknown labels use `["pop"]`
//! - A track matches when its genre contains any keyword as a substring,
//!   so `electropop` matches `pop`
//! - Up to `n` matches are drawn without replacement from a seeded RNG;
//!   the same inputs always give the same songs in the same order
//!
//! ## Error Handling
//!
//! Startup problems (missing token, missing dataset or genre column) are
//! errors and stop the program. Per-request problems are not: a failed
//! classification is `None`, and a mood with no matching songs is an empty
//! recommendation.

pub mod cli;
pub mod completion;
pub mod config;
pub mod dataset;
pub mod display;
pub mod emotion;
pub mod error;
pub mod genre;
pub mod pipeline;
pub mod recommend;
