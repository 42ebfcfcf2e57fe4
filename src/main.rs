//! # Moodtune
//!
//! Describe how you feel; Moodtune asks a hosted emotion model what the
//! dominant emotion is, maps it to genres and picks matching songs from a
//! CSV dataset.
//!
//! ## Usage
//!
//! ```bash
//! export HF_TOKEN=hf_xxx
//!
//! # One mood, one list
//! moodtune recommend "I just got promoted, I'm overjoyed"
//!
//! # Keep asking
//! moodtune interactive
//!
//! # No model, just the mapping
//! moodtune emotion sadness -n 5
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use moodtune::cli::{self, ApiArgs, Command};
use moodtune::config::{self, ClassifierConfig, RecommendConfig};
use moodtune::display;
use moodtune::emotion::{Classifier, EmotionClassifier};
use moodtune::pipeline::{self, MoodPipeline};
use moodtune::completion;
use std::io;

/// Validate API settings and build the classifier.
///
/// A missing token is fatal here, before any dataset work happens.
fn build_classifier(api: &ApiArgs) -> Result<EmotionClassifier> {
    let cfg = ClassifierConfig::new(api.api_url.clone(), api.token.clone(), api.timeout)
        .context("Invalid inference API configuration")?;
    debug!("Classifier configuration: {cfg:?}");
    EmotionClassifier::new(cfg).context("Failed to set up emotion classifier")
}

fn recommend_config(args: &cli::Args) -> RecommendConfig {
    RecommendConfig {
        dataset_path: args.dataset.clone().unwrap_or_else(config::default_dataset_path),
        genre_map_path: args.genre_map.clone(),
        seed: args.seed,
    }
}

/// Main entry point for Moodtune.
///
/// Initializes logging, parses arguments and routes commands. Logging is
/// controlled via `RUST_LOG`:
/// - `RUST_LOG=debug moodtune recommend "..."` - Enable debug logging
/// - `RUST_LOG=moodtune::emotion=debug moodtune interactive` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match &args.command {
        Command::Recommend { text, count, format } => {
            if text.trim().is_empty() {
                println!("{}", display::EMPTY_INPUT_MESSAGE);
                return Ok(());
            }
            let classifier = build_classifier(&args.api)?;
            let (selector, dataset) = pipeline::open_selector(&recommend_config(&args))?;
            let pipeline = MoodPipeline::new(classifier, selector, dataset);

            info!("Recommending {count} songs for a {}-character prompt", text.len());
            let outcome = pipeline.run(text, *count);
            println!("{}", pipeline::render_outcome(&outcome, *format)?);
        }
        Command::Interactive { count, format } => {
            let classifier = build_classifier(&args.api)?;
            let (selector, dataset) = pipeline::open_selector(&recommend_config(&args))?;
            let pipeline = MoodPipeline::new(classifier, selector, dataset);

            pipeline.interactive(io::stdin().lock(), io::stdout().lock(), *count, *format)?;
        }
        Command::Emotion { label, count, format } => {
            let (selector, dataset) = pipeline::open_selector(&recommend_config(&args))?;
            let recommendation = selector.recommend(&dataset, label, *count);

            match format {
                display::OutputFormat::Text => print!("{}", display::render_text(&recommendation, None)),
                display::OutputFormat::Json => println!(
                    "{}",
                    display::render_json(&recommendation, None).context("Failed to encode JSON")?
                ),
            }
        }
        Command::Classify { text } => {
            if text.trim().is_empty() {
                println!("{}", display::EMPTY_INPUT_MESSAGE);
                return Ok(());
            }
            let classifier = build_classifier(&args.api)?;
            match classifier.classify(text) {
                Some(score) => println!("{} {:.4}", score.label, score.score),
                None => println!("{}", display::NO_EMOTION_MESSAGE),
            }
        }
        Command::Genres => {
            let map = recommend_config(&args).load_genre_map()?;
            print!("{}", display::render_genre_map(&map));
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        }
    }

    Ok(())
}
