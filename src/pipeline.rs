//! Text in, tracks out.
//!
//! [`MoodPipeline`] chains the classifier and the selector over a dataset
//! loaded once at startup. Each call to [`MoodPipeline::run`] is independent;
//! nothing is cached between requests apart from the dataset itself.

use crate::config::RecommendConfig;
use crate::dataset::Dataset;
use crate::display::{self, OutputFormat};
use crate::emotion::{Classifier, EmotionScore};
use crate::recommend::{Recommendation, RecommendationSelector};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{BufRead, Write};

/// What a single request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Input was empty or whitespace; nothing was sent to the classifier
    EmptyInput,
    /// The classifier could not produce a dominant emotion
    NoEmotion,
    /// An emotion was found. `recommendation.tracks` may be empty.
    Recommended {
        score: EmotionScore,
        recommendation: Recommendation,
    },
}

/// Load the dataset and build the selector described by `config`.
///
/// # Errors
///
/// Fails if the genre map override or the dataset cannot be loaded. Both are
/// fatal startup errors; nothing is retried.
pub fn open_selector(config: &RecommendConfig) -> Result<(RecommendationSelector, Dataset)> {
    let genre_map = config
        .load_genre_map()
        .context("Failed to load genre map")?;
    let dataset = Dataset::load(&config.dataset_path)
        .with_context(|| format!("Failed to load dataset from {}", config.dataset_path.display()))?;

    info!(
        "Selecting from {} (columns: {}) with seed {}",
        dataset.source().display(),
        dataset.headers().join(", "),
        config.seed
    );

    Ok((RecommendationSelector::new(genre_map, config.seed), dataset))
}

/// Classifier, selector and dataset wired together.
pub struct MoodPipeline<C: Classifier> {
    classifier: C,
    selector: RecommendationSelector,
    dataset: Dataset,
}

impl<C: Classifier> MoodPipeline<C> {
    pub fn new(classifier: C, selector: RecommendationSelector, dataset: Dataset) -> Self {
        Self {
            classifier,
            selector,
            dataset,
        }
    }

    /// Classify `text` and recommend up to `n` tracks for the result.
    pub fn run(&self, text: &str, n: usize) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::EmptyInput;
        }

        let Some(score) = self.classifier.classify(text) else {
            return Outcome::NoEmotion;
        };

        info!("Detected emotion '{}' ({:.3})", score.label, score.score);
        let recommendation = self.selector.recommend(&self.dataset, &score.label, n);
        Outcome::Recommended {
            score,
            recommendation,
        }
    }

    /// Prompt loop: one request per input line until EOF, `quit` or `exit`.
    pub fn interactive<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
        n: usize,
        format: OutputFormat,
    ) -> Result<()> {
        writeln!(output, "What are you feeling today? (type 'quit' to leave)")?;

        loop {
            write!(output, "> ")?;
            output.flush()?;

            // Bytes, not read_line: a terminal in a legacy encoding must not end the session
            let mut buf = Vec::new();
            if input.read_until(b'\n', &mut buf).context("Failed to read input")? == 0 {
                debug!("Input closed, leaving interactive mode");
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if matches!(line.trim(), "quit" | "exit") {
                break;
            }

            let rendered = render_outcome(&self.run(&line, n), format)?;
            writeln!(output, "{rendered}")?;
        }

        Ok(())
    }
}

/// Text or JSON rendering of any outcome.
pub fn render_outcome(outcome: &Outcome, format: OutputFormat) -> Result<String> {
    let rendered = match (outcome, format) {
        (Outcome::EmptyInput, _) => display::EMPTY_INPUT_MESSAGE.to_string(),
        (Outcome::NoEmotion, _) => display::NO_EMOTION_MESSAGE.to_string(),
        (Outcome::Recommended { score, recommendation }, OutputFormat::Text) => {
            display::render_text(recommendation, Some(score))
        }
        (Outcome::Recommended { score, recommendation }, OutputFormat::Json) => {
            display::render_json(recommendation, Some(score)).context("Failed to encode JSON")?
        }
    };
    Ok(rendered)
}
