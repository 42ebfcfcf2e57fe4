//! Remote emotion classification.
//!
//! The hosted model returns one `{label, score}` record per emotion it knows.
//! Depending on the model the list arrives flat or wrapped once more
//! (`[[...]]`); both are accepted. Anything else, like an error object, an
//! empty list, or a record without a numeric score, means no dominant
//! emotion could be found.
//!
//! Classification never fails loudly. Transport errors, timeouts and bad
//! status codes are logged and reported as `None`; callers show the user a
//! message and move on. There are no retries.

use crate::config::ClassifierConfig;
use crate::error::ConfigError;
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One label of the model's output distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

/// Anything that can reduce text to a dominant emotion.
pub trait Classifier {
    /// Dominant emotion for `text`, or `None` if none could be determined.
    ///
    /// `text` is expected to be non-empty; callers check this first.
    fn classify(&self, text: &str) -> Option<EmotionScore>;
}

/// Client for a hosted text-classification endpoint.
pub struct EmotionClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl EmotionClassifier {
    /// Build a classifier with a blocking HTTP client bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// [`ConfigError::HttpClient`] if the TLS backend cannot be initialised.
    pub fn new(config: ClassifierConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn query(&self, text: &str) -> Result<Value, reqwest::Error> {
        self.client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.token)
            .json(&json!({ "inputs": text }))
            .send()?
            .error_for_status()?
            .json()
    }
}

impl Classifier for EmotionClassifier {
    fn classify(&self, text: &str) -> Option<EmotionScore> {
        let body = match self.query(text) {
            Ok(body) => body,
            Err(e) => {
                warn!("Emotion API request failed: {e}");
                return None;
            }
        };

        let Some(scores) = parse_scores(&body) else {
            warn!("Unexpected emotion API response: {body}");
            return None;
        };

        let best = dominant_emotion(&scores).cloned();
        if let Some(best) = &best {
            debug!("Dominant emotion '{}' ({:.3}) out of {} labels", best.label, best.score, scores.len());
        }
        best
    }
}

/// Interpret a response body as a score list.
///
/// Accepts `[{..}, ..]` and `[[{..}, ..], ..]` (first inner list). Returns
/// `None` for any other shape or if any record lacks a string `label` and a
/// numeric `score`.
///
/// # Examples
///
/// ```
/// use moodtune::emotion::{dominant_emotion, parse_scores};
/// use serde_json::json;
///
/// let body = json!([[{"label": "joy", "score": 0.9}, {"label": "neutral", "score": 0.1}]]);
/// let scores = parse_scores(&body).unwrap();
/// assert_eq!(dominant_emotion(&scores).unwrap().label, "joy");
///
/// assert!(parse_scores(&json!({"error": "loading"})).is_none());
/// ```
#[must_use]
pub fn parse_scores(body: &Value) -> Option<Vec<EmotionScore>> {
    let outer = body.as_array()?;
    let records = match outer.first()? {
        Value::Array(inner) => inner,
        _ => outer,
    };
    if records.is_empty() {
        return None;
    }

    records
        .iter()
        .map(|r| EmotionScore::deserialize(r).ok())
        .collect()
}

/// Highest-scoring entry. Ties keep the first one seen.
#[must_use]
pub fn dominant_emotion(scores: &[EmotionScore]) -> Option<&EmotionScore> {
    scores.iter().fold(None, |best, candidate| match best {
        Some(b) if b.score >= candidate.score => Some(b),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: &str, score: f64) -> EmotionScore {
        EmotionScore {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn test_parse_flat_list() {
        let body = json!([{"label": "joy", "score": 0.9}, {"label": "neutral", "score": 0.1}]);
        let scores = parse_scores(&body).unwrap();
        assert_eq!(scores, vec![score("joy", 0.9), score("neutral", 0.1)]);
    }

    #[test]
    fn test_parse_nested_list() {
        let body = json!([[{"label": "sadness", "score": 0.7}, {"label": "joy", "score": 0.2}]]);
        let scores = parse_scores(&body).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].label, "sadness");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(parse_scores(&json!({"error": "Model is loading"})).is_none());
        assert!(parse_scores(&json!([])).is_none());
        assert!(parse_scores(&json!([[]])).is_none());
        assert!(parse_scores(&json!("joy")).is_none());
        assert!(parse_scores(&json!([{"label": "joy"}])).is_none());
        assert!(parse_scores(&json!([{"label": "joy", "score": "high"}])).is_none());
        assert!(parse_scores(&json!([[[{"label": "joy", "score": 0.5}]]])).is_none());
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let body = json!([{"label": "fear", "score": 0.4, "index": 3}]);
        assert_eq!(parse_scores(&body).unwrap(), vec![score("fear", 0.4)]);
    }

    #[test]
    fn test_dominant_emotion_picks_max() {
        let scores = vec![score("neutral", 0.1), score("joy", 0.9), score("anger", 0.3)];
        assert_eq!(dominant_emotion(&scores).unwrap().label, "joy");
    }

    #[test]
    fn test_dominant_emotion_ties_keep_first() {
        let scores = vec![score("surprise", 0.5), score("fear", 0.5), score("neutral", 0.2)];
        assert_eq!(dominant_emotion(&scores).unwrap().label, "surprise");
    }

    #[test]
    fn test_dominant_emotion_empty() {
        assert!(dominant_emotion(&[]).is_none());
    }

    #[test]
    fn test_unreachable_endpoint_yields_none() {
        // Port 9 (discard) on localhost is closed in test environments.
        let cfg = ClassifierConfig::new("http://127.0.0.1:9/model", Some("token".into()), 1).unwrap();
        let classifier = EmotionClassifier::new(cfg).unwrap();
        assert!(classifier.classify("I feel great").is_none());
    }
}
