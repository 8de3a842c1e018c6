//! Sentiment analysis
//!
//! Wraps the VADER lexicon analyzer (via the `vader_sentiment` crate) behind
//! a small typed surface: polarity scores plus a three-way label derived
//! from the compound score with fixed thresholds.
//!
//! The analyzer loads its lexicon once per process; it is held in an
//! application-scoped singleton initialized on first use.

pub mod service;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound score at or above which text is labeled positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound score at or below which text is labeled negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

static ANALYZER: Lazy<SentimentIntensityAnalyzer> = Lazy::new(SentimentIntensityAnalyzer::new);

/// Sentiment label derived from the compound polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl Default for SentimentLabel {
    fn default() -> Self {
        Self::Neutral
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Negative => write!(f, "negative"),
            SentimentLabel::Neutral => write!(f, "neutral"),
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            _ => Err(anyhow::anyhow!("Invalid sentiment label: {}", s)),
        }
    }
}

/// Polarity scores for a piece of text.
///
/// `positive`, `negative` and `neutral` are fractions in [0, 1];
/// `compound` is the normalized aggregate polarity in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
}

/// Derive a sentiment label from a compound score.
///
/// Both boundary values are inclusive of their non-neutral class:
/// `compound >= 0.05` is positive and `compound <= -0.05` is negative.
pub fn classify(compound: f64) -> SentimentLabel {
    if compound >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Score a piece of text with the VADER analyzer.
pub fn score(text: &str) -> PolarityScores {
    let scores = ANALYZER.polarity_scores(text);
    PolarityScores {
        positive: scores.get("pos").copied().unwrap_or(0.0),
        negative: scores.get("neg").copied().unwrap_or(0.0),
        neutral: scores.get("neu").copied().unwrap_or(0.0),
        compound: scores.get("compound").copied().unwrap_or(0.0),
    }
}

/// Score a piece of text and classify it in one step.
pub fn analyze(text: &str) -> (SentimentLabel, PolarityScores) {
    let scores = score(text);
    (classify(scores.compound), scores)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// The classification is a total, three-way partition of the
        /// compound range with inclusive boundaries.
        #[test]
        fn classify_partitions_compound_range(compound in -1.0f64..=1.0) {
            let label = classify(compound);
            if compound >= POSITIVE_THRESHOLD {
                prop_assert_eq!(label, SentimentLabel::Positive);
            } else if compound <= NEGATIVE_THRESHOLD {
                prop_assert_eq!(label, SentimentLabel::Negative);
            } else {
                prop_assert_eq!(label, SentimentLabel::Neutral);
            }
        }

        /// Scores stay within their documented ranges for arbitrary text.
        #[test]
        fn score_ranges_hold(text in "[ -~]{0,80}") {
            let scores = score(&text);
            prop_assert!((0.0..=1.0).contains(&scores.positive));
            prop_assert!((0.0..=1.0).contains(&scores.negative));
            prop_assert!((0.0..=1.0).contains(&scores.neutral));
            prop_assert!((-1.0..=1.0).contains(&scores.compound));
        }
    }
}
