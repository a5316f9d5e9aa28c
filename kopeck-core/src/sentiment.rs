//! Friendliness scoring: a keyword base estimate corrected by an emotion-vector offset.

use serde::{Deserialize, Serialize};

use crate::emotion::EmotionVector;

/// Score when the text carries no politeness signal
pub const NEUTRAL_BASE: f64 = 0.5;

const POSITIVE_THRESHOLD: f64 = 0.6;
const NEGATIVE_THRESHOLD: f64 = 0.4;

const POLITE_WORDS: &[&str] = &[
    "спасибо",
    "пожалуйста",
    "благодар",
    "привет",
    "здравствуй",
    "добрый",
    "доброе",
    "будьте добры",
    "подскажи",
    "отлично",
    "супер",
    "молодец",
];

const RUDE_WORDS: &[&str] = &[
    "дурак",
    "идиот",
    "туп",
    "бесит",
    "ненавиж",
    "заткнись",
    "отвали",
    "бесполезн",
    "ужасн",
    "достал",
];

/// Discrete sentiment label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sentiment {
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "negative")]
    Negative,
}

impl Sentiment {
    pub fn from_score(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FriendlinessResult {
    pub friendliness_score: f64,
    pub sentiment: Sentiment,
}

/// Emotion distribution plus derived summary values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionReport {
    pub emotions: EmotionVector,
    pub dominant_emotion: String,
    pub sentiment_score: f64,
}

/// Keyword-derived politeness estimate before any emotion correction
pub fn base_friendliness(text: &str) -> f64 {
    let text = text.to_lowercase();
    let polite = POLITE_WORDS.iter().filter(|w| text.contains(**w)).count() as f64;
    let rude = RUDE_WORDS.iter().filter(|w| text.contains(**w)).count() as f64;
    (NEUTRAL_BASE + 0.1 * polite - 0.15 * rude).clamp(0.0, 1.0)
}

/// Score the friendliness of `text`.
///
/// `emotions` is used when supplied by an external analyzer; otherwise the local
/// keyword heuristic produces one. Either way it is renormalized before weighting.
pub fn score_friendliness(text: &str, emotions: Option<&EmotionVector>) -> FriendlinessResult {
    let base = base_friendliness(text);
    let vector = match emotions {
        Some(v) => v.normalized(),
        None => EmotionVector::from_text(text),
    };

    let score = (base + vector.friendliness_offset()).clamp(0.0, 1.0);
    tracing::debug!(base, score, "friendliness scored");

    FriendlinessResult {
        friendliness_score: score,
        sentiment: Sentiment::from_score(score),
    }
}

/// Emotion distribution with its dominant emotion and a signed sentiment score in (-1, 1).
pub fn analyze_emotions(text: &str, emotions: Option<&EmotionVector>) -> EmotionReport {
    let vector = match emotions {
        Some(v) => v.normalized(),
        None => EmotionVector::from_text(text),
    };

    let positive: f64 = crate::emotion::Emotion::ALL
        .iter()
        .filter(|e| e.is_positive())
        .map(|e| vector.get(*e))
        .sum();
    let negative: f64 = crate::emotion::Emotion::ALL
        .iter()
        .filter(|e| e.is_negative())
        .map(|e| vector.get(*e))
        .sum();

    EmotionReport {
        emotions: vector,
        dominant_emotion: vector.dominant().label().to_string(),
        sentiment_score: (positive - negative) / (positive + negative + 0.1),
    }
}
