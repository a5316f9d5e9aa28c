//! Emotion distribution over a fixed emotion set

use serde::{Deserialize, Serialize};

/// The fixed emotion set, in tie-break order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Emotion {
    #[serde(rename = "joy")]
    Joy,
    #[serde(rename = "fear")]
    Fear,
    #[serde(rename = "anger")]
    Anger,
    #[serde(rename = "sadness")]
    Sadness,
    #[serde(rename = "surprise")]
    Surprise,
    #[serde(rename = "neutral")]
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Fear,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Fear => "fear",
            Emotion::Anger => "anger",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    /// Linear contribution of this emotion to the friendliness score
    pub fn friendliness_weight(&self) -> f64 {
        match self {
            Emotion::Joy => 0.4,
            Emotion::Surprise => 0.1,
            Emotion::Neutral => 0.0,
            Emotion::Sadness => -0.2,
            Emotion::Fear => -0.15,
            Emotion::Anger => -0.5,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Emotion::Joy | Emotion::Surprise)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Emotion::Fear | Emotion::Anger | Emotion::Sadness)
    }
}

/// Non-negative weights per emotion.
///
/// Values handed out by [`EmotionVector::normalized`] always sum to 1.0.
/// Missing keys deserialize as 0.0 so partial external maps are accepted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmotionVector {
    pub joy: f64,
    pub fear: f64,
    pub anger: f64,
    pub sadness: f64,
    pub surprise: f64,
    pub neutral: f64,
}

impl EmotionVector {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Fear => self.fear,
            Emotion::Anger => self.anger,
            Emotion::Sadness => self.sadness,
            Emotion::Surprise => self.surprise,
            Emotion::Neutral => self.neutral,
        }
    }

    fn set(&mut self, emotion: Emotion, value: f64) {
        let slot = match emotion {
            Emotion::Joy => &mut self.joy,
            Emotion::Fear => &mut self.fear,
            Emotion::Anger => &mut self.anger,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Surprise => &mut self.surprise,
            Emotion::Neutral => &mut self.neutral,
        };
        *slot = value;
    }

    pub fn sum(&self) -> f64 {
        Emotion::ALL.iter().map(|e| self.get(*e)).sum()
    }

    /// Rescale so the weights sum to 1.0.
    ///
    /// Negative or non-finite entries count as 0.0. A vector with no weight left
    /// becomes fully neutral.
    pub fn normalized(&self) -> Self {
        let mut out = Self::default();
        for e in Emotion::ALL {
            let v = self.get(e);
            out.set(e, if v.is_finite() && v > 0.0 { v } else { 0.0 });
        }

        let total = out.sum();
        if total <= 0.0 {
            return Self {
                neutral: 1.0,
                ..Self::default()
            };
        }

        for e in Emotion::ALL {
            out.set(e, out.get(e) / total);
        }
        out
    }

    /// Highest-weighted emotion; ties go to the earliest in [`Emotion::ALL`].
    pub fn dominant(&self) -> Emotion {
        let mut best = Emotion::Joy;
        for e in Emotion::ALL {
            if self.get(e) > self.get(best) {
                best = e;
            }
        }
        best
    }

    /// Dot product against the per-emotion friendliness weights
    pub fn friendliness_offset(&self) -> f64 {
        Emotion::ALL
            .iter()
            .map(|e| self.get(*e) * e.friendliness_weight())
            .sum()
    }

    /// Keyword-density estimate used when no external distribution is supplied.
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        let hits = |words: &[&str]| words.iter().filter(|w| text.contains(**w)).count() as f64;

        let joy = hits(JOY_WORDS) * 0.15;
        let fear = hits(FEAR_WORDS) * 0.2;
        let anger = hits(ANGER_WORDS) * 0.15;
        let sadness = hits(SADNESS_WORDS) * 0.15;

        Self {
            joy: (joy + 0.2).min(0.9),
            fear: (fear + 0.1).min(0.8),
            anger: (anger + 0.1).min(0.7),
            sadness: (sadness + 0.1).min(0.7),
            surprise: 0.1,
            neutral: (1.0 - joy - fear - anger - sadness - 0.1).max(0.2),
        }
        .normalized()
    }
}

const JOY_WORDS: &[&str] = &[
    "рад", "счастлив", "отлично", "хорошо", "успех", "прибыль", "рост", "выигрыш",
];
const FEAR_WORDS: &[&str] = &["боюсь", "страх", "опасение", "риск", "опасно", "тревога"];
const ANGER_WORDS: &[&str] = &["злой", "злюсь", "разозлился", "недоволен", "плохо"];
const SADNESS_WORDS: &[&str] = &["грустно", "печаль", "потеря", "убыток", "плохо"];
