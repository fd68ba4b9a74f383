use serde::{Deserialize, Serialize};

use super::error::AdapterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Emotional valence of the review text.
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
        }
    }

    /// Maps a free-form model label onto a polarity under the three-class scheme.
    ///
    /// Accepts the spellings common sentiment heads emit (`POSITIVE`, `pos`, `LABEL_2`,
    /// Korean `긍정`/`부정`/`중립`). Returns `None` for anything unrecognised.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::from_label_with(label, LabelScheme::ThreeClass)
    }

    /// Like [`from_label`](Self::from_label), reading generic `LABEL_n` ids per `scheme`.
    pub fn from_label_with(label: &str, scheme: LabelScheme) -> Option<Self> {
        let label = label.trim().to_lowercase();
        match (scheme, label.as_str()) {
            (_, "label_0") => return Some(Polarity::Negative),
            (LabelScheme::ThreeClass, "label_1") => return Some(Polarity::Neutral),
            (LabelScheme::ThreeClass, "label_2") => return Some(Polarity::Positive),
            (LabelScheme::Binary, "label_1") => return Some(Polarity::Positive),
            (LabelScheme::Binary, "label_2") => return None,
            _ => {}
        }

        if label.contains("neg") || label.contains("부정") {
            Some(Polarity::Negative)
        } else if label.contains("pos") || label.contains("긍정") {
            Some(Polarity::Positive)
        } else if label.contains("neu") || label.contains("중립") {
            Some(Polarity::Neutral)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a sentiment head numbers its generic `LABEL_n` outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelScheme {
    /// `LABEL_0` negative, `LABEL_1` neutral, `LABEL_2` positive.
    #[default]
    ThreeClass,
    /// `LABEL_0` negative, `LABEL_1` positive.
    Binary,
}

impl LabelScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelScheme::ThreeClass => "three_class",
            LabelScheme::Binary => "binary",
        }
    }
}

impl std::str::FromStr for LabelScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "three_class" | "3" => Ok(LabelScheme::ThreeClass),
            "binary" | "2" => Ok(LabelScheme::Binary),
            other => Err(format!("unknown label scheme '{}'", other)),
        }
    }
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<f64, AdapterError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(AdapterError::OutOfRange { field, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Image/product alignment reported by the vision adapter.
pub struct MatchSignal {
    similarity: f64,
}

impl MatchSignal {
    /// Fails unless `similarity` is finite and in `[0, 1]`.
    pub fn new(similarity: f64) -> Result<Self, AdapterError> {
        Ok(Self {
            similarity: check_unit_interval("similarity", similarity)?,
        })
    }

    pub fn similarity(&self) -> f64 {
        self.similarity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Polarity and model confidence reported by the sentiment adapter.
pub struct SentimentSignal {
    polarity: Polarity,
    probability: f64,
}

impl SentimentSignal {
    /// Fails unless `probability` is finite and in `[0, 1]`.
    pub fn new(polarity: Polarity, probability: f64) -> Result<Self, AdapterError> {
        Ok(Self {
            polarity,
            probability: check_unit_interval("probability", probability)?,
        })
    }

    /// Signal for empty or whitespace-only text: neutral with zero probability.
    pub fn empty_text() -> Self {
        Self {
            polarity: Polarity::Neutral,
            probability: 0.0,
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}
