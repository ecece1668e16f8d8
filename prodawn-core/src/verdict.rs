//! Verdict returned to the presentation layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Productive,
    Unproductive,
}

impl Label {
    /// Map a binary classifier output (1 = productive).
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            1 => Some(Label::Productive),
            0 => Some(Label::Unproductive),
            _ => None,
        }
    }
}

/// Human-readable bucket the presenter keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    HighlyProductive,
    ModeratelyProductive,
    NeedsNudge,
    /// Model-backed label 1.
    Productive,
    /// Model-backed label 0.
    Unproductive,
}

impl Tier {
    pub const HIGH_THRESHOLD: u8 = 80;
    pub const MODERATE_THRESHOLD: u8 = 50;

    /// Half-open buckets: [80, 100], [50, 80), [0, 50).
    pub fn from_score(score: u8) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Tier::HighlyProductive
        } else if score >= Self::MODERATE_THRESHOLD {
            Tier::ModeratelyProductive
        } else {
            Tier::NeedsNudge
        }
    }

    pub fn from_label(label: Label) -> Self {
        match label {
            Label::Productive => Tier::Productive,
            Label::Unproductive => Tier::Unproductive,
        }
    }

    pub fn label(&self) -> Label {
        match self {
            Tier::HighlyProductive | Tier::ModeratelyProductive | Tier::Productive => Label::Productive,
            Tier::NeedsNudge | Tier::Unproductive => Label::Unproductive,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tier::HighlyProductive => "highly productive",
            Tier::ModeratelyProductive => "moderately productive",
            Tier::NeedsNudge => "needs a nudge",
            Tier::Productive => "productive",
            Tier::Unproductive => "unproductive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    Heuristic,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    /// Probability of the productive class in [0, 1], when known.
    pub confidence: Option<f64>,
    /// Heuristic score in [0, 100]; absent on the model path.
    pub score: Option<u8>,
    pub tier: Tier,
    pub suggestion: String,
    pub engine: EngineKind,
}

impl Verdict {
    /// Confidence rendered as a whole percentage.
    pub fn confidence_percent(&self) -> Option<u8> {
        self.confidence
            .map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}
