//! Pluggable verdict engines and the strategy that picks between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attributes::TaskAttributes;
use crate::classifier::ModelBackedClassifier;
use crate::error::{CoreError, Result};
use crate::heuristic::HeuristicScorer;
use crate::presenter::{self, QuoteSource};
use crate::verdict::{EngineKind, Tier, Verdict};

pub trait VerdictEngine {
    fn kind(&self) -> EngineKind;
    fn evaluate(&self, attrs: &TaskAttributes, quotes: &mut dyn QuoteSource) -> Result<Verdict>;
}

impl VerdictEngine for HeuristicScorer {
    fn kind(&self) -> EngineKind {
        EngineKind::Heuristic
    }

    fn evaluate(&self, attrs: &TaskAttributes, _quotes: &mut dyn QuoteSource) -> Result<Verdict> {
        let score = self.score(attrs);
        let tier = Tier::from_score(score);
        Ok(Verdict {
            label: tier.label(),
            confidence: Some(f64::from(score) / 100.0),
            score: Some(score),
            tier,
            suggestion: presenter::suggestion(tier).to_string(),
            engine: EngineKind::Heuristic,
        })
    }
}

impl VerdictEngine for ModelBackedClassifier {
    fn kind(&self) -> EngineKind {
        EngineKind::Model
    }

    fn evaluate(&self, attrs: &TaskAttributes, quotes: &mut dyn QuoteSource) -> Result<Verdict> {
        self.classify(attrs, quotes)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Heuristic,
    Model,
    /// Model when available, heuristic otherwise.
    #[default]
    Auto,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" => Ok(Strategy::Heuristic),
            "model" => Ok(Strategy::Model),
            "auto" => Ok(Strategy::Auto),
            other => Err(format!("unknown engine '{}' (expected heuristic, model or auto)", other)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Heuristic => "heuristic",
            Strategy::Model => "model",
            Strategy::Auto => "auto",
        })
    }
}

/// Both engines plus the rule for choosing one per request.
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    strategy: Strategy,
    heuristic: HeuristicScorer,
    classifier: ModelBackedClassifier,
}

impl Predictor {
    pub fn new(strategy: Strategy, heuristic: HeuristicScorer, classifier: ModelBackedClassifier) -> Self {
        Self { strategy, heuristic, classifier }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn heuristic(&self) -> &HeuristicScorer {
        &self.heuristic
    }

    pub fn predict(&self, attrs: &TaskAttributes, quotes: &mut dyn QuoteSource) -> Result<Verdict> {
        match self.strategy {
            Strategy::Heuristic => self.heuristic.evaluate(attrs, quotes),
            Strategy::Model => self.classifier.evaluate(attrs, quotes),
            Strategy::Auto => match self.classifier.evaluate(attrs, quotes) {
                Err(CoreError::Configuration(e)) => {
                    tracing::warn!(error = %e, "model unavailable, falling back to heuristic");
                    self.heuristic.evaluate(attrs, quotes)
                }
                other => other,
            },
        }
    }
}
