//! Model-backed verdicts: encode, align to training columns, delegate.

use std::sync::Arc;

use crate::attributes::TaskAttributes;
use crate::error::{ConfigurationError, CoreError, PredictionError};
use crate::features::FeatureVector;
use crate::model::{ModelHandle, TrainedModel};
use crate::presenter::{self, QuoteSource};
use crate::verdict::{EngineKind, Label, Tier, Verdict};

/// Classify with explicitly supplied collaborators.
///
/// Fails with a `ConfigurationError` when either the model or the column
/// order is missing.
pub fn classify(
    attrs: &TaskAttributes,
    columns: Option<&[String]>,
    model: Option<&dyn TrainedModel>,
    quotes: &mut dyn QuoteSource,
) -> Result<Verdict, CoreError> {
    let model = model.ok_or(ConfigurationError::ModelUnavailable)?;
    let columns = columns.ok_or(ConfigurationError::ColumnsUnavailable)?;

    let row = FeatureVector::encode(attrs).reindex(columns);

    let class = model.predict(&row)?;
    let label = Label::from_class(class).ok_or(PredictionError::InvalidLabel(i64::from(class)))?;

    let confidence = match model.predict_probability(&row)? {
        Some(probs) => Some(positive_probability(&probs)?),
        None => None,
    };

    let tier = Tier::from_label(label);
    let suggestion = match label {
        Label::Productive => presenter::suggestion(tier).to_string(),
        Label::Unproductive => presenter::momentum_quote(quotes).to_string(),
    };

    tracing::debug!(?label, ?confidence, columns = row.len(), "model verdict");

    Ok(Verdict {
        label,
        confidence,
        score: None,
        tier,
        suggestion,
        engine: EngineKind::Model,
    })
}

fn positive_probability(probs: &[f64]) -> Result<f64, PredictionError> {
    let p = *probs.get(1).ok_or_else(|| {
        PredictionError::InvalidProbabilities(format!("expected 2 classes, got {}", probs.len()))
    })?;
    if !(0.0..=1.0).contains(&p) {
        return Err(PredictionError::InvalidProbabilities(format!(
            "class-1 probability {} outside [0, 1]",
            p
        )));
    }
    Ok(p)
}

/// Classifier bound to a (possibly absent) loaded model.
#[derive(Debug, Clone, Default)]
pub struct ModelBackedClassifier {
    handle: Option<Arc<ModelHandle>>,
}

impl ModelBackedClassifier {
    pub fn new(handle: Option<Arc<ModelHandle>>) -> Self {
        Self { handle }
    }

    pub fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    pub fn classify(&self, attrs: &TaskAttributes, quotes: &mut dyn QuoteSource) -> Result<Verdict, CoreError> {
        let handle = self.handle.as_deref();
        classify(
            attrs,
            handle.map(|h| h.columns()),
            handle.map(|h| h.model() as &dyn TrainedModel),
            quotes,
        )
    }
}
