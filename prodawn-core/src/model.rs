//! Trained-model collaborator, artifact loading and the process-wide cache.
//!
//! The classifier only sees `dyn TrainedModel`. The bundled `LogisticModel`
//! reads a JSON export of a binary logistic regression; anything else can be
//! plugged in by implementing the trait.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, PredictionError};
use crate::features::FeatureRow;

pub trait TrainedModel {
    /// Predict the class (0 or 1) for one aligned row.
    fn predict(&self, row: &FeatureRow) -> Result<u8, PredictionError>;

    /// Per-class probabilities, index 1 being the productive class.
    /// Models without a probability function return `Ok(None)`.
    fn predict_probability(&self, _row: &FeatureRow) -> Result<Option<Vec<f64>>, PredictionError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    LogisticRegression(LogisticModel),
}

impl ModelSpec {
    fn into_model(self) -> Box<dyn TrainedModel + Send + Sync> {
        match self {
            ModelSpec::LogisticRegression(m) => Box::new(m),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl LogisticModel {
    fn positive_probability(&self, row: &FeatureRow) -> Result<f64, PredictionError> {
        if row.len() != self.coefficients.len() {
            return Err(PredictionError::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: row.len(),
            });
        }
        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.values())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p = 1.0 / (1.0 + (-z).exp());
        if !p.is_finite() {
            return Err(PredictionError::InvalidProbabilities(format!("non-finite probability {}", p)));
        }
        Ok(p)
    }
}

impl TrainedModel for LogisticModel {
    fn predict(&self, row: &FeatureRow) -> Result<u8, PredictionError> {
        let p = self.positive_probability(row)?;
        Ok(u8::from(p >= self.threshold))
    }

    fn predict_probability(&self, row: &FeatureRow) -> Result<Option<Vec<f64>>, PredictionError> {
        let p = self.positive_probability(row)?;
        Ok(Some(vec![1.0 - p, p]))
    }
}

/// Loaded model plus its training-time column order. Immutable once built.
pub struct ModelHandle {
    model: Box<dyn TrainedModel + Send + Sync>,
    columns: Vec<String>,
    source: Option<ModelArtifacts>,
}

impl ModelHandle {
    pub fn new(
        model: Box<dyn TrainedModel + Send + Sync>,
        columns: Vec<String>,
    ) -> Result<Self, ConfigurationError> {
        if columns.is_empty() {
            return Err(ConfigurationError::EmptyColumns);
        }
        Ok(Self { model, columns, source: None })
    }

    /// Artifacts this handle was read from; `None` when built in memory.
    pub fn source(&self) -> Option<&ModelArtifacts> {
        self.source.as_ref()
    }

    pub fn model(&self) -> &(dyn TrainedModel + Send + Sync) {
        self.model.as_ref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("columns", &self.columns)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Where the two artifacts live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelArtifacts {
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
}

impl ModelArtifacts {
    pub fn new(model_path: impl Into<PathBuf>, columns_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            columns_path: columns_path.into(),
        }
    }

    /// Read and validate both artifacts.
    pub fn load(&self) -> Result<ModelHandle, ConfigurationError> {
        let spec: ModelSpec = read_json("model", &self.model_path)?;
        let columns: Vec<String> = read_json("columns", &self.columns_path)?;
        tracing::info!(
            model = %self.model_path.display(),
            columns = columns.len(),
            "loaded model artifacts"
        );
        let mut handle = ModelHandle::new(spec.into_model(), columns)?;
        handle.source = Some(self.clone());
        Ok(handle)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(
    kind: &'static str,
    path: &Path,
) -> Result<T, ConfigurationError> {
    if !path.exists() {
        return Err(ConfigurationError::MissingArtifact {
            kind,
            path: path.to_path_buf(),
        });
    }
    let s = fs::read_to_string(path).map_err(|source| ConfigurationError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&s).map_err(|source| ConfigurationError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// At-most-once model load shared by every request.
///
/// Concurrent first callers block until one load finishes. A failed load is
/// not remembered, so a later call may succeed with other artifacts.
#[derive(Debug, Default)]
pub struct ModelCache {
    slot: OnceCell<Arc<ModelHandle>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static ModelCache {
        static CACHE: OnceCell<ModelCache> = OnceCell::new();
        CACHE.get_or_init(ModelCache::new)
    }

    pub fn get(&self) -> Option<Arc<ModelHandle>> {
        self.slot.get().cloned()
    }

    /// Load `artifacts` unless a model is already cached. The first
    /// successful load wins for the life of the cache: later calls naming
    /// other paths get the cached handle back.
    pub fn get_or_load(&self, artifacts: &ModelArtifacts) -> Result<Arc<ModelHandle>, ConfigurationError> {
        let handle = self.get_or_try_init(|| artifacts.load())?;
        if let Some(loaded) = handle.source().filter(|s| *s != artifacts) {
            tracing::debug!(
                requested = %artifacts.model_path.display(),
                cached = %loaded.model_path.display(),
                "model already cached from other artifacts"
            );
        }
        Ok(handle)
    }

    pub fn get_or_try_init<F>(&self, init: F) -> Result<Arc<ModelHandle>, ConfigurationError>
    where
        F: FnOnce() -> Result<ModelHandle, ConfigurationError>,
    {
        self.slot
            .get_or_try_init(|| init().map(Arc::new))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Columns unknown to the encoder, so every value is zero-filled.
    fn zero_row(width: usize) -> FeatureRow {
        use crate::attributes::{Category, Level, Mood, TaskAttributes};
        let attrs = TaskAttributes::new(30, Level::Low, Level::Low, Mood::Okay, Category::Work, chrono::Weekday::Mon).unwrap();
        let cols: Vec<String> = (0..width).map(|i| format!("c{}", i)).collect();
        crate::features::FeatureVector::encode(&attrs).reindex(&cols)
    }

    #[test]
    fn logistic_checks_shape() {
        let m = LogisticModel { coefficients: vec![1.0, 2.0], intercept: 0.0, threshold: 0.5 };
        let err = m.predict(&zero_row(3)).unwrap_err();
        assert_eq!(err, PredictionError::ShapeMismatch { expected: 2, actual: 3 });
    }

    #[test]
    fn logistic_uses_intercept_and_threshold() {
        // All-zero row: probability is sigmoid(intercept).
        let yes = LogisticModel { coefficients: vec![0.0, 0.0], intercept: 2.0, threshold: 0.5 };
        let no = LogisticModel { coefficients: vec![0.0, 0.0], intercept: -2.0, threshold: 0.5 };
        let r = zero_row(2);
        assert_eq!(yes.predict(&r).unwrap(), 1);
        assert_eq!(no.predict(&r).unwrap(), 0);

        let probs = yes.predict_probability(&r).unwrap().unwrap();
        assert_eq!(probs.len(), 2);
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);
        assert!(probs[1] > 0.88);
    }

    #[test]
    fn model_spec_deserializes_tagged_json() {
        let spec: ModelSpec = serde_json::from_str(
            r#"{"kind": "logistic_regression", "coefficients": [0.5], "intercept": -1.0}"#,
        )
        .unwrap();
        let ModelSpec::LogisticRegression(m) = spec;
        assert_eq!(m.threshold, 0.5);
    }

    #[test]
    fn empty_columns_are_rejected() {
        let m = LogisticModel { coefficients: vec![], intercept: 0.0, threshold: 0.5 };
        assert!(matches!(
            ModelHandle::new(Box::new(m), vec![]),
            Err(ConfigurationError::EmptyColumns)
        ));
    }

    #[test]
    fn missing_artifact_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = ModelArtifacts::new(dir.path().join("model.json"), dir.path().join("columns.json"));
        match artifacts.load() {
            Err(ConfigurationError::MissingArtifact { kind, .. }) => assert_eq!(kind, "model"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn malformed_artifact_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.json");
        let columns = dir.path().join("columns.json");
        fs::write(&model, r#"{"kind": "logistic_regression", "coefficients": [1.0], "intercept": 0.0}"#).unwrap();
        fs::write(&columns, "not json").unwrap();
        assert!(matches!(
            ModelArtifacts::new(model, columns).load(),
            Err(ConfigurationError::Malformed { .. })
        ));
    }

    #[test]
    fn cache_loads_once_and_does_not_remember_failures() {
        let cache = ModelCache::new();
        let calls = AtomicUsize::new(0);

        let failed = cache.get_or_try_init(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ConfigurationError::ModelUnavailable)
        });
        assert!(failed.is_err());
        assert!(cache.get().is_none());

        let load = || {
            calls.fetch_add(1, Ordering::SeqCst);
            let m = LogisticModel { coefficients: vec![1.0], intercept: 0.0, threshold: 0.5 };
            ModelHandle::new(Box::new(m), vec!["task_duration".to_string()])
        };
        let a = cache.get_or_try_init(load).unwrap();
        let b = cache.get_or_try_init(load).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cache_keeps_the_first_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, intercept: f64| {
            let model = dir.path().join(format!("{}.json", name));
            let columns = dir.path().join(format!("{}-columns.json", name));
            fs::write(
                &model,
                format!(r#"{{"kind": "logistic_regression", "coefficients": [1.0], "intercept": {}}}"#, intercept),
            )
            .unwrap();
            fs::write(&columns, r#"["task_duration"]"#).unwrap();
            ModelArtifacts::new(model, columns)
        };
        let first = write("first", 1.0);
        let second = write("second", -1.0);

        let cache = ModelCache::new();
        let a = cache.get_or_load(&first).unwrap();
        let b = cache.get_or_load(&second).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(b.source(), Some(&first));
    }

    #[test]
    fn cache_is_initialised_once_under_concurrent_access() {
        let cache = Arc::new(ModelCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    cache
                        .get_or_try_init(|| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            let m = LogisticModel { coefficients: vec![1.0], intercept: 0.0, threshold: 0.5 };
                            ModelHandle::new(Box::new(m), vec!["task_duration".to_string()])
                        })
                        .unwrap()
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
