//! prodawn-core: task attributes in, productivity verdict out.
//!
//! Two engines share one interface: a weighted heuristic score and a
//! trained binary classifier fed a one-hot, column-aligned feature row.

pub mod attributes;
pub mod classifier;
pub mod components;
pub mod engine;
pub mod error;
pub mod features;
pub mod heuristic;
pub mod model;
pub mod presenter;
pub mod verdict;

pub use attributes::{Category, Level, Mood, TaskAttributes, TaskInput};
pub use classifier::{classify, ModelBackedClassifier};
pub use components::{components, Component};
pub use engine::{Predictor, Strategy, VerdictEngine};
pub use error::{ConfigurationError, CoreError, PredictionError, ValidationError};
pub use features::{FeatureRow, FeatureVector};
pub use heuristic::{DurationBucket, HeuristicScorer, LevelWeights, MoodWeights, ScoreBreakdown, WeightTable};
pub use model::{LogisticModel, ModelArtifacts, ModelCache, ModelHandle, ModelSpec, TrainedModel};
pub use presenter::{present, FixedQuote, Presentation, QuoteSource, RandomQuotes};
pub use verdict::{EngineKind, Label, Tier, Verdict};
