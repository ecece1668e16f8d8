//! Hand-written productivity score in [0, 100].
//!
//! Scoring (default weights):
//! - baseline 55
//! - duration: <=15 +14, <=30 +10, <=60 +4, <=120 -4, longer -12
//! - procrastination: Low +16, High -18
//! - energy: High +12, Low -10
//! - mood: Good +8, Bad -6
//! - Creative task in a Good mood: +4
//!
//! Every rule is applied; the sum is clamped to [0, 100].

use serde::{Deserialize, Serialize};

use crate::attributes::{Category, Level, Mood, TaskAttributes};
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBucket {
    /// Inclusive upper bound in minutes.
    pub max_minutes: u32,
    pub adjustment: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelWeights {
    pub low: i32,
    #[serde(default)]
    pub medium: i32,
    pub high: i32,
}

impl LevelWeights {
    fn get(&self, level: Level) -> i32 {
        match level {
            Level::Low => self.low,
            Level::Medium => self.medium,
            Level::High => self.high,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodWeights {
    pub bad: i32,
    #[serde(default)]
    pub okay: i32,
    pub good: i32,
}

impl MoodWeights {
    fn get(&self, mood: Mood) -> i32 {
        match mood {
            Mood::Bad => self.bad,
            Mood::Okay => self.okay,
            Mood::Good => self.good,
        }
    }
}

/// Largest magnitude any single weight may have.
pub const MAX_WEIGHT: i32 = 1000;

/// All constants the heuristic uses. `Default` reproduces the shipped formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    pub baseline: i32,
    /// Checked in order; the first bucket whose bound covers the duration wins.
    pub duration_buckets: Vec<DurationBucket>,
    /// Applied when no bucket covers the duration.
    pub long_duration: i32,
    pub procrastination: LevelWeights,
    pub energy: LevelWeights,
    pub mood: MoodWeights,
    pub creative_good_mood: i32,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            baseline: 55,
            duration_buckets: vec![
                DurationBucket { max_minutes: 15, adjustment: 14 },
                DurationBucket { max_minutes: 30, adjustment: 10 },
                DurationBucket { max_minutes: 60, adjustment: 4 },
                DurationBucket { max_minutes: 120, adjustment: -4 },
            ],
            long_duration: -12,
            procrastination: LevelWeights { low: 16, medium: 0, high: -18 },
            energy: LevelWeights { low: -10, medium: 0, high: 12 },
            mood: MoodWeights { bad: -6, okay: 0, good: 8 },
            creative_good_mood: 4,
        }
    }
}

impl WeightTable {
    /// Bucket bounds must ascend and every weight must lie within
    /// `±MAX_WEIGHT`, which keeps the summed score far from `i32` overflow.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in self.named_weights() {
            if value.unsigned_abs() > MAX_WEIGHT.unsigned_abs() {
                return Err(ConfigurationError::InvalidWeights(format!(
                    "{} = {} is outside -{}..={}",
                    name, value, MAX_WEIGHT, MAX_WEIGHT
                )));
            }
        }

        let ascending = self
            .duration_buckets
            .windows(2)
            .all(|w| w[0].max_minutes < w[1].max_minutes);
        if !ascending {
            return Err(ConfigurationError::InvalidWeights(
                "duration buckets must have strictly ascending bounds".to_string(),
            ));
        }
        Ok(())
    }

    fn named_weights(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        [
            ("baseline", self.baseline),
            ("long_duration", self.long_duration),
            ("procrastination.low", self.procrastination.low),
            ("procrastination.medium", self.procrastination.medium),
            ("procrastination.high", self.procrastination.high),
            ("energy.low", self.energy.low),
            ("energy.medium", self.energy.medium),
            ("energy.high", self.energy.high),
            ("mood.bad", self.mood.bad),
            ("mood.okay", self.mood.okay),
            ("mood.good", self.mood.good),
            ("creative_good_mood", self.creative_good_mood),
        ]
        .into_iter()
        .chain(
            self.duration_buckets
                .iter()
                .map(|b| ("duration_buckets.adjustment", b.adjustment)),
        )
    }

    fn duration_adjustment(&self, minutes: u32) -> i32 {
        self.duration_buckets
            .iter()
            .find(|b| minutes <= b.max_minutes)
            .map(|b| b.adjustment)
            .unwrap_or(self.long_duration)
    }
}

/// Per-rule contributions for one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub baseline: i32,
    pub duration: i32,
    pub procrastination: i32,
    pub energy: i32,
    pub mood: i32,
    pub interaction: i32,
    /// Sum before clamping.
    pub raw: i32,
    pub score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeuristicScorer {
    weights: WeightTable,
}

impl HeuristicScorer {
    pub fn new(weights: WeightTable) -> Result<Self, ConfigurationError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn score(&self, attrs: &TaskAttributes) -> u8 {
        self.breakdown(attrs).score
    }

    pub fn breakdown(&self, attrs: &TaskAttributes) -> ScoreBreakdown {
        let w = &self.weights;
        let duration = w.duration_adjustment(attrs.duration_minutes());
        let procrastination = w.procrastination.get(attrs.procrastination());
        let energy = w.energy.get(attrs.energy());
        let mood = w.mood.get(attrs.mood());
        let interaction = if attrs.category() == Category::Creative && attrs.mood() == Mood::Good {
            w.creative_good_mood
        } else {
            0
        };

        let raw = w.baseline + duration + procrastination + energy + mood + interaction;
        ScoreBreakdown {
            baseline: w.baseline,
            duration,
            procrastination,
            energy,
            mood,
            interaction,
            raw,
            score: raw.clamp(0, 100) as u8,
        }
    }
}
