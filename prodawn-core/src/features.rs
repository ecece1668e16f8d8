//! Feature encoding for the model-backed classifier.
//!
//! `FeatureVector` is the one-hot expansion of a `TaskAttributes`;
//! `FeatureRow` is that expansion aligned to the training-time column order.

use serde::Serialize;

use crate::attributes::{weekday_name, Category, TaskAttributes, WEEKDAYS};

pub const TASK_DURATION: &str = "task_duration";
pub const PROCRASTINATION_LEVEL: &str = "procrastination_level";
pub const ENERGY_LEVEL: &str = "energy_level";
pub const MOOD_LEVEL: &str = "mood_level";

/// Name-ordered one-hot expansion of one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    pub fn encode(attrs: &TaskAttributes) -> Self {
        let mut entries = vec![
            (TASK_DURATION.to_string(), f64::from(attrs.duration_minutes())),
            (PROCRASTINATION_LEVEL.to_string(), attrs.procrastination().ordinal()),
            (ENERGY_LEVEL.to_string(), attrs.energy().ordinal()),
            (MOOD_LEVEL.to_string(), attrs.mood().ordinal()),
        ];

        for c in Category::ALL {
            let hot = if c == attrs.category() { 1.0 } else { 0.0 };
            entries.push((category_column(c), hot));
        }
        for d in WEEKDAYS {
            let hot = if d == attrs.day_of_week() { 1.0 } else { 0.0 };
            entries.push((format!("day_of_week_{}", weekday_name(d)), hot));
        }

        Self { entries }
    }

    /// Every column name the encoder can produce, in encoding order.
    pub fn column_names() -> Vec<String> {
        let mut names: Vec<String> = [TASK_DURATION, PROCRASTINATION_LEVEL, ENERGY_LEVEL, MOOD_LEVEL]
            .iter()
            .map(|s| s.to_string())
            .collect();
        names.extend(Category::ALL.into_iter().map(category_column));
        names.extend(WEEKDAYS.into_iter().map(|d| format!("day_of_week_{}", weekday_name(d))));
        names
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Align to `columns`: missing columns become 0, unknown ones are dropped.
    pub fn reindex(&self, columns: &[String]) -> FeatureRow {
        let values = columns
            .iter()
            .map(|c| self.get(c).unwrap_or(0.0))
            .collect();
        FeatureRow {
            columns: columns.to_vec(),
            values,
        }
    }
}

fn category_column(c: Category) -> String {
    format!("category_{}", c.as_str())
}

/// A single model input row whose columns equal the training columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Level, Mood};
    use chrono::Weekday;

    fn attrs() -> TaskAttributes {
        TaskAttributes::new(45, Level::Low, Level::High, Mood::Okay, Category::Study, Weekday::Wed).unwrap()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn encodes_numeric_fields_and_one_hot_groups() {
        let fv = FeatureVector::encode(&attrs());
        assert_eq!(fv.len(), 4 + 5 + 7);
        assert_eq!(fv.get("task_duration"), Some(45.0));
        assert_eq!(fv.get("procrastination_level"), Some(1.0));
        assert_eq!(fv.get("energy_level"), Some(3.0));
        assert_eq!(fv.get("mood_level"), Some(2.0));
        assert_eq!(fv.get("category_Study"), Some(1.0));
        assert_eq!(fv.get("category_Work"), Some(0.0));
        assert_eq!(fv.get("day_of_week_Wednesday"), Some(1.0));
        assert_eq!(fv.get("day_of_week_Monday"), Some(0.0));

        let hot: f64 = fv.iter().filter(|(n, _)| n.starts_with("category_")).map(|(_, v)| v).sum();
        assert_eq!(hot, 1.0);
    }

    #[test]
    fn column_names_match_encoding_order() {
        let fv = FeatureVector::encode(&attrs());
        let names: Vec<String> = fv.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, FeatureVector::column_names());
    }

    #[test]
    fn reindex_zero_fills_and_drops() {
        let fv = FeatureVector::encode(&attrs());
        let columns = cols(&[
            "day_of_week_Wednesday",
            "category_Exercise",
            "task_duration",
            "category_Study",
        ]);
        let row = fv.reindex(&columns);

        assert_eq!(row.columns(), columns.as_slice());
        assert_eq!(row.values(), &[1.0, 0.0, 45.0, 1.0]);
        // energy_level etc. are not in the training set and are dropped.
        assert_eq!(row.len(), 4);
    }

    #[test]
    fn reindex_against_empty_columns_is_empty() {
        let row = FeatureVector::encode(&attrs()).reindex(&[]);
        assert!(row.is_empty());
    }

    #[test]
    fn encoding_is_bit_identical_across_calls() {
        let columns = FeatureVector::column_names();
        let a = FeatureVector::encode(&attrs()).reindex(&columns);
        let b = FeatureVector::encode(&attrs()).reindex(&columns);
        let bits = |r: &FeatureRow| r.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_attrs() -> impl Strategy<Value = TaskAttributes> {
            (
                1i64..=1440,
                prop::sample::select(Level::ALL.to_vec()),
                prop::sample::select(Level::ALL.to_vec()),
                prop::sample::select(Mood::ALL.to_vec()),
                prop::sample::select(Category::ALL.to_vec()),
                prop::sample::select(WEEKDAYS.to_vec()),
            )
                .prop_map(|(d, p, e, m, c, w)| TaskAttributes::new(d, p, e, m, c, w).unwrap())
        }

        fn any_columns() -> impl Strategy<Value = Vec<String>> {
            let mut pool = FeatureVector::column_names();
            pool.push("category_Exercise".to_string());
            pool.push("category_Household".to_string());
            pool.push("procrastination_time".to_string());
            prop::sample::subsequence(pool.clone(), 0..=pool.len()).prop_shuffle()
        }

        proptest! {
            /// Property: the row has exactly the training columns, in order,
            /// carrying known values and zero-filling the rest.
            #[test]
            fn reindex_law(attrs in any_attrs(), columns in any_columns()) {
                let fv = FeatureVector::encode(&attrs);
                let row = fv.reindex(&columns);

                prop_assert_eq!(row.len(), columns.len());
                prop_assert_eq!(row.columns(), columns.as_slice());
                for (name, value) in columns.iter().zip(row.values()) {
                    prop_assert_eq!(*value, fv.get(name).unwrap_or(0.0));
                }
            }
        }
    }
}
