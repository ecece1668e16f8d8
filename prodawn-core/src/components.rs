//! Rough per-input bars shown next to the score (0-100 each).
//!
//! These are display approximations, not inputs to the score.

use serde::Serialize;

use crate::attributes::{Level, Mood, TaskAttributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: &'static str,
    pub value: u8,
}

pub fn components(attrs: &TaskAttributes) -> [Component; 4] {
    [
        Component { name: "Duration", value: duration_component(attrs.duration_minutes()) },
        Component {
            name: "Procrastination",
            value: match attrs.procrastination() {
                Level::Low => 80,
                Level::Medium => 50,
                Level::High => 20,
            },
        },
        Component { name: "Energy", value: level_component(attrs.energy()) },
        Component {
            name: "Mood",
            value: match attrs.mood() {
                Mood::Bad => 20,
                Mood::Okay => 50,
                Mood::Good => 80,
            },
        },
    ]
}

/// Shorter tasks read higher; anything up to an hour sits at 80 or above.
fn duration_component(minutes: u32) -> u8 {
    let m = f64::from(minutes);
    let v = (100.0 - (m / m.max(60.0)) * 20.0) as i64;
    v.clamp(0, 100) as u8
}

fn level_component(level: Level) -> u8 {
    match level {
        Level::Low => 20,
        Level::Medium => 50,
        Level::High => 80,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Category;
    use chrono::Weekday;

    #[test]
    fn duration_component_values() {
        assert_eq!(duration_component(30), 90);
        assert_eq!(duration_component(60), 80);
        assert_eq!(duration_component(600), 80);
        assert_eq!(duration_component(1), 99);
    }

    #[test]
    fn procrastination_is_inverted() {
        let a = TaskAttributes::new(60, Level::High, Level::High, Mood::Bad, Category::Work, Weekday::Sun).unwrap();
        let c = components(&a);
        assert_eq!(c.map(|c| c.name), ["Duration", "Procrastination", "Energy", "Mood"]);
        assert_eq!(c.map(|c| c.value), [80, 20, 80, 20]);
    }
}
