//! Task attributes collected per prediction request.
//!
//! Every ordinal and categorical field is a closed enum. Parsing is
//! case-insensitive and rejects anything outside the domain.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_DURATION_MINUTES: u32 = 1;
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Three-step ordinal used for procrastination and energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        }
    }

    /// Ordinal used in feature rows (1..=3).
    pub fn ordinal(&self) -> f64 {
        match self {
            Level::Low => 1.0,
            Level::Medium => 2.0,
            Level::High => 3.0,
        }
    }

    fn parse_field(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Level::Low),
            "medium" => Ok(Level::Medium),
            "high" => Ok(Level::High),
            _ => Err(unknown(field, s, &Self::ALL.map(|l| l.as_str()))),
        }
    }

    pub fn parse_procrastination(s: &str) -> Result<Self, ValidationError> {
        Self::parse_field("procrastination level", s)
    }

    pub fn parse_energy(s: &str) -> Result<Self, ValidationError> {
        Self::parse_field("energy level", s)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Bad,
    #[serde(alias = "Neutral")]
    Okay,
    Good,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Bad, Mood::Okay, Mood::Good];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Bad => "Bad",
            Mood::Okay => "Okay",
            Mood::Good => "Good",
        }
    }

    pub fn ordinal(&self) -> f64 {
        match self {
            Mood::Bad => 1.0,
            Mood::Okay => 2.0,
            Mood::Good => 3.0,
        }
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bad" => Ok(Mood::Bad),
            "okay" | "neutral" => Ok(Mood::Okay),
            "good" => Ok(Mood::Good),
            _ => Err(unknown("mood", s, &Self::ALL.map(|m| m.as_str()))),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Work,
    Study,
    Personal,
    Errand,
    Creative,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Study,
        Category::Personal,
        Category::Errand,
        Category::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Study => "Study",
            Category::Personal => "Personal",
            Category::Errand => "Errand",
            Category::Creative => "Creative",
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == needle)
            .ok_or_else(|| unknown("category", s, &Self::ALL.map(|c| c.as_str())))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monday-first, matching the order the form offers.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn parse_weekday(s: &str) -> Result<Weekday, ValidationError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| unknown("day of week", s, &WEEKDAYS.map(weekday_name)))
}

/// Parse free-text minutes, keeping the raw text in the error.
pub fn parse_duration(s: &str) -> Result<i64, ValidationError> {
    s.trim().parse().map_err(|_| ValidationError::NotANumber {
        field: "duration",
        value: s.trim().to_string(),
    })
}

fn unknown(field: &'static str, value: &str, expected: &[&str]) -> ValidationError {
    ValidationError::UnknownValue {
        field,
        value: value.to_string(),
        expected: expected.join(", "),
    }
}

/// Validated attributes for one prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskAttributes {
    duration_minutes: u32,
    procrastination: Level,
    energy: Level,
    mood: Mood,
    category: Category,
    day_of_week: Weekday,
}

impl TaskAttributes {
    pub fn new(
        duration_minutes: i64,
        procrastination: Level,
        energy: Level,
        mood: Mood,
        category: Category,
        day_of_week: Weekday,
    ) -> Result<Self, ValidationError> {
        let range = i64::from(MIN_DURATION_MINUTES)..=i64::from(MAX_DURATION_MINUTES);
        if !range.contains(&duration_minutes) {
            return Err(ValidationError::DurationOutOfRange {
                value: duration_minutes,
                min: MIN_DURATION_MINUTES,
                max: MAX_DURATION_MINUTES,
            });
        }
        Ok(Self {
            duration_minutes: duration_minutes as u32,
            procrastination,
            energy,
            mood,
            category,
            day_of_week,
        })
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn procrastination(&self) -> Level {
        self.procrastination
    }

    pub fn energy(&self) -> Level {
        self.energy
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }
}

/// Raw, untyped request as it arrives from a form, prompt or JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    pub duration_minutes: i64,
    pub procrastination: String,
    pub energy: String,
    pub mood: String,
    pub category: String,
    pub day_of_week: String,
}

impl TaskInput {
    /// Validate every field; the first failure wins.
    pub fn parse(&self) -> Result<TaskAttributes, ValidationError> {
        TaskAttributes::new(
            self.duration_minutes,
            Level::parse_procrastination(&self.procrastination)?,
            Level::parse_energy(&self.energy)?,
            self.mood.parse()?,
            self.category.parse()?,
            parse_weekday(&self.day_of_week)?,
        )
    }
}
