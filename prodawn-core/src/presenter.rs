//! Tier -> presentation lookup, plus the momentum quote pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::verdict::Tier;

/// Soft palette: (fill, accent) per tone.
pub const GOOD_COLOR: &str = "#F6E9B8";
pub const GOOD_COLOR_ACCENT: &str = "#F0DC9A";
pub const OK_COLOR: &str = "#FBEDD3";
pub const OK_COLOR_ACCENT: &str = "#F7DFC0";
pub const BAD_COLOR: &str = "#FDE7E0";
pub const BAD_COLOR_ACCENT: &str = "#F7CBC0";

/// Score at or above which the result is celebrated.
pub const CELEBRATION_SCORE: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub badge: &'static str,
    pub title: &'static str,
    pub tip: &'static str,
    pub motivation: &'static str,
    /// Badge fill color.
    pub accent: &'static str,
    /// Progress bar / chart color.
    pub bar_accent: &'static str,
}

pub fn present(tier: Tier) -> Presentation {
    match tier {
        Tier::HighlyProductive => Presentation {
            badge: "Highly productive ✓",
            title: "You're in a great spot, high productivity ahead!",
            tip: "Keep momentum: start a focused interval and build on it.",
            motivation: "Excellent, your chances of completing this task efficiently are high. Celebrate a small win and go for a focused block!",
            accent: GOOD_COLOR,
            bar_accent: GOOD_COLOR_ACCENT,
        },
        Tier::ModeratelyProductive => Presentation {
            badge: "Moderately productive",
            title: "Good, a few adjustments could help.",
            tip: "Try a 10-minute warm-up, remove a single distraction, or divide the task.",
            motivation: "Nice, you're close. Small actions like a short timer or a simpler first step will help.",
            accent: OK_COLOR,
            bar_accent: OK_COLOR_ACCENT,
        },
        Tier::NeedsNudge => Presentation {
            badge: "Needs a nudge",
            title: "This might be a hard window for productivity.",
            tip: "Start with 2 minutes or pick a tiny doable step to reduce friction.",
            motivation: "That's okay, begin with tiny progress. Even 2 minutes can create momentum.",
            accent: BAD_COLOR,
            bar_accent: BAD_COLOR_ACCENT,
        },
        Tier::Productive => Presentation {
            badge: "Productive ✓",
            title: "Looks like a productive session!",
            tip: "You're set up well. Protect the time and start now.",
            motivation: "Keep going, this is a good window to make real progress.",
            accent: GOOD_COLOR,
            bar_accent: GOOD_COLOR_ACCENT,
        },
        Tier::Unproductive => Presentation {
            badge: "Unproductive",
            title: "This session may be a struggle.",
            tip: "Shrink the task until starting feels easy.",
            motivation: "Momentum beats motivation. A tiny first step is enough.",
            accent: BAD_COLOR,
            bar_accent: BAD_COLOR_ACCENT,
        },
    }
}

/// Suggestion attached to the verdict. The unproductive model path draws
/// from the quote pool instead.
pub fn suggestion(tier: Tier) -> &'static str {
    present(tier).tip
}

/// Three micro actions: one tier-specific, then two that always apply.
pub fn micro_actions(tier: Tier) -> [&'static str; 3] {
    let first = match tier {
        Tier::HighlyProductive | Tier::Productive => {
            "Great work, set a 25-minute focus block and keep the momentum."
        }
        Tier::ModeratelyProductive => "Try a 10-minute warm-up and remove one distraction.",
        Tier::NeedsNudge | Tier::Unproductive => {
            "Begin with a 2-minute tiny action, small wins reduce friction."
        }
    };
    [
        first,
        "Set a timer and remove one major distraction (phone / unnecessary tab).",
        "Break the task into a 2-minute starter and a follow-up chunk.",
    ]
}

pub fn celebrate(score: u8) -> bool {
    score >= CELEBRATION_SCORE
}

const MOMENTUM_QUOTES: [&str; 5] = [
    "Start with just five minutes. Momentum will carry you further.",
    "Pick the smallest next step and do only that.",
    "Done is better than perfect. Begin rough and refine later.",
    "Clear one distraction, set a short timer, and start.",
    "Progress, not perfection. One small win changes the day.",
];

pub fn momentum_quotes() -> &'static [&'static str] {
    &MOMENTUM_QUOTES
}

/// Chooses an index into a pool of equivalent strings.
pub trait QuoteSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Pseudo-random selection, reproducible when seeded.
#[derive(Debug, Clone)]
pub struct RandomQuotes {
    rng: StdRng,
}

impl RandomQuotes {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Default for RandomQuotes {
    fn default() -> Self {
        Self::new(None)
    }
}

impl QuoteSource for RandomQuotes {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always picks the same index (wrapped to the pool size).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedQuote(pub usize);

impl QuoteSource for FixedQuote {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

pub fn momentum_quote(quotes: &mut dyn QuoteSource) -> &'static str {
    MOMENTUM_QUOTES[quotes.pick(MOMENTUM_QUOTES.len())]
}
