//! Terminal and JSON rendering of a verdict.

use prodawn_core::attributes::weekday_name;
use prodawn_core::presenter::{celebrate, micro_actions};
use prodawn_core::{components, present, Component, Presentation, ScoreBreakdown, TaskAttributes, Verdict};
use serde::Serialize;

const BAR_WIDTH: usize = 20;

/// Everything the presentation layer shows for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub verdict: Verdict,
    pub presentation: Presentation,
    pub attributes: TaskAttributes,
    pub components: [Component; 4],
    pub micro_actions: [&'static str; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
    pub celebrate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Report {
    pub fn new(
        verdict: Verdict,
        attributes: TaskAttributes,
        breakdown: Option<ScoreBreakdown>,
        note: Option<String>,
    ) -> Self {
        let tier = verdict.tier;
        Self {
            presentation: present(tier),
            components: components(&attributes),
            micro_actions: micro_actions(tier),
            celebrate: verdict.score.is_some_and(celebrate),
            note: note.filter(|n| !n.trim().is_empty()),
            verdict,
            attributes,
            breakdown,
        }
    }
}

fn bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn render_text(r: &Report) -> String {
    let v = &r.verdict;
    let p = &r.presentation;
    let a = &r.attributes;
    let mut s = String::new();

    match v.confidence_percent() {
        Some(c) => s.push_str(&format!("Prediction | confidence {}% ({:?})\n", c, v.engine)),
        None => s.push_str(&format!("Prediction ({:?})\n", v.engine)),
    }
    s.push_str(&format!("[{}] {}\n", p.badge, p.title));
    s.push_str(&format!("  {}\n", v.suggestion));
    if let Some(c) = v.confidence_percent() {
        s.push_str(&format!("  {} {}%\n", bar(c), c));
    }
    s.push_str(&format!("  {}\n", p.motivation));

    if let Some(b) = &r.breakdown {
        s.push_str("\n## Score breakdown\n\n");
        for (name, value) in [
            ("baseline", b.baseline),
            ("duration", b.duration),
            ("procrastination", b.procrastination),
            ("energy", b.energy),
            ("mood", b.mood),
            ("category x mood", b.interaction),
        ] {
            s.push_str(&format!("  {:<16} {:+}\n", name, value));
        }
        s.push_str(&format!("  {:<16} {} (clamped to {})\n", "total", b.raw, b.score));
    }

    s.push_str("\n## Components\n\n");
    for c in &r.components {
        s.push_str(&format!("  {:<16} {} {}%\n", c.name, bar(c.value), c.value));
    }

    s.push_str("\n## Snapshot\n\n");
    s.push_str(&format!(
        "  Duration: {} min | Procrastination: {} | Energy: {} | Mood: {}\n",
        a.duration_minutes(),
        a.procrastination(),
        a.energy(),
        a.mood()
    ));
    s.push_str(&format!(
        "  Category: {} | Day: {}\n",
        a.category(),
        weekday_name(a.day_of_week())
    ));
    if let Some(note) = &r.note {
        s.push_str(&format!("  Note: {}\n", note.trim()));
    }

    s.push_str("\n## Suggested micro-actions\n\n");
    for m in r.micro_actions {
        s.push_str(&format!("- {}\n", m));
    }

    if r.celebrate {
        s.push_str("\nOutstanding window, go make it count!\n");
    }
    s
}
