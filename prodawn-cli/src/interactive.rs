use anyhow::Result;
use prodawn_core::attributes::parse_duration;
use prodawn_core::{CoreError, Predictor, QuoteSource, TaskInput, ValidationError};
use std::io::{self, BufRead, Write};

use crate::render::{render_text, Report};

/// Ask once; an empty answer takes `default`. `None` on end of input.
fn prompt(input: &mut impl BufRead, label: &str, default: &str) -> Result<Option<String>> {
    print!("{} [{}]: ", label, default);
    io::stdout().flush().ok();
    let mut s = String::new();
    if input.read_line(&mut s)? == 0 {
        return Ok(None);
    }
    let s = s.trim();
    Ok(Some(if s.is_empty() { default.to_string() } else { s.to_string() }))
}

/// One prompted request: the raw task (or why its duration was unusable)
/// and the free-text note.
type Answers = (std::result::Result<TaskInput, ValidationError>, String);

/// Collect one request. `None` when the user quits or input ends.
fn read_task(input: &mut impl BufRead, today: &str) -> Result<Option<Answers>> {
    let Some(duration) = prompt(input, "Task duration in minutes (q to quit)", "60")? else {
        return Ok(None);
    };
    if duration.eq_ignore_ascii_case("q") {
        return Ok(None);
    }

    let mut fields = Vec::new();
    for (label, default) in [
        ("Procrastination level (Low/Medium/High)", "Medium"),
        ("Energy level (Low/Medium/High)", "Medium"),
        ("Mood (Bad/Okay/Good)", "Good"),
        ("Category (Work/Study/Personal/Errand/Creative)", "Work"),
        ("Day of the week", today),
        ("Quick note (optional)", ""),
    ] {
        let Some(v) = prompt(input, label, default)? else {
            return Ok(None);
        };
        fields.push(v);
    }
    let [procrastination, energy, mood, category, day_of_week, note]: [String; 6] =
        fields.try_into().map_err(|_| anyhow::anyhow!("prompt field count mismatch"))?;

    let task = parse_duration(&duration).map(|duration_minutes| TaskInput {
        duration_minutes,
        procrastination,
        energy,
        mood,
        category,
        day_of_week,
    });
    Ok(Some((task, note)))
}

/// Prompt, predict and print until the user quits. A failed request is
/// reported and the loop carries on.
pub fn run_interactive(
    predictor: &Predictor,
    quotes: &mut dyn QuoteSource,
    input: &mut impl BufRead,
    today: &str,
) -> Result<usize> {
    println!("Prodawn: plan smarter, work calmer, achieve more\n");
    let mut served = 0usize;

    while let Some((task, note)) = read_task(input, today)? {
        let outcome = task
            .and_then(|t| t.parse())
            .map_err(CoreError::from)
            .and_then(|attrs| Ok((predictor.predict(&attrs, quotes)?, attrs)));

        match outcome {
            Ok((verdict, attrs)) => {
                let note = Some(note);
                println!("\n{}", render_text(&Report::new(verdict, attrs, None, note)));
                served += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "request failed");
                println!("\n{}\n", e.user_message());
            }
        }
    }

    println!("Bye.");
    Ok(served)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodawn_core::FixedQuote;
    use std::io::Cursor;

    #[test]
    fn bad_request_does_not_end_the_session() {
        let script = "\
30\nlow\nhigh\ngood\nwork\n\n\n\
abc\nlow\nhigh\ngood\nwork\n\n\n\
45\nMedium\nMedium\nOkay\nStudy\nFriday\nread chapter 3\n\
q\n";
        let mut input = Cursor::new(script.as_bytes());
        let served = run_interactive(&Predictor::default(), &mut FixedQuote(0), &mut input, "Monday").unwrap();
        assert_eq!(served, 2);
    }

    #[test]
    fn non_numeric_duration_keeps_the_raw_text() {
        let mut input = Cursor::new("abc\nlow\nhigh\ngood\nwork\n\n\n".as_bytes());
        let (task, _) = read_task(&mut input, "Monday").unwrap().unwrap();
        assert_eq!(
            task.unwrap_err(),
            ValidationError::NotANumber { field: "duration", value: "abc".to_string() }
        );
    }

    #[test]
    fn end_of_input_stops_cleanly() {
        let mut input = Cursor::new("30\nlow\n".as_bytes());
        let served = run_interactive(&Predictor::default(), &mut FixedQuote(0), &mut input, "Monday").unwrap();
        assert_eq!(served, 0);
    }

    #[test]
    fn blank_answers_take_defaults() {
        let mut input = Cursor::new("\n\n\n\n\n\n\n".as_bytes());
        let (task, note) = read_task(&mut input, "Sunday").unwrap().unwrap();
        let task = task.unwrap();
        assert_eq!(task.duration_minutes, 60);
        assert_eq!(task.procrastination, "Medium");
        assert_eq!(task.day_of_week, "Sunday");
        assert!(note.is_empty());
    }
}
