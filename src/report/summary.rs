//! Render a finished quiz as plain text.

use std::fmt::Write as _;
use std::io::Write;

use crate::core::engine::{Phase, QuizEngine};
use crate::core::review::{review, Outcome, Summary};

/// Text report for a finished quiz, or `None` if it never finished.
pub fn render_summary(engine: &QuizEngine) -> Option<String> {
    if engine.phase() != Phase::Finished {
        return None;
    }

    let summary = Summary::of(engine);
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{}: {} correct ({}) in {}",
        engine.questions().title(),
        summary.score_label(),
        summary.percentage_label(),
        summary.elapsed,
    );
    let _ = writeln!(out, "answered {}/{}", summary.answered, summary.total);
    out.push('\n');

    for entry in review(engine.questions(), engine.answers()) {
        let mark = match entry.outcome {
            Outcome::Correct => "✓",
            Outcome::Incorrect => "✗",
            Outcome::Unanswered => "-",
        };
        let _ = writeln!(out, "{mark} {:>2}. {}", entry.number, entry.question.prompt);
        let _ = writeln!(out, "      your answer: {}", entry.your_answer_label());
        if let Some(correction) = entry.correction_label() {
            let _ = writeln!(out, "      correct:     {correction}");
        }
    }

    Some(out)
}

/// Print the report to stdout.  Does nothing for an unfinished quiz.
pub fn print_summary(engine: &QuizEngine) -> std::io::Result<()> {
    match render_summary(engine) {
        Some(text) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()
        }
        None => {
            tracing::debug!("quiz not finished; no summary printed");
            Ok(())
        }
    }
}
