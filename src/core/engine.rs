//! The quiz state machine.
//!
//! [`QuizEngine`] pairs an immutable [`QuestionSet`] with the mutable
//! [`QuizSession`].  The session is only reachable read-only from outside;
//! every mutation goes through one of the transition methods, each of which
//! either applies completely or returns [`InvalidArgument`] and leaves the
//! session untouched.
//!
//! ```text
//!            start()                finish()
//! NotStarted ───────▶ InProgress ───────────▶ Finished
//!     ▲                   │                       │
//!     └──── reset() ──────┴────── reset() ────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::error::InvalidArgument;
use super::question::{OptionKey, Question, QuestionSet};

/// Returned by [`QuizEngine::elapsed_time`] when the quiz has not both
/// started and finished.
pub const NO_ELAPSED_TIME: &str = "00:00";

// ───────────────────────────────────────── phase ─────────────

/// Coarse lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::NotStarted => "not started",
            Phase::InProgress => "in progress",
            Phase::Finished => "finished",
        })
    }
}

// ───────────────────────────────────────── answers ───────────

/// Question index → selected option.  Absent index means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet(BTreeMap<usize, OptionKey>);

impl AnswerSet {
    pub fn get(&self, index: usize) -> Option<OptionKey> {
        self.0.get(&index).copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, index: usize, key: OptionKey) -> Option<OptionKey> {
        self.0.insert(index, key)
    }
}

// ───────────────────────────────────────── session ───────────

/// All mutable quiz state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    pub phase: Phase,
    /// Index of the question on screen.  Always `< question count`.
    pub current: usize,
    pub answers: AnswerSet,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

// ───────────────────────────────────────── engine ────────────

/// Owns the question set and the single live session.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: QuestionSet,
    session: QuizSession,
}

impl QuizEngine {
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            questions,
            session: QuizSession::default(),
        }
    }

    // ── transitions ─────────────────────────────────────────────

    /// Begin answering, stamped with the current wall-clock time.
    pub fn start(&mut self) -> Result<(), InvalidArgument> {
        self.start_at(Utc::now())
    }

    /// Begin answering with an explicit start time.
    pub fn start_at(&mut self, now: DateTime<Utc>) -> Result<(), InvalidArgument> {
        self.require(Phase::NotStarted, "start")?;
        self.session = QuizSession {
            phase: Phase::InProgress,
            current: 0,
            answers: AnswerSet::default(),
            started_at: Some(now),
            finished_at: None,
        };
        tracing::debug!(questions = self.questions.len(), "quiz started");
        Ok(())
    }

    /// Record `key` for question `index`, replacing any earlier choice.
    /// The current question does not move.
    pub fn select_answer(&mut self, index: usize, key: OptionKey) -> Result<(), InvalidArgument> {
        self.require(Phase::InProgress, "select_answer")?;
        self.check_index(index)?;
        let previous = self.session.answers.insert(index, key);
        tracing::debug!(index, %key, ?previous, "answer selected");
        Ok(())
    }

    /// Move to the next question.  A no-op on the last one.
    pub fn go_next(&mut self) -> Result<(), InvalidArgument> {
        self.require(Phase::InProgress, "go_next")?;
        if !self.is_last() {
            self.session.current += 1;
        }
        Ok(())
    }

    /// Move to the previous question.  A no-op on the first one.
    pub fn go_previous(&mut self) -> Result<(), InvalidArgument> {
        self.require(Phase::InProgress, "go_previous")?;
        self.session.current = self.session.current.saturating_sub(1);
        Ok(())
    }

    /// Freeze the answers, stamped with the current wall-clock time.
    pub fn finish(&mut self) -> Result<(), InvalidArgument> {
        self.finish_at(Utc::now())
    }

    /// Freeze the answers with an explicit end time.  A second call is
    /// rejected and leaves the first end time in place.
    pub fn finish_at(&mut self, now: DateTime<Utc>) -> Result<(), InvalidArgument> {
        self.require(Phase::InProgress, "finish")?;
        self.session.phase = Phase::Finished;
        self.session.finished_at = Some(now);
        tracing::debug!(
            score = self.score(),
            answered = self.answered_count(),
            elapsed = %self.elapsed_time(),
            "quiz finished"
        );
        Ok(())
    }

    /// Discard the session and return to `NotStarted`.  Valid from any phase.
    pub fn reset(&mut self) {
        self.session = QuizSession::default();
        tracing::debug!("quiz reset");
    }

    // ── queries ─────────────────────────────────────────────────

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn current_index(&self) -> usize {
        self.session.current
    }

    pub fn current_question(&self) -> &Question {
        // `current` is kept in range by every transition and the set is never empty.
        &self.questions.as_slice()[self.session.current]
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.session.answers
    }

    pub fn answer_for(&self, index: usize) -> Option<OptionKey> {
        self.session.answers.get(index)
    }

    pub fn is_first(&self) -> bool {
        self.session.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.session.current + 1 >= self.questions.len()
    }

    /// Number of questions whose recorded answer matches the key.
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.session.answers.get(*i) == Some(q.answer))
            .count()
    }

    /// `score / count * 100`, unrounded.
    pub fn score_percentage(&self) -> f64 {
        self.score() as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn answered_count(&self) -> usize {
        self.session.answers.len()
    }

    /// `(current + 1) / count`, always in `(0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        (self.session.current + 1) as f64 / self.questions.len() as f64
    }

    /// End minus start, once both are recorded.  Clamped at zero if the
    /// wall clock stepped backwards in between.
    pub fn elapsed(&self) -> Option<Duration> {
        let (start, end) = (self.session.started_at?, self.session.finished_at?);
        Some((end - start).max(Duration::zero()))
    }

    /// `m:ss` between start and finish, or [`NO_ELAPSED_TIME`].
    pub fn elapsed_time(&self) -> String {
        match self.elapsed() {
            Some(d) => format_elapsed(d),
            None => NO_ELAPSED_TIME.to_string(),
        }
    }

    /// Time since start, for a live clock while answering.
    pub fn running_time(&self, now: DateTime<Utc>) -> Option<Duration> {
        let start = self.session.started_at?;
        let end = self.session.finished_at.unwrap_or(now);
        Some((end - start).max(Duration::zero()))
    }

    // ── guards ──────────────────────────────────────────────────

    fn require(&self, phase: Phase, operation: &'static str) -> Result<(), InvalidArgument> {
        if self.session.phase == phase {
            Ok(())
        } else {
            Err(InvalidArgument::WrongPhase {
                operation,
                phase: self.session.phase,
            })
        }
    }

    fn check_index(&self, index: usize) -> Result<(), InvalidArgument> {
        if index < self.questions.len() {
            Ok(())
        } else {
            Err(InvalidArgument::QuestionOutOfRange {
                index,
                count: self.questions.len(),
            })
        }
    }
}

/// Whole minutes and truncated whole seconds, e.g. 65 999 ms → `"1:05"`.
/// Seconds are floored, never rounded.
pub fn format_elapsed(d: Duration) -> String {
    let ms = d.num_milliseconds().max(0);
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    format!("{minutes}:{seconds:02}")
}
