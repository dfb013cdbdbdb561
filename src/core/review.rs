//! Results projection: per-question review and score summary.
//!
//! Nothing here is stored; every value is derived on demand from the
//! question set and the answers.

use super::engine::{AnswerSet, QuizEngine};
use super::question::{OptionKey, Question, QuestionSet};

/// How a single question was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// One row of the detailed results.
#[derive(Debug, Clone, Copy)]
pub struct ReviewEntry<'a> {
    /// 1-based position in the quiz.
    pub number: usize,
    pub question: &'a Question,
    pub selected: Option<OptionKey>,
    pub outcome: Outcome,
}

impl ReviewEntry<'_> {
    pub fn is_correct(&self) -> bool {
        self.outcome == Outcome::Correct
    }

    /// `"B) Ham → Spam"` or `"Not answered"`.
    pub fn your_answer_label(&self) -> String {
        match self.selected {
            Some(key) => option_label(self.question, key),
            None => "Not answered".to_string(),
        }
    }

    /// The correct option, shown only when the user missed it.
    pub fn correction_label(&self) -> Option<String> {
        (!self.is_correct()).then(|| option_label(self.question, self.question.answer))
    }
}

fn option_label(question: &Question, key: OptionKey) -> String {
    format!("{key}) {}", question.option(key))
}

/// Walk every question in order alongside the recorded answer.
pub fn review<'a>(
    questions: &'a QuestionSet,
    answers: &'a AnswerSet,
) -> impl Iterator<Item = ReviewEntry<'a>> + 'a {
    questions.iter().enumerate().map(move |(i, question)| {
        let selected = answers.get(i);
        let outcome = match selected {
            None => Outcome::Unanswered,
            Some(key) if question.is_correct(key) => Outcome::Correct,
            Some(_) => Outcome::Incorrect,
        };
        ReviewEntry {
            number: i + 1,
            question,
            selected,
            outcome,
        }
    })
}

/// Headline numbers for the results screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    pub percentage: f64,
    pub elapsed: String,
}

impl Summary {
    pub fn of(engine: &QuizEngine) -> Self {
        Self {
            score: engine.score(),
            total: engine.question_count(),
            answered: engine.answered_count(),
            percentage: engine.score_percentage(),
            elapsed: engine.elapsed_time(),
        }
    }

    /// `"17/20"`.
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }

    /// Percentage rounded to one decimal, e.g. `"85.0%"`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}
