//! Error types for the quiz core.
//!
//! [`InvalidArgument`] covers every caller contract violation on the engine.
//! The presentation layer is expected never to produce one, so these are
//! reported rather than retried.  [`BankError`] covers question banks that
//! fail validation when loaded from disk.

use thiserror::Error;

use super::engine::Phase;

/// A call the engine refused.  A rejected call never mutates the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// Question index outside `0..count`.
    #[error("question index {index} out of range (quiz has {count} questions)")]
    QuestionOutOfRange { index: usize, count: usize },

    /// An option key other than A, B, C or D.
    #[error("unknown option key {0:?} (expected one of A, B, C, D)")]
    UnknownOption(String),

    /// The transition is not allowed from the current phase.
    #[error("`{operation}` is not allowed while the quiz is {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: Phase,
    },
}

/// Problems found while validating a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,

    #[error("question {number}: prompt is empty")]
    EmptyPrompt { number: usize },

    #[error("question {number}: option {key} is empty")]
    EmptyOption { number: usize, key: char },

    #[error("question {number}: answer {answer:?} is not one of A, B, C, D")]
    BadAnswer { number: usize, answer: String },
}
