//! Core quiz logic – question bank, state machine, and scoring.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be shared across async tasks.

mod builtin;
pub mod engine;
pub mod error;
pub mod question;
pub mod review;
