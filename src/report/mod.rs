//! Plain-text results for stdout.
//!
//! All TUI rendering goes to the alternate screen (stderr-backed), so stdout
//! is free for a summary that can be piped or saved once the terminal has
//! been restored.

pub mod summary;
