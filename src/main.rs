//! A terminal multiple-choice quiz.
//!
//! Run the binary to take the builtin twenty-question ML/NLP quiz.
//! Run with `--questions bank.toml` to load your own question bank, and with
//! `--summary` to print the results to stdout after quitting.

mod app;
mod config;
mod core;
mod report;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::core::question::{load_question_file, QuestionSet};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Multiple-choice quiz in the terminal")]
struct Cli {
    /// TOML question bank to use instead of the builtin ML/NLP set.
    #[arg(long, value_name = "FILE")]
    questions: Option<PathBuf>,

    /// Validate the question bank and exit.
    #[arg(long)]
    check: bool,

    /// Print a plain-text summary to stdout after a finished quiz.
    #[arg(long)]
    summary: bool,

    /// Hide the running clock while answering.
    #[arg(long)]
    no_timer: bool,
}

/// CLI flag wins over the config file; neither means the builtin bank.
fn load_questions(cli: &Cli, config: &config::AppConfig) -> Result<QuestionSet> {
    match cli.questions.as_ref().or(config.questions.as_ref()) {
        Some(path) => load_question_file(path),
        None => Ok(QuestionSet::builtin()),
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (silent unless RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut user_config = config::AppConfig::load();
    if cli.no_timer {
        user_config.show_timer = false;
    }

    let questions = load_questions(&cli, &user_config)?;

    // ── validation mode ───────────────────────────────────────
    if cli.check {
        println!("{}: {} questions OK", questions.title(), questions.len());
        return Ok(());
    }

    tracing::info!(count = questions.len(), title = questions.title(), "starting quiz");
    let mut state = AppState::new(questions, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let run_result = run(&mut terminal, &mut state).await;

    // ── teardown (always, even if the loop failed) ────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    run_result?;

    if cli.summary {
        report::summary::print_summary(&state.engine).context("failed to print summary")?;
    }

    Ok(())
}

/// Draw, wait for the next event, repeat until the user quits.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(250));

    loop {
        terminal.draw(|frame| ui::draw(frame, state))?;

        tokio::select! {
            event = events.recv() => match event {
                Some(AppEvent::Key(k)) => handler::handle_key(state, k),
                Some(AppEvent::Resize(_, _)) => {}
                // Redraw only; keeps the live timer moving.
                Some(AppEvent::Tick) => {}
                None => {
                    tracing::warn!("event reader stopped");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => state.should_quit = true,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
