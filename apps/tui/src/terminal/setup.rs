use color_eyre::eyre::{eyre, Report};
use color_eyre::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout, Write};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode, alternate screen and a hidden cursor for the previewer.
///
/// A failure part way through undoes the steps already taken.
pub fn setup_terminal() -> Result<Tui> {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    tracing::info!(width, height, "entering raw mode and alternate screen");

    enable_raw_mode().map_err(|error| setup_failed("enable raw mode", &error))?;

    let mut out = stdout();
    if let Err(error) = execute!(out, EnterAlternateScreen, cursor::Hide) {
        let _ = disable_raw_mode();
        return Err(setup_failed("enter alternate screen", &error));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(out)) {
        Ok(terminal) => terminal,
        Err(error) => {
            restore_terminal();
            return Err(setup_failed("create terminal", &error));
        }
    };

    if let Err(error) = terminal.clear() {
        tracing::warn!(%error, "could not clear terminal");
    }

    tracing::debug!("terminal ready");
    Ok(terminal)
}

fn setup_failed(step: &str, error: &io::Error) -> Report {
    tracing::error!(%error, step, "terminal setup failed");
    eprintln!("Failed to {step}: {error}");
    eyre!("failed to {step}: {error}")
}

/// Puts the terminal back the way the shell expects it. Never fails; steps
/// that go wrong are reported on stderr and in the log.
pub fn restore_terminal() {
    let failures = restore_to(&mut stdout());
    for failure in &failures {
        eprintln!("Warning: failed to {}: {}", failure.step, failure.error);
    }
    tracing::info!(failed_steps = failures.len(), "terminal restored");
}

#[derive(Debug)]
struct RestoreFailure {
    step: &'static str,
    error: io::Error,
}

fn restore_to<W: Write>(out: &mut W) -> Vec<RestoreFailure> {
    let mut failures = Vec::new();
    let mut record = |step, result: io::Result<()>| {
        if let Err(error) = result {
            tracing::warn!(%error, step, "terminal restore step failed");
            failures.push(RestoreFailure { step, error });
        }
    };

    record("show cursor", execute!(out, cursor::Show));
    record("leave alternate screen", execute!(out, LeaveAlternateScreen));
    record("disable raw mode", disable_raw_mode());
    // The prompt should start on a fresh line.
    record("move to a new line", execute!(out, cursor::MoveToNextLine(1)));

    failures
}
