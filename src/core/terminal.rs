/// Terminal setup and teardown for the game screen
use std::io::stdout;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::DefaultTerminal;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalGuard {
    terminal: DefaultTerminal,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        let terminal = ratatui::try_init().context("initializing terminal")?;
        if let Err(e) = crossterm::execute!(stdout(), EnableMouseCapture) {
            ratatui::restore();
            return Err(e).context("enabling mouse capture");
        }
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best effort, there is nowhere left to report to
        let _ = crossterm::execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
    }
}
