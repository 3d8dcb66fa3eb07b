/// Fire-and-forget sound dispatch
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, warn};

use crate::core::game::SoundPlayer;

/// Rings the terminal bell
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play_catch(&self) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(b"\x07").context("writing bell")?;
        out.flush().context("flushing bell")?;
        Ok(())
    }
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play_catch(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Cheap handle the controller uses to trigger sounds without waiting on them.
#[derive(Clone)]
pub struct SoundHandle {
    player: Arc<dyn SoundPlayer>,
}

impl SoundHandle {
    pub fn new(player: impl SoundPlayer) -> Self {
        Self { player: Arc::new(player) }
    }

    pub fn silent() -> Self {
        Self::new(Silent)
    }

    /// Dispatches the catch sound and returns immediately. Runs on tokio's
    /// blocking pool when a runtime is around, on a detached thread otherwise.
    pub fn play_catch(&self) {
        let player = Arc::clone(&self.player);
        let play = move || {
            if let Err(error) = player.play_catch() {
                warn!(?error, "catch sound failed");
            }
        };
        // Detached either way: the join handles are dropped on purpose
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn_blocking(play);
            }
            Err(_) => {
                debug!("no runtime; playing catch sound on a thread");
                std::thread::spawn(play);
            }
        }
    }
}

impl std::fmt::Debug for SoundHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundHandle").finish_non_exhaustive()
    }
}
