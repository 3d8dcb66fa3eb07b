use anyhow::{Context, Result};
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::core::config::GameConfig;
use crate::core::scheduler::{TickKind, TickSchedule};
use crate::games::shapefall::{renderer, Controller, GameSession, ScreenLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Single-threaded loop that owns the controller. Ticks, clicks and keys are
/// applied one at a time, in arrival order.
pub struct Engine {
    controller: Controller,
    config: GameConfig,
    schedule: Option<TickSchedule>,
    tick_tx: UnboundedSender<TickKind>,
    tick_rx: UnboundedReceiver<TickKind>,
    layout: ScreenLayout,
}

impl Engine {
    pub fn new(controller: Controller, config: GameConfig) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            config,
            schedule: None,
            tick_tx,
            tick_rx,
            layout: ScreenLayout::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        self.controller.session()
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    pub fn is_ticking(&self) -> bool {
        self.schedule.as_ref().is_some_and(TickSchedule::is_running)
    }

    /// Starts the tick schedule if the session is live. Needs a tokio runtime.
    pub fn start(&mut self) {
        if self.schedule.is_some() || self.controller.session().is_over() {
            return;
        }
        self.schedule = Some(TickSchedule::start(
            self.config.spawn_interval(),
            self.config.motion_interval(),
            self.tick_tx.clone(),
        ));
    }

    fn stop(&mut self) {
        if let Some(schedule) = self.schedule.take() {
            schedule.stop();
        }
        // Ticks already queued belong to the stopped schedule
        while self.tick_rx.try_recv().is_ok() {}
    }

    pub fn handle_tick(&mut self, kind: TickKind) {
        match kind {
            TickKind::Spawn => self.controller.spawn_tick(),
            TickKind::Motion => self.controller.motion_tick(),
        }
        if self.controller.session().is_over() && self.schedule.is_some() {
            info!(score = self.controller.session().score(), "stopping ticks at game over");
            self.stop();
        }
    }

    /// Applies every tick waiting in the queue. Returns how many were applied.
    pub fn drain_ticks(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(kind) = self.tick_rx.try_recv() {
            self.handle_tick(kind);
            applied += 1;
        }
        applied
    }

    pub fn restart(&mut self) {
        self.stop();
        self.controller.restart_game();
        self.start();
    }

    /// Routes a click at terminal cell (`col`, `row`).
    pub fn tap(&mut self, col: u16, row: u16) {
        if self.controller.session().is_over() && self.layout.hits_restart(col, row) {
            self.restart();
            return;
        }
        let Some((px, py)) = self.layout.to_playfield(col, row) else {
            return;
        };
        let (slack_x, slack_y) = self.layout.cell_slack();
        match self.controller.session().object_at(px, py, slack_x, slack_y) {
            Some(id) => {
                self.controller.catch_object(id);
            }
            None => debug!(col, row, "click hit nothing"),
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> Flow {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                self.tap(*column, *row);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Flow::Quit,
            KeyCode::Char('r') => {
                if self.controller.session().is_over() {
                    self.restart();
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.layout = renderer::draw(frame, self.controller.session());
    }

    /// Runs until the player quits. Returns the score on exit.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<u32> {
        self.start();
        info!("session started");

        let mut events = EventStream::new();
        let mut render_timer = tokio::time::interval(self.config.render_interval());

        loop {
            tokio::select! {
                Some(kind) = self.tick_rx.recv() => self.handle_tick(kind),

                event = events.next() => match event {
                    Some(Ok(event)) => {
                        if self.handle_event(&event) == Flow::Quit {
                            break;
                        }
                    }
                    Some(Err(e)) => return Err(e).context("reading terminal events"),
                    None => break,
                },

                _ = render_timer.tick() => {
                    terminal.draw(|f| self.render(f)).context("drawing frame")?;
                }
            }
        }

        self.stop();
        Ok(self.controller.session().score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::SoundHandle;
    use crate::core::game::{RandomSource, SpawnRoll};
    use crate::games::shapefall::ShapeKind;
    use crossterm::event::KeyEventState;

    struct Fixed;

    impl RandomSource for Fixed {
        fn roll(&mut self) -> SpawnRoll {
            SpawnRoll { shape: ShapeKind::Rect, x: 40.0, speed: 2.0 }
        }
    }

    fn engine() -> Engine {
        Engine::new(Controller::new(Fixed, SoundHandle::silent()), GameConfig::default())
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn quit_keys() {
        let mut e = engine();
        assert_eq!(e.handle_event(&key(KeyCode::Esc, KeyModifiers::NONE)), Flow::Quit);
        assert_eq!(e.handle_event(&key(KeyCode::Char('q'), KeyModifiers::NONE)), Flow::Quit);
        assert_eq!(e.handle_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Flow::Quit);
        assert_eq!(e.handle_event(&key(KeyCode::Char('c'), KeyModifiers::NONE)), Flow::Continue);
    }

    #[test]
    fn restart_key_is_ignored_while_playing() {
        let mut e = engine();
        e.handle_tick(TickKind::Spawn);
        e.handle_event(&key(KeyCode::Char('r'), KeyModifiers::NONE));
        assert_eq!(e.session().objects().len(), 1);
    }

    #[test]
    fn click_outside_playfield_does_nothing() {
        let mut e = engine();
        e.handle_tick(TickKind::Spawn);
        e.tap(0, 0);
        assert_eq!(e.session().objects().len(), 1);
        assert_eq!(e.session().score(), 0);
    }
}
