use tracing::{debug, info};

use super::game::{FallingObject, GameSession, ObjectId};
use crate::core::audio::SoundHandle;
use crate::core::game::RandomSource;

/// Owns the session and reacts to spawn ticks, motion ticks, taps and restarts.
pub struct Controller {
    session: GameSession,
    source: Box<dyn RandomSource>,
    sound: SoundHandle,
    next_id: u64,
}

impl Controller {
    pub fn new(source: impl RandomSource + 'static, sound: SoundHandle) -> Self {
        Self {
            session: GameSession::new(),
            source: Box::new(source),
            sound,
            next_id: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn spawn_tick(&mut self) {
        if self.session.is_over() {
            return;
        }
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let object = FallingObject::spawn(id, self.source.roll());
        debug!(%id, shape = ?object.shape, x = object.x, speed = object.speed, "spawned");
        self.session.push(object);
    }

    /// Advances every object, then checks for a miss.
    pub fn motion_tick(&mut self) {
        if self.session.is_over() {
            return;
        }
        self.session.advance();
        self.check_missed();
    }

    pub fn check_missed(&mut self) -> bool {
        let was_over = self.session.is_over();
        let over = self.session.check_missed();
        if over && !was_over {
            info!(score = self.session.score(), "game over");
        }
        over
    }

    /// Scores `id` if it is still live. Returns whether anything was caught.
    pub fn catch_object(&mut self, id: ObjectId) -> bool {
        if !self.session.contains(id) {
            debug!(%id, "ignored stale catch");
            return false;
        }
        self.session.catch(id);
        self.sound.play_catch();
        debug!(%id, score = self.session.score(), "caught");
        true
    }

    pub fn restart_game(&mut self) {
        self.session.restart();
        info!("session restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game::SpawnRoll;
    use crate::games::shapefall::ShapeKind;

    struct Fixed(SpawnRoll);

    impl RandomSource for Fixed {
        fn roll(&mut self) -> SpawnRoll {
            self.0
        }
    }

    fn controller(speed: f64) -> Controller {
        Controller::new(
            Fixed(SpawnRoll { shape: ShapeKind::Circle, x: 10.0, speed }),
            SoundHandle::silent(),
        )
    }

    #[test]
    fn ids_are_unique_across_restarts() {
        let mut c = controller(1.0);
        c.spawn_tick();
        c.spawn_tick();
        let first: Vec<ObjectId> = c.session().objects().iter().map(|o| o.id).collect();
        c.restart_game();
        c.spawn_tick();
        let after = c.session().objects()[0].id;
        assert!(!first.contains(&after));
    }

    #[test]
    fn motion_tick_detects_miss_in_the_same_call() {
        let mut c = controller(60.0);
        c.spawn_tick();
        c.motion_tick();
        assert!(!c.session().is_over());
        c.motion_tick();
        assert!(c.session().is_over());
    }

    #[test]
    fn check_missed_is_stable_once_over() {
        let mut c = controller(101.0);
        c.spawn_tick();
        c.motion_tick();
        assert!(c.check_missed());
        assert!(c.check_missed());
    }

    #[test]
    fn survivor_can_be_caught_after_game_over() {
        let mut c = controller(60.0);
        c.spawn_tick();
        c.motion_tick();
        c.spawn_tick();
        c.motion_tick();
        assert!(c.session().is_over());

        let survivor = c.session().objects()[1].id;
        assert!(c.catch_object(survivor));
        assert_eq!(c.session().score(), 1);
        assert_eq!(c.session().objects().len(), 1);
        assert!(c.session().is_over());
    }

    #[test]
    fn catch_before_motion_wins_the_race() {
        let mut c = controller(2.0);
        c.spawn_tick();
        for _ in 0..50 {
            c.motion_tick();
        }
        // y == 100.0, one more tick would miss
        let id = c.session().objects()[0].id;
        assert!(c.catch_object(id));
        c.motion_tick();
        assert!(!c.session().is_over());
        assert_eq!(c.session().score(), 1);
    }
}
