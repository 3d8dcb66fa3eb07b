/// Collaborator seams for the shapefall core
use rand::Rng;

use crate::games::shapefall::ShapeKind;

/// Rightmost spawn position, in percent of playfield width
pub const SPAWN_X_MAX: f64 = 90.0;
/// Slowest fall speed, in percent of playfield height per motion tick
pub const SPEED_MIN: f64 = 1.0;
/// Upper (exclusive) bound for fall speed
pub const SPEED_MAX: f64 = 3.0;

/// Random attributes of one freshly spawned object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRoll {
    pub shape: ShapeKind,
    pub x: f64,
    pub speed: f64,
}

/// Source of spawn randomness, injected so tests can script it
pub trait RandomSource: Send {
    fn roll(&mut self) -> SpawnRoll;
}

/// Adapts any `rand` generator into a `RandomSource`
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng + Send> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn roll(&mut self) -> SpawnRoll {
        let shape = if self.rng.random_bool(0.5) {
            ShapeKind::Circle
        } else {
            ShapeKind::Rect
        };
        SpawnRoll {
            shape,
            x: self.rng.random_range(0.0..=SPAWN_X_MAX),
            speed: self.rng.random_range(SPEED_MIN..SPEED_MAX),
        }
    }
}

/// Audio collaborator. Called off the game loop; errors are logged, never surfaced.
pub trait SoundPlayer: Send + Sync + 'static {
    fn play_catch(&self) -> anyhow::Result<()>;
}
