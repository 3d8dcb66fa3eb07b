use std::fmt;

use crate::core::game::SpawnRoll;

/// Circle radius, in percent of the playfield
pub const CIRCLE_RADIUS: f64 = 3.0;
/// Rect edge length, in percent of the playfield
pub const RECT_SIZE: f64 = 6.0;
/// An object whose `y` passes this line is missed
pub const MISS_LINE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A falling shape. `x` and `y` are percentages of the playfield; `x` never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingObject {
    pub id: ObjectId,
    pub shape: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

impl FallingObject {
    pub fn spawn(id: ObjectId, roll: SpawnRoll) -> Self {
        Self {
            id,
            shape: roll.shape,
            x: roll.x,
            y: 0.0,
            speed: roll.speed,
        }
    }

    pub fn is_missed(&self) -> bool {
        self.y > MISS_LINE
    }

    /// Hit test in playfield percent. `slack_x`/`slack_y` widen the shape on each axis.
    pub fn contains(&self, px: f64, py: f64, slack_x: f64, slack_y: f64) -> bool {
        match self.shape {
            // Circles are centered on (x, y)
            ShapeKind::Circle => {
                let rx = CIRCLE_RADIUS + slack_x;
                let ry = CIRCLE_RADIUS + slack_y;
                let dx = (px - self.x) / rx;
                let dy = (py - self.y) / ry;
                dx * dx + dy * dy <= 1.0
            }
            // Rects hang from their top-left corner
            ShapeKind::Rect => {
                px >= self.x - slack_x
                    && px <= self.x + RECT_SIZE + slack_x
                    && py >= self.y - slack_y
                    && py <= self.y + RECT_SIZE + slack_y
            }
        }
    }
}

/// State of one play-through
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSession {
    score: u32,
    objects: Vec<FallingObject>,
    is_over: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Live objects in spawn order
    pub fn objects(&self) -> &[FallingObject] {
        &self.objects
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    pub fn push(&mut self, object: FallingObject) {
        if self.is_over {
            return;
        }
        self.objects.push(object);
    }

    /// Moves every object down by its own speed.
    pub fn advance(&mut self) {
        if self.is_over {
            return;
        }
        for object in &mut self.objects {
            object.y += object.speed;
        }
    }

    /// Flags the session over if anything crossed the miss line. Returns the new `is_over`.
    pub fn check_missed(&mut self) -> bool {
        if !self.is_over && self.objects.iter().any(FallingObject::is_missed) {
            self.is_over = true;
        }
        self.is_over
    }

    /// Removes `id` and scores it. Stale ids are ignored. Objects left on
    /// screen after a miss can still be caught.
    pub fn catch(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.objects.iter().position(|o| o.id == id) else {
            return false;
        };
        self.objects.remove(index);
        self.score += 1;
        true
    }

    pub fn restart(&mut self) {
        self.score = 0;
        self.objects.clear();
        self.is_over = false;
    }

    /// Topmost (latest spawned) live object under the point, if any.
    pub fn object_at(&self, px: f64, py: f64, slack_x: f64, slack_y: f64) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.contains(px, py, slack_x, slack_y))
            .map(|o| o.id)
    }
}
