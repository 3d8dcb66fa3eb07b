/// Shapefall: tap the falling shapes before they reach the bottom
pub mod controller;
pub mod game;
pub mod renderer;

pub use controller::Controller;
pub use game::{FallingObject, GameSession, ObjectId, ShapeKind};
pub use renderer::ScreenLayout;
