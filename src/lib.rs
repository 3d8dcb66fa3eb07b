pub mod core {
	pub mod audio;
	pub mod config;
	pub mod engine;
	pub mod game;
	pub mod scheduler;
	pub mod terminal;
}

pub mod cli;
pub mod games;

// Re-export for convenience
pub use crate::core::engine::Engine;
pub use crate::games::shapefall::{Controller, GameSession};
