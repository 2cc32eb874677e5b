pub mod app;
pub mod config;
pub mod constants;
pub mod entities;
pub mod game;
pub mod placement;
pub mod powerups;
pub mod rendering;
pub mod terminal_io;
pub mod timer;
pub mod types;

pub use game::{Game, GameEvent, GameOverCause};
pub use types::{Cell, Direction};
