use std::time::Duration;

use crate::types::Cell;

// --- Board ---
pub const GRID_SIZE: i32 = 25; // Cells per side, the board is square
pub const INITIAL_SNAKE: [Cell; 3] = [Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)];

// --- Difficulty ---
pub const INITIAL_UPDATE_INTERVAL: Duration = Duration::from_millis(150);
pub const SPEED_INCREASE_FACTOR: f64 = 0.02; // Fraction of the initial interval removed per food
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(50);

// --- Obstacles ---
pub const OBSTACLE_CHANGE_SCORE: u32 = 10; // New obstacle layout every 10 points
pub const MIN_OBSTACLES: usize = 1;
pub const MAX_OBSTACLES: usize = 4;

// --- Power-ups ---
pub const POWERUP_SPAWN_CHANCE: f64 = 0.02; // Per tick, while no pickup is on the board
pub const POWERUP_PICKUP_LIFETIME: u32 = 60; // Ticks before an uncollected pickup vanishes
pub const GHOST_DURATION: u32 = 30;
pub const SLOW_MOTION_DURATION: u32 = 40;
pub const DOUBLE_SCORE_DURATION: u32 = 50;
pub const SLOW_MOTION_FACTOR: f64 = 1.5;
pub const SHRINK_SEGMENTS: usize = 3;

// --- Input ---
pub const INPUT_QUEUE_CAPACITY: usize = 2;
pub const POLL_INTERVAL: Duration = Duration::from_millis(8); // ~120 polls per second

// --- Rendering ---
pub const CELL_WIDTH: u16 = 2; // Terminal cells are roughly twice as tall as wide
pub const BOARD_OFFSET_X: u16 = 1;
pub const BOARD_OFFSET_Y: u16 = 2;
