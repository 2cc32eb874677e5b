use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use crate::constants::*;
use crate::placement::random_free_cell;
use crate::rendering::GameGrid;
use crate::types::{Cell, Direction};

// --- Snake ---
#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Cell>, // Head at the front
    pub direction: Direction,
    pending_growth: u32,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            body: INITIAL_SNAKE.iter().copied().collect(),
            direction: Direction::Right,
            pending_growth: 0,
        }
    }

    /// Builds a snake from explicit segments, head first.
    pub fn from_segments(segments: &[Cell], direction: Direction) -> Self {
        Snake {
            body: segments.iter().copied().collect(),
            direction,
            pending_growth: 0,
        }
    }

    pub fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or(INITIAL_SNAKE[0])
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn grow(&mut self) {
        self.pending_growth += 1;
    }

    pub fn advance(&mut self, size: i32) {
        let new_head = self.head().step(self.direction, size);
        self.body.push_front(new_head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn hits_own_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    /// Drops up to `segments` cells from the tail without going below the starting length.
    /// Returns how many were removed.
    pub fn shrink(&mut self, segments: usize) -> usize {
        let removable = self.body.len().saturating_sub(INITIAL_SNAKE.len()).min(segments);
        for _ in 0..removable {
            self.body.pop_back();
        }
        removable
    }

    pub fn reset(&mut self) {
        *self = Snake::new();
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        for (i, &segment) in self.body.iter().enumerate().rev() {
            let glyph = if i == 0 {
                match self.direction {
                    Direction::Up => "/\\",
                    Direction::Down => "\\/",
                    Direction::Left => "<:",
                    Direction::Right => ":>",
                }
            } else {
                "()"
            };
            game_grid.set_cell(segment, glyph);
        }
    }
}

// --- Food ---
#[derive(Clone, Copy, Debug)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    pub fn new(position: Cell) -> Self {
        Food { position }
    }

    /// Moves the food to a random cell rejected by none of `blocked`.
    /// Keeps the old position when the board has no room left.
    pub fn respawn(&mut self, rng: &mut impl Rng, blocked: impl Fn(Cell) -> bool) {
        if let Some(cell) = random_free_cell(rng, GRID_SIZE, blocked) {
            self.position = cell;
        }
        debug!("Food placed at ({}, {})", self.position.x, self.position.y);
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.set_cell(self.position, "<>");
    }
}

// --- Obstacle ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    pub position: Cell,
}

impl Obstacle {
    pub fn new(position: Cell) -> Self {
        Obstacle { position }
    }

    /// Replaces `obstacles` with a fresh layout of 1 to 4 blocks, none of them on
    /// the snake, the food, or each other.
    pub fn regenerate(obstacles: &mut Vec<Obstacle>, rng: &mut impl Rng, snake: &Snake, food: Cell) {
        obstacles.clear();
        let count = rng.gen_range(MIN_OBSTACLES..=MAX_OBSTACLES);
        for _ in 0..count {
            let taken = |cell: Cell| {
                snake.occupies(cell) || cell == food || obstacles.iter().any(|o| o.position == cell)
            };
            match random_free_cell(rng, GRID_SIZE, taken) {
                Some(cell) => obstacles.push(Obstacle::new(cell)),
                None => break,
            }
        }
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.set_cell(self.position, "##");
    }
}
