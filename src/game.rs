use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::*;
use crate::entities::{Food, Obstacle, Snake};
use crate::placement::random_free_cell;
use crate::powerups::{PowerUp, PowerUpKind, PowerUpQueue};
use crate::types::{Cell, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    HitSelf,
    HitObstacle,
}

/// What happened during one update, for the HUD and the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    AteFood { score: u32 },
    ObstaclesChanged { count: usize },
    PowerUpSpawned { kind: PowerUpKind, position: Cell },
    PowerUpCollected(PowerUpKind),
    PowerUpFaded(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    GameOver { score: u32, cause: GameOverCause },
}

pub struct Game {
    pub snake: Snake,
    pub food: Food,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<PowerUp>,
    pub powerups: PowerUpQueue,
    pub running: bool,
    pub score: u32,
    pub best_score: u32,
    pub spawn_powerups: bool,
    update_interval: Duration,
    input_queue: VecDeque<Direction>,
    rng: ChaCha8Rng,
    ticks: u64,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let mut game = Game {
            snake: Snake::new(),
            food: Food::new(Cell::new(0, 0)),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            powerups: PowerUpQueue::new(),
            running: true,
            score: 0,
            best_score: 0,
            spawn_powerups: true,
            update_interval: INITIAL_UPDATE_INTERVAL,
            input_queue: VecDeque::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            ticks: 0,
        };
        game.respawn_food();
        game
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Base interval after difficulty scaling, before power-up modifiers.
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Interval the loop should wait before the next update.
    pub fn tick_interval(&self) -> Duration {
        if self.powerups.is_active(PowerUpKind::SlowMotion) {
            scale(self.update_interval, SLOW_MOTION_FACTOR)
        } else {
            self.update_interval
        }
    }

    /// Buffers a direction change for the coming updates. Reversing onto the
    /// neck is refused; any other key press also wakes a halted game.
    pub fn steer(&mut self, direction: Direction) -> bool {
        let last = self.input_queue.back().copied().unwrap_or(self.snake.direction);
        if direction == last.opposite() {
            return false;
        }
        if direction != last {
            if self.input_queue.len() >= INPUT_QUEUE_CAPACITY {
                return false;
            }
            self.input_queue.push_back(direction);
        }
        if !self.running {
            info!("Resuming play heading {:?}", direction);
        }
        self.running = true;
        true
    }

    pub fn update(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }
        self.ticks += 1;

        if let Some(next) = self.input_queue.pop_front() {
            if next != self.snake.direction.opposite() {
                self.snake.direction = next;
            }
        }
        self.snake.advance(GRID_SIZE);
        let head = self.snake.head();
        debug!("Tick {}: head at ({}, {})", self.ticks, head.x, head.y);

        if head == self.food.position {
            self.eat_food(&mut events);
        }
        self.collect_pickup(head, &mut events);

        if !self.powerups.is_active(PowerUpKind::Ghost) {
            if self.snake.hits_own_body() {
                self.game_over(GameOverCause::HitSelf, &mut events);
                return events;
            }
            if self.obstacles.iter().any(|o| o.position == head) {
                self.game_over(GameOverCause::HitObstacle, &mut events);
                return events;
            }
        }

        self.age_pickups(&mut events);
        self.spawn_pickup(&mut events);
        if let Some(kind) = self.powerups.tick() {
            events.push(GameEvent::PowerUpExpired(kind));
        }
        events
    }

    fn eat_food(&mut self, events: &mut Vec<GameEvent>) {
        let points = if self.powerups.is_active(PowerUpKind::DoubleScore) { 2 } else { 1 };
        let previous = self.score;
        self.score += points;
        self.snake.grow();
        self.speed_up();
        self.respawn_food();
        events.push(GameEvent::AteFood { score: self.score });

        if self.score / OBSTACLE_CHANGE_SCORE > previous / OBSTACLE_CHANGE_SCORE {
            Obstacle::regenerate(&mut self.obstacles, &mut self.rng, &self.snake, self.food.position);
            let obstacles = &self.obstacles;
            self.pickups.retain(|p| obstacles.iter().all(|o| o.position != p.position));
            events.push(GameEvent::ObstaclesChanged { count: self.obstacles.len() });
        }
    }

    fn speed_up(&mut self) {
        let step = scale(INITIAL_UPDATE_INTERVAL, SPEED_INCREASE_FACTOR);
        self.update_interval = self.update_interval.saturating_sub(step).max(MIN_UPDATE_INTERVAL);
    }

    fn respawn_food(&mut self) {
        let snake = &self.snake;
        let obstacles = &self.obstacles;
        let pickups = &self.pickups;
        self.food.respawn(&mut self.rng, |cell| {
            snake.occupies(cell)
                || obstacles.iter().any(|o| o.position == cell)
                || pickups.iter().any(|p| p.position == cell)
        });
    }

    fn collect_pickup(&mut self, head: Cell, events: &mut Vec<GameEvent>) {
        let Some(index) = self.pickups.iter().position(|p| p.position == head) else {
            return;
        };
        let pickup = self.pickups.swap_remove(index);
        match pickup.kind {
            PowerUpKind::Shrink => {
                self.snake.shrink(SHRINK_SEGMENTS);
            }
            kind => self.powerups.push(kind),
        }
        events.push(GameEvent::PowerUpCollected(pickup.kind));
    }

    fn age_pickups(&mut self, events: &mut Vec<GameEvent>) {
        self.pickups.retain_mut(|pickup| {
            pickup.ticks_remaining = pickup.ticks_remaining.saturating_sub(1);
            if pickup.ticks_remaining == 0 {
                events.push(GameEvent::PowerUpFaded(pickup.kind));
                false
            } else {
                true
            }
        });
    }

    fn spawn_pickup(&mut self, events: &mut Vec<GameEvent>) {
        if !self.spawn_powerups || !self.pickups.is_empty() || !self.rng.gen_bool(POWERUP_SPAWN_CHANCE) {
            return;
        }
        let kind = PowerUpKind::random(&mut self.rng);
        let snake = &self.snake;
        let obstacles = &self.obstacles;
        let food = self.food.position;
        let taken = |cell: Cell| {
            snake.occupies(cell) || cell == food || obstacles.iter().any(|o| o.position == cell)
        };
        if let Some(position) = random_free_cell(&mut self.rng, GRID_SIZE, taken) {
            self.pickups.push(PowerUp::new(position, kind));
            events.push(GameEvent::PowerUpSpawned { kind, position });
        }
    }

    fn game_over(&mut self, cause: GameOverCause, events: &mut Vec<GameEvent>) {
        let final_score = self.score;
        self.best_score = self.best_score.max(final_score);
        self.snake.reset();
        self.input_queue.clear();
        self.obstacles.clear();
        self.pickups.clear();
        self.powerups.clear();
        self.respawn_food();
        self.running = false;
        self.score = 0;
        self.update_interval = INITIAL_UPDATE_INTERVAL;
        events.push(GameEvent::GameOver { score: final_score, cause });
    }
}

/// Scales a duration, rounded to the nearest microsecond.
fn scale(duration: Duration, factor: f64) -> Duration {
    Duration::from_micros((duration.as_micros() as f64 * factor).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_game() -> Game {
        let mut game = Game::new(42);
        game.spawn_powerups = false;
        game.food.position = Cell::new(20, 20);
        game
    }

    #[test]
    fn new_game_places_food_off_the_snake() {
        for seed in 0..50 {
            let game = Game::new(seed);
            assert!(!game.snake.occupies(game.food.position));
            assert!(game.running);
            assert_eq!(game.tick_interval(), INITIAL_UPDATE_INTERVAL);
        }
    }

    #[test]
    fn halted_game_does_not_move() {
        let mut game = quiet_game();
        game.running = false;
        let head = game.snake.head();
        assert!(game.update().is_empty());
        assert_eq!(game.snake.head(), head);
        assert_eq!(game.ticks(), 0);
    }

    #[test]
    fn steer_refuses_reversal_and_queues_at_most_two() {
        let mut game = quiet_game();
        assert!(!game.steer(Direction::Left));
        assert!(game.steer(Direction::Up));
        // Left is no longer a reversal once Up is queued.
        assert!(game.steer(Direction::Left));
        assert!(!game.steer(Direction::Down));
        game.update();
        assert_eq!(game.snake.direction, Direction::Up);
        game.update();
        assert_eq!(game.snake.direction, Direction::Left);
    }

    #[test]
    fn steer_wakes_a_halted_game() {
        let mut game = quiet_game();
        game.running = false;
        assert!(!game.steer(Direction::Left));
        assert!(!game.running);
        assert!(game.steer(Direction::Right));
        assert!(game.running);
    }

    #[test]
    fn speed_up_is_floored() {
        let mut game = quiet_game();
        for _ in 0..100 {
            game.speed_up();
        }
        assert_eq!(game.update_interval(), MIN_UPDATE_INTERVAL);
    }

    #[test]
    fn slow_motion_stretches_the_interval() {
        let mut game = quiet_game();
        game.powerups.push(PowerUpKind::SlowMotion);
        assert_eq!(game.tick_interval(), Duration::from_millis(225));
    }

    #[test]
    fn pickups_fade_when_left_alone() {
        let mut game = quiet_game();
        game.pickups.push(PowerUp::new(Cell::new(0, 0), PowerUpKind::Ghost));
        let mut faded = false;
        for _ in 0..POWERUP_PICKUP_LIFETIME {
            faded |= game.update().contains(&GameEvent::PowerUpFaded(PowerUpKind::Ghost));
        }
        assert!(faded);
        assert!(game.pickups.is_empty());
    }
}
