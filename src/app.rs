use std::io::{self, Write};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::constants::*;
use crate::game::{Game, GameEvent, GameOverCause};
use crate::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use crate::terminal_io::{Command, InputSource};
use crate::timer::UpdateGate;

const BANNER_FRAMES: u64 = 240; // About two seconds at the polling rate
const HUD_LINES: u16 = 3;

pub struct App {
    pub stdout_target: OutputTarget,
    input: InputSource,
    debug_mode_active: bool,
    max_frames: Option<u64>,
    game_grid: GameGrid,
    banner: Option<(String, u64)>,
}

impl App {
    pub fn new(stdout_target: OutputTarget, input: InputSource, debug_mode_active: bool, max_frames: Option<u64>) -> Self {
        App {
            stdout_target,
            input,
            debug_mode_active,
            max_frames,
            game_grid: GameGrid::new(),
            banner: None,
        }
    }

    /// Terminal area the game needs: title, board with border, HUD.
    pub fn screen_size() -> (u16, u16) {
        let board = GameGrid::new();
        (
            BOARD_OFFSET_X * 2 + board.width,
            BOARD_OFFSET_Y + board.height + HUD_LINES,
        )
    }

    pub fn debug_target() -> OutputTarget {
        let (width, height) = Self::screen_size();
        OutputTarget::ScreenBuffer(ScreenBuffer::new(width, height))
    }

    /// Runs until quit or the frame limit, returning the number of frames played.
    pub fn run(&mut self, game: &mut Game) -> io::Result<u64> {
        let start = Instant::now();
        let mut gate = UpdateGate::new();
        let mut frame_count = 0;

        while self.max_frames.is_none_or(|max| frame_count < max) {
            let commands = self.input.commands(frame_count, POLL_INTERVAL)?;
            if commands.contains(&Command::Quit) {
                info!("Quit requested at frame {}", frame_count);
                break;
            }
            for command in commands {
                if let Command::Steer(direction) = command {
                    game.steer(direction);
                }
            }

            let now = if self.debug_mode_active {
                // Simulated clock: every frame lasts exactly one polling interval.
                Duration::from_millis(POLL_INTERVAL.as_millis() as u64 * frame_count)
            } else {
                start.elapsed()
            };

            let updated = gate.due(now, game.tick_interval());
            if updated {
                for event in game.update() {
                    self.handle_event(event, frame_count);
                }
            }

            if updated || !self.debug_mode_active {
                self.render(game, frame_count)?;
            }
            frame_count += 1;
        }
        Ok(frame_count)
    }

    fn handle_event(&mut self, event: GameEvent, frame_count: u64) {
        let message = match event {
            GameEvent::AteFood { score } => {
                debug!("Food eaten, score {}", score);
                return;
            }
            GameEvent::ObstaclesChanged { count } => {
                info!("Obstacles rearranged: {} on the board", count);
                format!("{} obstacles appeared!", count)
            }
            GameEvent::PowerUpSpawned { kind, position } => {
                info!("{} power-up spawned at ({}, {})", kind.label(), position.x, position.y);
                return;
            }
            GameEvent::PowerUpCollected(kind) => {
                info!("{} power-up collected", kind.label());
                format!("{}!", kind.label())
            }
            GameEvent::PowerUpFaded(kind) => {
                debug!("{} power-up faded before pickup", kind.label());
                return;
            }
            GameEvent::PowerUpExpired(kind) => {
                info!("{} power-up wore off", kind.label());
                format!("{} wore off", kind.label())
            }
            GameEvent::GameOver { score, cause } => {
                info!("Game over ({:?}) with score {}", cause, score);
                let reason = match cause {
                    GameOverCause::HitSelf => "You bit your own tail",
                    GameOverCause::HitObstacle => "You hit an obstacle",
                };
                format!("{}! Final score: {}", reason, score)
            }
        };
        self.banner = Some((message, frame_count + BANNER_FRAMES));
    }

    fn render(&mut self, game: &Game, frame_count: u64) -> io::Result<()> {
        self.game_grid.clear();
        game.food.draw(&mut self.game_grid);
        for pickup in &game.pickups {
            pickup.draw(&mut self.game_grid);
        }
        for obstacle in &game.obstacles {
            obstacle.draw(&mut self.game_grid);
        }
        game.snake.draw(&mut self.game_grid);

        if let OutputTarget::ScreenBuffer(sb) = &mut self.stdout_target {
            sb.clear();
        }

        let line_width = self.game_grid.width as usize;
        self.stdout_target.write_at(BOARD_OFFSET_X, 0, &format!("{:<line_width$}", "Ouroboros"))?;
        self.game_grid.render(&mut self.stdout_target, BOARD_OFFSET_X, BOARD_OFFSET_Y)?;

        let hud_y = BOARD_OFFSET_Y + self.game_grid.height;
        let stats = format!(
            "Score: {}  Best: {}  Step: {} ms",
            game.score,
            game.best_score,
            game.tick_interval().as_millis()
        );
        let power = match game.powerups.active() {
            Some(active) if game.powerups.len() > 1 => format!(
                "Power: {} ({})  +{} queued",
                active.kind.label(),
                active.ticks_remaining,
                game.powerups.len() - 1
            ),
            Some(active) => format!("Power: {} ({})", active.kind.label(), active.ticks_remaining),
            None => "Power: -".to_string(),
        };
        let status = match &self.banner {
            Some((message, until)) if *until > frame_count => message.clone(),
            _ if !game.running => "Press an arrow key to play, q to quit".to_string(),
            _ => String::new(),
        };
        for (i, line) in [stats, power, status].iter().enumerate() {
            self.stdout_target.write_at(BOARD_OFFSET_X, hud_y + i as u16, &format!("{:<line_width$}", line))?;
        }

        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            sb.print_to_log();
        }
        self.stdout_target.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal_io::SimulatedInput;
    use std::collections::HashMap;

    fn debug_app(input: SimulatedInput, max_frames: u64) -> App {
        App::new(App::debug_target(), InputSource::Simulated(input), true, Some(max_frames))
    }

    #[test]
    fn frame_limit_stops_the_loop() {
        let mut game = Game::new(3);
        game.spawn_powerups = false;
        game.food.position = crate::types::Cell::new(20, 20);
        let mut app = debug_app(SimulatedInput::new(HashMap::new()), 100);
        assert_eq!(app.run(&mut game).unwrap(), 100);
        // 100 frames of 8 ms with a 150 ms step: five updates.
        assert_eq!(game.ticks(), 5);
    }

    #[test]
    fn quit_command_ends_the_run_early() {
        let mut game = Game::new(3);
        let mut app = debug_app(SimulatedInput::demo_script(10), 1000);
        assert_eq!(app.run(&mut game).unwrap(), 10);
    }

    #[test]
    fn board_and_hud_are_drawn() {
        let mut game = Game::new(3);
        game.spawn_powerups = false;
        game.food.position = crate::types::Cell::new(20, 20);
        let mut app = debug_app(SimulatedInput::new(HashMap::new()), 20);
        app.run(&mut game).unwrap();
        let OutputTarget::ScreenBuffer(sb) = &app.stdout_target else {
            panic!("debug app renders into a screen buffer");
        };
        assert!(sb.row(0).contains("Ouroboros"));
        assert!(sb.row(BOARD_OFFSET_Y).contains("+---"));
        let hud_y = BOARD_OFFSET_Y + GRID_SIZE as u16 + 2;
        assert!(sb.row(hud_y).starts_with(" Score: 0  Best: 0"));
        assert!((BOARD_OFFSET_Y..hud_y).any(|y| sb.row(y).contains(":>")));
    }
}
