use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::error;

use crate::types::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
}

pub fn command_for(event: &Event) -> Option<Command> {
    let Event::Key(KeyEvent { code, kind, .. }) = event else {
        return None;
    };
    if *kind == KeyEventKind::Release {
        return None;
    }
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Steer(Direction::Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Where key presses come from: the real terminal or a replayed script.
pub enum InputSource {
    Terminal,
    Simulated(SimulatedInput),
}

impl InputSource {
    /// Drains every pending event for this frame, waiting at most `timeout` for the first.
    pub fn commands(&mut self, frame_count: u64, timeout: Duration) -> io::Result<Vec<Command>> {
        let mut events = Vec::new();
        match self {
            InputSource::Terminal => {
                let mut wait = timeout;
                while event::poll(wait).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                    events.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
                    wait = Duration::ZERO;
                }
            }
            InputSource::Simulated(sim_input) => {
                if sim_input.poll(frame_count) {
                    events.push(sim_input.read());
                }
            }
        }
        Ok(events.iter().filter_map(command_for).collect())
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    /// A short scripted run: a loop around the board, then quit.
    pub fn demo_script(quit_frame: u64) -> Self {
        let mut events = HashMap::new();
        events.insert(40, Event::Key(KeyCode::Down.into()));
        events.insert(80, Event::Key(KeyCode::Left.into()));
        events.insert(120, Event::Key(KeyCode::Up.into()));
        events.insert(160, Event::Key(KeyCode::Right.into()));
        events.insert(quit_frame, Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> bool {
        self.current_frame = frame_count;
        self.events.contains_key(&frame_count)
    }

    pub fn read(&mut self) -> Event {
        self.events
            .remove(&self.current_frame)
            .unwrap_or(Event::Key(KeyCode::Null.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(command_for(&Event::Key(KeyCode::Up.into())), Some(Command::Steer(Direction::Up)));
        assert_eq!(command_for(&Event::Key(KeyCode::Char('a').into())), Some(Command::Steer(Direction::Left)));
        assert_eq!(command_for(&Event::Key(KeyCode::Esc.into())), Some(Command::Quit));
        assert_eq!(command_for(&Event::Key(KeyCode::Char('x').into())), None);
        assert_eq!(command_for(&Event::FocusGained), None);
    }

    #[test]
    fn simulated_input_replays_each_event_once() {
        let mut input = InputSource::Simulated(SimulatedInput::demo_script(200));
        assert!(input.commands(39, Duration::ZERO).unwrap().is_empty());
        assert_eq!(input.commands(40, Duration::ZERO).unwrap(), vec![Command::Steer(Direction::Down)]);
        assert_eq!(input.commands(200, Duration::ZERO).unwrap(), vec![Command::Quit]);
    }
}
