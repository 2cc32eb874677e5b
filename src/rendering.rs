use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::{CELL_WIDTH, GRID_SIZE};
use crate::types::Cell;

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            row.fill(' ');
        }
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect::<String>())
            .unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>().trim_end());
        }
        info!("---------------------");
    }
}

// --- OutputTarget: real terminal or in-memory buffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Cursor and screen modes mean nothing here
        }
    }

    pub fn write_at(&mut self, x: u16, y: u16, text: &str) -> io::Result<()> {
        self.execute_move_to(MoveTo(x, y))?;
        write!(self, "{}", text)
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                let s = String::from_utf8_lossy(buf);
                sb.write_str(&s);
                Ok(buf.len())
            },
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: the board plus its border, as characters ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl Default for GameGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl GameGrid {
    pub fn new() -> Self {
        let width = GRID_SIZE as u16 * CELL_WIDTH + 2;
        let height = GRID_SIZE as u16 + 2;
        let mut game_grid = GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        };
        game_grid.draw_border();
        game_grid
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    /// Writes a glyph into a board cell; each cell is `CELL_WIDTH` characters wide.
    pub fn set_cell(&mut self, cell: Cell, glyph: &str) {
        if cell.x < 0 || cell.y < 0 || cell.x >= GRID_SIZE || cell.y >= GRID_SIZE {
            return;
        }
        let x = 1 + cell.x as u16 * CELL_WIDTH;
        let y = 1 + cell.y as u16;
        for (i, c) in glyph.chars().take(CELL_WIDTH as usize).enumerate() {
            self.set_char(x + i as u16, y, c);
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
        self.draw_border();
    }

    fn draw_border(&mut self) {
        let (right, bottom) = (self.width - 1, self.height - 1);
        for x in 1..right {
            self.set_char(x, 0, '-');
            self.set_char(x, bottom, '-');
        }
        for y in 1..bottom {
            self.set_char(0, y, '|');
            self.set_char(right, y, '|');
        }
        for (x, y) in [(0, 0), (right, 0), (0, bottom), (right, bottom)] {
            self.set_char(x, y, '+');
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget, origin_x: u16, origin_y: u16) -> io::Result<()> {
        for y in 0..self.height {
            stdout.write_at(origin_x, origin_y + y, &self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(stdout: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
        let blank = " ".repeat(terminal_width as usize);
        for y in 0..terminal_height {
            stdout.write_at(0, y, &blank)?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cell_lands_inside_the_border() {
        let mut game_grid = GameGrid::new();
        game_grid.set_cell(Cell::new(0, 0), "ab");
        assert_eq!(game_grid.grid[1][1], 'a');
        assert_eq!(game_grid.grid[1][2], 'b');
        assert_eq!(game_grid.grid[0][0], '+');
        game_grid.set_cell(Cell::new(GRID_SIZE, 0), "zz");
        assert!(game_grid.grid.iter().flatten().all(|&c| c != 'z'));
    }

    #[test]
    fn clear_keeps_the_border() {
        let mut game_grid = GameGrid::new();
        game_grid.set_cell(Cell::new(3, 3), "##");
        game_grid.clear();
        assert!(game_grid.grid[4].iter().filter(|&&c| c == '#').count() == 0);
        assert_eq!(game_grid.grid[4][0], '|');
    }

    #[test]
    fn screen_buffer_clips_writes() {
        let mut target = OutputTarget::ScreenBuffer(ScreenBuffer::new(5, 2));
        target.write_at(3, 1, "hello").unwrap();
        if let OutputTarget::ScreenBuffer(sb) = &target {
            assert_eq!(sb.row(1), "   he");
        }
    }
}
