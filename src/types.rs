#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Folds the cell back onto a `size` x `size` torus.
    pub fn wrapped(self, size: i32) -> Self {
        Cell::new(wrap_coordinate(self.x, size), wrap_coordinate(self.y, size))
    }

    pub fn step(self, direction: Direction, size: i32) -> Self {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy).wrapped(size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

pub fn wrap_coordinate(value: i32, max: i32) -> i32 {
    value.rem_euclid(max)
}
