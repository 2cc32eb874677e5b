use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::Cell;

/// Picks a uniformly random cell of the `size` x `size` board for which
/// `blocked` returns false. Returns `None` once every cell is blocked.
pub fn random_free_cell(rng: &mut impl Rng, size: i32, blocked: impl Fn(Cell) -> bool) -> Option<Cell> {
    let free: Vec<Cell> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Cell::new(x, y)))
        .filter(|&cell| !blocked(cell))
        .collect();
    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn never_returns_a_blocked_cell() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let cell = random_free_cell(&mut rng, 5, |c| c.x < 4).unwrap();
            assert_eq!(cell.x, 4);
            assert!((0..5).contains(&cell.y));
        }
    }

    #[test]
    fn full_board_yields_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(random_free_cell(&mut rng, 4, |_| true), None);
    }

    #[test]
    fn single_free_cell_is_found() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let target = Cell::new(2, 3);
        assert_eq!(random_free_cell(&mut rng, 4, |c| c != target), Some(target));
    }
}
