use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::binary_heap::PeekMut;

use rand::Rng;

use crate::constants::*;
use crate::rendering::GameGrid;
use crate::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Head passes through obstacles and the snake's own body.
    Ghost,
    /// Stretches the update interval.
    SlowMotion,
    /// Food is worth two points.
    DoubleScore,
    /// Instant: drops a few tail segments.
    Shrink,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Ghost,
        PowerUpKind::SlowMotion,
        PowerUpKind::DoubleScore,
        PowerUpKind::Shrink,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Higher runs first. Instant kinds never enter the queue.
    pub fn priority(self) -> u8 {
        match self {
            PowerUpKind::Ghost => 3,
            PowerUpKind::SlowMotion => 2,
            PowerUpKind::DoubleScore => 1,
            PowerUpKind::Shrink => 0,
        }
    }

    /// Active ticks for timed kinds, `None` for instant ones.
    pub fn duration(self) -> Option<u32> {
        match self {
            PowerUpKind::Ghost => Some(GHOST_DURATION),
            PowerUpKind::SlowMotion => Some(SLOW_MOTION_DURATION),
            PowerUpKind::DoubleScore => Some(DOUBLE_SCORE_DURATION),
            PowerUpKind::Shrink => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Ghost => "Ghost",
            PowerUpKind::SlowMotion => "Slow Motion",
            PowerUpKind::DoubleScore => "Double Score",
            PowerUpKind::Shrink => "Shrink",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            PowerUpKind::Ghost => "Gh",
            PowerUpKind::SlowMotion => "Sl",
            PowerUpKind::DoubleScore => "x2",
            PowerUpKind::Shrink => "Sh",
        }
    }
}

// --- Pickup lying on the board ---
#[derive(Clone, Copy, Debug)]
pub struct PowerUp {
    pub position: Cell,
    pub kind: PowerUpKind,
    pub ticks_remaining: u32,
}

impl PowerUp {
    pub fn new(position: Cell, kind: PowerUpKind) -> Self {
        PowerUp { position, kind, ticks_remaining: POWERUP_PICKUP_LIFETIME }
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.set_cell(self.position, self.kind.glyph());
    }
}

// --- Collected, timed power-up ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub ticks_remaining: u32,
}

impl Ord for ActivePowerUp {
    fn cmp(&self, other: &Self) -> Ordering {
        // Each kind is queued at most once, so priority alone decides the top.
        self.kind
            .priority()
            .cmp(&other.kind.priority())
            .then(self.ticks_remaining.cmp(&other.ticks_remaining))
    }
}

impl PartialOrd for ActivePowerUp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Collected timed power-ups. Only the top of the heap is in effect and only it
/// counts down.
#[derive(Clone, Debug, Default)]
pub struct PowerUpQueue {
    heap: BinaryHeap<ActivePowerUp>,
}

impl PowerUpQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a timed kind. A kind already waiting or running gets its
    /// duration refreshed instead of a second entry. Instant kinds are ignored.
    pub fn push(&mut self, kind: PowerUpKind) {
        let Some(duration) = kind.duration() else {
            return;
        };
        if self.heap.iter().any(|p| p.kind == kind) {
            let mut entries = std::mem::take(&mut self.heap).into_vec();
            for entry in entries.iter_mut().filter(|p| p.kind == kind) {
                entry.ticks_remaining = duration;
            }
            self.heap = BinaryHeap::from(entries);
            return;
        }
        self.heap.push(ActivePowerUp { kind, ticks_remaining: duration });
    }

    pub fn active(&self) -> Option<&ActivePowerUp> {
        self.heap.peek()
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.active().is_some_and(|p| p.kind == kind)
    }

    /// Counts the active entry down by one tick, returning its kind if that expired it.
    pub fn tick(&mut self) -> Option<PowerUpKind> {
        let mut top = self.heap.peek_mut()?;
        top.ticks_remaining = top.ticks_remaining.saturating_sub(1);
        if top.ticks_remaining == 0 {
            let expired = PeekMut::pop(top);
            return Some(expired.kind);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_priority_is_active() {
        let mut queue = PowerUpQueue::new();
        queue.push(PowerUpKind::DoubleScore);
        queue.push(PowerUpKind::Ghost);
        queue.push(PowerUpKind::SlowMotion);
        assert_eq!(queue.active().map(|p| p.kind), Some(PowerUpKind::Ghost));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn only_the_active_entry_counts_down() {
        let mut queue = PowerUpQueue::new();
        queue.push(PowerUpKind::Ghost);
        queue.push(PowerUpKind::DoubleScore);
        for _ in 0..GHOST_DURATION - 1 {
            assert_eq!(queue.tick(), None);
        }
        assert_eq!(queue.tick(), Some(PowerUpKind::Ghost));
        let next = queue.active().copied().unwrap();
        assert_eq!(next.kind, PowerUpKind::DoubleScore);
        assert_eq!(next.ticks_remaining, DOUBLE_SCORE_DURATION);
    }

    #[test]
    fn collecting_a_queued_kind_refreshes_it() {
        let mut queue = PowerUpQueue::new();
        queue.push(PowerUpKind::SlowMotion);
        for _ in 0..10 {
            queue.tick();
        }
        queue.push(PowerUpKind::SlowMotion);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.active().unwrap().ticks_remaining, SLOW_MOTION_DURATION);
    }

    #[test]
    fn instant_kinds_are_not_queued() {
        let mut queue = PowerUpQueue::new();
        queue.push(PowerUpKind::Shrink);
        assert!(queue.is_empty());
        assert_eq!(queue.tick(), None);
    }

    #[test]
    fn kinds_run_in_priority_order_regardless_of_collection_order() {
        let mut queue = PowerUpQueue::new();
        queue.push(PowerUpKind::DoubleScore);
        queue.push(PowerUpKind::Ghost);
        queue.push(PowerUpKind::SlowMotion);
        queue.push(PowerUpKind::Ghost);
        assert_eq!(queue.len(), 3);

        let mut expired = Vec::new();
        while !queue.is_empty() {
            if let Some(kind) = queue.tick() {
                expired.push(kind);
            }
        }
        assert_eq!(expired, vec![PowerUpKind::Ghost, PowerUpKind::SlowMotion, PowerUpKind::DoubleScore]);
    }
}
