// history.rs - Detects a grid revisiting one of its recent states

use crate::grid::Grid;

const HISTORY_LEN: usize = 10;

/// Ring buffer of the last few grid fingerprints.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    history: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `grid`; returns true if it matches one of the recent states.
    pub fn check(&mut self, grid: &Grid) -> bool {
        let current = grid.fingerprint();
        let filled = self.count.min(HISTORY_LEN);
        if self.history[..filled].contains(&current) {
            return true;
        }
        self.history[self.count % HISTORY_LEN] = current;
        self.count += 1;
        false
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_is_detected() {
        let mut detector = CycleDetector::new();
        let mut a = Grid::new(4, 4).unwrap();
        a.set(0, 0, true);
        let mut b = a.clone();
        b.set(3, 3, true);

        assert!(!detector.check(&a));
        assert!(!detector.check(&b));
        assert!(detector.check(&a));
    }

    #[test]
    fn old_states_fall_out_of_history() {
        let mut detector = CycleDetector::new();
        let first = Grid::new(20, 1).unwrap();
        assert!(!detector.check(&first));
        for col in 0..HISTORY_LEN {
            let mut grid = Grid::new(20, 1).unwrap();
            grid.set(0, col, true);
            assert!(!detector.check(&grid));
        }
        assert!(!detector.check(&first));
    }

    #[test]
    fn empty_history_does_not_match_zero_hash() {
        let mut detector = CycleDetector::new();
        let grid = Grid::new(2, 2).unwrap();
        assert!(!detector.check(&grid));
        detector.clear();
        assert!(!detector.check(&grid));
    }
}
