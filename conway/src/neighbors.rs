// neighbors.rs - Moore-neighbourhood counting on a bounded grid

use crate::grid::Grid;

// Offsets of the eight surrounding cells
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Number of live cells among the eight neighbours of `(row, col)`.
///
/// The grid does not wrap: neighbours outside the board count as dead.
pub fn count(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut live = 0;
    for &(dr, dc) in &OFFSETS {
        let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if grid.get(nr, nc) {
            live += 1;
        }
    }
    live
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: usize, height: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(row, col) in live {
            grid.set(row, col, true);
        }
        grid
    }

    #[test]
    fn isolated_cell_has_no_neighbours() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        assert_eq!(count(&grid, 1, 1), 0);
        assert_eq!(count(&grid, 0, 0), 1);
    }

    #[test]
    fn full_neighbourhood_counts_eight() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.scatter(9, 0);
        assert_eq!(count(&grid, 1, 1), 8);
    }

    #[test]
    fn corners_do_not_wrap() {
        let grid = grid_with(4, 4, &[(3, 3), (0, 3), (3, 0)]);
        assert_eq!(count(&grid, 0, 0), 0);
        assert_eq!(count(&grid, 3, 3), 0);
        assert_eq!(count(&grid, 2, 2), 1);
    }

    #[test]
    fn cell_itself_is_not_counted() {
        let grid = grid_with(3, 3, &[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(count(&grid, 1, 1), 2);
        assert_eq!(count(&grid, 0, 0), 2);
    }
}
