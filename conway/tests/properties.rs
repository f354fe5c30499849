// properties.rs - Property tests for stepping, matching and the text form

use std::sync::{Arc, OnceLock};

use conway::matcher::occurs_at;
use conway::variants::variants;
use conway::{GenerationEngine, Grid, PatternMatcher, PATTERNS, WorkerPool, neighbors, text};
use proptest::prelude::*;

fn pool() -> Arc<WorkerPool> {
    static POOL: OnceLock<Arc<WorkerPool>> = OnceLock::new();
    Arc::clone(POOL.get_or_init(|| Arc::new(WorkerPool::with_workers(4).expect("worker pool"))))
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..24, 1usize..24)
        .prop_flat_map(|(width, height)| {
            (Just(width), Just(height), prop::collection::vec(any::<bool>(), width * height))
        })
        .prop_map(|(width, height, cells)| {
            let rows: Vec<Vec<bool>> = cells.chunks(width).map(<[bool]>::to_vec).collect();
            Grid::from_rows(&rows).expect("non-empty rows")
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dead_grid_is_a_fixed_point(width in 1usize..40, height in 1usize..40) {
        let engine = GenerationEngine::new(pool());
        let grid = Grid::new(width, height).unwrap();
        prop_assert_eq!(engine.step(grid.clone()).unwrap(), grid);
    }

    #[test]
    fn cells_with_two_neighbours_keep_their_state(grid in arb_grid()) {
        let engine = GenerationEngine::new(pool());
        let next = engine.step(grid.clone()).unwrap();
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                match neighbors::count(&grid, row, col) {
                    2 => prop_assert_eq!(next.get(row, col), grid.get(row, col)),
                    3 => prop_assert!(next.get(row, col)),
                    _ => prop_assert!(!next.get(row, col)),
                }
            }
        }
    }

    #[test]
    fn step_preserves_dimensions(grid in arb_grid()) {
        let engine = GenerationEngine::new(pool());
        let next = engine.step(grid.clone()).unwrap();
        prop_assert_eq!((next.width(), next.height()), (grid.width(), grid.height()));
    }

    #[test]
    fn text_round_trip(grid in arb_grid()) {
        let rendered = text::render(&grid);
        prop_assert_eq!(text::parse(&rendered).unwrap(), grid);
    }

    #[test]
    fn exists_agrees_with_exhaustive_search(grid in arb_grid(), index in 0usize..PATTERNS.len()) {
        let matcher = PatternMatcher::new(pool());
        let shape = PATTERNS[index].shape();
        let expected = variants(&shape).iter().any(|variant| {
            (0..grid.height()).any(|row| (0..grid.width()).any(|col| occurs_at(&grid, variant, row, col)))
        });
        prop_assert_eq!(matcher.exists(&grid, &shape).unwrap(), expected);
    }
}

#[test]
fn block_in_five_by_five_is_step_invariant() {
    let engine = GenerationEngine::new(pool());
    let mut block = Grid::new(5, 5).unwrap();
    for (row, col) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
        block.set(row, col, true);
    }
    let summary = engine.run(block.clone(), 25).unwrap();
    assert_eq!(summary.generations, 25);
    assert_eq!(summary.grid, block);
}

#[test]
fn blinker_exists_on_small_grid() {
    let matcher = PatternMatcher::new(pool());
    let blinker = conway::patterns::BLINKER_1.shape();

    let mut grid = Grid::new(5, 5).unwrap();
    for (row, col) in [(1, 1), (1, 2), (1, 3)] {
        grid.set(row, col, true);
    }
    assert!(matcher.exists(&grid, &blinker).unwrap());
    assert!(!matcher.exists(&Grid::new(5, 5).unwrap(), &blinker).unwrap());
}
