// text.rs - Printable grid form, also used as the save/load format
//
//   -----------
//   .O. . .O.O.
//   . .O. . . .
//
// Every cell is `.` followed by `O` (alive) or a space (dead), and each row
// ends with a closing `.`.

use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;

const ALIVE: char     = 'O';
const DEAD: char      = ' ';
const SEPARATOR: char = '.';

/// Render `grid` with a dashed header line.
pub fn render(grid: &Grid) -> String {
    let line_len = grid.width() * 2 + 1;
    let mut out = String::with_capacity((line_len + 1) * (grid.height() + 1));
    out.extend(std::iter::repeat_n('-', line_len));
    out.push('\n');
    for row in grid.rows() {
        for &alive in row {
            out.push(SEPARATOR);
            out.push(if alive { ALIVE } else { DEAD });
        }
        out.push(SEPARATOR);
        out.push('\n');
    }
    out
}

/// Parse the rendered form back into a grid.
///
/// Lines containing `---` and empty lines are skipped; a line of spaces is
/// a row of dead cells. `.` separates cells, `O` is alive and a space is
/// dead. Any other character, or rows of differing widths, are rejected
/// rather than silently reshaped.
pub fn parse(input: &str) -> LifeResult<Grid> {
    let mut rows: Vec<Vec<bool>> = Vec::new();
    let mut width = None;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim_end_matches('\r');
        if line.contains("---") || line.is_empty() {
            continue;
        }

        let mut row = Vec::with_capacity(line.len() / 2);
        for ch in line.chars() {
            match ch {
                ALIVE => row.push(true),
                DEAD => row.push(false),
                SEPARATOR => {}
                other => {
                    return Err(LifeError::Parse {
                        line: line_no,
                        message: format!("unexpected character {other:?}"),
                    });
                }
            }
        }

        match width {
            None => width = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(LifeError::Parse {
                    line: line_no,
                    message: format!("row has {} cells, expected {}", row.len(), expected),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    Grid::from_rows(&rows)
}
