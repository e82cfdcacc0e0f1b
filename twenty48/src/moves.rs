use serde::{Deserialize, Serialize};

use crate::{Grid, GRID_SIZE};

/// A direction in which the tiles can be slid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions, in the order auto-play probes them.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    // Clockwise quarter turns that map this direction onto Left.
    fn quarter_turns(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 2,
            Direction::Up => 3,
            Direction::Down => 1,
        }
    }
}

/// What a slide did to the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideOutcome {
    /// Did any cell change?
    pub moved: bool,
    /// Points awarded: the sum of the values of all tiles created by merges.
    pub points: u32,
    /// The largest tile created by a merge, 0 if there was none.
    pub highest_merged: u32,
}

impl SlideOutcome {
    fn absorb(&mut self, other: SlideOutcome) {
        self.moved |= other.moved;
        self.points += other.points;
        self.highest_merged = self.highest_merged.max(other.highest_merged);
    }
}

/// Slides all tiles in the given direction, merging equal neighbors.
///
/// Every direction is reduced to the slide-left primitive by rotating the
/// grid into place beforehand and back afterwards.
pub fn slide(grid: &mut Grid, direction: Direction) -> SlideOutcome {
    let turns = direction.quarter_turns();
    for _ in 0..turns {
        grid.rotate_clockwise();
    }
    let outcome = slide_left(grid);
    for _ in 0..(4 - turns) % 4 {
        grid.rotate_clockwise();
    }
    debug_assert!(grid
        .cells()
        .iter()
        .flatten()
        .all(|&value| value == 0 || value.is_power_of_two()));
    outcome
}

fn slide_left(grid: &mut Grid) -> SlideOutcome {
    let mut outcome = SlideOutcome::default();
    for row in grid.cells_mut() {
        outcome.absorb(slide_row_left(row));
    }
    outcome
}

/// The slide primitive for a single row: compress, merge, compress again.
pub(crate) fn slide_row_left(row: &mut [u32; GRID_SIZE]) -> SlideOutcome {
    let compressed = compress_row(row);
    let merge = merge_row(row);
    // Merges leave gaps behind them.
    compress_row(row);
    SlideOutcome {
        moved: compressed || merge.moved,
        ..merge
    }
}

/// Packs the row to the left without merging. Returns whether anything moved.
fn compress_row(row: &mut [u32; GRID_SIZE]) -> bool {
    let mut changed = false;
    for i in 0..GRID_SIZE {
        if row[i] != 0 {
            continue;
        }
        for j in i + 1..GRID_SIZE {
            if row[j] != 0 {
                row[i] = row[j];
                row[j] = 0;
                changed = true;
                break;
            }
        }
    }
    changed
}

// Merges equal left-adjacent pairs, scanning left to right. A tile that was
// just created by a merge is skipped, so no chain merges happen within one
// move.
fn merge_row(row: &mut [u32; GRID_SIZE]) -> SlideOutcome {
    let mut outcome = SlideOutcome::default();
    let mut i = 1;
    while i < GRID_SIZE {
        if row[i] != 0 && row[i] == row[i - 1] {
            row[i - 1] *= 2;
            row[i] = 0;
            outcome.moved = true;
            outcome.points += row[i - 1];
            outcome.highest_merged = outcome.highest_merged.max(row[i - 1]);
            i += 1;
        }
        i += 1;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn rotation_round_trips(grid: Grid) -> bool {
            let mut rotated = grid;
            for _ in 0..4 {
                rotated.rotate_clockwise();
            }
            rotated == grid
        }

        fn slide_preserves_total_value(grid: Grid, direction: Direction) -> bool {
            let total_before: u32 = grid.cells().iter().flatten().sum();
            let mut grid = grid;
            slide(&mut grid, direction);
            let total_after: u32 = grid.cells().iter().flatten().sum();
            total_before == total_after
        }

        fn moved_flag_matches_grid_equality(grid: Grid, direction: Direction) -> bool {
            let before = grid;
            let mut grid = grid;
            let outcome = slide(&mut grid, direction);
            outcome.moved == (grid != before)
        }

        fn merges_only_shrink_tile_count(grid: Grid, direction: Direction) -> bool {
            let count_before = grid.cells().iter().flatten().filter(|&&v| v != 0).count();
            let mut grid = grid;
            slide(&mut grid, direction);
            let count_after = grid.cells().iter().flatten().filter(|&&v| v != 0).count();
            // At most two merges per line, and a merge removes exactly one tile.
            count_after <= count_before && count_before <= count_after + 2 * GRID_SIZE
        }
    }

    #[test]
    fn compress_closes_gaps() {
        let mut row = [2, 0, 2, 0];
        assert!(compress_row(&mut row));
        assert_eq!(row, [2, 2, 0, 0]);
        assert!(!compress_row(&mut row));
    }

    #[test]
    fn slide_row_merges_after_compressing() {
        let mut row = [2, 0, 2, 0];
        let outcome = slide_row_left(&mut row);
        assert_eq!(row, [4, 0, 0, 0]);
        assert!(outcome.moved);
        assert_eq!(outcome.points, 4);
        assert_eq!(outcome.highest_merged, 4);
    }

    #[test]
    fn no_chain_merges_within_one_move() {
        let mut row = [2, 2, 2, 2];
        let outcome = slide_row_left(&mut row);
        assert_eq!(row, [4, 4, 0, 0]);
        assert_eq!(outcome.points, 8);
    }

    #[test]
    fn merged_tile_does_not_merge_again() {
        let mut row = [2, 2, 4, 0];
        slide_row_left(&mut row);
        // The freshly created 4 must not combine with the existing 4.
        assert_eq!(row, [4, 4, 0, 0]);
    }

    #[test]
    fn packed_row_without_pairs_is_a_noop() {
        let mut row = [2, 4, 8, 16];
        let outcome = slide_row_left(&mut row);
        assert_eq!(row, [2, 4, 8, 16]);
        assert!(!outcome.moved);
        assert_eq!(outcome.points, 0);
    }

    #[test]
    fn gap_closing_alone_counts_as_effective() {
        let mut row = [0, 2, 4, 8];
        let outcome = slide_row_left(&mut row);
        assert_eq!(row, [2, 4, 8, 0]);
        assert!(outcome.moved);
        assert_eq!(outcome.points, 0);
    }

    #[test]
    fn each_direction_slides_toward_its_wall() {
        let mut start = Grid::empty();
        start.cells_mut()[1][2] = 2;

        for (direction, destination) in [
            (Direction::Left, (1, 0)),
            (Direction::Right, (1, 3)),
            (Direction::Up, (0, 2)),
            (Direction::Down, (3, 2)),
        ] {
            let mut grid = start;
            let outcome = slide(&mut grid, direction);
            assert!(outcome.moved);
            assert_eq!(grid.get(destination.0, destination.1), 2);
            assert_eq!(grid.empty_cells().len(), 15);
        }
    }

    #[test]
    fn vertical_merge_scores_like_horizontal() {
        let mut grid = Grid::empty();
        grid.cells_mut()[0][1] = 4;
        grid.cells_mut()[2][1] = 4;
        let outcome = slide(&mut grid, Direction::Down);
        assert_eq!(grid.get(3, 1), 8);
        assert_eq!(outcome.points, 8);
        assert_eq!(outcome.highest_merged, 8);
    }
}
