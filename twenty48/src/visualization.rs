use crate::{Grid, GRID_SIZE};

/// Renders the grid as a box-drawn table, for logs and simple frontends.
pub fn visualize_grid(grid: &Grid) -> String {
    let mut result = String::from("╭");
    for j in 0..GRID_SIZE {
        result += "──────";
        result += if j + 1 < GRID_SIZE { "┬" } else { "╮\n" };
    }

    for (i, row) in grid.cells().iter().enumerate() {
        if i > 0 {
            result += "├";
            for j in 0..GRID_SIZE {
                result += "──────";
                result += if j + 1 < GRID_SIZE { "┼" } else { "┤\n" };
            }
        }
        for &value in row {
            if value == 0 {
                result += "│      ";
            } else {
                result += &format!("│{:>5} ", value);
            }
        }
        result += "│\n";
    }

    result += "╰";
    for j in 0..GRID_SIZE {
        result += "──────";
        result += if j + 1 < GRID_SIZE { "┴" } else { "╯" };
    }
    result
}
