use crate::{Direction, Grid, GRID_SIZE};

// Empty cells are over-represented so that generated grids look like
// positions from real games rather than near-full boards.
const TILE_VALUES: [u32; 16] = [
    0, 0, 0, 0, 0, 2, 2, 4, 4, 8, 16, 32, 64, 128, 256, 512,
];

impl quickcheck::Arbitrary for Grid {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut cells = [[0u32; GRID_SIZE]; GRID_SIZE];
        for row in &mut cells {
            for cell in row.iter_mut() {
                *cell = *g.choose(&TILE_VALUES).unwrap();
            }
        }
        Grid::from_cells(cells)
    }
}

impl quickcheck::Arbitrary for Direction {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}
