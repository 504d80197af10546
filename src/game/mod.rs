pub mod board;
pub mod controller;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub alive: bool,
    pub row: usize,
    pub column: usize,
}

pub type Cells = Vec<Vec<Cell>>;

#[derive(Debug, Clone)]
pub struct BoardConfig {
    // Determines whether cells at the edges of the board wrap round
    pub wrap_edges: bool,
    // The number of neighbours at or above which a cell dies of overcrowding
    pub overcrowding_number: usize,
    // The number of neighbours required for a not-alive cell to come alive
    pub reproduction_number: usize,
    // The number of neighbours at and below which a cell dies of loneliness
    pub loneliness_number: usize,
}

impl Default for BoardConfig {
    fn default() -> BoardConfig {
        BoardConfig {
            wrap_edges: true,
            overcrowding_number: 4,
            reproduction_number: 3,
            loneliness_number: 1,
        }
    }
}

/// Outcome of a single evolution step. `births` and `deaths` list every
/// coordinate by its state *entering* the step: a cell that was alive and
/// stays alive is still listed under `deaths`.
#[derive(Debug, Clone)]
pub struct BoardEvolution {
    pub epoch: u64,
    pub cells: Cells,
    pub births: Vec<(usize, usize)>,
    pub deaths: Vec<(usize, usize)>,
}
