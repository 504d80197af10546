use std::collections::HashSet;

use anyhow::anyhow;
use rand::Rng;

use crate::game::{BoardConfig, BoardEvolution, Cell, Cells};
use crate::Result;

pub struct Board {
    epoch: u64,
    rows: usize,
    columns: usize,
    config: BoardConfig,
    start_cells: Vec<(usize, usize)>,
    cells: Cells,
}

impl Board {
    pub fn new(
        start_cells: Vec<(usize, usize)>,
        rows: usize,
        columns: usize,
        config: BoardConfig,
    ) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(anyhow!("board size must be positive, got {}x{}", rows, columns).into());
        }

        let seeded: HashSet<(usize, usize)> = start_cells.iter().copied().collect();
        let cells: Cells = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|column| Cell {
                        alive: seeded.contains(&(row, column)),
                        row,
                        column,
                    })
                    .collect()
            })
            .collect();

        return Ok(Self {
            epoch: 0,
            rows,
            columns,
            config,
            start_cells,
            cells,
        });
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn start_cells(&self) -> &[(usize, usize)] {
        &self.start_cells
    }

    pub fn get_cells(&self) -> &Cells {
        &self.cells
    }

    /// Flips the alive bit of exactly one cell and returns its new value.
    /// Does not touch the epoch counter.
    pub fn toggle_cell(&mut self, row: usize, column: usize) -> Result<bool> {
        if row >= self.rows || column >= self.columns {
            return Err(anyhow!(
                "cell [{}:{}] is out of bounds for {}x{} board",
                row,
                column,
                self.rows,
                self.columns
            )
            .into());
        }

        let cell = &mut self.cells[row][column];
        cell.alive = !cell.alive;
        Ok(cell.alive)
    }

    pub fn randomize(&mut self) {
        let mut rng = rand::thread_rng();
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                // 30% chance of being alive
                cell.alive = rng.gen_bool(0.3);
            }
        }
    }

    /// Advances the board one generation. Every neighbour count is taken
    /// against the grid as it stood before the call, so no cell observes
    /// another cell's already-updated state within the same epoch.
    pub fn evolve(&mut self) -> BoardEvolution {
        self.epoch += 1;
        let mut births: Vec<(usize, usize)> = Vec::new();
        let mut deaths: Vec<(usize, usize)> = Vec::new();

        let mut next = self.cells.clone();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let neighbours = self.live_neighbours(row, column);
                let alive = if self.cells[row][column].alive {
                    deaths.push((row, column));
                    !(neighbours >= self.config.overcrowding_number
                        || neighbours <= self.config.loneliness_number)
                } else {
                    births.push((row, column));
                    neighbours == self.config.reproduction_number
                };
                next[row][column].alive = alive;
            }
        }
        self.cells = next;

        return BoardEvolution {
            epoch: self.epoch,
            cells: self.cells.clone(),
            births,
            deaths,
        };
    }

    fn live_neighbours(&self, row: usize, column: usize) -> usize {
        let mut alive = 0;
        for row_offset in -1i64..=1 {
            for column_offset in -1i64..=1 {
                if row_offset == 0 && column_offset == 0 {
                    continue;
                }
                let Some(r) = self.resolve_axis(row as i64 + row_offset, self.rows) else {
                    continue;
                };
                let Some(c) = self.resolve_axis(column as i64 + column_offset, self.columns) else {
                    continue;
                };
                if self.cells[r][c].alive {
                    alive += 1;
                }
            }
        }
        alive
    }

    // A neighbour position one step past an edge wraps to the opposite edge
    // when wrap_edges is set, otherwise the whole position is dropped from
    // the count.
    fn resolve_axis(&self, position: i64, size: usize) -> Option<usize> {
        let size = size as i64;
        if position >= 0 && position < size {
            return Some(position as usize);
        }
        if !self.config.wrap_edges {
            return None;
        }
        if position < 0 {
            Some((position + size) as usize)
        } else {
            Some((position - size) as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_wrap_config() -> BoardConfig {
        BoardConfig {
            wrap_edges: false,
            ..BoardConfig::default()
        }
    }

    fn alive_coords(board: &Board) -> Vec<(usize, usize)> {
        board
            .get_cells()
            .iter()
            .flatten()
            .filter(|cell| cell.alive)
            .map(|cell| (cell.row, cell.column))
            .collect()
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Board::new(vec![], 0, 5, BoardConfig::default()).is_err());
        assert!(Board::new(vec![], 5, 0, BoardConfig::default()).is_err());
        assert!(Board::new(vec![], 1, 1, BoardConfig::default()).is_ok());
    }

    #[test]
    fn seeds_only_listed_cells() {
        let board = Board::new(vec![(0, 0), (1, 1)], 3, 3, BoardConfig::default()).unwrap();
        assert_eq!(alive_coords(&board), vec![(0, 0), (1, 1)]);
        assert_eq!(board.epoch(), 0);
    }

    #[test]
    fn duplicate_and_out_of_bounds_seeds_are_harmless() {
        let board = Board::new(
            vec![(1, 1), (1, 1), (7, 7)],
            3,
            3,
            BoardConfig::default(),
        )
        .unwrap();
        assert_eq!(alive_coords(&board), vec![(1, 1)]);
    }

    #[test]
    fn grid_stays_rectangular_with_fixed_positions() {
        let mut board = Board::new(vec![(0, 1), (2, 3)], 4, 6, BoardConfig::default()).unwrap();
        board.evolve();
        board.evolve();

        let cells = board.get_cells();
        assert_eq!(cells.len(), 4);
        for (r, row) in cells.iter().enumerate() {
            assert_eq!(row.len(), 6);
            for (c, cell) in row.iter().enumerate() {
                assert_eq!(cell.row, r);
                assert_eq!(cell.column, c);
            }
        }
    }

    #[test]
    fn corner_counts_only_in_bounds_neighbours_without_wrap() {
        let mut board = Board::new(vec![(0, 0)], 3, 3, no_wrap_config()).unwrap();
        board.toggle_cell(0, 1).unwrap();
        board.toggle_cell(1, 0).unwrap();
        board.toggle_cell(1, 1).unwrap();
        // far corner would only be visible through a wrap
        board.toggle_cell(2, 2).unwrap();

        assert_eq!(board.live_neighbours(0, 0), 3);
    }

    #[test]
    fn corner_counts_opposite_corner_with_wrap() {
        let board = Board::new(vec![(3, 4)], 4, 5, BoardConfig::default()).unwrap();
        assert_eq!(board.live_neighbours(0, 0), 1);
    }

    #[test]
    fn blinker_oscillates() {
        let mut board =
            Board::new(vec![(2, 1), (2, 2), (2, 3)], 5, 5, no_wrap_config()).unwrap();

        let first = board.evolve();
        assert_eq!(alive_coords(&board), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(first.epoch, 1);

        board.evolve();
        assert_eq!(alive_coords(&board), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn toggle_pairs_back_to_initial_state() {
        let mut board = Board::new(vec![(0, 0)], 3, 3, BoardConfig::default()).unwrap();
        let before = board.get_cells().clone();

        assert_eq!(board.toggle_cell(1, 2).unwrap(), true);
        assert_eq!(board.toggle_cell(1, 2).unwrap(), false);

        assert_eq!(*board.get_cells(), before);
        assert_eq!(board.epoch(), 0);
    }

    #[test]
    fn toggle_out_of_bounds_is_rejected() {
        let mut board = Board::new(vec![], 3, 3, BoardConfig::default()).unwrap();
        assert!(board.toggle_cell(3, 0).is_err());
        assert!(board.toggle_cell(0, 3).is_err());
        assert_eq!(alive_coords(&board), vec![]);
    }

    #[test]
    fn epoch_increments_only_on_evolve() {
        let mut board = Board::new(vec![(1, 1)], 3, 3, BoardConfig::default()).unwrap();
        board.toggle_cell(0, 0).unwrap();
        board.randomize();
        assert_eq!(board.epoch(), 0);

        board.evolve();
        board.evolve();
        let third = board.evolve();
        assert_eq!(board.epoch(), 3);
        assert_eq!(third.epoch, 3);
    }

    #[test]
    fn births_and_deaths_partition_by_prior_state() {
        let mut board = Board::new(vec![], 6, 7, BoardConfig::default()).unwrap();
        board.randomize();

        let alive_before: Vec<(usize, usize)> = alive_coords(&board);
        let evolution = board.evolve();

        assert_eq!(
            evolution.births.len() + evolution.deaths.len(),
            board.rows() * board.columns()
        );
        for coords in &evolution.deaths {
            assert!(alive_before.contains(coords));
        }
        for coords in &evolution.births {
            assert!(!alive_before.contains(coords));
        }
    }

    #[test]
    fn randomize_keeps_dimensions() {
        let mut board = Board::new(vec![], 4, 4, BoardConfig::default()).unwrap();
        board.randomize();

        let cells = board.get_cells();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|row| row.len() == 4));
    }
}
