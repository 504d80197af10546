pub mod errors;
pub mod game;

use anyhow::anyhow;
use errors::LifeError;
use structopt::StructOpt;

pub type Result<T> = std::result::Result<T, LifeError>;
pub type StdResult<T, E> = std::result::Result<T, E>;

#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "GameOfLifeConfig")]
pub struct GameOfLifeOpt {
    #[structopt(long, env, default_value = "game_of_life_board=debug")]
    pub rust_log: String,

    #[structopt(long, env, default_value = "120x120", parse(try_from_str = parse_game_size))]
    pub game_size: GameSize,

    /// Cells alive at epoch 0, e.g. "2:1,2:2,2:3". Empty means randomize.
    #[structopt(long, env, default_value = "", parse(try_from_str = parse_start_cells))]
    pub start_cells: StartCells,

    #[structopt(long, env, default_value = "50")]
    pub tick_ms: u64,

    #[structopt(long, env, default_value = "200")]
    pub epochs: u64,

    #[structopt(long, env)]
    pub no_wrap_edges: bool,

    #[structopt(long, env, default_value = "4")]
    pub overcrowding_number: usize,

    #[structopt(long, env, default_value = "3")]
    pub reproduction_number: usize,

    #[structopt(long, env, default_value = "1")]
    pub loneliness_number: usize,
}

#[derive(Debug, Clone)]
pub struct GameSize {
    pub rows: usize,
    pub columns: usize,
}

fn parse_game_size(src: &str) -> Result<GameSize> {
    let mut splitted = src.split('x');
    let rows = splitted
        .next()
        .ok_or(anyhow!("fail to parse game size: {}", src))?
        .parse()?;
    let columns = splitted
        .next()
        .ok_or(anyhow!("fail to parse game size: {}", src))?
        .parse()?;

    Ok(GameSize { rows, columns })
}

#[derive(Debug, Clone)]
pub struct StartCells(Vec<(usize, usize)>);

fn parse_start_cells(src: &str) -> Result<StartCells> {
    if src.trim().is_empty() {
        return Ok(StartCells(Vec::new()));
    }

    let cells = src
        .split(',')
        .map(|pair| {
            let mut splitted = pair.split(':');
            let row = splitted
                .next()
                .ok_or(anyhow!("fail to parse start cell: {}", pair))?
                .parse()?;
            let column = splitted
                .next()
                .ok_or(anyhow!("fail to parse start cell: {}", pair))?
                .parse()?;

            Ok((row, column))
        })
        .collect::<Result<Vec<(usize, usize)>>>()?;

    Ok(StartCells(cells))
}

impl std::ops::Deref for StartCells {
    type Target = Vec<(usize, usize)>;

    fn deref(&self) -> &Vec<(usize, usize)> {
        &self.0
    }
}

impl std::fmt::Display for StartCells {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs = self
            .0
            .iter()
            .map(|(row, column)| format!("{}:{}", row, column))
            .collect::<Vec<_>>();
        write!(f, "{}", pairs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_game_size() {
        let size = parse_game_size("120x80").unwrap();
        assert_eq!(size.rows, 120);
        assert_eq!(size.columns, 80);

        assert!(parse_game_size("120").is_err());
        assert!(parse_game_size("axb").is_err());
    }

    #[test]
    fn parses_start_cells() {
        let cells = parse_start_cells("2:1,2:2,2:3").unwrap();
        assert_eq!(*cells, vec![(2, 1), (2, 2), (2, 3)]);

        assert!(parse_start_cells("").unwrap().is_empty());
        assert!(parse_start_cells("2-1").is_err());
    }
}
