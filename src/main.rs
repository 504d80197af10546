use std::time::Duration;

use game_of_life_board::game::board::Board;
use game_of_life_board::game::controller::BoardController;
use game_of_life_board::game::{BoardConfig, Cells};
use game_of_life_board::{GameOfLifeOpt, Result};
use log::{debug, info};
use structopt::StructOpt;

#[tokio::main]
async fn main() -> Result<()> {
    let opt = GameOfLifeOpt::from_args();
    let opt_clone = opt.clone();
    std::env::set_var("RUST_LOG", opt.rust_log.clone());
    env_logger::init();

    info!("start game of life with config: {:#?}", opt_clone);

    let config = BoardConfig {
        wrap_edges: !opt.no_wrap_edges,
        overcrowding_number: opt.overcrowding_number,
        reproduction_number: opt.reproduction_number,
        loneliness_number: opt.loneliness_number,
    };
    let mut board = Board::new(
        opt.start_cells.to_vec(),
        opt.game_size.rows,
        opt.game_size.columns,
        config,
    )?;
    if opt.start_cells.is_empty() {
        debug!("no start cells given, randomizing the board");
        board.randomize();
    }

    let controller = BoardController::new(board, Duration::from_millis(opt.tick_ms));
    let mut subscription = controller.subscribe();
    controller.toggle_stopped();

    output_game_state(&controller.get_cells(), 0);
    for _ in 0..opt.epochs {
        let Some(evolution) = subscription.recv().await else {
            break;
        };
        output_game_state(&evolution.cells, evolution.epoch);
    }

    subscription.unsubscribe();
    info!("stopped after {} epochs", controller.epoch());

    Ok(())
}

fn output_game_state(cells: &Cells, epoch: u64) {
    println!("-------- {} --------", epoch);
    let columns = cells.first().map(|row| row.len()).unwrap_or(0);
    let mut str_builder = String::with_capacity(cells.len() * (columns + 2));
    for row in cells.iter() {
        for cell in row.iter() {
            let ch = if cell.alive { '*' } else { '.' };
            str_builder.push(ch);
        }
        str_builder.push_str("\r\n");
    }
    println!("{}", str_builder);
}
