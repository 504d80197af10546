use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::game::board::Board;
use crate::game::{BoardEvolution, Cells};
use crate::Result;

const EVOLUTION_CHANNEL_CAPACITY: usize = 64;

/// Drives a board from a periodic tick and multicasts every produced
/// generation to the current subscribers. Starts paused: ticks fire but are
/// skipped until `toggle_stopped` flips the flag.
pub struct BoardController {
    shared: Arc<Shared>,
}

struct Shared {
    board: Mutex<Board>,
    stopped: AtomicBool,
    tick: Duration,
    evolution_tx: broadcast::Sender<BoardEvolution>,
    ticker: Mutex<Ticker>,
}

struct Ticker {
    subscribers: usize,
    task: Option<JoinHandle<()>>,
}

impl BoardController {
    pub fn new(board: Board, tick: Duration) -> Self {
        let (evolution_tx, _) = broadcast::channel(EVOLUTION_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                board: Mutex::new(board),
                stopped: AtomicBool::new(true),
                tick,
                evolution_tx,
                ticker: Mutex::new(Ticker {
                    subscribers: 0,
                    task: None,
                }),
            }),
        }
    }

    pub fn stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::SeqCst)
    }

    pub fn toggle_stopped(&self) -> bool {
        let stopped = !self.shared.stopped.fetch_xor(true, Ordering::SeqCst);
        debug!("board controller stopped: {}", stopped);
        stopped
    }

    pub fn toggle_cell(&self, row: usize, column: usize) -> Result<bool> {
        self.shared.board.lock().unwrap().toggle_cell(row, column)
    }

    pub fn randomize(&self) {
        self.shared.board.lock().unwrap().randomize();
    }

    pub fn get_cells(&self) -> Cells {
        self.shared.board.lock().unwrap().get_cells().clone()
    }

    pub fn epoch(&self) -> u64 {
        self.shared.board.lock().unwrap().epoch()
    }

    /// The shared ticker task runs while at least one subscription is live;
    /// the last unsubscribe aborts it.
    pub fn subscribe(&self) -> EvolutionSubscription {
        let rx = self.shared.evolution_tx.subscribe();

        let mut ticker = self.shared.ticker.lock().unwrap();
        ticker.subscribers += 1;
        if ticker.task.is_none() {
            let shared = Arc::clone(&self.shared);
            ticker.task = Some(tokio::task::spawn(
                async move { run_ticker(shared).await },
            ));
        }

        EvolutionSubscription {
            rx,
            shared: Arc::clone(&self.shared),
            active: true,
        }
    }
}

async fn run_ticker(shared: Arc<Shared>) {
    loop {
        tokio::time::sleep(shared.tick).await;
        if shared.stopped.load(Ordering::SeqCst) {
            continue;
        }

        let evolution = shared.board.lock().unwrap().evolve();
        debug!("evolved to epoch {}", evolution.epoch);
        if shared.evolution_tx.send(evolution).is_err() {
            // every receiver already dropped; the pending abort will land
            continue;
        }
    }
}

pub struct EvolutionSubscription {
    rx: broadcast::Receiver<BoardEvolution>,
    shared: Arc<Shared>,
    active: bool,
}

impl EvolutionSubscription {
    /// Waits for the next published generation. Returns None once the
    /// subscription has been cancelled.
    pub async fn recv(&mut self) -> Option<BoardEvolution> {
        if !self.active {
            return None;
        }
        loop {
            match self.rx.recv().await {
                Ok(evolution) => return Some(evolution),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("evolution subscriber lagged, skipped {} generations", skipped);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Idempotent; also runs on drop.
    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let mut ticker = self.shared.ticker.lock().unwrap();
        ticker.subscribers -= 1;
        if ticker.subscribers == 0 {
            if let Some(task) = ticker.task.take() {
                task.abort();
                debug!("last evolution subscriber gone, ticker aborted");
            }
        }
    }
}

impl Drop for EvolutionSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
