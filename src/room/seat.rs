use super::gate::Gate;
use crate::Position;
use crate::Score;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::thread::JoinHandle;

/// Dealer-side handle to one spawned player: the shared flags the dealer
/// flips and the thread it eventually joins.
#[derive(Debug)]
pub struct Seat {
    pub position: Position,
    pub gate: Arc<Gate>,
    pub quit: Arc<AtomicBool>,
    pub score: Arc<AtomicU32>,
    pub thread: Option<JoinHandle<()>>,
}

impl Seat {
    pub fn score(&self) -> Score {
        self.score.load(Ordering::Relaxed)
    }

    /// Ask the player to stop. The caller still broadcasts and joins.
    pub fn retire(&self) {
        self.quit.store(true, Ordering::Relaxed);
    }

    pub fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
