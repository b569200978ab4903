use super::candidate::Candidate;
use super::gate::Gate;
use super::generator::Generator;
use super::inbox::Inbox;
use super::inbox::Keys;
use super::ruling::Ruling;
use crate::Position;
use crate::Slot;
use crate::config::Config;
use crate::screen::Screen;
use crate::table::Grid;
use crate::table::Table;
use std::sync::Arc;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;
use std::time::Instant;

/// One seat's actor. Owns its keypress inbox and a private mirror of its
/// tokens; everything else it touches lives behind the table lock. Runs on
/// its own thread until its quit flag goes up, and a non-human seat carries
/// an input generator thread that folds back in on exit.
pub struct Player {
    position: Position,
    human: bool,
    config: Config,
    table: Arc<Table>,
    screen: Arc<dyn Screen>,
    inbox: Inbox,
    submit: Sender<Candidate>,
    gate: Arc<Gate>,
    quit: Arc<AtomicBool>,
    score: Arc<AtomicU32>,
    /// slots this player believes it holds, in acquisition order
    held: Vec<Slot>,
    /// up while a submission awaits its ruling; blocks a second submission
    sent: bool,
}

impl Player {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Position,
        human: bool,
        config: Config,
        table: Arc<Table>,
        screen: Arc<dyn Screen>,
        submit: Sender<Candidate>,
        gate: Arc<Gate>,
        quit: Arc<AtomicBool>,
        score: Arc<AtomicU32>,
    ) -> Self {
        Self {
            inbox: Inbox::new(config.group_size),
            held: Vec::with_capacity(config.group_size),
            sent: false,
            position,
            human,
            config,
            table,
            screen,
            submit,
            gate,
            quit,
            score,
        }
    }

    /// Producer handle for this seat's keypresses.
    pub fn keys(&self) -> Keys {
        self.inbox.keys()
    }

    pub fn run(mut self) {
        log::info!("player {} thread starting", self.position);
        let generator = self.generate();
        while !self.quit.load(Ordering::Relaxed) {
            match self.verdict() {
                Some(ruling) => self.settle(ruling),
                None => self.act(),
            }
        }
        if let Some(thread) = generator {
            let _ = thread.join();
        }
        log::info!("player {} thread terminated", self.position);
    }

    fn generate(&self) -> Option<JoinHandle<()>> {
        if self.human {
            return None;
        }
        let generator = Generator::new(
            self.position,
            self.config.board_size,
            self.config.tick,
            self.inbox.keys(),
            self.gate.clone(),
            self.quit.clone(),
        );
        Some(std::thread::spawn(move || generator.run()))
    }

    /// Take any pending ruling. The score bump for a legal group happens
    /// under the same lock, so once the cell reads empty the dealer already
    /// sees the new score.
    fn verdict(&self) -> Option<Ruling> {
        let mut grid = self.table.lock();
        let ruling = grid.take_verdict(self.position);
        if let Some(Ruling::Legal) = ruling {
            let score = self.score.fetch_add(1, Ordering::Relaxed) + 1;
            drop(grid);
            self.screen.score(self.position, score);
            log::info!("player {} scores a point, total {}", self.position, score);
        }
        ruling
    }

    /// Serve the freeze a ruling carries, then start the cycle over clean.
    /// Keypresses that landed while frozen are discarded, not buffered.
    fn settle(&mut self, ruling: Ruling) {
        log::debug!("player {} ruled {}", self.position, ruling);
        match ruling {
            Ruling::Legal => self.freeze(self.config.point_freeze),
            Ruling::Illegal => {
                log::info!("player {} penalized", self.position);
                self.freeze(self.config.penalty_freeze);
            }
        }
        self.held.clear();
        self.sent = false;
        self.inbox.drain();
    }

    /// One pass of the cycle: resync, or submit, or toggle, or wait. Every
    /// branch re-checks its predicate under the lock, so spurious wakes and
    /// the dealer's heartbeat broadcasts are both harmless.
    fn act(&mut self) {
        let table = self.table.clone();
        let mut grid = table.lock();
        if self.desynced(&grid) {
            grid.clear_tokens(self.position);
            self.held.clear();
            self.sent = false;
            log::debug!("player {} resynced with the board", self.position);
        } else if self.ready() {
            if self.held.iter().all(|&slot| grid.card_at(slot).is_some()) {
                let candidate = Candidate {
                    player: self.position,
                    slots: self.held.clone(),
                };
                self.sent = self.submit.send(candidate).is_ok();
            }
            // a vanished card surfaces as a token mismatch next pass
        } else if !self.sent && self.held.len() < self.config.group_size {
            match self.inbox.poll() {
                Some(slot) => self.toggle(&mut grid, slot),
                None => self.idle(grid),
            }
        } else {
            self.idle(grid);
        }
    }

    /// Park until the next broadcast. The quit flag is re-read under the
    /// lock: once it reads clear here, any later retirement must queue
    /// behind this lock to ring the bell, so the wake cannot be missed.
    fn idle(&self, grid: MutexGuard<'_, Grid>) {
        if !self.quit.load(Ordering::Relaxed) {
            drop(self.table.wait(grid));
        }
    }

    /// The dealer lifted tokens out from under this player, wholesale or
    /// piecemeal; the local mirror is stale and starts over.
    fn desynced(&self, grid: &Grid) -> bool {
        !self.held.is_empty() && grid.token_count(self.position) != self.held.len()
    }

    fn ready(&self) -> bool {
        !self.sent && self.held.len() == self.config.group_size
    }

    fn toggle(&mut self, grid: &mut Grid, slot: Slot) {
        if let Some(i) = self.held.iter().position(|&held| held == slot) {
            if grid.remove_token(self.position, slot) {
                self.held.remove(i);
            }
        } else if grid.place_token(self.position, slot) {
            self.held.push(slot);
        }
        // refused presses (vacant slot, stale mirror) are dropped
    }

    /// Sit out a freeze, publishing the remainder once a second. Waits ride
    /// the shared condvar so termination cuts in immediately; broadcast
    /// wakes do not shorten the freeze.
    fn freeze(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        let mut remaining = duration;
        while !remaining.is_zero() && !self.quit.load(Ordering::Relaxed) {
            self.screen.freeze(self.position, remaining);
            let checkpoint = Instant::now() + remaining.min(Duration::from_secs(1));
            let mut grid = self.table.lock();
            while !self.quit.load(Ordering::Relaxed) {
                let nap = checkpoint.saturating_duration_since(Instant::now());
                if nap.is_zero() {
                    break;
                }
                grid = self.table.wait_timeout(grid, nap);
            }
            drop(grid);
            remaining = deadline.saturating_duration_since(Instant::now());
        }
        self.screen.freeze(self.position, Duration::ZERO);
    }
}
