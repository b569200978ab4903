use super::candidate::Candidate;
use super::player::Player;
use super::ruling::Ruling;
use super::seat::Seat;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Oracle;
use crate::config::Config;
use crate::screen::Screen;
use crate::table::Table;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::mpsc::Receiver;
use std::time::Instant;

/// The supervising actor. Owns the deck, the turn clock, and the candidate
/// queue; everyone else sees the game only through the table. Runs rounds
/// until the remaining pool holds no group, then announces and dismantles
/// the room in reverse seating order.
pub struct Dealer {
    config: Config,
    table: Arc<Table>,
    screen: Arc<dyn Screen>,
    oracle: Box<dyn Oracle>,
    deck: Deck,
    submissions: Receiver<Candidate>,
    seats: Vec<Seat>,
    players: Vec<Player>,
    /// raised from outside (the quit key) to end the game early
    halt: Arc<AtomicBool>,
    deadline: Instant,
    over: bool,
}

impl Dealer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        table: Arc<Table>,
        screen: Arc<dyn Screen>,
        oracle: Box<dyn Oracle>,
        deck: Deck,
        submissions: Receiver<Candidate>,
        seats: Vec<Seat>,
        players: Vec<Player>,
        halt: Arc<AtomicBool>,
    ) -> Self {
        Self {
            deadline: Instant::now(),
            over: false,
            config,
            table,
            screen,
            oracle,
            deck,
            submissions,
            seats,
            players,
            halt,
        }
    }

    pub fn run(mut self) {
        log::info!("dealer thread starting");
        self.spawn();
        while !self.finished() {
            self.table.lock().reset_verdicts();
            self.deal();
            self.round();
            if !self.over {
                self.sweep();
            }
        }
        self.settlements();
        self.announce();
        self.retire();
        log::info!("dealer thread terminated");
    }

    fn spawn(&mut self) {
        let players = std::mem::take(&mut self.players);
        for (position, player) in players.into_iter().enumerate() {
            self.seats[position].thread = Some(std::thread::spawn(move || player.run()));
        }
    }

    /// Between rounds every remaining card sits in the deck, so the deck
    /// alone is the whole pool.
    fn finished(&self) -> bool {
        self.over || self.halted() || !self.oracle.has_any_valid_group(self.deck.cards())
    }

    fn halted(&self) -> bool {
        self.halt.load(Ordering::Relaxed)
    }

    fn deal(&mut self) {
        self.refill();
        for seat in &self.seats {
            seat.gate.open();
        }
        log::info!("table dealt, {} cards left in the deck", self.deck.size());
    }

    /// One turn of the clock, ticked until expiry or until the game ends
    /// from under it. The first deadline of a round carries the deal grace.
    fn round(&mut self) {
        self.deadline = Instant::now() + self.config.turn_timeout + self.config.deal_grace;
        while !self.over && !self.halted() && Instant::now() < self.deadline {
            std::thread::sleep(self.config.tick);
            self.publish();
            self.review();
            self.refill();
            self.audit();
        }
        if !self.over && !self.halted() {
            self.publish(); // the zero frame at expiry
        }
    }

    fn publish(&self) {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        let urgent = !remaining.is_zero() && remaining <= self.config.turn_warning;
        self.screen.countdown(remaining, urgent);
    }

    /// Rule on at most one candidate per tick, in submission order. The
    /// whole judgment sits in one critical section: resolve, rule, mutate,
    /// verdict, with the submitter's generator gated shut around it.
    fn review(&mut self) {
        let Ok(candidate) = self.submissions.try_recv() else {
            return;
        };
        let position = candidate.player;
        self.seats[position].gate.close();
        let mut grid = self.table.lock();
        let cards = candidate
            .slots
            .iter()
            .map(|&slot| grid.card_at(slot))
            .collect::<Option<Vec<Card>>>();
        match cards {
            None => {
                // the selection raced a removal; no ruling, just a resync
                grid.clear_tokens(position);
                log::debug!("player {} submitted a stale selection", position);
            }
            Some(cards) if self.oracle.is_valid_group(&cards) => {
                for &slot in &candidate.slots {
                    grid.remove_card(slot);
                }
                grid.set_verdict(position, Ruling::Legal);
                self.deadline = Instant::now() + self.config.turn_timeout;
                log::info!("player {} found a group, clock reset", position);
            }
            Some(_) => {
                for &slot in &candidate.slots {
                    grid.remove_token(position, slot);
                }
                grid.set_verdict(position, Ruling::Illegal);
                log::info!("player {} claimed a bad group", position);
            }
        }
        drop(grid);
        self.seats[position].gate.open();
        self.table.wake_all();
    }

    /// Top up vacancies from a reshuffled deck, every tick. The broadcast
    /// that follows doubles as the heartbeat every waiter polls on.
    fn refill(&mut self) {
        self.deck.shuffle();
        let mut grid = self.table.lock();
        for slot in grid.vacancies() {
            match self.deck.draw() {
                Some(card) => grid.place_card(slot, card),
                None => break,
            }
        }
        drop(grid);
        self.table.wake_all();
    }

    /// Watch for a dead board. With cards left in the deck it is recycled
    /// on the spot; with the deck empty the game is over and the board goes
    /// out with it.
    fn audit(&mut self) {
        let board = self.table.lock().occupied();
        if self.oracle.has_any_valid_group(&board) {
            return;
        }
        if self.deck.is_empty() {
            let mut grid = self.table.lock();
            while self.submissions.try_recv().is_ok() {}
            grid.clear();
            drop(grid);
            self.table.wake_all();
            self.over = true;
            log::info!("no group left anywhere, game over");
        } else {
            self.sweep();
            self.deal();
            self.deadline = Instant::now() + self.config.turn_timeout;
            log::info!("dead board recycled");
        }
    }

    /// Full clear between rounds: gates shut, pending candidates flushed
    /// under the lock so nothing submitted before the sweep survives it,
    /// cards restocked.
    fn sweep(&mut self) {
        for seat in &self.seats {
            seat.gate.close();
        }
        let mut grid = self.table.lock();
        while self.submissions.try_recv().is_ok() {}
        let cards = grid.clear();
        drop(grid);
        self.deck.restock(cards);
        self.table.wake_all();
        log::info!("table swept, {} cards back in the deck", self.deck.size());
    }

    /// Give every outstanding ruling a chance to land before scores are
    /// read; a pending cell's owner is never frozen, so this converges in
    /// a wake or two.
    fn settlements(&self) {
        while self.table.lock().has_verdicts() {
            self.table.wake_all();
            std::thread::sleep(self.config.tick);
        }
    }

    fn announce(&self) {
        let top = self.seats.iter().map(Seat::score).max().unwrap_or(0);
        let winners = self
            .seats
            .iter()
            .filter(|seat| seat.score() == top)
            .map(|seat| seat.position)
            .collect::<Vec<_>>();
        self.screen.winners(&winners);
        log::info!("winners: {:?}", winners);
    }

    /// Reverse seating order, each seat joined before the next goes down.
    fn retire(&mut self) {
        for seat in self.seats.iter_mut().rev() {
            seat.retire();
            self.table.wake_all();
            seat.join();
        }
    }
}
