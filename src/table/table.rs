use crate::Position;
use crate::Slot;
use crate::cards::Card;
use crate::room::Ruling;
use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

/// Everything the table lock protects: the slot grid, the token matrix, and
/// the per-player verdict cells. Methods here are plain mutations; atomicity
/// and ordering come from the owning [`Table`].
#[derive(Debug)]
pub struct Grid {
    slots: Vec<Option<Card>>,
    tokens: Vec<Vec<bool>>,
    verdicts: Vec<Option<Ruling>>,
}

impl Grid {
    fn new(slots: usize, players: usize) -> Self {
        Self {
            slots: vec![None; slots],
            tokens: vec![vec![false; slots]; players],
            verdicts: vec![None; players],
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn card_at(&self, slot: Slot) -> Option<Card> {
        self.slots[slot]
    }

    /// cards currently on the table, in slot order
    pub fn occupied(&self) -> Vec<Card> {
        self.slots.iter().flatten().copied().collect()
    }

    /// empty slots, in slot order
    pub fn vacancies(&self) -> Vec<Slot> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_none())
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn place_card(&mut self, slot: Slot, card: Card) {
        debug_assert!(self.slots[slot].is_none());
        self.slots[slot] = Some(card);
    }

    /// Remove a card together with every token sitting on it. A token never
    /// outlives the card under it.
    pub fn remove_card(&mut self, slot: Slot) -> Option<Card> {
        for tokens in self.tokens.iter_mut() {
            tokens[slot] = false;
        }
        self.slots[slot].take()
    }

    /// Refused when the slot is empty or the token is already down.
    pub fn place_token(&mut self, player: Position, slot: Slot) -> bool {
        if self.slots[slot].is_some() && !self.tokens[player][slot] {
            self.tokens[player][slot] = true;
            true
        } else {
            false
        }
    }

    /// True when there was a token to lift.
    pub fn remove_token(&mut self, player: Position, slot: Slot) -> bool {
        let held = self.tokens[player][slot];
        self.tokens[player][slot] = false;
        held
    }

    pub fn token_count(&self, player: Position) -> usize {
        self.tokens[player].iter().filter(|held| **held).count()
    }

    pub fn clear_tokens(&mut self, player: Position) {
        self.tokens[player].fill(false);
    }

    pub fn clear_all_tokens(&mut self) {
        for tokens in self.tokens.iter_mut() {
            tokens.fill(false);
        }
    }

    /// Sweep the table: all cards off, all tokens off. Returns the cards so
    /// the dealer decides whether they restock or retire.
    pub fn clear(&mut self) -> Vec<Card> {
        self.clear_all_tokens();
        self.slots.iter_mut().filter_map(Option::take).collect()
    }

    pub fn set_verdict(&mut self, player: Position, ruling: Ruling) {
        self.verdicts[player] = Some(ruling);
    }

    pub fn take_verdict(&mut self, player: Position) -> Option<Ruling> {
        self.verdicts[player].take()
    }

    pub fn has_verdicts(&self) -> bool {
        self.verdicts.iter().any(Option::is_some)
    }

    pub fn reset_verdicts(&mut self) {
        self.verdicts.fill(None);
    }
}

/// The shared board. One mutex guards all card, token, and verdict state;
/// one condvar carries every wake in the system. Waiters treat any wake as a
/// hint and re-check their predicates.
#[derive(Debug)]
pub struct Table {
    grid: Mutex<Grid>,
    bell: Condvar,
}

impl Table {
    pub fn new(slots: usize, players: usize) -> Self {
        Self {
            grid: Mutex::new(Grid::new(slots, players)),
            bell: Condvar::new(),
        }
    }

    /// A poisoned lock means a peer panicked mid-mutation; there is no
    /// consistent board left to recover.
    pub fn lock(&self) -> MutexGuard<'_, Grid> {
        self.grid.lock().expect("table lock poisoned")
    }

    pub fn wait<'a>(&self, grid: MutexGuard<'a, Grid>) -> MutexGuard<'a, Grid> {
        self.bell.wait(grid).expect("table lock poisoned")
    }

    pub fn wait_timeout<'a>(
        &self,
        grid: MutexGuard<'a, Grid>,
        timeout: Duration,
    ) -> MutexGuard<'a, Grid> {
        self.bell
            .wait_timeout(grid, timeout)
            .expect("table lock poisoned")
            .0
    }

    /// Broadcast under the lock so a waiter cannot slip between checking its
    /// predicate and parking.
    pub fn wake_all(&self) {
        let _grid = self.lock();
        self.bell.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_need_cards() {
        let table = Table::new(4, 2);
        let mut grid = table.lock();
        assert!(!grid.place_token(0, 0));
        grid.place_card(0, Card::from(7u8));
        assert!(grid.place_token(0, 0));
        assert!(!grid.place_token(0, 0));
        assert_eq!(grid.token_count(0), 1);
        assert_eq!(grid.token_count(1), 0);
    }

    #[test]
    fn removing_a_card_lifts_every_token() {
        let table = Table::new(4, 2);
        let mut grid = table.lock();
        grid.place_card(1, Card::from(3u8));
        assert!(grid.place_token(0, 1));
        assert!(grid.place_token(1, 1));
        assert_eq!(grid.remove_card(1), Some(Card::from(3u8)));
        assert_eq!(grid.card_at(1), None);
        assert_eq!(grid.token_count(0), 0);
        assert_eq!(grid.token_count(1), 0);
    }

    #[test]
    fn sweep_returns_every_card() {
        let table = Table::new(4, 1);
        let mut grid = table.lock();
        for slot in 0..4 {
            grid.place_card(slot, Card::from(slot));
        }
        assert!(grid.place_token(0, 2));
        let cards = grid.clear();
        assert_eq!(cards.len(), 4);
        assert_eq!(grid.occupied().len(), 0);
        assert_eq!(grid.vacancies().len(), 4);
        assert_eq!(grid.token_count(0), 0);
    }

    #[test]
    fn verdict_cells_read_once() {
        let table = Table::new(4, 2);
        let mut grid = table.lock();
        grid.set_verdict(1, Ruling::Legal);
        assert!(grid.has_verdicts());
        assert_eq!(grid.take_verdict(0), None);
        assert_eq!(grid.take_verdict(1), Some(Ruling::Legal));
        assert_eq!(grid.take_verdict(1), None);
        assert!(!grid.has_verdicts());
    }
}
