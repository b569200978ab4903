use super::card::Card;
use rand::seq::SliceRandom;

/// The dealer's pool of undealt cards. Cards leave one at a time through
/// ::draw() and come back in bulk when the table is swept; a card is never
/// in the deck and on the board at once.
#[derive(Debug, Clone, Default)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// full deck of sequential ids, unshuffled
    pub fn fresh(size: usize) -> Self {
        Self((0..size).map(Card::from).collect())
    }

    pub fn shuffle(&mut self) {
        self.0.shuffle(&mut rand::rng());
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }

    /// return swept cards to the pool and reshuffle
    pub fn restock(&mut self, cards: Vec<Card>) {
        self.0.extend(cards);
        self.shuffle();
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }
}

/// a deck is no more than the cards in it
impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_deck_counts() {
        let deck = Deck::fresh(81);
        assert_eq!(deck.size(), 81);
        assert!(!deck.is_empty());
    }

    #[test]
    fn draws_are_unique() {
        let mut deck = Deck::fresh(81);
        deck.shuffle();
        let mut seen = std::collections::HashSet::new();
        while let Some(card) = deck.draw() {
            assert!(seen.insert(card));
        }
        assert_eq!(seen.len(), 81);
    }

    #[test]
    fn restock_conserves_cards() {
        let mut deck = Deck::fresh(12);
        deck.shuffle();
        let held = (0..5).map(|_| deck.draw().unwrap()).collect::<Vec<_>>();
        deck.restock(held);
        let mut ids = deck.cards().iter().copied().map(u8::from).collect::<Vec<_>>();
        ids.sort();
        assert_eq!(ids, (0..12).collect::<Vec<_>>());
    }
}
