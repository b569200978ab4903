#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    /// value of one feature: the base-3 digit of the id at that position
    pub fn digit(&self, feature: usize) -> u8 {
        (self.0 as usize / 3usize.pow(feature as u32) % 3) as u8
    }
}

/// u8 isomorphism
/// a card is its id in the full deck, the feature vector packed base-3
/// (4 features of 3 values each cover the standard 81-card deck)
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self(n)
    }
}

/// usize isomorphism, for slot/loop arithmetic
impl From<Card> for usize {
    fn from(c: Card) -> usize {
        c.0 as usize
    }
}
impl From<usize> for Card {
    fn from(n: usize) -> Self {
        Self(n as u8)
    }
}

impl Arbitrary for Card {
    fn random() -> Self {
        Self(rand::random_range(0..81))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "#{:02}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        let card = Card::random();
        assert_eq!(card, Card::from(u8::from(card)));
    }

    #[test]
    fn digits_expand_base_3() {
        let card = Card::from(53u8); // 53 = 2 + 2*3 + 2*9 + 1*27
        assert_eq!(card.digit(0), 2);
        assert_eq!(card.digit(1), 2);
        assert_eq!(card.digit(2), 2);
        assert_eq!(card.digit(3), 1);
    }

    #[test]
    fn digits_read_zero_past_the_top_feature() {
        let card = Card::from(80u8);
        assert_eq!(card.digit(3), 2);
        assert_eq!(card.digit(4), 0);
        assert_eq!(card.digit(6), 0);
    }
}

use crate::Arbitrary;
use std::fmt::{Display, Formatter, Result};
