use super::card::Card;

/// Rules seam consulted by the dealer. Implementations must be safe to move
/// into the dealer thread.
pub trait Oracle: Send {
    /// judge one exact selection
    fn is_valid_group(&self, cards: &[Card]) -> bool;
    /// scan a pool for any valid group of the configured size
    fn has_any_valid_group(&self, cards: &[Card]) -> bool;
}

/// Standard judge. A selection is a valid group when every feature reads
/// all-same or all-different across the selection.
#[derive(Debug, Clone, Copy)]
pub struct Judge {
    features: usize,
    group: usize,
}

impl Judge {
    pub fn new(features: usize, group: usize) -> Self {
        Self { features, group }
    }

    fn scan(&self, cards: &[Card], from: usize, pick: &mut Vec<Card>) -> bool {
        if pick.len() == self.group {
            return self.is_valid_group(pick);
        }
        for i in from..cards.len() {
            pick.push(cards[i]);
            if self.scan(cards, i + 1, pick) {
                return true;
            }
            pick.pop();
        }
        false
    }

    fn uniform(digits: &[u8]) -> bool {
        digits.iter().all(|d| Some(d) == digits.first())
    }

    fn distinct(digits: &[u8]) -> bool {
        let mut sorted = digits.to_vec();
        sorted.sort_unstable();
        sorted.windows(2).all(|w| w[0] != w[1])
    }
}

impl Oracle for Judge {
    fn is_valid_group(&self, cards: &[Card]) -> bool {
        (0..self.features).all(|f| {
            let digits = cards.iter().map(|c| c.digit(f)).collect::<Vec<_>>();
            Self::uniform(&digits) || Self::distinct(&digits)
        })
    }

    fn has_any_valid_group(&self, cards: &[Card]) -> bool {
        let mut pick = Vec::with_capacity(self.group);
        self.scan(cards, 0, &mut pick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judge() -> Judge {
        Judge::new(4, 3)
    }

    fn cards(ids: &[u8]) -> Vec<Card> {
        ids.iter().copied().map(Card::from).collect()
    }

    #[test]
    fn accepts_distinct_first_feature() {
        // 0 1 2 differ in the first feature and agree on the rest
        assert!(judge().is_valid_group(&cards(&[0, 1, 2])));
    }

    #[test]
    fn accepts_distinct_everywhere() {
        // 0 13 26 differ in three features and agree on the last
        assert!(judge().is_valid_group(&cards(&[0, 13, 26])));
    }

    #[test]
    fn rejects_two_of_a_kind() {
        // first feature reads 0 1 0
        assert!(!judge().is_valid_group(&cards(&[0, 1, 3])));
    }

    #[test]
    fn scans_combinations() {
        let judge = judge();
        assert!(judge.has_any_valid_group(&cards(&[0, 1, 2, 4])));
        assert!(!judge.has_any_valid_group(&cards(&[0, 1])));
        assert!(!judge.has_any_valid_group(&cards(&[0, 1, 3])));
        assert!(!judge.has_any_valid_group(&[]));
    }

    #[test]
    fn judges_wide_feature_spaces() {
        // features past the ids in play read zero for every card
        let judge = Judge::new(7, 3);
        assert!(judge.is_valid_group(&cards(&[0, 1, 2])));
        assert!(!judge.is_valid_group(&cards(&[0, 1, 3])));
    }
}
