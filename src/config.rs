use std::time::Duration;

/// Keyboard rows routed to human seats, one row per seat, one key per slot.
/// Mirrors the classic two-row layout: top row for seat 0, home row for seat 1.
pub const KEY_ROWS: [&str; 2] = ["qwertyuiop[]", "asdfghjkl;'\\"];

/// Values each card feature can take. Three is load-bearing for the
/// all-same-or-all-distinct rule, so it is a constant rather than a knob.
pub const FEATURE_VALUES: usize = 3;

/// Card ids fit in a u8; no deck holds more distinct cards than this.
pub const CARD_IDS: usize = u8::MAX as usize + 1;

/// Tunables for one game. Everything the dealer, the players, and their
/// generators consume at startup; nothing here changes once the room runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// cards in the full deck, ids 0..deck_size
    pub deck_size: usize,
    /// slots on the table grid
    pub board_size: usize,
    /// cards per submitted group (K)
    pub group_size: usize,
    /// features encoded per card id
    pub feature_count: usize,
    /// seats driven by the keyboard router
    pub humans: usize,
    /// seats driven by input generators
    pub robots: usize,
    /// turn clock; expiry forces a full reshuffle
    pub turn_timeout: Duration,
    /// countdown goes urgent below this
    pub turn_warning: Duration,
    /// freeze after a legal group
    pub point_freeze: Duration,
    /// freeze after an illegal group
    pub penalty_freeze: Duration,
    /// slack added to the first deadline of a round so dealing does not eat the clock
    pub deal_grace: Duration,
    /// dealer polling granularity; trades CPU for countdown smoothness
    pub tick: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deck_size: 81,
            board_size: 12,
            group_size: 3,
            feature_count: 4,
            humans: 0,
            robots: 2,
            turn_timeout: Duration::from_secs(60),
            turn_warning: Duration::from_secs(5),
            point_freeze: Duration::from_secs(1),
            penalty_freeze: Duration::from_secs(3),
            deal_grace: Duration::from_secs(2),
            tick: Duration::from_millis(1),
        }
    }
}

impl Config {
    pub fn players(&self) -> usize {
        self.humans + self.robots
    }

    /// Key row routed to a given human seat, clipped to the board width.
    pub fn key_row(&self, seat: crate::Position) -> Option<&'static str> {
        KEY_ROWS
            .get(seat)
            .copied()
            .map(|row| &row[..row.len().min(self.board_size)])
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.players() > 0, "at least one player");
        anyhow::ensure!(self.humans <= KEY_ROWS.len(), "not enough key rows");
        anyhow::ensure!(self.group_size >= 2, "groups need at least two cards");
        anyhow::ensure!(
            self.board_size >= self.group_size,
            "board narrower than one group"
        );
        anyhow::ensure!(
            self.deck_size <= CARD_IDS,
            "deck larger than the card id space"
        );
        anyhow::ensure!(
            FEATURE_VALUES
                .checked_pow(self.feature_count as u32)
                .is_some_and(|space| self.deck_size <= space),
            "deck too large for {} features",
            self.feature_count
        );
        anyhow::ensure!(!self.tick.is_zero(), "tick must be positive");
        anyhow::ensure!(!self.turn_timeout.is_zero(), "turn clock must be positive");
        Ok(())
    }
}
