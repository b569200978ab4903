use crate::Position;
use crate::Slot;

/// One player's complete selection, slots in acquisition order. Built once
/// when the held set reaches the group size, submitted once, consumed once
/// by the dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub player: Position,
    pub slots: Vec<Slot>,
}
