pub mod console;
pub use console::*;
pub mod tape;
pub use tape::*;

use crate::Position;
use crate::Score;
use std::time::Duration;

/// Rendering seam. Everything the engine shows a user funnels through one
/// of these calls, from any thread. Implementations get scalars, never a
/// handle to game state.
pub trait Screen: Send + Sync {
    /// turn clock, published every dealer tick
    fn countdown(&self, remaining: Duration, urgent: bool);
    /// a player's new total
    fn score(&self, player: Position, score: Score);
    /// freeze countdown, once a second while frozen, zero on release
    fn freeze(&self, player: Position, remaining: Duration);
    /// final standings, ties included
    fn winners(&self, winners: &[Position]);
}
