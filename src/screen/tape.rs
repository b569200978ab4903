use super::Screen;
use crate::Position;
use crate::Score;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded display call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue {
    Countdown { remaining: Duration, urgent: bool },
    Score { player: Position, score: Score },
    Freeze { player: Position, remaining: Duration },
    Winners { winners: Vec<Position> },
}

/// Recording screen for tests: keeps every cue in call order and renders
/// nothing.
#[derive(Debug, Default)]
pub struct Tape(Mutex<Vec<Cue>>);

impl Tape {
    fn record(&self, cue: Cue) {
        self.0.lock().expect("tape lock poisoned").push(cue);
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.0.lock().expect("tape lock poisoned").clone()
    }

    /// The last announced standings, if the game got that far.
    pub fn standings(&self) -> Option<Vec<Position>> {
        self.cues().into_iter().rev().find_map(|cue| match cue {
            Cue::Winners { winners } => Some(winners),
            _ => None,
        })
    }
}

impl Screen for Tape {
    fn countdown(&self, remaining: Duration, urgent: bool) {
        self.record(Cue::Countdown { remaining, urgent });
    }

    fn score(&self, player: Position, score: Score) {
        self.record(Cue::Score { player, score });
    }

    fn freeze(&self, player: Position, remaining: Duration) {
        self.record(Cue::Freeze { player, remaining });
    }

    fn winners(&self, winners: &[Position]) {
        self.record(Cue::Winners {
            winners: winners.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_cues_in_call_order() {
        let tape = Tape::default();
        tape.score(0, 1);
        tape.freeze(0, Duration::from_secs(1));
        tape.winners(&[0]);
        assert_eq!(
            tape.cues(),
            vec![
                Cue::Score {
                    player: 0,
                    score: 1
                },
                Cue::Freeze {
                    player: 0,
                    remaining: Duration::from_secs(1)
                },
                Cue::Winners { winners: vec![0] },
            ]
        );
        assert_eq!(tape.standings(), Some(vec![0]));
    }
}
