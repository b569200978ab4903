use super::dealer::Dealer;
use super::gate::Gate;
use super::inbox::Keys;
use super::player::Player;
use super::seat::Seat;
use crate::cards::Deck;
use crate::cards::Judge;
use crate::config::Config;
use crate::screen::Screen;
use crate::table::Table;
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::sync::mpsc::channel;

/// Wires one game: the table, the candidate channel, the seats and their
/// actors, and the dealer that runs them. Human seats come first and each
/// takes a keyboard row.
pub struct Room {
    dealer: Dealer,
    keypads: Vec<(Keys, &'static str)>,
    halt: Arc<AtomicBool>,
}

impl Room {
    pub fn new(config: Config, screen: Arc<dyn Screen>) -> Self {
        let table = Arc::new(Table::new(config.board_size, config.players()));
        let (submit, submissions) = channel();
        let mut players = Vec::new();
        let mut seats = Vec::new();
        let mut keypads = Vec::new();
        for position in 0..config.players() {
            let human = position < config.humans;
            let gate = Arc::new(Gate::default());
            let quit = Arc::new(AtomicBool::new(false));
            let score = Arc::new(AtomicU32::new(0));
            let player = Player::new(
                position,
                human,
                config.clone(),
                table.clone(),
                screen.clone(),
                submit.clone(),
                gate.clone(),
                quit.clone(),
                score.clone(),
            );
            if human {
                if let Some(row) = config.key_row(position) {
                    keypads.push((player.keys(), row));
                }
            }
            seats.push(Seat {
                position,
                gate,
                quit,
                score,
                thread: None,
            });
            players.push(player);
        }
        let judge = Judge::new(config.feature_count, config.group_size);
        let deck = Deck::fresh(config.deck_size);
        let halt = Arc::new(AtomicBool::new(false));
        let dealer = Dealer::new(
            config,
            table,
            screen,
            Box::new(judge),
            deck,
            submissions,
            seats,
            players,
            halt.clone(),
        );
        Self {
            dealer,
            keypads,
            halt,
        }
    }

    /// Feed stdin to the human seats on a detached thread. Each human owns
    /// one keyboard row; a key routes to the slot at its column, and a
    /// capital Q ends the game early. The thread dies with the process,
    /// there is nothing to join through a blocked read.
    pub fn route_stdin(&self) {
        let keypads = self.keypads.clone();
        let halt = self.halt.clone();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if line.trim() == "Q" {
                    halt.store(true, Ordering::Relaxed);
                    break;
                }
                for key in line.chars() {
                    for (keys, row) in &keypads {
                        if let Some(slot) = row.find(key) {
                            keys.press(slot);
                        }
                    }
                }
            }
        });
    }

    /// Run the dealer to completion on its own thread; a panic anywhere in
    /// the room surfaces here as an error.
    pub fn play(self) -> anyhow::Result<()> {
        let dealer = self.dealer;
        std::thread::spawn(move || dealer.run())
            .join()
            .map_err(|_| anyhow::anyhow!("dealer thread panicked"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Cue;
    use crate::screen::Tape;
    use std::sync::mpsc;
    use std::time::Duration;
    use std::time::Instant;

    #[test]
    fn a_human_plays_a_full_game() {
        // one feature, so the whole three-card deck is one valid group
        let config = Config {
            deck_size: 3,
            board_size: 3,
            group_size: 3,
            feature_count: 1,
            humans: 1,
            robots: 0,
            turn_timeout: Duration::from_secs(60),
            turn_warning: Duration::from_secs(5),
            point_freeze: Duration::ZERO,
            penalty_freeze: Duration::ZERO,
            deal_grace: Duration::ZERO,
            tick: Duration::from_millis(1),
        };
        assert!(config.validate().is_ok());
        let tape = Arc::new(Tape::default());
        let room = Room::new(config, tape.clone());
        let keys = room.keypads[0].0.clone();
        let (done, finished) = mpsc::channel();
        std::thread::spawn(move || done.send(room.play().is_ok()));
        // presses ahead of the first deal land on an empty board and are
        // rightly dropped, so hold them until the clock starts ticking
        let dealt = Instant::now() + Duration::from_secs(5);
        while Instant::now() < dealt
            && !tape
                .cues()
                .iter()
                .any(|cue| matches!(cue, Cue::Countdown { .. }))
        {
            std::thread::yield_now();
        }
        for slot in 0..3 {
            assert!(keys.press(slot));
        }
        assert_eq!(finished.recv_timeout(Duration::from_secs(10)), Ok(true));
        assert_eq!(tape.standings(), Some(vec![0]));
        assert!(tape.cues().contains(&Cue::Score {
            player: 0,
            score: 1
        }));
    }

    #[test]
    fn a_dead_pool_ends_immediately_in_a_tie() {
        // two cards cannot form a group of three, so the game is over at
        // the first pre-round check, robots and all
        let config = Config {
            deck_size: 2,
            board_size: 3,
            group_size: 3,
            feature_count: 4,
            humans: 0,
            robots: 2,
            turn_timeout: Duration::from_secs(60),
            turn_warning: Duration::from_secs(5),
            point_freeze: Duration::ZERO,
            penalty_freeze: Duration::ZERO,
            deal_grace: Duration::ZERO,
            tick: Duration::from_millis(1),
        };
        assert!(config.validate().is_ok());
        let tape = Arc::new(Tape::default());
        let room = Room::new(config, tape.clone());
        let (done, finished) = mpsc::channel();
        std::thread::spawn(move || done.send(room.play().is_ok()));
        assert_eq!(finished.recv_timeout(Duration::from_secs(10)), Ok(true));
        assert_eq!(tape.standings(), Some(vec![0, 1]));
    }
}
