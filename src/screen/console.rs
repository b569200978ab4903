use super::Screen;
use crate::Position;
use crate::Score;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

/// Terminal renderer. The countdown repaints one line in place; everything
/// else gets its own line.
#[derive(Debug, Default)]
pub struct Console;

impl Console {
    fn clock(remaining: Duration) -> String {
        let seconds = remaining.as_secs();
        format!(
            "{:02}:{:02}.{}",
            seconds / 60,
            seconds % 60,
            remaining.subsec_millis() / 100
        )
    }
}

impl Screen for Console {
    fn countdown(&self, remaining: Duration, urgent: bool) {
        let clock = Self::clock(remaining);
        let clock = if urgent {
            clock.red().bold()
        } else {
            clock.normal()
        };
        print!("\r  {}  ", clock);
        let _ = std::io::stdout().flush();
    }

    fn score(&self, player: Position, score: Score) {
        println!(
            "\rplayer {} scores, total {}",
            player,
            score.to_string().green().bold()
        );
    }

    fn freeze(&self, player: Position, remaining: Duration) {
        if remaining.is_zero() {
            println!("\rplayer {} may play again", player);
        } else {
            println!(
                "\rplayer {} frozen for {}",
                player,
                format!("{}s", remaining.as_secs()).yellow()
            );
        }
    }

    fn winners(&self, winners: &[Position]) {
        let banner = winners
            .iter()
            .map(|position| format!("player {}", position))
            .collect::<Vec<_>>()
            .join(", ");
        println!("\n{} {}", "winners:".green().bold(), banner.green().bold());
    }
}
