use clap::Parser;
use setroom::config::Config;
use setroom::room::Room;
use setroom::screen::Console;
use std::sync::Arc;
use std::time::Duration;

/// One dealer, a grid of cards, and a race to call groups first. Human
/// seats read the keyboard (row 1: qwertyuiop[], row 2: asdfghjkl;'\);
/// robot seats run on input generators. Q<enter> ends the game early.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// keyboard-driven seats
    #[arg(long, default_value_t = 0)]
    humans: usize,
    /// generator-driven seats
    #[arg(long, default_value_t = 2)]
    robots: usize,
    /// seconds on the turn clock
    #[arg(long, default_value_t = 60)]
    turn: u64,
    /// seconds frozen after a legal group
    #[arg(long, default_value_t = 1)]
    point: u64,
    /// seconds frozen after an illegal group
    #[arg(long, default_value_t = 3)]
    penalty: u64,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            humans: args.humans,
            robots: args.robots,
            turn_timeout: Duration::from_secs(args.turn),
            point_freeze: Duration::from_secs(args.point),
            penalty_freeze: Duration::from_secs(args.penalty),
            ..Self::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setroom::log();
    let config = Config::from(args);
    config.validate()?;
    let room = Room::new(config, Arc::new(Console));
    room.route_stdin();
    room.play()
}
