use super::gate::Gate;
use super::inbox::Keys;
use crate::Position;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// Input source for one non-human player. Fires uniformly random slot
/// presses as fast as the inbox accepts them while its gate is open; while
/// the gate is closed it produces nothing and naps a tick between checks.
#[derive(Debug)]
pub struct Generator {
    position: Position,
    slots: usize,
    tick: Duration,
    keys: Keys,
    gate: Arc<Gate>,
    quit: Arc<AtomicBool>,
}

impl Generator {
    pub fn new(
        position: Position,
        slots: usize,
        tick: Duration,
        keys: Keys,
        gate: Arc<Gate>,
        quit: Arc<AtomicBool>,
    ) -> Self {
        Self {
            position,
            slots,
            tick,
            keys,
            gate,
            quit,
        }
    }

    pub fn run(self) {
        log::debug!("generator {} thread starting", self.position);
        while !self.quit.load(Ordering::Relaxed) {
            if !self.gate.is_open() {
                std::thread::sleep(self.tick);
            } else if !self.keys.press(rand::random_range(0..self.slots)) {
                // inbox full, back off a tick
                std::thread::sleep(self.tick);
            }
        }
        log::debug!("generator {} thread terminated", self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::inbox::Inbox;
    use std::time::Instant;

    fn rig(open: bool) -> (Inbox, Arc<Gate>, Arc<AtomicBool>, std::thread::JoinHandle<()>) {
        let inbox = Inbox::new(3);
        let gate = Arc::new(Gate::default());
        if open {
            gate.open();
        }
        let quit = Arc::new(AtomicBool::new(false));
        let generator = Generator::new(
            0,
            12,
            Duration::from_millis(1),
            inbox.keys(),
            gate.clone(),
            quit.clone(),
        );
        let thread = std::thread::spawn(move || generator.run());
        (inbox, gate, quit, thread)
    }

    #[test]
    fn closed_gate_produces_nothing() {
        let (inbox, _gate, quit, thread) = rig(false);
        std::thread::sleep(Duration::from_millis(20));
        quit.store(true, Ordering::Relaxed);
        thread.join().unwrap();
        assert_eq!(inbox.poll(), None);
    }

    #[test]
    fn open_gate_fills_the_inbox() {
        let (inbox, _gate, quit, thread) = rig(true);
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut slot = None;
        while slot.is_none() && Instant::now() < deadline {
            slot = inbox.poll();
        }
        quit.store(true, Ordering::Relaxed);
        thread.join().unwrap();
        assert!(slot.is_some_and(|slot| slot < 12));
    }
}
