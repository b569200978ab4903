use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Generator throttle. The dealer shuts it while the owner's candidate is
/// under review and across sweeps; a closed gate means the generator
/// produces nothing at all, not merely less. Gates start closed and open
/// with the first deal.
#[derive(Debug, Default)]
pub struct Gate(AtomicBool);

impl Gate {
    pub fn open(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn close(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_open(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert!(!Gate::default().is_open());
    }

    #[test]
    fn swings_both_ways() {
        let gate = Gate::default();
        gate.open();
        assert!(gate.is_open());
        gate.close();
        assert!(!gate.is_open());
    }
}
