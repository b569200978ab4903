use crate::Slot;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::SyncSender;
use std::sync::mpsc::sync_channel;

/// Producer half of a player's keypress queue. Cheap to clone; one copy
/// lives in the input generator, one per human seat in the stdin router.
#[derive(Debug, Clone)]
pub struct Keys(SyncSender<Slot>);

impl Keys {
    /// Offer one keypress. Refused (false) when the queue is at capacity;
    /// nothing blocks and nothing is silently overwritten.
    pub fn press(&self, slot: Slot) -> bool {
        self.0.try_send(slot).is_ok()
    }
}

/// Bounded keypress queue owned by one player. Capacity is the group size:
/// more presses than that cannot be useful before the player catches up.
#[derive(Debug)]
pub struct Inbox {
    keys: SyncSender<Slot>,
    queue: Receiver<Slot>,
}

impl Inbox {
    pub fn new(capacity: usize) -> Self {
        let (keys, queue) = sync_channel(capacity);
        Self { keys, queue }
    }

    pub fn keys(&self) -> Keys {
        Keys(self.keys.clone())
    }

    pub fn poll(&self) -> Option<Slot> {
        self.queue.try_recv().ok()
    }

    /// Discard everything queued, e.g. presses that landed during a freeze.
    pub fn drain(&self) {
        while self.poll().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_in_first_out() {
        let inbox = Inbox::new(3);
        let keys = inbox.keys();
        assert!(keys.press(4));
        assert!(keys.press(7));
        assert_eq!(inbox.poll(), Some(4));
        assert_eq!(inbox.poll(), Some(7));
        assert_eq!(inbox.poll(), None);
    }

    #[test]
    fn refuses_past_capacity() {
        let inbox = Inbox::new(2);
        let keys = inbox.keys();
        assert!(keys.press(0));
        assert!(keys.press(1));
        assert!(!keys.press(2));
        assert_eq!(inbox.poll(), Some(0));
        assert!(keys.press(2));
    }

    #[test]
    fn drain_empties_the_queue() {
        let inbox = Inbox::new(3);
        let keys = inbox.keys();
        keys.press(0);
        keys.press(1);
        inbox.drain();
        assert_eq!(inbox.poll(), None);
    }
}
