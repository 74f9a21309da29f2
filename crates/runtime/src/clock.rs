use std::collections::BTreeSet;

use tracing::trace;

use crate::frame::Frame;

/// Identifies one subscription to the clock's tick signal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// One advance of the clock: the new frame plus the listeners to notify.
///
/// Listener ids are sorted, so dispatch order is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub frame: Frame,
    listeners: Vec<ListenerId>,
}

impl Tick {
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    pub fn notifies(&self, id: ListenerId) -> bool {
        self.listeners.binary_search(&id).is_ok()
    }
}

/// Per-frame tick signal driven by the host render loop.
///
/// The clock does not own listener callbacks. Listeners hold their
/// `ListenerId` and check it against each `Tick`, which keeps ownership of
/// listener state with the listener itself.
#[derive(Debug)]
pub struct Clock {
    frame: Frame,
    started: bool,
    next_id: u64,
    listeners: BTreeSet<ListenerId>,
}

impl Clock {
    pub fn new(dt_s: f64) -> Self {
        Self {
            frame: Frame::new(0, dt_s),
            started: false,
            next_id: 0,
            listeners: BTreeSet::new(),
        }
    }

    /// Frame of the most recent tick (frame 0 before the first tick).
    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn subscribe(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.insert(id);
        trace!(listener = id.0, "tick listener added");
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(&id);
        trace!(listener = id.0, removed, "tick listener removed");
        removed
    }

    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Advance one frame. The first call yields frame 0.
    pub fn advance(&mut self) -> Tick {
        if self.started {
            self.frame = self.frame.next();
        } else {
            self.started = true;
        }
        Tick {
            frame: self.frame,
            listeners: self.listeners.iter().copied().collect(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}
