//! Bounded rolling buffer of recently formatted log lines.
//!
//! Every event entering the pipeline is appended here regardless of the
//! severity threshold, so an outgoing report can carry the lead-up to the
//! failure. The buffer holds at most `capacity` lines; appending beyond
//! that silently evicts the oldest.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// Default number of lines retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

#[derive(Debug)]
struct Inner {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Inner {
    fn evict_over_capacity(&mut self) {
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }
}

/// Thread-safe fixed-capacity FIFO of formatted log lines.
///
/// All methods take `&self`; a `parking_lot` mutex guards the buffer so the
/// size bound holds at every observable point under concurrent appends.
#[derive(Debug)]
pub struct BoundedHistory {
    inner: Mutex<Inner>,
}

impl BoundedHistory {
    /// Create a buffer retaining at most `capacity` lines.
    ///
    /// Capacity zero is honoured: every append evicts immediately and the
    /// buffer stays empty.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                lines: VecDeque::new(),
                capacity,
            }),
        }
    }

    /// Append a line, evicting the oldest entries beyond capacity.
    pub fn add(&self, line: impl Into<String>) {
        let mut inner = self.inner.lock();
        inner.lines.push_back(line.into());
        inner.evict_over_capacity();
    }

    /// Copy the current contents, oldest first.
    ///
    /// The copy is independent of the buffer: later appends never alter an
    /// already-taken snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.lock().lines.iter().cloned().collect()
    }

    /// Change the capacity, discarding all buffered lines.
    pub fn reconfigure(&self, capacity: usize) {
        let mut inner = self.inner.lock();
        inner.lines = VecDeque::new();
        inner.capacity = capacity;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().lines.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }
}

impl Default for BoundedHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
