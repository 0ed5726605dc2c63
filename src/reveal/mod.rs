//! Scroll-reveal bookkeeping for the public page.
//!
//! Elements start hidden and are revealed once, the first time at least
//! [`REVEAL_THRESHOLD`] of their area becomes visible. The watcher is a
//! one-shot latch per key: after reveal the key is no longer observed.

use std::collections::HashSet;
use std::hash::Hash;

pub const REVEAL_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct RevealWatcher<K> {
    threshold: f64,
    observed: HashSet<K>,
    revealed: HashSet<K>,
    disposed: bool,
}

impl<K: Eq + Hash + Clone> RevealWatcher<K> {
    pub fn new() -> Self {
        Self::with_threshold(REVEAL_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            observed: HashSet::new(),
            revealed: HashSet::new(),
            disposed: false,
        }
    }

    /// Starts watching `key`. Already revealed keys and disposed watchers ignore this.
    pub fn observe(&mut self, key: K) -> bool {
        if self.disposed || self.revealed.contains(&key) {
            return false;
        }
        self.observed.insert(key)
    }

    /// Applies a batch of visibility ratios and returns the keys revealed by it.
    pub fn on_intersections(&mut self, events: &[(K, f64)]) -> Vec<K> {
        if self.disposed {
            return Vec::new();
        }

        let mut newly_revealed = Vec::new();
        for (key, ratio) in events {
            if *ratio < self.threshold || !self.observed.remove(key) {
                continue;
            }
            self.revealed.insert(key.clone());
            newly_revealed.push(key.clone());
        }
        newly_revealed
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Stops observing everything; later events are ignored.
    pub fn dispose(&mut self) {
        self.observed.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<K: Eq + Hash + Clone> Default for RevealWatcher<K> {
    fn default() -> Self {
        Self::new()
    }
}
