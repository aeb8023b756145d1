//! Fixed-capacity token history with majority voting.
//!
//! When the history is full, a new token **evicts** the oldest one, so the
//! most recent `capacity` tokens are always available.  A count map is kept
//! in step with the buffer so the majority never needs a full recount of
//! every distinct token.
//!
//! # Example
//!
//! ```rust
//! use sign_to_voice::engine::History;
//!
//! let mut h = History::new(4);
//! for t in ["A", "B", "B", "A", "C"] {
//!     h.push(t); // 5 items → capacity 4 → first "A" evicted
//! }
//! assert_eq!(h.len(), 4);
//! assert_eq!(h.majority(), Some(&"B"));
//! ```

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// A bounded, oldest-first buffer of tokens plus per-token counts.
///
/// ## Overflow behaviour
///
/// When [`push`](Self::push) would exceed `capacity`, the oldest token is
/// evicted.  The buffer never grows beyond its initial capacity.
#[derive(Debug, Clone)]
pub struct History<T> {
    buf: VecDeque<T>,
    capacity: usize,
    counts: HashMap<T, usize>,
}

impl<T: Clone + Eq + Hash> History<T> {
    /// Create an empty history holding at most `capacity` tokens.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "History capacity must be > 0");
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
            counts: HashMap::new(),
        }
    }

    /// Append `token`, evicting the oldest token when full.
    pub fn push(&mut self, token: T) {
        if self.buf.len() == self.capacity {
            if let Some(evicted) = self.buf.pop_front() {
                self.decrement(&evicted);
            }
        }
        *self.counts.entry(token.clone()).or_insert(0) += 1;
        self.buf.push_back(token);
    }

    fn decrement(&mut self, token: &T) {
        if let Some(count) = self.counts.get_mut(token) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(token);
            }
        }
    }

    /// The most frequent token.
    ///
    /// Ties go to the token whose first occurrence is oldest in the buffer.
    /// Returns `None` when empty.
    pub fn majority(&self) -> Option<&T> {
        let mut best: Option<(&T, usize)> = None;
        for token in &self.buf {
            let count = self.count(token);
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((token, count)),
            }
        }
        best.map(|(token, _)| token)
    }

    /// How many times `token` appears in the buffer.
    pub fn count(&self, token: &T) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Tokens oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    /// Discard all tokens.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.counts.clear();
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, tokens: &[&'static str]) -> History<&'static str> {
        let mut h = History::new(capacity);
        for t in tokens {
            h.push(*t);
        }
        h
    }

    // ---- Push / eviction ---------------------------------------------------

    #[test]
    fn push_within_capacity() {
        let h = filled(8, &["A", "B", "C"]);
        assert_eq!(h.len(), 3);
        assert!(!h.is_full());
        assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn overflow_evicts_oldest() {
        let h = filled(3, &["A", "B", "C", "D", "E"]);
        assert_eq!(h.len(), 3);
        assert!(h.is_full());
        assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec!["C", "D", "E"]);
        assert_eq!(h.count(&"A"), 0);
        assert_eq!(h.count(&"B"), 0);
    }

    #[test]
    fn counts_track_evictions() {
        let mut h = filled(4, &["A", "A", "B", "B"]);
        h.push("C");
        assert_eq!(h.count(&"A"), 1);
        h.push("C");
        assert_eq!(h.count(&"A"), 0);
        assert_eq!(h.count(&"B"), 2);
        assert_eq!(h.count(&"C"), 2);
    }

    // ---- Majority ----------------------------------------------------------

    #[test]
    fn majority_of_empty_is_none() {
        let h: History<&str> = History::new(4);
        assert_eq!(h.majority(), None);
    }

    #[test]
    fn majority_picks_most_frequent() {
        let h = filled(10, &["A", "B", "B", "C", "B", "A"]);
        assert_eq!(h.majority(), Some(&"B"));
    }

    #[test]
    fn majority_tie_goes_to_oldest_first_occurrence() {
        let h = filled(10, &["B", "A", "A", "B"]);
        assert_eq!(h.majority(), Some(&"B"));

        let h = filled(10, &["C", "A", "B", "A", "B"]);
        assert_eq!(h.majority(), Some(&"A"));
    }

    #[test]
    fn majority_changes_after_eviction() {
        let mut h = filled(5, &["A", "A", "A", "B", "B"]);
        assert_eq!(h.majority(), Some(&"A"));
        h.push("B"); // evicts one A → A:2 B:3
        assert_eq!(h.majority(), Some(&"B"));
    }

    // ---- Clear -------------------------------------------------------------

    #[test]
    fn clear_resets_state() {
        let mut h = filled(4, &["A", "B", "C", "D", "E"]);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.count(&"E"), 0);
        assert_eq!(h.majority(), None);

        h.push("Z");
        assert_eq!(h.majority(), Some(&"Z"));
    }

    #[test]
    #[should_panic(expected = "History capacity must be > 0")]
    fn zero_capacity_panics() {
        let _h: History<u8> = History::new(0);
    }
}
