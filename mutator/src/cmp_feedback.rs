//! Lock-free comparison-feedback dictionary: written by instrumentation
//! threads (the producer), read here without locking. The mutation engine
//! never writes; readers tolerate torn or transient zero entries by
//! treating them as "missing".

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use common::config::mutation::CMP_FEEDBACK_CAPACITY;

use crate::random::RandomOracle;

struct CmpEntry {
    // 0 means "empty" / not yet written, or torn under concurrent access.
    len: AtomicUsize,
    val: AtomicU64,
}

pub struct CmpFeedback {
    count: AtomicUsize,
    entries: Vec<CmpEntry>,
}

impl CmpFeedback {
    pub fn new() -> Self {
        Self {
            count: AtomicUsize::new(0),
            entries: (0..CMP_FEEDBACK_CAPACITY)
                .map(|_| CmpEntry {
                    len: AtomicUsize::new(0),
                    val: AtomicU64::new(0),
                })
                .collect(),
        }
    }

    /// Called by instrumentation on an observed comparison operand. Not on
    /// the mutation hot path.
    pub fn record(&self, value: u64, len: usize) {
        let idx = self.count.fetch_add(1, Ordering::Relaxed) % CMP_FEEDBACK_CAPACITY;
        let entry = &self.entries[idx];
        entry.val.store(value, Ordering::Relaxed);
        entry.len.store(len, Ordering::Release);
    }

    /// Picks a uniformly random live entry, tolerating a transient zero
    /// length by reporting it as absent rather than retrying.
    pub fn random_entry(&self, rng: &mut dyn RandomOracle) -> Option<(u64, usize)> {
        let count = self.count.load(Ordering::Acquire);
        if count == 0 {
            return None;
        }

        let live = count.min(CMP_FEEDBACK_CAPACITY);
        let idx = rng.rand(0, live - 1);
        let entry = &self.entries[idx];

        let len = entry.len.load(Ordering::Acquire);
        if len == 0 {
            return None;
        }

        let val = entry.val.load(Ordering::Acquire);
        Some((val, len))
    }
}

impl Default for CmpFeedback {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::random::FastRandOracle;

    #[test]
    fn empty_feedback_yields_nothing() {
        let feedback = CmpFeedback::new();
        let mut oracle = FastRandOracle;
        assert!(feedback.random_entry(&mut oracle).is_none());
    }

    #[test]
    fn recorded_entry_is_observable() {
        let feedback = CmpFeedback::new();
        feedback.record(0xdead_beef, 4);

        let mut oracle = FastRandOracle;
        let (val, len) = feedback.random_entry(&mut oracle).expect("entry recorded");
        assert_eq!(val, 0xdead_beef);
        assert_eq!(len, 4);
    }

    #[test]
    fn ring_buffer_wraps_past_capacity() {
        let feedback = CmpFeedback::new();
        for i in 0..(CMP_FEEDBACK_CAPACITY + 10) {
            feedback.record(i as u64, 8);
        }

        let mut oracle = FastRandOracle;
        assert!(feedback.random_entry(&mut oracle).is_some());
    }
}
