//! Cancellable deadline scheduling for the recognizer.
//!
//! There is no OS timer and no thread here: the queue just remembers keyed
//! deadlines and hands back the keys that came due when the owner makes
//! time pass. Two firing modes exist because of the event-ordering rule in
//! the recognizer: an input event that arrives *at* a deadline must be able
//! to cancel the timer before it is observed to fire, so the pre-event pass
//! only fires deadlines strictly before the event timestamp, while the host
//! pump fires everything due up to and including "now".

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug)]
struct TimerEntry<K> {
    key: K,
    deadline_ms: u64,
}

/// Keyed queue of one-shot deadlines. Re-arming a live key replaces its
/// deadline; each key is independently cancellable.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue<K> {
    entries: SmallVec<[TimerEntry<K>; 2]>,
}

impl<K: Copy + PartialEq> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Arms `key` to fire at `deadline_ms`, replacing any pending deadline
    /// for the same key.
    pub fn schedule(&mut self, key: K, deadline_ms: u64) {
        self.cancel(key);
        self.entries.push(TimerEntry { key, deadline_ms });
    }

    /// Cancels `key` if pending. Returns whether anything was cancelled.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    /// Clears every pending timer.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_scheduled(&self, key: K) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and returns keys whose deadline is `<= now_ms`, in deadline
    /// order. Used by the host-driven time pump.
    pub fn fire_due(&mut self, now_ms: u64) -> SmallVec<[K; 2]> {
        self.fire(|deadline| deadline <= now_ms)
    }

    /// Removes and returns keys whose deadline is strictly `< time_ms`, in
    /// deadline order. Used ahead of an input event so the event wins ties.
    pub fn fire_before(&mut self, time_ms: u64) -> SmallVec<[K; 2]> {
        self.fire(|deadline| deadline < time_ms)
    }

    fn fire(&mut self, due: impl Fn(u64) -> bool) -> SmallVec<[K; 2]> {
        let mut fired: SmallVec<[TimerEntry<K>; 2]> = SmallVec::new();
        self.entries.retain(|e| {
            if due(e.deadline_ms) {
                fired.push(*e);
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|e| e.deadline_ms);
        fired.into_iter().map(|e| e.key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Key {
        A,
        B,
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(Key::B, 500);
        queue.schedule(Key::A, 300);

        let fired = queue.fire_due(600);
        assert_eq!(fired.as_slice(), &[Key::A, Key::B]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fire_due_is_inclusive() {
        let mut queue = TimerQueue::new();
        queue.schedule(Key::A, 300);
        assert_eq!(queue.fire_due(300).as_slice(), &[Key::A]);
    }

    #[test]
    fn test_fire_before_is_exclusive() {
        let mut queue = TimerQueue::new();
        queue.schedule(Key::A, 300);

        assert!(queue.fire_before(300).is_empty());
        assert!(queue.is_scheduled(Key::A));
        assert_eq!(queue.fire_before(301).as_slice(), &[Key::A]);
    }

    #[test]
    fn test_cancel_only_named_key() {
        let mut queue = TimerQueue::new();
        queue.schedule(Key::A, 300);
        queue.schedule(Key::B, 500);

        assert!(queue.cancel(Key::A));
        assert!(!queue.cancel(Key::A));
        assert!(!queue.is_scheduled(Key::A));
        assert!(queue.is_scheduled(Key::B));
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let mut queue = TimerQueue::new();
        queue.schedule(Key::A, 300);
        queue.schedule(Key::A, 800);

        assert!(queue.fire_due(500).is_empty());
        assert_eq!(queue.fire_due(800).as_slice(), &[Key::A]);
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TimerQueue::new();
        queue.schedule(Key::A, 300);
        queue.schedule(Key::B, 500);
        queue.cancel_all();
        assert!(queue.is_empty());
        assert!(queue.fire_due(u64::MAX).is_empty());
    }
}
