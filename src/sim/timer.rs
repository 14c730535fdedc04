//! One-shot deferred events
//!
//! Each entry carries the session generation it was scheduled in. A session
//! reset bumps the generation, so anything still queued from an older run is
//! recognisable as stale when it fires.

use serde::{Deserialize, Serialize};

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Bring a new enemy onto the playfield
    RespawnEnemy { generation: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    due: f64,
    seq: u64,
    event: TimerEvent,
}

/// Pending timers, fired in due order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once `due` (seconds on the game clock) has passed
    pub fn schedule(&mut self, due: f64, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled { due, seq, event });
    }

    /// Remove and return every event due at `now`, earliest first
    pub fn drain_due(&mut self, now: f64) -> Vec<TimerEvent> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = pending;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.event).collect()
    }

    /// Drop pending events matching `pred`
    pub fn cancel_matching<F: Fn(&TimerEvent) -> bool>(&mut self, pred: F) {
        self.pending.retain(|s| !pred(&s.event));
    }

    /// Drop everything pending
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending event
    pub fn next_due(&self) -> Option<f64> {
        self.pending.iter().map(|s| s.due).min_by(|a, b| a.total_cmp(b))
    }
}
