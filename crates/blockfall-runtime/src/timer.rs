use std::time::Instant;

/// Handle of a one-shot timer registered with
/// [`Runtime::schedule_once`](crate::Runtime::schedule_once).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("timer#{_0}")]
pub struct TimerId(u64);

/// Pending one-shot timers, fired in deadline order.
///
/// Timers with the same deadline fire in registration order.
#[derive(Debug, Default)]
pub(super) struct TimerQueue {
    next_id: u64,
    pending: Vec<(Instant, TimerId)>,
}

impl TimerQueue {
    pub(super) fn schedule(&mut self, deadline: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Keep `pending` sorted by (deadline, id).
        let index = self.pending.partition_point(|(at, _)| *at <= deadline);
        self.pending.insert(index, (deadline, id));
        id
    }

    /// Removes a timer that has not fired yet.
    pub(super) fn cancel(&mut self, id: TimerId) -> bool {
        let len = self.pending.len();
        self.pending.retain(|(_, pending)| *pending != id);
        self.pending.len() != len
    }

    /// Removes and returns the earliest timer due at `now`.
    pub(super) fn pop_due(&mut self, now: Instant) -> Option<TimerId> {
        let (deadline, _) = self.pending.first()?;
        if *deadline > now {
            return None;
        }
        Some(self.pending.remove(0).1)
    }

    pub(super) fn next_deadline(&self) -> Option<Instant> {
        self.pending.first().map(|(deadline, _)| *deadline)
    }
}
