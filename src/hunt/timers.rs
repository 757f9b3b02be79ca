//! Timer registry for the hunt round.
//!
//! Every periodic and delayed action of a round lives here so that ending or
//! resetting a round is a single `cancel_all`. Time is the page clock in
//! milliseconds (`performance.now()`); the registry never reads a clock itself.

use std::collections::BTreeMap;

use super::entity::EntityId;

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    Countdown,
    Spawn,
    Motion(EntityId),
    RemoveCaught(EntityId),
    EndRound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Timer {
    action: TimerAction,
    due_ms: f64,
    /// `Some(period)` for repeating timers.
    period_ms: Option<f64>,
}

#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: BTreeMap<TimerId, Timer>,
    next_id: u64,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// First firing is one period after `now`.
    pub fn schedule_interval(&mut self, period_ms: f64, action: TimerAction, now: f64) -> TimerId {
        self.insert(Timer { action, due_ms: now + period_ms, period_ms: Some(period_ms) })
    }

    pub fn schedule_timeout(&mut self, delay_ms: f64, action: TimerAction, now: f64) -> TimerId {
        self.insert(Timer { action, due_ms: now + delay_ms, period_ms: None })
    }

    fn insert(&mut self, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, timer);
        id
    }

    /// Returns whether a live timer was removed. Cancelling twice is harmless.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest timer due at or before `now`, with the time it was due; ties go
    /// to the older timer. Repeating timers are re-armed one period later (so a
    /// late caller sees every missed period), one-shots are removed.
    pub fn pop_due(&mut self, now: f64) -> Option<(TimerId, TimerAction, f64)> {
        let (&id, _) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= now)
            .min_by(|(ia, a), (ib, b)| a.due_ms.total_cmp(&b.due_ms).then(ia.cmp(ib)))?;
        let timer = self.timers.get_mut(&id)?;
        let action = timer.action;
        let due = timer.due_ms;
        match timer.period_ms {
            Some(period) => timer.due_ms += period,
            None => {
                self.timers.remove(&id);
            }
        }
        Some((id, action, due))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_catches_up_on_missed_periods() {
        let mut reg = TimerRegistry::new();
        reg.schedule_interval(1000.0, TimerAction::Countdown, 0.0);
        let fired: Vec<f64> = std::iter::from_fn(|| reg.pop_due(3500.0))
            .map(|(_, _, due)| due)
            .collect();
        assert_eq!(fired, vec![1000.0, 2000.0, 3000.0]);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn timeout_fires_once() {
        let mut reg = TimerRegistry::new();
        reg.schedule_timeout(500.0, TimerAction::EndRound, 100.0);
        assert!(reg.pop_due(599.0).is_none());
        assert_eq!(
            reg.pop_due(10_000.0).map(|(_, a, due)| (a, due)),
            Some((TimerAction::EndRound, 600.0))
        );
        assert!(reg.pop_due(10_000.0).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn earliest_due_fires_first_and_ties_go_to_older_timer() {
        let mut reg = TimerRegistry::new();
        reg.schedule_interval(2000.0, TimerAction::Spawn, 0.0);
        reg.schedule_interval(1000.0, TimerAction::Countdown, 0.0);
        let order: Vec<_> = std::iter::from_fn(|| reg.pop_due(2000.0)).map(|(_, a, _)| a).collect();
        // countdown @1000, spawn @2000 (older), countdown @2000
        assert_eq!(
            order,
            vec![TimerAction::Countdown, TimerAction::Spawn, TimerAction::Countdown]
        );
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut reg = TimerRegistry::new();
        let id = reg.schedule_interval(50.0, TimerAction::Motion(EntityId(1)), 0.0);
        assert!(reg.cancel(id));
        assert!(!reg.cancel(id));
        assert!(!reg.is_scheduled(id));
        reg.cancel_all();
        reg.cancel_all();
        assert!(reg.pop_due(f64::MAX).is_none());
    }
}
