//! Virtual-clock scheduler for the tick loop and every hazard/expiry timer.
//!
//! Time only moves when the owner calls [`Scheduler::pop_due`] or
//! [`Scheduler::advance_to`], so the whole game can be driven from tests
//! without sleeping. Tasks are popped one at a time: a handler may cancel or
//! schedule timers before the next due task is looked up.

/// Handle to one scheduled timer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerId(u64);

/// Work a timer asks its owner to perform.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Task {
    Tick,
    SpawnEnergyFood,
    SpawnBombFood,
    RespawnMovingWall,
    ExpireEnergyFood,
    ExpireBombFood,
    HideTongue,
    HideUnlockMessage,
    HidePopup,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    id: TimerId,
    task: Task,
    due_ms: u64,
    period_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Runs `task` once, `delay_ms` from now.
    pub fn schedule_once(&mut self, task: Task, delay_ms: u64) -> TimerId {
        self.insert(task, delay_ms, None)
    }

    /// Runs `task` every `period_ms`, first after one full period.
    pub fn schedule_repeating(&mut self, task: Task, period_ms: u64) -> TimerId {
        let period_ms = period_ms.max(1);
        self.insert(task, period_ms, Some(period_ms))
    }

    fn insert(&mut self, task: Task, delay_ms: u64, period_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            task,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
        });
        id
    }

    /// Drops a timer. Returns false when it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    /// Cancels the timer in `slot`, if any, and empties the slot.
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            let _ = self.cancel(id);
        }
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Ties fire in scheduling order. Repeating timers are
    /// re-armed one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, Task)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.id))
            .map(|(index, _)| index)?;

        let Timer {
            id,
            task,
            due_ms,
            period_ms,
        } = self.timers[index];
        self.now_ms = self.now_ms.max(due_ms);

        match period_ms {
            Some(period_ms) => self.timers[index].due_ms = due_ms + period_ms,
            None => {
                let _ = self.timers.swap_remove(index);
            }
        }

        Some((id, task))
    }

    /// Moves the clock forward to `now_ms` once every due task was popped.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
