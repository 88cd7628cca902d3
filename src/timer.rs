//! Millisecond clocks and an owned set of pending timers.
//!
//! Timers never run callbacks on their own. The owner asks [`TimerSet::next_due`]
//! for expired entries from its update loop, so clearing the set (or dropping
//! it with its owner) is all it takes to guarantee nothing fires later.

use log::debug;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since construction, from the monotonic system clock.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) -> u64 {
        let next = self.now.get().saturating_add(ms);
        self.now.set(next);
        next
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due_ms: u64,
    repeat: Repeat,
}

/// A timer that expired, with the time it was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub due_ms: u64,
}

#[derive(Debug, Default)]
pub struct TimerSet {
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, due_ms: u64, repeat: Repeat) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer { id, due_ms, repeat });
        debug!("timer {:?} scheduled for {} ({:?})", id, due_ms, repeat);
        id
    }

    pub fn set_timeout(&mut self, now_ms: u64, delay_ms: u64) -> TimerId {
        self.insert(now_ms.saturating_add(delay_ms), Repeat::Once)
    }

    /// Repeats every `period_ms` starting one period after `now_ms`.
    /// A zero period is bumped to 1ms.
    pub fn set_interval(&mut self, now_ms: u64, period_ms: u64) -> TimerId {
        let period = period_ms.max(1);
        self.insert(now_ms.saturating_add(period), Repeat::Every(period))
    }

    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        before != self.timers.len()
    }

    pub fn clear_all(&mut self) -> usize {
        let n = self.timers.len();
        self.timers.clear();
        n
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Pops the earliest timer due at or before `now_ms`.
    ///
    /// One-shot timers are removed. Intervals fire once per call even if
    /// several periods were missed, then move to their next slot after `now_ms`.
    /// An interval whose next slot would pass `u64::MAX` is dropped.
    pub fn next_due(&mut self, now_ms: u64) -> Option<Fired> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        let Timer { id, due_ms, repeat } = self.timers[idx].clone();
        let fired = Fired { id, due_ms };
        match repeat {
            Repeat::Once => {
                self.timers.swap_remove(idx);
            }
            Repeat::Every(period) => {
                let missed = (now_ms - due_ms) / period;
                let next = missed
                    .checked_add(1)
                    .and_then(|slots| slots.checked_mul(period))
                    .and_then(|step| due_ms.checked_add(step));
                match next {
                    Some(next) => self.timers[idx].due_ms = next,
                    None => {
                        debug!("timer {:?} has no slot left on the clock", id);
                        self.timers.swap_remove(idx);
                    }
                }
            }
        }
        Some(fired)
    }
}
