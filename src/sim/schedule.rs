//! Timed tasks on the simulation clock
//!
//! Countdown ticks, die steps and round delays are logical waits. The tick
//! loop keeps running while they are pending; `advance` hands back whatever
//! came due. Tasks are plain values, the owner decides what they mean.
//!
//! The clock is `f64` so long sessions keep sub-millisecond resolution. A
//! positive delay always lands strictly after the current clock, even when it
//! is below the clock's precision, so a task rescheduling itself from inside
//! a pass is never due again in that same pass.

/// Handle to a scheduled task, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    due: f64,
    /// Re-arm interval for repeating tasks
    every: Option<f64>,
    task: T,
}

/// Single-threaded timer queue
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: f64,
    next_handle: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_handle: 1,
            entries: Vec::new(),
        }
    }

    /// Current scheduler clock (seconds)
    pub fn now(&self) -> f64 {
        self.now
    }

    fn push(&mut self, delay: f32, every: Option<f64>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            due: later(self.now, f64::from(delay.max(0.0))),
            every,
            task,
        });
        handle
    }

    /// Run `task` once after `delay` seconds
    pub fn schedule(&mut self, delay: f32, task: T) -> TaskHandle {
        self.push(delay, None, task)
    }

    /// Run `task` every `interval` seconds until cancelled.
    /// Non-positive intervals are bumped to a tiny positive one.
    pub fn schedule_repeating(&mut self, interval: f32, task: T) -> TaskHandle {
        let interval = interval.max(f32::EPSILON);
        self.push(interval, Some(f64::from(interval)), task)
    }

    /// Cancel a task. Returns true only the first time for a live handle.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Move the clock forward without firing anything
    pub fn advance_clock(&mut self, dt: f32) {
        self.now += f64::from(dt.max(0.0));
    }

    /// Take the earliest due task (ties in scheduling order). A repeating task
    /// is re-armed and comes due again once per elapsed interval.
    ///
    /// Popping one task at a time lets the caller cancel or schedule tasks in
    /// between, and have that seen by the very next pop.
    pub fn pop_due(&mut self) -> Option<(TaskHandle, T)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= self.now)
            .min_by(|(_, a), (_, b)| {
                a.due
                    .partial_cmp(&b.due)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.handle.cmp(&b.handle))
            })
            .map(|(i, _)| i)?;

        match self.entries[index].every {
            Some(every) => {
                let entry = &mut self.entries[index];
                entry.due = later(entry.due, every);
                Some((entry.handle, entry.task.clone()))
            }
            None => {
                let entry = self.entries.remove(index);
                Some((entry.handle, entry.task))
            }
        }
    }

    /// Move the clock forward and return every task that came due
    pub fn advance(&mut self, dt: f32) -> Vec<(TaskHandle, T)> {
        self.advance_clock(dt);
        std::iter::from_fn(|| self.pop_due()).collect()
    }
}

/// `from + delay`, but never equal to `from` when `delay` is positive
fn later(from: f64, delay: f64) -> f64 {
    let due = from + delay;
    if delay > 0.0 && due <= from {
        // Next representable value above a non-negative clock
        f64::from_bits(from.to_bits() + 1)
    } else {
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(fired: Vec<(TaskHandle, &'static str)>) -> Vec<&'static str> {
        fired.into_iter().map(|(_, t)| t).collect()
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut sched = Scheduler::new();
        sched.schedule(1.0, "a");
        assert!(sched.advance(0.5).is_empty());
        assert_eq!(tasks(sched.advance(0.5)), vec!["a"]);
        assert!(sched.advance(5.0).is_empty());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_due_order_and_ties() {
        let mut sched = Scheduler::new();
        sched.schedule(2.0, "late");
        sched.schedule(1.0, "first");
        sched.schedule(1.0, "second");
        assert_eq!(tasks(sched.advance(3.0)), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_repeating_until_cancelled() {
        let mut sched = Scheduler::new();
        let handle = sched.schedule_repeating(1.0, "tick");
        assert_eq!(tasks(sched.advance(1.0)), vec!["tick"]);
        // Catch up on missed intervals
        assert_eq!(tasks(sched.advance(2.0)), vec!["tick", "tick"]);

        assert!(sched.cancel(handle));
        assert!(!sched.cancel(handle));
        assert!(sched.advance(10.0).is_empty());
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut sched = Scheduler::new();
        let a = sched.schedule(1.0, "a");
        sched.schedule_repeating(0.5, "b");
        sched.clear();
        assert!(!sched.is_pending(a));
        assert!(sched.advance(5.0).is_empty());
    }

    #[test]
    fn test_cancel_between_pops() {
        let mut sched = Scheduler::new();
        let tick = sched.schedule_repeating(1.0, "tick");
        sched.schedule(2.5, "done");
        sched.advance_clock(3.0);

        assert_eq!(sched.pop_due().map(|(_, t)| t), Some("tick"));
        assert_eq!(sched.pop_due().map(|(_, t)| t), Some("tick"));
        assert!(sched.cancel(tick));
        assert_eq!(sched.pop_due().map(|(_, t)| t), Some("done"));
        assert!(sched.pop_due().is_none());
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut sched = Scheduler::new();
        sched.schedule(0.0, "now");
        assert_eq!(tasks(sched.advance(0.0)), vec!["now"]);
    }

    #[test]
    fn test_tiny_interval_at_late_clock_is_not_due_yet() {
        let mut sched = Scheduler::new();
        sched.advance_clock(100.0);
        sched.schedule_repeating(1e-6, "tick");
        assert!(sched.advance(0.0).is_empty());

        // One firing per elapsed interval, not an endless catch-up
        let fired = sched.advance(1e-5).len();
        assert!((9..=11).contains(&fired), "fired {}", fired);
    }

    #[test]
    fn test_delay_below_clock_precision_still_moves_forward() {
        let mut sched = Scheduler::new();
        sched.advance_clock(1.0e6);
        let handle = sched.schedule(1e-12, "step");
        assert!(sched.advance(0.0).is_empty());
        assert!(sched.is_pending(handle));
        assert_eq!(tasks(sched.advance(1e-3)), vec!["step"]);
    }
}
