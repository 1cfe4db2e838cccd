//! Cooperative single-threaded task scheduling
//!
//! Banner auto-dismiss and debounce both need "run this later unless
//! cancelled". The browser provides that through `setTimeout`; tests drive a
//! virtual clock instead.

use std::time::Duration;

/// Identifies a scheduled task for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Runs deferred callbacks on the current thread.
pub trait Scheduler {
    /// Run `task` once after `delay`. Tasks never run re-entrantly from
    /// inside `schedule`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId;

    /// Cancel a pending task. Returns false if it already ran or was
    /// cancelled before.
    fn cancel(&self, id: TaskId) -> bool;
}

#[cfg(any(test, feature = "test-utils"))]
pub use manual::ManualScheduler;

#[cfg(any(test, feature = "test-utils"))]
mod manual {
    use super::{Scheduler, TaskId};
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, HashMap};
    use std::time::Duration;

    type Task = Box<dyn FnOnce()>;

    /// Virtual-clock scheduler for deterministic tests.
    ///
    /// Nothing runs until [`ManualScheduler::advance`] moves the clock; due
    /// tasks then run in deadline order (ties in scheduling order). Tasks may
    /// schedule or cancel other tasks while running.
    #[derive(Default)]
    pub struct ManualScheduler {
        now: Cell<Duration>,
        next_id: Cell<u64>,
        queue: RefCell<BTreeMap<(Duration, TaskId), Task>>,
        deadlines: RefCell<HashMap<TaskId, Duration>>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        /// Current virtual time since creation.
        pub fn now(&self) -> Duration {
            self.now.get()
        }

        pub fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        /// Move the clock forward, running every task due on the way.
        /// Returns how many tasks ran.
        pub fn advance(&self, by: Duration) -> usize {
            let target = self.now.get() + by;
            let mut ran = 0;
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    match queue.keys().next().copied() {
                        Some(key) if key.0 <= target => queue.remove(&key).map(|task| (key, task)),
                        _ => None,
                    }
                };
                let Some(((due, id), task)) = next else {
                    break;
                };
                self.deadlines.borrow_mut().remove(&id);
                self.now.set(due);
                task();
                ran += 1;
            }
            self.now.set(target);
            ran
        }

        pub fn advance_ms(&self, ms: u64) -> usize {
            self.advance(Duration::from_millis(ms))
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId {
            let id = TaskId(self.next_id.get());
            self.next_id.set(id.0 + 1);
            let due = self.now.get() + delay;
            self.queue.borrow_mut().insert((due, id), task);
            self.deadlines.borrow_mut().insert(id, due);
            id
        }

        fn cancel(&self, id: TaskId) -> bool {
            let Some(due) = self.deadlines.borrow_mut().remove(&id) else {
                return false;
            };
            self.queue.borrow_mut().remove(&(due, id)).is_some()
        }
    }
}
