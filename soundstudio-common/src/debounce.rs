//! Trailing-edge debounce

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::trace;

use crate::scheduler::{Scheduler, TaskId};

/// Delays `f` until `wait` has passed without another [`Debouncer::call`].
///
/// Each call cancels the pending invocation and replaces its arguments, so
/// `f` only ever sees the arguments of the last call in a burst. Cloning
/// shares the same pending state.
pub struct Debouncer<A: 'static> {
    inner: Rc<Inner<A>>,
}

struct Inner<A> {
    scheduler: Rc<dyn Scheduler>,
    wait: Duration,
    func: RefCell<Box<dyn FnMut(A)>>,
    args: RefCell<Option<A>>,
    pending: Cell<Option<TaskId>>,
}

impl<A: 'static> Clone for Debouncer<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: 'static> Debouncer<A> {
    pub fn new(scheduler: Rc<dyn Scheduler>, wait: Duration, f: impl FnMut(A) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                scheduler,
                wait,
                func: RefCell::new(Box::new(f)),
                args: RefCell::new(None),
                pending: Cell::new(None),
            }),
        }
    }

    /// Record `args` and restart the quiet period.
    pub fn call(&self, args: A) {
        if let Some(id) = self.inner.pending.take() {
            self.inner.scheduler.cancel(id);
        }
        *self.inner.args.borrow_mut() = Some(args);

        let weak: Weak<Inner<A>> = Rc::downgrade(&self.inner);
        let id = self.inner.scheduler.schedule(
            self.inner.wait,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.fire();
                }
            }),
        );
        self.inner.pending.set(Some(id));
        trace!("Debounce rescheduled as {:?}", id);
    }

    /// Drop the pending invocation, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        self.inner.args.borrow_mut().take();
        match self.inner.pending.take() {
            Some(id) => self.inner.scheduler.cancel(id),
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

impl<A> Inner<A> {
    fn fire(&self) {
        self.pending.set(None);
        let Some(args) = self.args.borrow_mut().take() else {
            return;
        };
        // A re-entrant call from inside `func` only touches `args`/`pending`.
        match self.func.try_borrow_mut() {
            Ok(mut func) => func(args),
            Err(_) => tracing::warn!("Debounced function is already running, skipping"),
        }
    }
}
