//! `setTimeout`-backed [`Scheduler`]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use soundstudio_common::{Scheduler, TaskId};
use tracing::error;
use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;

use crate::wasm_utils::describe_js_error;

struct PendingTimer {
    handle: i32,
    fired: Rc<Cell<bool>>,
    // Held so the JS callback stays valid until the timer fires.
    _callback: Closure<dyn FnMut()>,
}

#[derive(Default)]
struct TimerState {
    next_id: u64,
    timers: HashMap<TaskId, PendingTimer>,
    /// Fired timers whose closures can be released on the next `schedule`.
    finished: Vec<TaskId>,
}

/// Schedules tasks on the page's event loop.
///
/// Closures of fired timers are released lazily, never from inside their own
/// invocation.
pub struct BrowserScheduler {
    window: web_sys_x::Window,
    state: Rc<RefCell<TimerState>>,
}

impl BrowserScheduler {
    pub fn new(window: web_sys_x::Window) -> Self {
        Self {
            window,
            state: Rc::default(),
        }
    }

    fn prune_finished(&self) {
        let mut state = self.state.borrow_mut();
        let finished = std::mem::take(&mut state.finished);
        for id in finished {
            state.timers.remove(&id);
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId {
        self.prune_finished();

        let id = {
            let mut state = self.state.borrow_mut();
            let id = TaskId(state.next_id);
            state.next_id += 1;
            id
        };

        let fired = Rc::new(Cell::new(false));
        let mut task = Some(task);
        let weak_state = Rc::downgrade(&self.state);
        let fired_flag = fired.clone();
        let callback: Closure<dyn FnMut()> = Closure::wrap(Box::new(move || {
            fired_flag.set(true);
            if let Some(task) = task.take() {
                task();
            }
            if let Some(state) = weak_state.upgrade() {
                state.borrow_mut().finished.push(id);
            }
        }));

        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(handle) => {
                self.state.borrow_mut().timers.insert(
                    id,
                    PendingTimer {
                        handle,
                        fired,
                        _callback: callback,
                    },
                );
            }
            Err(e) => error!("setTimeout failed: {}", describe_js_error(&e)),
        }
        id
    }

    fn cancel(&self, id: TaskId) -> bool {
        let mut state = self.state.borrow_mut();
        let pending = match state.timers.get(&id) {
            Some(timer) => !timer.fired.get(),
            None => false,
        };
        if !pending {
            return false;
        }
        if let Some(timer) = state.timers.remove(&id) {
            self.window.clear_timeout_with_handle(timer.handle);
        }
        true
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        let state = self.state.borrow();
        for timer in state.timers.values().filter(|t| !t.fired.get()) {
            self.window.clear_timeout_with_handle(timer.handle);
        }
    }
}
