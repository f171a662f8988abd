//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by flow (`session`, `search`, `signup`) so each page depends
//! on a small focused model. Flows write through [`StateCell`], which is
//! implemented for Leptos `RwSignal`s (browser) and `Rc<RefCell<_>>`
//! (command line, tests), so the same async code drives every front end.

pub mod search;
pub mod session;
pub mod signup;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::{RwSignal, Update, With};

/// Read/write access to one piece of view state.
pub trait StateCell<S> {
    fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R;
    fn update_state(&self, f: impl FnOnce(&mut S));
}

impl<S> StateCell<S> for Rc<RefCell<S>> {
    fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.borrow())
    }

    fn update_state(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.borrow_mut());
    }
}

impl<S: Send + Sync + 'static> StateCell<S> for RwSignal<S> {
    fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.with(f)
    }

    fn update_state(&self, f: impl FnOnce(&mut S)) {
        self.update(f);
    }
}

/// Runs `clear` when dropped, so busy flags reset on every exit path,
/// including a cancelled future.
pub(crate) struct ClearOnDrop<F: FnMut()> {
    clear: F,
}

impl<F: FnMut()> ClearOnDrop<F> {
    pub(crate) fn new(clear: F) -> Self {
        Self { clear }
    }
}

impl<F: FnMut()> Drop for ClearOnDrop<F> {
    fn drop(&mut self) {
        (self.clear)();
    }
}
