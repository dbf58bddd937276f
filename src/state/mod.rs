//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `command`, `competition`, `notice`)
//! so individual pages can depend on small focused models. Async operations
//! never hold a borrow of a store across an await point; they reach it through
//! `StoreHandle`, which the UI implements with `RwSignal` and tests with
//! `RefCell`.

pub mod command;
pub mod competition;
pub mod notice;
pub mod session;

use std::cell::RefCell;

use leptos::prelude::{RwSignal, Update};

/// Short-lived mutable access to a store owned elsewhere.
pub trait StoreHandle<T> {
    /// Run `f` against the store. Returns `None` if the store is gone
    /// (e.g. a disposed signal).
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T> StoreHandle<T> for RefCell<T> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<T: Send + Sync + 'static> StoreHandle<T> for RwSignal<T> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }
}
