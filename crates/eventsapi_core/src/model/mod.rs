//! Domain model for catalog events and query windows.
//!
//! # Responsibility
//! - Define the event record shape returned by the remote catalog.
//! - Define the month cursor that scopes one catalog query.
//!
//! # Invariants
//! - Event records are passed through unexamined except for `start_time`.
//! - A month cursor always holds a month in `1..=12`.

pub mod event;
pub mod month;
