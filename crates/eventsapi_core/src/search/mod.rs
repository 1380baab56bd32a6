//! Temporal backfill search over the events catalog.
//!
//! # Responsibility
//! - Walk backward through calendar months issuing one catalog query each.
//! - Keep only events that have already started and order them by start time.
//!
//! # Invariants
//! - Queries are issued sequentially; each decision depends on the prior month.
//! - A failed month query contributes zero records and the walk continues.
//! - Searches never return an error; a short result is a valid outcome.

pub mod backfill;
pub mod timeline;
