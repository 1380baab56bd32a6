//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input and drive the backfill searches.
//! - Keep CLI/embedding layers decoupled from catalog transport details.

pub mod event_service;
