//! Core module - Business logic
//!
//! Entities, the in-memory store and its JSON persistence.

pub mod entity;
pub mod persistence;
pub mod store;
