//! scholastic - Keep a well-examined belief system
//!
//! Stores propositions (belief statements) and questions (with optional
//! answers) in a single JSON file, edited through a line command loop.
//!
//! ## Key Concepts
//!
//! - **Per-kind IDs**: propositions and questions each have their own
//!   monotonic counter, owned by the [`Store`]
//! - **Whole-file persistence**: loaded once at startup, rewritten on `exit`
//! - **Startup code**: command lines from `config.json` run before input

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use crate::core::entity::{EntityKind, Proposition, Question};
pub use crate::core::store::Store;
pub use error::{CommandError, ScholasticError};
