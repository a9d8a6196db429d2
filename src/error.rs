//! Error types
//!
//! Two families:
//! - [`ScholasticError`]: fatal load/save failures, abort the process
//! - [`CommandError`]: recoverable command failures, printed and the loop continues

use std::path::PathBuf;

use thiserror::Error;

use crate::core::entity::EntityKind;

/// Fatal errors raised while loading or saving user data
#[derive(Error, Debug)]
pub enum ScholasticError {
    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema error in {}: {reason}", .path.display())]
    Schema { path: PathBuf, reason: String },

    #[error("Malformed {kind} record at index {index}: {reason}")]
    MalformedRecord {
        kind: EntityKind,
        index: usize,
        reason: String,
    },
}

impl ScholasticError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScholasticError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn schema(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ScholasticError::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Recoverable errors reported on the console
///
/// The display strings are part of the console protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Must provide an argument to new: proposition or question")]
    MissingNewKind,

    #[error("Must provide argument: proposition or question")]
    MissingDeleteKind,

    /// `delete <kind>` without an id: the prompt is printed, then the
    /// missing index fails to parse like any other bad index.
    #[error("Which?\nMust specify an integer index.")]
    MissingDeleteIndex,

    #[error("Must specify an integer index.")]
    InvalidIndex(String),

    #[error("Invalid id: {0}")]
    UnknownId(i128),

    #[error("No ids left for new {}.", .0.plural())]
    IdsExhausted(EntityKind),

    #[error("{}", nothing_to_select_message(.0))]
    NothingToSelect(EntityKind),
}

impl CommandError {
    /// True for missing-argument errors, false for validation errors
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            CommandError::MissingNewKind
                | CommandError::MissingDeleteKind
                | CommandError::MissingDeleteIndex
        )
    }
}

fn nothing_to_select_message(kind: &EntityKind) -> &'static str {
    match kind {
        EntityKind::Proposition => "No propositions from which to select.",
        EntityKind::Question => "No questions to select.",
    }
}
