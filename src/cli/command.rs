//! Command parsing
//!
//! Turns one whitespace-tokenized console line into a [`Command`].
//!
//! # Grammar
//! ```text
//! new proposition | new question
//! list | list propositions | list questions
//! delete proposition <id> | delete question <id>
//! random proposition | random question [unanswered]
//! print <words...>
//! ```
//! Keywords are case-sensitive. Unrecognised lines parse to [`Command::Ignored`].

use crate::core::entity::EntityKind;
use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    /// Prompt for text and append a new entity
    New(EntityKind),
    /// Print every entity of a kind
    List(EntityKind),
    /// Remove the first entity with this id
    ///
    /// The id is wide enough for every stored id and for negative input.
    Delete { kind: EntityKind, id: i128 },
    /// Print one entity chosen at random
    Random {
        kind: EntityKind,
        unanswered_only: bool,
    },
    /// Echo the remaining words
    Print(String),
    /// Anything the grammar does not recognise, keyed by its first token;
    /// silently skipped
    Ignored(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let Some((&head, rest)) = tokens.split_first() else {
            return Ok(Command::Empty);
        };

        let command = match head {
            "new" => parse_new(rest)?,
            "list" => parse_list(rest),
            "delete" => parse_delete(rest)?,
            "random" => parse_random(rest),
            "print" => Command::Print(rest.join(" ")),
            _ => ignored(head),
        };

        Ok(command)
    }
}

fn ignored(head: &str) -> Command {
    Command::Ignored(head.to_string())
}

fn parse_new(rest: &[&str]) -> Result<Command, CommandError> {
    match rest.first() {
        None => Err(CommandError::MissingNewKind),
        Some(kind) => Ok(kind
            .parse()
            .map(Command::New)
            .unwrap_or_else(|_| ignored("new"))),
    }
}

fn parse_list(rest: &[&str]) -> Command {
    match rest.first() {
        None | Some(&"propositions") => Command::List(EntityKind::Proposition),
        Some(&"questions") => Command::List(EntityKind::Question),
        Some(_) => ignored("list"),
    }
}

/// The index is parsed before the kind is inspected, so a bad index is
/// reported even when the kind is unknown.
fn parse_delete(rest: &[&str]) -> Result<Command, CommandError> {
    let (kind, index) = match rest {
        [] => return Err(CommandError::MissingDeleteKind),
        [_] => return Err(CommandError::MissingDeleteIndex),
        [kind, index, ..] => (*kind, *index),
    };

    let id: i128 = index
        .parse()
        .map_err(|_| CommandError::InvalidIndex(index.to_string()))?;

    Ok(match kind.parse() {
        Ok(kind) => Command::Delete { kind, id },
        Err(_) => ignored("delete"),
    })
}

fn parse_random(rest: &[&str]) -> Command {
    match rest.first().map(|kind| kind.parse::<EntityKind>()) {
        Some(Ok(kind)) => Command::Random {
            kind,
            unanswered_only: kind == EntityKind::Question && rest[1..].contains(&"unanswered"),
        },
        _ => ignored("random"),
    }
}
