//! Entities - Propositions and questions
//!
//! # Key Properties
//! - **id**: positive integer, unique per kind, assigned by an [`IdCounter`]
//! - **text**: the statement or query itself
//! - **answer**: questions only, `None` while unanswered

use serde::{Deserialize, Serialize};

/// Numeric entity identifier
pub type EntityId = u64;

/// Kind of entity a command operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A belief statement
    Proposition,
    /// A query, optionally answered
    Question,
}

impl EntityKind {
    /// Plural spelling, as used by `list` and the data file keys
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Proposition => "propositions",
            EntityKind::Question => "questions",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Proposition => write!(f, "proposition"),
            EntityKind::Question => write!(f, "question"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = anyhow::Error;

    /// Case-sensitive, like the rest of the command grammar
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proposition" => Ok(EntityKind::Proposition),
            "question" => Ok(EntityKind::Question),
            _ => anyhow::bail!("Unknown entity kind: {}", s),
        }
    }
}

/// Behaviour shared by every stored entity
pub trait Entity {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn text(&self) -> &str;
}

/// A stored belief statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposition {
    pub id: EntityId,
    pub text: String,
}

impl Proposition {
    pub fn new(id: EntityId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl Entity for Proposition {
    const KIND: EntityKind = EntityKind::Proposition;

    fn id(&self) -> EntityId {
        self.id
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// A stored query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: EntityId,
    pub text: String,

    /// Written as `null` when unanswered; older files may omit it
    #[serde(default)]
    pub answer: Option<String>,
}

impl Question {
    pub fn new(id: EntityId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            answer: None,
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    /// True if the question has been given an answer
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}

impl Entity for Question {
    const KIND: EntityKind = EntityKind::Question;

    fn id(&self) -> EntityId {
        self.id
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// Monotonic ID source for one entity kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdCounter {
    last: EntityId,
}

impl IdCounter {
    /// Largest ID handed out or observed so far (0 when none)
    pub fn last(&self) -> EntityId {
        self.last
    }

    /// Allocate the next ID, or `None` once `EntityId::MAX` has been used
    pub fn next(&mut self) -> Option<EntityId> {
        self.last = self.last.checked_add(1)?;
        Some(self.last)
    }

    /// Record an externally supplied ID so later allocations never collide with it
    pub fn observe(&mut self, id: EntityId) {
        if id > self.last {
            self.last = id;
        }
    }
}
