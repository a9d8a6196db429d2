//! Store - In-memory collections for one session
//!
//! Owns both entity lists and their ID counters. Loaded once at startup,
//! mutated in place by commands, saved wholesale on exit.

use rand::seq::SliceRandom;
use rand::Rng;

use super::entity::{Entity, EntityId, EntityKind, IdCounter, Proposition, Question};
use crate::error::CommandError;

/// Borrowed view of one entity, used for console output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef<'a> {
    pub id: EntityId,
    pub text: &'a str,
}

impl<'a, E: Entity> From<&'a E> for EntityRef<'a> {
    fn from(entity: &'a E) -> Self {
        Self {
            id: entity.id(),
            text: entity.text(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    propositions: Vec<Proposition>,
    questions: Vec<Question>,
    proposition_ids: IdCounter,
    question_ids: IdCounter,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn propositions(&self) -> &[Proposition] {
        &self.propositions
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Entities of one kind, in collection order
    pub fn entries(&self, kind: EntityKind) -> Vec<EntityRef<'_>> {
        match kind {
            EntityKind::Proposition => self.propositions.iter().map(EntityRef::from).collect(),
            EntityKind::Question => self.questions.iter().map(EntityRef::from).collect(),
        }
    }

    /// Append a new proposition with a fresh ID
    pub fn create_proposition(
        &mut self,
        text: impl Into<String>,
    ) -> Result<&Proposition, CommandError> {
        let id = self
            .proposition_ids
            .next()
            .ok_or(CommandError::IdsExhausted(EntityKind::Proposition))?;
        tracing::debug!(id, "created proposition");
        self.propositions.push(Proposition::new(id, text));
        Ok(&self.propositions[self.propositions.len() - 1])
    }

    /// Append a new, unanswered question with a fresh ID
    pub fn create_question(&mut self, text: impl Into<String>) -> Result<&Question, CommandError> {
        let id = self
            .question_ids
            .next()
            .ok_or(CommandError::IdsExhausted(EntityKind::Question))?;
        tracing::debug!(id, "created question");
        self.questions.push(Question::new(id, text));
        Ok(&self.questions[self.questions.len() - 1])
    }

    /// Append a proposition read from disk, keeping its ID
    ///
    /// Duplicate IDs are accepted; only the first match is reachable by `delete`.
    pub fn restore_proposition(&mut self, proposition: Proposition) {
        if self.propositions.iter().any(|p| p.id == proposition.id) {
            tracing::warn!(id = proposition.id, "duplicate proposition id");
        }
        self.proposition_ids.observe(proposition.id);
        self.propositions.push(proposition);
    }

    /// Append a question read from disk, keeping its ID and answer
    pub fn restore_question(&mut self, question: Question) {
        if self.questions.iter().any(|q| q.id == question.id) {
            tracing::warn!(id = question.id, "duplicate question id");
        }
        self.question_ids.observe(question.id);
        self.questions.push(question);
    }

    /// Remove the first entity of `kind` whose ID equals `id`
    pub fn delete(&mut self, kind: EntityKind, id: i128) -> Result<(), CommandError> {
        let removed = match kind {
            EntityKind::Proposition => remove_first(&mut self.propositions, id),
            EntityKind::Question => remove_first(&mut self.questions, id),
        };

        if removed {
            Ok(())
        } else {
            Err(CommandError::UnknownId(id))
        }
    }

    /// Pick one entity uniformly at random
    ///
    /// With `unanswered_only`, questions that carry an answer are excluded
    /// before choosing. The flag has no effect on propositions.
    pub fn random<R: Rng + ?Sized>(
        &self,
        kind: EntityKind,
        unanswered_only: bool,
        rng: &mut R,
    ) -> Result<EntityRef<'_>, CommandError> {
        let picked = match kind {
            EntityKind::Proposition => self.propositions.choose(rng).map(EntityRef::from),
            EntityKind::Question => {
                let candidates: Vec<&Question> = self
                    .questions
                    .iter()
                    .filter(|q| !unanswered_only || !q.is_answered())
                    .collect();
                candidates.choose(rng).map(|q| EntityRef::from(*q))
            }
        };

        picked.ok_or(CommandError::NothingToSelect(kind))
    }
}

fn remove_first<E: Entity>(items: &mut Vec<E>, id: i128) -> bool {
    let position = items.iter().position(|item| i128::from(item.id()) == id);

    match position {
        Some(index) => {
            items.remove(index);
            tracing::debug!(kind = %E::KIND, id, "deleted");
            true
        }
        None => false,
    }
}
