//! Interaction index: recorded interactions grouped by key request

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::matching::{find_match, MatchRule};
use crate::message::Request;
use crate::{Result, TapeError};

use super::Interaction;

/// Last-in-first-out stack of interactions sharing one key
///
/// The top of the stack is the interaction served next.
#[derive(Debug, Clone, Default)]
pub struct InteractionStack {
    // back() is the top
    entries: VecDeque<Arc<Interaction>>,
}

impl InteractionStack {
    /// Stack holding a single interaction
    pub fn single(interaction: Arc<Interaction>) -> Self {
        Self {
            entries: VecDeque::from([interaction]),
        }
    }

    /// Push onto the top
    pub fn push(&mut self, interaction: Arc<Interaction>) {
        self.entries.push_back(interaction);
    }

    /// Put underneath everything already stacked
    pub fn bury(&mut self, interaction: Arc<Interaction>) {
        self.entries.push_front(interaction);
    }

    /// Remove and return the top
    pub fn pop(&mut self) -> Option<Arc<Interaction>> {
        self.entries.pop_back()
    }

    /// Top without removing it
    pub fn peek(&self) -> Option<&Arc<Interaction>> {
        self.entries.back()
    }

    /// Reverse the stack in place
    pub fn reverse(&mut self) {
        self.entries.make_contiguous().reverse();
    }

    /// Number of stacked interactions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is left on the stack
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interactions from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Interaction>> {
        self.entries.iter().rev()
    }
}

/// One key request with its stack
#[derive(Debug, Clone)]
struct IndexEntry {
    key: Request,
    stack: InteractionStack,
}

/// Interactions grouped by key, keys in first-seen order
#[derive(Debug, Clone, Default)]
pub struct InteractionIndex {
    entries: Vec<IndexEntry>,
}

impl InteractionIndex {
    /// Build the index from interactions in recording order
    ///
    /// Each interaction joins the first existing key it matches, or starts
    /// a new key. Sequential indexes keep every interaction and end with
    /// the first recorded one on top of each stack. Other indexes keep only
    /// the latest interaction per key.
    pub fn build(interactions: &[Arc<Interaction>], rule: &dyn MatchRule, sequential: bool) -> Self {
        let mut index = Self::default();

        for interaction in interactions {
            index.admit(Arc::clone(interaction), rule, sequential);
        }

        for entry in &mut index.entries {
            entry.stack.reverse();
        }

        debug!(
            "Built interaction index: {} interactions, {} keys (sequential: {})",
            interactions.len(),
            index.entries.len(),
            sequential
        );

        index
    }

    /// Queue a freshly recorded interaction in a sequential index
    ///
    /// `position` is the key found with [`find`](Self::find) before the
    /// interaction was stored; `None` starts a new key. The interaction is
    /// played after everything already waiting for its key.
    pub fn insert_recorded(&mut self, position: Option<usize>, interaction: Arc<Interaction>) {
        match position.and_then(|position| self.entries.get_mut(position)) {
            Some(entry) => entry.stack.bury(interaction),
            None => self.push_key(interaction),
        }
    }

    fn admit(&mut self, interaction: Arc<Interaction>, rule: &dyn MatchRule, sequential: bool) {
        let position = self.find(&interaction.request, rule);

        match position.and_then(|position| self.entries.get_mut(position)) {
            Some(entry) if sequential => entry.stack.push(interaction),
            Some(entry) => entry.stack = InteractionStack::single(interaction),
            None => self.push_key(interaction),
        }
    }

    fn push_key(&mut self, interaction: Arc<Interaction>) {
        self.entries.push(IndexEntry {
            key: interaction.request.clone(),
            stack: InteractionStack::single(interaction),
        });
    }

    /// Position of the first key `request` matches
    pub fn find(&self, request: &Request, rule: &dyn MatchRule) -> Option<usize> {
        find_match(rule, request, self.keys())
    }

    /// Key requests in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &Request> {
        self.entries.iter().map(|entry| &entry.key)
    }

    /// Stack for the key at `position`
    ///
    /// # Errors
    ///
    /// Returns `IndexInconsistency` if no such key exists
    pub fn stack(&self, position: usize) -> Result<&InteractionStack> {
        self.entries
            .get(position)
            .map(|entry| &entry.stack)
            .ok_or_else(|| missing_group(position, self.entries.len()))
    }

    /// Mutable stack for the key at `position`
    ///
    /// # Errors
    ///
    /// Returns `IndexInconsistency` if no such key exists
    pub fn stack_mut(&mut self, position: usize) -> Result<&mut InteractionStack> {
        let len = self.entries.len();
        self.entries
            .get_mut(position)
            .map(|entry| &mut entry.stack)
            .ok_or_else(|| missing_group(position, len))
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn missing_group(position: usize, len: usize) -> TapeError {
    TapeError::IndexInconsistency(format!("no group at key position {position} (keys: {len})"))
}
