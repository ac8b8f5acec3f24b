//! Fact store (§4.B): an append-and-rewrite ordered list of ground facts.
//!
//! Grounded on the teacher's `engine::facts::Facts` working-memory type:
//! interior mutability behind a single lock, a `snapshot()` that hands
//! callers an owned, consistent view rather than exposing the lock, and a
//! `restore()`-shaped rewrite path used here for placeholder supersession.

use crate::facts::Fact;
use std::sync::{Arc, RwLock};

/// The persistent, append-and-rewrite set of ground facts for one session.
///
/// Newest-first insertion order is preserved and is an externally
/// observable property of the persisted form (§6).
#[derive(Debug, Clone)]
pub struct FactStore {
    facts: Arc<RwLock<Vec<Fact>>>,
}

/// A consistent, owned view of the store at one instant, used by the
/// validator and evaluator so a reasoning pass never observes a
/// half-written state (§4.B).
#[derive(Debug, Clone)]
pub struct Snapshot {
    facts: Vec<Fact>,
}

impl Snapshot {
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }
}

impl FactStore {
    /// An empty fact store.
    pub fn new() -> Self {
        Self {
            facts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Construct a store from an already-decoded, newest-first fact list
    /// (used by `persistence::decode`).
    pub fn from_facts(facts: Vec<Fact>) -> Self {
        Self {
            facts: Arc::new(RwLock::new(facts)),
        }
    }

    /// Is this exact fact already stored?
    pub fn contains(&self, fact: &Fact) -> bool {
        let fact = fact.clone().canonicalize();
        self.facts.read().unwrap().contains(&fact)
    }

    /// Insert any facts not already present, prepending them (newest-first).
    /// Duplicates — including a gender fact for a person who already holds
    /// that exact gender — are silently skipped. Returns the count actually
    /// inserted.
    pub fn insert_many(&self, new_facts: Vec<Fact>) -> usize {
        let mut guard = self.facts.write().unwrap();
        let mut inserted = 0;
        for fact in new_facts {
            let fact = fact.canonicalize();
            if !guard.contains(&fact) {
                guard.insert(0, fact);
                inserted += 1;
            }
        }
        inserted
    }

    /// Remove every fact matching `predicate`, returning what was removed.
    /// Used for placeholder supersession (§4.G).
    pub fn remove_where(&self, predicate: impl Fn(&Fact) -> bool) -> Vec<Fact> {
        let mut guard = self.facts.write().unwrap();
        let mut removed = Vec::new();
        guard.retain(|f| {
            if predicate(f) {
                removed.push(f.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// A consistent snapshot for the evaluator/validator to query.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            facts: self.facts.read().unwrap().clone(),
        }
    }

    /// All stored facts, newest-first, for persistence.
    pub fn all(&self) -> Vec<Fact> {
        self.facts.read().unwrap().clone()
    }

    /// Number of stored facts.
    pub fn len(&self) -> usize {
        self.facts.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FactStore {
    fn default() -> Self {
        Self::new()
    }
}
