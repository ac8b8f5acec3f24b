//! Session orchestrator (§4.H): routes one line of input to the parser,
//! reasoning evaluator, validator, clarification protocol, or writer,
//! and returns the user-facing reply. `Engine` plays the role the
//! teacher's top-level `RustRuleEngine` handle plays — a stateful,
//! owned entry point rather than a pure function threading session
//! state through return values, which is the idiomatic shape once
//! `process` takes `&mut self` (§6).

use crate::clarification::{self, ClarificationOutcome, ClarificationRequest};
use crate::errors::{KinshipError, Result};
use crate::facts::Relation;
use crate::parser::{self, FactIntent, Intent, QueryIntent};
use crate::person::{Gender, PersonId};
use crate::persistence;
use crate::reasoning::Evaluator;
use crate::store::FactStore;
use crate::validator::{self, ValidationOutcome};
use crate::writer;

/// One interactive session: the fact store plus any clarification
/// dialogue in progress.
pub struct Engine {
    store: FactStore,
    pending: Option<ClarificationRequest>,
}

impl Engine {
    /// A fresh session with an empty fact store.
    pub fn new() -> Self {
        Self { store: FactStore::new(), pending: None }
    }

    /// Restore a session from a persisted fact-store text (§6).
    pub fn load(text: &str) -> Result<Self> {
        let facts = persistence::decode(text)?;
        Ok(Self { store: FactStore::from_facts(facts), pending: None })
    }

    /// Serialize the current fact store to its persisted text form.
    /// Any clarification in progress is not persisted — it resumes
    /// only within the process that holds it (§5).
    pub fn save(&self) -> String {
        persistence::encode(&self.store)
    }

    /// Is a clarification dialogue currently pending?
    pub fn has_pending_clarification(&self) -> bool {
        self.pending.is_some()
    }

    /// Process one line of input, returning the reply shown to the user.
    pub fn process(&mut self, input: &str) -> String {
        if let Some(request) = self.pending.clone() {
            return self.resume_clarification(request, input);
        }

        match parser::parse(input) {
            Intent::Unrecognized { suggestions } => {
                let err = KinshipError::UnrecognizedInput { suggestion: suggestions.join(" ") };
                err.to_string()
            }
            Intent::Query(query) => self.answer_query(query),
            Intent::Fact(intent) => self.commit_statement(intent),
        }
    }

    fn resume_clarification(&mut self, request: ClarificationRequest, input: &str) -> String {
        let snapshot = self.store.snapshot();
        match clarification::handle_response(&request.kind, input, &snapshot) {
            ClarificationOutcome::Commit(plan) => {
                self.pending = None;
                writer::apply_plan(&self.store, plan);
                "OK! I learned something new.".to_string()
            }
            ClarificationOutcome::Chain(next) => {
                let prompt = next.prompt();
                self.pending = Some(next);
                prompt
            }
            ClarificationOutcome::Reprompt(message) => message,
            ClarificationOutcome::Abort(message) => {
                self.pending = None;
                message
            }
        }
    }

    fn commit_statement(&mut self, intent: FactIntent) -> String {
        let atomic = decompose(intent);
        let mut committed_any = false;
        for fact_intent in atomic {
            let snapshot = self.store.snapshot();
            match validator::validate(&fact_intent, &snapshot) {
                ValidationOutcome::Ok => {
                    writer::commit_facts(&self.store, ground_facts_for(&fact_intent));
                    committed_any = true;
                }
                ValidationOutcome::Redundant => {
                    // Nothing to do; keep processing the remaining atoms.
                }
                ValidationOutcome::Reject(reason) => {
                    return KinshipError::Impossible(reason).to_string();
                }
                ValidationOutcome::Clarify(request) => {
                    let prompt = request.prompt();
                    self.pending = Some(request);
                    return prompt;
                }
                ValidationOutcome::Rewrite(op) => {
                    writer::apply_rewrite(&self.store, op);
                    committed_any = true;
                }
            }
        }
        if committed_any {
            "OK! I learned something new.".to_string()
        } else {
            KinshipError::Redundant.to_string()
        }
    }

    fn answer_query(&self, query: QueryIntent) -> String {
        let snapshot = self.store.snapshot();
        let eval = Evaluator::new(&snapshot);
        match query {
            QueryIntent::RelationHolds { relation, a, b } => {
                if eval.holds(relation, &a, &b) {
                    "Yes.".to_string()
                } else {
                    "No.".to_string()
                }
            }
            QueryIntent::SiblingQuestion { a, b } => match eval.sibling_kind(&a, &b) {
                Some(crate::facts::SiblingKind::Full) => {
                    format!("Yes, {a} and {b} are full siblings.")
                }
                Some(crate::facts::SiblingKind::Half) => {
                    format!("Yes, {a} and {b} are half-siblings.")
                }
                None => "No.".to_string(),
            },
            QueryIntent::AreRelatives { a, b } => {
                if a == b || eval.are_relatives(&a, &b) {
                    "Yes.".to_string()
                } else {
                    "No.".to_string()
                }
            }
            QueryIntent::WhoAreRelationOf { relation, of } => {
                let matches = matching_people(&eval, relation, &of);
                if matches.is_empty() {
                    format!("{of} has no known {}.", relation_label(relation, true))
                } else {
                    format!(
                        "The {} of {of} are {}.",
                        relation_label(relation, true),
                        join_lowercase(&matches)
                    )
                }
            }
            QueryIntent::WhoIsRelationOf { relation, of } => {
                let matches = matching_people(&eval, relation, &of);
                match matches.first() {
                    Some(person) => format!(
                        "The {} of {of} is {}.",
                        relation_label(relation, false),
                        person.canonical()
                    ),
                    None => format!("{of} has no known {}.", relation_label(relation, false)),
                }
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn matching_people(eval: &Evaluator, relation: Relation, of: &PersonId) -> Vec<PersonId> {
    eval.snapshot_people()
        .into_iter()
        .filter(|candidate| candidate != of && eval.holds(relation, candidate, of))
        .collect()
}

fn join_lowercase(people: &[PersonId]) -> String {
    let names: Vec<&str> = people.iter().map(|p| p.canonical()).collect();
    match names.len() {
        0 => String::new(),
        1 => names[0].to_string(),
        2 => format!("{} and {}", names[0], names[1]),
        _ => {
            let (last, init) = names.split_last().unwrap();
            format!("{}, and {}", init.join(", "), last)
        }
    }
}

fn relation_label(relation: Relation, plural: bool) -> &'static str {
    match (relation, plural) {
        (Relation::SiblingOf, true) => "siblings",
        (Relation::SisterOf, true) => "sisters",
        (Relation::BrotherOf, true) => "brothers",
        (Relation::ChildOf, true) => "children",
        (Relation::SonOf, true) => "sons",
        (Relation::DaughterOf, true) => "daughters",
        (Relation::NieceOf, true) => "nieces",
        (Relation::NephewOf, true) => "nephews",
        (Relation::CousinOf, true) => "cousins",
        (Relation::GrandchildOf, true) => "grandchildren",
        (Relation::HalfSiblingOf, true) => "half-siblings",
        (Relation::MotherOf, false) => "mother",
        (Relation::FatherOf, false) => "father",
        _ => "relatives",
    }
}

/// Decompose a compound surface intent into the atomic intents the
/// validator understands (§4.D's multi-person forms).
fn decompose(intent: FactIntent) -> Vec<FactIntent> {
    match intent {
        FactIntent::MultiSibling { people } => {
            let mut out = Vec::new();
            for i in 0..people.len() {
                for j in (i + 1)..people.len() {
                    out.push(FactIntent::Sibling {
                        a: people[i].clone(),
                        b: people[j].clone(),
                        gender_a: None,
                        half: None,
                    });
                }
            }
            out
        }
        FactIntent::MultiChildrenOf { children, parent } => children
            .into_iter()
            .map(|child| FactIntent::Parent { parent: parent.clone(), child, gender: Gender::Unknown })
            .collect(),
        FactIntent::ParentsOf { parent_a, parent_b, child } => vec![
            FactIntent::Parent { parent: parent_a, child: child.clone(), gender: Gender::Unknown },
            FactIntent::Parent { parent: parent_b, child, gender: Gender::Unknown },
        ],
        other => vec![other],
    }
}

/// The ground facts a directly-committable (non-rewrite) intent maps to.
fn ground_facts_for(intent: &FactIntent) -> Vec<crate::facts::Fact> {
    use crate::facts::Fact;
    match intent {
        FactIntent::Gender { person, gender } => match gender {
            Gender::Male => vec![Fact::Male(person.clone())],
            Gender::Female => vec![Fact::Female(person.clone())],
            Gender::Unknown => vec![],
        },
        FactIntent::Parent { parent, child, gender } => {
            let mut facts = vec![Fact::ParentOf { parent: parent.clone(), child: child.clone() }];
            match gender {
                Gender::Male => facts.push(Fact::Male(parent.clone())),
                Gender::Female => facts.push(Fact::Female(parent.clone())),
                Gender::Unknown => {}
            }
            facts
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_mother_then_questions() {
        let mut engine = Engine::new();
        assert_eq!(
            engine.process("Alice is the mother of Bob."),
            "OK! I learned something new."
        );
        assert_eq!(engine.process("Is Alice the mother of Bob?"), "Yes.");
        assert_eq!(engine.process("Is Bob a child of Alice?"), "Yes.");
    }

    #[test]
    fn scenario_circular_parentage_rejected() {
        let mut engine = Engine::new();
        engine.process("Alice is the mother of Bob.");
        let reply = engine.process("Bob is the father of Alice.");
        assert!(reply.starts_with("That's impossible!"));
        assert!(reply.contains("already a parent of"));
    }

    #[test]
    fn scenario_second_mother_rejected() {
        let mut engine = Engine::new();
        engine.process("Alice is the mother of Bob.");
        let reply = engine.process("Carol is the mother of Bob.");
        assert!(reply.starts_with("That's impossible!"));
        assert!(reply.contains("already has a mother"));
    }

    #[test]
    fn scenario_full_sibling_dialogue() {
        let mut engine = Engine::new();
        let reply = engine.process("Alice and Bob are siblings.");
        assert!(reply.contains("full siblings"));
        let reply = engine.process("yes");
        assert_eq!(reply, "OK! I learned something new.");
        assert_eq!(
            engine.process("Are Alice and Bob siblings?"),
            "Yes, Alice and Bob are full siblings."
        );
    }

    #[test]
    fn scenario_placeholder_superseded_by_named_mother() {
        let mut engine = Engine::new();
        engine.process("Alice and Bob are siblings.");
        engine.process("yes");
        let reply = engine.process("Carol is the mother of Alice.");
        assert_eq!(reply, "OK! I learned something new.");
        assert_eq!(engine.process("Who is the mother of Bob?"), "The mother of Bob is carol.");
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut engine = Engine::new();
        engine.process("Alice is the mother of Bob.");
        let text = engine.save();
        let mut reloaded = Engine::load(&text).unwrap();
        assert_eq!(reloaded.process("Is Alice the mother of Bob?"), "Yes.");
    }
}
