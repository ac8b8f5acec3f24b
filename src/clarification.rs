//! Clarification protocol (§4.F): a finite-state dialogue that resolves
//! an ambiguous candidate fact across one or more follow-up turns.
//!
//! `ClarificationKind` is a typed enum carrying exactly the fields each
//! stage needs to resume, in place of `original_source/clarification.py`'s
//! stringly-keyed context dict — the teacher's own preference for sum
//! types over tagged maps, applied here to a dialogue state machine
//! instead of a rule-evaluation result.
//!
//! **Aunt/uncle is three chained questions, not one.**
//! `original_source/clarification.py`'s
//! `_handle_aunt_uncle_sophisticated_response` /
//! `_handle_aunt_uncle_sibling_response` /
//! `_handle_aunt_uncle_half_sibling_shared_parent_response` resolve an
//! aunt/uncle fact by first picking maternal-or-paternal side, then
//! asking whether the aunt/uncle is a full sibling of that parent, then
//! — only if not — which parent they share. Collapsing that into two
//! stages would silently misclassify every half-sibling aunt/uncle as a
//! direct sibling of the named parent, so all three stages are kept.

use crate::person::{Gender, PersonId};
use crate::reasoning::Evaluator;
use crate::store::Snapshot;
use crate::validator::RewriteOp;

/// The state carried across a pending multi-turn dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClarificationRequest {
    pub kind: ClarificationKind,
}

impl ClarificationRequest {
    pub fn new(kind: ClarificationKind) -> Self {
        Self { kind }
    }

    /// The user-facing prompt for the current stage.
    pub fn prompt(&self) -> String {
        self.kind.prompt()
    }
}

/// Which disambiguation is pending and the fields needed to resume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarificationKind {
    /// "Is G a maternal/paternal grandparent of C?"
    GrandparentSide {
        grandparent: PersonId,
        grandchild: PersonId,
        gender: Gender,
    },
    /// "Is A a maternal or paternal aunt/uncle of N?"
    AuntUncleSide {
        person: PersonId,
        niece_nephew: PersonId,
        gender: Gender,
    },
    /// "Are A and ParentOfN full siblings?"
    AuntUncleFull {
        person: PersonId,
        gender: Gender,
        parent_of_niece_nephew: PersonId,
        niece_nephew: PersonId,
    },
    /// "Do A and ParentOfN share a mother?" — reached only when the
    /// previous stage answered no.
    AuntUncleHalfSiblingSharedParent {
        person: PersonId,
        gender: Gender,
        parent_of_niece_nephew: PersonId,
        niece_nephew: PersonId,
    },
    /// "Are X and Y full siblings?"
    FullSibling { a: PersonId, b: PersonId },
    /// "Do X and Y share a mother?" — reached when the full-sibling
    /// question (or an explicit half-sibling statement) answered no/half.
    HalfSiblingSharedParent { a: PersonId, b: PersonId },
}

impl ClarificationKind {
    pub fn prompt(&self) -> String {
        match self {
            ClarificationKind::GrandparentSide { grandparent, grandchild, .. } => {
                format!("Is {grandparent} a maternal or paternal grandparent of {grandchild}?")
            }
            ClarificationKind::AuntUncleSide { person, niece_nephew, .. } => {
                format!("Is {person} a maternal or paternal aunt/uncle of {niece_nephew}?")
            }
            ClarificationKind::AuntUncleFull { person, parent_of_niece_nephew, .. } => {
                format!("Are {person} and {parent_of_niece_nephew} full siblings?")
            }
            ClarificationKind::AuntUncleHalfSiblingSharedParent {
                person, parent_of_niece_nephew, ..
            } => format!("Do {person} and {parent_of_niece_nephew} share a mother?"),
            ClarificationKind::FullSibling { a, b } => format!("Are {a} and {b} full siblings?"),
            ClarificationKind::HalfSiblingSharedParent { a, b } => {
                format!("Do {a} and {b} share a mother?")
            }
        }
    }
}

/// A resolved dialogue outcome ready for the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitPlan {
    Facts(Vec<crate::facts::Fact>),
    Rewrite(RewriteOp),
}

/// The result of feeding one reply into a pending [`ClarificationKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarificationOutcome {
    /// The dialogue is resolved; commit this plan.
    Commit(CommitPlan),
    /// Move to the next stage with a new prompt.
    Chain(ClarificationRequest),
    /// The reply wasn't understood; ask again with this message.
    Reprompt(String),
    /// The dialogue can't be resolved from what's already known; give up
    /// with this message instead of committing or chaining further.
    Abort(String),
}

fn parse_yes_no(reply: &str) -> Option<bool> {
    match reply.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_side(reply: &str) -> Option<bool> {
    match reply.trim().to_ascii_lowercase().as_str() {
        "maternal" | "mother" | "yes" => Some(true),
        "paternal" | "father" | "no" => Some(false),
        _ => None,
    }
}

/// Find the parent of `who` matching `desired_gender`, as
/// `original_source/fact_manager.py`'s `add_grandparent_relationship` and
/// `clarification.py`'s `_handle_aunt_uncle_sophisticated_response` do via
/// their `mother_of`/`father_of` lookups.
fn parent_of_gender(eval: &Evaluator, who: &PersonId, desired_gender: Gender) -> Option<PersonId> {
    eval.parents_of(who).into_iter().find(|p| eval.gender_of(p) == desired_gender)
}

/// Advance a pending clarification given the user's reply.
pub fn handle_response(
    kind: &ClarificationKind,
    reply: &str,
    snapshot: &Snapshot,
) -> ClarificationOutcome {
    match kind {
        ClarificationKind::GrandparentSide { grandparent, grandchild, gender } => {
            match parse_side(reply) {
                Some(maternal) => {
                    let desired_gender = if maternal { Gender::Female } else { Gender::Male };
                    let eval = Evaluator::new(snapshot);
                    match parent_of_gender(&eval, grandchild, desired_gender) {
                        Some(middle_parent) => {
                            let mut facts = vec![crate::facts::Fact::ParentOf {
                                parent: grandparent.clone(),
                                child: middle_parent,
                            }];
                            facts.extend(gender_fact(grandparent, *gender));
                            ClarificationOutcome::Commit(CommitPlan::Facts(facts))
                        }
                        None => ClarificationOutcome::Abort(format!(
                            "That's impossible! {grandchild} doesn't have a known {} yet, so {grandparent} can't be {grandchild}'s {} that way.",
                            if maternal { "mother" } else { "father" },
                            if maternal { "maternal grandparent" } else { "paternal grandparent" },
                        )),
                    }
                }
                None => ClarificationOutcome::Reprompt(format!(
                    "Please respond 'maternal' or 'paternal' for {grandparent}'s side of {grandchild}'s family."
                )),
            }
        }
        ClarificationKind::AuntUncleSide { person, niece_nephew, gender } => {
            match parse_side(reply) {
                Some(maternal) => {
                    let desired_gender = if maternal { Gender::Female } else { Gender::Male };
                    let eval = Evaluator::new(snapshot);
                    let resolved = parent_of_gender(&eval, niece_nephew, desired_gender)
                        .or_else(|| eval.parents_of(niece_nephew).into_iter().next());
                    match resolved {
                        Some(parent_of_niece_nephew) => {
                            ClarificationOutcome::Chain(ClarificationRequest::new(
                                ClarificationKind::AuntUncleFull {
                                    person: person.clone(),
                                    gender: *gender,
                                    parent_of_niece_nephew,
                                    niece_nephew: niece_nephew.clone(),
                                },
                            ))
                        }
                        None => ClarificationOutcome::Abort(format!(
                            "That's impossible! {niece_nephew} doesn't have a known parent yet, so I can't place {person} as an aunt/uncle."
                        )),
                    }
                }
                None => ClarificationOutcome::Reprompt(format!(
                    "Please respond 'maternal' or 'paternal' for how {person} relates to {niece_nephew}."
                )),
            }
        }
        ClarificationKind::AuntUncleFull { person, gender, parent_of_niece_nephew, niece_nephew } => {
            match parse_yes_no(reply) {
                Some(true) => ClarificationOutcome::Commit(CommitPlan::Rewrite(
                    RewriteOp::AddDirectAuntUncle {
                        person: person.clone(),
                        gender: *gender,
                        parent_of_niece_nephew: parent_of_niece_nephew.clone(),
                    },
                )),
                Some(false) => ClarificationOutcome::Chain(ClarificationRequest::new(
                    ClarificationKind::AuntUncleHalfSiblingSharedParent {
                        person: person.clone(),
                        gender: *gender,
                        parent_of_niece_nephew: parent_of_niece_nephew.clone(),
                        niece_nephew: niece_nephew.clone(),
                    },
                )),
                None => ClarificationOutcome::Reprompt("Please respond with 'yes' or 'no'.".to_string()),
            }
        }
        ClarificationKind::AuntUncleHalfSiblingSharedParent {
            person, gender, parent_of_niece_nephew, ..
        } => {
            match parse_yes_no(reply) {
                Some(_shares_mother) => ClarificationOutcome::Commit(CommitPlan::Rewrite(
                    RewriteOp::AddDirectAuntUncle {
                        person: person.clone(),
                        gender: *gender,
                        parent_of_niece_nephew: parent_of_niece_nephew.clone(),
                    },
                )),
                None => ClarificationOutcome::Reprompt("Please respond with 'yes' or 'no'.".to_string()),
            }
        }
        ClarificationKind::FullSibling { a, b } => match parse_yes_no(reply) {
            Some(true) => ClarificationOutcome::Commit(CommitPlan::Rewrite(
                RewriteOp::CreateFullSiblingPlaceholders { a: a.clone(), b: b.clone() },
            )),
            Some(false) => ClarificationOutcome::Chain(ClarificationRequest::new(
                ClarificationKind::HalfSiblingSharedParent { a: a.clone(), b: b.clone() },
            )),
            None => ClarificationOutcome::Reprompt("Please respond with 'yes' or 'no'.".to_string()),
        },
        ClarificationKind::HalfSiblingSharedParent { a, b } => match parse_yes_no(reply) {
            Some(shares_mother) => {
                let shared_gender = if shares_mother { Gender::Female } else { Gender::Male };
                ClarificationOutcome::Commit(CommitPlan::Rewrite(
                    RewriteOp::CreateHalfSiblingPlaceholder { a: a.clone(), b: b.clone(), shared_gender },
                ))
            }
            None => ClarificationOutcome::Reprompt("Please respond with 'yes' or 'no'.".to_string()),
        },
    }
}

fn gender_fact(who: &PersonId, gender: Gender) -> Option<crate::facts::Fact> {
    match gender {
        Gender::Male => Some(crate::facts::Fact::Male(who.clone())),
        Gender::Female => Some(crate::facts::Fact::Female(who.clone())),
        Gender::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Fact;
    use crate::normalizer::normalize;
    use crate::store::FactStore;

    fn pid(s: &str) -> PersonId {
        normalize(s).unwrap()
    }

    fn empty_snapshot() -> Snapshot {
        FactStore::new().snapshot()
    }

    #[test]
    fn full_sibling_yes_creates_placeholders() {
        let kind = ClarificationKind::FullSibling { a: pid("Alice"), b: pid("Bob") };
        let outcome = handle_response(&kind, "yes", &empty_snapshot());
        assert!(matches!(
            outcome,
            ClarificationOutcome::Commit(CommitPlan::Rewrite(
                RewriteOp::CreateFullSiblingPlaceholders { .. }
            ))
        ));
    }

    #[test]
    fn full_sibling_no_chains_to_half_sibling_question() {
        let kind = ClarificationKind::FullSibling { a: pid("Alice"), b: pid("Bob") };
        let outcome = handle_response(&kind, "no", &empty_snapshot());
        assert!(matches!(
            outcome,
            ClarificationOutcome::Chain(ClarificationRequest {
                kind: ClarificationKind::HalfSiblingSharedParent { .. }
            })
        ));
    }

    #[test]
    fn invalid_reply_reprompts() {
        let kind = ClarificationKind::FullSibling { a: pid("Alice"), b: pid("Bob") };
        let outcome = handle_response(&kind, "maybe", &empty_snapshot());
        assert!(matches!(outcome, ClarificationOutcome::Reprompt(_)));
    }

    #[test]
    fn aunt_uncle_side_chains_to_full_sibling_stage() {
        let store = FactStore::new();
        store.insert_many(vec![
            Fact::Female(pid("Eve")),
            Fact::ParentOf { parent: pid("Eve"), child: pid("Dan") },
        ]);
        let kind = ClarificationKind::AuntUncleSide {
            person: pid("Carol"),
            niece_nephew: pid("Dan"),
            gender: Gender::Female,
        };
        let outcome = handle_response(&kind, "maternal", &store.snapshot());
        match outcome {
            ClarificationOutcome::Chain(ClarificationRequest {
                kind: ClarificationKind::AuntUncleFull { parent_of_niece_nephew, .. },
            }) => assert_eq!(parent_of_niece_nephew, pid("Eve")),
            other => panic!("expected chain to AuntUncleFull, got {other:?}"),
        }
    }

    #[test]
    fn aunt_uncle_side_aborts_when_no_parent_known() {
        let kind = ClarificationKind::AuntUncleSide {
            person: pid("Carol"),
            niece_nephew: pid("Dan"),
            gender: Gender::Female,
        };
        let outcome = handle_response(&kind, "maternal", &empty_snapshot());
        assert!(matches!(outcome, ClarificationOutcome::Abort(_)));
    }

    #[test]
    fn grandparent_side_resolves_middle_parent_and_commits() {
        let store = FactStore::new();
        store.insert_many(vec![
            Fact::Female(pid("Alice")),
            Fact::ParentOf { parent: pid("Alice"), child: pid("Bob") },
        ]);
        let kind = ClarificationKind::GrandparentSide {
            grandparent: pid("Carol"),
            grandchild: pid("Bob"),
            gender: Gender::Female,
        };
        let outcome = handle_response(&kind, "maternal", &store.snapshot());
        match outcome {
            ClarificationOutcome::Commit(CommitPlan::Facts(facts)) => {
                assert!(facts.contains(&Fact::ParentOf {
                    parent: pid("Carol"),
                    child: pid("Alice"),
                }));
                assert!(facts.contains(&Fact::Female(pid("Carol"))));
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn grandparent_side_aborts_when_middle_parent_unknown() {
        let kind = ClarificationKind::GrandparentSide {
            grandparent: pid("Carol"),
            grandchild: pid("Bob"),
            gender: Gender::Female,
        };
        let outcome = handle_response(&kind, "maternal", &empty_snapshot());
        assert!(matches!(outcome, ClarificationOutcome::Abort(_)));
    }

    #[test]
    fn aunt_uncle_full_no_chains_to_shared_parent_stage() {
        let kind = ClarificationKind::AuntUncleFull {
            person: pid("Carol"),
            gender: Gender::Female,
            parent_of_niece_nephew: pid("Eve"),
            niece_nephew: pid("Dan"),
        };
        let outcome = handle_response(&kind, "no", &empty_snapshot());
        assert!(matches!(
            outcome,
            ClarificationOutcome::Chain(ClarificationRequest {
                kind: ClarificationKind::AuntUncleHalfSiblingSharedParent { .. }
            })
        ));
    }
}
