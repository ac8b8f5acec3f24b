//! Validator (§4.E): the ten ordered checks a candidate fact must pass
//! before commit. Message phrasing throughout is grounded directly on
//! `original_source/validation.py`'s equivalent branches (gender
//! contradiction wording, "already has a father/mother" phrasing,
//! circular-ancestry wording, category-conflict wording) so the
//! user-visible text matches what the system this was distilled from
//! actually said.
//!
//! `ValidationOutcome` and `RewriteOp` are modeled as explicit sum types
//! rather than the original's string-tagged branches (`"ask_clarification:…"`,
//! `"add_direct_aunt_uncle:…"`) per the redesign note: the orchestrator
//! matches them exhaustively instead of parsing a prefix out of a string.

use crate::clarification::{ClarificationKind, ClarificationRequest};
use crate::facts::{Category, Fact, SiblingKind};
use crate::parser::FactIntent;
use crate::person::{Gender, PersonId};
use crate::reasoning::Evaluator;
use crate::store::Snapshot;

/// The result of validating one candidate fact against a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Safe to commit the intent's ground facts as-is.
    Ok,
    /// Already entailed; nothing new to commit.
    Redundant,
    /// A user-visible impossibility.
    Reject(String),
    /// Needs a dialogue turn before a commit decision can be made.
    Clarify(ClarificationRequest),
    /// Commit via a store-level transformation rather than a plain insert.
    Rewrite(RewriteOp),
}

/// A store-level transformation produced by validation or by a resolved
/// clarification (§4.E, §4.G).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOp {
    /// Delete `placeholder` and every fact mentioning it, inserting
    /// `new_parent` as the named parent of every one of its children.
    ReplacePlaceholder {
        placeholder: PersonId,
        new_parent: PersonId,
        gender: Gender,
    },
    /// Propagate a newly named parent to every member of a full sibling
    /// group (§4.E item 9).
    PropagateParentToFullSiblings {
        parent: PersonId,
        gender: Gender,
        children: Vec<PersonId>,
    },
    /// Commit a direct aunt/uncle fact plus the gender it implies.
    AddDirectAuntUncle {
        person: PersonId,
        gender: Gender,
        parent_of_niece_nephew: PersonId,
    },
    /// Create a new placeholder parent of `gender` for both `a` and `b`,
    /// asserting full siblinghood (both parents shared/placeholder).
    CreateFullSiblingPlaceholders { a: PersonId, b: PersonId },
    /// Create one shared placeholder parent (of `shared_gender`) and
    /// leave the other parent slot open for each side, asserting half
    /// siblinghood.
    CreateHalfSiblingPlaceholder {
        a: PersonId,
        b: PersonId,
        shared_gender: Gender,
    },
}

fn display_gender_role(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "father",
        Gender::Female => "mother",
        Gender::Unknown => "parent",
    }
}

/// Validate a candidate [`FactIntent`] against `snapshot`, in the order
/// spec'd (§4.E 1–10).
pub fn validate(intent: &FactIntent, snapshot: &Snapshot) -> ValidationOutcome {
    let eval = Evaluator::new(snapshot);
    match intent {
        FactIntent::Gender { person, gender } => validate_gender(&eval, person, *gender),
        FactIntent::Parent { parent, child, gender } => {
            validate_parent(&eval, parent, child, *gender)
        }
        FactIntent::Sibling { a, b, gender_a, half } => {
            validate_sibling(&eval, a, b, *gender_a, *half)
        }
        FactIntent::Grandparent { grandparent, grandchild, gender } => ValidationOutcome::Clarify(
            ClarificationRequest::new(ClarificationKind::GrandparentSide {
                grandparent: grandparent.clone(),
                grandchild: grandchild.clone(),
                gender: *gender,
            }),
        ),
        FactIntent::AuntUncle { person, niece_nephew, gender } => ValidationOutcome::Clarify(
            ClarificationRequest::new(ClarificationKind::AuntUncleSide {
                person: person.clone(),
                niece_nephew: niece_nephew.clone(),
                gender: *gender,
            }),
        ),
        FactIntent::CousinAssertion { a, b } => validate_cousin_assertion(&eval, a, b),
        FactIntent::MultiSibling { .. }
        | FactIntent::MultiChildrenOf { .. }
        | FactIntent::ParentsOf { .. } => {
            // Decomposed by the session orchestrator into the atomic
            // intents above before reaching the validator.
            ValidationOutcome::Reject(
                "internal: compound intents must be decomposed before validation".to_string(),
            )
        }
    }
}

fn validate_gender(eval: &Evaluator, person: &PersonId, gender: Gender) -> ValidationOutcome {
    let existing = eval.gender_of(person);
    if existing.is_known() {
        if existing == gender {
            return ValidationOutcome::Redundant;
        }
        return ValidationOutcome::Reject(format!(
            "{person} is already known to be {}; a person's gender cannot change.",
            gender_word(existing)
        ));
    }
    ValidationOutcome::Ok
}

fn gender_word(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
        Gender::Unknown => "unknown",
    }
}

fn validate_parent(
    eval: &Evaluator,
    parent: &PersonId,
    child: &PersonId,
    gender: Gender,
) -> ValidationOutcome {
    if parent == child {
        return ValidationOutcome::Reject(format!("{parent} cannot be their own parent."));
    }

    // 1. Gender contradiction.
    if gender.is_known() {
        let existing = eval.gender_of(parent);
        if existing.is_known() && existing != gender {
            return ValidationOutcome::Reject(format!(
                "{parent} is already known to be {}, so {parent} cannot be the {} of {child}.",
                gender_word(existing),
                display_gender_role(gender)
            ));
        }
    }

    if eval.contains(Fact::ParentOf { parent: parent.clone(), child: child.clone() }) {
        return ValidationOutcome::Redundant;
    }

    // 4. Hierarchical acyclicity.
    if let Some(depth) = eval.ancestor_depth(child, parent) {
        if depth == 1 {
            return ValidationOutcome::Reject(format!(
                "{child} is already a parent of {parent}."
            ));
        }
        return ValidationOutcome::Reject(format!(
            "{child} is already an ancestor of {parent}, so {parent} cannot be {child}'s parent without creating a cycle."
        ));
    }

    let existing_parents = eval.parents_of(child);

    // 3. Two-parent cap.
    if existing_parents.len() >= 2 && !existing_parents.contains(parent) {
        return ValidationOutcome::Reject(format!(
            "{child} already has two parents. A person can only have two parents."
        ));
    }

    // 2/7. Single-parent-per-gender, with placeholder-aware rewrite.
    if gender.is_known() {
        let same_gender_parent = existing_parents
            .iter()
            .find(|p| eval.gender_of(p) == gender)
            .cloned();
        if let Some(existing) = same_gender_parent {
            if existing.is_placeholder() {
                return ValidationOutcome::Rewrite(placeholder_replacement(
                    eval, &existing, parent, gender,
                ));
            }
            return ValidationOutcome::Reject(format!(
                "{child} already has a {} ({existing}). A person can only have one {}.",
                display_gender_role(gender),
                display_gender_role(gender)
            ));
        }
    }

    // 9. Parent-to-sibling-group propagation.
    if let Some(op) = sibling_group_propagation(eval, child, parent, gender) {
        return ValidationOutcome::Rewrite(op);
    }

    // 5/6. Category exclusivity + incest gates, checked last so that any
    // count-based conflict (two-parent cap, gender duplication) wins over
    // a category conflict on the same pair, matching the original
    // top-level dispatch order (incest/category is the final check run).
    if let Some(category) = eval.category_of(parent, child) {
        return ValidationOutcome::Reject(format!(
            "{parent} and {child} are already {}; they cannot also be parent and child.",
            describe_category(category)
        ));
    }

    ValidationOutcome::Ok
}

fn placeholder_replacement(
    eval: &Evaluator,
    placeholder: &PersonId,
    new_parent: &PersonId,
    gender: Gender,
) -> RewriteOp {
    let _ = eval;
    RewriteOp::ReplacePlaceholder {
        placeholder: placeholder.clone(),
        new_parent: new_parent.clone(),
        gender,
    }
}

/// If `child` belongs to a *full* sibling group, propagate the newly
/// named parent to every member (§4.E item 9). Half sibling groups
/// confine the parent to `child` alone — no rewrite needed there.
fn sibling_group_propagation(
    eval: &Evaluator,
    child: &PersonId,
    parent: &PersonId,
    gender: Gender,
) -> Option<RewriteOp> {
    if !gender.is_known() {
        return None;
    }
    let mut full_siblings: Vec<PersonId> = Vec::new();
    for other in eval.snapshot_people() {
        if &other == child {
            continue;
        }
        if eval.sibling_kind(child, &other) == Some(SiblingKind::Full) {
            full_siblings.push(other);
        }
    }
    if full_siblings.is_empty() {
        return None;
    }
    let mut children = vec![child.clone()];
    children.extend(full_siblings);
    Some(RewriteOp::PropagateParentToFullSiblings { parent: parent.clone(), gender, children })
}

fn describe_category(category: Category) -> &'static str {
    match category {
        Category::Ancestor { forward: true } => "ancestor and descendant",
        Category::Ancestor { forward: false } => "descendant and ancestor",
        Category::Sibling(SiblingKind::Full) => "full siblings",
        Category::Sibling(SiblingKind::Half) => "half siblings",
        Category::AuntUncleNieceNephew { forward: true } => "aunt/uncle and niece/nephew",
        Category::AuntUncleNieceNephew { forward: false } => "niece/nephew and aunt/uncle",
        Category::Cousin => "cousins",
    }
}

fn validate_sibling(
    eval: &Evaluator,
    a: &PersonId,
    b: &PersonId,
    gender_a: Option<Gender>,
    half: Option<bool>,
) -> ValidationOutcome {
    if a == b {
        return ValidationOutcome::Reject(format!("{a} cannot be their own sibling."));
    }

    if let Some(gender) = gender_a {
        if let ValidationOutcome::Reject(msg) = validate_gender(eval, a, gender) {
            return ValidationOutcome::Reject(msg);
        }
    }

    if let Some(category) = eval.category_of(a, b) {
        if let Category::Sibling(existing_kind) = category {
            let wants_half = half.unwrap_or(false);
            let is_half = existing_kind == SiblingKind::Half;
            if wants_half == is_half {
                return ValidationOutcome::Redundant;
            }
            return ValidationOutcome::Reject(format!(
                "{a} and {b} are already known to be {}; they cannot also be {}.",
                describe_category(category),
                if wants_half { "half siblings" } else { "full siblings" }
            ));
        }
        return ValidationOutcome::Reject(format!(
            "{a} and {b} are already {}; they cannot also be siblings.",
            describe_category(category)
        ));
    }

    match half {
        Some(true) => ValidationOutcome::Clarify(ClarificationRequest::new(
            ClarificationKind::HalfSiblingSharedParent { a: a.clone(), b: b.clone() },
        )),
        Some(false) => ValidationOutcome::Rewrite(RewriteOp::CreateFullSiblingPlaceholders {
            a: a.clone(),
            b: b.clone(),
        }),
        None => ValidationOutcome::Clarify(ClarificationRequest::new(
            ClarificationKind::FullSibling { a: a.clone(), b: b.clone() },
        )),
    }
}

fn validate_cousin_assertion(eval: &Evaluator, a: &PersonId, b: &PersonId) -> ValidationOutcome {
    if a == b {
        return ValidationOutcome::Reject(format!("{a} cannot be their own cousin."));
    }
    if eval.are_cousins(a, b) {
        return ValidationOutcome::Redundant;
    }
    if let Some(category) = eval.category_of(a, b) {
        return ValidationOutcome::Reject(format!(
            "{a} and {b} are already {}; they cannot also be cousins.",
            describe_category(category)
        ));
    }
    ValidationOutcome::Reject(
        "Cousin relationships can only be inferred from shared grandparents, not stated directly."
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::store::FactStore;

    fn pid(s: &str) -> PersonId {
        normalize(s).unwrap()
    }

    #[test]
    fn simple_mother_statement_is_ok() {
        let store = FactStore::new();
        let snap = store.snapshot();
        let outcome = validate(
            &FactIntent::Parent { parent: pid("Alice"), child: pid("Bob"), gender: Gender::Female },
            &snap,
        );
        assert_eq!(outcome, ValidationOutcome::Ok);
    }

    #[test]
    fn second_mother_is_rejected() {
        let store = FactStore::new();
        store.insert_many(vec![
            Fact::Female(pid("Alice")),
            Fact::ParentOf { parent: pid("Alice"), child: pid("Bob") },
        ]);
        let snap = store.snapshot();
        let outcome = validate(
            &FactIntent::Parent { parent: pid("Carol"), child: pid("Bob"), gender: Gender::Female },
            &snap,
        );
        assert!(matches!(outcome, ValidationOutcome::Reject(_)));
    }

    #[test]
    fn circular_parentage_rejected() {
        let store = FactStore::new();
        store.insert_many(vec![
            Fact::Female(pid("Alice")),
            Fact::ParentOf { parent: pid("Alice"), child: pid("Bob") },
        ]);
        let snap = store.snapshot();
        let outcome = validate(
            &FactIntent::Parent { parent: pid("Bob"), child: pid("Alice"), gender: Gender::Male },
            &snap,
        );
        match outcome {
            ValidationOutcome::Reject(msg) => assert!(msg.contains("already a parent of")),
            other => panic!("expected reject, got {other:?}"),
        }
    }

    #[test]
    fn ambiguous_siblings_clarify() {
        let store = FactStore::new();
        let snap = store.snapshot();
        let outcome = validate(
            &FactIntent::Sibling { a: pid("Alice"), b: pid("Bob"), gender_a: None, half: None },
            &snap,
        );
        assert!(matches!(outcome, ValidationOutcome::Clarify(_)));
    }

    #[test]
    fn placeholder_mother_is_replaced_on_named_mother() {
        let store = FactStore::new();
        let placeholder = pid("Shared_mother_alice_bob");
        store.insert_many(vec![
            Fact::Female(placeholder.clone()),
            Fact::ParentOf { parent: placeholder.clone(), child: pid("Alice") },
        ]);
        let snap = store.snapshot();
        let outcome = validate(
            &FactIntent::Parent { parent: pid("Carol"), child: pid("Alice"), gender: Gender::Female },
            &snap,
        );
        assert!(matches!(
            outcome,
            ValidationOutcome::Rewrite(RewriteOp::ReplacePlaceholder { .. })
        ));
    }

    // Pins the check order against `original_source/validation.py`'s
    // `validate_relationship` dispatch, where incest/category checks run
    // last: Dan is already a full sibling of Carol (a category conflict)
    // *and* Carol already has two parents (a count conflict). The
    // count-based rejection must win.
    #[test]
    fn two_parent_cap_checked_before_category_exclusivity() {
        let store = FactStore::new();
        store.insert_many(vec![
            Fact::Female(pid("Alice")),
            Fact::Male(pid("Bob")),
            Fact::ParentOf { parent: pid("Alice"), child: pid("Carol") },
            Fact::ParentOf { parent: pid("Bob"), child: pid("Carol") },
            Fact::ParentOf { parent: pid("Alice"), child: pid("Dan") },
            Fact::ParentOf { parent: pid("Bob"), child: pid("Dan") },
        ]);
        let snap = store.snapshot();
        let outcome = validate(
            &FactIntent::Parent { parent: pid("Dan"), child: pid("Carol"), gender: Gender::Unknown },
            &snap,
        );
        match outcome {
            ValidationOutcome::Reject(msg) => assert!(msg.contains("already has two parents")),
            other => panic!("expected reject, got {other:?}"),
        }
    }
}
