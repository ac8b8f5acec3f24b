//! Fact writer (§4.G): applies a resolved validation or clarification
//! result to the store atomically, then runs the post-rewrite cleanup
//! pass. Grounded on `original_source/fact_manager.py`'s family of
//! `add_*`/`update_*` methods, collapsed here into one dispatch over
//! [`RewriteOp`] since the validator's sum-type redesign already carries
//! the distinction those separate methods existed to encode.

use crate::clarification::CommitPlan;
use crate::facts::Fact;
use crate::person::{Gender, PersonId};
use crate::store::FactStore;
use crate::validator::RewriteOp;

fn gender_fact(who: &PersonId, gender: Gender) -> Option<Fact> {
    match gender {
        Gender::Male => Some(Fact::Male(who.clone())),
        Gender::Female => Some(Fact::Female(who.clone())),
        Gender::Unknown => None,
    }
}

/// Insert a plain set of ground facts — the `Ok` path.
pub fn commit_facts(store: &FactStore, facts: Vec<Fact>) {
    store.insert_many(facts);
    cleanup_pass(store);
}

/// Apply a [`RewriteOp`], then run the cleanup pass.
pub fn apply_rewrite(store: &FactStore, op: RewriteOp) {
    match op {
        RewriteOp::ReplacePlaceholder { placeholder, new_parent, gender } => {
            let children: Vec<PersonId> = store
                .all()
                .iter()
                .filter_map(|f| match f {
                    Fact::ParentOf { parent, child } if *parent == placeholder => {
                        Some(child.clone())
                    }
                    _ => None,
                })
                .collect();
            store.remove_where(|f| f.mentions(&placeholder));
            let mut facts: Vec<Fact> = children
                .into_iter()
                .map(|child| Fact::ParentOf { parent: new_parent.clone(), child })
                .collect();
            if let Some(g) = gender_fact(&new_parent, gender) {
                facts.push(g);
            }
            store.insert_many(facts);
        }
        RewriteOp::PropagateParentToFullSiblings { parent, gender, children } => {
            let mut facts: Vec<Fact> = children
                .into_iter()
                .map(|child| Fact::ParentOf { parent: parent.clone(), child })
                .collect();
            if let Some(g) = gender_fact(&parent, gender) {
                facts.push(g);
            }
            store.insert_many(facts);
        }
        RewriteOp::AddDirectAuntUncle { person, gender, parent_of_niece_nephew } => {
            // The aunt/uncle relation is derived (sibling-of-a-parent),
            // never stored directly; committing it means asserting the
            // sibling link between `person` and the niece/nephew's parent
            // already resolved by the clarification dialogue, plus the
            // implied gender fact.
            let mut facts = Vec::new();
            if let Some(g) = gender_fact(&person, gender) {
                facts.push(g);
            }
            facts.push(Fact::SiblingOf(person, parent_of_niece_nephew));
            store.insert_many(facts);
        }
        RewriteOp::CreateFullSiblingPlaceholders { a, b } => {
            let mother = PersonId::placeholder_for(Gender::Female, &a, &b);
            let father = PersonId::placeholder_for(Gender::Male, &a, &b);
            store.insert_many(vec![
                Fact::Female(mother.clone()),
                Fact::Male(father.clone()),
                Fact::ParentOf { parent: mother.clone(), child: a.clone() },
                Fact::ParentOf { parent: father.clone(), child: a.clone() },
                Fact::ParentOf { parent: mother, child: b.clone() },
                Fact::ParentOf { parent: father, child: b },
                Fact::SiblingOf(a, b),
            ]);
        }
        RewriteOp::CreateHalfSiblingPlaceholder { a, b, shared_gender } => {
            let shared = PersonId::placeholder_for(shared_gender, &a, &b);
            let shared_gender_fact = gender_fact(&shared, shared_gender)
                .expect("half-sibling placeholders are always gendered");
            store.insert_many(vec![
                shared_gender_fact,
                Fact::ParentOf { parent: shared.clone(), child: a.clone() },
                Fact::ParentOf { parent: shared, child: b.clone() },
                Fact::HalfSiblingOf(a, b),
            ]);
        }
    }
    cleanup_pass(store);
}

/// Apply a clarification's resolved plan.
pub fn apply_plan(store: &FactStore, plan: CommitPlan) {
    match plan {
        CommitPlan::Facts(facts) => commit_facts(store, facts),
        CommitPlan::Rewrite(op) => apply_rewrite(store, op),
    }
}

/// After any parentage-changing rewrite: for any child with both a
/// named same-gender parent and a placeholder of that gender, remove
/// the placeholder and re-parent its other children to the named one
/// (§4.G, §3 invariant 6).
fn cleanup_pass(store: &FactStore) {
    loop {
        let all = store.all();
        let mut superseded = None;

        'search: for fact in &all {
            if let Fact::ParentOf { parent: named, child } = fact {
                if named.is_placeholder() {
                    continue;
                }
                let named_gender = {
                    let eval_facts = &all;
                    gender_of_in(eval_facts, named)
                };
                if !named_gender.is_known() {
                    continue;
                }
                for other in &all {
                    if let Fact::ParentOf { parent: placeholder, child: same_child } = other {
                        if same_child == child
                            && placeholder.is_placeholder()
                            && gender_of_in(&all, placeholder) == named_gender
                        {
                            superseded = Some((placeholder.clone(), named.clone(), named_gender));
                            break 'search;
                        }
                    }
                }
            }
        }

        match superseded {
            Some((placeholder, new_parent, gender)) => {
                let children: Vec<PersonId> = all
                    .iter()
                    .filter_map(|f| match f {
                        Fact::ParentOf { parent, child } if *parent == placeholder => {
                            Some(child.clone())
                        }
                        _ => None,
                    })
                    .collect();
                store.remove_where(|f| f.mentions(&placeholder));
                let mut facts: Vec<Fact> = children
                    .into_iter()
                    .map(|child| Fact::ParentOf { parent: new_parent.clone(), child })
                    .collect();
                if let Some(g) = gender_fact(&new_parent, gender) {
                    facts.push(g);
                }
                store.insert_many(facts);
            }
            None => break,
        }
    }
}

fn gender_of_in(facts: &[Fact], who: &PersonId) -> Gender {
    for fact in facts {
        match fact {
            Fact::Male(p) if p == who => return Gender::Male,
            Fact::Female(p) if p == who => return Gender::Female,
            _ => {}
        }
    }
    Gender::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;

    fn pid(s: &str) -> PersonId {
        normalize(s).unwrap()
    }

    #[test]
    fn replace_placeholder_removes_it_and_keeps_children() {
        let store = FactStore::new();
        let placeholder = pid("Shared_mother_alice_bob");
        store.insert_many(vec![
            Fact::Female(placeholder.clone()),
            Fact::ParentOf { parent: placeholder.clone(), child: pid("Alice") },
            Fact::ParentOf { parent: placeholder.clone(), child: pid("Bob") },
        ]);
        apply_rewrite(
            &store,
            RewriteOp::ReplacePlaceholder {
                placeholder: placeholder.clone(),
                new_parent: pid("Carol"),
                gender: Gender::Female,
            },
        );
        let all = store.all();
        assert!(all.iter().all(|f| !f.mentions(&placeholder)));
        assert!(all.contains(&Fact::ParentOf { parent: pid("Carol"), child: pid("Alice") }));
        assert!(all.contains(&Fact::ParentOf { parent: pid("Carol"), child: pid("Bob") }));
    }

    #[test]
    fn full_sibling_placeholders_created_for_both() {
        let store = FactStore::new();
        apply_rewrite(
            &store,
            RewriteOp::CreateFullSiblingPlaceholders { a: pid("Alice"), b: pid("Bob") },
        );
        let all = store.all();
        assert!(all.contains(&Fact::SiblingOf(pid("Alice"), pid("Bob"))));
        assert_eq!(
            all.iter()
                .filter(|f| matches!(f, Fact::ParentOf { child, .. } if child == &pid("Alice")))
                .count(),
            2
        );
    }

    #[test]
    fn cleanup_pass_supersedes_placeholder_after_direct_commit() {
        let store = FactStore::new();
        let placeholder = pid("Shared_mother_alice_bob");
        store.insert_many(vec![
            Fact::Female(placeholder.clone()),
            Fact::ParentOf { parent: placeholder, child: pid("Alice") },
        ]);
        commit_facts(
            &store,
            vec![
                Fact::Female(pid("Carol")),
                Fact::ParentOf { parent: pid("Carol"), child: pid("Alice") },
            ],
        );
        let all = store.all();
        assert!(all.iter().all(|f| !f.mentions(&pid("Shared_mother_alice_bob"))));
    }
}
