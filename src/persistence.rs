//! Persisted fact-store layout (§6): a stable, human-readable three
//! region text format. Grounded on the teacher's file-based rule
//! loading path (`std::fs::read_to_string` + `GRLParser::parse_rules`
//! in `src/engine/knowledge_base.rs`) as the model for "read a domain
//! text format into structured facts" — here applied to facts rather
//! than rules, since the rule set itself is fixed, in-memory state
//! (§4.C) and is written back only as informational reference text.

use crate::errors::{KinshipError, Result};
use crate::facts::Fact;
use crate::person::PersonId;
use crate::store::FactStore;

const HEADER: &str = "\
:- discontiguous parent_of/2.
:- discontiguous male/1.
:- discontiguous female/1.
:- discontiguous sibling_of/2.
:- discontiguous half_sibling_of/2.
";

const RULES_REGION: &str = "\
% father_of(X,Y)        :- parent_of(X,Y), male(X), X \\= Y.
% mother_of(X,Y)        :- parent_of(X,Y), female(X), X \\= Y.
% child_of(Y,X)         :- parent_of(X,Y), X \\= Y.
% son_of(Y,X)           :- child_of(Y,X), male(Y).
% daughter_of(Y,X)       :- child_of(Y,X), female(Y).
% sibling_of(X,Y)        :- parent_of(Z,X), parent_of(Z,Y), X \\= Y, Z \\= X, Z \\= Y.
% brother_of(X,Y)        :- sibling_of(X,Y), male(X).
% sister_of(X,Y)         :- sibling_of(X,Y), female(X).
% half_sibling_of(X,Y)   :- parent_of(Z,X), parent_of(Z,Y), X \\= Y, ...
% grandparent_of(X,Y)    :- parent_of(X,Z), parent_of(Z,Y), X \\= Y.
% uncle_of(X,Y)          :- brother_of(X,Z), parent_of(Z,Y), X \\= Y.
% aunt_of(X,Y)           :- sister_of(X,Z),  parent_of(Z,Y), X \\= Y.
% cousin_of(X,Y)         :- parent_of(Z1,X), parent_of(Z2,Y), sibling_of(Z1,Z2), X \\= Y.
% ancestor_of(X,Y)       :- transitive closure of parent_of, depth-bounded.
% relative(X,Y)          :- union of all of the above, symmetrized.
";

const FACTS_MARKER: &str = "% --- facts ---";
const RULES_MARKER: &str = "% --- rules (informational, not reloaded) ---";

fn encode_fact(fact: &Fact) -> String {
    match fact {
        Fact::ParentOf { parent, child } => {
            format!("parent_of({}, {}).", parent.canonical(), child.canonical())
        }
        Fact::Male(p) => format!("male({}).", p.canonical()),
        Fact::Female(p) => format!("female({}).", p.canonical()),
        Fact::SiblingOf(a, b) => format!("sibling_of({}, {}).", a.canonical(), b.canonical()),
        Fact::HalfSiblingOf(a, b) => {
            format!("half_sibling_of({}, {}).", a.canonical(), b.canonical())
        }
    }
}

fn person(raw: &str) -> Result<PersonId> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_lowercase() || c == '-' || c == '\'' || c == '_' || c.is_ascii_digit()) {
        return Err(KinshipError::PersistenceError(format!(
            "invalid stored identifier: {raw}"
        )));
    }
    Ok(PersonId::new_canonical(raw.to_string()))
}

fn decode_fact(line: &str) -> Result<Fact> {
    let line = line.trim().trim_end_matches('.');
    let (head, rest) = line
        .split_once('(')
        .ok_or_else(|| KinshipError::PersistenceError(format!("malformed fact line: {line}")))?;
    let args: Vec<&str> = rest
        .trim_end_matches(')')
        .split(',')
        .map(|s| s.trim())
        .collect();

    match head {
        "parent_of" if args.len() == 2 => Ok(Fact::ParentOf {
            parent: person(args[0])?,
            child: person(args[1])?,
        }),
        "male" if args.len() == 1 => Ok(Fact::Male(person(args[0])?)),
        "female" if args.len() == 1 => Ok(Fact::Female(person(args[0])?)),
        "sibling_of" if args.len() == 2 => Ok(Fact::SiblingOf(person(args[0])?, person(args[1])?)),
        "half_sibling_of" if args.len() == 2 => {
            Ok(Fact::HalfSiblingOf(person(args[0])?, person(args[1])?))
        }
        _ => Err(KinshipError::PersistenceError(format!(
            "unrecognized predicate in: {line}"
        ))),
    }
}

/// Render a store to the three-region text layout (§6). Facts are
/// written newest-first, matching the store's own insertion order.
pub fn encode(store: &FactStore) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(FACTS_MARKER);
    out.push('\n');
    for fact in store.all() {
        out.push_str(&encode_fact(&fact));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(RULES_MARKER);
    out.push('\n');
    out.push_str(RULES_REGION);
    out
}

/// Parse the facts region of a persisted fact store back into ground
/// facts, newest-first. The header and rules regions are read past but
/// never parsed into structured form (§6: the evaluator's rule set is
/// fixed, in-memory state).
pub fn decode(text: &str) -> Result<Vec<Fact>> {
    let mut in_facts = false;
    let mut facts = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed == FACTS_MARKER {
            in_facts = true;
            continue;
        }
        if trimmed == RULES_MARKER {
            break;
        }
        if !in_facts || trimmed.is_empty() {
            continue;
        }
        facts.push(decode_fact(trimmed)?);
    }
    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Fact;
    use crate::normalizer::normalize;

    fn pid(s: &str) -> PersonId {
        normalize(s).unwrap()
    }

    #[test]
    fn round_trips_facts_region() {
        let store = FactStore::new();
        store.insert_many(vec![
            Fact::Female(pid("Alice")),
            Fact::ParentOf { parent: pid("Alice"), child: pid("Bob") },
        ]);
        let text = encode(&store);
        let decoded = decode(&text).unwrap();
        assert_eq!(decoded, store.all());
    }

    #[test]
    fn reload_then_save_is_byte_identical() {
        let store = FactStore::new();
        store.insert_many(vec![Fact::Male(pid("Carl"))]);
        let first = encode(&store);
        let reloaded = FactStore::from_facts(decode(&first).unwrap());
        let second = encode(&reloaded);
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_malformed_line() {
        let bogus = format!("{HEADER}\n{FACTS_MARKER}\nnot_a_predicate\n{RULES_MARKER}\n");
        assert!(decode(&bogus).is_err());
    }
}
