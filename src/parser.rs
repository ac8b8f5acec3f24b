//! Template matcher (§4.D): a prioritized, table-driven set of
//! `(regex, intent builder)` entries. Grounded on the teacher's
//! table-driven `GRLParser` (`src/parser/grl_parser.rs`) in spirit —
//! ordered pattern list, first match wins — but built on the `regex`
//! crate since this grammar is closed and small, rather than the
//! teacher's hand-rolled scanner, which exists to parse a much larger
//! general-purpose rule language.
//!
//! Pattern order matters: more specific surface forms ("grandmother")
//! must be tried before the forms they'd otherwise be swallowed by
//! ("mother"), recovered from `original_source/parser.py`'s ordered
//! `statement_patterns` / `question_patterns` lists.

use crate::errors::{KinshipError, Result};
use crate::facts::Relation;
use crate::normalizer::normalize;
use crate::person::{Gender, PersonId};
use once_cell::sync::Lazy;
use regex::Regex;

/// What a parsed statement means to assert, still in a semantically
/// tagged shape the validator can reason about — not yet ground facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactIntent {
    /// "X is male/female."
    Gender { person: PersonId, gender: Gender },
    /// "X is the mother/father of Y." / reversed "Y is a son/daughter of X."
    Parent {
        parent: PersonId,
        child: PersonId,
        gender: Gender,
    },
    /// "X and Y are siblings." / "X is a brother/sister of Y." `half` is
    /// `None` when the surface form doesn't disambiguate (§9 Open
    /// Question ii); `Some(true)` for an explicit half-sibling form.
    Sibling {
        a: PersonId,
        b: PersonId,
        gender_a: Option<Gender>,
        half: Option<bool>,
    },
    /// "X, Y, … are siblings." (recovered multi-person form)
    MultiSibling { people: Vec<PersonId> },
    /// "X, Y, … are children of Z."
    MultiChildrenOf {
        children: Vec<PersonId>,
        parent: PersonId,
    },
    /// "X and Y are the parents of Z."
    ParentsOf {
        parent_a: PersonId,
        parent_b: PersonId,
        child: PersonId,
    },
    /// "X is the grandmother/grandfather of Y." / reversed grandchild forms.
    Grandparent {
        grandparent: PersonId,
        grandchild: PersonId,
        gender: Gender,
    },
    /// "X is the aunt/uncle of Y." / reversed niece/nephew forms.
    AuntUncle {
        person: PersonId,
        niece_nephew: PersonId,
        gender: Gender,
    },
    /// "X is a cousin of Y." Cousin-hood has no ground predicate of its
    /// own (§4.C: `cousin_of` is purely derived); asserted directly it
    /// can only be checked against what's already entailed, never
    /// committed as new facts.
    CousinAssertion { a: PersonId, b: PersonId },
}

/// What a parsed question asks the rule evaluator to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    /// A boolean relation query, e.g. "Is Alice the mother of Bob?"
    RelationHolds { relation: Relation, a: PersonId, b: PersonId },
    /// "Are X and Y siblings?" / "Is X a sibling of Y?" — needs the
    /// full/half reporting rule (§4.C), not a plain boolean.
    SiblingQuestion { a: PersonId, b: PersonId },
    /// "Who are the siblings/sons/… of X?" (plural listing).
    WhoAreRelationOf { relation: Relation, of: PersonId },
    /// "Who is the mother/father of X?" (singular listing).
    WhoIsRelationOf { relation: Relation, of: PersonId },
    /// "Are X and Y relatives?"
    AreRelatives { a: PersonId, b: PersonId },
}

/// The result of running the template matcher over one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Fact(FactIntent),
    Query(QueryIntent),
    Unrecognized { suggestions: Vec<&'static str> },
}

const USAGE_SUGGESTIONS: &[&str] = &[
    "Alice is the mother of Bob.",
    "Alice and Bob are siblings.",
    "Is Alice the mother of Bob?",
    "Who are the siblings of Alice?",
];

fn name_pat() -> &'static str {
    r"[A-Za-z][A-Za-z'-]*"
}

macro_rules! re {
    ($pat:expr) => {
        Lazy::new(|| Regex::new($pat).expect("static pattern is valid"))
    };
}

static RE_MOTHER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is the mother of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_FATHER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is the father of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_GRANDMOTHER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is the grandmother of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_GRANDFATHER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is the grandfather of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_AUNT_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is the aunt of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_UNCLE_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is the uncle of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_HALF_SISTER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a half-sister of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_HALF_BROTHER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a half-brother of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_SISTER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a sister of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_BROTHER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a brother of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_SON_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a son of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_DAUGHTER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a daughter of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_CHILD_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a child of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_GRANDSON_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a grandson of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_GRANDDAUGHTER_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a granddaughter of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_GRANDCHILD_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a grandchild of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_NIECE_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a niece of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_NEPHEW_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a nephew of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_COUSIN_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is a cousin of (?P<b>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_SIBLINGS: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) and (?P<b>[A-Za-z][A-Za-z'-]*) are siblings\.?\s*$");
static RE_PARENTS_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) and (?P<b>[A-Za-z][A-Za-z'-]*) are the parents of (?P<c>[A-Za-z][A-Za-z'-]*)\.?\s*$");
static RE_MALE: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is male\.?\s*$");
static RE_FEMALE: Lazy<Regex> = re!(r"(?i)^\s*(?P<a>[A-Za-z][A-Za-z'-]*) is female\.?\s*$");
static RE_MULTI_SIBLINGS: Lazy<Regex> = re!(r"(?i)^\s*(?P<list>[A-Za-z][A-Za-z'-]*(?:,\s*[A-Za-z][A-Za-z'-]*)*,?\s*and\s*[A-Za-z][A-Za-z'-]*) are siblings\.?\s*$");
static RE_MULTI_CHILDREN_OF: Lazy<Regex> = re!(r"(?i)^\s*(?P<list>[A-Za-z][A-Za-z'-]*(?:,\s*[A-Za-z][A-Za-z'-]*)*,?\s*and\s*[A-Za-z][A-Za-z'-]*) are children of (?P<parent>[A-Za-z][A-Za-z'-]*)\.?\s*$");

static RE_Q_RELATION: Lazy<Regex> = re!(
    r"(?i)^\s*is (?P<a>[A-Za-z][A-Za-z'-]*) the (?P<rel>mother|father) of (?P<b>[A-Za-z][A-Za-z'-]*)\?\s*$"
);
static RE_Q_GRANDRELATION: Lazy<Regex> = re!(
    r"(?i)^\s*is (?P<a>[A-Za-z][A-Za-z'-]*) the (?P<rel>grandmother|grandfather) of (?P<b>[A-Za-z][A-Za-z'-]*)\?\s*$"
);
static RE_Q_AUNT_UNCLE: Lazy<Regex> = re!(
    r"(?i)^\s*is (?P<a>[A-Za-z][A-Za-z'-]*) the (?P<rel>aunt|uncle) of (?P<b>[A-Za-z][A-Za-z'-]*)\?\s*$"
);
static RE_Q_PREDICATE: Lazy<Regex> = re!(
    r"(?i)^\s*is (?P<a>[A-Za-z][A-Za-z'-]*) an? (?P<rel>sister|brother|son|daughter|child|niece|nephew|cousin|grandchild|granddaughter|grandson|half-sister|half-brother) of (?P<b>[A-Za-z][A-Za-z'-]*)\?\s*$"
);
static RE_Q_SIBLING: Lazy<Regex> = re!(
    r"(?i)^\s*are (?P<a>[A-Za-z][A-Za-z'-]*) and (?P<b>[A-Za-z][A-Za-z'-]*) siblings\?\s*$"
);
static RE_Q_RELATIVES: Lazy<Regex> = re!(
    r"(?i)^\s*are (?P<a>[A-Za-z][A-Za-z'-]*) and (?P<b>[A-Za-z][A-Za-z'-]*) relatives\?\s*$"
);
static RE_Q_WHO_PLURAL: Lazy<Regex> = re!(
    r"(?i)^\s*who are the (?P<rel>siblings|sisters|brothers|parents|children|sons|daughters|nieces|nephews|cousins|grandchildren|half-siblings) of (?P<a>[A-Za-z][A-Za-z'-]*)\?\s*$"
);
static RE_Q_WHO_SINGULAR: Lazy<Regex> = re!(
    r"(?i)^\s*who is the (?P<rel>mother|father) of (?P<a>[A-Za-z][A-Za-z'-]*)\?\s*$"
);

fn gender_word(rel: &str) -> Gender {
    match rel.to_ascii_lowercase().as_str() {
        "mother" | "sister" | "daughter" | "grandmother" | "aunt" | "niece" | "granddaughter"
        | "half-sister" => Gender::Female,
        "father" | "brother" | "son" | "grandfather" | "uncle" | "nephew" | "grandson"
        | "half-brother" => Gender::Male,
        _ => Gender::Unknown,
    }
}

fn relation_for_word(rel: &str) -> Option<Relation> {
    Some(match rel.to_ascii_lowercase().as_str() {
        "mother" => Relation::MotherOf,
        "father" => Relation::FatherOf,
        "sister" | "sisters" => Relation::SisterOf,
        "brother" | "brothers" => Relation::BrotherOf,
        "son" | "sons" => Relation::SonOf,
        "daughter" | "daughters" => Relation::DaughterOf,
        "child" | "children" => Relation::ChildOf,
        "niece" | "nieces" => Relation::NieceOf,
        "nephew" | "nephews" => Relation::NephewOf,
        "cousin" | "cousins" => Relation::CousinOf,
        "grandchild" | "grandchildren" => Relation::GrandchildOf,
        "granddaughter" => Relation::GranddaughterOf,
        "grandson" => Relation::GrandsonOf,
        "grandmother" => Relation::GrandmotherOf,
        "grandfather" => Relation::GrandfatherOf,
        "aunt" => Relation::AuntOf,
        "uncle" => Relation::UncleOf,
        "half-sister" | "half-brother" | "half-siblings" => Relation::HalfSiblingOf,
        "siblings" => Relation::SiblingOf,
        "parents" => Relation::ChildOf, // reversed listing handled by caller
        _ => return None,
    })
}

fn names_from_list(list: &str) -> Result<Vec<PersonId>> {
    let cleaned = list.replace(", and ", ", ").replace(" and ", ", ");
    cleaned
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(normalize)
        .collect()
}

/// Parse one line of input into an [`Intent`].
pub fn parse(input: &str) -> Intent {
    match try_parse(input) {
        Ok(intent) => intent,
        Err(_) => Intent::Unrecognized {
            suggestions: USAGE_SUGGESTIONS.to_vec(),
        },
    }
}

fn try_parse(input: &str) -> Result<Intent> {
    let input = input.trim();

    if let Some(c) = RE_GRANDMOTHER_OF.captures(input) {
        return Ok(fact_grandparent(&c, Gender::Female)?);
    }
    if let Some(c) = RE_GRANDFATHER_OF.captures(input) {
        return Ok(fact_grandparent(&c, Gender::Male)?);
    }
    if let Some(c) = RE_AUNT_OF.captures(input) {
        return Ok(fact_aunt_uncle(&c, Gender::Female)?);
    }
    if let Some(c) = RE_UNCLE_OF.captures(input) {
        return Ok(fact_aunt_uncle(&c, Gender::Male)?);
    }
    if let Some(c) = RE_MOTHER_OF.captures(input) {
        return Ok(fact_parent(&c, Gender::Female)?);
    }
    if let Some(c) = RE_FATHER_OF.captures(input) {
        return Ok(fact_parent(&c, Gender::Male)?);
    }
    if let Some(c) = RE_HALF_SISTER_OF.captures(input) {
        return Ok(fact_sibling(&c, Some(Gender::Female), Some(true))?);
    }
    if let Some(c) = RE_HALF_BROTHER_OF.captures(input) {
        return Ok(fact_sibling(&c, Some(Gender::Male), Some(true))?);
    }
    if let Some(c) = RE_SISTER_OF.captures(input) {
        return Ok(fact_sibling(&c, Some(Gender::Female), None)?);
    }
    if let Some(c) = RE_BROTHER_OF.captures(input) {
        return Ok(fact_sibling(&c, Some(Gender::Male), None)?);
    }
    if let Some(c) = RE_SON_OF.captures(input) {
        return Ok(fact_reversed_parent(&c, Gender::Male)?);
    }
    if let Some(c) = RE_DAUGHTER_OF.captures(input) {
        return Ok(fact_reversed_parent(&c, Gender::Female)?);
    }
    if let Some(c) = RE_CHILD_OF.captures(input) {
        return Ok(fact_reversed_parent(&c, Gender::Unknown)?);
    }
    if let Some(c) = RE_GRANDSON_OF.captures(input) {
        return Ok(fact_reversed_grandparent(&c, Gender::Male)?);
    }
    if let Some(c) = RE_GRANDDAUGHTER_OF.captures(input) {
        return Ok(fact_reversed_grandparent(&c, Gender::Female)?);
    }
    if let Some(c) = RE_GRANDCHILD_OF.captures(input) {
        return Ok(fact_reversed_grandparent(&c, Gender::Unknown)?);
    }
    if let Some(c) = RE_NIECE_OF.captures(input) {
        return Ok(fact_reversed_aunt_uncle(&c, Gender::Female)?);
    }
    if let Some(c) = RE_NEPHEW_OF.captures(input) {
        return Ok(fact_reversed_aunt_uncle(&c, Gender::Male)?);
    }
    if let Some(c) = RE_COUSIN_OF.captures(input) {
        let a = normalize(&c["a"])?;
        let b = normalize(&c["b"])?;
        return Ok(Intent::Fact(FactIntent::CousinAssertion { a, b }));
    }
    if let Some(c) = RE_PARENTS_OF.captures(input) {
        let parent_a = normalize(&c["a"])?;
        let parent_b = normalize(&c["b"])?;
        let child = normalize(&c["c"])?;
        return Ok(Intent::Fact(FactIntent::ParentsOf {
            parent_a,
            parent_b,
            child,
        }));
    }
    if let Some(c) = RE_MULTI_CHILDREN_OF.captures(input) {
        let children = names_from_list(&c["list"])?;
        let parent = normalize(&c["parent"])?;
        return Ok(Intent::Fact(FactIntent::MultiChildrenOf { children, parent }));
    }
    if let Some(c) = RE_MULTI_SIBLINGS.captures(input) {
        let people = names_from_list(&c["list"])?;
        if people.len() > 2 {
            return Ok(Intent::Fact(FactIntent::MultiSibling { people }));
        }
    }
    if let Some(c) = RE_SIBLINGS.captures(input) {
        return Ok(fact_sibling(&c, None, None)?);
    }
    if let Some(c) = RE_MALE.captures(input) {
        let person = normalize(&c["a"])?;
        return Ok(Intent::Fact(FactIntent::Gender { person, gender: Gender::Male }));
    }
    if let Some(c) = RE_FEMALE.captures(input) {
        let person = normalize(&c["a"])?;
        return Ok(Intent::Fact(FactIntent::Gender { person, gender: Gender::Female }));
    }

    if let Some(c) = RE_Q_SIBLING.captures(input) {
        let a = normalize(&c["a"])?;
        let b = normalize(&c["b"])?;
        return Ok(Intent::Query(QueryIntent::SiblingQuestion { a, b }));
    }
    if let Some(c) = RE_Q_RELATIVES.captures(input) {
        let a = normalize(&c["a"])?;
        let b = normalize(&c["b"])?;
        return Ok(Intent::Query(QueryIntent::AreRelatives { a, b }));
    }
    if let Some(c) = RE_Q_GRANDRELATION.captures(input) {
        let a = normalize(&c["a"])?;
        let b = normalize(&c["b"])?;
        let relation = relation_for_word(&c["rel"]).expect("matched word is known");
        return Ok(Intent::Query(QueryIntent::RelationHolds { relation, a, b }));
    }
    if let Some(c) = RE_Q_AUNT_UNCLE.captures(input) {
        let a = normalize(&c["a"])?;
        let b = normalize(&c["b"])?;
        let relation = relation_for_word(&c["rel"]).expect("matched word is known");
        return Ok(Intent::Query(QueryIntent::RelationHolds { relation, a, b }));
    }
    if let Some(c) = RE_Q_RELATION.captures(input) {
        let a = normalize(&c["a"])?;
        let b = normalize(&c["b"])?;
        let relation = relation_for_word(&c["rel"]).expect("matched word is known");
        return Ok(Intent::Query(QueryIntent::RelationHolds { relation, a, b }));
    }
    if let Some(c) = RE_Q_PREDICATE.captures(input) {
        let a = normalize(&c["a"])?;
        let b = normalize(&c["b"])?;
        let word = &c["rel"];
        if matches!(word.to_ascii_lowercase().as_str(), "half-sister" | "half-brother") {
            return Ok(Intent::Query(QueryIntent::RelationHolds {
                relation: Relation::HalfSiblingOf,
                a,
                b,
            }));
        }
        let relation = relation_for_word(word).expect("matched word is known");
        return Ok(Intent::Query(QueryIntent::RelationHolds { relation, a, b }));
    }
    if let Some(c) = RE_Q_WHO_SINGULAR.captures(input) {
        let of = normalize(&c["a"])?;
        let relation = relation_for_word(&c["rel"]).expect("matched word is known");
        return Ok(Intent::Query(QueryIntent::WhoIsRelationOf { relation, of }));
    }
    if let Some(c) = RE_Q_WHO_PLURAL.captures(input) {
        let of = normalize(&c["a"])?;
        let word = &c["rel"];
        let relation = if word.eq_ignore_ascii_case("parents") {
            Relation::ChildOf
        } else {
            relation_for_word(word).expect("matched word is known")
        };
        return Ok(Intent::Query(QueryIntent::WhoAreRelationOf { relation, of }));
    }

    Err(KinshipError::UnrecognizedInput {
        suggestion: USAGE_SUGGESTIONS.join(" "),
    })
}

fn fact_parent(c: &regex::Captures, gender: Gender) -> Result<Intent> {
    let parent = normalize(&c["a"])?;
    let child = normalize(&c["b"])?;
    Ok(Intent::Fact(FactIntent::Parent { parent, child, gender }))
}

fn fact_reversed_parent(c: &regex::Captures, gender: Gender) -> Result<Intent> {
    let child = normalize(&c["a"])?;
    let parent = normalize(&c["b"])?;
    Ok(Intent::Fact(FactIntent::Parent { parent, child, gender }))
}

fn fact_grandparent(c: &regex::Captures, gender: Gender) -> Result<Intent> {
    let grandparent = normalize(&c["a"])?;
    let grandchild = normalize(&c["b"])?;
    Ok(Intent::Fact(FactIntent::Grandparent { grandparent, grandchild, gender }))
}

fn fact_reversed_grandparent(c: &regex::Captures, gender: Gender) -> Result<Intent> {
    let grandchild = normalize(&c["a"])?;
    let grandparent = normalize(&c["b"])?;
    Ok(Intent::Fact(FactIntent::Grandparent { grandparent, grandchild, gender }))
}

fn fact_aunt_uncle(c: &regex::Captures, gender: Gender) -> Result<Intent> {
    let person = normalize(&c["a"])?;
    let niece_nephew = normalize(&c["b"])?;
    Ok(Intent::Fact(FactIntent::AuntUncle { person, niece_nephew, gender }))
}

fn fact_reversed_aunt_uncle(c: &regex::Captures, gender: Gender) -> Result<Intent> {
    let niece_nephew = normalize(&c["a"])?;
    let person = normalize(&c["b"])?;
    Ok(Intent::Fact(FactIntent::AuntUncle { person, niece_nephew, gender }))
}

fn fact_sibling(c: &regex::Captures, gender_a: Option<Gender>, half: Option<bool>) -> Result<Intent> {
    let a = normalize(&c["a"])?;
    let b = normalize(&c["b"])?;
    Ok(Intent::Fact(FactIntent::Sibling { a, b, gender_a, half }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mother_statement() {
        let intent = parse("Alice is the mother of Bob.");
        assert_eq!(
            intent,
            Intent::Fact(FactIntent::Parent {
                parent: normalize("Alice").unwrap(),
                child: normalize("Bob").unwrap(),
                gender: Gender::Female,
            })
        );
    }

    #[test]
    fn grandmother_takes_priority_over_mother() {
        let intent = parse("Alice is the grandmother of Bob.");
        assert_eq!(
            intent,
            Intent::Fact(FactIntent::Grandparent {
                grandparent: normalize("Alice").unwrap(),
                grandchild: normalize("Bob").unwrap(),
                gender: Gender::Female,
            })
        );
    }

    #[test]
    fn parses_sibling_question() {
        let intent = parse("Are Alice and Bob siblings?");
        assert_eq!(
            intent,
            Intent::Query(QueryIntent::SiblingQuestion {
                a: normalize("Alice").unwrap(),
                b: normalize("Bob").unwrap(),
            })
        );
    }

    #[test]
    fn parses_who_are_siblings() {
        let intent = parse("Who are the siblings of Alice?");
        assert_eq!(
            intent,
            Intent::Query(QueryIntent::WhoAreRelationOf {
                relation: Relation::SiblingOf,
                of: normalize("Alice").unwrap(),
            })
        );
    }

    #[test]
    fn parses_multi_sibling_statement() {
        let intent = parse("Alice, Bob, and Carol are siblings.");
        assert_eq!(
            intent,
            Intent::Fact(FactIntent::MultiSibling {
                people: vec![
                    normalize("Alice").unwrap(),
                    normalize("Bob").unwrap(),
                    normalize("Carol").unwrap(),
                ]
            })
        );
    }

    #[test]
    fn unrecognized_returns_suggestions() {
        let intent = parse("blah blah blah");
        assert!(matches!(intent, Intent::Unrecognized { .. }));
    }

    #[test]
    fn ambiguous_sister_statement_has_no_half_flag() {
        let intent = parse("Alice is a sister of Bob.");
        match intent {
            Intent::Fact(FactIntent::Sibling { half, gender_a, .. }) => {
                assert_eq!(half, None);
                assert_eq!(gender_a, Some(Gender::Female));
            }
            other => panic!("unexpected intent: {other:?}"),
        }
    }
}
