//! Search-string parser.
//!
//! A search string is a `;`-separated list of clauses. Each clause is either
//! a prefixed predicate (`t:land`, `r:m`, `cmc>=3`, ...) or free text. A `!`
//! in front of the prefix or right after it negates the clause.

use crate::models::{Card, Color, Rarity};

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Comparison used by mana value clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparator {
    pub fn compare(self, left: u32, right: u32) -> bool {
        match self {
            Comparator::Eq => left == right,
            Comparator::Gt => left > right,
            Comparator::Gte => left >= right,
            Comparator::Lt => left < right,
            Comparator::Lte => left <= right,
        }
    }
}

/// What a clause tests. Text values are stored lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Set(String),
    CardType(String),
    Oracle(String),
    FlavorText(String),
    Rarity(Rarity),
    Color(Vec<Color>),
    Cmc(Comparator, u32),
    Search(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub predicate: Predicate,
    pub negated: bool,
}

#[derive(Clone, Copy)]
enum Prefix {
    Set,
    CardType,
    Oracle,
    FlavorText,
    Rarity,
    Color,
    Cmc(Comparator),
}

// Longer comparators come first so `cmc>=` is never read as `cmc>`.
const PREFIXES: &[(&str, Prefix)] = &[
    ("set:", Prefix::Set),
    ("s:", Prefix::Set),
    ("t:", Prefix::CardType),
    ("type:", Prefix::CardType),
    ("o:", Prefix::Oracle),
    ("ft:", Prefix::FlavorText),
    ("r:", Prefix::Rarity),
    ("c:", Prefix::Color),
    ("cmc:", Prefix::Cmc(Comparator::Eq)),
    ("cmc=", Prefix::Cmc(Comparator::Eq)),
    ("cmc>=", Prefix::Cmc(Comparator::Gte)),
    ("cmc>", Prefix::Cmc(Comparator::Gt)),
    ("cmc<=", Prefix::Cmc(Comparator::Lte)),
    ("cmc<", Prefix::Cmc(Comparator::Lt)),
];

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn strip_bang(value: &str) -> (bool, &str) {
    match value.strip_prefix('!') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, value),
    }
}

/// Parse one clause. Never fails: anything unrecognised becomes free text.
pub fn parse_clause(clause: &str) -> Query {
    let lowered = clause.trim().to_lowercase();
    let (outer_negated, body) = strip_bang(&lowered);

    for (prefix, kind) in PREFIXES {
        let Some(rest) = body.strip_prefix(prefix) else {
            continue;
        };
        let (inner_negated, value) = strip_bang(rest.trim());
        let value = value.trim();
        let predicate = match kind {
            Prefix::Set => Some(Predicate::Set(value.to_string())),
            Prefix::CardType => Some(Predicate::CardType(value.to_string())),
            Prefix::Oracle => Some(Predicate::Oracle(value.to_string())),
            Prefix::FlavorText => Some(Predicate::FlavorText(value.to_string())),
            Prefix::Rarity => Some(Predicate::Rarity(Rarity::from_query(value))),
            Prefix::Color => Some(Predicate::Color(
                value.chars().map(Color::from_query_char).collect(),
            )),
            Prefix::Cmc(cmp) => value.parse::<u32>().ok().map(|n| Predicate::Cmc(*cmp, n)),
        };
        if let Some(predicate) = predicate {
            return Query {
                predicate,
                negated: outer_negated || inner_negated,
            };
        }
        break;
    }

    Query {
        predicate: Predicate::Search(body.trim().to_string()),
        negated: outer_negated,
    }
}

/// Split a search string on `;` and parse every non-empty clause.
pub fn parse_search(search: &str) -> Vec<Query> {
    search
        .split(';')
        .filter(|clause| !clause.trim().is_empty())
        .map(parse_clause)
        .collect()
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

/// Free-text match over names, type lines, set names and codes, oracle and
/// flavor text of the card, its printings and their faces.
pub fn search_matches(card: &Card, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if contains_ci(Some(&card.name), &needle)
        || contains_ci(Some(&card.type_line), &needle)
        || contains_ci(card.oracle_text.as_deref(), &needle)
    {
        return true;
    }
    let in_versions = card.versions.iter().any(|v| {
        contains_ci(Some(&v.set), &needle)
            || contains_ci(Some(&v.set_name), &needle)
            || contains_ci(v.flavor_text.as_deref(), &needle)
    });
    in_versions
        || card.faces().any(|f| {
            contains_ci(Some(&f.name), &needle)
                || contains_ci(f.type_line.as_deref(), &needle)
                || contains_ci(f.oracle_text.as_deref(), &needle)
                || contains_ci(f.flavor_text.as_deref(), &needle)
        })
}

impl Predicate {
    pub fn test(&self, card: &Card) -> bool {
        match self {
            Predicate::Set(set) => card.versions.iter().any(|v| {
                v.set.eq_ignore_ascii_case(set) || contains_ci(Some(&v.set_name), set)
            }),
            Predicate::CardType(card_type) => contains_ci(Some(&card.type_line), card_type),
            Predicate::Oracle(text) => {
                contains_ci(card.oracle_text.as_deref(), text)
                    || card.faces().any(|f| contains_ci(f.oracle_text.as_deref(), text))
            }
            Predicate::FlavorText(text) => {
                card.versions
                    .iter()
                    .any(|v| contains_ci(v.flavor_text.as_deref(), text))
                    || card.faces().any(|f| contains_ci(f.flavor_text.as_deref(), text))
            }
            Predicate::Rarity(rarity) => card.versions.iter().any(|v| v.rarity == *rarity),
            Predicate::Color(colors) => colors.iter().any(|c| card.has_color(*c)),
            Predicate::Cmc(cmp, value) => cmp.compare(card.cmc, *value),
            Predicate::Search(text) => search_matches(card, text),
        }
    }
}

impl Query {
    pub fn matches(&self, card: &Card) -> bool {
        self.predicate.test(card) != self.negated
    }
}
