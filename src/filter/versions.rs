//! Choosing which printing of a card to show under the active filter.

use crate::filter::engine::Partition;
use crate::filter::spec::FilterSpec;
use crate::models::{Card, CardVersion};

/// Code of the only positively selected set, if exactly one is selected.
pub fn single_set_selected(spec: &FilterSpec) -> Option<&str> {
    let mut selected = spec
        .sets
        .iter()
        .filter(|(_, s)| s.value.is_positive())
        .map(|(code, _)| code.as_str());
    let first = selected.next()?;
    match selected.next() {
        Some(_) => None,
        None => Some(first),
    }
}

/// Printings that satisfy the set and game toggles. When none do, every
/// printing is returned so the card still has something to show.
pub fn versions_matching_filter<'c>(card: &'c Card, spec: &FilterSpec) -> Vec<&'c CardVersion> {
    let sets = Partition::from_entries(spec.sets.iter().map(|(k, s)| (k.clone(), s.value)));
    let games = Partition::from_map(&spec.games);
    let matching: Vec<&CardVersion> = card
        .versions
        .iter()
        .filter(|v| sets.passes(|code| v.set.eq_ignore_ascii_case(code)))
        .filter(|v| games.passes(|g| v.games.contains(g)))
        .collect();
    if matching.is_empty() {
        card.versions.iter().collect()
    } else {
        matching
    }
}

/// The printing to display: the explicitly selected one, else the default
/// printing if it matches the filter, else the first matching printing.
pub fn display_version<'c>(
    card: &'c Card,
    spec: &FilterSpec,
    selected_version_id: Option<&str>,
) -> Option<&'c CardVersion> {
    if let Some(selected) = selected_version_id.and_then(|id| card.version(id)) {
        return Some(selected);
    }
    let matching = versions_matching_filter(card, spec);
    matching
        .iter()
        .find(|v| v.is_default)
        .or_else(|| matching.first())
        .copied()
        .or_else(|| card.default_version())
}
