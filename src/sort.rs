//! Multi-key card ordering.
//!
//! A [`SortSpec`] is an ordered list of keys. Disabled entries keep their
//! place in the list but do not take part in comparisons. Sorting is stable,
//! so cards that compare equal keep their input order.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Card;

// ---------------------------------------------------------------------------
// SortSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    Name,
    Cmc,
    Color,
    Rarity,
    Type,
    Set,
    ReleasedAt,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Name,
        SortKey::Cmc,
        SortKey::Color,
        SortKey::Rarity,
        SortKey::Type,
        SortKey::Set,
        SortKey::ReleasedAt,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortEntry {
    pub sort_by: SortKey,
    pub sort_direction: SortDirection,
    pub enabled: bool,
}

impl SortEntry {
    pub fn new(sort_by: SortKey, sort_direction: SortDirection) -> Self {
        Self {
            sort_by,
            sort_direction,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
    entries: Vec<SortEntry>,
}

impl Default for SortSpec {
    /// Every key ascending, only mana value enabled.
    fn default() -> Self {
        Self {
            entries: SortKey::ALL
                .iter()
                .map(|key| SortEntry {
                    sort_by: *key,
                    sort_direction: SortDirection::Asc,
                    enabled: *key == SortKey::Cmc,
                })
                .collect(),
        }
    }
}

impl SortSpec {
    pub fn new(entries: Vec<SortEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SortEntry] {
        &self.entries
    }

    pub fn enabled(&self) -> impl Iterator<Item = &SortEntry> {
        self.entries.iter().filter(|e| e.enabled)
    }

    /// Move the entry at `from` to index `to`. Out-of-range indices are ignored.
    pub fn move_entry(&mut self, from: usize, to: usize) {
        if from >= self.entries.len() || to >= self.entries.len() {
            return;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
    }

    pub fn set_enabled(&mut self, key: SortKey, enabled: bool) {
        self.entries
            .iter_mut()
            .filter(|e| e.sort_by == key)
            .for_each(|e| e.enabled = enabled);
    }

    pub fn toggle_direction(&mut self, key: SortKey) {
        self.entries
            .iter_mut()
            .filter(|e| e.sort_by == key)
            .for_each(|e| e.sort_direction = e.sort_direction.reversed());
    }
}

// ---------------------------------------------------------------------------
// Key extractors
// ---------------------------------------------------------------------------

/// Alternate-art names (`A-Name`) sort right after the base printing.
pub fn sort_name(name: &str) -> Cow<'_, str> {
    match name.strip_prefix("A-") {
        Some(base) => Cow::Owned(format!("{base}2")),
        None => Cow::Borrowed(name),
    }
}

fn type_weight(word: &str) -> u32 {
    match word {
        "Artifact" => 1,
        "Basic" => 2,
        "Battle" => 3,
        "Creature" => 4,
        "Enchantment" => 5,
        "Instant" => 6,
        "Kindred" => 7,
        "Land" => 8,
        "Legendary" => 9,
        "Planeswalker" => 10,
        "Snow" => 11,
        "Sorcery" => 12,
        _ => 0,
    }
}

/// Sum of weights of the distinct type words in a type line.
pub fn type_value(type_line: &str) -> u32 {
    let words: HashSet<&str> = type_line.split_whitespace().collect();
    words.into_iter().map(type_weight).sum()
}

fn color_ordinal(card: &Card) -> String {
    let mut letters: Vec<char> = card.color_identity.iter().map(|c| c.sort_ordinal()).collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

/// Non-lands first, then by identity size, then by color wheel, with basic
/// lands ahead of other lands.
pub fn compare_by_color(a: &Card, b: &Card) -> Ordering {
    a.is_land()
        .cmp(&b.is_land())
        .then_with(|| a.color_identity.len().cmp(&b.color_identity.len()))
        .then_with(|| color_ordinal(a).cmp(&color_ordinal(b)))
        .then_with(|| b.is_basic_land().cmp(&a.is_basic_land()))
}

fn default_rarity_rank(card: &Card) -> u8 {
    card.default_version().map(|v| v.rarity.rank()).unwrap_or(0)
}

fn default_set_release(card: &Card) -> Option<NaiveDate> {
    card.default_version().and_then(|v| v.released_at)
}

fn release_for(card: &Card, direction: SortDirection) -> Option<NaiveDate> {
    let dates = card.versions.iter().filter_map(|v| v.released_at);
    match direction {
        SortDirection::Asc => dates.min(),
        SortDirection::Desc => dates.max(),
    }
}

fn compare_entry(a: &Card, b: &Card, entry: &SortEntry) -> Ordering {
    let ordering = match entry.sort_by {
        SortKey::Name => sort_name(&a.name).cmp(&sort_name(&b.name)),
        SortKey::Cmc => a.cmc.cmp(&b.cmc),
        SortKey::Color => compare_by_color(a, b),
        SortKey::Rarity => default_rarity_rank(a).cmp(&default_rarity_rank(b)),
        SortKey::Type => type_value(&a.type_line).cmp(&type_value(&b.type_line)),
        SortKey::Set => default_set_release(a).cmp(&default_set_release(b)),
        SortKey::ReleasedAt => {
            release_for(a, entry.sort_direction).cmp(&release_for(b, entry.sort_direction))
        }
    };
    match entry.sort_direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Compare two cards under every enabled entry, primary key first.
pub fn compare_cards(a: &Card, b: &Card, spec: &SortSpec) -> Ordering {
    spec.enabled()
        .map(|entry| compare_entry(a, b, entry))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Stable in-place sort.
pub fn sort_cards(cards: &mut [&Card], spec: &SortSpec) {
    cards.sort_by(|a, b| compare_cards(a, b, spec));
    tracing::debug!(count = cards.len(), "sorted cards");
}

/// Zero-based page slice. Pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
