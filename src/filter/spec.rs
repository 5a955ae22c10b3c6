//! Declarative filter specification.
//!
//! Every dimension maps its keys to a [`TernaryBoolean`]. Fields are only
//! changed through [`FilterKey`] actions, so a spec restored from storage and
//! a spec driven by UI controls go through the same paths.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::MAX_MANA_BUCKET;
use crate::models::{Card, Color, Game, Layout, Rarity};
use crate::ternary::TernaryBoolean;

// ---------------------------------------------------------------------------
// ManaBucket
// ---------------------------------------------------------------------------

/// Mana value bucket: an exact value from 0 to 9, or everything above 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ManaBucket {
    Exact(u32),
    Infinite,
}

impl ManaBucket {
    pub fn all() -> impl Iterator<Item = ManaBucket> {
        (0..=MAX_MANA_BUCKET)
            .map(ManaBucket::Exact)
            .chain(std::iter::once(ManaBucket::Infinite))
    }

    pub fn contains(self, cmc: u32) -> bool {
        match self {
            ManaBucket::Exact(value) => cmc == value,
            ManaBucket::Infinite => cmc > MAX_MANA_BUCKET,
        }
    }
}

impl fmt::Display for ManaBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManaBucket::Exact(value) => write!(f, "{value}"),
            ManaBucket::Infinite => f.write_str("infinite"),
        }
    }
}

impl From<ManaBucket> for String {
    fn from(bucket: ManaBucket) -> Self {
        bucket.to_string()
    }
}

impl TryFrom<String> for ManaBucket {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "infinite" {
            return Ok(ManaBucket::Infinite);
        }
        match value.parse::<u32>() {
            Ok(n) if n <= MAX_MANA_BUCKET => Ok(ManaBucket::Exact(n)),
            _ => Err(format!("invalid mana bucket '{value}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// SetFilter
// ---------------------------------------------------------------------------

/// Toggle for one set plus what the UI needs to display it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFilter {
    pub set_name: String,
    pub value: TernaryBoolean,
    pub released_at: Option<NaiveDate>,
    pub set_type: Option<String>,
    #[serde(default)]
    pub games: Vec<Game>,
}

// ---------------------------------------------------------------------------
// FilterKey
// ---------------------------------------------------------------------------

/// Addresses a single toggle inside a [`FilterSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Color(Color),
    MultiColor,
    Rarity(Rarity),
    ManaCost(ManaBucket),
    CardType(String),
    Subtype { card_type: String, subtype: String },
    Set(String),
    Legality { format: String, value: String },
    Layout(Layout),
    Game(Game),
    Tag(String),
}

// ---------------------------------------------------------------------------
// FilterSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub(crate) search_string: String,
    pub(crate) color: BTreeMap<Color, TernaryBoolean>,
    pub(crate) multi_color: TernaryBoolean,
    pub(crate) rarity: BTreeMap<Rarity, TernaryBoolean>,
    pub(crate) mana_costs: BTreeMap<ManaBucket, TernaryBoolean>,
    pub(crate) card_types: BTreeMap<String, TernaryBoolean>,
    pub(crate) subtypes: BTreeMap<String, BTreeMap<String, TernaryBoolean>>,
    pub(crate) sets: BTreeMap<String, SetFilter>,
    pub(crate) legalities: BTreeMap<String, BTreeMap<String, TernaryBoolean>>,
    pub(crate) layouts: BTreeMap<Layout, TernaryBoolean>,
    pub(crate) games: BTreeMap<Game, TernaryBoolean>,
    pub(crate) tags: BTreeMap<String, TernaryBoolean>,
    pub(crate) hide_ignored: bool,
    pub(crate) hide_unreleased: bool,
}

impl FilterSpec {
    /// An all-unset spec with the fixed dimensions (colors, rarities, mana
    /// buckets, games) populated.
    pub fn new() -> Self {
        Self {
            color: Color::ALL.iter().map(|c| (*c, TernaryBoolean::Unset)).collect(),
            rarity: Rarity::ALL.iter().map(|r| (*r, TernaryBoolean::Unset)).collect(),
            mana_costs: ManaBucket::all().map(|b| (b, TernaryBoolean::Unset)).collect(),
            games: Game::ALL.iter().map(|g| (*g, TernaryBoolean::Unset)).collect(),
            ..Self::default()
        }
    }

    /// An all-unset spec whose schema covers every type, subtype, set,
    /// format, layout and tag present in `cards`.
    pub fn from_catalogue(cards: &[Card]) -> Self {
        let mut spec = Self::new();
        for card in cards {
            spec.register_type_line(&card.type_line);
            spec.layouts.entry(card.layout).or_default();
            for tag in &card.tags {
                spec.tags.entry(tag.clone()).or_default();
            }
            for version in &card.versions {
                spec.sets.entry(version.set.clone()).or_insert_with(|| SetFilter {
                    set_name: version.set_name.clone(),
                    value: TernaryBoolean::Unset,
                    released_at: version.released_at,
                    set_type: version.set_type.clone(),
                    games: version.games.clone(),
                });
                for (format, status) in &version.legalities {
                    spec.legalities
                        .entry(format.clone())
                        .or_default()
                        .entry(status.to_lowercase())
                        .or_default();
                }
                for face in &version.card_faces {
                    if let Some(layout) = face.layout {
                        spec.layouts.entry(layout).or_default();
                    }
                }
            }
        }
        spec
    }

    // Subtypes are grouped under the last type word before the dash.
    fn register_type_line(&mut self, type_line: &str) {
        for side in type_line.split("//") {
            let (types, subtypes) = match side.split_once('—') {
                Some((left, right)) => (left, right),
                None => (side, ""),
            };
            let mut last_type = None;
            for word in types.split_whitespace() {
                self.card_types.entry(word.to_string()).or_default();
                last_type = Some(word);
            }
            if let Some(card_type) = last_type {
                for subtype in subtypes.split_whitespace() {
                    self.subtypes
                        .entry(card_type.to_string())
                        .or_default()
                        .entry(subtype.to_string())
                        .or_default();
                }
            }
        }
    }

    // -- Actions -----------------------------------------------------------

    pub fn get(&self, key: &FilterKey) -> TernaryBoolean {
        let found = match key {
            FilterKey::Color(c) => self.color.get(c).copied(),
            FilterKey::MultiColor => Some(self.multi_color),
            FilterKey::Rarity(r) => self.rarity.get(r).copied(),
            FilterKey::ManaCost(b) => self.mana_costs.get(b).copied(),
            FilterKey::CardType(t) => self.card_types.get(t).copied(),
            FilterKey::Subtype { card_type, subtype } => self
                .subtypes
                .get(card_type)
                .and_then(|group| group.get(subtype))
                .copied(),
            FilterKey::Set(code) => self.sets.get(code).map(|s| s.value),
            FilterKey::Legality { format, value } => self
                .legalities
                .get(format)
                .and_then(|values| values.get(&value.to_lowercase()))
                .copied(),
            FilterKey::Layout(l) => self.layouts.get(l).copied(),
            FilterKey::Game(g) => self.games.get(g).copied(),
            FilterKey::Tag(t) => self.tags.get(t).copied(),
        };
        found.unwrap_or_default()
    }

    pub fn set(&mut self, key: FilterKey, value: TernaryBoolean) {
        match key {
            FilterKey::Color(c) => {
                self.color.insert(c, value);
            }
            FilterKey::MultiColor => self.multi_color = value,
            FilterKey::Rarity(r) => {
                self.rarity.insert(r, value);
            }
            FilterKey::ManaCost(b) => {
                self.mana_costs.insert(b, value);
            }
            FilterKey::CardType(t) => {
                self.card_types.insert(t, value);
            }
            FilterKey::Subtype { card_type, subtype } => {
                self.subtypes.entry(card_type).or_default().insert(subtype, value);
            }
            FilterKey::Set(code) => {
                self.sets.entry(code).or_default().value = value;
            }
            FilterKey::Legality { format, value: status } => {
                self.legalities
                    .entry(format)
                    .or_default()
                    .insert(status.to_lowercase(), value);
            }
            FilterKey::Layout(l) => {
                self.layouts.insert(l, value);
            }
            FilterKey::Game(g) => {
                self.games.insert(g, value);
            }
            FilterKey::Tag(t) => {
                self.tags.insert(t, value);
            }
        }
    }

    /// Advance a toggle one step forward and return its new value.
    pub fn toggle(&mut self, key: FilterKey) -> TernaryBoolean {
        let value = self.get(&key).next();
        self.set(key, value);
        value
    }

    /// Step a toggle backward and return its new value.
    pub fn toggle_back(&mut self, key: FilterKey) -> TernaryBoolean {
        let value = self.get(&key).prev();
        self.set(key, value);
        value
    }

    pub fn set_search_string(&mut self, search: impl Into<String>) {
        self.search_string = search.into();
    }

    pub fn set_hide_ignored(&mut self, hide: bool) {
        self.hide_ignored = hide;
    }

    pub fn set_hide_unreleased(&mut self, hide: bool) {
        self.hide_unreleased = hide;
    }

    /// Reset every value while keeping the schema.
    pub fn clear(&mut self) {
        fn unset<K>(map: &mut BTreeMap<K, TernaryBoolean>) {
            map.values_mut().for_each(|v| *v = TernaryBoolean::Unset);
        }
        self.search_string.clear();
        self.multi_color = TernaryBoolean::Unset;
        unset(&mut self.color);
        unset(&mut self.rarity);
        unset(&mut self.mana_costs);
        unset(&mut self.card_types);
        self.subtypes.values_mut().for_each(unset);
        self.sets
            .values_mut()
            .for_each(|s| s.value = TernaryBoolean::Unset);
        self.legalities.values_mut().for_each(unset);
        unset(&mut self.layouts);
        unset(&mut self.games);
        unset(&mut self.tags);
        self.hide_ignored = false;
        self.hide_unreleased = false;
    }

    // -- Accessors ---------------------------------------------------------

    pub fn search_string(&self) -> &str {
        &self.search_string
    }

    pub fn multi_color(&self) -> TernaryBoolean {
        self.multi_color
    }

    pub fn hide_ignored(&self) -> bool {
        self.hide_ignored
    }

    pub fn hide_unreleased(&self) -> bool {
        self.hide_unreleased
    }

    pub fn sets(&self) -> &BTreeMap<String, SetFilter> {
        &self.sets
    }

    pub fn card_types(&self) -> &BTreeMap<String, TernaryBoolean> {
        &self.card_types
    }

    pub fn subtypes(&self) -> &BTreeMap<String, BTreeMap<String, TernaryBoolean>> {
        &self.subtypes
    }

    pub fn legalities(&self) -> &BTreeMap<String, BTreeMap<String, TernaryBoolean>> {
        &self.legalities
    }

    pub fn layouts(&self) -> &BTreeMap<Layout, TernaryBoolean> {
        &self.layouts
    }

    pub fn tags(&self) -> &BTreeMap<String, TernaryBoolean> {
        &self.tags
    }

    // -- Schema hash -------------------------------------------------------

    /// Structural hash of the filter's keys, independent of toggle values.
    ///
    /// Two specs hash equal when they expose the same filterable dimensions
    /// and set metadata, whatever their current values.
    pub fn schema_hash(&self) -> i32 {
        let mut blank = self.clone();
        blank.clear();
        let json = serde_json::to_string(&blank).unwrap_or_default();
        rolling_hash(&json)
    }
}

/// 32-bit polynomial rolling hash over UTF-16 code units, matching the
/// browser-side `(h << 5) - h + c` hash so stored filters stay comparable.
pub fn rolling_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}
