//! Card filter pipeline.
//!
//! [`filter_cards`] compiles a [`FilterSpec`] once and runs each card
//! through a fixed sequence of stages. The commander pre-filter runs first;
//! the remaining stages are independent narrowing predicates.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use crate::filter::spec::{FilterSpec, ManaBucket};
use crate::models::{Card, Color, Game, Layout, Rarity};
use crate::query::{parse_search, Query};
use crate::ternary::TernaryBoolean;

// ---------------------------------------------------------------------------
// FilterContext
// ---------------------------------------------------------------------------

/// Deck-level state that shapes filtering but is not stored in a `FilterSpec`.
#[derive(Debug, Clone)]
pub struct FilterContext<'a> {
    pub selecting_commander: bool,
    pub commander: Option<&'a Card>,
    pub ignored_card_ids: &'a [String],
    pub today: NaiveDate,
}

impl Default for FilterContext<'_> {
    fn default() -> Self {
        Self {
            selecting_commander: false,
            commander: None,
            ignored_card_ids: &[],
            today: Utc::now().date_naive(),
        }
    }
}

impl<'a> FilterContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selecting_commander(mut self, selecting: bool) -> Self {
        self.selecting_commander = selecting;
        self
    }

    pub fn commander(mut self, commander: Option<&'a Card>) -> Self {
        self.commander = commander;
        self
    }

    pub fn ignored(mut self, ignored_card_ids: &'a [String]) -> Self {
        self.ignored_card_ids = ignored_card_ids;
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

// ---------------------------------------------------------------------------
// Partitioned toggles
// ---------------------------------------------------------------------------

/// The active keys of one dimension, split by polarity.
#[derive(Debug, Clone)]
pub(crate) struct Partition<K> {
    pub positive: Vec<K>,
    pub negative: Vec<K>,
}

impl<K: Clone> Partition<K> {
    pub fn from_map(map: &BTreeMap<K, TernaryBoolean>) -> Self {
        Self::from_entries(map.iter().map(|(k, v)| (k.clone(), *v)))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (K, TernaryBoolean)>) -> Self {
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        for (key, value) in entries {
            match value {
                TernaryBoolean::True => positive.push(key),
                TernaryBoolean::False => negative.push(key),
                TernaryBoolean::Unset => {}
            }
        }
        Self { positive, negative }
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Union over positives, none of the negatives.
    pub fn passes(&self, has: impl Fn(&K) -> bool) -> bool {
        if !self.positive.is_empty() && !self.positive.iter().any(&has) {
            return false;
        }
        !self.negative.iter().any(has)
    }

    /// Every positive, none of the negatives.
    pub fn passes_all(&self, has: impl Fn(&K) -> bool) -> bool {
        self.positive.iter().all(&has) && !self.negative.iter().any(has)
    }
}

// ---------------------------------------------------------------------------
// CompiledFilter
// ---------------------------------------------------------------------------

/// A [`FilterSpec`] with its search string parsed and toggles partitioned.
pub struct CompiledFilter<'a> {
    context: &'a FilterContext<'a>,
    hide_ignored: bool,
    hide_unreleased: bool,
    queries: Vec<Query>,
    color: Partition<Color>,
    multi_color: TernaryBoolean,
    rarity: Partition<Rarity>,
    mana: Partition<ManaBucket>,
    sets: Partition<String>,
    card_types: Partition<String>,
    subtypes: Vec<(String, Partition<String>)>,
    legalities: Vec<(String, Partition<String>)>,
    layouts: Partition<Layout>,
    games: Partition<Game>,
    tags: Partition<String>,
}

impl<'a> CompiledFilter<'a> {
    pub fn new(spec: &FilterSpec, context: &'a FilterContext<'a>) -> Self {
        let lower = |map: &BTreeMap<String, TernaryBoolean>| {
            Partition::from_entries(map.iter().map(|(k, v)| (k.to_lowercase(), *v)))
        };
        Self {
            context,
            hide_ignored: spec.hide_ignored,
            hide_unreleased: spec.hide_unreleased,
            queries: parse_search(&spec.search_string),
            color: Partition::from_map(&spec.color),
            multi_color: spec.multi_color,
            rarity: Partition::from_map(&spec.rarity),
            mana: Partition::from_map(&spec.mana_costs),
            sets: Partition::from_entries(spec.sets.iter().map(|(k, s)| (k.clone(), s.value))),
            card_types: lower(&spec.card_types),
            subtypes: spec
                .subtypes
                .iter()
                .map(|(card_type, group)| (card_type.to_lowercase(), lower(group)))
                .filter(|(_, p)| !p.is_empty())
                .collect(),
            legalities: spec
                .legalities
                .iter()
                .map(|(format, values)| (format.clone(), lower(values)))
                .filter(|(_, p)| !p.is_empty())
                .collect(),
            layouts: Partition::from_map(&spec.layouts),
            games: Partition::from_map(&spec.games),
            tags: Partition::from_map(&spec.tags),
        }
    }

    /// Run every stage against a single card.
    pub fn matches(&self, card: &Card) -> bool {
        let ctx = self.context;
        if ctx.selecting_commander && !card.is_commander_candidate() {
            return false;
        }
        if self.hide_ignored && ctx.ignored_card_ids.iter().any(|id| *id == card.id) {
            return false;
        }
        if !self.queries.iter().all(|q| q.matches(card)) {
            return false;
        }
        if !passes_color(card, &self.color, self.multi_color) {
            return false;
        }
        if let Some(commander) = ctx.commander {
            if !ctx.selecting_commander && !card.fits_identity_of(commander) {
                return false;
            }
        }
        if !self
            .rarity
            .passes(|r| card.versions.iter().any(|v| v.rarity == *r))
        {
            return false;
        }
        if !self.mana.passes(|bucket| bucket.contains(card.cmc)) {
            return false;
        }
        if !self.sets.passes(|code| {
            card.versions
                .iter()
                .any(|v| v.set.eq_ignore_ascii_case(code))
        }) {
            return false;
        }
        let type_line = card.type_line.to_lowercase();
        if !self.card_types.passes(|t| type_line.contains(t.as_str())) {
            return false;
        }
        if !self.subtypes.iter().all(|(card_type, group)| {
            group.passes_all(|s| type_line.contains(card_type.as_str()) && type_line.contains(s.as_str()))
        }) {
            return false;
        }
        if !self
            .legalities
            .iter()
            .all(|(format, statuses)| passes_legality(card, format, statuses))
        {
            return false;
        }
        if !self.layouts.passes(|l| has_layout(card, *l)) {
            return false;
        }
        if !self
            .games
            .passes(|g| card.versions.iter().any(|v| v.games.contains(g)))
        {
            return false;
        }
        if !self.tags.passes_all(|t| card.tags.contains(t)) {
            return false;
        }
        if self.hide_unreleased
            && !card
                .versions
                .iter()
                .any(|v| v.released_at.is_some_and(|d| d <= ctx.today))
        {
            return false;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Stage helpers
// ---------------------------------------------------------------------------

fn passes_color(card: &Card, colors: &Partition<Color>, multi: TernaryBoolean) -> bool {
    let identity = &card.color_identity;
    let cardinality_ok = match multi {
        TernaryBoolean::True => identity.len() > 1,
        TernaryBoolean::False => identity.len() == 1,
        TernaryBoolean::Unset => true,
    };
    if !cardinality_ok {
        return false;
    }
    let (positive, negative) = (&colors.positive, &colors.negative);
    match (positive.is_empty(), negative.is_empty()) {
        (true, true) => true,
        // Only positives: any of them, or all of them when multicolor is required.
        (false, true) => {
            if multi.is_positive() && positive.len() > 1 {
                positive.iter().all(|c| identity.contains(c))
            } else {
                positive.iter().any(|c| identity.contains(c))
            }
        }
        (true, false) => !identity.iter().any(|c| negative.contains(c)),
        (false, false) => {
            identity.iter().any(|c| positive.contains(c))
                && !identity.iter().any(|c| negative.contains(c))
        }
    }
}

fn passes_legality(card: &Card, format: &str, statuses: &Partition<String>) -> bool {
    let found: Vec<String> = card
        .versions
        .iter()
        .flat_map(|v| v.legalities.iter())
        .filter(|(f, _)| f.eq_ignore_ascii_case(format))
        .map(|(_, status)| status.to_lowercase())
        .collect();
    statuses.passes(|s| found.contains(s))
}

fn has_layout(card: &Card, layout: Layout) -> bool {
    card.layout == layout || card.faces().any(|f| f.layout == Some(layout))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Filter `cards` by `spec`, keeping input order.
///
/// Accepts any iterator of card references so a filtered result can be fed
/// back in unchanged.
pub fn filter_cards<'c, I>(cards: I, spec: &FilterSpec, context: &FilterContext<'_>) -> Vec<&'c Card>
where
    I: IntoIterator<Item = &'c Card>,
{
    let compiled = CompiledFilter::new(spec, context);
    let mut total = 0usize;
    let kept: Vec<&Card> = cards
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|card| compiled.matches(card))
        .collect();
    tracing::debug!(total, kept = kept.len(), "filtered cards");
    kept
}
