use serde::{Deserialize, Serialize};

use crate::board::layout::find_next_available_position;
use crate::config::{DEFAULT_ZONE_HEIGHT, DEFAULT_ZONE_WIDTH};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }

    pub fn minus(self, by: Point) -> Point {
        Point::new(self.x - by.x, self.y - by.y)
    }
}

/// Canvas placement of a card. `parent_id` names the zone the coordinates
/// are relative to; free cards use absolute coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "parentID", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            parent_id: None,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn same_spot(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }
}

// ---------------------------------------------------------------------------
// Deck cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainOrSide {
    #[default]
    Main,
    Sideboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeckCardType {
    #[default]
    Normal,
    Commander,
    Companion,
}

/// A card slot in a deck. `phantoms` are extra canvas placements of the same
/// card that do not add to `count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCard {
    #[serde(rename = "cardID")]
    pub card_id: String,
    pub count: u32,
    #[serde(default)]
    pub main_or_side: MainOrSide,
    #[serde(default)]
    pub deck_card_type: DeckCardType,
    #[serde(rename = "selectedVersionID", default)]
    pub selected_version_id: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub phantoms: Vec<Position>,
}

impl DeckCard {
    pub fn new(card_id: impl Into<String>, main_or_side: MainOrSide, position: Position) -> Self {
        Self {
            card_id: card_id.into(),
            count: 1,
            main_or_side,
            deck_card_type: DeckCardType::Normal,
            selected_version_id: None,
            position,
            phantoms: Vec::new(),
        }
    }

    pub fn with_type(mut self, deck_card_type: DeckCardType) -> Self {
        self.deck_card_type = deck_card_type;
        self
    }

    pub fn is_main_normal(&self) -> bool {
        self.main_or_side == MainOrSide::Main && self.deck_card_type == DeckCardType::Normal
    }
}

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

/// A named rectangle on the deck board grouping cards and nested zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub card_children: Vec<String>,
    #[serde(default)]
    pub zone_children: Vec<String>,
}

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<DeckCard>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(rename = "ignoredCards", default)]
    pub ignored_card_ids: Vec<String>,
    #[serde(rename = "cardFrontImage", default)]
    pub cover_version_id: Option<String>,
}

impl Deck {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn commander(&self) -> Option<&DeckCard> {
        self.cards
            .iter()
            .find(|c| c.deck_card_type == DeckCardType::Commander)
    }

    pub fn card(&self, card_id: &str, main_or_side: MainOrSide) -> Option<&DeckCard> {
        self.cards
            .iter()
            .find(|c| c.card_id == card_id && c.main_or_side == main_or_side)
    }

    pub fn contains_card(&self, card_id: &str) -> bool {
        self.cards.iter().any(|c| c.card_id == card_id)
    }

    pub fn zone(&self, zone_id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    /// Add one copy of a card. An existing slot gains a copy; a new slot is
    /// placed on the first free grid spot.
    pub fn add_card(&mut self, card_id: &str, main_or_side: MainOrSide) -> &DeckCard {
        let existing = self
            .cards
            .iter()
            .position(|c| c.card_id == card_id && c.main_or_side == main_or_side);
        let index = match existing {
            Some(index) => {
                self.cards[index].count = self.cards[index].count.saturating_add(1);
                index
            }
            None => {
                let position = find_next_available_position(&self.cards);
                self.cards.push(DeckCard::new(card_id, main_or_side, position));
                self.cards.len() - 1
            }
        };
        &self.cards[index]
    }

    /// Make `card_id` the commander, replacing any previous commander slot.
    /// Main-board copies of the card are dropped; sideboard slots stay.
    pub fn set_commander(&mut self, card_id: &str) {
        self.cards.retain(|c| {
            c.deck_card_type != DeckCardType::Commander
                && (c.card_id != card_id || c.main_or_side != MainOrSide::Main)
        });
        let position = find_next_available_position(&self.cards);
        self.cards.push(
            DeckCard::new(card_id, MainOrSide::Main, position).with_type(DeckCardType::Commander),
        );
    }

    /// Remove a slot entirely, phantoms included.
    pub fn remove_card(&mut self, card_id: &str, main_or_side: MainOrSide) -> Option<DeckCard> {
        let index = self
            .cards
            .iter()
            .position(|c| c.card_id == card_id && c.main_or_side == main_or_side)?;
        Some(self.cards.remove(index))
    }

    /// Add an extra placement for a card already in the deck.
    pub fn add_phantom(
        &mut self,
        card_id: &str,
        main_or_side: MainOrSide,
        position: Position,
    ) -> bool {
        match self
            .cards
            .iter_mut()
            .find(|c| c.card_id == card_id && c.main_or_side == main_or_side)
        {
            Some(card) => {
                card.phantoms.push(position);
                true
            }
            None => false,
        }
    }

    /// Add an empty zone of the default size at the board origin.
    pub fn add_zone(&mut self, zone_id: impl Into<String>, name: impl Into<String>) -> &Zone {
        self.zones.push(Zone {
            id: zone_id.into(),
            name: name.into(),
            position: Point::default(),
            width: DEFAULT_ZONE_WIDTH,
            height: DEFAULT_ZONE_HEIGHT,
            card_children: Vec::new(),
            zone_children: Vec::new(),
        });
        &self.zones[self.zones.len() - 1]
    }

    pub fn ignore_card(&mut self, card_id: &str) {
        if !self.ignored_card_ids.iter().any(|id| id == card_id) {
            self.ignored_card_ids.push(card_id.to_string());
        }
    }

    pub fn unignore_card(&mut self, card_id: &str) {
        self.ignored_card_ids.retain(|id| id != card_id);
    }
}
