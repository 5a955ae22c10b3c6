use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// A color identity symbol. `C` stands for colorless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
    C,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::W,
        Color::U,
        Color::B,
        Color::R,
        Color::G,
        Color::C,
    ];

    /// Parse a single color symbol, ignoring case.
    pub fn from_symbol(symbol: char) -> Option<Color> {
        match symbol.to_ascii_uppercase() {
            'W' => Some(Color::W),
            'U' => Some(Color::U),
            'B' => Some(Color::B),
            'R' => Some(Color::R),
            'G' => Some(Color::G),
            'C' => Some(Color::C),
            _ => None,
        }
    }

    /// Parse a color letter from a search clause; unknown letters mean colorless.
    pub fn from_query_char(symbol: char) -> Color {
        Color::from_symbol(symbol).unwrap_or(Color::C)
    }

    /// Canonical letter used to order identities in the usual WUBRG wheel order,
    /// with colorless first.
    pub fn sort_ordinal(self) -> char {
        match self {
            Color::C => 'A',
            Color::W => 'B',
            Color::U => 'C',
            Color::R => 'D',
            Color::B => 'E',
            Color::G => 'F',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::W => "W",
            Color::U => "U",
            Color::B => "B",
            Color::R => "R",
            Color::G => "G",
            Color::C => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    #[serde(other)]
    Special,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Mythic,
    ];

    /// Rarity named in a search clause. Accepts the full name or its first
    /// letter; anything else falls back to common.
    pub fn from_query(value: &str) -> Rarity {
        match value.trim().to_lowercase().as_str() {
            "c" | "common" => Rarity::Common,
            "u" | "uncommon" => Rarity::Uncommon,
            "r" | "rare" => Rarity::Rare,
            "m" | "mythic" => Rarity::Mythic,
            _ => Rarity::Common,
        }
    }

    /// Sort rank, lowest first.
    pub fn rank(self) -> u8 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Mythic => 3,
            Rarity::Special => 4,
        }
    }
}

/// Platform on which a printing is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Paper,
    Arena,
    Mtgo,
    #[serde(other)]
    Other,
}

impl Game {
    pub const ALL: [Game; 3] = [Game::Paper, Game::Arena, Game::Mtgo];
}

/// Card layout tag. Unrecognised values deserialize to [`Layout::Unknown`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    Normal,
    Split,
    Flip,
    Transform,
    ModalDfc,
    Meld,
    Leveler,
    Class,
    Case,
    Saga,
    Adventure,
    Mutate,
    Prototype,
    Battle,
    Planar,
    Scheme,
    Vanguard,
    Token,
    DoubleFacedToken,
    Emblem,
    Augment,
    Host,
    ArtSeries,
    ReversibleCard,
    #[serde(other)]
    Unknown,
}

/// How many distinct face images a layout carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceImages {
    Single,
    Double,
}

impl Layout {
    /// `None` for layouts this crate does not recognise.
    pub fn face_images(self) -> Option<FaceImages> {
        match self {
            Layout::Transform
            | Layout::ModalDfc
            | Layout::DoubleFacedToken
            | Layout::ArtSeries
            | Layout::ReversibleCard => Some(FaceImages::Double),
            Layout::Unknown => None,
            _ => Some(FaceImages::Single),
        }
    }

    pub fn is_double_faced(self) -> bool {
        self.face_images() == Some(FaceImages::Double)
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Image size class requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    Small,
    Normal,
    Large,
    Png,
    ArtCrop,
    BorderCrop,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
    pub png: Option<String>,
    pub art_crop: Option<String>,
    pub border_crop: Option<String>,
}

impl ImageUris {
    pub fn get(&self, size: ImageSize) -> Option<&str> {
        let uri = match size {
            ImageSize::Small => &self.small,
            ImageSize::Normal => &self.normal,
            ImageSize::Large => &self.large,
            ImageSize::Png => &self.png,
            ImageSize::ArtCrop => &self.art_crop,
            ImageSize::BorderCrop => &self.border_crop,
        };
        uri.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Card, CardVersion, CardFace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFace {
    pub name: String,
    pub type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub flavor_text: Option<String>,
    pub mana_cost: Option<String>,
    pub layout: Option<Layout>,
    pub image_uris: Option<ImageUris>,
}

/// One printing of a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardVersion {
    #[serde(rename = "ID")]
    pub id: String,
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    pub set_type: Option<String>,
    pub rarity: Rarity,
    pub released_at: Option<NaiveDate>,
    #[serde(default)]
    pub legalities: BTreeMap<String, String>,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
    pub image_uris: Option<ImageUris>,
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// An oracle card together with all of its printings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub oracle_text: Option<String>,
    #[serde(rename = "CMC", default)]
    pub cmc: u32,
    #[serde(default)]
    pub color_identity: Vec<Color>,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub versions: Vec<CardVersion>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Card {
    /// The printing flagged as default, or the first printing.
    pub fn default_version(&self) -> Option<&CardVersion> {
        self.versions
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.versions.first())
    }

    pub fn version(&self, version_id: &str) -> Option<&CardVersion> {
        self.versions.iter().find(|v| v.id == version_id)
    }

    /// Type line of the front face (left of any `//`).
    pub fn front_type_line(&self) -> &str {
        self.type_line
            .split("//")
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// Legendary creatures and planeswalkers can lead a commander deck.
    pub fn is_commander_candidate(&self) -> bool {
        let front = self.front_type_line();
        front.contains("Legendary") && (front.contains("Creature") || front.contains("Planeswalker"))
    }

    pub fn is_land(&self) -> bool {
        self.type_line.contains("Land") && !self.type_line.contains("//")
    }

    pub fn is_basic_land(&self) -> bool {
        self.type_line.contains("Basic Land")
    }

    pub fn has_color(&self, color: Color) -> bool {
        self.color_identity.contains(&color)
    }

    /// Faces across every printing, in printing order.
    pub fn faces(&self) -> impl Iterator<Item = &CardFace> {
        self.versions.iter().flat_map(|v| v.card_faces.iter())
    }

    /// Whether this card's identity fits inside a commander's identity.
    /// Colorless is always allowed.
    pub fn fits_identity_of(&self, commander: &Card) -> bool {
        self.color_identity
            .iter()
            .all(|c| *c == Color::C || commander.has_color(*c))
    }
}
