//! In-memory card catalogue.
//!
//! Cards arrive from an external fetcher as a JSON array, optionally gzip
//! compressed. The catalogue keeps them in input order and indexes them by ID.

use crate::error::{DeckError, Result};
use crate::filter::FilterSpec;
use crate::models::Card;
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    cards: Vec<Card>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    pub fn new(cards: Vec<Card>) -> Self {
        let index = cards
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self { cards, index }
    }

    /// Load a catalogue from a `.json` or `.json.gz` file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DeckError::NotFound(format!(
                "Catalogue file '{}' does not exist",
                path.display()
            )));
        }
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        let catalogue = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            Self::from_reader(BufReader::new(GzDecoder::new(reader)))?
        } else {
            Self::from_reader(reader)?
        };
        tracing::info!(path = %path.display(), cards = catalogue.len(), "loaded card catalogue");
        Ok(catalogue)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let cards: Vec<Card> = serde_json::from_str(&contents)?;
        Ok(Self::new(cards))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.index.get(card_id).map(|&i| &self.cards[i])
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All-unset filter covering every dimension present in the catalogue.
    pub fn filter_schema(&self) -> FilterSpec {
        FilterSpec::from_catalogue(&self.cards)
    }
}
