//! Deck-building core for Magic: The Gathering.
//!
//! Filters, sorts and pages a card catalogue, keeps the deck board's zones
//! and node positions in step with the deck, and persists filter sessions
//! locally.
//!
//! # Quick start
//!
//! ```no_run
//! use magic_helper::filter::{FilterContext, FilterKey};
//! use magic_helper::sort::SortSpec;
//! use magic_helper::MagicHelper;
//!
//! let helper = MagicHelper::builder()
//!     .catalogue_path("cards.json.gz")
//!     .build()
//!     .unwrap();
//!
//! let mut filter = helper.catalogue().filter_schema();
//! filter.toggle(FilterKey::CardType("Instant".into()));
//! filter.set_search_string("o:damage;cmc<=2");
//!
//! let page = helper
//!     .search()
//!     .page(&filter, &SortSpec::default(), &FilterContext::new(), 0);
//! ```

pub mod board;
pub mod catalogue;
pub mod config;
pub mod decklist;
pub mod error;
pub mod filter;
pub mod image;
pub mod models;
pub mod query;
pub mod search;
pub mod sort;
pub mod store;
pub mod ternary;
pub mod warnings;

pub use catalogue::Catalogue;
pub use error::{DeckError, Result};
pub use filter::{FilterContext, FilterSpec};
pub use search::{CardPage, CardSearch};
pub use sort::SortSpec;
pub use store::{FilterStore, StoredFilter};
pub use ternary::TernaryBoolean;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::models::Card;

// ---------------------------------------------------------------------------
// MagicHelperBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`MagicHelper`].
///
/// Use [`MagicHelper::builder()`] to obtain one, chain configuration methods
/// and call [`build()`](MagicHelperBuilder::build).
pub struct MagicHelperBuilder {
    store_dir: Option<PathBuf>,
    page_size: usize,
    catalogue_path: Option<PathBuf>,
    cards: Vec<Card>,
}

impl Default for MagicHelperBuilder {
    fn default() -> Self {
        Self {
            store_dir: None,
            page_size: config::PAGE_SIZE_DESKTOP,
            catalogue_path: None,
            cards: Vec::new(),
        }
    }
}

impl MagicHelperBuilder {
    /// Directory for stored filters.
    ///
    /// Defaults to the platform data directory (e.g. `~/.local/share/magic-helper`
    /// on Linux).
    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Cards per search page. Defaults to [`config::PAGE_SIZE_DESKTOP`].
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Load the catalogue from a `.json` or `.json.gz` file at build time.
    pub fn catalogue_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.catalogue_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Supply cards directly. Appended after any cards loaded from
    /// [`catalogue_path`](Self::catalogue_path).
    pub fn cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Build the helper, opening the filter store and loading the catalogue.
    pub fn build(self) -> Result<MagicHelper> {
        if self.page_size == 0 {
            return Err(DeckError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        let filters = FilterStore::new(self.store_dir)?;
        let mut cards = match &self.catalogue_path {
            Some(path) => Catalogue::load(path)?.into_cards(),
            None => Vec::new(),
        };
        cards.extend(self.cards);
        Ok(MagicHelper {
            catalogue: Catalogue::new(cards),
            filters,
            page_size: self.page_size,
        })
    }
}

// ---------------------------------------------------------------------------
// MagicHelper
// ---------------------------------------------------------------------------

/// Entry point owning the catalogue and the filter store.
///
/// Created via [`MagicHelper::builder()`].
pub struct MagicHelper {
    catalogue: Catalogue,
    filters: FilterStore,
    page_size: usize,
}

impl MagicHelper {
    pub fn builder() -> MagicHelperBuilder {
        MagicHelperBuilder::default()
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Search interface borrowing the catalogue.
    pub fn search(&self) -> CardSearch<'_> {
        CardSearch::new(&self.catalogue, self.page_size)
    }

    pub fn filters(&self) -> &FilterStore {
        &self.filters
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Restore the catalogue filter session, or start a fresh one from the
    /// catalogue schema when nothing is stored.
    pub fn restore_filter(&self) -> Result<StoredFilter> {
        let schema = self.catalogue.filter_schema();
        match self.filters.load(config::LOCAL_STORE_FILTER_KEY, &schema)? {
            Some(stored) => Ok(stored),
            None => Ok(StoredFilter {
                hash: schema.schema_hash(),
                filter: schema,
                sort: SortSpec::default(),
                page: 0,
            }),
        }
    }

    /// Persist the catalogue filter session.
    pub fn save_filter(&self, filter: &FilterSpec, sort: &SortSpec, page: usize) -> Result<()> {
        self.filters
            .save(config::LOCAL_STORE_FILTER_KEY, filter, sort, page)
    }
}

impl fmt::Display for MagicHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MagicHelper(cards={}, store_dir={})",
            self.catalogue.len(),
            self.filters.store_dir.display()
        )
    }
}
