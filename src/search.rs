//! Filter, sort and page over a catalogue.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalogue::Catalogue;
use crate::filter::{filter_cards, FilterContext, FilterSpec};
use crate::models::Card;
use crate::sort::{paginate, sort_cards, SortSpec};

/// One page of search results.
#[derive(Debug, Clone)]
pub struct CardPage<'a> {
    pub cards: Vec<&'a Card>,
    /// Number of cards matching the filter across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl CardPage<'_> {
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }
}

/// Search interface over a [`Catalogue`].
pub struct CardSearch<'a> {
    catalogue: &'a Catalogue,
    page_size: usize,
}

impl<'a> CardSearch<'a> {
    pub fn new(catalogue: &'a Catalogue, page_size: usize) -> Self {
        Self {
            catalogue,
            page_size,
        }
    }

    /// Every matching card, ordered.
    pub fn run(
        &self,
        filter: &FilterSpec,
        sort: &SortSpec,
        context: &FilterContext<'_>,
    ) -> Vec<&'a Card> {
        let mut cards = filter_cards(self.catalogue.cards(), filter, context);
        sort_cards(&mut cards, sort);
        cards
    }

    /// A single zero-based page of [`run`](Self::run).
    pub fn page(
        &self,
        filter: &FilterSpec,
        sort: &SortSpec,
        context: &FilterContext<'_>,
        page: usize,
    ) -> CardPage<'a> {
        let all = self.run(filter, sort, context);
        CardPage {
            cards: paginate(&all, page, self.page_size).to_vec(),
            total: all.len(),
            page,
            page_size: self.page_size,
        }
    }

    /// A random commander candidate that also passes `filter`.
    pub fn random_commander<R: Rng + ?Sized>(
        &self,
        filter: &FilterSpec,
        context: &FilterContext<'_>,
        rng: &mut R,
    ) -> Option<&'a Card> {
        let context = context.clone().selecting_commander(true);
        let candidates = filter_cards(self.catalogue.cards(), filter, &context);
        candidates.choose(rng).copied()
    }
}
