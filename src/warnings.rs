//! Deck construction warnings for commander decks.

use crate::catalogue::Catalogue;
use crate::decklist::{allowed_copies, CopyLimit};
use crate::models::Deck;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    TooManyCopies { copies: u32, allowed: u32 },
    OutsideColorIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckWarning {
    pub card_id: String,
    pub kind: WarningKind,
    pub message: String,
}

/// Warnings for a deck with a commander; other decks produce none.
///
/// Only main-board normal cards are checked. Phantom placements count as
/// copies here, since each one stands for a physical card on the board.
pub fn commander_warnings(deck: &Deck, catalogue: &Catalogue) -> Vec<DeckWarning> {
    let Some(commander) = deck.commander().and_then(|c| catalogue.get(&c.card_id)) else {
        return Vec::new();
    };

    let mut warnings = Vec::new();
    for deck_card in &deck.cards {
        if !deck_card.is_main_normal() {
            continue;
        }
        let Some(card) = catalogue.get(&deck_card.card_id) else {
            continue;
        };

        let copies = deck_card
            .count
            .saturating_add(deck_card.phantoms.len() as u32);
        if let CopyLimit::Limited(allowed) = allowed_copies(card) {
            if copies > allowed {
                warnings.push(DeckWarning {
                    card_id: card.id.clone(),
                    kind: WarningKind::TooManyCopies { copies, allowed },
                    message: format!(
                        "{}: {copies} copies found, commander formats allow {allowed}",
                        card.name
                    ),
                });
            }
        }

        if !card.fits_identity_of(commander) {
            warnings.push(DeckWarning {
                card_id: card.id.clone(),
                kind: WarningKind::OutsideColorIdentity,
                message: format!(
                    "{} is outside {}'s color identity",
                    card.name, commander.name
                ),
            });
        }
    }
    warnings
}
