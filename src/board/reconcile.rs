//! Converting between a deck and its board nodes.
//!
//! Nodes are authoritative for position, phantoms and zone membership.
//! Counts live on the deck: a card with no node keeps its previous record,
//! and phantoms never change a count.

use std::collections::{HashMap, HashSet};

use crate::board::node::{Board, Node, NodeKind};
use crate::models::{Deck, DeckCard, MainOrSide, Position, Zone};

/// Node ID of a deck card. Main-board cards use the bare card ID.
pub fn card_node_id(card_id: &str, main_or_side: MainOrSide) -> String {
    match main_or_side {
        MainOrSide::Main => card_id.to_string(),
        MainOrSide::Sideboard => format!("{card_id}_side"),
    }
}

pub fn phantom_node_id(card_node_id: &str, index: usize) -> String {
    format!("{card_node_id}_phantom_{index}")
}

// ---------------------------------------------------------------------------
// Deck -> nodes
// ---------------------------------------------------------------------------

/// Build board nodes for a deck: one group per zone, one node per deck card
/// and one per phantom placement. Parents come before their children.
pub fn deck_to_nodes(deck: &Deck) -> Vec<Node> {
    let zone_ids: HashSet<&str> = deck.zones.iter().map(|z| z.id.as_str()).collect();

    // First zone listing a child wins; later listings are ignored.
    let mut zone_parent: HashMap<&str, &str> = HashMap::new();
    let mut card_parent: HashMap<&str, &str> = HashMap::new();
    for zone in &deck.zones {
        for child in &zone.zone_children {
            if *child != zone.id && zone_ids.contains(child.as_str()) {
                zone_parent.entry(child.as_str()).or_insert(zone.id.as_str());
            }
        }
        for child in &zone.card_children {
            card_parent.entry(child.as_str()).or_insert(zone.id.as_str());
        }
    }

    let known_zone = |parent: &Option<String>| {
        parent
            .as_deref()
            .filter(|p| zone_ids.contains(p))
            .map(str::to_string)
    };

    let mut nodes: Vec<Node> = deck
        .zones
        .iter()
        .map(|zone| Node {
            id: zone.id.clone(),
            position: zone.position,
            parent_id: zone_parent.get(zone.id.as_str()).map(|p| p.to_string()),
            data: NodeKind::Group {
                label: zone.name.clone(),
                width: zone.width,
                height: zone.height,
            },
        })
        .collect();

    for card in &deck.cards {
        let id = card_node_id(&card.card_id, card.main_or_side);
        let parent_id = card_parent
            .get(id.as_str())
            .map(|p| p.to_string())
            .or_else(|| known_zone(&card.position.parent_id));
        for (index, phantom) in card.phantoms.iter().enumerate() {
            nodes.push(Node {
                id: phantom_node_id(&id, index),
                position: phantom.point(),
                parent_id: known_zone(&phantom.parent_id),
                data: NodeKind::Phantom {
                    phantom_of: id.clone(),
                    index,
                },
            });
        }
        nodes.push(Node {
            id,
            position: card.position.point(),
            parent_id,
            data: NodeKind::Card {
                card_id: card.card_id.clone(),
                main_or_side: card.main_or_side,
                deck_card_type: card.deck_card_type,
                selected_version_id: card.selected_version_id.clone(),
            },
        });
    }

    let mut board = Board::from_nodes(nodes);
    board.sort_by_nesting();
    board.into_nodes()
}

// ---------------------------------------------------------------------------
// Nodes -> deck
// ---------------------------------------------------------------------------

/// Derive deck cards from the board.
///
/// Cards keep the order of `previous`; cards first seen on the board are
/// appended with a count of 1. Previous cards without a node are returned
/// unchanged.
pub fn nodes_to_deck_cards(board: &Board, previous: &[DeckCard]) -> Vec<DeckCard> {
    let previous_by_key: HashMap<(&str, MainOrSide), &DeckCard> = previous
        .iter()
        .map(|c| ((c.card_id.as_str(), c.main_or_side), c))
        .collect();

    let mut phantoms: HashMap<&str, Vec<(usize, Position)>> = HashMap::new();
    for node in board.nodes() {
        if let NodeKind::Phantom { phantom_of, index } = &node.data {
            phantoms.entry(phantom_of.as_str()).or_default().push((
                *index,
                Position {
                    x: node.position.x,
                    y: node.position.y,
                    parent_id: node.parent_id.clone(),
                },
            ));
        }
    }

    let mut from_nodes: Vec<((String, MainOrSide), DeckCard)> = Vec::new();
    for node in board.nodes() {
        let NodeKind::Card {
            card_id,
            main_or_side,
            deck_card_type,
            selected_version_id,
        } = &node.data
        else {
            continue;
        };
        let key = (card_id.clone(), *main_or_side);
        if from_nodes.iter().any(|(k, _)| *k == key) {
            tracing::warn!(node_id = %node.id, card_id = %card_id, "ignoring second node for the same deck card");
            continue;
        }
        let prior = previous_by_key.get(&(card_id.as_str(), *main_or_side));
        let mut placements = phantoms.remove(node.id.as_str()).unwrap_or_default();
        placements.sort_by_key(|(index, _)| *index);
        from_nodes.push((
            key,
            DeckCard {
                card_id: card_id.clone(),
                count: prior.map(|p| p.count).unwrap_or(1),
                main_or_side: *main_or_side,
                deck_card_type: *deck_card_type,
                selected_version_id: selected_version_id
                    .clone()
                    .or_else(|| prior.and_then(|p| p.selected_version_id.clone())),
                position: Position {
                    x: node.position.x,
                    y: node.position.y,
                    parent_id: node.parent_id.clone(),
                },
                phantoms: placements.into_iter().map(|(_, p)| p).collect(),
            },
        ));
    }

    let mut result = Vec::with_capacity(previous.len() + from_nodes.len());
    for card in previous {
        let key = (card.card_id.clone(), card.main_or_side);
        match from_nodes.iter().position(|(k, _)| *k == key) {
            Some(i) => result.push(from_nodes.remove(i).1),
            None => result.push(card.clone()),
        }
    }
    result.extend(from_nodes.into_iter().map(|(_, card)| card));
    result
}

/// Derive zones from group nodes. Child lists are rebuilt from the parent
/// pointers, so each node belongs to at most one zone.
pub fn nodes_to_zones(board: &Board) -> Vec<Zone> {
    board
        .nodes()
        .iter()
        .filter_map(|node| {
            let NodeKind::Group {
                label,
                width,
                height,
            } = &node.data
            else {
                return None;
            };
            let children: Vec<&Node> = board.children(&node.id).collect();
            Some(Zone {
                id: node.id.clone(),
                name: label.clone(),
                position: node.position,
                width: *width,
                height: *height,
                card_children: children
                    .iter()
                    .filter(|c| c.is_card())
                    .map(|c| c.id.clone())
                    .collect(),
                zone_children: children
                    .iter()
                    .filter(|c| c.is_group())
                    .map(|c| c.id.clone())
                    .collect(),
            })
        })
        .collect()
}

/// Rebuild a deck's cards and zones from its board nodes.
pub fn reconcile_deck(deck: &Deck, nodes: Vec<Node>) -> Deck {
    let board = Board::from_nodes(nodes);
    let zones = nodes_to_zones(&board);
    let zone_ids: HashSet<&str> = zones.iter().map(|z| z.id.as_str()).collect();

    let mut cards = nodes_to_deck_cards(&board, &deck.cards);
    // Cards kept from the previous deck may point at zones that no longer exist.
    for card in &mut cards {
        for position in std::iter::once(&mut card.position).chain(card.phantoms.iter_mut()) {
            if position
                .parent_id
                .as_deref()
                .is_some_and(|p| !zone_ids.contains(p))
            {
                position.parent_id = None;
            }
        }
    }
    tracing::debug!(cards = cards.len(), zones = zones.len(), "reconciled deck with board");

    Deck {
        cards,
        zones,
        ..deck.clone()
    }
}
