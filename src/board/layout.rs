//! Placement on the deck board: the free-spot grid, drag-stop rebinding and
//! the autosort arrangement.

use std::cmp::Reverse;

use crate::board::node::{Board, Node, NodeKind};
use crate::catalogue::Catalogue;
use crate::config::{
    CARD_HEIGHT, CARD_MARGIN, CARD_WIDTH, FREE_CARDS_GAP, GRID_COLUMN_WIDTH, GRID_MAX_X,
    GRID_ROW_HEIGHT, MAX_CARD_COLUMNS, MIN_ZONE_SIZE, UNGROUPED_COLUMNS, ZONE_COLUMNS, ZONE_GAP_X,
    ZONE_GAP_Y, ZONE_HEADER_HEIGHT,
};
use crate::models::{DeckCard, Point, Position};

// ---------------------------------------------------------------------------
// Free-spot grid
// ---------------------------------------------------------------------------

/// First grid spot, scanning row by row from the origin, not taken by any
/// card or phantom placement.
pub fn find_next_available_position(cards: &[DeckCard]) -> Position {
    let taken = |candidate: &Position| {
        cards.iter().any(|card| {
            card.position.same_spot(candidate) || card.phantoms.iter().any(|p| p.same_spot(candidate))
        })
    };
    let mut candidate = Position::new(0.0, 0.0);
    while taken(&candidate) {
        candidate.x += GRID_COLUMN_WIDTH;
        if candidate.x > GRID_MAX_X {
            candidate.x = 0.0;
            candidate.y += GRID_ROW_HEIGHT;
        }
    }
    candidate
}

// ---------------------------------------------------------------------------
// Drag stop
// ---------------------------------------------------------------------------

/// What a drag-stop did to the dropped node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Unchanged,
    Attached { group_id: String },
    Detached { group_id: String },
    Moved { from: String, to: String },
}

/// Re-parent a dropped card or phantom according to the deepest group it
/// overlaps. A node still touching its current parent stays put. Coordinates are converted so the node stays where it was
/// dropped. Groups are never re-parented by dragging.
pub fn drop_node(board: &mut Board, node_id: &str) -> DropOutcome {
    let Some(node) = board.get(node_id) else {
        return DropOutcome::Unchanged;
    };
    if node.is_group() {
        return DropOutcome::Unchanged;
    }
    let current = node.parent_id.clone();
    let (Some(rect), Some(absolute)) = (board.absolute_rect(node_id), board.absolute_position(node_id)) else {
        return DropOutcome::Unchanged;
    };

    let overlapping: Vec<&Node> = board
        .nodes()
        .iter()
        .filter(|n| n.is_group())
        .filter(|g| board.absolute_rect(&g.id).is_some_and(|r| r.intersects(&rect)))
        .collect();
    if current
        .as_deref()
        .is_some_and(|parent| overlapping.iter().any(|g| g.id == parent))
    {
        return DropOutcome::Unchanged;
    }
    let target = overlapping
        .into_iter()
        .min_by_key(|g| Reverse(board.depth(&g.id)))
        .map(|g| g.id.clone());

    let outcome = match (current, target) {
        (None, None) => DropOutcome::Unchanged,
        (Some(from), Some(to)) if from == to => DropOutcome::Unchanged,
        (None, Some(to)) => DropOutcome::Attached { group_id: to },
        (Some(from), None) => DropOutcome::Detached { group_id: from },
        (Some(from), Some(to)) => DropOutcome::Moved { from, to },
    };

    let new_parent = match &outcome {
        DropOutcome::Unchanged => return outcome,
        DropOutcome::Attached { group_id } | DropOutcome::Moved { to: group_id, .. } => {
            Some(group_id.clone())
        }
        DropOutcome::Detached { .. } => None,
    };
    let origin = new_parent
        .as_deref()
        .and_then(|p| board.absolute_position(p))
        .unwrap_or_default();
    if let Some(node) = board.get_mut(node_id) {
        node.position = absolute.minus(origin);
        node.parent_id = new_parent;
    }
    board.sort_by_nesting();
    tracing::debug!(node_id, outcome = ?outcome, "rebound dropped node");
    outcome
}

// ---------------------------------------------------------------------------
// Autosort
// ---------------------------------------------------------------------------

fn display_name(board: &Board, node: &Node, cards: &Catalogue) -> String {
    let card_id = match &node.data {
        NodeKind::Card { card_id, .. } => Some(card_id.as_str()),
        NodeKind::Phantom { phantom_of, .. } => board.get(phantom_of).and_then(|n| match &n.data {
            NodeKind::Card { card_id, .. } => Some(card_id.as_str()),
            _ => None,
        }),
        NodeKind::Group { .. } => None,
    };
    card_id
        .and_then(|id| cards.get(id))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| node.id.clone())
}

fn grid_point(index: usize, columns: usize) -> Point {
    Point::new(
        (index % columns) as f64 * (CARD_WIDTH + CARD_MARGIN) + CARD_MARGIN,
        (index / columns) as f64 * (CARD_HEIGHT + CARD_MARGIN),
    )
}

/// Tidy the board.
///
/// Inside each group, cards then phantoms are laid out by name in a grid
/// and the group grows to fit them. Top-level groups are then tiled by
/// label, and free cards are gridded below the lowest group.
pub fn autosort(board: &mut Board, cards: &Catalogue) {
    let group_ids: Vec<String> = board
        .nodes()
        .iter()
        .filter(|n| n.is_group())
        .map(|n| n.id.clone())
        .collect();

    for group_id in &group_ids {
        let mut card_children: Vec<(String, String)> = Vec::new();
        let mut phantom_children: Vec<(String, String)> = Vec::new();
        for child in board.children(group_id) {
            let entry = (display_name(board, child, cards), child.id.clone());
            match child.data {
                NodeKind::Card { .. } => card_children.push(entry),
                NodeKind::Phantom { .. } => phantom_children.push(entry),
                NodeKind::Group { .. } => {}
            }
        }
        card_children.sort();
        phantom_children.sort();
        let ordered: Vec<String> = card_children
            .into_iter()
            .chain(phantom_children)
            .map(|(_, id)| id)
            .collect();

        for (index, id) in ordered.iter().enumerate() {
            if let Some(node) = board.get_mut(id) {
                let cell = grid_point(index, MAX_CARD_COLUMNS);
                node.position = Point::new(cell.x, cell.y + CARD_MARGIN);
            }
        }

        let total = ordered.len();
        let columns = total.clamp(1, MAX_CARD_COLUMNS);
        let rows = total.div_ceil(MAX_CARD_COLUMNS).max(1);
        let min_width = columns as f64 * (CARD_WIDTH + CARD_MARGIN) + CARD_MARGIN * 2.0;
        let min_height =
            rows as f64 * (CARD_HEIGHT + CARD_MARGIN) + CARD_MARGIN * 2.0 + ZONE_HEADER_HEIGHT;
        if let Some(Node {
            data: NodeKind::Group { width, height, .. },
            ..
        }) = board.get_mut(group_id)
        {
            *width = width.max(MIN_ZONE_SIZE).max(min_width);
            *height = height.max(MIN_ZONE_SIZE).max(min_height);
        }
    }

    // Tile top-level groups on a uniform cell so differently sized zones
    // never overlap.
    let mut top_level: Vec<(String, String, f64, f64)> = board
        .nodes()
        .iter()
        .filter(|n| n.parent_id.is_none())
        .filter_map(|n| match &n.data {
            NodeKind::Group {
                label,
                width,
                height,
            } => Some((label.clone(), n.id.clone(), *width, *height)),
            _ => None,
        })
        .collect();
    top_level.sort_by(|a, b| a.0.cmp(&b.0));
    let cell_width = top_level.iter().map(|z| z.2).fold(0.0, f64::max);
    let cell_height = top_level.iter().map(|z| z.3).fold(0.0, f64::max);
    let mut zone_bottom: f64 = 0.0;
    for (index, (_, id, _, height)) in top_level.iter().enumerate() {
        let position = Point::new(
            (index % ZONE_COLUMNS) as f64 * (cell_width + ZONE_GAP_X),
            (index / ZONE_COLUMNS) as f64 * (cell_height + ZONE_GAP_Y),
        );
        zone_bottom = zone_bottom.max(position.y + height);
        if let Some(node) = board.get_mut(id) {
            node.position = position;
        }
    }

    let base_y = if top_level.is_empty() {
        0.0
    } else {
        zone_bottom + FREE_CARDS_GAP
    };
    let mut free: Vec<(String, String)> = board
        .nodes()
        .iter()
        .filter(|n| n.is_card() && n.parent_id.is_none())
        .map(|n| (display_name(board, n, cards), n.id.clone()))
        .collect();
    free.sort();
    for (index, (_, id)) in free.iter().enumerate() {
        if let Some(node) = board.get_mut(id) {
            let cell = grid_point(index, UNGROUPED_COLUMNS);
            node.position = Point::new(cell.x, base_y + cell.y);
        }
    }
    tracing::debug!(zones = top_level.len(), free_cards = free.len(), "autosorted board");
}
