//! Visual nodes on the deck board and the arena that owns them.
//!
//! Node positions are relative to the parent group when `parent_id` is set,
//! absolute otherwise. [`Board::from_nodes`] runs the orphan pass, so a
//! board never holds a dangling or cyclic parent pointer.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::{CARD_HEIGHT, CARD_WIDTH};
use crate::models::{DeckCardType, MainOrSide, Point};

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum NodeKind {
    #[serde(rename = "cardNode")]
    Card {
        card_id: String,
        main_or_side: MainOrSide,
        deck_card_type: DeckCardType,
        selected_version_id: Option<String>,
    },
    /// An extra placement of the card node named by `phantom_of`.
    #[serde(rename = "phantomNode")]
    Phantom { phantom_of: String, index: usize },
    #[serde(rename = "groupNode")]
    Group { label: String, width: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub position: Point,
    pub parent_id: Option<String>,
    pub data: NodeKind,
}

impl Node {
    pub fn is_group(&self) -> bool {
        matches!(self.data, NodeKind::Group { .. })
    }

    pub fn is_card(&self) -> bool {
        matches!(self.data, NodeKind::Card { .. })
    }

    /// Width and height on the board.
    pub fn size(&self) -> (f64, f64) {
        match self.data {
            NodeKind::Group { width, height, .. } => (width, height),
            _ => (CARD_WIDTH, CARD_HEIGHT),
        }
    }
}

/// Axis-aligned rectangle in absolute board coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// True when the rectangles share some area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.origin.x + other.width
            && self.origin.x + self.width > other.origin.x
            && self.origin.y < other.origin.y + other.height
            && self.origin.y + self.height > other.origin.y
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Arena of nodes keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct Board {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Board {
    /// Build a board, repairing the node graph on the way in.
    ///
    /// Duplicate IDs keep their first node. Parent pointers that name a
    /// missing node, a non-group node or close a cycle are cleared. Phantoms
    /// whose card node is gone are dropped.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut seen = HashSet::new();
        let mut nodes: Vec<Node> = nodes
            .into_iter()
            .filter(|node| {
                let fresh = seen.insert(node.id.clone());
                if !fresh {
                    tracing::warn!(node_id = %node.id, "dropping node with duplicate id");
                }
                fresh
            })
            .collect();

        let groups: HashSet<String> = nodes
            .iter()
            .filter(|n| n.is_group())
            .map(|n| n.id.clone())
            .collect();
        for node in &mut nodes {
            if let Some(parent) = &node.parent_id {
                if *parent == node.id || !groups.contains(parent) {
                    tracing::warn!(node_id = %node.id, parent_id = %parent, "dropping dangling parent reference");
                    node.parent_id = None;
                }
            }
        }

        let mut board = Self {
            nodes,
            index: HashMap::new(),
        };
        board.reindex();
        board.break_cycles();

        let cards: HashSet<String> = board
            .nodes
            .iter()
            .filter(|n| n.is_card())
            .map(|n| n.id.clone())
            .collect();
        board.nodes.retain(|node| match &node.data {
            NodeKind::Phantom { phantom_of, .. } if !cards.contains(phantom_of) => {
                tracing::warn!(node_id = %node.id, phantom_of = %phantom_of, "dropping orphaned phantom");
                false
            }
            _ => true,
        });
        board.reindex();
        board
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }

    fn break_cycles(&mut self) {
        for i in 0..self.nodes.len() {
            let own_id = self.nodes[i].id.clone();
            let mut visited = HashSet::new();
            let mut current = self.nodes[i].parent_id.clone();
            while let Some(parent) = current {
                if parent == own_id {
                    tracing::warn!(node_id = %own_id, "breaking cyclic parent chain");
                    self.nodes[i].parent_id = None;
                    break;
                }
                if !visited.insert(parent.clone()) {
                    break;
                }
                current = self.get(&parent).and_then(|p| p.parent_id.clone());
            }
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        let i = *self.index.get(id)?;
        self.nodes.get_mut(i)
    }

    /// Direct children of `parent_id`, in board order.
    pub fn children<'b>(&'b self, parent_id: &'b str) -> impl Iterator<Item = &'b Node> + 'b {
        self.nodes
            .iter()
            .filter(move |n| n.parent_id.as_deref() == Some(parent_id))
    }

    /// Number of ancestors above `id`.
    pub fn depth(&self, id: &str) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).and_then(|n| n.parent_id.as_deref());
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).and_then(|n| n.parent_id.as_deref());
        }
        depth
    }

    /// Whether `ancestor` sits somewhere above `id`.
    pub fn is_descendant(&self, id: &str, ancestor: &str) -> bool {
        let mut current = self.get(id).and_then(|n| n.parent_id.as_deref());
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.get(parent).and_then(|n| n.parent_id.as_deref());
        }
        false
    }

    pub fn absolute_position(&self, id: &str) -> Option<Point> {
        let node = self.get(id)?;
        let mut point = node.position;
        let mut current = node.parent_id.as_deref();
        while let Some(parent) = current.and_then(|p| self.get(p)) {
            point = point.offset(parent.position);
            current = parent.parent_id.as_deref();
        }
        Some(point)
    }

    pub fn absolute_rect(&self, id: &str) -> Option<Rect> {
        let (width, height) = self.get(id)?.size();
        Some(Rect {
            origin: self.absolute_position(id)?,
            width,
            height,
        })
    }

    /// Order nodes so every parent precedes its children: free nodes first,
    /// then groups before other nodes, then shallower before deeper.
    pub fn sort_by_nesting(&mut self) {
        let keys: HashMap<String, (bool, bool, usize)> = self
            .nodes
            .iter()
            .map(|n| {
                (
                    n.id.clone(),
                    (n.parent_id.is_some(), !n.is_group(), self.depth(&n.id)),
                )
            })
            .collect();
        self.nodes.sort_by_key(|n| keys.get(&n.id).copied());
        self.reindex();
    }
}
