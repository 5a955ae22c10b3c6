pub mod layout;
pub mod node;
pub mod reconcile;

pub use layout::{autosort, drop_node, find_next_available_position, DropOutcome};
pub use node::{Board, Node, NodeKind, Rect};
pub use reconcile::{
    card_node_id, deck_to_nodes, nodes_to_deck_cards, nodes_to_zones, phantom_node_id,
    reconcile_deck,
};
