use std::path::PathBuf;

// Pagination
pub const PAGE_SIZE_DESKTOP: usize = 50;
pub const PAGE_SIZE_MOBILE: usize = 10;

/// Highest mana value with its own bucket; anything above lands in the infinite bucket.
pub const MAX_MANA_BUCKET: u32 = 9;

// Placement grid for cards added without an explicit position
pub const GRID_COLUMN_WIDTH: f64 = 100.0;
pub const GRID_ROW_HEIGHT: f64 = 50.0;
pub const GRID_MAX_X: f64 = 500.0;

// Board geometry
pub const CARD_WIDTH: f64 = 100.0;
pub const CARD_HEIGHT: f64 = 140.0;
pub const CARD_MARGIN: f64 = 12.0;
pub const MAX_CARD_COLUMNS: usize = 5;
pub const ZONE_GAP_X: f64 = 40.0;
pub const ZONE_GAP_Y: f64 = 40.0;
pub const ZONE_COLUMNS: usize = 3;
pub const UNGROUPED_COLUMNS: usize = 6;
pub const ZONE_HEADER_HEIGHT: f64 = 60.0;
pub const FREE_CARDS_GAP: f64 = 80.0;
pub const DEFAULT_ZONE_WIDTH: f64 = 200.0;
pub const DEFAULT_ZONE_HEIGHT: f64 = 200.0;
pub const MIN_ZONE_SIZE: f64 = 180.0;

/// Store key under which the catalogue filter is persisted.
pub const LOCAL_STORE_FILTER_KEY: &str = "localStoreFilter";

pub fn default_store_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("magic-helper")
    } else {
        PathBuf::from(".magic-helper")
    }
}
