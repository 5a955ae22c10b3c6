pub mod engine;
pub mod spec;
pub mod versions;

pub use engine::{filter_cards, CompiledFilter, FilterContext};
pub use spec::{rolling_hash, FilterKey, FilterSpec, ManaBucket, SetFilter};
pub use versions::{display_version, single_set_selected, versions_matching_filter};
