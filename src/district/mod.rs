//! District names and the ids derived from them.
//!
//! - [`list`]: ordered names from the district JSON
//! - [`normalize`]: element id and path id derivation

mod list;
mod normalize;

pub use list::load_districts;
pub use normalize::{normalize_id, path_id};
