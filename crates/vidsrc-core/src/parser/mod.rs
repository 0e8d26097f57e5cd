//! HTML parsers for provider pages
//!
//! - `search`: Parse the title search results page

pub mod search;

pub use search::{extract_external_id, parse_search_results};
