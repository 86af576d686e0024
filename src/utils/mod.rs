//! Utility functions shared across the crate.
//!
//! ## Modules
//!
//! - [`app_data`] - Config file and data directory location (XDG-compliant)
//! - [`progress`] - Build spinner, no-op without the `progress` feature
//! - [`shingle`] - 3-character shingles for typo-tolerant matching
//! - [`tokenizer`] - Word extraction and name normalization
//!
//! ## Key Functions
//!
//! ```
//! use pokedex_search::utils::{extract_shingles, extract_tokens, normalize_key};
//!
//! let tokens = extract_tokens("Thunder Stone (evolution item)");
//! assert_eq!(tokens, ["evolution", "item", "stone", "thunder"]);
//!
//! assert_eq!(normalize_key("  Mr. Mime "), "mr mime");
//! assert_eq!(extract_shingles("pika").len(), 2);
//! ```

pub mod app_data;
pub mod progress;
pub mod shingle;
pub mod tokenizer;

pub use app_data::*;
pub use shingle::*;
pub use tokenizer::*;
