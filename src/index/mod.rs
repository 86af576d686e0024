pub mod build;
pub mod reader;
pub mod stats;
pub mod types;

pub use reader::Index;
pub use stats::IndexStats;
pub use types::*;
