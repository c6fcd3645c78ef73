pub mod listing;
pub mod model;

// Re-exports used by the CLI and tests
pub use listing::{branch_targets, build_listing, ListingLine};
pub use model::{load_hex_image, parse_hex_line, read_word, Image};
