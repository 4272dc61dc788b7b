pub mod validation;

pub use validation::{check_height, sanitize_tree, validate_tree};
