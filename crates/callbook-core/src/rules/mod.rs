pub mod validation;

pub use validation::{ensure_not_future, validate_display_format};
