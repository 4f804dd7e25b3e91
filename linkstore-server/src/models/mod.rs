//! Domain models with validation at construction
//!
//! Request input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod link;
pub mod validation;

pub use link::{IdStrategy, Label, LinkId, MAX_LABEL_LEN};
pub use validation::ValidationError;
