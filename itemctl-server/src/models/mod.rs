//! Domain models with validation
//!
//! Request payloads are validated before they reach storage.
//! Invalid input returns ValidationError, not panic.

pub mod item;
pub mod validation;

pub use item::{Item, ItemPatch, NewItem};
pub use validation::ValidationError;
