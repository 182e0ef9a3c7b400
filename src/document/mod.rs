//! # Documents
//!
//! The editing mode shared by every layer, and the server-side store that
//! keeps the last saved content for each mode.

pub mod mode;
pub mod store;

pub use mode::{Mode, ModeParseError};
pub use store::DocumentStore;
