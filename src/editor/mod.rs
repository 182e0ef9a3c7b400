//! # Editor
//!
//! Client side of texmark. `EditorController` drives an `EditorWidget`
//! against the editor server, keeping a local copy of each mode's document
//! in a `LocalStore`.

pub mod controller;
pub mod debounce;
pub mod events;
pub mod remote;
pub mod status_line;
pub mod storage;
pub mod templates;
pub mod toolbar;
pub mod types;
pub mod widget;

pub use controller::EditorController;
pub use debounce::Debouncer;
pub use events::{AssistantMessage, EditorEvent, Sender};
pub use remote::{ExportedFile, RemoteClient};
pub use status_line::{DocumentStats, StatusLine};
pub use storage::{FileStore, LocalStore, MemoryStore};
pub use templates::initial_content;
pub use types::{LogicalPosition, PanelVisibility, ViewMode};
pub use widget::{EditorWidget, TextBuffer};
