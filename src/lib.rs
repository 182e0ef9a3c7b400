//! # texmark - Markdown/LaTeX Editor with Live Preview
//!
//! A dual-mode editor: an HTTP server renders Markdown and LaTeX to HTML,
//! exports HTML and PDF, and answers syntax questions; an editor controller
//! drives a text widget against that server with debounced preview and
//! save, autosave and per-mode local storage.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  JSON/HTTP  ┌──────────────┐         ┌────────────┐
//! │    Editor    │────────────►│    Server    │────────►│   Render   │
//! │  Controller  │◄────────────│   (axum)     │         │ md / latex │
//! │              │             │              │         │ html / pdf │
//! │ - Widget     │             │ - Documents  │         └────────────┘
//! │ - LocalStore │             │ - Assistant  │────────► chat API or
//! │ - Debouncer  │             └──────────────┘          offline FAQ
//! └──────────────┘
//!        ▲
//!        │ subcommands
//! ┌──────────────┐
//! │     CLI      │
//! └──────────────┘
//! ```

pub mod assistant;
pub mod cli;
pub mod cmd_args;
pub mod config;
pub mod document;
pub mod editor;
pub mod protocol;
pub mod render;
pub mod server;

pub use document::Mode;
pub use editor::EditorController;
pub use server::AppState;
