//! HTTP front end for Timeghost.
//!
//! Serves timeghost pages rendered from `minijinja` templates plus a small
//! JSON API, all backed by a read-only [`Catalog`](timeghost_catalog::Catalog)
//! loaded at startup.
//!
//! # Modules
//!
//! - [`config`] -- YAML settings with environment overrides
//! - [`error`] -- request and startup error types
//! - [`handlers`] -- route handlers
//! - [`pages`] -- template loading and rendering
//! - [`router`] -- route table
//! - [`server`] -- bind and serve
//! - [`state`] -- shared application state
//! - [`view`] -- serializable projections for templates and JSON

pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod server;
pub mod state;
pub mod view;

pub use config::ServerSettings;
pub use error::{StartupError, WebError};
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
