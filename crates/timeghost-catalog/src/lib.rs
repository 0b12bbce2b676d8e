//! Event catalog for Timeghost.
//!
//! The catalog is a CSV file with a header row and two columns,
//! `description` and `date`. It is read once into memory; every selector
//! run then works on its own copy of the events.
//!
//! # Modules
//!
//! - [`catalog`] -- [`Catalog`] loading, slug lookup, and working copies.
//! - [`date`] -- Lenient timestamp parsing for catalog records.
//! - [`error`] -- [`CatalogError`].

pub mod catalog;
pub mod date;
pub mod error;

pub use catalog::Catalog;
pub use date::parse_date;
pub use error::CatalogError;
