//! Core types and search algorithm for Timeghost.
//!
//! A timeghost is a triple of dated events where the middle event sits
//! closer in time to the first event than to the last one: "the moon
//! landing is closer to the Wright brothers' flight than to today".
//!
//! # Modules
//!
//! - [`event`] -- [`Event`] values, the `now` sentinel, and slug derivation.
//! - [`ghost`] -- [`Timeghost`] triples, validation, and factoid rendering.
//! - [`selector`] -- [`Selector`], the bounded search for a valid triple.
//! - [`error`] -- [`GhostError`] and [`SelectError`].
//!
//! Everything here is synchronous and free of shared state. A selector run
//! owns its working pool of events; randomness is supplied by the caller as
//! any [`rand::Rng`].

pub mod error;
pub mod event;
pub mod ghost;
pub mod selector;

pub use error::{GhostError, SelectError};
pub use event::{Event, NOW_MARKER, SLUG_MAX_LEN, format_date, slugify};
pub use ghost::{MAX_PRECISION, SECONDS_PER_YEAR, Timeghost};
pub use selector::{Anchor, NUM_TRIES, SearchOrder, Selector, select};
