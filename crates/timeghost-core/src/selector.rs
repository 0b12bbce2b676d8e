//! Bounded search for a valid [`Timeghost`] in a pool of events.
//!
//! A [`Selector`] owns a working copy of the event pool and spends up to
//! [`NUM_TRIES`] attempts looking for a triple. Each attempt:
//!
//! 1. Uses the middle event: the pinned one, or a single random draw from
//!    the pool made before the first attempt. The middle is removed from
//!    the pool once and persists across retries.
//! 2. Fixes one endpoint and scans the pool for the other:
//!    - [`Anchor::Now`]: `last` is the `now` sentinel; the scan looks for a
//!      `first` among events not later than the middle.
//!    - [`Anchor::Arbitrary`]: `first` is drawn at random among events
//!      strictly earlier than the middle; the scan looks for a `last` among
//!      events not earlier than the middle.
//! 3. Returns the first scanned candidate that validates.
//!
//! The scan is positional. With [`SearchOrder::Chronological`] the pool is
//! sorted ascending, so the scan meets the tightest-margin partner first.
//! With [`SearchOrder::Random`] it is shuffled.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{GhostError, SelectError};
use crate::event::Event;
use crate::ghost::Timeghost;

/// Default attempt budget for a selector run.
pub const NUM_TRIES: u32 = 100;

/// How the last event of the triple is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// The last event is the current instant.
    #[default]
    Now,
    /// The last event is searched for in the pool.
    Arbitrary,
}

/// Order in which the pool is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
    /// Ascending by date. Reproducible, and yields the tightest margins.
    #[default]
    #[serde(alias = "worst")]
    Chronological,
    /// Shuffled.
    Random,
}

/// Outcome of a single attempt.
enum Attempt {
    Found(Timeghost),
    /// The middle has no partner on the side the anchor requires.
    NoCandidate,
    /// Partners existed but none validated.
    Rejected(Option<Box<Timeghost>>),
}

/// Search configuration plus the working pool it consumes.
#[derive(Debug, Clone)]
pub struct Selector {
    pool: Vec<Event>,
    middle: Option<Event>,
    anchor: Anchor,
    order: SearchOrder,
    max_tries: u32,
    now: Option<Event>,
}

impl Selector {
    /// Create a selector over an owned pool of events.
    ///
    /// The pool is consumed by [`run`](Self::run); pass a copy if the
    /// original is still needed.
    pub const fn new(events: Vec<Event>) -> Self {
        Self {
            pool: events,
            middle: None,
            anchor: Anchor::Now,
            order: SearchOrder::Chronological,
            max_tries: NUM_TRIES,
            now: None,
        }
    }

    /// Pin the middle event. `None` lets the selector draw one.
    #[must_use]
    pub fn middle(mut self, middle: Option<Event>) -> Self {
        self.middle = middle;
        self
    }

    /// Choose how the last event is found.
    #[must_use]
    pub const fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Choose the scan order.
    #[must_use]
    pub const fn order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    /// Override the attempt budget.
    #[must_use]
    pub const fn max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Use a fixed instant for [`Anchor::Now`] instead of reading the clock.
    #[must_use]
    pub fn with_now(mut self, now: Event) -> Self {
        self.now = Some(now);
        self
    }

    /// Run the search.
    ///
    /// The middle is the pinned event or, failing that, one random draw from
    /// the pool. It is removed from the pool once and kept for every
    /// attempt. With [`Anchor::Now`] the pool and both endpoints are fixed,
    /// so one attempt decides the run. With [`Anchor::Arbitrary`] each
    /// attempt draws a fresh `first`.
    ///
    /// # Errors
    ///
    /// - [`SelectError::EmptyPool`] if there is nothing to draw a middle from.
    /// - [`SelectError::NoCandidateFound`] if the middle has no partner on
    ///   the side the anchor requires.
    /// - [`SelectError::SearchExhausted`] if partners existed but no triple
    ///   validated.
    pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> Result<Timeghost, SelectError> {
        match self.order {
            SearchOrder::Random => self.pool.shuffle(rng),
            SearchOrder::Chronological => self.pool.sort_by_key(|event| *event.date()),
        }

        let middle = match self.middle.take() {
            Some(event) => event,
            None => self.pool.choose(rng).cloned().ok_or(SelectError::EmptyPool)?,
        };
        self.consume(&middle);
        let now = self.now.take().unwrap_or_else(Event::now);
        debug!(middle = %middle, anchor = ?self.anchor, order = ?self.order, "selector started");

        let mut attempts = 0;
        let mut last_candidate = None;

        for attempt in 1..=self.max_tries {
            attempts = attempt;
            let outcome = match self.anchor {
                Anchor::Now => self.find_first(&middle, &now),
                Anchor::Arbitrary => match self.event_before(&middle, rng) {
                    Some(first) => self.find_last(&first, &middle),
                    None => Attempt::NoCandidate,
                },
            };

            match outcome {
                Attempt::Found(ghost) => {
                    info!(
                        tries = attempt,
                        first = %ghost.first(),
                        middle = %ghost.middle(),
                        last = %ghost.last(),
                        "timeghost found"
                    );
                    return Ok(ghost.with_tries(attempt));
                }
                Attempt::NoCandidate => {
                    // The pool no longer changes, so neither will the answer.
                    return Err(SelectError::NoCandidateFound {
                        middle: middle.description().to_owned(),
                    });
                }
                Attempt::Rejected(candidate) => {
                    debug!(attempt, middle = %middle, "every candidate rejected");
                    if candidate.is_some() {
                        last_candidate = candidate;
                    }
                    if self.anchor == Anchor::Now {
                        break;
                    }
                }
            }
        }

        warn!(attempts, middle = %middle, "timeghost search exhausted");
        Err(SelectError::SearchExhausted {
            attempts,
            last_candidate,
        })
    }

    /// Remove the middle event from the pool if it is there.
    fn consume(&mut self, middle: &Event) {
        if let Some(pos) = self.pool.iter().position(|event| event == middle) {
            self.pool.remove(pos);
        }
    }

    /// A random pool event strictly earlier than `middle`.
    fn event_before<R: Rng + ?Sized>(&self, middle: &Event, rng: &mut R) -> Option<Event> {
        let befores: Vec<&Event> = self
            .pool
            .iter()
            .filter(|event| event.date() < middle.date())
            .collect();
        befores.choose(rng).map(|event| (*event).clone())
    }

    /// Scan for a `first` that makes `(first, middle, last)` valid.
    fn find_first(&self, middle: &Event, last: &Event) -> Attempt {
        let candidates = self.pool.iter().filter(|event| event.date() <= middle.date());
        scan(candidates, |first| {
            Timeghost::new(first.clone(), middle.clone(), last.clone())
        })
    }

    /// Scan for a `last` that makes `(first, middle, last)` valid.
    fn find_last(&self, first: &Event, middle: &Event) -> Attempt {
        let candidates = self.pool.iter().filter(|event| event.date() >= middle.date());
        scan(candidates, |last| {
            Timeghost::new(first.clone(), middle.clone(), last.clone())
        })
    }
}

/// Try candidates in order until one builds a valid triple.
fn scan<'a, I, F>(candidates: I, mut build: F) -> Attempt
where
    I: Iterator<Item = &'a Event>,
    F: FnMut(&Event) -> Result<Timeghost, GhostError>,
{
    let mut seen = false;
    let mut rejected = None;
    for candidate in candidates {
        seen = true;
        match build(candidate) {
            Ok(ghost) => return Attempt::Found(ghost),
            Err(err) => rejected = err.into_candidate(),
        }
    }
    if seen {
        Attempt::Rejected(rejected)
    } else {
        Attempt::NoCandidate
    }
}

/// Run a selector with the default attempt budget.
///
/// Convenience wrapper around [`Selector`]. `events` is consumed.
///
/// # Errors
///
/// See [`Selector::run`].
pub fn select<R: Rng + ?Sized>(
    events: Vec<Event>,
    middle: Option<Event>,
    anchor: Anchor,
    order: SearchOrder,
    rng: &mut R,
) -> Result<Timeghost, SelectError> {
    Selector::new(events)
        .middle(middle)
        .anchor(anchor)
        .order(order)
        .run(rng)
}
