//! Timeghost triples: validation, gap metrics, and factoid rendering.
//!
//! A [`Timeghost`] holds three events `(first, middle, last)`. It is valid
//! when the events are in strict chronological order and the middle event
//! is strictly closer to the first than to the last:
//!
//! ```text
//! first < middle < last   and   (middle - first) < (last - middle)
//! ```
//!
//! [`Timeghost::new`] enforces this at construction. [`Timeghost::unchecked`]
//! skips it for caller-specified triples whose validity is reported but not
//! required.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::error::GhostError;
use crate::event::Event;

/// Length of a (non-leap) year in seconds, used for gap magnitudes.
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// Highest number of decimal places tried when rendering two gaps
/// distinguishably.
pub const MAX_PRECISION: usize = 6;

/// An ordered triple of events with its derived metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeghost {
    first: Event,
    middle: Event,
    last: Event,
    /// 1-indexed selector attempt that produced this triple.
    tries: u32,
}

impl Timeghost {
    /// Build a triple and require it to be valid.
    ///
    /// # Errors
    ///
    /// Returns [`GhostError::Invalid`] carrying the rejected triple when the
    /// events are out of order or the middle is not closer to the first.
    pub fn new(first: Event, middle: Event, last: Event) -> Result<Self, GhostError> {
        let ghost = Self::unchecked(first, middle, last);
        if ghost.is_valid() {
            Ok(ghost)
        } else {
            Err(GhostError::Invalid(Box::new(ghost)))
        }
    }

    /// Build a triple without validating it.
    pub const fn unchecked(first: Event, middle: Event, last: Event) -> Self {
        Self {
            first,
            middle,
            last,
            tries: 1,
        }
    }

    pub(crate) const fn with_tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// The earliest event.
    pub const fn first(&self) -> &Event {
        &self.first
    }

    /// The event that is closer to `first` than to `last`.
    pub const fn middle(&self) -> &Event {
        &self.middle
    }

    /// The latest event, possibly the `now` sentinel.
    pub const fn last(&self) -> &Event {
        &self.last
    }

    /// Number of selector attempts consumed to find this triple.
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Time from the first event to the middle one.
    pub fn first_gap(&self) -> TimeDelta {
        &self.middle - &self.first
    }

    /// Time from the middle event to the last one.
    pub fn last_gap(&self) -> TimeDelta {
        &self.last - &self.middle
    }

    /// [`first_gap`](Self::first_gap) in years.
    pub fn first_gap_years(&self) -> f64 {
        years(self.first_gap())
    }

    /// [`last_gap`](Self::last_gap) in years.
    pub fn last_gap_years(&self) -> f64 {
        years(self.last_gap())
    }

    /// Whether the triple is ordered and the middle is strictly closer to
    /// the first event.
    pub fn is_valid(&self) -> bool {
        let is_right_order =
            self.first.date() < self.middle.date() && self.middle.date() < self.last.date();
        let is_right_closeness = self.first_gap() < self.last_gap();
        is_right_order && is_right_closeness
    }

    /// Short sentence stating the fact, e.g. `The moon landing is closer to
    /// the Wright flight than today.`
    pub fn factoid(&self) -> String {
        format!(
            "The {} is closer to the {} than {}.",
            self.middle,
            self.first,
            self.last_phrase()
        )
    }

    /// The factoid with dates and gap magnitudes in years.
    ///
    /// Gaps are printed with the fewest decimal places (starting at zero)
    /// at which the two numbers differ, so the sentence never shows two
    /// identical figures.
    ///
    /// # Errors
    ///
    /// Returns [`GhostError::PrecisionDegenerate`] when the gaps still
    /// render identically at [`MAX_PRECISION`] places.
    pub fn verbose_factoid(&self) -> Result<String, GhostError> {
        let first_years = self.first_gap_years();
        let last_years = self.last_gap_years();
        let precision = distinguishing_precision(first_years, last_years).ok_or(
            GhostError::PrecisionDegenerate {
                max_precision: MAX_PRECISION,
            },
        )?;

        Ok(format!(
            "The {middle} ({middle_date}) is closer ({first_years:.precision$} years) to \
             the {first} ({first_date}) ({last_years:.precision$} years) than \
             {last} ({last_date}).",
            middle = self.middle,
            middle_date = self.middle.date_string(),
            first = self.first,
            first_date = self.first.date_string(),
            last = self.last_phrase(),
            last_date = self.last.date_string(),
        ))
    }

    /// The instant this triple started being true: the middle date plus the
    /// first gap. `None` if that falls outside chrono's range.
    pub fn start_of_haunting(&self) -> Option<DateTime<FixedOffset>> {
        self.middle.date().checked_add_signed(self.first_gap())
    }

    /// Path addressing this exact triple, `/{first}/{middle}/{last}`.
    pub fn permalink(&self) -> String {
        format!(
            "/{}/{}/{}",
            self.first.url(),
            self.middle.url(),
            self.last.url()
        )
    }

    fn last_phrase(&self) -> String {
        if self.last.is_now() {
            String::from("today")
        } else {
            format!("the {}", self.last)
        }
    }
}

impl fmt::Display for Timeghost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validity = if self.is_valid() {
            "is valid"
        } else {
            "is not valid"
        };
        write!(
            f,
            "{} is closer to ({:.1}) {} than ({:.1}) {} {validity}, {} trie(s)",
            self.middle,
            self.first_gap_years(),
            self.first,
            self.last_gap_years(),
            self.last,
            self.tries
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn years(gap: TimeDelta) -> f64 {
    let seconds = gap.num_seconds() as f64 + f64::from(gap.subsec_nanos()) / 1e9;
    seconds / SECONDS_PER_YEAR
}

/// Fewest decimal places at which `a` and `b` print differently.
fn distinguishing_precision(a: f64, b: f64) -> Option<usize> {
    (0..=MAX_PRECISION).find(|&precision| format!("{a:.precision$}") != format!("{b:.precision$}"))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn event(description: &str, year: i32, month: u32, day: u32) -> Event {
        let date = Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .map(|dt| dt.fixed_offset())
            .unwrap_or_default();
        Event::new(description, date)
    }

    fn wright_moon_berlin() -> (Event, Event, Event) {
        (
            event("first powered flight", 1903, 12, 17),
            event("moon landing", 1969, 7, 20),
            event("fall of the Berlin Wall", 1989, 11, 9),
        )
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn valid_triple_constructs() {
        let (first, middle, last) = (
            event("A", 1900, 1, 1),
            event("B", 1910, 1, 1),
            event("C", 1950, 1, 1),
        );
        let ghost = Timeghost::new(first, middle, last);
        assert!(ghost.is_ok());
        let ghost = ghost.ok();
        assert_eq!(ghost.as_ref().map(Timeghost::tries), Some(1));
        assert!(ghost.is_some_and(|g| g.is_valid()));
    }

    #[test]
    fn middle_closer_to_last_is_rejected() {
        let (first, middle, last) = wright_moon_berlin();
        let result = Timeghost::new(first, middle, last);
        assert!(matches!(result, Err(GhostError::Invalid(_))));
    }

    #[test]
    fn rejection_carries_the_triple() {
        let (first, middle, last) = wright_moon_berlin();
        let candidate = Timeghost::new(first, middle, last)
            .err()
            .and_then(GhostError::into_candidate);
        assert!(candidate.is_some_and(|g| g.middle().description() == "moon landing"));
    }

    #[test]
    fn out_of_order_is_rejected() {
        let result = Timeghost::new(
            event("B", 1910, 1, 1),
            event("A", 1900, 1, 1),
            event("C", 1950, 1, 1),
        );
        assert!(result.is_err());

        let result = Timeghost::new(
            event("A", 1900, 1, 1),
            event("C", 1950, 1, 1),
            event("B", 1910, 1, 1),
        );
        assert!(result.is_err());
    }

    #[test]
    fn equal_dates_are_rejected() {
        let result = Timeghost::new(
            event("A", 1900, 1, 1),
            event("A twin", 1900, 1, 1),
            event("C", 1950, 1, 1),
        );
        assert!(result.is_err());
    }

    #[test]
    fn equal_gaps_are_rejected() {
        let result = Timeghost::new(
            event("A", 2000, 1, 1),
            event("B", 2000, 1, 11),
            event("C", 2000, 1, 21),
        );
        assert!(result.is_err());
    }

    #[test]
    fn unchecked_keeps_invalid_triples() {
        let (first, middle, last) = wright_moon_berlin();
        let ghost = Timeghost::unchecked(first, middle, last);
        assert!(!ghost.is_valid());
        assert_eq!(ghost.tries(), 1);
    }

    #[test]
    fn validity_is_stable() {
        let (first, middle, last) = wright_moon_berlin();
        let a = Timeghost::unchecked(first.clone(), middle.clone(), last.clone());
        let b = Timeghost::unchecked(first, middle, last);
        assert_eq!(a.is_valid(), b.is_valid());
        assert_eq!(a.is_valid(), a.is_valid());
    }

    // -----------------------------------------------------------------------
    // Metrics
    // -----------------------------------------------------------------------

    #[test]
    fn gap_years_use_a_365_day_year() {
        let ghost = Timeghost::unchecked(
            event("A", 2001, 1, 1),
            event("B", 2002, 1, 1),
            event("C", 2004, 1, 1),
        );
        assert!((ghost.first_gap_years() - 1.0).abs() < 1e-9);
        // Neither 2002 nor 2003 is a leap year.
        assert!((ghost.last_gap_years() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn start_of_haunting_adds_first_gap_to_middle() {
        let ghost = Timeghost::unchecked(
            event("A", 2000, 1, 1),
            event("B", 2000, 1, 11),
            event("C", 2000, 3, 1),
        );
        let expected = event("x", 2000, 1, 21);
        assert_eq!(ghost.start_of_haunting().as_ref(), Some(expected.date()));
    }

    #[test]
    fn permalink_joins_slugs() {
        let (first, middle, last) = wright_moon_berlin();
        let ghost = Timeghost::unchecked(first, middle, last);
        assert_eq!(
            ghost.permalink(),
            "/first-powered-flight/moon-landing/fall-of-the-berlin-wall"
        );
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    #[test]
    fn factoid_names_the_last_event() {
        let ghost = Timeghost::unchecked(
            event("Wright flight", 1903, 12, 17),
            event("Titanic sinking", 1912, 4, 15),
            event("moon landing", 1969, 7, 20),
        );
        assert_eq!(
            ghost.factoid(),
            "The Titanic sinking is closer to the Wright flight than the moon landing."
        );
    }

    #[test]
    fn factoid_says_today_for_now() {
        let ghost = Timeghost::unchecked(
            event("Wright flight", 1903, 12, 17),
            event("Titanic sinking", 1912, 4, 15),
            Event::now(),
        );
        assert_eq!(
            ghost.factoid(),
            "The Titanic sinking is closer to the Wright flight than today."
        );
    }

    #[test]
    fn verbose_factoid_uses_whole_years_when_distinct() {
        let ghost = Timeghost::unchecked(
            event("A", 1900, 1, 1),
            event("B", 1910, 1, 1),
            event("C", 1950, 1, 1),
        );
        let text = ghost.verbose_factoid().unwrap_or_default();
        assert_eq!(
            text,
            "The B (1 January, 1910) is closer (10 years) to the A (1 January, 1900) \
             (40 years) than the C (1 January, 1950)."
        );
    }

    #[test]
    fn verbose_factoid_adds_precision_until_distinct() {
        // 10 days vs 11 days: both round to 0 years at zero places.
        let ghost = Timeghost::unchecked(
            event("A", 2000, 1, 1),
            event("B", 2000, 1, 11),
            event("C", 2000, 1, 22),
        );
        let text = ghost.verbose_factoid().unwrap_or_default();
        assert!(text.contains("(0.027 years)"), "{text}");
        assert!(text.contains("(0.030 years)"), "{text}");
    }

    #[test]
    fn verbose_factoid_fails_on_equal_gaps() {
        let ghost = Timeghost::unchecked(
            event("A", 2000, 1, 1),
            event("B", 2000, 1, 11),
            event("C", 2000, 1, 21),
        );
        assert!(matches!(
            ghost.verbose_factoid(),
            Err(GhostError::PrecisionDegenerate { max_precision: MAX_PRECISION })
        ));
    }

    #[test]
    fn precision_search_is_bounded() {
        assert_eq!(distinguishing_precision(1.0, 2.0), Some(0));
        assert_eq!(distinguishing_precision(1.0, 1.2), Some(1));
        assert_eq!(distinguishing_precision(1.0, 1.0), None);
        assert_eq!(distinguishing_precision(1.0, 1.000_000_01), None);
    }

    #[test]
    fn display_reports_validity_and_tries() {
        let ghost = Timeghost::unchecked(
            event("A", 1900, 1, 1),
            event("B", 1910, 1, 1),
            event("C", 1950, 1, 1),
        )
        .with_tries(3);
        assert_eq!(
            ghost.to_string(),
            "B is closer to (10.0) A than (40.0) C is valid, 3 trie(s)"
        );
    }
}
