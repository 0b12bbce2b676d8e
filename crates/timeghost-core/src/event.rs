//! Dated events and the URL slugs that address them.
//!
//! An [`Event`] is an immutable `(description, date)` pair. Its slug is
//! derived once from the description at construction and cached. Equality
//! compares description and date. There is no `PartialOrd`: callers order
//! events through [`Event::date`], so two distinct events on the same instant
//! are never reported as equal.

use std::fmt;
use std::ops::Sub;

use chrono::{DateTime, FixedOffset, Local, TimeDelta};
use serde::Serialize;

/// Label carried by the sentinel event that stands for the current instant.
pub const NOW_MARKER: &str = "now";

/// Maximum number of characters in an event slug.
pub const SLUG_MAX_LEN: usize = 40;

/// `strftime` pattern for human-readable dates, e.g. `4 July, 1776`.
const DATE_FORMAT: &str = "%-d %B, %Y";

/// A dated occurrence with a text label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Event {
    /// Human-readable label, e.g. `moon landing`.
    description: String,
    /// When the event happened.
    date: DateTime<FixedOffset>,
    /// Slug derived from the description.
    url: String,
}

impl Event {
    /// Create an event and derive its slug.
    pub fn new(description: impl Into<String>, date: DateTime<FixedOffset>) -> Self {
        let description = description.into();
        let url = slugify(&description);
        Self {
            description,
            date,
            url,
        }
    }

    /// The sentinel event for the current instant in the local timezone.
    ///
    /// Each call reads the wall clock again. Callers that need one stable
    /// instant should call this once and reuse the value.
    pub fn now() -> Self {
        Self::new(NOW_MARKER, Local::now().fixed_offset())
    }

    /// Whether this is the `now` sentinel.
    pub fn is_now(&self) -> bool {
        self.description == NOW_MARKER
    }

    /// The event's label.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the event happened.
    pub const fn date(&self) -> &DateTime<FixedOffset> {
        &self.date
    }

    /// The cached URL slug.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The date rendered as `4 July, 1776`.
    pub fn date_string(&self) -> String {
        format_date(&self.date)
    }

    /// Time elapsed from `earlier` to this event. Negative when `earlier`
    /// actually happened later.
    pub fn since(&self, earlier: &Self) -> TimeDelta {
        self.date.signed_duration_since(earlier.date)
    }
}

impl Sub for &Event {
    type Output = TimeDelta;

    fn sub(self, rhs: Self) -> TimeDelta {
        self.since(rhs)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Render a date the way every page shows it, e.g. `4 July, 1776`.
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Derive a URL slug from a free-text description.
///
/// Lowercases, turns spaces into hyphens, drops everything except ASCII
/// letters, digits and hyphens, then truncates to [`SLUG_MAX_LEN`]
/// characters. Distinct descriptions may collapse to the same slug.
pub fn slugify(description: &str) -> String {
    description
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(SLUG_MAX_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(year: i32, month: u32, day: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .map(|dt| dt.fixed_offset())
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Slugs
    // -----------------------------------------------------------------------

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(slugify("Fall of Saigon"), "fall-of-saigon");
    }

    #[test]
    fn slug_drops_punctuation() {
        assert_eq!(slugify("Release of \"Titanic\"!"), "release-of-titanic");
        assert_eq!(slugify("D-Day (Normandy)"), "d-day-normandy");
    }

    #[test]
    fn slug_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Müller opens"), "caf-mller-opens");
    }

    #[test]
    fn slug_is_truncated() {
        let long = "a very long description that keeps going well past forty characters";
        let slug = slugify(long);
        assert_eq!(slug.chars().count(), SLUG_MAX_LEN);
        assert!(long.replace(' ', "-").starts_with(&slug));
    }

    #[test]
    fn slug_is_idempotent() {
        for text in ["Opening of Disneyland", "  spaced  out ", "MiXeD 123 & more"] {
            let once = slugify(text);
            assert_eq!(slugify(&once), once);
            assert!(once.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
        }
    }

    #[test]
    fn slug_is_cached_on_construction() {
        let event = Event::new("Opening of Disneyland", at(1955, 7, 17));
        assert_eq!(event.url(), "opening-of-disneyland");
    }

    #[test]
    fn colliding_descriptions_share_a_slug() {
        let a = Event::new("Moon landing!", at(1969, 7, 20));
        let b = Event::new("moon landing", at(1969, 7, 21));
        assert_eq!(a.url(), b.url());
        assert_ne!(a, b);
    }

    // -----------------------------------------------------------------------
    // Dates and ordering
    // -----------------------------------------------------------------------

    #[test]
    fn date_string_has_no_leading_zero() {
        let event = Event::new("Declaration of Independence", at(1776, 7, 4));
        assert_eq!(event.date_string(), "4 July, 1776");
    }

    #[test]
    fn same_instant_events_are_distinct() {
        let early = Event::new("zzz", at(1900, 1, 1));
        let late = Event::new("aaa", at(2000, 1, 1));
        assert!(early.date() < late.date());

        let twin = Event::new("other", at(1900, 1, 1));
        assert_eq!(early.date(), twin.date());
        assert_ne!(early, twin);
    }

    #[test]
    fn format_date_matches_date_string() {
        let event = Event::new("moon landing", at(1969, 7, 20));
        assert_eq!(format_date(event.date()), event.date_string());
        assert_eq!(format_date(&at(2001, 9, 11)), "11 September, 2001");
    }

    #[test]
    fn difference_is_signed() {
        let early = Event::new("early", at(2000, 1, 1));
        let late = Event::new("late", at(2000, 1, 11));
        assert_eq!(&late - &early, TimeDelta::days(10));
        assert_eq!(early.since(&late), TimeDelta::days(-10));
    }

    #[test]
    fn now_is_the_sentinel() {
        let before = Local::now().fixed_offset();
        let now = Event::now();
        assert!(now.is_now());
        assert_eq!(now.url(), NOW_MARKER);
        assert!(*now.date() >= before);
    }

    #[test]
    fn display_is_the_description() {
        let event = Event::new("Fall of the Berlin Wall", at(1989, 11, 9));
        assert_eq!(event.to_string(), "Fall of the Berlin Wall");
    }

    #[test]
    fn serializes_with_slug() {
        let event = Event::new("Fall of Saigon", at(1975, 4, 30));
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(json["url"], "fall-of-saigon");
        assert_eq!(json["description"], "Fall of Saigon");
    }
}
