//! Serializable projections of core types for templates and the JSON API.

use serde::Serialize;
use timeghost_core::{Event, Timeghost, format_date};

/// One event as shown on a page.
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    /// Free-text description.
    pub description: String,
    /// Human-readable date.
    pub date: String,
    /// URL slug.
    pub url: String,
    /// Whether this is the now sentinel.
    pub is_now: bool,
}

impl From<&Event> for EventView {
    fn from(event: &Event) -> Self {
        Self {
            description: event.description().to_owned(),
            date: event.date_string(),
            url: event.url().to_owned(),
            is_now: event.is_now(),
        }
    }
}

/// Everything the timeghost page and the JSON API show about a triple.
#[derive(Debug, Clone, Serialize)]
pub struct TimeghostView {
    /// Earliest event.
    pub first: EventView,
    /// The event that is closer to `first`.
    pub middle: EventView,
    /// Latest event.
    pub last: EventView,
    /// Short sentence form.
    pub factoid: String,
    /// Long sentence form with dates and gaps. `None` when the gaps cannot
    /// be told apart.
    pub verbose_factoid: Option<String>,
    /// Date the triple started to hold, if it ever did.
    pub start_of_haunting: Option<String>,
    /// Gap from first to middle, in years.
    pub first_gap_years: f64,
    /// Gap from middle to last, in years.
    pub last_gap_years: f64,
    /// Attempts the selector spent.
    pub tries: u32,
    /// Whether the triple satisfies the ordering and closeness rules.
    pub is_valid: bool,
    /// Path that renders this exact triple.
    pub permalink: String,
}

impl From<&Timeghost> for TimeghostView {
    fn from(ghost: &Timeghost) -> Self {
        Self {
            first: ghost.first().into(),
            middle: ghost.middle().into(),
            last: ghost.last().into(),
            factoid: ghost.factoid(),
            verbose_factoid: ghost.verbose_factoid().ok(),
            start_of_haunting: ghost.start_of_haunting().as_ref().map(format_date),
            first_gap_years: ghost.first_gap_years(),
            last_gap_years: ghost.last_gap_years(),
            tries: ghost.tries(),
            is_valid: ghost.is_valid(),
            permalink: ghost.permalink(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn event(description: &str, year: i32) -> Event {
        let date = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .map(|dt| dt.fixed_offset())
            .unwrap_or_default();
        Event::new(description, date)
    }

    #[test]
    fn valid_triple_view() {
        let ghost = Timeghost::unchecked(
            event("first thing", 1950),
            event("middle thing", 1960),
            event("last thing", 2000),
        );
        let view = TimeghostView::from(&ghost);

        assert!(view.is_valid);
        assert_eq!(view.first.url, "first-thing");
        assert_eq!(view.middle.date, "1 January, 1960");
        assert_eq!(view.permalink, "/first-thing/middle-thing/last-thing");
        assert_eq!(view.tries, 1);
        assert!(view.verbose_factoid.is_some());
        assert_eq!(view.start_of_haunting.as_deref(), Some("1 January, 1970"));
    }

    #[test]
    fn degenerate_triple_has_no_verbose_factoid() {
        let ghost = Timeghost::unchecked(event("a", 1950), event("b", 1950), event("c", 1950));
        let view = TimeghostView::from(&ghost);

        assert!(!view.is_valid);
        assert!(view.verbose_factoid.is_none());
    }
}
