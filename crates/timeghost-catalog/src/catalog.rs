//! In-memory event catalog loaded from CSV.
//!
//! [`Catalog`] is read-only once loaded. Selector runs take an owned
//! [`working_copy`](Catalog::working_copy) because the search consumes its
//! pool.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use timeghost_core::{Event, NOW_MARKER};
use tracing::{info, warn};

use crate::date::parse_date;
use crate::error::CatalogError;

/// One CSV row before validation.
#[derive(Debug, Deserialize)]
struct Record {
    description: String,
    date: String,
}

/// The loaded event catalog, in file order.
#[derive(Debug, Clone)]
pub struct Catalog {
    events: Vec<Event>,
}

impl Catalog {
    /// Load the catalog from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be opened, otherwise
    /// any error from [`Catalog::from_reader`].
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), events = catalog.len(), "event catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from any CSV source with a `description,date` header.
    ///
    /// Fields are trimmed. Slug collisions are logged, not rejected; lookups
    /// resolve to the first event with a given slug.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Csv`] for malformed CSV or missing columns.
    /// - [`CatalogError::EmptyDescription`] / [`CatalogError::InvalidDate`]
    ///   for bad records, with their line number.
    /// - [`CatalogError::Empty`] if there are no records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv.headers()?.clone();

        let mut events = Vec::new();
        for row in csv.records() {
            let row = row?;
            let line = row.position().map_or(0, csv::Position::line);
            let record: Record = row.deserialize(Some(&headers))?;

            if record.description.is_empty() {
                return Err(CatalogError::EmptyDescription { line });
            }
            let date = parse_date(&record.date).ok_or_else(|| CatalogError::InvalidDate {
                line,
                value: record.date.clone(),
            })?;
            events.push(Event::new(record.description, date));
        }

        if events.is_empty() {
            return Err(CatalogError::Empty);
        }

        warn_on_slug_collisions(&events);
        Ok(Self { events })
    }

    /// All events in file order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalog is empty. Loaded catalogs never are.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// An owned copy of the events for one selector run.
    pub fn working_copy(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Events sorted latest first. Events on the same instant keep file order.
    pub fn newest_first(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by(|a, b| b.date().cmp(a.date()));
        events
    }

    /// The first event with the given slug.
    pub fn find(&self, slug: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.url() == slug)
    }

    /// Resolve a slug to an event. `now` yields a fresh now sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownEvent`] if no event has the slug.
    pub fn resolve(&self, slug: &str) -> Result<Event, CatalogError> {
        if slug == NOW_MARKER {
            return Ok(Event::now());
        }
        self.find(slug)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownEvent(slug.to_owned()))
    }
}

fn warn_on_slug_collisions(events: &[Event]) {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(events.len());
    for event in events {
        if let Some(existing) = seen.get(event.url()) {
            warn!(
                slug = event.url(),
                kept = *existing,
                shadowed = event.description(),
                "duplicate event slug"
            );
        } else {
            seen.insert(event.url(), event.description());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CSV: &str = "\
description,date
Declaration of Independence,1776-07-04
moon landing,1969-07-20T20:17:00Z
fall of the Berlin Wall,1989-11-09
";

    fn catalog() -> Catalog {
        Catalog::from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn loads_records_in_file_order() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        let names: Vec<&str> = catalog.events().iter().map(Event::description).collect();
        assert_eq!(
            names,
            ["Declaration of Independence", "moon landing", "fall of the Berlin Wall"]
        );
    }

    #[test]
    fn newest_first_reverses_chronology() {
        let catalog = catalog();
        let newest: Vec<&str> = catalog
            .newest_first()
            .into_iter()
            .map(Event::description)
            .collect();
        assert_eq!(
            newest,
            ["fall of the Berlin Wall", "moon landing", "Declaration of Independence"]
        );
    }

    #[test]
    fn find_by_slug() {
        let catalog = catalog();
        let event = catalog.find("moon-landing").unwrap();
        assert_eq!(event.description(), "moon landing");
        assert!(catalog.find("moon").is_none());
    }

    #[test]
    fn resolve_now_and_unknown() {
        let catalog = catalog();
        assert!(catalog.resolve("now").unwrap().is_now());
        assert!(matches!(
            catalog.resolve("no-such-event"),
            Err(CatalogError::UnknownEvent(slug)) if slug == "no-such-event"
        ));
    }

    #[test]
    fn working_copy_is_independent() {
        let catalog = catalog();
        let mut copy = catalog.working_copy();
        copy.clear();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn duplicate_slugs_resolve_to_first() {
        let csv = "description,date\nMoon landing!,1969-07-20\nmoon landing,1969-07-21\n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.find("moon-landing").unwrap().description(),
            "Moon landing!"
        );
    }

    #[test]
    fn bad_date_reports_line() {
        let csv = "description,date\ngood,1900-01-01\nbad,someday\n";
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidDate { line: 3, ref value } if value == "someday"
        ));
    }

    #[test]
    fn empty_description_is_rejected() {
        let csv = "description,date\n  ,1900-01-01\n";
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyDescription { line: 2 }));
    }

    #[test]
    fn header_only_is_empty() {
        let err = Catalog::from_reader("description,date\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let err = Catalog::from_reader("description\nlonely\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Csv(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Catalog::from_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
