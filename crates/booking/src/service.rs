use crate::model::Flight;
use chrono::{DateTime, Duration, Utc};

/// Errors from a flight data source.
#[derive(Debug, thiserror::Error)]
pub enum FlightServiceError {
    #[error("flight data source unavailable: {0}")]
    Unavailable(String),
}

/// Flight data access.
pub trait FlightService {
    fn find(&self, from: &str, to: &str, urgent: bool) -> Result<Vec<Flight>, FlightServiceError>;
}

/// A fixed timetable held in memory.
///
/// `urgent` keeps flights departing within 24 hours after `reference`.
#[derive(Debug, Clone)]
pub struct InMemoryFlightService {
    reference: DateTime<Utc>,
    flights: Vec<Flight>,
}

impl InMemoryFlightService {
    pub fn new(reference: DateTime<Utc>, flights: Vec<Flight>) -> Self {
        Self { reference, flights }
    }

    /// A small timetable around a fixed reference time.
    pub fn seeded() -> Self {
        let reference = DateTime::<Utc>::from_timestamp(1_791_964_800, 0).unwrap_or_default();
        let routes = [
            ("Hamburg", "Graz", 2),
            ("Hamburg", "Graz", 30),
            ("Hamburg", "Graz", 52),
            ("Graz", "Hamburg", 5),
            ("Graz", "Hamburg", 60),
            ("London", "Rom", 10),
            ("Madrid", "Oslo", 20),
            ("Barcelona", "Graz", 80),
        ];
        let flights = routes
            .iter()
            .enumerate()
            .map(|(i, (from, to, hours))| Flight {
                id: i as u64 + 1,
                from: (*from).into(),
                to: (*to).into(),
                date: to_iso(reference + Duration::hours(*hours)),
                delayed: false,
            })
            .collect();
        Self::new(reference, flights)
    }

    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    fn departs_soon(&self, flight: &Flight) -> bool {
        match DateTime::parse_from_rfc3339(&flight.date) {
            Ok(date) => {
                let date = date.with_timezone(&Utc);
                date >= self.reference && date <= self.reference + Duration::hours(24)
            }
            Err(e) => {
                tracing::warn!(id = flight.id, "unparseable departure date: {e}");
                false
            }
        }
    }
}

impl FlightService for InMemoryFlightService {
    fn find(&self, from: &str, to: &str, urgent: bool) -> Result<Vec<Flight>, FlightServiceError> {
        let from = from.trim();
        let to = to.trim();
        let found: Vec<Flight> = self
            .flights
            .iter()
            .filter(|f| f.from.eq_ignore_ascii_case(from) && f.to.eq_ignore_ascii_case(to))
            .filter(|f| !urgent || self.departs_soon(f))
            .cloned()
            .collect();
        tracing::debug!(from, to, urgent, count = found.len(), "flights found");
        Ok(found)
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub(crate) fn to_iso(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
