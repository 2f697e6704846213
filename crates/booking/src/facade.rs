//! Store-facing operations of the booking screens.

use crate::action::TicketAction;
use crate::model::{Flight, FlightFilter};
use crate::reducer::{TICKET_FEATURE_KEY, TicketState};
use crate::service::to_iso;
use chrono::{DateTime, Duration, Utc};
use shellstate_kernel::{Action, Embeds, Store, StoreError};

/// How far `delay` moves a departure.
pub const DELAY_MINUTES: i64 = 5;

/// Errors from booking operations.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("flight {0} is not loaded")]
    FlightNotFound(u64),
    #[error("flight {id} has an unparseable departure date: {source}")]
    InvalidDate {
        id: u64,
        #[source]
        source: chrono::ParseError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Currently loaded flights. Empty while the ticket feature is not mounted.
pub fn flights<A: Action>(store: &Store<A>) -> Result<Vec<Flight>, StoreError> {
    Ok(store
        .select::<TicketState>(TICKET_FEATURE_KEY)?
        .map(|state| state.flights)
        .unwrap_or_default())
}

/// Search flights. Returns `false` without dispatching when either endpoint
/// is blank.
pub fn search<A>(store: &mut Store<A>, filter: FlightFilter) -> bool
where
    A: Action + Embeds<TicketAction>,
{
    if !filter.is_complete() {
        return false;
    }
    store.dispatch(TicketAction::FlightsLoad { filter });
    true
}

pub fn update<A>(store: &mut Store<A>, flight: Flight)
where
    A: Action + Embeds<TicketAction>,
{
    store.dispatch(TicketAction::FlightUpdate { flight });
}

pub fn clear<A>(store: &mut Store<A>)
where
    A: Action + Embeds<TicketAction>,
{
    store.dispatch(TicketAction::FlightsClear);
}

/// Push a loaded flight's departure back by [`DELAY_MINUTES`] and mark it
/// delayed. Returns the updated flight.
pub fn delay<A>(store: &mut Store<A>, id: u64) -> Result<Flight, BookingError>
where
    A: Action + Embeds<TicketAction>,
{
    let flight = flights(store)?
        .into_iter()
        .find(|f| f.id == id)
        .ok_or(BookingError::FlightNotFound(id))?;
    let delayed = delayed_flight(&flight)?;
    update(store, delayed.clone());
    Ok(delayed)
}

fn delayed_flight(flight: &Flight) -> Result<Flight, BookingError> {
    let date = DateTime::parse_from_rfc3339(&flight.date)
        .map_err(|source| BookingError::InvalidDate {
            id: flight.id,
            source,
        })?
        .with_timezone(&Utc);
    Ok(Flight {
        date: to_iso(date + Duration::minutes(DELAY_MINUTES)),
        delayed: true,
        ..flight.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::TicketEffects;
    use crate::reducer::TicketFeature;
    use crate::service::{FlightService, FlightServiceError, InMemoryFlightService};
    use shellstate_kernel::Providers;

    #[derive(Debug, Clone, PartialEq)]
    enum AppAction {
        Ticket(TicketAction),
    }

    impl From<TicketAction> for AppAction {
        fn from(action: TicketAction) -> Self {
            Self::Ticket(action)
        }
    }

    impl Embeds<TicketAction> for AppAction {
        fn embedded(&self) -> Option<&TicketAction> {
            let Self::Ticket(action) = self;
            Some(action)
        }
    }

    impl Action for AppAction {
        fn kind(&self) -> &'static str {
            let Self::Ticket(action) = self;
            action.kind()
        }
    }

    struct Offline;

    impl FlightService for Offline {
        fn find(&self, _: &str, _: &str, _: bool) -> Result<Vec<Flight>, FlightServiceError> {
            Err(FlightServiceError::Unavailable("offline".into()))
        }
    }

    fn store() -> Store<AppAction> {
        Store::boot(
            Providers::new()
                .feature(TicketFeature)
                .effect(TicketEffects::new(InMemoryFlightService::seeded())),
        )
        .unwrap()
    }

    #[test]
    fn search_loads_flights_through_effect() {
        let mut store = store();
        assert!(search(&mut store, FlightFilter::new("Hamburg", "Graz")));
        assert_eq!(flights(&store).unwrap().len(), 3);
        let kinds: Vec<_> = store.actions().iter().map(|a| a.kind()).collect();
        assert_eq!(kinds, vec!["[Tickets] Flights load", "[Tickets] Flights loaded"]);
    }

    #[test]
    fn incomplete_search_dispatches_nothing() {
        let mut store = store();
        assert!(!search(&mut store, FlightFilter::new("Hamburg", "")));
        assert!(store.actions().is_empty());
    }

    #[test]
    fn failed_search_keeps_previous_flights() {
        let mut store = Store::<AppAction>::boot(
            Providers::new()
                .feature(TicketFeature)
                .effect(TicketEffects::new(Offline)),
        )
        .unwrap();
        assert!(search(&mut store, FlightFilter::new("Hamburg", "Graz")));
        assert!(flights(&store).unwrap().is_empty());
        assert_eq!(store.actions().len(), 1);
    }

    #[test]
    fn delay_moves_departure_five_minutes() {
        let mut store = store();
        search(&mut store, FlightFilter::new("London", "Rom"));
        let before = flights(&store).unwrap()[0].clone();
        let after = delay(&mut store, before.id).unwrap();

        let shift = DateTime::parse_from_rfc3339(&after.date).unwrap()
            - DateTime::parse_from_rfc3339(&before.date).unwrap();
        assert_eq!(shift, Duration::minutes(5));
        assert!(after.delayed);
        assert_eq!(flights(&store).unwrap()[0], after);
    }

    #[test]
    fn delay_unknown_flight_fails() {
        let mut store = store();
        assert!(matches!(
            delay(&mut store, 42),
            Err(BookingError::FlightNotFound(42))
        ));
    }

    #[test]
    fn clear_empties_loaded_flights() {
        let mut store = store();
        search(&mut store, FlightFilter::new("Graz", "Hamburg"));
        assert!(!flights(&store).unwrap().is_empty());
        clear(&mut store);
        assert!(flights(&store).unwrap().is_empty());
    }

    #[test]
    fn flights_empty_without_feature() {
        let store = Store::<AppAction>::boot(Providers::new()).unwrap();
        assert!(flights(&store).unwrap().is_empty());
    }
}
