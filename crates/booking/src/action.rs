use crate::model::{Flight, FlightFilter};

/// Ticket feature actions.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketAction {
    /// Ask the data source for flights; answered by `FlightsLoaded`.
    FlightsLoad { filter: FlightFilter },
    FlightsLoaded { flights: Vec<Flight> },
    FlightUpdate { flight: Flight },
    FlightsClear,
}

impl TicketAction {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FlightsLoad { .. } => "[Tickets] Flights load",
            Self::FlightsLoaded { .. } => "[Tickets] Flights loaded",
            Self::FlightUpdate { .. } => "[Tickets] Flight update",
            Self::FlightsClear => "[Tickets] Flights clear",
        }
    }
}
