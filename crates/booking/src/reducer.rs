use crate::action::TicketAction;
use crate::model::Flight;
use serde::{Deserialize, Serialize};
use shellstate_kernel::{Embeds, Feature};

/// State tree key of the ticket slice.
pub const TICKET_FEATURE_KEY: &str = "ticket";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketState {
    pub flights: Vec<Flight>,
}

/// The ticket feature slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketFeature;

impl<A> Feature<A> for TicketFeature
where
    A: Embeds<TicketAction>,
{
    type State = TicketState;

    fn key(&self) -> &str {
        TICKET_FEATURE_KEY
    }

    fn reduce(&self, mut state: TicketState, action: &A) -> TicketState {
        match action.embedded() {
            Some(TicketAction::FlightsLoaded { flights }) => TicketState {
                flights: flights.clone(),
            },
            Some(TicketAction::FlightUpdate { flight }) => {
                if let Some(slot) = state.flights.iter_mut().find(|f| f.id == flight.id) {
                    *slot = flight.clone();
                }
                state
            }
            Some(TicketAction::FlightsClear) => TicketState::default(),
            Some(TicketAction::FlightsLoad { .. }) | None => state,
        }
    }
}
