//! Flight booking: the ticket feature slice and everything around it.
//!
//! # Invariants
//! - The ticket slot holds only data (`Flight` records), so it round-trips
//!   through persistence unchanged.
//! - Data access happens in effects, never in the reducer.

pub mod action;
pub mod effects;
pub mod facade;
pub mod model;
pub mod reducer;
pub mod service;

pub use action::TicketAction;
pub use effects::TicketEffects;
pub use facade::BookingError;
pub use model::{Flight, FlightFilter};
pub use reducer::{TICKET_FEATURE_KEY, TicketFeature, TicketState};
pub use service::{FlightService, FlightServiceError, InMemoryFlightService};
