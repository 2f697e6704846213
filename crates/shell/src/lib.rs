//! Application shell: wires the router slice and hydration at boot, and mounts
//! the booking routes lazily on first navigation.

pub mod action;
pub mod app;
pub mod router;

pub use action::ShellAction;
pub use app::{FLIGHT_BOOKING_PREFIX, Shell, ShellError, app_config, flight_routes};
pub use router::{RouterAction, RouterFeature, RouterState};
