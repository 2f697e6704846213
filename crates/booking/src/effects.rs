use crate::action::TicketAction;
use crate::service::FlightService;
use shellstate_kernel::{Action, Effect, EffectContext, Embeds};

/// Answers `FlightsLoad` with `FlightsLoaded` from the flight service.
#[derive(Debug)]
pub struct TicketEffects<F> {
    service: F,
}

impl<F> TicketEffects<F> {
    pub fn new(service: F) -> Self {
        Self { service }
    }
}

impl<A, F> Effect<A> for TicketEffects<F>
where
    A: Action + Embeds<TicketAction>,
    F: FlightService + 'static,
{
    fn name(&self) -> &'static str {
        "tickets"
    }

    fn on_action(&mut self, action: &A, ctx: &mut EffectContext<'_, A>) {
        let Some(TicketAction::FlightsLoad { filter }) = action.embedded() else {
            return;
        };
        match self.service.find(&filter.from, &filter.to, filter.urgent) {
            Ok(flights) => ctx.dispatch(TicketAction::FlightsLoaded { flights }),
            Err(e) => tracing::warn!(from = %filter.from, to = %filter.to, "flight search failed: {e}"),
        }
    }
}
