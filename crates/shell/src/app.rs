use crate::action::ShellAction;
use crate::router::{RouterAction, RouterFeature};
use shellstate_booking::{FlightService, TicketEffects, TicketFeature};
use shellstate_hydration::{
    HydrationAction, HydrationConfig, provide_lazy_state_hydration,
    provide_state_hydration_feature,
};
use shellstate_kernel::{Embeds, Providers, Store, StoreError};
use shellstate_persist::KeyValueStorage;

/// Routes below this prefix belong to the lazily loaded booking bundle.
pub const FLIGHT_BOOKING_PREFIX: &str = "/flight-booking";

/// Errors from driving the shell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Boot-time providers: the router slice and state hydration.
pub fn app_config<S>(config: HydrationConfig, storage: S, initial_url: &str) -> Providers<ShellAction>
where
    S: KeyValueStorage + 'static,
{
    Providers::new()
        .feature(RouterFeature::new(
            config.router_state_key.clone(),
            initial_url,
        ))
        .merge(provide_state_hydration_feature(config, storage))
}

/// Providers of the lazily loaded booking routes.
pub fn flight_routes<F>(service: F) -> Providers<ShellAction>
where
    F: FlightService + 'static,
{
    Providers::new()
        .feature(TicketFeature)
        .effect(TicketEffects::new(service))
        .merge(provide_lazy_state_hydration())
}

/// The running application: the store plus the route bundles not loaded yet.
pub struct Shell {
    store: Store<ShellAction>,
    booking: Option<Providers<ShellAction>>,
}

impl Shell {
    /// Boot at `initial_url`. The booking bundle is mounted on the first
    /// navigation below [`FLIGHT_BOOKING_PREFIX`], including this one.
    pub fn boot<S, F>(
        config: HydrationConfig,
        storage: S,
        service: F,
        initial_url: &str,
    ) -> Result<Self, ShellError>
    where
        S: KeyValueStorage + 'static,
        F: FlightService + 'static,
    {
        let store = Store::boot(app_config(config, storage, initial_url))?;
        let mut shell = Self {
            store,
            booking: Some(flight_routes(service)),
        };
        if is_booking_route(initial_url) {
            shell.mount_booking()?;
        }
        tracing::info!(url = initial_url, "shell booted");
        Ok(shell)
    }

    /// Navigate, loading the booking bundle on first entry into its routes.
    pub fn navigate(&mut self, url: &str) -> Result<(), ShellError> {
        self.store.dispatch(RouterAction::Navigated { url: url.into() });
        if is_booking_route(url) {
            self.mount_booking()?;
        }
        Ok(())
    }

    pub fn is_booking_mounted(&self) -> bool {
        self.booking.is_none()
    }

    /// The most recent hydration outcome, if any.
    pub fn hydration_outcome(&self) -> Option<&HydrationAction> {
        self.store
            .actions()
            .iter()
            .rev()
            .filter_map(|a| Embeds::<HydrationAction>::embedded(a))
            .find(|a| a.is_outcome())
    }

    pub fn store(&self) -> &Store<ShellAction> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store<ShellAction> {
        &mut self.store
    }

    fn mount_booking(&mut self) -> Result<(), ShellError> {
        if let Some(providers) = self.booking.take() {
            tracing::info!("mounting booking routes");
            self.store.mount(providers)?;
        }
        Ok(())
    }
}

fn is_booking_route(url: &str) -> bool {
    url == FLIGHT_BOOKING_PREFIX
        || url
            .strip_prefix(FLIGHT_BOOKING_PREFIX)
            .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
}
