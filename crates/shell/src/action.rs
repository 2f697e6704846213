use crate::router::RouterAction;
use shellstate_booking::TicketAction;
use shellstate_hydration::HydrationAction;
use shellstate_kernel::{Action, Embeds};

/// Every action the shell's store carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellAction {
    Hydration(HydrationAction),
    Router(RouterAction),
    Ticket(TicketAction),
}

impl Action for ShellAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::Hydration(action) => action.kind(),
            Self::Router(action) => action.kind(),
            Self::Ticket(action) => action.kind(),
        }
    }
}

macro_rules! embed {
    ($variant:ident, $inner:ty) => {
        impl From<$inner> for ShellAction {
            fn from(action: $inner) -> Self {
                Self::$variant(action)
            }
        }

        impl Embeds<$inner> for ShellAction {
            fn embedded(&self) -> Option<&$inner> {
                match self {
                    Self::$variant(action) => Some(action),
                    _ => None,
                }
            }
        }
    };
}

embed!(Hydration, HydrationAction);
embed!(Router, RouterAction);
embed!(Ticket, TicketAction);
