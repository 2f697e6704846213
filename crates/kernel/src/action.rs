use std::fmt;

/// A message flowing through the store.
///
/// Applications define one action enum that embeds the action enums of
/// every feature they compose (see [`Embeds`]).
pub trait Action: Clone + fmt::Debug + 'static {
    /// Stable display name, conventionally `"[Source] Event name"`.
    fn kind(&self) -> &'static str;
}

/// An application action type that carries feature actions of type `T`.
///
/// Feature crates are written against `A: Embeds<TheirAction>` so they can
/// both emit (`From`) and recognise (`embedded`) their own actions without
/// knowing the application's full action enum.
pub trait Embeds<T>: From<T> {
    /// The embedded feature action, if this action is one.
    fn embedded(&self) -> Option<&T>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Inner {
        Ping,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Outer {
        Inner(Inner),
        Other,
    }

    impl From<Inner> for Outer {
        fn from(inner: Inner) -> Self {
            Self::Inner(inner)
        }
    }

    impl Embeds<Inner> for Outer {
        fn embedded(&self) -> Option<&Inner> {
            match self {
                Self::Inner(inner) => Some(inner),
                Self::Other => None,
            }
        }
    }

    impl Action for Outer {
        fn kind(&self) -> &'static str {
            match self {
                Self::Inner(Inner::Ping) => "[Inner] Ping",
                Self::Other => "[Outer] Other",
            }
        }
    }

    #[test]
    fn embedded_round_trips_through_from() {
        let outer = Outer::from(Inner::Ping);
        assert_eq!(outer.embedded(), Some(&Inner::Ping));
        assert_eq!(outer.kind(), "[Inner] Ping");
    }

    #[test]
    fn foreign_actions_are_not_embedded() {
        assert!(Outer::Other.embedded().is_none());
    }
}
