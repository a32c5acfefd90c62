//! Macros for ergonomic state machine construction.

/// Generate a fieldless state enum with its `State` and `Display`
/// implementations.
///
/// # Example
///
/// ```
/// use entry_tracker::core::State;
/// use entry_tracker::state_enum;
///
/// state_enum! {
///     pub enum PageState {
///         Idle,
///         Loading,
///         Watching,
///     }
/// }
///
/// assert_eq!(PageState::Loading.name(), "Loading");
/// assert_eq!(PageState::Watching.to_string(), "Watching");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Initial,
            Loading,
            Monitoring,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Monitoring.name(), "Monitoring");
    }

    #[test]
    fn state_enum_generates_display() {
        assert_eq!(TestState::Loading.to_string(), "Loading");
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            /// Documented states.
            pub enum PublicState {
                A,
                B,
            }
        }

        let state = PublicState::A;
        assert_ne!(state, PublicState::B);
    }
}
