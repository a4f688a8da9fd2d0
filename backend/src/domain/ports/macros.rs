//! `define_port_error!`: declare a port's `thiserror` enum with one
//! snake_case constructor per variant.
//!
//! Every variant carries named fields; constructors take each field as
//! `impl Into<_>` so call sites can pass `&str` for `String` fields.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    /// Build this variant from its fields.
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePublishError {
            Timeout { millis: u64 } => "timed out after {millis} ms",
            Refused { topic: String, reason: String } => "{topic} refused: {reason}",
        }
    }

    #[rstest]
    fn numeric_fields_keep_their_type() {
        let err = SamplePublishError::timeout(250_u64);
        assert_eq!(err, SamplePublishError::Timeout { millis: 250 });
        assert_eq!(err.to_string(), "timed out after 250 ms");
    }

    #[rstest]
    fn string_fields_accept_borrowed_input() {
        let err = SamplePublishError::refused("notifications", "not leader");
        assert_eq!(err.to_string(), "notifications refused: not leader");
    }
}
