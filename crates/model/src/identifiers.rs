//! Newtype domain identifiers.
//!
//! Every server-assigned identity is a distinct newtype wrapping a string, so a
//! [`BattleId`] can never be passed where a [`SingleId`] is expected even though
//! both are opaque strings on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BlankIdentifierError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, and a
// Deserialize that applies the same blank check as new().
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl TryFrom<String> for $name {
            type Error = BlankIdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(BlankIdentifierError {
                    kind: stringify!($name),
                })
            }
        }

        impl $name {
            /// Creates a new identifier, returning `None` if the value is blank.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Identifies a registered member (the signed-in user or an opponent).
    MemberId
}

string_id! {
    /// Identifies a battle: a matched run between several members.
    BattleId
}

string_id! {
    /// Identifies a solo ("single" mode) run.
    SingleId
}

// ---------------------------------------------------------------------------
// Request correlation
// ---------------------------------------------------------------------------

/// Correlates the log events of one remote call.
///
/// Generated fresh for every request issued through the response adapter and
/// attached to its tracing span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(BattleId::new("").is_none());
        assert!(SingleId::new("   ").is_none());
        assert_eq!(MemberId::new("m-1").map(|id| id.to_string()), Some("m-1".to_owned()));
    }

    #[test]
    fn identifiers_serialise_as_plain_strings() {
        let id = BattleId::new("b-42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"b-42\"");
    }

    #[test]
    fn blank_identifiers_are_rejected_when_decoding() {
        assert_eq!(
            serde_json::from_str::<BattleId>("\"b-42\"").unwrap(),
            BattleId::new("b-42").unwrap()
        );

        let error = serde_json::from_str::<BattleId>("\"  \"").unwrap_err();
        assert!(error.to_string().contains("BattleId must not be blank"), "{error}");
        assert!(serde_json::from_str::<MemberId>("\"\"").is_err());
    }
}
