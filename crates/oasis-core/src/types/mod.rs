//! # Domain Types
//!
//! Entity kinds for the three operating areas of the property.
//!
//! ## Entity Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  hotel        Room · Reservation · ServiceRequest                       │
//! │  restaurant   MenuItem · Order · DiningTable                            │
//! │  pool         PoolAccess · MaintenanceTask · PoolRental                 │
//! │               ChemistryReading (log entry, not a store entity)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every enumerated field (status, category, zone, type) is a [`Token`]:
//! a closed set of kebab-case strings with parse/format both ways. None of
//! them may collide with a filter sentinel (`all`, `tous`, `toutes`).

use thiserror::Error;

// =============================================================================
// Token Trait
// =============================================================================

/// A closed set of named values stored and filtered by their string token.
pub trait Token:
    Copy
    + Eq
    + std::fmt::Debug
    + std::fmt::Display
    + std::str::FromStr<Err = UnknownToken>
    + 'static
{
    /// Every value, in declaration order.
    const ALL: &'static [Self];
    /// Every token, parallel to `ALL`.
    const TOKENS: &'static [&'static str];

    fn as_str(&self) -> &'static str;
}

/// A string that is not a token of the expected set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: '{value}'")]
pub struct UnknownToken {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a [`Token`] enum with serde, ts-rs, `Display` and `FromStr`.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, ts_rs::TS,
        )]
        #[ts(export)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $token)] $variant, )+
        }

        impl $crate::types::Token for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];
            const TOKENS: &'static [&'static str] = &[$($token),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::types::Token::as_str(self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::types::UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $token => Ok($name::$variant), )+
                    other => Err($crate::types::UnknownToken {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub mod hotel;
pub mod pool;
pub mod restaurant;

pub use hotel::*;
pub use pool::*;
pub use restaurant::*;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::is_sentinel;

    fn all_tokens() -> Vec<&'static str> {
        [
            RoomStatus::TOKENS,
            ReservationStatus::TOKENS,
            ServiceType::TOKENS,
            Priority::TOKENS,
            RequestStatus::TOKENS,
            MenuCategory::TOKENS,
            OrderSource::TOKENS,
            OrderStatus::TOKENS,
            Zone::TOKENS,
            TableStatus::TOKENS,
            AccessType::TOKENS,
            AccessStatus::TOKENS,
            MaintenanceType::TOKENS,
            MaintenancePriority::TOKENS,
            MaintenanceStatus::TOKENS,
            RentalType::TOKENS,
            RentalStatus::TOKENS,
            Level::TOKENS,
        ]
        .concat()
    }

    #[test]
    fn test_no_token_collides_with_sentinel() {
        for token in all_tokens() {
            assert!(!is_sentinel(token), "token '{token}' is a filter sentinel");
        }
    }

    #[test]
    fn test_token_round_trip_through_display() {
        for status in ReservationStatus::ALL {
            let parsed: ReservationStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, *status);
        }
        assert_eq!(ReservationStatus::CheckedIn.as_str(), "checked-in");
    }

    #[test]
    fn test_unknown_token() {
        let err = "sleeping".parse::<RoomStatus>().unwrap_err();
        assert_eq!(err.kind, "room status");
        assert_eq!(err.to_string(), "Unknown room status: 'sleeping'");
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&ServiceType::RoomService).unwrap();
        assert_eq!(json, "\"room-service\"");
        let parsed: AccessType = serde_json::from_str("\"day-pass\"").unwrap();
        assert_eq!(parsed, AccessType::DayPass);
    }
}
