//! Fixed-width identifier wrappers for ledger-tracked objects.
//!
//! Planets are addressed by a 256-bit content hash of their (private)
//! coordinates, players by a 160-bit account address. Both are strongly
//! typed so a location hash can never be passed where an owner is expected.
//!
//! Both render as lowercase hex. Addresses carry a `0x` prefix; location ids
//! do not, matching how the ledger reports them. Parsing accepts either form.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

/// Error returned when a hex identifier cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum IdParseError {
    /// The string was not valid hex of the expected width.
    #[error("invalid hex identifier: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Generates a fixed-width, hex-rendered identifier newtype.
macro_rules! define_hex_id {
    (
        $(#[$meta:meta])*
        $name:ident, $len:expr, $prefix:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(#[ts(type = "string")] pub [u8; $len]);

        impl $name {
            /// Width of the identifier in bytes.
            pub const LEN: usize = $len;

            /// Wrap raw bytes.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Borrow the raw bytes.
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Whether every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({self})", stringify!($name))
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = [0_u8; $len];
                hex::decode_to_slice(digits, &mut bytes)?;
                Ok(Self(bytes))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

define_hex_id! {
    /// Content-derived identifier of a planet: the hash of its coordinates.
    LocationId, 32, ""
}

define_hex_id! {
    /// Account address of a player.
    Address, 20, "0x"
}

impl Address {
    /// The zero address. A planet owned by it is unowned.
    pub const ZERO: Self = Self([0; 20]);
}

/// Ledger-assigned identifier of a queued arrival.
///
/// Ids are monotonically assigned by the ledger, which makes them a stable
/// tie-breaker when two arrivals land in the same second.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct ArrivalId(pub u64);

impl fmt::Display for ArrivalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ArrivalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
