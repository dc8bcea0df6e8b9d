//! Ordered replay of pending arrivals for the Umbra reconciliation engine.
//!
//! The on-chain ledger stores a planet snapshot as of its last transaction
//! together with a list of fleets still travelling toward it. This crate
//! turns that pair into the planet as it stands at a given second, applying
//! exactly the arithmetic the ledger itself will apply when the arrivals are
//! processed.
//!
//! # Architecture
//!
//! - [`arrival`] -- Growth up to an arrival, then combat, reinforcement and
//!   silver transfer.
//! - [`replay`] -- Validation and `(arrival_time, arrival_id)` ordered replay
//!   of a batch.
//! - [`invariants`] -- Cap checks for snapshots coming from outside.
//!
//! # Replay Contract
//!
//! | Input                                   | Result                       |
//! |-----------------------------------------|------------------------------|
//! | arrival for another planet              | [`ReplayError::WrongDestination`] |
//! | arrival id seen twice                   | [`ReplayError::DuplicateArrival`] |
//! | arrival before `last_updated`           | [`ReplayError::OrderingViolation`] |
//! | arrival at or before `now`              | applied, in order            |
//! | arrival after `now`                     | reported as pending          |
//!
//! Replay never panics and never returns a partially applied planet.
//!
//! # Usage
//!
//! ```
//! use umbra_ledger::replay;
//! use umbra_types::{Planet, WorldConstants};
//!
//! let planet = Planet::default();
//! let outcome = replay(&planet, &[], 10, &WorldConstants::default());
//! assert!(outcome.is_ok());
//! ```

pub mod arrival;
pub mod invariants;
pub mod replay;

// Re-export primary types at crate root.
pub use arrival::{ArrivalOutcome, CONTRACT_PRECISION, Landing, arrive, damage, garrison_strength};
pub use invariants::{BoundedField, CapCheck, CapViolation, check_caps};
pub use replay::{ReplayOutcome, order_arrivals, replay};

use umbra_types::{ArrivalId, LocationId};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Reasons a batch of arrivals cannot be replayed onto a planet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// An arrival lands before the snapshot it would be applied to.
    ///
    /// The ledger has either already processed it or the collaborator
    /// handed over a snapshot newer than its arrival list.
    #[error(
        "arrival {arrival} lands at {arrival_time}, before planet {planet} was last updated at {last_updated}"
    )]
    OrderingViolation {
        /// The offending arrival.
        arrival: ArrivalId,
        /// The planet being replayed.
        planet: LocationId,
        /// When the arrival lands.
        arrival_time: u64,
        /// When the snapshot was taken.
        last_updated: u64,
    },

    /// The same arrival id appears more than once in a batch.
    #[error("arrival {arrival} appears more than once")]
    DuplicateArrival {
        /// The repeated id.
        arrival: ArrivalId,
    },

    /// An arrival targets a different planet.
    #[error("arrival {arrival} targets {target}, not {planet}")]
    WrongDestination {
        /// The offending arrival.
        arrival: ArrivalId,
        /// The planet being replayed.
        planet: LocationId,
        /// Where the arrival is actually headed.
        target: LocationId,
    },
}
