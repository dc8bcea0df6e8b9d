//! Deterministic replay of pending arrivals onto a planet snapshot.
//!
//! The batch is validated as a whole before anything is applied, so a
//! rejected batch never yields a partially replayed planet. Accepted
//! arrivals are applied in `(arrival_time, arrival_id)` order, which makes
//! the result independent of the order the collaborator listed them in.

use std::collections::BTreeSet;

use tracing::debug;
use umbra_types::{Arrival, ArrivalId, Planet, WorldConstants};

use crate::ReplayError;
use crate::arrival::arrive;

/// A planet with every arrival up to a point in time applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    /// The planet as of its last applied arrival.
    pub planet: Planet,
    /// Arrivals applied, in application order.
    pub applied: Vec<ArrivalId>,
    /// Arrivals still in flight, in the order they will land.
    pub pending: Vec<ArrivalId>,
}

/// Sort arrivals by `(arrival_time, arrival_id)`.
pub fn order_arrivals(arrivals: &[Arrival]) -> Vec<&Arrival> {
    let mut ordered: Vec<&Arrival> = arrivals.iter().collect();
    ordered.sort_by_key(|arrival| (arrival.arrival_time, arrival.arrival_id));
    ordered
}

/// Apply every arrival landing at or before `now` to `planet`.
///
/// Arrivals after `now` are reported as pending and leave the planet
/// untouched. The returned planet's `last_updated` is that of its last
/// applied arrival; callers advance it further themselves.
///
/// # Errors
///
/// - [`ReplayError::WrongDestination`] if an arrival targets another planet.
/// - [`ReplayError::DuplicateArrival`] if an arrival id appears twice.
/// - [`ReplayError::OrderingViolation`] if an arrival lands before
///   `planet.last_updated`.
pub fn replay(
    planet: &Planet,
    arrivals: &[Arrival],
    now: u64,
    constants: &WorldConstants,
) -> Result<ReplayOutcome, ReplayError> {
    let ordered = order_arrivals(arrivals);
    validate(planet, &ordered)?;

    let due = ordered.partition_point(|arrival| arrival.arrival_time <= now);
    let (landed, in_flight) = ordered.split_at(due);

    let mut current = planet.clone();
    let mut applied = Vec::with_capacity(landed.len());
    for arrival in landed {
        let landing = arrive(&current, arrival, constants);
        debug!(
            planet = %planet.location_id,
            arrival = %arrival.arrival_id,
            at = arrival.arrival_time,
            outcome = ?landing.outcome,
            energy = landing.planet.energy,
            owner = %landing.planet.owner,
            "applied arrival"
        );
        current = landing.planet;
        applied.push(arrival.arrival_id);
    }

    Ok(ReplayOutcome {
        planet: current,
        applied,
        pending: in_flight.iter().map(|arrival| arrival.arrival_id).collect(),
    })
}

fn validate(planet: &Planet, ordered: &[&Arrival]) -> Result<(), ReplayError> {
    let mut seen = BTreeSet::new();
    for arrival in ordered {
        if arrival.to_planet != planet.location_id {
            return Err(ReplayError::WrongDestination {
                arrival: arrival.arrival_id,
                planet: planet.location_id,
                target: arrival.to_planet,
            });
        }
        if !seen.insert(arrival.arrival_id) {
            return Err(ReplayError::DuplicateArrival {
                arrival: arrival.arrival_id,
            });
        }
        if arrival.arrival_time < planet.last_updated {
            return Err(ReplayError::OrderingViolation {
                arrival: arrival.arrival_id,
                planet: planet.location_id,
                arrival_time: arrival.arrival_time,
                last_updated: planet.last_updated,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use umbra_types::{Address, ArrivalType, LocationId};

    use super::*;

    const HOME: LocationId = LocationId::from_bytes([3; 32]);
    const OWNER: Address = Address::from_bytes([1; 20]);
    const RAIDER: Address = Address::from_bytes([2; 20]);

    fn planet() -> Planet {
        Planet {
            location_id: HOME,
            owner: OWNER,
            energy: 100.0,
            energy_cap: 1_000.0,
            silver_cap: 100.0,
            defense: 100,
            last_updated: 100,
            ..Planet::default()
        }
    }

    fn arrival(id: u64, player: Address, energy: f64, at: u64) -> Arrival {
        Arrival {
            arrival_id: ArrivalId(id),
            player,
            from_planet: LocationId::from_bytes([4; 32]),
            to_planet: HOME,
            energy_arriving: energy,
            silver_moved: 0.0,
            departure_time: 0,
            arrival_time: at,
            arrival_type: ArrivalType::Normal,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn orders_by_time_then_id() {
        let arrivals = vec![
            arrival(3, OWNER, 1.0, 200),
            arrival(2, OWNER, 1.0, 150),
            arrival(1, OWNER, 1.0, 200),
        ];
        let ids: Vec<u64> = order_arrivals(&arrivals)
            .iter()
            .map(|a| a.arrival_id.0)
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn reinforcement_then_attack_in_time_order() {
        // Listed out of order; the reinforcement at 130 lands first.
        let arrivals = vec![
            arrival(2, RAIDER, 180.0, 150),
            arrival(1, OWNER, 100.0, 130),
        ];
        let outcome = replay(&planet(), &arrivals, 200, &WorldConstants::default()).unwrap();
        assert_eq!(outcome.applied, vec![ArrivalId(1), ArrivalId(2)]);
        assert!(outcome.pending.is_empty());
        assert_eq!(outcome.planet.owner, OWNER);
        assert!(close(outcome.planet.energy, 20.0));
        assert_eq!(outcome.planet.last_updated, 150);
    }

    #[test]
    fn future_arrivals_stay_pending() {
        let arrivals = vec![
            arrival(1, RAIDER, 500.0, 300),
            arrival(2, OWNER, 10.0, 120),
        ];
        let outcome = replay(&planet(), &arrivals, 200, &WorldConstants::default()).unwrap();
        assert_eq!(outcome.applied, vec![ArrivalId(2)]);
        assert_eq!(outcome.pending, vec![ArrivalId(1)]);
        assert_eq!(outcome.planet.owner, OWNER);
        assert_eq!(outcome.planet.last_updated, 120);
    }

    #[test]
    fn arrival_exactly_at_now_is_applied() {
        let arrivals = vec![arrival(1, OWNER, 10.0, 200)];
        let outcome = replay(&planet(), &arrivals, 200, &WorldConstants::default()).unwrap();
        assert_eq!(outcome.applied, vec![ArrivalId(1)]);
    }

    #[test]
    fn empty_batch_returns_snapshot() {
        let outcome = replay(&planet(), &[], 500, &WorldConstants::default()).unwrap();
        assert_eq!(outcome.planet, planet());
        assert!(outcome.applied.is_empty());
    }

    #[test]
    fn stale_arrival_is_an_ordering_violation() {
        let arrivals = vec![arrival(1, OWNER, 10.0, 120), arrival(7, RAIDER, 10.0, 99)];
        let result = replay(&planet(), &arrivals, 200, &WorldConstants::default());
        assert!(matches!(
            result,
            Err(ReplayError::OrderingViolation {
                arrival: ArrivalId(7),
                arrival_time: 99,
                last_updated: 100,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let arrivals = vec![arrival(1, OWNER, 10.0, 120), arrival(1, OWNER, 10.0, 130)];
        let result = replay(&planet(), &arrivals, 200, &WorldConstants::default());
        assert!(matches!(
            result,
            Err(ReplayError::DuplicateArrival {
                arrival: ArrivalId(1)
            })
        ));
    }

    #[test]
    fn misrouted_arrival_is_rejected() {
        let mut stray = arrival(4, OWNER, 10.0, 120);
        stray.to_planet = LocationId::from_bytes([9; 32]);
        let result = replay(&planet(), &[stray], 200, &WorldConstants::default());
        assert!(matches!(
            result,
            Err(ReplayError::WrongDestination {
                arrival: ArrivalId(4),
                ..
            })
        ));
    }
}
