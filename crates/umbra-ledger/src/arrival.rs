//! Applying a single arrival to its destination planet.
//!
//! ## Arrival flow
//!
//! 1. Grow the planet up to the arrival second.
//! 2. Resolve the energy carried:
//!    - **Destroyed planet**: nothing lands, silver included.
//!    - **Sender owns the planet**: energy is added.
//!    - **Wormhole, foreign planet**: no energy lands.
//!    - **Otherwise**: combat. Damage is `arriving * 100 / defense`,
//!      scaled to contract precision before flooring, exactly as the ledger
//!      computes it. If damage exceeds the defenders,
//!      the sender captures the planet and the surplus, scaled back by
//!      defense, garrisons it. Otherwise the defenders lose `damage`.
//! 3. Add the silver carried, capped at `silver_cap`.
//! 4. Clamp, and make the result the new growth checkpoint.

use umbra_types::{Arrival, ArrivalType, Planet, WorldConstants};
use umbra_world::{advance, clamp_to_cap};

/// Fixed-point scale the ledger truncates combat quantities to.
pub const CONTRACT_PRECISION: f64 = 1_000.0;

/// Percent base that `defense` is expressed in.
const PERCENT: f64 = 100.0;

/// What an arrival did to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrivalOutcome {
    /// The sender owned the planet; energy was added.
    Reinforced,
    /// A hostile fleet failed to take the planet.
    Defended,
    /// A hostile fleet took the planet.
    Captured,
    /// A wormhole delivered silver only.
    SilverOnly,
    /// The planet is destroyed; nothing landed.
    Absorbed,
}

/// The destination planet after an arrival, with what happened to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Landing {
    /// The planet as of the arrival second.
    pub planet: Planet,
    /// The effect the arrival had.
    pub outcome: ArrivalOutcome,
}

/// Energy an attacking fleet removes from the defenders.
///
/// `floor(arriving * 1000 * 100 / defense) / 1000`. Defense below one percent
/// counts as one percent.
pub fn damage(energy_arriving: f64, defense: u32) -> f64 {
    let defense = f64::from(defense.max(1));
    (energy_arriving * CONTRACT_PRECISION * PERCENT / defense).floor() / CONTRACT_PRECISION
}

/// Energy the defenders are worth against an attacker.
///
/// `floor(energy * 1000 * defense / 100) / 1000`.
pub fn garrison_strength(energy: f64, defense: u32) -> f64 {
    (energy * CONTRACT_PRECISION * f64::from(defense) / PERCENT).floor() / CONTRACT_PRECISION
}

/// Land `arrival` on `planet`.
///
/// The caller guarantees `arrival` targets `planet` and does not precede
/// `planet.last_updated`; [`replay`](crate::replay::replay) validates both.
pub fn arrive(planet: &Planet, arrival: &Arrival, constants: &WorldConstants) -> Landing {
    let mut next = advance(planet, arrival.arrival_time, constants);

    let outcome = if next.destroyed {
        ArrivalOutcome::Absorbed
    } else {
        let outcome = land_energy(&mut next, arrival);
        next.silver = clamp_to_cap(next.silver + arrival.silver_moved, next.silver_cap);
        outcome
    };

    next.energy = clamp_to_cap(next.energy, next.energy_cap);
    next.last_updated = next.last_updated.max(arrival.arrival_time);
    next.checkpoint = None;

    Landing {
        planet: next,
        outcome,
    }
}

fn land_energy(planet: &mut Planet, arrival: &Arrival) -> ArrivalOutcome {
    if arrival.player == planet.owner {
        planet.energy += arrival.energy_arriving;
        return ArrivalOutcome::Reinforced;
    }

    if arrival.arrival_type == ArrivalType::Wormhole {
        return ArrivalOutcome::SilverOnly;
    }

    let hit = damage(arrival.energy_arriving, planet.defense);
    if hit > planet.energy {
        let held = garrison_strength(planet.energy, planet.defense);
        planet.owner = arrival.player;
        planet.energy = arrival.energy_arriving - held;
        ArrivalOutcome::Captured
    } else {
        planet.energy -= hit;
        ArrivalOutcome::Defended
    }
}

#[cfg(test)]
mod tests {
    use umbra_types::{Address, ArrivalId, LocationId};

    use super::*;

    const DEFENDER: Address = Address::from_bytes([1; 20]);
    const ATTACKER: Address = Address::from_bytes([2; 20]);

    fn planet() -> Planet {
        Planet {
            location_id: LocationId::from_bytes([5; 32]),
            owner: DEFENDER,
            energy: 100.0,
            energy_cap: 1_000.0,
            energy_growth: 0.0,
            silver: 10.0,
            silver_cap: 50.0,
            defense: 100,
            last_updated: 100,
            ..Planet::default()
        }
    }

    fn arrival(player: Address, energy: f64, silver: f64) -> Arrival {
        Arrival {
            arrival_id: ArrivalId(1),
            player,
            from_planet: LocationId::from_bytes([6; 32]),
            to_planet: LocationId::from_bytes([5; 32]),
            energy_arriving: energy,
            silver_moved: silver,
            departure_time: 50,
            arrival_time: 120,
            arrival_type: ArrivalType::Normal,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn damage_scales_with_defense() {
        assert!(close(damage(100.0, 100), 100.0));
        assert!(close(damage(100.0, 200), 50.0));
        assert!(close(damage(100.0, 50), 200.0));
        assert!(close(damage(10.0, 3), 333.333));
    }

    #[test]
    fn damage_floors_after_scaling_to_contract_precision() {
        // Flooring before scaling would give 200.005.
        assert!(close(damage(100.003, 50), 200.006));
        assert!(close(garrison_strength(200.0055, 50), 100.002));
    }

    #[test]
    fn capture_decided_at_contract_precision() {
        let weak = Planet {
            energy: 200.0055,
            defense: 50,
            ..planet()
        };
        let landing = arrive(&weak, &arrival(ATTACKER, 100.003, 0.0), &WorldConstants::default());
        assert_eq!(landing.outcome, ArrivalOutcome::Captured);
        assert_eq!(landing.planet.owner, ATTACKER);
        assert!(close(landing.planet.energy, 0.001));

        let sturdy = Planet {
            energy: 200.0065,
            ..weak
        };
        let landing = arrive(&sturdy, &arrival(ATTACKER, 100.003, 0.0), &WorldConstants::default());
        assert_eq!(landing.outcome, ArrivalOutcome::Defended);
        assert_eq!(landing.planet.owner, DEFENDER);
        assert!(close(landing.planet.energy, 0.0005));
    }

    #[test]
    fn zero_defense_is_treated_as_one_percent() {
        assert!(close(damage(1.0, 0), 100.0));
    }

    #[test]
    fn reinforcement_adds_energy_and_silver() {
        let landing = arrive(&planet(), &arrival(DEFENDER, 40.0, 15.0), &WorldConstants::default());
        assert_eq!(landing.outcome, ArrivalOutcome::Reinforced);
        assert!(close(landing.planet.energy, 140.0));
        assert!(close(landing.planet.silver, 25.0));
        assert_eq!(landing.planet.last_updated, 120);
        assert_eq!(landing.planet.checkpoint, None);
    }

    #[test]
    fn reinforcement_is_capped() {
        let landing = arrive(&planet(), &arrival(DEFENDER, 5_000.0, 500.0), &WorldConstants::default());
        assert!(close(landing.planet.energy, 1_000.0));
        assert!(close(landing.planet.silver, 50.0));
    }

    #[test]
    fn weak_attack_is_defended() {
        let landing = arrive(&planet(), &arrival(ATTACKER, 30.0, 0.0), &WorldConstants::default());
        assert_eq!(landing.outcome, ArrivalOutcome::Defended);
        assert_eq!(landing.planet.owner, DEFENDER);
        assert!(close(landing.planet.energy, 70.0));
    }

    #[test]
    fn equal_attack_leaves_owner_with_nothing() {
        let landing = arrive(&planet(), &arrival(ATTACKER, 100.0, 0.0), &WorldConstants::default());
        assert_eq!(landing.outcome, ArrivalOutcome::Defended);
        assert_eq!(landing.planet.owner, DEFENDER);
        assert!(close(landing.planet.energy, 0.0));
    }

    #[test]
    fn strong_attack_captures_with_surplus() {
        let landing = arrive(&planet(), &arrival(ATTACKER, 130.0, 0.0), &WorldConstants::default());
        assert_eq!(landing.outcome, ArrivalOutcome::Captured);
        assert_eq!(landing.planet.owner, ATTACKER);
        assert!(close(landing.planet.energy, 30.0));
    }

    #[test]
    fn high_defense_needs_more_energy() {
        let fortified = Planet {
            defense: 200,
            ..planet()
        };
        let repelled = arrive(&fortified, &arrival(ATTACKER, 150.0, 0.0), &WorldConstants::default());
        assert_eq!(repelled.outcome, ArrivalOutcome::Defended);
        assert!(close(repelled.planet.energy, 25.0));

        let taken = arrive(&fortified, &arrival(ATTACKER, 250.0, 0.0), &WorldConstants::default());
        assert_eq!(taken.outcome, ArrivalOutcome::Captured);
        assert!(close(taken.planet.energy, 50.0));
    }

    #[test]
    fn foreign_wormhole_moves_silver_only() {
        let mut wormhole = arrival(ATTACKER, 500.0, 5.0);
        wormhole.arrival_type = ArrivalType::Wormhole;
        let landing = arrive(&planet(), &wormhole, &WorldConstants::default());
        assert_eq!(landing.outcome, ArrivalOutcome::SilverOnly);
        assert_eq!(landing.planet.owner, DEFENDER);
        assert!(close(landing.planet.energy, 100.0));
        assert!(close(landing.planet.silver, 15.0));
    }

    #[test]
    fn destroyed_planet_absorbs_everything() {
        let ruined = Planet {
            destroyed: true,
            ..planet()
        };
        let landing = arrive(&ruined, &arrival(ATTACKER, 500.0, 5.0), &WorldConstants::default());
        assert_eq!(landing.outcome, ArrivalOutcome::Absorbed);
        assert_eq!(landing.planet.owner, DEFENDER);
        assert!(close(landing.planet.silver, 10.0));
        assert_eq!(landing.planet.last_updated, 120);
    }

    #[test]
    fn planet_grows_before_the_fleet_lands() {
        let growing = Planet {
            energy_growth: 250.0,
            ..planet()
        };
        let landing = arrive(&growing, &arrival(ATTACKER, 110.0, 0.0), &WorldConstants::default());
        // Twenty seconds of growth lifts the defenders past the fleet.
        assert_eq!(landing.outcome, ArrivalOutcome::Defended);
        assert!(landing.planet.energy > 0.0);
    }
}
