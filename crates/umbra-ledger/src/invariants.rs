//! Cap invariant checks for planet snapshots.
//!
//! Every bounded field of a planet must stay within `[0, cap]`. Growth and
//! replay clamp their outputs, so planets they produce pass by construction.
//! Raw ledger snapshots are a different matter: the check exists to flag a
//! collaborator handing over state that is already out of bounds.

use umbra_types::Planet;

/// A bounded planet field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoundedField {
    /// `energy` against `energy_cap`.
    Energy,
    /// `silver` against `silver_cap`.
    Silver,
}

/// One field outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapViolation {
    /// The offending field.
    pub field: BoundedField,
    /// Its value.
    pub value: f64,
    /// Its cap.
    pub cap: f64,
}

impl core::fmt::Display for CapViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} = {} outside [0, {}]", self.field, self.value, self.cap)
    }
}

/// The result of checking a planet's caps.
#[derive(Debug, Clone, PartialEq)]
pub enum CapCheck {
    /// Every field is within bounds.
    Within,
    /// One or more fields are out of bounds.
    Violations(Vec<CapViolation>),
}

impl CapCheck {
    /// Whether every field is within bounds.
    pub const fn is_within(&self) -> bool {
        matches!(self, Self::Within)
    }
}

/// Check every bounded field of `planet`.
pub fn check_caps(planet: &Planet) -> CapCheck {
    let violations: Vec<CapViolation> = [
        (BoundedField::Energy, planet.energy, planet.energy_cap),
        (BoundedField::Silver, planet.silver, planet.silver_cap),
    ]
    .into_iter()
    .filter(|&(_, value, cap)| !in_bounds(value, cap))
    .map(|(field, value, cap)| CapViolation { field, value, cap })
    .collect();

    if violations.is_empty() {
        CapCheck::Within
    } else {
        CapCheck::Violations(violations)
    }
}

fn in_bounds(value: f64, cap: f64) -> bool {
    // NaN fails both comparisons.
    value >= 0.0 && value <= cap
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(energy: f64, silver: f64) -> Planet {
        Planet {
            energy,
            energy_cap: 100.0,
            silver,
            silver_cap: 50.0,
            ..Planet::default()
        }
    }

    #[test]
    fn within_bounds_including_edges() {
        assert!(check_caps(&planet(0.0, 0.0)).is_within());
        assert!(check_caps(&planet(100.0, 50.0)).is_within());
    }

    #[test]
    fn overfull_energy_is_reported() {
        assert_eq!(
            check_caps(&planet(120.0, 10.0)),
            CapCheck::Violations(vec![CapViolation {
                field: BoundedField::Energy,
                value: 120.0,
                cap: 100.0,
            }])
        );
    }

    #[test]
    fn negative_and_nan_are_reported() {
        let check = check_caps(&planet(-1.0, f64::NAN));
        assert!(matches!(check, CapCheck::Violations(ref v) if v.len() == 2));
    }
}
