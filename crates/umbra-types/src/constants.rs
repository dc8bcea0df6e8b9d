//! Session-scoped world constants.
//!
//! Fetched once from the ledger when a reader is created and treated as
//! immutable afterwards. Every derivation (classification, growth, combat)
//! takes them as plain input.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Errors raised when fetched constants are unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstantsError {
    /// The space-type thresholds are not strictly ascending.
    #[error("perlin thresholds must ascend, got {0:?}")]
    PerlinThresholdsNotAscending([u32; 3]),

    /// The biome thresholds are not strictly ascending.
    #[error("biome thresholds must ascend, got {0:?}")]
    BiomeThresholdsNotAscending([u32; 2]),

    /// A doubling growth model with a zero period.
    #[error("doubling period must be at least one second")]
    ZeroDoublingPeriod,
}

/// The closed-form energy growth formula in force for a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GrowthModel {
    /// Logistic growth toward `energy_cap` at each planet's `energy_growth`
    /// rate. This is the ledger's own formula.
    #[default]
    Logistic,
    /// Energy doubles every `period_secs`, capped at `energy_cap`.
    Doubling {
        /// Seconds per doubling.
        period_secs: u64,
    },
}

/// Thresholds and formula selection for a world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldConstants {
    /// Version of the balance set these constants belong to.
    #[serde(default)]
    pub version: u32,
    /// Upper bound of the nebula band.
    pub perlin_threshold_1: u32,
    /// Upper bound of the space band.
    pub perlin_threshold_2: u32,
    /// Upper bound of the deep-space band; dead space starts here.
    pub perlin_threshold_3: u32,
    /// Upper bound of the low sub-biome band.
    pub biome_threshold_1: u32,
    /// Upper bound of the mid sub-biome band.
    pub biome_threshold_2: u32,
    /// Energy growth formula.
    #[serde(default)]
    pub growth: GrowthModel,
}

impl WorldConstants {
    /// Check that thresholds ascend and the growth model is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConstantsError`] found.
    pub const fn validate(&self) -> Result<(), ConstantsError> {
        if !(self.perlin_threshold_1 < self.perlin_threshold_2
            && self.perlin_threshold_2 < self.perlin_threshold_3)
        {
            return Err(ConstantsError::PerlinThresholdsNotAscending([
                self.perlin_threshold_1,
                self.perlin_threshold_2,
                self.perlin_threshold_3,
            ]));
        }
        if self.biome_threshold_1 >= self.biome_threshold_2 {
            return Err(ConstantsError::BiomeThresholdsNotAscending([
                self.biome_threshold_1,
                self.biome_threshold_2,
            ]));
        }
        if let GrowthModel::Doubling { period_secs: 0 } = self.growth {
            return Err(ConstantsError::ZeroDoublingPeriod);
        }
        Ok(())
    }
}

impl Default for WorldConstants {
    /// Thresholds of the public v0.6 round.
    fn default() -> Self {
        Self {
            version: 6,
            perlin_threshold_1: 14,
            perlin_threshold_2: 15,
            perlin_threshold_3: 19,
            biome_threshold_1: 15,
            biome_threshold_2: 17,
            growth: GrowthModel::Logistic,
        }
    }
}
