//! Environment classification for located planets.
//!
//! A coordinate carries two noise values. The first (`perlin`) selects a
//! space type against three ascending thresholds; the second (`biomebase`)
//! selects one of three sub-biomes inside that space type:
//!
//! | perlin band            | space type  | biomebase < t1 | < t2      | otherwise |
//! |------------------------|-------------|----------------|-----------|-----------|
//! | `< perlin_threshold_1` | Nebula      | Ocean          | Forest    | Grassland |
//! | `< perlin_threshold_2` | Space       | Tundra         | Swamp     | Desert    |
//! | `< perlin_threshold_3` | Deep space  | Ice            | Wasteland | Lava      |
//! | otherwise              | Dead space  | Corrupted      | Corrupted | Corrupted |
//!
//! Classification is total: every pair of noise values maps to exactly one
//! biome. Threshold ordering is checked once, when constants are fetched.

use umbra_types::{Biome, Coordinate, LocationInfo, SpaceType, WorldConstants};

/// Number of sub-biomes per habitable space type.
const BIOMES_PER_SPACE_TYPE: u8 = 3;

/// Select the space type for a first noise value.
pub const fn space_type_from_perlin(perlin: u32, constants: &WorldConstants) -> SpaceType {
    if perlin < constants.perlin_threshold_1 {
        SpaceType::Nebula
    } else if perlin < constants.perlin_threshold_2 {
        SpaceType::Space
    } else if perlin < constants.perlin_threshold_3 {
        SpaceType::DeepSpace
    } else {
        SpaceType::DeadSpace
    }
}

/// Classify a coordinate into its biome.
pub const fn classify(coordinate: &Coordinate, constants: &WorldConstants) -> Biome {
    let space_type = space_type_from_perlin(coordinate.perlin, constants);
    biome_in(space_type, coordinate.biomebase, constants)
}

/// Classify a coordinate and bundle it with its space type and biome.
pub const fn locate(coordinate: Coordinate, constants: &WorldConstants) -> LocationInfo {
    let space_type = space_type_from_perlin(coordinate.perlin, constants);
    LocationInfo {
        coordinate,
        space_type,
        biome: biome_in(space_type, coordinate.biomebase, constants),
    }
}

/// Sub-biome of a space type for a second noise value.
const fn biome_in(space_type: SpaceType, biomebase: u32, constants: &WorldConstants) -> Biome {
    if matches!(space_type, SpaceType::DeadSpace) {
        return Biome::Corrupted;
    }

    // index() is at most 2 here, so neither operation can overflow.
    let coarse = space_type.index().saturating_mul(BIOMES_PER_SPACE_TYPE);
    let fine = if biomebase < constants.biome_threshold_1 {
        1
    } else if biomebase < constants.biome_threshold_2 {
        2
    } else {
        3
    };

    Biome::from_index(coarse.saturating_add(fine))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constants() -> WorldConstants {
        WorldConstants::default()
    }

    fn coord(perlin: u32, biomebase: u32) -> Coordinate {
        Coordinate {
            x: 0,
            y: 0,
            perlin,
            biomebase,
        }
    }

    #[test]
    fn perlin_bands_select_space_type() {
        let c = constants();
        assert_eq!(space_type_from_perlin(0, &c), SpaceType::Nebula);
        assert_eq!(space_type_from_perlin(13, &c), SpaceType::Nebula);
        assert_eq!(space_type_from_perlin(14, &c), SpaceType::Space);
        assert_eq!(space_type_from_perlin(15, &c), SpaceType::DeepSpace);
        assert_eq!(space_type_from_perlin(18, &c), SpaceType::DeepSpace);
        assert_eq!(space_type_from_perlin(19, &c), SpaceType::DeadSpace);
        assert_eq!(space_type_from_perlin(u32::MAX, &c), SpaceType::DeadSpace);
    }

    #[test]
    fn nebula_sub_biomes() {
        let c = constants();
        assert_eq!(classify(&coord(10, 0), &c), Biome::Ocean);
        assert_eq!(classify(&coord(10, 15), &c), Biome::Forest);
        assert_eq!(classify(&coord(10, 16), &c), Biome::Forest);
        assert_eq!(classify(&coord(10, 17), &c), Biome::Grassland);
    }

    #[test]
    fn space_and_deep_space_offsets() {
        let c = constants();
        assert_eq!(classify(&coord(14, 0), &c), Biome::Tundra);
        assert_eq!(classify(&coord(14, 16), &c), Biome::Swamp);
        assert_eq!(classify(&coord(14, 30), &c), Biome::Desert);
        assert_eq!(classify(&coord(16, 0), &c), Biome::Ice);
        assert_eq!(classify(&coord(16, 16), &c), Biome::Wasteland);
        assert_eq!(classify(&coord(16, 30), &c), Biome::Lava);
    }

    #[test]
    fn dead_space_ignores_biomebase() {
        let c = constants();
        for biomebase in [0, 15, 16, 17, u32::MAX] {
            assert_eq!(classify(&coord(25, biomebase), &c), Biome::Corrupted);
        }
    }

    #[test]
    fn locate_bundles_classification() {
        let c = constants();
        let info = locate(coord(14, 16), &c);
        assert_eq!(info.space_type, SpaceType::Space);
        assert_eq!(info.biome, Biome::Swamp);
        assert_eq!(info.coordinate, coord(14, 16));
    }
}
