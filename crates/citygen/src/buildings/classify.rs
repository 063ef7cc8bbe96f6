use rand::Rng;

use super::types::{BuildingType, RoofType};

/// Chance that a skyscraper or tower gets a setback.
pub const SETBACK_PROBABILITY: f64 = 0.65;
pub const SETBACK_RATIO_RANGE: std::ops::Range<f32> = 0.55..0.80;
pub const SETBACK_HEIGHT_RANGE: std::ops::Range<f32> = 0.50..0.75;

/// Archetype from computed height and width.
pub fn classify(height: f32, width: f32) -> BuildingType {
    if height > 18.0 {
        BuildingType::Skyscraper
    } else if height > 10.0 && width <= 1.8 {
        BuildingType::Tower
    } else if height > 4.0 {
        BuildingType::Office
    } else if height > 1.5 {
        BuildingType::LowRise
    } else {
        BuildingType::Shed
    }
}

/// Cumulative roof thresholds per archetype; anything past the last
/// threshold is a flat roof.
fn roof_table(building_type: BuildingType) -> &'static [(f32, RoofType)] {
    match building_type {
        BuildingType::Skyscraper => &[
            (0.35, RoofType::Antenna),
            (0.55, RoofType::Helipad),
            (0.75, RoofType::Mechanical),
        ],
        BuildingType::Tower => &[(0.30, RoofType::Antenna), (0.50, RoofType::Mechanical)],
        BuildingType::Office => &[(0.25, RoofType::Mechanical)],
        BuildingType::LowRise | BuildingType::Shed => &[],
    }
}

/// Roof for a building of the given archetype. Always consumes one draw.
pub fn choose_roof_type<R: Rng + ?Sized>(building_type: BuildingType, rng: &mut R) -> RoofType {
    let roll: f32 = rng.gen();
    roof_table(building_type)
        .iter()
        .find(|(threshold, _)| roll < *threshold)
        .map(|&(_, roof)| roof)
        .unwrap_or(RoofType::Flat)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setback {
    pub has_setback: bool,
    pub ratio: f32,
    pub height: f32,
}

impl Setback {
    pub const NONE: Setback = Setback {
        has_setback: false,
        ratio: 1.0,
        height: 1.0,
    };
}

/// Roll a setback for eligible archetypes; others never draw.
pub fn choose_setback<R: Rng + ?Sized>(building_type: BuildingType, rng: &mut R) -> Setback {
    if !building_type.allows_setback() || !rng.gen_bool(SETBACK_PROBABILITY) {
        return Setback::NONE;
    }
    Setback {
        has_setback: true,
        ratio: rng.gen_range(SETBACK_RATIO_RANGE),
        height: rng.gen_range(SETBACK_HEIGHT_RANGE),
    }
}
