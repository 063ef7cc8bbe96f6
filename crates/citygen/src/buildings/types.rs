use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::repo::RepoFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildingType {
    Skyscraper,
    Tower,
    Office,
    LowRise,
    Shed,
}

impl BuildingType {
    pub const ALL: [BuildingType; 5] = [
        BuildingType::Skyscraper,
        BuildingType::Tower,
        BuildingType::Office,
        BuildingType::LowRise,
        BuildingType::Shed,
    ];

    /// Only tall archetypes step back their upper floors.
    pub fn allows_setback(self) -> bool {
        matches!(self, BuildingType::Skyscraper | BuildingType::Tower)
    }

    pub fn name(self) -> &'static str {
        match self {
            BuildingType::Skyscraper => "skyscraper",
            BuildingType::Tower => "tower",
            BuildingType::Office => "office",
            BuildingType::LowRise => "low-rise",
            BuildingType::Shed => "shed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoofType {
    Flat,
    Antenna,
    Helipad,
    Mechanical,
}

/// A file rendered as a building: the original file plus derived geometry
/// and styling. `y` is `height / 2` so the base rests on the ground plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingData {
    #[serde(flatten)]
    pub file: RepoFile,
    pub height: f32,
    pub width: f32,
    pub depth: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub emissive_intensity: f32,
    pub building_type: BuildingType,
    pub has_setback: bool,
    /// Upper-section width as a fraction of the base. 1.0 without setback.
    pub setback_ratio: f32,
    /// Fraction of the height where the setback starts. 1.0 without setback.
    pub setback_height: f32,
    pub roof_type: RoofType,
    /// Per-building wall color variation in `[0, 1)`.
    pub wall_tint: f32,
}

impl BuildingData {
    /// Ground footprint (x → `Rect.x`, z → `Rect.y`).
    pub fn footprint(&self) -> Rect {
        Rect::from_center_size(
            Vec2::new(self.x, self.z),
            Vec2::new(self.width, self.depth),
        )
    }
}
