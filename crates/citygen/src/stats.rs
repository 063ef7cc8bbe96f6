use std::collections::BTreeMap;

use crate::buildings::BuildingType;
use crate::city_layout::CityLayout;

/// Aggregate numbers about a generated city, for logs and sidebars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSummary {
    pub districts: usize,
    pub buildings: usize,
    pub building_types: BTreeMap<BuildingType, usize>,
    pub vertical_roads: usize,
    pub horizontal_roads: usize,
    /// Path of the tallest building; the first one wins ties.
    pub tallest: Option<String>,
    pub total_lines: u64,
    pub frequently_updated: usize,
}

impl LayoutSummary {
    pub fn from_layout(layout: &CityLayout) -> Self {
        let mut summary = Self {
            districts: layout.districts.len(),
            buildings: layout.buildings.len(),
            ..Default::default()
        };

        let mut tallest_height = f32::NEG_INFINITY;
        for building in &layout.buildings {
            *summary
                .building_types
                .entry(building.building_type)
                .or_default() += 1;
            summary.total_lines += u64::from(building.file.lines);
            if building.file.is_frequently_updated {
                summary.frequently_updated += 1;
            }
            if building.height > tallest_height {
                tallest_height = building.height;
                summary.tallest = Some(building.file.path.clone());
            }
        }

        summary.vertical_roads = layout.roads.iter().filter(|r| r.is_vertical()).count();
        summary.horizontal_roads = layout.roads.len() - summary.vertical_roads;
        summary
    }

    pub fn count(&self, building_type: BuildingType) -> usize {
        self.building_types.get(&building_type).copied().unwrap_or(0)
    }
}
