//! Structural invariant checks for generated layouts.
//!
//! Placement guarantees these by construction; the checks exist so the
//! store and the integration tests can confirm it on real inputs. Each
//! violation is counted rather than reported individually.

use std::collections::HashMap;

use crate::buildings::BuildingData;
use crate::city_layout::CityLayout;
use crate::districts::districts_bounds;
use crate::folder_groups::folder_key;
use crate::layout_params::LayoutParams;
use crate::roads::RoadOrientation;

/// Slack for floating point comparisons, in world units.
const EPSILON: f32 = 1e-3;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LayoutViolations {
    /// Pairs of buildings in one district with intersecting footprints.
    pub overlapping_buildings: u32,
    /// Buildings whose footprint leaves their district, or whose district
    /// is missing from the layout.
    pub buildings_outside_district: u32,
    /// Distance of the district bounding box center from the origin, when
    /// larger than the tolerance.
    pub off_center: Option<f32>,
    /// Same-orientation road pairs closer than the merge tolerance.
    pub crowded_roads: u32,
    /// `buildings.len() != min(input_files, max_buildings)`.
    pub capacity_mismatch: bool,
}

impl LayoutViolations {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    pub fn total(&self) -> u32 {
        self.overlapping_buildings
            + self.buildings_outside_district
            + self.crowded_roads
            + u32::from(self.off_center.is_some())
            + u32::from(self.capacity_mismatch)
    }
}

pub fn check_layout(
    layout: &CityLayout,
    input_files: usize,
    params: &LayoutParams,
) -> LayoutViolations {
    let mut violations = LayoutViolations::default();

    let mut by_district: HashMap<&str, Vec<&BuildingData>> = HashMap::new();
    for building in &layout.buildings {
        by_district
            .entry(folder_key(&building.file.folder))
            .or_default()
            .push(building);
    }

    for (name, buildings) in &by_district {
        let Some(district) = layout.district(name) else {
            violations.buildings_outside_district += buildings.len() as u32;
            continue;
        };
        let bounds = district.rect().inflate(EPSILON);
        for (i, a) in buildings.iter().enumerate() {
            let footprint = a.footprint();
            if !(bounds.contains(footprint.min) && bounds.contains(footprint.max)) {
                violations.buildings_outside_district += 1;
            }
            for b in &buildings[i + 1..] {
                let overlap = footprint.intersect(b.footprint());
                if overlap.width() > EPSILON && overlap.height() > EPSILON {
                    violations.overlapping_buildings += 1;
                }
            }
        }
    }

    if let Some(bounds) = districts_bounds(&layout.districts) {
        let offset = bounds.center().length();
        if offset > EPSILON {
            violations.off_center = Some(offset);
        }
    }

    for orientation in [RoadOrientation::Vertical, RoadOrientation::Horizontal] {
        let mut lines: Vec<f32> = layout
            .roads
            .iter()
            .filter(|r| r.orientation() == orientation)
            .map(|r| r.center_line())
            .collect();
        lines.sort_by(f32::total_cmp);
        violations.crowded_roads += lines
            .windows(2)
            .filter(|pair| pair[1] - pair[0] < params.road_merge_tolerance)
            .count() as u32;
    }

    violations.capacity_mismatch =
        layout.buildings.len() != input_files.min(params.max_buildings);

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city_layout::generate_city_layout;
    use crate::repo::{RepoData, RepoFile};
    use crate::roads::RoadSegment;

    fn repo(n: usize) -> RepoData {
        RepoData {
            owner: "octo".to_string(),
            repo: "checks".to_string(),
            files: (0..n)
                .map(|i| {
                    RepoFile::from_path(&format!("pkg{}/f{i}.rs", i % 5), (i as u64 * 613) % 8000, 20)
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generated_layout_is_clean() {
        let params = LayoutParams::default();
        let data = repo(180);
        let layout = generate_city_layout(&data, &params);
        let violations = check_layout(&layout, data.files.len(), &params);
        assert!(violations.is_clean(), "{violations:?}");
        assert_eq!(violations.total(), 0);
    }

    #[test]
    fn test_detects_overlap_and_escape() {
        let params = LayoutParams::default();
        let data = repo(20);
        let mut layout = generate_city_layout(&data, &params);
        let (x, z) = (layout.buildings[0].x, layout.buildings[0].z);
        layout.buildings[1].x = x;
        layout.buildings[1].z = z;
        layout.buildings[2].x += 500.0;

        let violations = check_layout(&layout, data.files.len(), &params);
        assert!(violations.overlapping_buildings >= 1);
        assert!(violations.buildings_outside_district >= 1);
        assert!(!violations.is_clean());
    }

    #[test]
    fn test_detects_off_center_and_crowded_roads() {
        let params = LayoutParams::default();
        let data = repo(60);
        let mut layout = generate_city_layout(&data, &params);
        for district in &mut layout.districts {
            district.x += 3.0;
        }
        let mut twin: RoadSegment = layout.roads[0].clone();
        twin.x += 0.1;
        layout.roads.push(twin);

        let violations = check_layout(&layout, data.files.len(), &params);
        assert!(violations.off_center.is_some());
        assert_eq!(violations.crowded_roads, 1);
    }

    #[test]
    fn test_detects_capacity_mismatch() {
        let params = LayoutParams::default();
        let data = repo(10);
        let mut layout = generate_city_layout(&data, &params);
        layout.buildings.pop();
        let violations = check_layout(&layout, data.files.len(), &params);
        assert!(violations.capacity_mismatch);
    }
}
