use rand::Rng;

use super::classify::{choose_roof_type, choose_setback, classify};
use super::types::BuildingData;
use crate::districts::{District, DistrictFootprint};
use crate::layout_params::{HeightSource, LayoutParams};
use crate::repo::{estimate_lines_from_size, RepoFile};

pub const DEPTH_JITTER: std::ops::Range<f32> = 0.8..1.2;
pub const ACTIVE_EMISSIVE: std::ops::Range<f32> = 0.6..1.0;
pub const IDLE_EMISSIVE: std::ops::Range<f32> = 0.05..0.15;

/// Building height from the configured line metric.
pub fn building_height(file: &RepoFile, params: &LayoutParams) -> f32 {
    let lines = match params.height_source {
        HeightSource::Lines => file.lines,
        HeightSource::EstimatedFromSize => {
            estimate_lines_from_size(file.size, params.bytes_per_line)
        }
    };
    (lines as f32 * params.height_scale).clamp(params.min_height, params.max_height)
}

pub fn building_width(file: &RepoFile, params: &LayoutParams) -> f32 {
    (file.size as f32 * params.width_scale).clamp(params.min_width, params.max_width)
}

/// Offset of a cell's center from the start of the content box along one
/// axis. Every `block_size` cells a road allowance is skipped.
pub fn cell_offset(index: usize, params: &LayoutParams) -> f32 {
    let block = index / params.block_size.max(1);
    index as f32 * params.cell_size()
        + block as f32 * params.road_allowance()
        + params.cell_size() / 2.0
}

/// Grid cell `(col, row)` of the `index`-th building in a district.
pub fn grid_cell(index: usize, footprint: &DistrictFootprint) -> (usize, usize) {
    let cols = footprint.cols.max(1);
    (index % cols, index / cols)
}

/// Lay out one district's files on its block grid, centered on the
/// district. Draws jitter, glow and styling from `rng` in file order.
pub fn place_district_buildings<R: Rng + ?Sized>(
    files: &[&RepoFile],
    district: &District,
    params: &LayoutParams,
    rng: &mut R,
) -> Vec<BuildingData> {
    let footprint = DistrictFootprint::for_file_count(files.len(), params);
    let origin_x = district.x - footprint.content_width / 2.0;
    let origin_z = district.z - footprint.content_depth / 2.0;

    files
        .iter()
        .enumerate()
        .map(|(index, &file)| {
            let (col, row) = grid_cell(index, &footprint);
            let height = building_height(file, params);
            let width = building_width(file, params);
            let depth = (width * rng.gen_range(DEPTH_JITTER)).min(params.max_width);

            let emissive_intensity = if file.is_frequently_updated {
                rng.gen_range(ACTIVE_EMISSIVE)
            } else {
                rng.gen_range(IDLE_EMISSIVE)
            };

            let building_type = classify(height, width);
            let setback = choose_setback(building_type, rng);
            let roof_type = choose_roof_type(building_type, rng);
            let wall_tint = rng.gen::<f32>();

            BuildingData {
                file: file.clone(),
                height,
                width,
                depth,
                x: origin_x + cell_offset(col, params),
                y: height / 2.0,
                z: origin_z + cell_offset(row, params),
                emissive_intensity,
                building_type,
                has_setback: setback.has_setback,
                setback_ratio: setback.ratio,
                setback_height: setback.height,
                roof_type,
                wall_tint,
            }
        })
        .collect()
}
