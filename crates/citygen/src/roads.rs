//! Road network synthesis.
//!
//! Roads are full-span center-lines. Every district proposes one X and one Z
//! coordinate per outer edge (only when it has neighbours) and per internal
//! block boundary, computed with the same offsets the building placer used,
//! so roads always fall into gaps the buildings left free. Proposals from
//! neighbouring districts coincide up to floating point error and are merged.

use bevy::math::Rect;
use serde::{Deserialize, Serialize};

use crate::districts::{districts_bounds, District};
use crate::layout_params::LayoutParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadOrientation {
    /// Runs north–south along Z.
    Vertical,
    /// Runs east–west along X.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
}

impl RoadSegment {
    pub fn orientation(&self) -> RoadOrientation {
        if self.depth > self.width {
            RoadOrientation::Vertical
        } else {
            RoadOrientation::Horizontal
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation() == RoadOrientation::Vertical
    }

    /// Coordinate across the road: `x` for vertical roads, `z` otherwise.
    pub fn center_line(&self) -> f32 {
        match self.orientation() {
            RoadOrientation::Vertical => self.x,
            RoadOrientation::Horizontal => self.z,
        }
    }
}

/// Road center-line proposals for one district, split by axis.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RoadProposals {
    pub xs: Vec<f32>,
    pub zs: Vec<f32>,
}

/// Centers of the gaps between consecutive blocks, measured from the start
/// of the content box. Block `k` starts after `k * block_size` cells and
/// `k` road allowances, so gap `k` is centered half an allowance before it.
fn block_boundary_offsets(blocks: usize, params: &LayoutParams) -> impl Iterator<Item = f32> + '_ {
    let block_span = params.block_size as f32 * params.cell_size();
    let allowance = params.road_allowance();
    (1..blocks).map(move |k| k as f32 * (block_span + allowance) - allowance / 2.0)
}

pub fn district_road_proposals(
    district: &District,
    include_outer_edges: bool,
    params: &LayoutParams,
) -> RoadProposals {
    let footprint = district.footprint(params);
    let half_allowance = params.road_allowance() / 2.0;
    let mut proposals = RoadProposals::default();

    if include_outer_edges {
        let rect = district.rect();
        proposals.xs.push(rect.min.x - half_allowance);
        proposals.xs.push(rect.max.x + half_allowance);
        proposals.zs.push(rect.min.y - half_allowance);
        proposals.zs.push(rect.max.y + half_allowance);
    }

    let origin_x = district.x - footprint.content_width / 2.0;
    let origin_z = district.z - footprint.content_depth / 2.0;
    proposals
        .xs
        .extend(block_boundary_offsets(footprint.block_cols, params).map(|o| origin_x + o));
    proposals
        .zs
        .extend(block_boundary_offsets(footprint.block_rows, params).map(|o| origin_z + o));

    proposals
}

/// Sort, then fold left: a value within `tolerance` of the running group
/// average joins the group, otherwise it opens a new one. Each group
/// collapses to its average. Consecutive outputs are always more than
/// `tolerance` apart.
pub fn merge_close_coordinates(mut values: Vec<f32>, tolerance: f32) -> Vec<f32> {
    values.retain(|v| v.is_finite());
    values.sort_by(f32::total_cmp);

    let mut merged: Vec<f32> = Vec::with_capacity(values.len());
    let mut sum = 0.0_f32;
    let mut count = 0_u32;

    for value in values {
        if count > 0 {
            let average = sum / count as f32;
            if value - average <= tolerance {
                sum += value;
                count += 1;
                continue;
            }
            merged.push(average);
        }
        sum = value;
        count = 1;
    }
    if count > 0 {
        merged.push(sum / count as f32);
    }
    merged
}

/// Area every road spans: all district footprints plus one road allowance
/// on each side so the outermost roads are fully covered.
pub fn city_extent(districts: &[District], params: &LayoutParams) -> Option<Rect> {
    districts_bounds(districts).map(|bounds| bounds.inflate(params.road_allowance()))
}

/// Deduplicated full-span roads separating districts from each other and
/// blocks from each other. Vertical roads come first, sorted by `x`, then
/// horizontal roads sorted by `z`.
pub fn synthesize_roads(districts: &[District], params: &LayoutParams) -> Vec<RoadSegment> {
    let Some(extent) = city_extent(districts, params) else {
        return Vec::new();
    };

    let include_outer_edges = districts.len() > 1;
    let mut xs = Vec::new();
    let mut zs = Vec::new();
    for district in districts {
        let proposals = district_road_proposals(district, include_outer_edges, params);
        xs.extend(proposals.xs);
        zs.extend(proposals.zs);
    }

    let xs = merge_close_coordinates(xs, params.road_merge_tolerance);
    let zs = merge_close_coordinates(zs, params.road_merge_tolerance);
    let center = extent.center();

    let vertical = xs.into_iter().map(|x| RoadSegment {
        x,
        z: center.y,
        width: params.road_width,
        depth: extent.height(),
    });
    let horizontal = zs.into_iter().map(|z| RoadSegment {
        x: center.x,
        z,
        width: extent.width(),
        depth: params.road_width,
    });
    vertical.chain(horizontal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::districts::DistrictFootprint;

    fn district(name: &str, n: usize, x: f32, z: f32, params: &LayoutParams) -> District {
        let fp = DistrictFootprint::for_file_count(n, params);
        District {
            name: name.to_string(),
            x,
            z,
            width: fp.width,
            depth: fp.depth,
            file_count: n,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_close_coordinates(Vec::new(), 0.8).is_empty());
    }

    #[test]
    fn test_merge_collapses_near_duplicates_to_average() {
        let merged = merge_close_coordinates(vec![10.0, 10.4, -3.0, 10.2], 0.8);
        assert_eq!(merged.len(), 2);
        assert!((merged[0] + 3.0).abs() < 1e-6);
        assert!((merged[1] - 10.2).abs() < 1e-4);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = merge_close_coordinates(vec![5.0, 0.0, 5.5, 1.0, 0.3], 0.8);
        let b = merge_close_coordinates(vec![0.3, 5.5, 1.0, 0.0, 5.0], 0.8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_merge_chain_keeps_spacing_above_tolerance() {
        let values: Vec<f32> = (0..40).map(|i| i as f32 * 0.35).collect();
        let merged = merge_close_coordinates(values, 0.8);
        for pair in merged.windows(2) {
            assert!(pair[1] - pair[0] > 0.8, "{pair:?}");
        }
    }

    #[test]
    fn test_merge_drops_non_finite() {
        let merged = merge_close_coordinates(vec![f32::NAN, 1.0, f32::INFINITY], 0.8);
        assert_eq!(merged, vec![1.0]);
    }

    #[test]
    fn test_no_districts_no_roads() {
        assert!(synthesize_roads(&[], &LayoutParams::default()).is_empty());
    }

    #[test]
    fn test_single_small_district_has_no_roads() {
        let params = LayoutParams::default();
        let only = district("/", 3, 0.0, 0.0, &params);
        assert!(synthesize_roads(&[only], &params).is_empty());
    }

    #[test]
    fn test_single_large_district_gets_block_roads() {
        let params = LayoutParams::default();
        // 100 files → 10x10 cells → 3x3 blocks → two roads per axis.
        let only = district("src", 100, 0.0, 0.0, &params);
        let roads = synthesize_roads(&[only], &params);
        let vertical = roads.iter().filter(|r| r.is_vertical()).count();
        assert_eq!(vertical, 2);
        assert_eq!(roads.len(), 4);
    }

    #[test]
    fn test_block_road_sits_in_gap_between_blocks() {
        let params = LayoutParams::default();
        let d = district("src", 25, 0.0, 0.0, &params);
        let fp = d.footprint(&params);
        assert_eq!(fp.block_cols, 2);
        let proposals = district_road_proposals(&d, false, &params);
        assert_eq!(proposals.xs.len(), 1);

        let origin = d.x - fp.content_width / 2.0;
        let last_cell_end = origin + params.block_size as f32 * params.cell_size();
        let next_cell_start = last_cell_end + params.road_allowance();
        let expected = (last_cell_end + next_cell_start) / 2.0;
        assert!((proposals.xs[0] - expected).abs() < 1e-4);
    }

    #[test]
    fn test_shared_edges_merge_into_one_road() {
        let params = LayoutParams::default();
        let left = district("a", 9, 0.0, 0.0, &params);
        let right_x = left.width + params.road_allowance();
        let right = district("b", 9, right_x, 0.0, &params);
        let roads = synthesize_roads(&[left, right], &params);
        let xs: Vec<f32> = roads
            .iter()
            .filter(|r| r.is_vertical())
            .map(RoadSegment::center_line)
            .collect();
        // Left edge, shared middle, right edge.
        assert_eq!(xs.len(), 3);
        let horizontal = roads.iter().filter(|r| !r.is_vertical()).count();
        assert_eq!(horizontal, 2);
    }

    #[test]
    fn test_roads_span_full_extent() {
        let params = LayoutParams::default();
        let a = district("a", 30, -20.0, 0.0, &params);
        let b = district("b", 4, 20.0, 5.0, &params);
        let extent = city_extent(&[a.clone(), b.clone()], &params).expect("extent");
        for road in synthesize_roads(&[a, b], &params) {
            if road.is_vertical() {
                assert!((road.depth - extent.height()).abs() < 1e-4);
                assert!((road.width - params.road_width).abs() < 1e-6);
            } else {
                assert!((road.width - extent.width()).abs() < 1e-4);
                assert!((road.depth - params.road_width).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_orientation() {
        let v = RoadSegment {
            x: 1.0,
            z: 0.0,
            width: 2.0,
            depth: 50.0,
        };
        let h = RoadSegment {
            x: 0.0,
            z: 3.0,
            width: 50.0,
            depth: 2.0,
        };
        assert_eq!(v.orientation(), RoadOrientation::Vertical);
        assert_eq!(h.orientation(), RoadOrientation::Horizontal);
        assert_eq!(v.center_line(), 1.0);
        assert_eq!(h.center_line(), 3.0);
    }
}
