//! District packing.
//!
//! Each top-level folder becomes a rectangular district whose footprint is
//! sized from its file count. Districts are laid out left-to-right in rows
//! that wrap at `max_row_width`, then the whole arrangement is shifted so
//! its bounding box is centered on the world origin. Placement only ever
//! extends the current row or opens a new one below every previous row, so
//! footprints cannot overlap.

use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::folder_groups::FolderGroup;
use crate::layout_params::LayoutParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub name: String,
    /// World-space center.
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub file_count: usize,
}

impl District {
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(Vec2::new(self.x, self.z), Vec2::new(self.width, self.depth))
    }

    pub fn footprint(&self, params: &LayoutParams) -> DistrictFootprint {
        DistrictFootprint::for_file_count(self.file_count, params)
    }
}

/// Grid geometry of one district, derived purely from its file count.
///
/// Buildings sit on a `cols x rows` grid of cells. Cells are grouped into
/// blocks of `block_size x block_size`, and one road allowance separates
/// neighbouring blocks. The content box is wrapped in a margin on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistrictFootprint {
    pub cols: usize,
    pub rows: usize,
    pub block_cols: usize,
    pub block_rows: usize,
    pub content_width: f32,
    pub content_depth: f32,
    pub width: f32,
    pub depth: f32,
}

impl DistrictFootprint {
    pub fn for_file_count(file_count: usize, params: &LayoutParams) -> Self {
        let (cols, rows) = grid_dimensions(file_count);
        let block = params.block_size.max(1);
        let block_cols = cols.div_ceil(block);
        let block_rows = rows.div_ceil(block);
        let content_width = span(cols, block_cols, params);
        let content_depth = span(rows, block_rows, params);
        Self {
            cols,
            rows,
            block_cols,
            block_rows,
            content_width,
            content_depth,
            width: content_width + 2.0 * params.district_margin,
            depth: content_depth + 2.0 * params.district_margin,
        }
    }
}

/// Square-ish grid for `n` items: `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`.
pub fn grid_dimensions(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let mut cols = (n as f64).sqrt().ceil() as usize;
    // Guard against sqrt rounding on perfect squares.
    while cols * cols < n {
        cols += 1;
    }
    while cols > 1 && (cols - 1) * (cols - 1) >= n {
        cols -= 1;
    }
    (cols, n.div_ceil(cols))
}

/// Length of `cells` cells split into `blocks` blocks with a road allowance
/// between consecutive blocks.
fn span(cells: usize, blocks: usize, params: &LayoutParams) -> f32 {
    cells as f32 * params.cell_size() + blocks.saturating_sub(1) as f32 * params.road_allowance()
}

/// Spacing between neighbouring districts: exactly one road allowance, so
/// the edge roads proposed by both neighbours land on the same line.
pub fn district_gap(params: &LayoutParams) -> f32 {
    params.road_allowance()
}

/// Pack folder groups into rows and center the result on the origin.
pub fn pack_districts(groups: &[FolderGroup<'_>], params: &LayoutParams) -> Vec<District> {
    let gap = district_gap(params);
    let mut districts = Vec::with_capacity(groups.len());

    let mut cursor_x = 0.0_f32;
    let mut cursor_z = 0.0_f32;
    let mut row_depth = 0.0_f32;
    let mut row_has_districts = false;

    for group in groups {
        let footprint = DistrictFootprint::for_file_count(group.files.len(), params);

        if row_has_districts && cursor_x + footprint.width > params.max_row_width {
            cursor_x = 0.0;
            cursor_z += row_depth + gap;
            row_depth = 0.0;
        }

        districts.push(District {
            name: group.folder.clone(),
            x: cursor_x + footprint.width / 2.0,
            z: cursor_z + footprint.depth / 2.0,
            width: footprint.width,
            depth: footprint.depth,
            file_count: group.files.len(),
        });

        cursor_x += footprint.width + gap;
        row_depth = row_depth.max(footprint.depth);
        row_has_districts = true;
    }

    if let Some(bounds) = districts_bounds(&districts) {
        let center = bounds.center();
        for district in &mut districts {
            district.x -= center.x;
            district.z -= center.y;
        }
    }

    districts
}

/// Bounding box of all district footprints (x → `Rect.x`, z → `Rect.y`).
pub fn districts_bounds(districts: &[District]) -> Option<Rect> {
    districts
        .iter()
        .map(District::rect)
        .reduce(|acc, rect| acc.union(rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::RepoFile;

    fn files(folder: &str, n: usize) -> Vec<RepoFile> {
        (0..n)
            .map(|i| RepoFile::from_path(&format!("{folder}/f{i}.rs"), 100, 10))
            .collect()
    }

    fn group<'a>(folder: &str, files: &'a [RepoFile]) -> FolderGroup<'a> {
        FolderGroup {
            folder: folder.to_string(),
            files: files.iter().collect(),
        }
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(grid_dimensions(0), (0, 0));
        assert_eq!(grid_dimensions(1), (1, 1));
        assert_eq!(grid_dimensions(3), (2, 2));
        assert_eq!(grid_dimensions(4), (2, 2));
        assert_eq!(grid_dimensions(5), (3, 2));
        assert_eq!(grid_dimensions(10), (4, 3));
        assert_eq!(grid_dimensions(16), (4, 4));
        assert_eq!(grid_dimensions(17), (5, 4));
        assert_eq!(grid_dimensions(1000), (32, 32));
    }

    #[test]
    fn test_footprint_single_block_has_no_internal_roads() {
        let params = LayoutParams::default();
        let fp = DistrictFootprint::for_file_count(16, &params);
        assert_eq!((fp.cols, fp.rows), (4, 4));
        assert_eq!((fp.block_cols, fp.block_rows), (1, 1));
        assert!((fp.content_width - 4.0 * params.cell_size()).abs() < 1e-4);
        assert!((fp.width - fp.content_width - 2.0 * params.district_margin).abs() < 1e-4);
    }

    #[test]
    fn test_footprint_inflated_by_block_roads() {
        let params = LayoutParams::default();
        // 5 columns → 2 blocks → one internal road allowance.
        let fp = DistrictFootprint::for_file_count(17, &params);
        assert_eq!((fp.cols, fp.rows), (5, 4));
        assert_eq!((fp.block_cols, fp.block_rows), (2, 1));
        let expected = 5.0 * params.cell_size() + params.road_allowance();
        assert!((fp.content_width - expected).abs() < 1e-4);
        assert!((fp.content_depth - 4.0 * params.cell_size()).abs() < 1e-4);
    }

    #[test]
    fn test_empty_groups_pack_to_nothing() {
        let params = LayoutParams::default();
        assert!(pack_districts(&[], &params).is_empty());
    }

    #[test]
    fn test_single_district_centered_at_origin() {
        let params = LayoutParams::default();
        let src = files("src", 3);
        let districts = pack_districts(&[group("src", &src)], &params);
        assert_eq!(districts.len(), 1);
        assert!(districts[0].x.abs() < 1e-4);
        assert!(districts[0].z.abs() < 1e-4);
        assert_eq!(districts[0].file_count, 3);
    }

    #[test]
    fn test_row_neighbours_separated_by_one_allowance() {
        let params = LayoutParams::default();
        let src = files("src", 10);
        let docs = files("docs", 2);
        let districts = pack_districts(&[group("src", &src), group("docs", &docs)], &params);
        let (a, b) = (&districts[0], &districts[1]);
        let gap = (b.x - b.width / 2.0) - (a.x + a.width / 2.0);
        assert!((gap - params.road_allowance()).abs() < 1e-4);
        // Rows are top-aligned.
        assert!(((a.z - a.depth / 2.0) - (b.z - b.depth / 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_rows_wrap_at_max_width() {
        let params = LayoutParams::default();
        let sets: Vec<Vec<RepoFile>> = (0..8).map(|i| files(&format!("d{i}"), 30)).collect();
        let groups: Vec<FolderGroup<'_>> = sets
            .iter()
            .enumerate()
            .map(|(i, f)| group(&format!("d{i}"), f))
            .collect();
        let districts = pack_districts(&groups, &params);

        let bounds = districts_bounds(&districts).expect("non-empty");
        assert!(bounds.width() <= params.max_row_width + 1e-3);
        let distinct_rows = {
            let mut zs: Vec<i32> = districts.iter().map(|d| d.z.round() as i32).collect();
            zs.dedup();
            zs.len()
        };
        assert!(distinct_rows > 1);
    }

    #[test]
    fn test_oversized_district_gets_its_own_row() {
        let params = LayoutParams {
            max_row_width: 10.0,
            ..Default::default()
        };
        let big = files("big", 100);
        let small = files("small", 1);
        let districts = pack_districts(&[group("big", &big), group("small", &small)], &params);
        assert!(districts[0].width > params.max_row_width);
        // The first row is not left empty: the big district starts at the
        // top of the arrangement and the small one wraps below it.
        let bounds = districts_bounds(&districts).expect("non-empty");
        assert!(((districts[0].z - districts[0].depth / 2.0) - bounds.min.y).abs() < 1e-4);
        assert!(districts[1].z > districts[0].z);
    }

    #[test]
    fn test_footprints_never_overlap() {
        let params = LayoutParams::default();
        let sets: Vec<Vec<RepoFile>> = [40, 17, 9, 9, 5, 3, 2, 1, 1]
            .iter()
            .enumerate()
            .map(|(i, &n)| files(&format!("d{i}"), n))
            .collect();
        let groups: Vec<FolderGroup<'_>> = sets
            .iter()
            .enumerate()
            .map(|(i, f)| group(&format!("d{i}"), f))
            .collect();
        let districts = pack_districts(&groups, &params);
        for (i, a) in districts.iter().enumerate() {
            for b in &districts[i + 1..] {
                let overlap = a.rect().intersect(b.rect());
                assert!(
                    overlap.width() <= 1e-4 || overlap.height() <= 1e-4,
                    "{} overlaps {}",
                    a.name,
                    b.name
                );
            }
        }
    }

    #[test]
    fn test_bounds_centered() {
        let params = LayoutParams::default();
        let a = files("a", 25);
        let b = files("b", 7);
        let c = files("c", 2);
        let districts = pack_districts(
            &[group("a", &a), group("b", &b), group("c", &c)],
            &params,
        );
        let center = districts_bounds(&districts).expect("non-empty").center();
        assert!(center.x.abs() < 1e-3);
        assert!(center.y.abs() < 1e-3);
    }
}
