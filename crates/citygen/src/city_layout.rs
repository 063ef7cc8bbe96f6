//! Layout assembly: `RepoData -> CityLayout`.
//!
//! Runs the pipeline in dependency order (truncate, group, pack, place,
//! route) and computes the half-extent of the bounding square. Total over
//! its input: an empty repository yields an empty layout with the minimum
//! grid size. Invalid parameters are replaced by the defaults.

use std::borrow::Cow;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buildings::{place_district_buildings, BuildingData};
use crate::districts::{pack_districts, District};
use crate::folder_groups::{folder_key, group_by_folder};
use crate::layout_params::LayoutParams;
use crate::layout_rng::LayoutRng;
use crate::repo::RepoData;
use crate::roads::{synthesize_roads, RoadSegment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityLayout {
    /// Grouped by district, in district order.
    pub buildings: Vec<BuildingData>,
    pub districts: Vec<District>,
    pub roads: Vec<RoadSegment>,
    /// Half-extent of the square containing every building.
    pub grid_size: f32,
}

impl CityLayout {
    pub fn empty(params: &LayoutParams) -> Self {
        Self {
            buildings: Vec::new(),
            districts: Vec::new(),
            roads: Vec::new(),
            grid_size: params.min_grid_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn building(&self, path: &str) -> Option<&BuildingData> {
        self.buildings.iter().find(|b| b.file.path == path)
    }

    pub fn district(&self, name: &str) -> Option<&District> {
        self.districts.iter().find(|d| d.name == name)
    }

    pub fn buildings_in_district<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a BuildingData> + 'a {
        self.buildings
            .iter()
            .filter(move |b| folder_key(&b.file.folder) == name)
    }
}

/// Generate with an RNG seeded from the repository key.
pub fn generate_city_layout(data: &RepoData, params: &LayoutParams) -> CityLayout {
    let mut rng = LayoutRng::for_repo(&data.owner, &data.repo);
    generate_city_layout_with_rng(data, params, &mut rng)
}

/// Parameters the engine runs with: `params` if they validate, otherwise
/// `LayoutParams::default()`.
pub fn effective_params(params: &LayoutParams) -> Cow<'_, LayoutParams> {
    match params.validate() {
        Ok(()) => Cow::Borrowed(params),
        Err(e) => {
            warn!("citygen: {e}. Falling back to default layout parameters.");
            Cow::Owned(LayoutParams::default())
        }
    }
}

pub fn generate_city_layout_with_rng(
    data: &RepoData,
    params: &LayoutParams,
    rng: &mut LayoutRng,
) -> CityLayout {
    let params: &LayoutParams = &effective_params(params);
    let keep = data.files.len().min(params.max_buildings);
    if keep < data.files.len() {
        debug!(
            "citygen: {} has {} files, laying out the first {}",
            data.repo_key(),
            data.files.len(),
            keep
        );
    }
    let files = &data.files[..keep];

    let groups = group_by_folder(files);
    let districts = pack_districts(&groups, params);

    let mut buildings = Vec::with_capacity(keep);
    for (group, district) in groups.iter().zip(&districts) {
        buildings.extend(place_district_buildings(
            &group.files,
            district,
            params,
            &mut rng.0,
        ));
    }

    let roads = synthesize_roads(&districts, params);
    let grid_size = grid_size(&buildings, params);

    debug!(
        "citygen: {} → {} districts, {} buildings, {} roads, grid size {:.1}",
        data.repo_key(),
        districts.len(),
        buildings.len(),
        roads.len(),
        grid_size
    );

    CityLayout {
        buildings,
        districts,
        roads,
        grid_size,
    }
}

/// `max(|x| + width, |z| + depth)` over all buildings, floored at
/// `min_grid_size`.
pub fn grid_size(buildings: &[BuildingData], params: &LayoutParams) -> f32 {
    buildings
        .iter()
        .map(|b| (b.x.abs() + b.width).max(b.z.abs() + b.depth))
        .fold(params.min_grid_size, f32::max)
}
