mod classify;
mod placement;
pub mod types;

pub use classify::{
    choose_roof_type, choose_setback, classify, Setback, SETBACK_HEIGHT_RANGE,
    SETBACK_PROBABILITY, SETBACK_RATIO_RANGE,
};
pub use placement::{
    building_height, building_width, cell_offset, grid_cell, place_district_buildings,
    ACTIVE_EMISSIVE, DEPTH_JITTER, IDLE_EMISSIVE,
};
pub use types::{BuildingData, BuildingType, RoofType};
