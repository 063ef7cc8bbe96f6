//! Turns a flat list of repository files into a miniature city: files become
//! buildings, top-level folders become districts, and a road grid separates
//! districts and the blocks inside them.
//!
//! ```text
//! RepoData
//!   → folder_groups   (one group per top-level folder, largest first)
//!   → districts       (row-wrapping packing, centered on the origin)
//!   → buildings       (block grid per district + classification)
//!   → roads           (full-span center-lines, near-duplicates merged)
//!   → city_layout     (assembly + grid size)
//! CityLayout
//! ```
//!
//! [`generate_city_layout`] is pure: given the same input and parameters it
//! returns the same layout, including every randomized styling field, since
//! randomness comes from an RNG seeded by the repository key.
//! [`CityLayoutPlugin`] adds a bevy resource that owns the current layout.

pub mod buildings;
pub mod city_layout;
pub mod config;
pub mod districts;
pub mod folder_groups;
pub mod invariant_checks;
pub mod layout_hash;
pub mod layout_params;
pub mod layout_rng;
pub mod layout_store;
pub mod repo;
pub mod roads;
pub mod stats;

pub use buildings::{BuildingData, BuildingType, RoofType};
pub use city_layout::{
    effective_params, generate_city_layout, generate_city_layout_with_rng, CityLayout,
};
pub use districts::District;
pub use layout_params::{HeightSource, LayoutParams, ParamsError};
pub use layout_rng::LayoutRng;
pub use layout_store::{
    CityLayoutCommand, CityLayoutPlugin, CityLayoutRegenerated, CityLayoutStore,
};
pub use repo::{RepoData, RepoFile};
pub use roads::{RoadOrientation, RoadSegment};
