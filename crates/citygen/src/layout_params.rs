//! Data-driven layout parameters.
//!
//! Collects the tunables from `config.rs` into a single [`LayoutParams`]
//! resource so a host application can adjust the skyline or the road grid
//! without recompiling. `Default` mirrors the constants exactly.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    BLOCK_SIZE, BUILDING_GAP, BYTES_PER_LINE, DISTRICT_MARGIN, HEIGHT_SCALE, MAX_BUILDINGS,
    MAX_HEIGHT, MAX_ROW_WIDTH, MAX_WIDTH, MIN_GRID_SIZE, MIN_HEIGHT, MIN_WIDTH,
    ROAD_MERGE_TOLERANCE, ROAD_WIDTH, SIDEWALK_WIDTH, WIDTH_SCALE,
};

/// Which file metric drives building height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeightSource {
    /// Line count reported by the retrieval layer.
    #[default]
    Lines,
    /// Lines re-derived from byte size via `bytes_per_line`.
    EstimatedFromSize,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutParams {
    pub max_buildings: usize,
    pub height_source: HeightSource,
    pub bytes_per_line: u64,
    pub height_scale: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub width_scale: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub building_gap: f32,
    /// Cells per block edge.
    pub block_size: usize,
    pub road_width: f32,
    pub sidewalk_width: f32,
    pub district_margin: f32,
    pub max_row_width: f32,
    pub road_merge_tolerance: f32,
    pub min_grid_size: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            max_buildings: MAX_BUILDINGS,
            height_source: HeightSource::Lines,
            bytes_per_line: BYTES_PER_LINE,
            height_scale: HEIGHT_SCALE,
            min_height: MIN_HEIGHT,
            max_height: MAX_HEIGHT,
            width_scale: WIDTH_SCALE,
            min_width: MIN_WIDTH,
            max_width: MAX_WIDTH,
            building_gap: BUILDING_GAP,
            block_size: BLOCK_SIZE,
            road_width: ROAD_WIDTH,
            sidewalk_width: SIDEWALK_WIDTH,
            district_margin: DISTRICT_MARGIN,
            max_row_width: MAX_ROW_WIDTH,
            road_merge_tolerance: ROAD_MERGE_TOLERANCE,
            min_grid_size: MIN_GRID_SIZE,
        }
    }
}

impl LayoutParams {
    /// Edge length of one building cell.
    pub fn cell_size(&self) -> f32 {
        self.max_width + self.building_gap
    }

    /// Road plus both sidewalks.
    pub fn road_allowance(&self) -> f32 {
        self.road_width + 2.0 * self.sidewalk_width
    }

    /// Parse a (possibly partial) JSON override. Missing keys keep their
    /// defaults; the result is validated before it is returned.
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: Self =
            serde_json::from_str(json).map_err(|e| ParamsError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("heightScale", self.height_scale),
            ("minHeight", self.min_height),
            ("widthScale", self.width_scale),
            ("minWidth", self.min_width),
            ("roadWidth", self.road_width),
            ("maxRowWidth", self.max_row_width),
            ("minGridSize", self.min_grid_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParamsError::NotPositive { name, value });
            }
        }

        let non_negative = [
            ("buildingGap", self.building_gap),
            ("sidewalkWidth", self.sidewalk_width),
            ("districtMargin", self.district_margin),
            ("roadMergeTolerance", self.road_merge_tolerance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::Negative { name, value });
            }
        }

        if !self.max_height.is_finite() || self.min_height > self.max_height {
            return Err(ParamsError::InvertedRange {
                name: "height",
                min: self.min_height,
                max: self.max_height,
            });
        }
        if !self.max_width.is_finite() || self.min_width > self.max_width {
            return Err(ParamsError::InvertedRange {
                name: "width",
                min: self.min_width,
                max: self.max_width,
            });
        }
        if self.block_size == 0 {
            return Err(ParamsError::ZeroBlockSize);
        }
        if self.bytes_per_line == 0 {
            return Err(ParamsError::ZeroBytesPerLine);
        }
        if self.building_gap <= 0.0 {
            return Err(ParamsError::CellTooSmall {
                cell_size: self.cell_size(),
                max_width: self.max_width,
            });
        }
        Ok(())
    }
}

/// Reasons a [`LayoutParams`] override is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// The JSON document could not be parsed.
    Parse(String),
    NotPositive {
        name: &'static str,
        value: f32,
    },
    Negative {
        name: &'static str,
        value: f32,
    },
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    ZeroBlockSize,
    ZeroBytesPerLine,
    /// Cells must leave a gap around the widest building.
    CellTooSmall {
        cell_size: f32,
        max_width: f32,
    },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Parse(msg) => write!(f, "Invalid layout parameters: {msg}"),
            ParamsError::NotPositive { name, value } => {
                write!(f, "{name} must be a positive finite number, got {value}")
            }
            ParamsError::Negative { name, value } => {
                write!(f, "{name} must be a non-negative finite number, got {value}")
            }
            ParamsError::InvertedRange { name, min, max } => {
                write!(f, "{name} range is inverted or unbounded: min {min} > max {max}")
            }
            ParamsError::ZeroBlockSize => write!(f, "blockSize must be at least 1"),
            ParamsError::ZeroBytesPerLine => write!(f, "bytesPerLine must be at least 1"),
            ParamsError::CellTooSmall {
                cell_size,
                max_width,
            } => write!(
                f,
                "cell size {cell_size} leaves no gap around buildings of width {max_width}"
            ),
        }
    }
}

impl std::error::Error for ParamsError {}
