/// Global cap on buildings per city. Files past this index are dropped.
pub const MAX_BUILDINGS: usize = 1000;

/// Lines of code → building height.
pub const HEIGHT_SCALE: f32 = 0.012;
pub const MIN_HEIGHT: f32 = 0.4;
pub const MAX_HEIGHT: f32 = 30.0;

/// File size in bytes → building width.
pub const WIDTH_SCALE: f32 = 0.0005;
pub const MIN_WIDTH: f32 = 0.5;
pub const MAX_WIDTH: f32 = 3.5;

/// Clear space between neighbouring buildings of the same block.
pub const BUILDING_GAP: f32 = 0.6;
/// Edge length of one building cell. Always larger than `MAX_WIDTH`.
pub const CELL_SIZE: f32 = MAX_WIDTH + BUILDING_GAP;

/// Buildings per block edge (a block is `BLOCK_SIZE x BLOCK_SIZE` cells).
pub const BLOCK_SIZE: usize = 4;

pub const ROAD_WIDTH: f32 = 2.0;
pub const SIDEWALK_WIDTH: f32 = 0.3;
/// Road plus both sidewalks: the spacing unit between blocks and districts.
pub const ROAD_ALLOWANCE: f32 = ROAD_WIDTH + 2.0 * SIDEWALK_WIDTH;

/// Inset between a district's outer edge and its first row/column of cells.
pub const DISTRICT_MARGIN: f32 = 0.5;

/// Districts wrap onto a new row once a row would grow past this width.
pub const MAX_ROW_WIDTH: f32 = 90.0;

/// Road center-lines closer than this are merged into one road.
pub const ROAD_MERGE_TOLERANCE: f32 = 0.8;

/// Smallest half-extent reported for any city, including empty ones.
pub const MIN_GRID_SIZE: f32 = 20.0;

/// Average bytes per line when lines are estimated from file size.
pub const BYTES_PER_LINE: u64 = 40;

/// Seed used when a caller does not derive one from the repository.
pub const DEFAULT_SEED: u64 = 42;
