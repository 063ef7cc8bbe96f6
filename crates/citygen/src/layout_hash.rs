//! Structural fingerprint of a layout.
//!
//! Hashes, in a fixed order:
//!
//! 1. Districts (name, center, footprint, file count)
//! 2. Buildings (path, center, height, width)
//! 3. Roads (center, width, depth)
//! 4. Grid size
//!
//! Random draws (depth jitter, glow, setback, roof, wall tint) are left out,
//! so two layouts of the same input agree whatever RNG produced them.
//! Floats are hashed through their bit patterns.

use xxhash_rust::xxh3::Xxh3;

use crate::city_layout::CityLayout;

pub fn layout_fingerprint(layout: &CityLayout) -> u64 {
    let mut hasher = Xxh3::new();

    write_len(&mut hasher, layout.districts.len());
    for district in &layout.districts {
        write_str(&mut hasher, &district.name);
        write_f32s(&mut hasher, &[district.x, district.z, district.width, district.depth]);
        write_len(&mut hasher, district.file_count);
    }

    write_len(&mut hasher, layout.buildings.len());
    for building in &layout.buildings {
        write_str(&mut hasher, &building.file.path);
        write_f32s(
            &mut hasher,
            &[building.x, building.z, building.height, building.width],
        );
    }

    write_len(&mut hasher, layout.roads.len());
    for road in &layout.roads {
        write_f32s(&mut hasher, &[road.x, road.z, road.width, road.depth]);
    }

    write_f32s(&mut hasher, &[layout.grid_size]);
    hasher.digest()
}

fn write_len(hasher: &mut Xxh3, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

fn write_str(hasher: &mut Xxh3, s: &str) {
    write_len(hasher, s.len());
    hasher.update(s.as_bytes());
}

fn write_f32s(hasher: &mut Xxh3, values: &[f32]) {
    for value in values {
        hasher.update(&value.to_bits().to_le_bytes());
    }
}
