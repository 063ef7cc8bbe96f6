//! Externally owned home for the current city.
//!
//! The engine itself is stateless. Hosts keep the active layout in the
//! [`CityLayoutStore`] resource and drive it with [`CityLayoutCommand`]
//! events: `Load` regenerates the whole layout (it is never patched),
//! `Clear` drops it. Commands apply in the order they were sent, so only the
//! last one of a frame decides the outcome. Readers only get shared
//! references.

use bevy::prelude::*;

use crate::city_layout::{effective_params, generate_city_layout, CityLayout};
use crate::invariant_checks::check_layout;
use crate::layout_hash::layout_fingerprint;
use crate::layout_params::LayoutParams;
use crate::repo::RepoData;
use crate::stats::LayoutSummary;

#[derive(Event, Debug, Clone)]
pub enum CityLayoutCommand {
    /// New repository metadata arrived from the retrieval layer.
    Load(RepoData),
    Clear,
}

/// Sent after a frame's commands leave a freshly generated layout in the
/// store, so renderers can rebuild their scene.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityLayoutRegenerated {
    pub generation: u64,
    pub fingerprint: u64,
}

#[derive(Debug)]
struct LoadedCity {
    repo_key: String,
    layout: CityLayout,
    fingerprint: u64,
}

#[derive(Resource, Debug, Default)]
pub struct CityLayoutStore {
    current: Option<LoadedCity>,
    /// Bumped on every regeneration and clear.
    generation: u64,
}

impl CityLayoutStore {
    pub fn layout(&self) -> Option<&CityLayout> {
        self.current.as_ref().map(|c| &c.layout)
    }

    pub fn repo_key(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.repo_key.as_str())
    }

    pub fn fingerprint(&self) -> Option<u64> {
        self.current.as_ref().map(|c| c.fingerprint)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Generate and install a layout for `data`. Returns the new generation.
    pub fn replace(&mut self, data: &RepoData, params: &LayoutParams) -> u64 {
        let layout = generate_city_layout(data, params);
        let fingerprint = layout_fingerprint(&layout);
        self.current = Some(LoadedCity {
            repo_key: data.repo_key(),
            layout,
            fingerprint,
        });
        self.generation += 1;
        self.generation
    }

    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            self.generation += 1;
        }
    }
}

fn log_generated(layout: &CityLayout, data: &RepoData, generation: u64, params: &LayoutParams) {
    let violations = check_layout(layout, data.files.len(), params);
    if !violations.is_clean() {
        warn!(
            "citygen: layout for {} violates {} invariant(s): {:?}",
            data.repo_key(),
            violations.total(),
            violations
        );
    }
    let summary = LayoutSummary::from_layout(layout);
    info!(
        "citygen: generated {} (gen {}): {} districts, {} buildings, {}+{} roads, tallest {:?}",
        data.repo_key(),
        generation,
        summary.districts,
        summary.buildings,
        summary.vertical_roads,
        summary.horizontal_roads,
        summary.tallest
    );
}

/// Every command of a frame is superseded by the next one, so only the
/// last is applied.
pub fn apply_layout_commands(
    mut commands: EventReader<CityLayoutCommand>,
    params: Res<LayoutParams>,
    mut store: ResMut<CityLayoutStore>,
    mut regenerated: EventWriter<CityLayoutRegenerated>,
) {
    let Some(last) = commands.read().last() else {
        return;
    };

    match last {
        CityLayoutCommand::Load(data) => {
            let params = effective_params(&params);
            let generation = store.replace(data, &params);
            if let Some(layout) = store.layout() {
                log_generated(layout, data, generation, &params);
            }
            if let Some(fingerprint) = store.fingerprint() {
                regenerated.send(CityLayoutRegenerated {
                    generation,
                    fingerprint,
                });
            }
        }
        CityLayoutCommand::Clear => {
            store.clear();
            info!("citygen: layout cleared (gen {})", store.generation());
        }
    }
}

pub struct CityLayoutPlugin;

impl Plugin for CityLayoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LayoutParams>()
            .init_resource::<CityLayoutStore>()
            .add_event::<CityLayoutCommand>()
            .add_event::<CityLayoutRegenerated>()
            .add_systems(Update, apply_layout_commands);
    }
}
