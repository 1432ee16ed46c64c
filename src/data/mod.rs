//! Data layer. Populates the fish and rod registries at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills FishRegistry and
//! RodRegistry from the hard-coded game-design data defined in submodules,
//! then transitions the game into GameState::Playing.

mod fish;
mod rods;

use bevy::prelude::*;
use crate::shared::*;

pub use fish::populate_fish;
pub use rods::populate_rods;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

fn load_all_data(
    mut fish_registry: ResMut<FishRegistry>,
    mut rod_registry: ResMut<RodRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Populating registries…");

    populate_fish(&mut fish_registry);
    info!("[Data]   Fish loaded: {}", fish_registry.fish.len());

    populate_rods(&mut rod_registry);
    info!("[Data]   Rods loaded: {}", rod_registry.rods.len());

    if !rod_registry.rods.contains_key(DEFAULT_ROD_ID) {
        warn!("[Data] Default rod '{}' is missing", DEFAULT_ROD_ID);
    }

    info!("[Data] All registries populated. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}
