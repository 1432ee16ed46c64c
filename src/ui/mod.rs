pub mod audio;
pub mod hud;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<audio::SfxParameters>()
            .init_resource::<hud::HudReadout>();

        // ─── AUDIO ───
        app.add_systems(
            Update,
            (
                audio::stop_loops_on_encounter_end,
                audio::handle_stop_sfx,
                audio::handle_play_sfx,
                audio::record_sfx_parameters,
                audio::apply_tension_to_sinks,
            )
                .chain(),
        );

        // ─── HUD ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnExit(GameState::Playing), hud::despawn_hud);
        app.add_systems(
            Update,
            (hud::track_fishing_events, hud::update_fishing_text)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
