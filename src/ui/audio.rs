use bevy::audio::AudioSinkPlayback;
use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// LOOPING SFX: sounds that play until told to stop
// ═══════════════════════════════════════════════════════════════════════

/// Marks a looping sound so it can be found again by id.
#[derive(Component, Debug, Clone)]
pub struct LoopingSfx {
    pub sfx_id: String,
}

/// Last value received for each (sfx id, parameter) pair. Re-applied every
/// frame because a freshly spawned sink appears a frame after its player.
#[derive(Resource, Debug, Default)]
pub struct SfxParameters {
    pub values: std::collections::HashMap<(String, String), f32>,
}

impl SfxParameters {
    pub fn get(&self, sfx_id: &str, name: &str) -> Option<f32> {
        self.values
            .get(&(sfx_id.to_string(), name.to_string()))
            .copied()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SFX PATH MAPPING
// ═══════════════════════════════════════════════════════════════════════

/// Maps SFX IDs (sent by other domains) to actual audio file paths.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "fishing_cast" => Some("audio/sfx/sfx_movement_jump1.ogg"),
        "fishing_splash" => Some("audio/sfx/sfx_sounds_interaction5.ogg"),
        "fish_nibble" => Some("audio/sfx/sfx_sounds_impact1.ogg"),
        "fish_hooked" => Some("audio/sfx/sfx_sounds_impact2.ogg"),
        "fishing_line_snap" => Some("audio/sfx/sfx_sounds_damage1.ogg"),
        "fish_escape" => Some("audio/sfx/sfx_sounds_error1.ogg"),
        "fish_catch" => Some("audio/sfx/sfx_sounds_fanfare1.ogg"),
        "fishing_line_tension" => Some("audio/sfx/sfx_movement_ladder1a.ogg"),
        _ => None,
    }
}

fn is_looping(sfx_id: &str) -> bool {
    sfx_id == "fishing_line_tension"
}

/// Playback volume for the tension loop; quiet at rest, loud near snapping.
pub fn tension_volume(tension: f32) -> f32 {
    0.2 + 0.8 * tension.clamp(0.0, 1.0)
}

/// Playback speed for the tension loop; the line whines higher as it wears.
pub fn tension_speed(tension: f32) -> f32 {
    1.0 + 0.6 * tension.clamp(0.0, 1.0)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Listen for PlaySfxEvent and spawn audio sources. One-shots auto-despawn,
/// loops live until a StopSfxEvent for the same id.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    loops: Query<&LoopingSfx>,
) {
    for event in events.read() {
        let Some(path) = sfx_path(&event.sfx_id) else {
            warn!("[Audio] No sound mapped for '{}'", event.sfx_id);
            continue;
        };
        if is_looping(&event.sfx_id) {
            if loops.iter().any(|l| l.sfx_id == event.sfx_id) {
                continue;
            }
            commands.spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::LOOP,
                LoopingSfx {
                    sfx_id: event.sfx_id.clone(),
                },
            ));
        } else {
            commands.spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::DESPAWN,
            ));
        }
    }
}

pub fn handle_stop_sfx(
    mut events: EventReader<StopSfxEvent>,
    mut commands: Commands,
    loops: Query<(Entity, &LoopingSfx)>,
) {
    for event in events.read() {
        for (entity, looping) in &loops {
            if looping.sfx_id == event.sfx_id {
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}

pub fn record_sfx_parameters(
    mut events: EventReader<SfxParameterEvent>,
    mut params: ResMut<SfxParameters>,
) {
    for event in events.read() {
        params
            .values
            .insert((event.sfx_id.clone(), event.name.clone()), event.value);
    }
}

/// Drive the tension loop's sink from the latest "Tension" value.
pub fn apply_tension_to_sinks(
    params: Res<SfxParameters>,
    sinks: Query<(&LoopingSfx, &AudioSink)>,
) {
    for (looping, sink) in &sinks {
        let Some(tension) = params.get(&looping.sfx_id, "Tension") else {
            continue;
        };
        sink.set_volume(tension_volume(tension));
        sink.set_speed(tension_speed(tension));
    }
}

/// Quiet every loop once an encounter is over, whatever phase it ended in.
pub fn stop_loops_on_encounter_end(
    mut events: EventReader<EncounterEndedEvent>,
    mut commands: Commands,
    loops: Query<Entity, With<LoopingSfx>>,
) {
    if events.read().count() == 0 {
        return;
    }
    for entity in &loops {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fishing_sfx_is_mapped() {
        for id in [
            "fishing_cast",
            "fishing_splash",
            "fish_nibble",
            "fish_hooked",
            "fishing_line_snap",
            "fish_escape",
            "fish_catch",
            "fishing_line_tension",
        ] {
            assert!(sfx_path(id).is_some(), "{id} has no sound");
        }
        assert!(is_looping("fishing_line_tension"));
        assert!(!is_looping("fish_catch"));
    }

    #[test]
    fn test_tension_mapping_is_monotonic_and_clamped() {
        assert_eq!(tension_volume(-1.0), tension_volume(0.0));
        assert_eq!(tension_volume(2.0), 1.0);
        assert!(tension_volume(0.7) > tension_volume(0.3));
        assert_eq!(tension_speed(0.0), 1.0);
        assert!(tension_speed(1.0) > tension_speed(0.5));
    }

    #[test]
    fn test_parameters_keep_latest_value() {
        let mut params = SfxParameters::default();
        params
            .values
            .insert(("fishing_line_tension".into(), "Tension".into()), 0.25);
        params
            .values
            .insert(("fishing_line_tension".into(), "Tension".into()), 0.75);
        assert_eq!(params.get("fishing_line_tension", "Tension"), Some(0.75));
        assert_eq!(params.get("fishing_line_tension", "Pitch"), None);
    }
}
