use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudFishingText;

// ═══════════════════════════════════════════════════════════════════════
// READOUT: built from fishing events only
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct HudReadout {
    pub phase: FishingPhase,
    pub cast_distance: Option<f32>,
    pub nibbling: bool,
    pub tension: f32,
    pub last_result: Option<(String, EncounterResult)>,
}

impl HudReadout {
    pub fn line(&self) -> String {
        let mut parts = vec![format!("Phase: {:?}", self.phase)];
        match self.phase {
            FishingPhase::None => {
                parts.push("Press F to fish".to_string());
            }
            FishingPhase::ThrowHook => {
                parts.push("Hold Space, release to cast".to_string());
            }
            FishingPhase::Nibble => {
                if let Some(distance) = self.cast_distance {
                    parts.push(format!("Cast {:.1}m", distance));
                }
                parts.push(if self.nibbling { "Nibbling! Pull!" } else { "Waiting..." }.to_string());
            }
            FishingPhase::FishingBoard | FishingPhase::Reeling => {
                parts.push(format!("Line tension {:.0}%", self.tension * 100.0));
            }
        }
        if let Some((fish_id, result)) = &self.last_result {
            let outcome = match result {
                EncounterResult::Caught => "caught".to_string(),
                EncounterResult::Escaped(phase) => format!("escaped during {:?}", phase),
                EncounterResult::Cancelled => "cancelled".to_string(),
            };
            parts.push(format!("Last: {} {}", fish_id, outcome));
        }
        parts.join("  |  ")
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(36.0),
                align_items: AlignItems::Center,
                padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|bar| {
            bar.spawn((
                HudFishingText,
                Text::new(HudReadout::default().line()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.85)),
            ));
        });
}

pub fn despawn_hud(mut commands: Commands, hud_query: Query<Entity, With<HudRoot>>) {
    for entity in &hud_query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn track_fishing_events(
    mut readout: ResMut<HudReadout>,
    mut phase_events: EventReader<FishingPhaseChangedEvent>,
    mut thrown_events: EventReader<HookThrownEvent>,
    mut nibble_events: EventReader<NibbleEvent>,
    mut ended_events: EventReader<EncounterEndedEvent>,
    mut param_events: EventReader<SfxParameterEvent>,
) {
    for event in phase_events.read() {
        readout.phase = event.to;
        if event.to == FishingPhase::ThrowHook {
            readout.cast_distance = None;
        }
        readout.nibbling = false;
    }
    for event in thrown_events.read() {
        readout.cast_distance = Some(event.distance);
    }
    for event in nibble_events.read() {
        readout.nibbling = event.nibbling;
    }
    for event in param_events.read() {
        if event.name == "Tension" {
            readout.tension = event.value;
        }
    }
    for event in ended_events.read() {
        readout.last_result = Some((event.fish_id.clone(), event.result));
    }
}

pub fn update_fishing_text(
    readout: Res<HudReadout>,
    mut query: Query<&mut Text, With<HudFishingText>>,
) {
    if !readout.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = readout.line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_follows_phase() {
        let mut readout = HudReadout::default();
        assert!(readout.line().contains("Press F"));

        readout.phase = FishingPhase::Nibble;
        readout.cast_distance = Some(32.5);
        readout.nibbling = true;
        let line = readout.line();
        assert!(line.contains("Cast 32.5m"));
        assert!(line.contains("Pull!"));

        readout.phase = FishingPhase::FishingBoard;
        readout.tension = 0.42;
        assert!(readout.line().contains("Line tension 42%"));
    }

    #[test]
    fn test_line_reports_last_result() {
        let readout = HudReadout {
            last_result: Some(("pike".into(), EncounterResult::Escaped(FishingPhase::Reeling))),
            ..HudReadout::default()
        };
        assert!(readout.line().contains("Last: pike escaped during Reeling"));
    }
}
