use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use crate::shared::*;

/// Seconds the throw button must stay down before a release counts as a
/// release-after-hold.
pub const HOLD_THRESHOLD_SECS: f32 = 0.15;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThrowButtonHold>().add_systems(
            PreUpdate,
            (reset_and_read_input, manage_input_context).chain(),
        );
    }
}

/// How long the throw button has been down.
#[derive(Resource, Debug, Clone, Default)]
pub struct ThrowButtonHold {
    pub held_secs: f32,
}

/// Fold one frame of button state into a [`ButtonSignal`], tracking how long
/// the button has been held across frames.
pub fn button_signal(
    just_pressed: bool,
    pressed: bool,
    just_released: bool,
    dt: f32,
    hold: &mut ThrowButtonHold,
) -> ButtonSignal {
    if just_pressed {
        hold.held_secs = 0.0;
    } else if pressed {
        hold.held_secs += dt;
    }
    let signal = ButtonSignal {
        is_down: just_pressed,
        is_up: just_released,
        is_held: pressed,
        is_up_after_held: just_released && hold.held_secs >= HOLD_THRESHOLD_SECS,
    };
    if just_released {
        hold.held_secs = 0.0;
    }
    signal
}

/// The single point where hardware input becomes game actions.
#[allow(clippy::too_many_arguments)]
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    gamepads: Query<&Gamepad>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    time: Res<Time>,
    mut hold: ResMut<ThrowButtonHold>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    match *context {
        InputContext::Disabled => {
            hold.held_secs = 0.0;
        }

        InputContext::Fishing => {
            input.throw_hook = button_signal(
                keys.just_pressed(bindings.throw_hook) || mouse.just_pressed(MouseButton::Left),
                keys.pressed(bindings.throw_hook) || mouse.pressed(MouseButton::Left),
                keys.just_released(bindings.throw_hook) || mouse.just_released(MouseButton::Left),
                time.delta_secs(),
                &mut hold,
            );

            // Screen y grows downward, the board's grows upward.
            let delta = mouse_motion.delta;
            input.hook_delta = Vec2::new(delta.x, -delta.y);
            input.hook_stick = gamepads
                .iter()
                .map(|pad| pad.right_stick())
                .find(|stick| *stick != Vec2::ZERO)
                .unwrap_or(Vec2::ZERO);

            input.start_encounter = keys.just_pressed(bindings.start_encounter);
            input.cancel = keys.just_pressed(bindings.cancel);
        }
    }
}

/// Derives InputContext from GameState. ONE system, replaces all per-domain guards.
fn manage_input_context(
    game_state: Res<State<GameState>>,
    mut context: ResMut<InputContext>,
) {
    *context = match *game_state.get() {
        GameState::Loading => InputContext::Disabled,
        GameState::Playing => InputContext::Fishing,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_tap_is_not_a_hold() {
        let mut hold = ThrowButtonHold::default();
        let down = button_signal(true, true, false, 0.016, &mut hold);
        assert!(down.is_down && down.is_held);
        let up = button_signal(false, false, true, 0.016, &mut hold);
        assert!(up.is_up);
        assert!(!up.is_up_after_held);
    }

    #[test]
    fn test_release_after_threshold_is_a_hold() {
        let mut hold = ThrowButtonHold::default();
        button_signal(true, true, false, 0.1, &mut hold);
        for _ in 0..3 {
            let held = button_signal(false, true, false, 0.1, &mut hold);
            assert!(held.is_held && !held.is_down);
        }
        let up = button_signal(false, false, true, 0.1, &mut hold);
        assert!(up.is_up_after_held);
        assert_eq!(hold.held_secs, 0.0);
    }
}
