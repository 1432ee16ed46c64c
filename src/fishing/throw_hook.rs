//! Throw phase: hold to swing the power slider, release to cast.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::effects::*;
use crate::shared::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowHookConfig {
    pub max_value: f32,
    /// Slider units per second while the button is held.
    pub slider_speed: f32,
    /// Cast distance at an empty and a full slider.
    pub throw_range: (f32, f32),
    /// Seconds between the release and the splash.
    pub flight_secs: f32,
}

impl Default for ThrowHookConfig {
    fn default() -> Self {
        Self {
            max_value: 100.0,
            slider_speed: 50.0,
            throw_range: (10.0, 50.0),
            flight_secs: 0.8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThrowHookController {
    config: ThrowHookConfig,
    active: bool,
    value: f32,
    /// +1 filling, -1 draining.
    direction: f32,
    flight: Option<Timer>,
    distance: Option<f32>,
}

impl ThrowHookController {
    pub fn new(config: ThrowHookConfig) -> Self {
        Self {
            config,
            active: false,
            value: 0.0,
            direction: 1.0,
            flight: None,
            distance: None,
        }
    }

    pub fn config(&self) -> &ThrowHookConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Slider fill in [0, 1].
    pub fn value_percent(&self) -> f32 {
        if self.config.max_value <= 0.0 {
            return 0.0;
        }
        (self.value / self.config.max_value).clamp(0.0, 1.0)
    }

    /// Distance of the last cast, once the button has been released.
    pub fn distance(&self) -> Option<f32> {
        self.distance
    }

    pub fn is_hook_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.flight = None;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
        self.direction = 1.0;
        self.flight = None;
        self.distance = None;
    }

    /// Returns `Positive` once the cast hook lands in the water.
    pub fn tick(&mut self, dt: f32, input: &PlayerInput, effects: &mut Effects) -> Option<Sign> {
        if !self.active {
            return None;
        }

        if let Some(flight) = self.flight.as_mut() {
            flight.tick(Duration::from_secs_f32(dt.max(0.0)));
            if !flight.finished() {
                return None;
            }
            return Some(self.splash(effects));
        }

        let button = input.throw_hook;
        if button.is_up_after_held {
            let (near, far) = self.config.throw_range;
            let distance = near + (far - near) * self.value_percent();
            self.distance = Some(distance);
            self.direction = 1.0;
            debug!("[Fishing] Hook thrown {:.1} units", distance);
            effects.push(FishingEffect::HookThrown { distance });
            effects.push(FishingEffect::PlaySfx(SFX_CAST));

            if self.config.flight_secs <= 0.0 {
                return Some(self.splash(effects));
            }
            self.flight = Some(Timer::from_seconds(self.config.flight_secs, TimerMode::Once));
            return None;
        }

        if button.is_held {
            self.swing(dt);
        }
        None
    }

    fn swing(&mut self, dt: f32) {
        let max = self.config.max_value.max(0.0);
        self.value += self.direction * self.config.slider_speed * dt;
        if self.value >= max {
            self.value = max;
            self.direction = -1.0;
        } else if self.value <= 0.0 {
            self.value = 0.0;
            self.direction = 1.0;
        }
    }

    fn splash(&mut self, effects: &mut Effects) -> Sign {
        self.flight = None;
        effects.push(FishingEffect::PlaySfx(SFX_SPLASH));
        Sign::Positive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding() -> PlayerInput {
        PlayerInput {
            throw_hook: ButtonSignal::held(),
            ..PlayerInput::default()
        }
    }

    fn releasing() -> PlayerInput {
        PlayerInput {
            throw_hook: ButtonSignal::released_after_hold(),
            ..PlayerInput::default()
        }
    }

    fn active_controller() -> ThrowHookController {
        let mut controller = ThrowHookController::new(ThrowHookConfig::default());
        controller.activate();
        controller
    }

    #[test]
    fn test_inactive_controller_ignores_input() {
        let mut controller = ThrowHookController::new(ThrowHookConfig::default());
        let mut effects = Effects::new();
        assert_eq!(controller.tick(1.0, &holding(), &mut effects), None);
        assert_eq!(controller.value(), 0.0);
    }

    #[test]
    fn test_slider_flips_at_max() {
        let mut controller = active_controller();
        let mut effects = Effects::new();
        for _ in 0..5 {
            controller.tick(0.5, &holding(), &mut effects);
        }
        // 25, 50, 75, 100 (flip), 75
        assert!((controller.value() - 75.0).abs() < 1e-4);
        for _ in 0..4 {
            controller.tick(0.5, &holding(), &mut effects);
        }
        // 50, 25, 0 (flip), 25
        assert!((controller.value() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_release_throws_scaled_distance_then_splashes() {
        let mut controller = active_controller();
        let mut effects = Effects::new();
        for _ in 0..3 {
            controller.tick(0.5, &holding(), &mut effects);
        }
        assert_eq!(controller.tick(0.0, &releasing(), &mut effects), None);
        assert_eq!(controller.distance(), Some(40.0));
        assert!(effects.contains(&FishingEffect::HookThrown { distance: 40.0 }));
        assert!(effects.contains(&FishingEffect::PlaySfx(SFX_CAST)));
        assert!(controller.is_hook_flying());

        assert_eq!(controller.tick(0.5, &PlayerInput::default(), &mut effects), None);
        assert_eq!(
            controller.tick(0.5, &PlayerInput::default(), &mut effects),
            Some(Sign::Positive)
        );
        assert!(effects.contains(&FishingEffect::PlaySfx(SFX_SPLASH)));
        assert!(!controller.is_hook_flying());
    }

    #[test]
    fn test_input_ignored_while_hook_flies() {
        let mut controller = active_controller();
        let mut effects = Effects::new();
        controller.tick(1.0, &holding(), &mut effects);
        controller.tick(0.0, &releasing(), &mut effects);
        let value = controller.value();
        controller.tick(0.1, &holding(), &mut effects);
        assert_eq!(controller.value(), value);
    }

    #[test]
    fn test_release_without_hold_does_not_throw() {
        let mut controller = active_controller();
        let mut effects = Effects::new();
        let tap = PlayerInput {
            throw_hook: ButtonSignal {
                is_up: true,
                ..ButtonSignal::default()
            },
            ..PlayerInput::default()
        };
        assert_eq!(controller.tick(0.1, &tap, &mut effects), None);
        assert!(controller.distance().is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_zero_flight_lands_on_release() {
        let mut controller = ThrowHookController::new(ThrowHookConfig {
            flight_secs: 0.0,
            ..ThrowHookConfig::default()
        });
        controller.activate();
        let mut effects = Effects::new();
        assert_eq!(
            controller.tick(0.0, &releasing(), &mut effects),
            Some(Sign::Positive)
        );
        assert_eq!(controller.distance(), Some(10.0));
    }

    #[test]
    fn test_reset_clears_slider_and_cast() {
        let mut controller = active_controller();
        let mut effects = Effects::new();
        controller.tick(1.0, &holding(), &mut effects);
        controller.tick(0.0, &releasing(), &mut effects);
        controller.deactivate();
        controller.reset();
        assert_eq!(controller.value(), 0.0);
        assert!(controller.distance().is_none());
        assert!(!controller.is_hook_flying());
    }
}
