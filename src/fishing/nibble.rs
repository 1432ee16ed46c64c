//! Nibble phase: the fish tests the bait a few times; pull while it bites.
//!
//! Each attempt is a random wait followed by a random-length nibble window.
//! Pulling inside a window hooks the fish, pulling outside one scares it off,
//! and letting every window pass ends the phase once with `Negative`.

use std::time::Duration;

use bevy::prelude::*;
use rand::RngCore;

use super::effects::*;
use super::encounter::roll_range;
use crate::shared::*;

#[derive(Debug, Clone, Default)]
pub struct NibbleController {
    active: bool,
    finished: bool,
    nibbling: bool,
    attempts: u32,
    max_attempts: u32,
    interval: (f32, f32),
    window: (f32, f32),
    wait_timer: Option<Timer>,
    window_timer: Option<Timer>,
}

impl NibbleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_nibbling(&self) -> bool {
        self.nibbling
    }

    /// Windows that have opened and closed without a pull.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Start waiting for the first nibble of this fish.
    pub fn activate(&mut self, behavior: &FishBehaviorDef, rng: &mut dyn RngCore) {
        self.active = true;
        self.finished = false;
        self.nibbling = false;
        self.attempts = 0;
        self.max_attempts = behavior.max_nibble_attempts;
        self.interval = behavior.nibble_interval;
        self.window = behavior.nibble_window;
        self.window_timer = None;
        self.start_wait(rng);
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.wait_timer = None;
        self.window_timer = None;
    }

    pub fn reset(&mut self) {
        self.finished = false;
        self.nibbling = false;
        self.attempts = 0;
        self.wait_timer = None;
        self.window_timer = None;
    }

    pub fn tick(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        rng: &mut dyn RngCore,
        effects: &mut Effects,
    ) -> Option<Sign> {
        if !self.active || self.finished {
            return None;
        }

        if input.throw_hook.is_down {
            return Some(self.pull(effects));
        }

        if self.attempts >= self.max_attempts {
            return Some(self.finish(Sign::Negative));
        }

        let step = Duration::from_secs_f32(dt.max(0.0));

        if let Some(wait) = self.wait_timer.as_mut() {
            wait.tick(step);
            if wait.finished() {
                self.wait_timer = None;
                self.open_window(rng, effects);
            }
            return None;
        }

        if let Some(window) = self.window_timer.as_mut() {
            window.tick(step);
            if window.finished() {
                self.window_timer = None;
                self.nibbling = false;
                self.attempts += 1;
                effects.push(FishingEffect::Nibble { nibbling: false });

                if self.attempts >= self.max_attempts {
                    debug!("[Fishing] Fish lost interest after {} nibbles", self.attempts);
                    effects.push(FishingEffect::PlaySfx(SFX_ESCAPE));
                    return Some(self.finish(Sign::Negative));
                }
                self.start_wait(rng);
            }
        }
        None
    }

    fn pull(&mut self, effects: &mut Effects) -> Sign {
        self.wait_timer = None;
        self.window_timer = None;
        if self.nibbling {
            effects.push(FishingEffect::PlaySfx(SFX_HOOKED));
            self.finish(Sign::Positive)
        } else {
            effects.push(FishingEffect::PlaySfx(SFX_ESCAPE));
            self.finish(Sign::Negative)
        }
    }

    fn open_window(&mut self, rng: &mut dyn RngCore, effects: &mut Effects) {
        self.nibbling = true;
        let secs = roll_range(rng, self.window).max(0.0);
        self.window_timer = Some(Timer::from_seconds(secs, TimerMode::Once));
        effects.push(FishingEffect::Nibble { nibbling: true });
        effects.push(FishingEffect::PlaySfx(SFX_NIBBLE));
    }

    fn start_wait(&mut self, rng: &mut dyn RngCore) {
        let secs = roll_range(rng, self.interval).max(0.0);
        self.wait_timer = Some(Timer::from_seconds(secs, TimerMode::Once));
    }

    fn finish(&mut self, sign: Sign) -> Sign {
        self.finished = true;
        self.nibbling = false;
        sign
    }
}
