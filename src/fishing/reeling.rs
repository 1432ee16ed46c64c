//! Reeling phase: hold to wind the line in before the fish gets its strength back.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::effects::*;
use super::encounter::{Encounter, Fish};
use crate::shared::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelingConfig {
    pub max_progress: f32,
}

impl Default for ReelingConfig {
    fn default() -> Self {
        Self {
            max_progress: 100.0,
        }
    }
}

/// Progress survives a `Zero` outcome so the player resumes where they left
/// off after winning the fishing board again.
#[derive(Debug, Clone)]
pub struct ReelingController {
    config: ReelingConfig,
    active: bool,
    finished: bool,
    progress: f32,
    fatigue_timer: Option<Timer>,
}

impl ReelingController {
    pub fn new(config: ReelingConfig) -> Self {
        Self {
            config,
            active: false,
            finished: false,
            progress: 0.0,
            fatigue_timer: None,
        }
    }

    pub fn config(&self) -> &ReelingConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Seconds left before the fish recovers, while active.
    pub fn fatigue_remaining(&self) -> Option<f32> {
        self.fatigue_timer.as_ref().map(|t| t.remaining_secs())
    }

    /// Start the fatigue countdown for this fish.
    pub fn activate(&mut self, encounter: &Encounter) {
        self.active = true;
        self.finished = false;
        let secs = encounter.fish.behavior().fatigue_duration.max(0.0);
        self.fatigue_timer = Some(Timer::from_seconds(secs, TimerMode::Once));
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.fatigue_timer = None;
    }

    /// Clear progress and the fish's recovery count.
    pub fn reset(&mut self, fish: &mut Fish) {
        self.progress = 0.0;
        self.finished = false;
        fish.fatigue_count = 0;
    }

    /// `Positive` when the line is fully in, `Zero` when the fish recovers and
    /// must be tired out again, `Negative` when it has recovered too often.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        encounter: &mut Encounter,
        effects: &mut Effects,
    ) -> Option<Sign> {
        if !self.active || self.finished {
            return None;
        }

        if input.throw_hook.is_held {
            let max = self.config.max_progress.max(0.0);
            self.progress = (self.progress + encounter.rod.def.reeling_speed * dt).min(max);
        }
        if self.progress >= self.config.max_progress {
            self.finished = true;
            effects.push(FishingEffect::PlaySfx(SFX_CATCH));
            return Some(Sign::Positive);
        }

        let timer = self.fatigue_timer.as_mut()?;
        timer.tick(Duration::from_secs_f32(dt.max(0.0)));
        if !timer.finished() {
            return None;
        }

        self.fatigue_timer = None;
        self.finished = true;
        let fish = &mut encounter.fish;
        fish.fatigue_count += 1;
        if fish.fatigue_count >= fish.behavior().max_fatigue_attempts {
            debug!("[Fishing] Fish recovered {} times and broke free", fish.fatigue_count);
            effects.push(FishingEffect::PlaySfx(SFX_ESCAPE));
            Some(Sign::Negative)
        } else {
            debug!(
                "[Fishing] Fish recovered ({}/{})",
                fish.fatigue_count,
                fish.behavior().max_fatigue_attempts
            );
            Some(Sign::Zero)
        }
    }
}
