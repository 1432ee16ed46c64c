//! Fish AI for the fishing board.
//!
//! The board writes a [`Blackboard`] every tick and hands it to the
//! [`FishAgent`] by reference. The agent answers with at most one
//! [`FishCommand`], which the board applies to the fish.

use std::time::Duration;

use bevy::math::Vec2;
use bevy::time::{Timer, TimerMode};
use rand::Rng;
use rand::RngCore;

use super::encounter::roll_range;
use super::zones::{CircleZones, Zone};
use crate::shared::WanderProfile;

/// Board readings the AI decides on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blackboard {
    pub fish_zone: Zone,
    pub hook_zone: Zone,
    pub fish_unit_position: Vec2,
    pub hook_unit_position: Vec2,
    /// Degrees between the hook and fish bearings, 0–180.
    pub angle_difference: f32,
    pub fatigue_percent: f32,
}

impl Default for Blackboard {
    fn default() -> Self {
        Self {
            fish_zone: Zone::Green,
            hook_zone: Zone::Green,
            fish_unit_position: Vec2::ZERO,
            hook_unit_position: Vec2::ZERO,
            angle_difference: 0.0,
            fatigue_percent: 0.0,
        }
    }
}

/// Leaf actions the AI can ask the board to perform. Targets are unit positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FishCommand {
    MoveTimeBased { target: Vec2, duration: f32 },
    MoveSpeedBased { target: Vec2, speed: f32 },
    Warp { target: Vec2 },
}

/// Rest-then-move loop: after each dwell the fish picks a different zone and
/// swims (or warps) somewhere inside it.
#[derive(Debug, Clone)]
pub struct FishAgent {
    profile: WanderProfile,
    running: bool,
    dwell: Option<Timer>,
}

impl FishAgent {
    pub fn new(profile: WanderProfile) -> Self {
        Self {
            profile,
            running: false,
            dwell: None,
        }
    }

    pub fn set_profile(&mut self, profile: WanderProfile) {
        self.profile = profile;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, rng: &mut dyn RngCore) {
        self.running = true;
        self.restart_dwell(rng);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.dwell = None;
    }

    /// Advance the dwell timer. Waits while the fish is still swimming.
    pub fn tick(
        &mut self,
        dt: f32,
        blackboard: &Blackboard,
        zones: &CircleZones,
        fish_moving: bool,
        rng: &mut dyn RngCore,
    ) -> Option<FishCommand> {
        if !self.running || fish_moving {
            return None;
        }
        let timer = self.dwell.as_mut()?;
        timer.tick(Duration::from_secs_f32(dt.max(0.0)));
        if !timer.finished() {
            return None;
        }

        let command = self.choose_move(blackboard, zones, rng);
        self.restart_dwell(rng);
        Some(command)
    }

    fn choose_move(
        &self,
        blackboard: &Blackboard,
        zones: &CircleZones,
        rng: &mut dyn RngCore,
    ) -> FishCommand {
        let zone = zones.random_zone_except(blackboard.fish_zone, rng);
        let mut target = zones.random_position_in_zone(zone, rng);

        // Swim onto the hook's bearing so the pull angle collapses.
        if rng.gen_bool(self.profile.evade_chance.clamp(0.0, 1.0).into()) {
            if let Some(bearing) = blackboard.hook_unit_position.try_normalize() {
                target = bearing * target.length();
            }
        }

        if rng.gen_bool(self.profile.warp_chance.clamp(0.0, 1.0).into()) {
            return FishCommand::Warp { target };
        }

        // Tired fish swim slower.
        let speed = roll_range(rng, self.profile.move_speed)
            * (1.0 - 0.5 * blackboard.fatigue_percent.clamp(0.0, 1.0));
        FishCommand::MoveSpeedBased { target, speed }
    }

    fn restart_dwell(&mut self, rng: &mut dyn RngCore) {
        let secs = roll_range(rng, self.profile.dwell_secs).max(0.0);
        self.dwell = Some(Timer::from_seconds(secs, TimerMode::Once));
    }
}
