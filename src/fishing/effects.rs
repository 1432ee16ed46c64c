//! Side effects produced by the fishing core during a frame.
//!
//! Phases push effects into a plain `Vec`; the plugin drains it once per frame
//! and turns each entry into the matching shared event.

use crate::shared::{EncounterResult, FishingPhase};

pub const SFX_CAST: &str = "fishing_cast";
pub const SFX_SPLASH: &str = "fishing_splash";
pub const SFX_NIBBLE: &str = "fish_nibble";
pub const SFX_HOOKED: &str = "fish_hooked";
pub const SFX_LINE_SNAP: &str = "fishing_line_snap";
pub const SFX_ESCAPE: &str = "fish_escape";
pub const SFX_CATCH: &str = "fish_catch";
/// Looping sound whose `Tension` parameter follows line wear.
pub const SFX_LINE_TENSION: &str = "fishing_line_tension";
pub const PARAM_TENSION: &str = "Tension";

#[derive(Debug, Clone, PartialEq)]
pub enum FishingEffect {
    PhaseChanged {
        from: FishingPhase,
        to: FishingPhase,
    },
    HookThrown {
        distance: f32,
    },
    Nibble {
        nibbling: bool,
    },
    PlaySfx(&'static str),
    StopSfx(&'static str),
    SfxParameter {
        sfx_id: &'static str,
        name: &'static str,
        value: f32,
    },
    EncounterEnded(EncounterResult),
}

pub type Effects = Vec<FishingEffect>;
