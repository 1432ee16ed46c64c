//! Stat instances shared by the phases of one encounter.

use bevy::prelude::*;
use rand::Rng;
use rand::RngCore;

use crate::error::{FishingError, FishingResult};
use crate::shared::*;

/// The hooked fish. `fatigue_count` survives the Reeling → FishingBoard
/// backtrack and is cleared when reeling finishes either way.
#[derive(Debug, Clone, PartialEq)]
pub struct Fish {
    pub def: FishDef,
    pub fatigue_count: u32,
}

impl Fish {
    pub fn new(def: FishDef) -> Self {
        Self {
            def,
            fatigue_count: 0,
        }
    }

    pub fn power(&self) -> f32 {
        self.def.power
    }

    pub fn behavior(&self) -> &FishBehaviorDef {
        &self.def.behavior
    }
}

/// The rod in hand. Line durability is spent on the fishing board and carried
/// over every re-entry for the rest of the encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct FishingRod {
    pub def: RodDef,
    pub current_line_durability: f32,
}

impl FishingRod {
    pub fn new(def: RodDef) -> Self {
        let current_line_durability = def.line_durability;
        Self {
            def,
            current_line_durability,
        }
    }

    pub fn power(&self) -> f32 {
        self.def.power
    }

    /// Current over full durability in [0, 1]; 0 for a rod with no line.
    pub fn durability_percent(&self) -> f32 {
        if self.def.line_durability <= 0.0 {
            return 0.0;
        }
        (self.current_line_durability / self.def.line_durability).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub fish: Fish,
    pub rod: FishingRod,
}

impl Encounter {
    pub fn new(fish: FishDef, rod: RodDef) -> Self {
        Self {
            fish: Fish::new(fish),
            rod: FishingRod::new(rod),
        }
    }

    /// Build an encounter from registry ids.
    pub fn from_registries(
        fish_id: &str,
        rod_id: &str,
        fish_registry: &FishRegistry,
        rod_registry: &RodRegistry,
    ) -> FishingResult<Self> {
        let fish = fish_registry
            .fish
            .get(fish_id)
            .cloned()
            .ok_or_else(|| FishingError::UnknownFish(fish_id.to_string()))?;
        let rod = rod_registry
            .rods
            .get(rod_id)
            .cloned()
            .ok_or_else(|| FishingError::UnknownRod(rod_id.to_string()))?;
        Ok(Self::new(fish, rod))
    }
}

/// The encounter currently in play, if any.
#[derive(Resource, Debug, Default)]
pub struct ActiveEncounter(pub Option<Encounter>);

/// Uniform draw from an inclusive `(lo, hi)` range; `lo` when the range is empty.
pub fn roll_range(rng: &mut dyn RngCore, range: (f32, f32)) -> f32 {
    let (lo, hi) = range;
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}
