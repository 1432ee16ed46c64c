//! Which fish bites when the player casts without asking for one.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::shared::*;

/// Weighted random pick over every registered fish.
///
/// Fish with a non-positive weight are left out of the pool. Returns `None`
/// when nothing is left to pick.
pub fn select_fish(registry: &FishRegistry, rng: &mut dyn RngCore) -> Option<String> {
    let mut pool: Vec<&FishDef> = registry
        .fish
        .values()
        .filter(|def| {
            if def.weight > 0.0 {
                return true;
            }
            warn!("[Fishing] Skipping '{}' with weight {}", def.id, def.weight);
            false
        })
        .collect();
    // Stable order for seeded rngs.
    pool.sort_by(|a, b| a.id.cmp(&b.id));

    pool.choose_weighted(rng, |def| def.weight)
        .ok()
        .map(|def| def.id.clone())
}
