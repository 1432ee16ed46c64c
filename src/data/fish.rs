use crate::shared::*;

/// Populate the FishRegistry with every species that can be hooked.
///
/// Each fish has:
///   - power: pull fighting the rod on the fishing board
///   - weight: relative chance of biting on an unaimed cast
///   - nibble_interval / nibble_window: seconds before and during each nibble
///   - max_nibble_attempts: nibbles offered before the fish swims off
///   - fatigue_duration: seconds of reeling before it recovers
///   - max_fatigue_attempts: recoveries allowed before it breaks free
///   - wander: how restless it is on the fishing board
pub fn populate_fish(registry: &mut FishRegistry) {
    let fish: Vec<FishDef> = vec![
        // ── Pond Fish ─────────────────────────────────────────────────────────────

        FishDef {
            id: "bluegill".into(),
            name: "Bluegill".into(),
            power: 1.5,
            weight: 10.0,
            behavior: FishBehaviorDef {
                nibble_interval: (1.0, 3.0),
                nibble_window: (1.0, 1.6),
                max_nibble_attempts: 4,
                fatigue_duration: 8.0,
                max_fatigue_attempts: 3,
                wander: WanderProfile {
                    dwell_secs: (0.8, 1.6),
                    move_speed: (0.4, 0.8),
                    evade_chance: 0.1,
                    warp_chance: 0.0,
                },
            },
        },

        FishDef {
            id: "carp".into(),
            name: "Carp".into(),
            power: 2.5,
            weight: 8.0,
            behavior: FishBehaviorDef {
                nibble_interval: (2.0, 5.0),
                nibble_window: (0.8, 1.4),
                max_nibble_attempts: 3,
                fatigue_duration: 6.0,
                max_fatigue_attempts: 3,
                wander: WanderProfile {
                    dwell_secs: (1.0, 2.0),
                    move_speed: (0.3, 0.6),
                    evade_chance: 0.2,
                    warp_chance: 0.0,
                },
            },
        },

        // ── River Fish ────────────────────────────────────────────────────────────

        FishDef {
            id: "trout".into(),
            name: "Trout".into(),
            power: 3.0,
            weight: 6.0,
            behavior: FishBehaviorDef {
                nibble_interval: (1.5, 4.0),
                nibble_window: (0.6, 1.0),
                max_nibble_attempts: 3,
                fatigue_duration: 5.0,
                max_fatigue_attempts: 2,
                wander: WanderProfile {
                    dwell_secs: (0.4, 1.0),
                    move_speed: (0.8, 1.4),
                    evade_chance: 0.35,
                    warp_chance: 0.0,
                },
            },
        },

        FishDef {
            id: "pike".into(),
            name: "Pike".into(),
            power: 4.5,
            weight: 3.0,
            behavior: FishBehaviorDef {
                nibble_interval: (3.0, 6.0),
                nibble_window: (0.5, 0.9),
                max_nibble_attempts: 2,
                fatigue_duration: 4.0,
                max_fatigue_attempts: 2,
                wander: WanderProfile {
                    dwell_secs: (0.3, 0.8),
                    move_speed: (1.0, 1.6),
                    evade_chance: 0.5,
                    warp_chance: 0.05,
                },
            },
        },

        // ── Deep Water ────────────────────────────────────────────────────────────

        FishDef {
            id: "sturgeon".into(),
            name: "Sturgeon".into(),
            power: 6.0,
            weight: 1.0,
            behavior: FishBehaviorDef {
                nibble_interval: (4.0, 8.0),
                nibble_window: (0.4, 0.7),
                max_nibble_attempts: 2,
                fatigue_duration: 3.5,
                max_fatigue_attempts: 1,
                wander: WanderProfile {
                    dwell_secs: (0.2, 0.6),
                    move_speed: (1.2, 2.0),
                    evade_chance: 0.6,
                    warp_chance: 0.15,
                },
            },
        },
    ];

    for def in fish {
        registry.fish.insert(def.id.clone(), def);
    }
}
