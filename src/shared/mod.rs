//! Shared states, resources and events for Angler.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level app state
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// FISHING PHASES
// ═══════════════════════════════════════════════════════════════════════

/// One discrete stage of a fishing encounter, in sequence order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum FishingPhase {
    #[default]
    None = 0,
    ThrowHook = 1,
    Nibble = 2,
    FishingBoard = 3,
    Reeling = 4,
}

impl FishingPhase {
    pub const ALL: [FishingPhase; 5] = [
        FishingPhase::None,
        FishingPhase::ThrowHook,
        FishingPhase::Nibble,
        FishingPhase::FishingBoard,
        FishingPhase::Reeling,
    ];

    pub const FIRST: FishingPhase = FishingPhase::None;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The phase after this one, or `None` at the end of the sequence.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The phase before this one, or `None` at the start of the sequence.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

/// Outcome a phase reports to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterResult {
    Caught,
    /// The fish got away during the given phase.
    Escaped(FishingPhase),
    Cancelled,
}

// ═══════════════════════════════════════════════════════════════════════
// FISH & ROD DEFINITIONS
// ═══════════════════════════════════════════════════════════════════════

/// How the fish AI roams the board while it is hooked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WanderProfile {
    /// Seconds the fish rests between moves.
    pub dwell_secs: (f32, f32),
    /// Unit-circle distance per second while moving.
    pub move_speed: (f32, f32),
    /// Chance a move swims toward the hook's bearing to spoil the pull angle.
    pub evade_chance: f32,
    /// Chance a move is an instant warp instead of a swim.
    pub warp_chance: f32,
}

impl Default for WanderProfile {
    fn default() -> Self {
        Self {
            dwell_secs: (0.4, 1.2),
            move_speed: (0.6, 1.2),
            evade_chance: 0.35,
            warp_chance: 0.0,
        }
    }
}

/// Per-species timing and attempt limits across the encounter phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishBehaviorDef {
    /// Seconds to wait before each nibble.
    pub nibble_interval: (f32, f32),
    /// Seconds each nibble lasts.
    pub nibble_window: (f32, f32),
    pub max_nibble_attempts: u32,
    /// Seconds of reeling before the fish regains its strength.
    pub fatigue_duration: f32,
    pub max_fatigue_attempts: u32,
    pub wander: WanderProfile,
}

impl Default for FishBehaviorDef {
    fn default() -> Self {
        Self {
            nibble_interval: (1.5, 4.0),
            nibble_window: (0.6, 1.2),
            max_nibble_attempts: 3,
            fatigue_duration: 4.0,
            max_fatigue_attempts: 2,
            wander: WanderProfile::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishDef {
    pub id: String,
    pub name: String,
    /// Pull strength fighting the rod on the fishing board.
    pub power: f32,
    /// Relative chance of biting on an unaimed cast. Zero never bites.
    pub weight: f32,
    pub behavior: FishBehaviorDef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RodDef {
    pub id: String,
    pub name: String,
    pub power: f32,
    /// Full line durability.
    pub line_durability: f32,
    /// Durability recovered per second before tension is subtracted.
    pub line_regen: f32,
    /// Reeling progress per second while the button is held.
    pub reeling_speed: f32,
}

/// Rod handed to the player when an encounter does not name one.
pub const DEFAULT_ROD_ID: &str = "bamboo_rod";

#[derive(Resource, Debug, Clone, Default)]
pub struct FishRegistry {
    pub fish: HashMap<String, FishDef>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RodRegistry {
    pub rods: HashMap<String, RodDef>,
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Edge and level view of a single button for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ButtonSignal {
    /// Pressed this frame.
    pub is_down: bool,
    /// Released this frame.
    pub is_up: bool,
    /// Currently pressed.
    pub is_held: bool,
    /// Released this frame after being held past the hold threshold.
    pub is_up_after_held: bool,
}

impl ButtonSignal {
    pub fn pressed() -> Self {
        Self {
            is_down: true,
            is_held: true,
            ..Self::default()
        }
    }

    pub fn held() -> Self {
        Self {
            is_held: true,
            ..Self::default()
        }
    }

    pub fn released_after_hold() -> Self {
        Self {
            is_up: true,
            is_up_after_held: true,
            ..Self::default()
        }
    }
}

/// Game actions for the current frame. Reset and refilled every PreUpdate.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Throw / pull / reel button.
    pub throw_hook: ButtonSignal,
    /// Mouse motion accumulated this frame.
    pub hook_delta: Vec2,
    /// Gamepad stick deflection used to steer the hook.
    pub hook_stick: Vec2,
    pub start_encounter: bool,
    pub cancel: bool,
}

/// Which set of bindings is live.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Fishing,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub throw_hook: KeyCode,
    pub start_encounter: KeyCode,
    pub cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            throw_hook: KeyCode::Space,
            start_encounter: KeyCode::KeyF,
            cancel: KeyCode::Escape,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Begin a fishing encounter with the given fish and rod definitions.
#[derive(Event, Debug, Clone)]
pub struct StartEncounterEvent {
    pub fish_id: String,
    pub rod_id: String,
}

/// Abandon the running encounter.
#[derive(Event, Debug, Clone, Default)]
pub struct CancelEncounterEvent;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FishingPhaseChangedEvent {
    pub from: FishingPhase,
    pub to: FishingPhase,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HookThrownEvent {
    pub distance: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NibbleEvent {
    pub nibbling: bool,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct EncounterEndedEvent {
    pub fish_id: String,
    pub result: EncounterResult,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct StopSfxEvent {
    pub sfx_id: String,
}

/// Set a continuous parameter on a playing sound.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SfxParameterEvent {
    pub sfx_id: String,
    pub name: String,
    pub value: f32,
}
