//! Stock [`PhaseState`]s wrapping each phase controller.

use std::any::Any;

use super::board::{FishingBoard, FishingBoardConfig};
use super::machine::{PhaseContext, PhaseState};
use super::nibble::NibbleController;
use super::reeling::{ReelingConfig, ReelingController};
use super::throw_hook::{ThrowHookConfig, ThrowHookController};
use crate::shared::*;

/// Resting slot between encounters.
#[derive(Debug, Default)]
pub struct IdlePhase;

impl PhaseState for IdlePhase {
    fn phase(&self) -> FishingPhase {
        FishingPhase::None
    }

    fn enter(&mut self, _ctx: &mut PhaseContext) {}

    fn exit(&mut self, _ctx: &mut PhaseContext) {}

    fn update(&mut self, _dt: f32, _ctx: &mut PhaseContext) -> Option<Sign> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ─── Throw hook ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ThrowHookPhase {
    pub controller: ThrowHookController,
}

impl ThrowHookPhase {
    pub fn new(config: ThrowHookConfig) -> Self {
        Self {
            controller: ThrowHookController::new(config),
        }
    }
}

impl PhaseState for ThrowHookPhase {
    fn phase(&self) -> FishingPhase {
        FishingPhase::ThrowHook
    }

    fn enter(&mut self, _ctx: &mut PhaseContext) {
        self.controller.activate();
    }

    fn exit(&mut self, _ctx: &mut PhaseContext) {
        self.controller.deactivate();
        self.controller.reset();
    }

    fn update(&mut self, dt: f32, ctx: &mut PhaseContext) -> Option<Sign> {
        self.controller.tick(dt, ctx.input, ctx.effects)
    }

    fn reset(&mut self, _ctx: &mut PhaseContext) {
        self.controller.reset();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ─── Nibble ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct NibblePhase {
    pub controller: NibbleController,
}

impl NibblePhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhaseState for NibblePhase {
    fn phase(&self) -> FishingPhase {
        FishingPhase::Nibble
    }

    fn enter(&mut self, ctx: &mut PhaseContext) {
        self.controller.activate(ctx.encounter.fish.behavior(), ctx.rng);
    }

    fn exit(&mut self, _ctx: &mut PhaseContext) {
        self.controller.deactivate();
        self.controller.reset();
    }

    fn update(&mut self, dt: f32, ctx: &mut PhaseContext) -> Option<Sign> {
        self.controller.tick(dt, ctx.input, ctx.rng, ctx.effects)
    }

    fn reset(&mut self, _ctx: &mut PhaseContext) {
        self.controller.reset();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ─── Fishing board ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct FishingBoardPhase {
    pub board: FishingBoard,
}

impl FishingBoardPhase {
    pub fn new(config: FishingBoardConfig) -> Self {
        Self {
            board: FishingBoard::new(config),
        }
    }
}

impl PhaseState for FishingBoardPhase {
    fn phase(&self) -> FishingPhase {
        FishingPhase::FishingBoard
    }

    fn enter(&mut self, ctx: &mut PhaseContext) {
        self.board.activate(ctx.encounter, ctx.rng, ctx.effects);
    }

    fn exit(&mut self, ctx: &mut PhaseContext) {
        self.board.deactivate(ctx.encounter, ctx.effects);
        self.board.reset();
    }

    fn update(&mut self, dt: f32, ctx: &mut PhaseContext) -> Option<Sign> {
        self.board
            .tick(dt, ctx.input, ctx.encounter, ctx.rng, ctx.effects)
    }

    fn reset(&mut self, _ctx: &mut PhaseContext) {
        self.board.reset();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ─── Reeling ─────────────────────────────────────────────────────────────────

/// Leaving reeling only deactivates it; progress is cleared when reeling
/// ends the encounter or a new encounter begins.
#[derive(Debug)]
pub struct ReelingPhase {
    pub controller: ReelingController,
}

impl ReelingPhase {
    pub fn new(config: ReelingConfig) -> Self {
        Self {
            controller: ReelingController::new(config),
        }
    }
}

impl PhaseState for ReelingPhase {
    fn phase(&self) -> FishingPhase {
        FishingPhase::Reeling
    }

    fn enter(&mut self, ctx: &mut PhaseContext) {
        self.controller.activate(ctx.encounter);
    }

    fn exit(&mut self, _ctx: &mut PhaseContext) {
        self.controller.deactivate();
    }

    fn update(&mut self, dt: f32, ctx: &mut PhaseContext) -> Option<Sign> {
        self.controller
            .tick(dt, ctx.input, ctx.encounter, ctx.effects)
    }

    fn on_outcome(&mut self, sign: Sign, ctx: &mut PhaseContext) {
        if sign != Sign::Zero {
            self.controller.reset(&mut ctx.encounter.fish);
        }
    }

    fn reset(&mut self, ctx: &mut PhaseContext) {
        self.controller.reset(&mut ctx.encounter.fish);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::config::FishingConfig;
    use crate::fishing::effects::*;
    use crate::fishing::encounter::Encounter;
    use crate::fishing::machine::FishingStateMachine;
    use bevy::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quick_fish() -> FishDef {
        FishDef {
            id: "test_fish".into(),
            name: "Test Fish".into(),
            power: 1.0,
            weight: 1.0,
            behavior: FishBehaviorDef {
                nibble_interval: (0.5, 0.5),
                nibble_window: (1.0, 1.0),
                max_nibble_attempts: 3,
                fatigue_duration: 1.5,
                max_fatigue_attempts: 2,
                wander: WanderProfile {
                    dwell_secs: (1000.0, 1000.0),
                    ..WanderProfile::default()
                },
            },
        }
    }

    fn strong_rod() -> RodDef {
        RodDef {
            id: "test_rod".into(),
            name: "Test Rod".into(),
            power: 20.0,
            line_durability: 100.0,
            line_regen: 100.0,
            reeling_speed: 50.0,
        }
    }

    /// Regen well below the board's tension, so every board round wears the line.
    fn fraying_rod() -> RodDef {
        RodDef {
            line_regen: 20.0,
            ..strong_rod()
        }
    }

    fn button(signal: ButtonSignal) -> PlayerInput {
        PlayerInput {
            throw_hook: signal,
            ..PlayerInput::default()
        }
    }

    struct Run {
        machine: FishingStateMachine,
        encounter: Encounter,
        rng: StdRng,
        effects: Effects,
    }

    impl Run {
        fn new() -> Self {
            Self::with_rod(strong_rod())
        }

        fn with_rod(rod: RodDef) -> Self {
            Self {
                machine: FishingStateMachine::with_default_states(&FishingConfig::default()),
                encounter: Encounter::new(quick_fish(), rod),
                rng: StdRng::seed_from_u64(5),
                effects: Effects::new(),
            }
        }

        fn begin(&mut self) {
            let input = PlayerInput::default();
            let mut ctx = PhaseContext {
                encounter: &mut self.encounter,
                input: &input,
                rng: &mut self.rng,
                effects: &mut self.effects,
            };
            self.machine.begin(&mut ctx).unwrap();
        }

        fn step(&mut self, dt: f32, input: PlayerInput) -> Option<Sign> {
            let mut ctx = PhaseContext {
                encounter: &mut self.encounter,
                input: &input,
                rng: &mut self.rng,
                effects: &mut self.effects,
            };
            self.machine.update(dt, &mut ctx).unwrap()
        }

        fn board(&mut self) -> &mut FishingBoard {
            &mut self
                .machine
                .state_mut::<FishingBoardPhase>(FishingPhase::FishingBoard)
                .unwrap()
                .board
        }

        /// Cast, then pull on the first nibble.
        fn hook_fish(&mut self) {
            self.begin();
            self.step(1.0, button(ButtonSignal::held()));
            self.step(0.0, button(ButtonSignal::released_after_hold()));
            self.step(1.0, PlayerInput::default());
            assert_eq!(self.machine.current(), FishingPhase::Nibble);
            self.step(0.5, PlayerInput::default());
            self.step(0.1, button(ButtonSignal::pressed()));
            assert_eq!(self.machine.current(), FishingPhase::FishingBoard);
        }

        /// Park the hook opposite the fish until the board is won.
        fn win_board(&mut self) {
            for _ in 0..100 {
                self.board().set_hook_position(Vec2::new(0.0, 1.0));
                self.board().set_fish_position(Vec2::new(0.0, -0.5));
                self.step(0.25, PlayerInput::default());
                if self.machine.current() != FishingPhase::FishingBoard {
                    return;
                }
            }
            panic!("board never resolved");
        }
    }

    #[test]
    fn test_encounter_reaches_reeling_and_catches() {
        let mut run = Run::new();
        run.hook_fish();
        run.win_board();
        assert_eq!(run.machine.current(), FishingPhase::Reeling);

        run.step(1.0, button(ButtonSignal::held()));
        run.step(1.0, button(ButtonSignal::held()));
        assert_eq!(run.machine.current(), FishingPhase::None);
        assert!(run
            .effects
            .contains(&FishingEffect::EncounterEnded(EncounterResult::Caught)));
    }

    #[test]
    fn test_recovered_fish_sends_player_back_to_board() {
        let mut run = Run::new();
        run.hook_fish();
        run.win_board();

        run.step(1.0, button(ButtonSignal::held()));
        run.step(0.5, PlayerInput::default());
        assert_eq!(run.machine.current(), FishingPhase::FishingBoard);
        assert_eq!(run.encounter.fish.fatigue_count, 1);
        assert_eq!(run.board().fatigue(), 50.0);

        // Reeling progress waits while the board is replayed.
        let reeling = run
            .machine
            .state::<ReelingPhase>(FishingPhase::Reeling)
            .unwrap();
        assert_eq!(reeling.controller.progress(), 50.0);
        assert!(!reeling.controller.is_active());

        run.win_board();
        run.step(1.5, PlayerInput::default());
        assert_eq!(run.machine.current(), FishingPhase::None);
        assert_eq!(run.encounter.fish.fatigue_count, 0);
        assert!(run
            .effects
            .contains(&FishingEffect::EncounterEnded(EncounterResult::Escaped(
                FishingPhase::Reeling
            ))));
    }

    #[test]
    fn test_line_wear_carries_back_onto_board() {
        let mut run = Run::with_rod(fraying_rod());
        let full = run.encounter.rod.def.line_durability;
        run.hook_fish();
        run.win_board();
        let worn = run.encounter.rod.current_line_durability;
        assert!(worn < full, "line did not wear: {worn}");
        assert!(worn > 0.0);

        // Let the fish recover so the board is played again.
        run.step(1.0, button(ButtonSignal::held()));
        run.step(0.5, PlayerInput::default());
        assert_eq!(run.machine.current(), FishingPhase::FishingBoard);
        assert_eq!(run.board().fatigue(), run.board().config().max_fatigue / 2.0);
        assert_eq!(run.encounter.rod.current_line_durability, worn);

        run.win_board();
        assert_eq!(run.machine.current(), FishingPhase::Reeling);
        assert!(run.encounter.rod.current_line_durability < worn);
    }

    #[test]
    fn test_exit_resets_throw_and_board() {
        let mut run = Run::new();
        run.hook_fish();
        let throw = run
            .machine
            .state::<ThrowHookPhase>(FishingPhase::ThrowHook)
            .unwrap();
        assert!(!throw.controller.is_active());
        assert!(throw.controller.distance().is_none());

        run.board().set_hook_position(Vec2::new(1.0, 0.0));
        run.begin();
        assert_eq!(run.board().hook_position(), Vec2::ZERO);
        assert!(!run.board().is_active());
    }
}
