//! Phase sequencer for a fishing encounter.
//!
//! The machine owns one [`PhaseState`] per [`FishingPhase`] and ticks only the
//! current one. An outcome reported by the current phase is routed to a
//! transition in the same call, so a phase can never fire twice into two
//! different transitions.

use std::any::Any;
use std::collections::HashMap;

use bevy::prelude::*;
use rand::RngCore;

use super::config::FishingConfig;
use super::effects::*;
use super::encounter::Encounter;
use super::phases::*;
use crate::error::{FishingError, FishingResult};
use crate::shared::*;

/// Everything a phase may touch during one call.
pub struct PhaseContext<'a> {
    pub encounter: &'a mut Encounter,
    pub input: &'a PlayerInput,
    pub rng: &'a mut dyn RngCore,
    pub effects: &'a mut Effects,
}

/// One registered phase of the machine.
pub trait PhaseState: Any + Send + Sync {
    fn phase(&self) -> FishingPhase;

    fn enter(&mut self, ctx: &mut PhaseContext);

    fn exit(&mut self, ctx: &mut PhaseContext);

    fn update(&mut self, dt: f32, ctx: &mut PhaseContext) -> Option<Sign>;

    /// Called with the phase's own outcome before the machine leaves it.
    fn on_outcome(&mut self, _sign: Sign, _ctx: &mut PhaseContext) {}

    /// Clear leftovers from a previous encounter.
    fn reset(&mut self, _ctx: &mut PhaseContext) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Next,
    Previous,
    To(FishingPhase),
}

/// Where an outcome of `phase` leads.
pub fn route(phase: FishingPhase, sign: Sign) -> Transition {
    use FishingPhase as P;
    match (phase, sign) {
        (P::ThrowHook | P::Nibble | P::FishingBoard, Sign::Positive) => Transition::Next,
        (P::Nibble | P::FishingBoard, Sign::Negative) => Transition::To(P::None),
        (P::Reeling, Sign::Positive | Sign::Negative) => Transition::To(P::None),
        (P::Reeling, Sign::Zero) => Transition::Previous,
        _ => Transition::Stay,
    }
}

#[derive(Resource, Default)]
pub struct FishingStateMachine {
    states: HashMap<FishingPhase, Box<dyn PhaseState>>,
    current: FishingPhase,
    started: bool,
}

impl FishingStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A machine with the stock phase for every slot, already started.
    pub fn with_default_states(config: &FishingConfig) -> Self {
        let states: [Box<dyn PhaseState>; 5] = [
            Box::new(IdlePhase),
            Box::new(ThrowHookPhase::new(config.throw_hook.clone())),
            Box::new(NibblePhase::new()),
            Box::new(FishingBoardPhase::new(config.board.clone())),
            Box::new(ReelingPhase::new(config.reeling.clone())),
        ];
        Self {
            states: states.into_iter().map(|s| (s.phase(), s)).collect(),
            current: FishingPhase::None,
            started: true,
        }
    }

    pub fn current(&self) -> FishingPhase {
        self.current
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True while an encounter is being played out.
    pub fn is_running(&self) -> bool {
        self.current != FishingPhase::None
    }

    pub fn is_registered(&self, phase: FishingPhase) -> bool {
        self.states.contains_key(&phase)
    }

    pub fn missing_phases(&self) -> Vec<FishingPhase> {
        FishingPhase::ALL
            .into_iter()
            .filter(|p| !self.is_registered(*p))
            .collect()
    }

    /// Register a phase. The first registration for a slot wins.
    pub fn add_state(&mut self, state: Box<dyn PhaseState>) -> FishingResult<()> {
        let phase = state.phase();
        if self.is_registered(phase) {
            return Err(FishingError::DuplicatePhase(phase));
        }
        self.states.insert(phase, state);
        Ok(())
    }

    /// Check the registry is complete. The machine idles in `None` until an
    /// encounter begins.
    pub fn start(&mut self) -> FishingResult<()> {
        let missing = self.missing_phases();
        if !missing.is_empty() {
            return Err(FishingError::IncompleteRegistry(missing));
        }
        self.started = true;
        Ok(())
    }

    pub fn state<T: PhaseState>(&self, phase: FishingPhase) -> Option<&T> {
        self.states.get(&phase)?.as_any().downcast_ref()
    }

    pub fn state_mut<T: PhaseState>(&mut self, phase: FishingPhase) -> Option<&mut T> {
        self.states.get_mut(&phase)?.as_any_mut().downcast_mut()
    }

    /// Clear every phase and move to the first playable one. A running
    /// encounter is cancelled first.
    pub fn begin(&mut self, ctx: &mut PhaseContext) -> FishingResult<()> {
        if !self.started {
            self.start()?;
        }
        if self.is_running() {
            self.change_state(FishingPhase::None, ctx)?;
        }
        for state in self.states.values_mut() {
            state.reset(ctx);
        }
        let first = FishingPhase::FIRST.next().ok_or(FishingError::AtLastPhase)?;
        self.change_state(first, ctx)
    }

    /// Jump to `target`. Entering `None` this way counts as a cancellation.
    pub fn change_state(&mut self, target: FishingPhase, ctx: &mut PhaseContext) -> FishingResult<()> {
        self.transition(target, EncounterResult::Cancelled, ctx)
    }

    pub fn next_state(&mut self, ctx: &mut PhaseContext) -> FishingResult<()> {
        let target = self.current.next().ok_or(FishingError::AtLastPhase)?;
        self.change_state(target, ctx)
    }

    pub fn previous_state(&mut self, ctx: &mut PhaseContext) -> FishingResult<()> {
        let target = self.current.previous().ok_or(FishingError::AtFirstPhase)?;
        self.change_state(target, ctx)
    }

    /// Tick the current phase and route its outcome, if any.
    pub fn update(&mut self, dt: f32, ctx: &mut PhaseContext) -> FishingResult<Option<Sign>> {
        if !self.started {
            return Ok(None);
        }
        let phase = self.current;
        let state = self
            .states
            .get_mut(&phase)
            .ok_or(FishingError::UnregisteredPhase(phase))?;

        let Some(sign) = state.update(dt, ctx) else {
            return Ok(None);
        };
        state.on_outcome(sign, ctx);

        match route(phase, sign) {
            Transition::Stay => {}
            Transition::Next => self.next_state(ctx)?,
            Transition::Previous => self.previous_state(ctx)?,
            Transition::To(target) => {
                let result = match sign {
                    Sign::Positive => EncounterResult::Caught,
                    _ => EncounterResult::Escaped(phase),
                };
                self.transition(target, result, ctx)?;
            }
        }
        Ok(Some(sign))
    }

    fn transition(
        &mut self,
        target: FishingPhase,
        result: EncounterResult,
        ctx: &mut PhaseContext,
    ) -> FishingResult<()> {
        if target == self.current {
            return Ok(());
        }
        if !self.is_registered(target) {
            return Err(FishingError::UnregisteredPhase(target));
        }

        let from = self.current;
        if let Some(state) = self.states.get_mut(&from) {
            state.exit(ctx);
        }
        self.current = target;
        debug!("[Fishing] {:?} -> {:?}", from, target);
        ctx.effects.push(FishingEffect::PhaseChanged { from, to: target });
        if let Some(state) = self.states.get_mut(&target) {
            state.enter(ctx);
        }

        if target == FishingPhase::None {
            ctx.effects.push(FishingEffect::EncounterEnded(result));
        }
        Ok(())
    }
}
