//! Fishing domain: encounter phases, the fishing board and the state machine
//! that sequences them.

use bevy::prelude::*;
use crate::shared::*;

// ─── Sub-modules ────────────────────────────────────────────────────────────
mod behavior;
mod board;
mod config;
mod effects;
mod encounter;
mod fish_select;
mod machine;
mod nibble;
mod phases;
mod reeling;
mod throw_hook;
mod zones;

pub use behavior::*;
pub use board::*;
pub use config::*;
pub use effects::*;
pub use encounter::*;
pub use fish_select::*;
pub use machine::*;
pub use nibble::*;
pub use phases::*;
pub use reeling::*;
pub use throw_hook::*;
pub use zones::*;

// ─── Plugin ─────────────────────────────────────────────────────────────────

pub struct FishingPlugin;

impl Plugin for FishingPlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<FishingConfig>()
            .init_resource::<ActiveEncounter>()
            .init_resource::<PendingEffects>()
            .add_systems(OnEnter(GameState::Playing), build_state_machine)
            // One tick of the encounter per frame, effects forwarded last
            .add_systems(
                Update,
                (
                    start_encounter,
                    cancel_encounter,
                    tick_encounter,
                    forward_effects,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing))
                    .run_if(resource_exists::<FishingStateMachine>),
            );
    }
}

/// Effects produced this frame, waiting to become events.
#[derive(Resource, Debug, Default)]
pub struct PendingEffects(pub Effects);

// ─── Systems ─────────────────────────────────────────────────────────────────

/// Build the machine from the current config. A config with a broken zone
/// layout is replaced by the defaults.
pub fn build_state_machine(
    mut commands: Commands,
    mut config: ResMut<FishingConfig>,
    existing: Option<Res<FishingStateMachine>>,
) {
    if existing.is_some() {
        return;
    }
    if let Err(e) = config.board.zones.validate() {
        warn!("[Fishing] {}; falling back to default zones", e);
        config.board.zones = CircleZones::default();
    }

    let machine = FishingStateMachine::with_default_states(&config);
    info!(
        "[Fishing] State machine ready with {} phases",
        FishingPhase::ALL.len() - machine.missing_phases().len()
    );
    commands.insert_resource(machine);
}

/// Begin an encounter on request. Keyboard requests pick a random fish and
/// the default rod.
pub fn start_encounter(
    mut start_events: EventReader<StartEncounterEvent>,
    input: Res<PlayerInput>,
    fish_registry: Res<FishRegistry>,
    rod_registry: Res<RodRegistry>,
    mut machine: ResMut<FishingStateMachine>,
    mut active: ResMut<ActiveEncounter>,
    mut pending: ResMut<PendingEffects>,
) {
    let mut rng = rand::thread_rng();
    let request = start_events
        .read()
        .last()
        .map(|e| (e.fish_id.clone(), e.rod_id.clone()))
        .or_else(|| {
            if !input.start_encounter {
                return None;
            }
            select_fish(&fish_registry, &mut rng)
                .map(|fish_id| (fish_id, DEFAULT_ROD_ID.to_string()))
        });
    let Some((fish_id, rod_id)) = request else {
        return;
    };

    if machine.is_running() {
        info!("[Fishing] Already fishing, ignoring request for '{}'", fish_id);
        return;
    }

    let mut encounter =
        match Encounter::from_registries(&fish_id, &rod_id, &fish_registry, &rod_registry) {
            Ok(encounter) => encounter,
            Err(e) => {
                warn!("[Fishing] Cannot start encounter: {}", e);
                return;
            }
        };

    let mut ctx = PhaseContext {
        encounter: &mut encounter,
        input: &input,
        rng: &mut rng,
        effects: &mut pending.0,
    };
    if let Err(e) = machine.begin(&mut ctx) {
        error!("[Fishing] {}", e);
        return;
    }

    info!(
        "[Fishing] Encounter started: {} with {}",
        encounter.fish.def.name, encounter.rod.def.name
    );
    active.0 = Some(encounter);
}

pub fn cancel_encounter(
    mut cancel_events: EventReader<CancelEncounterEvent>,
    input: Res<PlayerInput>,
    mut machine: ResMut<FishingStateMachine>,
    mut active: ResMut<ActiveEncounter>,
    mut pending: ResMut<PendingEffects>,
) {
    let requested = cancel_events.read().count() > 0 || input.cancel;
    if !requested || !machine.is_running() {
        return;
    }
    let Some(encounter) = active.0.as_mut() else {
        return;
    };

    let mut rng = rand::thread_rng();
    let mut ctx = PhaseContext {
        encounter,
        input: &input,
        rng: &mut rng,
        effects: &mut pending.0,
    };
    if let Err(e) = machine.change_state(FishingPhase::None, &mut ctx) {
        error!("[Fishing] {}", e);
    }
}

pub fn tick_encounter(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut machine: ResMut<FishingStateMachine>,
    mut active: ResMut<ActiveEncounter>,
    mut pending: ResMut<PendingEffects>,
) {
    if !machine.is_running() {
        return;
    }
    let Some(encounter) = active.0.as_mut() else {
        warn!("[Fishing] Phase {:?} running without an encounter", machine.current());
        return;
    };

    let mut rng = rand::thread_rng();
    let mut ctx = PhaseContext {
        encounter,
        input: &input,
        rng: &mut rng,
        effects: &mut pending.0,
    };
    if let Err(e) = machine.update(time.delta_secs(), &mut ctx) {
        error!("[Fishing] {}", e);
    }
}

/// Turn this frame's effects into events. The encounter is dropped once it
/// has ended.
#[allow(clippy::too_many_arguments)]
pub fn forward_effects(
    mut pending: ResMut<PendingEffects>,
    mut active: ResMut<ActiveEncounter>,
    mut phase_events: EventWriter<FishingPhaseChangedEvent>,
    mut thrown_events: EventWriter<HookThrownEvent>,
    mut nibble_events: EventWriter<NibbleEvent>,
    mut ended_events: EventWriter<EncounterEndedEvent>,
    mut play_sfx: EventWriter<PlaySfxEvent>,
    mut stop_sfx: EventWriter<StopSfxEvent>,
    mut sfx_params: EventWriter<SfxParameterEvent>,
) {
    for effect in pending.0.drain(..) {
        match effect {
            FishingEffect::PhaseChanged { from, to } => {
                phase_events.send(FishingPhaseChangedEvent { from, to });
            }
            FishingEffect::HookThrown { distance } => {
                thrown_events.send(HookThrownEvent { distance });
            }
            FishingEffect::Nibble { nibbling } => {
                nibble_events.send(NibbleEvent { nibbling });
            }
            FishingEffect::PlaySfx(sfx_id) => {
                play_sfx.send(PlaySfxEvent {
                    sfx_id: sfx_id.to_string(),
                });
            }
            FishingEffect::StopSfx(sfx_id) => {
                stop_sfx.send(StopSfxEvent {
                    sfx_id: sfx_id.to_string(),
                });
            }
            FishingEffect::SfxParameter {
                sfx_id,
                name,
                value,
            } => {
                sfx_params.send(SfxParameterEvent {
                    sfx_id: sfx_id.to_string(),
                    name: name.to_string(),
                    value,
                });
            }
            FishingEffect::EncounterEnded(result) => {
                let fish_id = active
                    .0
                    .take()
                    .map(|e| e.fish.def.id)
                    .unwrap_or_default();
                info!("[Fishing] Encounter with '{}' ended: {:?}", fish_id, result);
                ended_events.send(EncounterEndedEvent { fish_id, result });
            }
        }
    }
}
