//! Fishing board skill check.
//!
//! The hook and the fish sit on a circular board split into Green/Yellow/Red
//! zones. Every tick the board integrates two resources:
//!
//! - **Fatigue** rises while the rod out-pulls the fish. The rod's pull is
//!   scaled by how far the hook sits from the fish's bearing (`pull_percent`),
//!   so the player wants the hook on the opposite side of the board.
//! - **Line durability** drains under combined tension and recovers at the
//!   rod's regen rate. It lives on the rod and carries across re-entries.
//!
//! Fatigue reaching max wins. Fatigue reaching zero or the line snapping loses;
//! a snapped line wins any same-tick tie.

use bevy::prelude::*;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::behavior::{Blackboard, FishAgent, FishCommand};
use super::effects::*;
use super::encounter::Encounter;
use super::zones::{facing_center, unsigned_angle, CircleZones, Zone};
use crate::shared::*;

// ─── Config ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishingBoardConfig {
    /// Board units per mouse-delta unit per second.
    pub mouse_sensitivity: f32,
    /// Board units per second at full stick deflection.
    pub gamepad_sensitivity: f32,
    /// Inward drift on the hook at zero line durability, board units per second.
    pub inertia: f32,
    pub max_fatigue: f32,
    pub zones: CircleZones,
}

impl Default for FishingBoardConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 60.0,
            gamepad_sensitivity: 400.0,
            inertia: 120.0,
            max_fatigue: 100.0,
            zones: CircleZones::default(),
        }
    }
}

// ─── Resource math ───────────────────────────────────────────────────────────

/// Fatigue change per second.
pub fn fatigue_rate(
    rod_power: f32,
    hook_multiplier: f32,
    pull_percent: f32,
    fish_power: f32,
    fish_multiplier: f32,
) -> f32 {
    rod_power * hook_multiplier * pull_percent - fish_power * fish_multiplier
}

/// Combined pull on the line from both ends.
pub fn line_tension(
    rod_power: f32,
    hook_multiplier: f32,
    fish_power: f32,
    fish_multiplier: f32,
) -> f32 {
    rod_power * hook_multiplier + fish_power * fish_multiplier
}

// ─── Fish tween ──────────────────────────────────────────────────────────────

/// Out-quad glide of the fish between two unit positions.
#[derive(Debug, Clone, PartialEq)]
pub struct FishTween {
    from: Vec2,
    to: Vec2,
    duration: f32,
    elapsed: f32,
}

impl FishTween {
    pub fn new(from: Vec2, to: Vec2, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Step forward and return the eased position.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = self.elapsed / self.duration;
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from.lerp(self.to, eased)
    }
}

// ─── Derived state ───────────────────────────────────────────────────────────

/// Everything computed from the two positions, refreshed once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardReadout {
    pub hook_unit_position: Vec2,
    pub fish_unit_position: Vec2,
    pub hook_zone: Zone,
    pub fish_zone: Zone,
    pub hook_multiplier: f32,
    pub fish_multiplier: f32,
    pub angle_difference: f32,
    pub pull_percent: f32,
}

impl BoardReadout {
    pub fn compute(zones: &CircleZones, hook_position: Vec2, fish_position: Vec2) -> Self {
        let hook_unit_position = zones.unit_circle(hook_position);
        let fish_unit_position = zones.unit_circle(fish_position);
        let angle_difference = unsigned_angle(hook_position, fish_position);
        Self {
            hook_unit_position,
            fish_unit_position,
            hook_zone: zones.classify(hook_unit_position.length()),
            fish_zone: zones.classify(fish_unit_position.length()),
            hook_multiplier: zones.power_multiplier(hook_unit_position),
            fish_multiplier: zones.power_multiplier(fish_unit_position),
            angle_difference,
            pull_percent: angle_difference / 180.0,
        }
    }
}

// ─── Board ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardStatus {
    #[default]
    Idle,
    Active,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct FishingBoard {
    config: FishingBoardConfig,
    status: BoardStatus,
    hook_position: Vec2,
    fish_position: Vec2,
    hook_rotation: f32,
    fish_rotation: f32,
    readout: BoardReadout,
    fatigue: f32,
    fish_tween: Option<FishTween>,
    agent: FishAgent,
    blackboard: Blackboard,
}

impl FishingBoard {
    pub fn new(config: FishingBoardConfig) -> Self {
        let readout = BoardReadout::compute(&config.zones, Vec2::ZERO, Vec2::ZERO);
        let fatigue = config.max_fatigue / 2.0;
        Self {
            config,
            status: BoardStatus::Idle,
            hook_position: Vec2::ZERO,
            fish_position: Vec2::ZERO,
            hook_rotation: 0.0,
            fish_rotation: 0.0,
            readout,
            fatigue,
            fish_tween: None,
            agent: FishAgent::new(WanderProfile::default()),
            blackboard: Blackboard::default(),
        }
    }

    pub fn config(&self) -> &FishingBoardConfig {
        &self.config
    }

    pub fn zones(&self) -> &CircleZones {
        &self.config.zones
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == BoardStatus::Active
    }

    pub fn hook_position(&self) -> Vec2 {
        self.hook_position
    }

    pub fn fish_position(&self) -> Vec2 {
        self.fish_position
    }

    /// Sprite facing angles (degrees) that turn hook and fish toward the center.
    pub fn rotations(&self) -> (f32, f32) {
        (self.hook_rotation, self.fish_rotation)
    }

    pub fn readout(&self) -> &BoardReadout {
        &self.readout
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn fatigue(&self) -> f32 {
        self.fatigue
    }

    pub fn fatigue_percent(&self) -> f32 {
        if self.config.max_fatigue <= 0.0 {
            return 0.0;
        }
        (self.fatigue / self.config.max_fatigue).clamp(0.0, 1.0)
    }

    pub fn is_fish_moving(&self) -> bool {
        self.fish_tween.as_ref().is_some_and(|t| !t.is_finished())
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Center both pieces, reset fatigue to half and start the fish AI.
    pub fn activate(&mut self, encounter: &Encounter, rng: &mut dyn RngCore, effects: &mut Effects) {
        self.fish_tween = None;
        self.set_fish_position(Vec2::ZERO);
        self.set_hook_position(Vec2::ZERO);
        self.fatigue = self.config.max_fatigue / 2.0;
        self.agent.set_profile(encounter.fish.behavior().wander.clone());
        self.agent.start(rng);
        self.refresh();
        self.status = BoardStatus::Active;

        effects.push(FishingEffect::PlaySfx(SFX_LINE_TENSION));
        push_tension(effects, encounter.rod.durability_percent());
    }

    /// Stop ticking, stop the AI and silence the tension loop.
    pub fn deactivate(&mut self, encounter: &Encounter, effects: &mut Effects) {
        if self.status == BoardStatus::Idle {
            return;
        }
        self.status = BoardStatus::Idle;
        self.fish_tween = None;
        self.agent.stop();
        self.fatigue = self.config.max_fatigue / 2.0;

        push_tension(effects, encounter.rod.durability_percent());
        effects.push(FishingEffect::StopSfx(SFX_LINE_TENSION));
    }

    /// Return both pieces to the center.
    pub fn reset(&mut self) {
        self.fish_tween = None;
        self.hook_position = Vec2::ZERO;
        self.fish_position = Vec2::ZERO;
        self.hook_rotation = 0.0;
        self.fish_rotation = 0.0;
        self.readout = BoardReadout::compute(&self.config.zones, Vec2::ZERO, Vec2::ZERO);
        self.blackboard = Blackboard::default();
    }

    // ─── Per-frame ───────────────────────────────────────────────────────

    /// Advance one frame. Returns `Positive` when the fish tires out and
    /// `Negative` when the line snaps or the fish wins the tug of war.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        encounter: &mut Encounter,
        rng: &mut dyn RngCore,
        effects: &mut Effects,
    ) -> Option<Sign> {
        if self.status != BoardStatus::Active {
            return None;
        }

        let fish_moving = self.is_fish_moving();
        if let Some(command) =
            self.agent
                .tick(dt, &self.blackboard, &self.config.zones, fish_moving, rng)
        {
            self.apply(command);
        }

        if let Some(tween) = self.fish_tween.as_mut() {
            let unit = tween.advance(dt);
            let finished = tween.is_finished();
            self.set_fish_position(unit);
            if finished {
                self.fish_tween = None;
            }
        }

        let steer = input.hook_delta * self.config.mouse_sensitivity
            + input.hook_stick * self.config.gamepad_sensitivity;
        self.move_hook(steer, dt, encounter.rod.durability_percent());

        self.refresh();
        self.integrate(dt, encounter);
        push_tension(effects, encounter.rod.durability_percent());
        self.write_blackboard();

        self.judge(encounter, effects)
    }

    /// Move the hook by an already sensitivity-scaled `velocity`, dragged
    /// toward the center harder the more worn the line is.
    pub fn move_hook(&mut self, velocity: Vec2, dt: f32, durability_percent: f32) {
        let to_center = (-self.hook_position).normalize_or_zero();
        let inertia = (1.0 - durability_percent.clamp(0.0, 1.0)) * self.config.inertia;
        let moved = self.hook_position + to_center * inertia * dt + velocity * dt;
        self.hook_position = self.config.zones.clamp_to_board(moved);
        self.hook_rotation = facing_center(self.hook_position);
    }

    /// Place the hook at a unit position.
    pub fn set_hook_position(&mut self, unit: Vec2) {
        let position = self.config.zones.board_position(unit);
        self.hook_position = self.config.zones.clamp_to_board(position);
        self.hook_rotation = facing_center(self.hook_position);
    }

    /// Place the fish at a unit position.
    pub fn set_fish_position(&mut self, unit: Vec2) {
        let position = self.config.zones.board_position(unit);
        self.fish_position = self.config.zones.clamp_to_board(position);
        self.fish_rotation = facing_center(self.fish_position);
    }

    /// Glide the fish to `target` over `duration` seconds, replacing any glide
    /// in flight.
    pub fn move_fish_time_based(&mut self, target: Vec2, duration: f32) {
        let from = self.config.zones.unit_circle(self.fish_position);
        self.fish_tween = Some(FishTween::new(from, target, duration));
    }

    /// Glide the fish to `target` at `speed` unit-circle distance per second.
    pub fn move_fish_speed_based(&mut self, target: Vec2, speed: f32) {
        if speed <= 0.0 {
            warn!("[Fishing] Ignoring fish move with non-positive speed {}", speed);
            return;
        }
        let from = self.config.zones.unit_circle(self.fish_position);
        let duration = from.distance(target) / speed;
        self.fish_tween = Some(FishTween::new(from, target, duration));
    }

    pub fn apply(&mut self, command: FishCommand) {
        match command {
            FishCommand::MoveTimeBased { target, duration } => {
                self.move_fish_time_based(target, duration)
            }
            FishCommand::MoveSpeedBased { target, speed } => {
                self.move_fish_speed_based(target, speed)
            }
            FishCommand::Warp { target } => {
                self.fish_tween = None;
                self.set_fish_position(target);
            }
        }
    }

    /// Recompute everything derived from the two positions.
    fn refresh(&mut self) {
        self.readout =
            BoardReadout::compute(&self.config.zones, self.hook_position, self.fish_position);
        self.write_blackboard();
    }

    fn integrate(&mut self, dt: f32, encounter: &mut Encounter) {
        let r = self.readout;
        let rod_power = encounter.rod.power();
        let fish_power = encounter.fish.power();

        let fatigue_delta = fatigue_rate(
            rod_power,
            r.hook_multiplier,
            r.pull_percent,
            fish_power,
            r.fish_multiplier,
        );
        self.fatigue =
            (self.fatigue + fatigue_delta * dt).clamp(0.0, self.config.max_fatigue.max(0.0));

        let tension = line_tension(rod_power, r.hook_multiplier, fish_power, r.fish_multiplier);
        let rod = &mut encounter.rod;
        let durability = rod.current_line_durability + (rod.def.line_regen - tension) * dt;
        rod.current_line_durability = durability.clamp(0.0, rod.def.line_durability.max(0.0));
    }

    fn write_blackboard(&mut self) {
        let r = self.readout;
        self.blackboard = Blackboard {
            fish_zone: r.fish_zone,
            hook_zone: r.hook_zone,
            fish_unit_position: r.fish_unit_position,
            hook_unit_position: r.hook_unit_position,
            angle_difference: r.angle_difference,
            fatigue_percent: self.fatigue_percent(),
        };
    }

    fn judge(&mut self, encounter: &Encounter, effects: &mut Effects) -> Option<Sign> {
        if encounter.rod.current_line_durability <= 0.0 {
            debug!("[Fishing] Line snapped");
            self.status = BoardStatus::Lost;
            effects.push(FishingEffect::PlaySfx(SFX_LINE_SNAP));
            return Some(Sign::Negative);
        }
        if self.fatigue <= 0.0 {
            debug!("[Fishing] Fish out-pulled the rod");
            self.status = BoardStatus::Lost;
            effects.push(FishingEffect::PlaySfx(SFX_ESCAPE));
            return Some(Sign::Negative);
        }
        if self.fatigue >= self.config.max_fatigue {
            debug!("[Fishing] Fish is exhausted");
            self.status = BoardStatus::Won;
            return Some(Sign::Positive);
        }
        None
    }
}

fn push_tension(effects: &mut Effects, durability_percent: f32) {
    effects.push(FishingEffect::SfxParameter {
        sfx_id: SFX_LINE_TENSION,
        name: PARAM_TENSION,
        value: 1.0 - durability_percent,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_fish(power: f32) -> FishDef {
        FishDef {
            id: "test_fish".into(),
            name: "Test Fish".into(),
            power,
            weight: 1.0,
            behavior: FishBehaviorDef {
                wander: WanderProfile {
                    dwell_secs: (1000.0, 1000.0),
                    ..WanderProfile::default()
                },
                ..FishBehaviorDef::default()
            },
        }
    }

    fn rod(power: f32, durability: f32, regen: f32) -> RodDef {
        RodDef {
            id: "test_rod".into(),
            name: "Test Rod".into(),
            power,
            line_durability: durability,
            line_regen: regen,
            reeling_speed: 10.0,
        }
    }

    fn active_board(encounter: &Encounter) -> (FishingBoard, StdRng, Effects) {
        let mut rng = StdRng::seed_from_u64(42);
        let mut effects = Effects::new();
        let mut board = FishingBoard::new(FishingBoardConfig::default());
        board.activate(encounter, &mut rng, &mut effects);
        (board, rng, effects)
    }

    #[test]
    fn test_fatigue_rate_example() {
        assert_eq!(fatigue_rate(2.0, 1.5, 1.0, 1.0, 1.0), 2.0);
        assert_eq!(line_tension(2.0, 1.5, 1.0, 1.0), 4.0);
    }

    #[test]
    fn test_activate_resets_fatigue_to_half_and_centers() {
        let encounter = Encounter::new(still_fish(1.0), rod(1.0, 100.0, 0.0));
        let (board, _, effects) = active_board(&encounter);
        assert_eq!(board.status(), BoardStatus::Active);
        assert_eq!(board.fatigue(), 50.0);
        assert_eq!(board.hook_position(), Vec2::ZERO);
        assert_eq!(board.fish_position(), Vec2::ZERO);
        assert!(effects.contains(&FishingEffect::PlaySfx(SFX_LINE_TENSION)));
    }

    #[test]
    fn test_opposite_hook_tires_fish_and_wins() {
        let mut encounter = Encounter::new(still_fish(1.0), rod(10.0, 1000.0, 1000.0));
        let (mut board, mut rng, mut effects) = active_board(&encounter);
        board.set_hook_position(Vec2::new(0.0, 1.0));
        board.set_fish_position(Vec2::new(0.0, -0.2));

        let input = PlayerInput::default();
        let mut outcome = None;
        for _ in 0..200 {
            outcome = board.tick(0.1, &input, &mut encounter, &mut rng, &mut effects);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(Sign::Positive));
        assert_eq!(board.status(), BoardStatus::Won);
        assert_eq!(board.fatigue(), board.config().max_fatigue);
    }

    #[test]
    fn test_fatigue_draining_to_zero_loses() {
        let mut encounter = Encounter::new(still_fish(50.0), rod(0.0, 1000.0, 1000.0));
        let (mut board, mut rng, mut effects) = active_board(&encounter);
        let input = PlayerInput::default();
        let outcome = board.tick(10.0, &input, &mut encounter, &mut rng, &mut effects);
        assert_eq!(outcome, Some(Sign::Negative));
        assert_eq!(board.fatigue(), 0.0);
        assert!(encounter.rod.current_line_durability > 0.0);
    }

    #[test]
    fn test_snapped_line_beats_same_tick_win() {
        // Fatigue jumps past max and durability hits zero in the same tick.
        let mut encounter = Encounter::new(still_fish(0.0), rod(1000.0, 1.0, 0.0));
        let (mut board, mut rng, mut effects) = active_board(&encounter);
        board.set_hook_position(Vec2::new(0.0, 1.0));
        board.set_fish_position(Vec2::new(0.0, -1.0));

        let outcome = board.tick(1.0, &PlayerInput::default(), &mut encounter, &mut rng, &mut effects);
        assert_eq!(board.fatigue(), board.config().max_fatigue);
        assert_eq!(encounter.rod.current_line_durability, 0.0);
        assert_eq!(outcome, Some(Sign::Negative));
        assert_eq!(board.status(), BoardStatus::Lost);
        assert!(effects.contains(&FishingEffect::PlaySfx(SFX_LINE_SNAP)));
    }

    #[test]
    fn test_resources_stay_clamped() {
        let mut encounter = Encounter::new(
            FishDef {
                behavior: FishBehaviorDef::default(),
                ..still_fish(3.0)
            },
            rod(4.0, 80.0, 9.0),
        );
        let (mut board, mut rng, mut effects) = active_board(&encounter);
        let max = board.config().max_fatigue;
        for i in 0..600 {
            let angle = i as f32 * 0.37;
            let input = PlayerInput {
                hook_delta: Vec2::new(angle.cos(), angle.sin()) * 40.0,
                ..PlayerInput::default()
            };
            let outcome = board.tick(1.0 / 30.0, &input, &mut encounter, &mut rng, &mut effects);
            assert!((0.0..=max).contains(&board.fatigue()));
            assert!((0.0..=80.0).contains(&encounter.rod.current_line_durability));
            assert!(board.hook_position().length() <= board.zones().board_radius() + 1e-3);
            assert!(board.fish_position().length() <= board.zones().board_radius() + 1e-3);
            if outcome.is_some() {
                break;
            }
        }
    }

    #[test]
    fn test_hook_clamped_to_rim_preserving_direction() {
        let mut board = FishingBoard::new(FishingBoardConfig::default());
        let velocity = Vec2::new(3000.0, 4000.0);
        board.move_hook(velocity, 1.0, 1.0);
        let hook = board.hook_position();
        assert!((hook.length() - board.zones().board_radius()).abs() < 1e-3);
        assert!((hook.normalize() - velocity.normalize()).length() < 1e-5);
    }

    #[test]
    fn test_worn_line_drags_hook_inward() {
        let mut board = FishingBoard::new(FishingBoardConfig::default());
        board.set_hook_position(Vec2::new(1.0, 0.0));
        let start = board.hook_position().length();

        board.move_hook(Vec2::ZERO, 0.5, 1.0);
        assert!((board.hook_position().length() - start).abs() < 1e-4);

        board.move_hook(Vec2::ZERO, 0.5, 0.0);
        let expected = start - board.config().inertia * 0.5;
        assert!((board.hook_position().length() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_new_fish_move_replaces_glide_in_flight() {
        let mut encounter = Encounter::new(still_fish(0.0), rod(0.0, 1000.0, 1000.0));
        let (mut board, mut rng, mut effects) = active_board(&encounter);
        let input = PlayerInput::default();

        board.move_fish_time_based(Vec2::new(1.0, 0.0), 1.0);
        board.tick(0.5, &input, &mut encounter, &mut rng, &mut effects);
        assert!(board.fish_position().x > 0.0);

        board.move_fish_time_based(Vec2::new(0.0, 1.0), 1.0);
        for _ in 0..20 {
            board.tick(0.1, &input, &mut encounter, &mut rng, &mut effects);
        }
        let end = board.zones().unit_circle(board.fish_position());
        assert!((end - Vec2::new(0.0, 1.0)).length() < 1e-4);
        assert!(!board.is_fish_moving());
    }

    #[test]
    fn test_speed_based_move_duration_follows_distance() {
        let mut tween = FishTween::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 0.5);
        tween.advance(0.25);
        assert!(!tween.is_finished());
        assert_eq!(tween.advance(0.25), Vec2::new(1.0, 0.0));
        assert!(tween.is_finished());

        let mut board = FishingBoard::new(FishingBoardConfig::default());
        board.move_fish_speed_based(Vec2::new(1.0, 0.0), 0.0);
        assert!(!board.is_fish_moving());
        board.move_fish_speed_based(Vec2::new(1.0, 0.0), 2.0);
        assert!(board.is_fish_moving());
    }

    #[test]
    fn test_pull_percent_follows_angle_between_hook_and_fish() {
        let mut board = FishingBoard::new(FishingBoardConfig::default());
        board.set_hook_position(Vec2::new(0.5, 0.0));
        board.set_fish_position(Vec2::new(0.0, 0.5));
        board.refresh();
        let r = board.readout();
        assert!((r.angle_difference - 90.0).abs() < 1e-3);
        assert!((r.pull_percent - 0.5).abs() < 1e-5);
        assert_eq!(board.blackboard().hook_zone, r.hook_zone);
    }

    #[test]
    fn test_rotations_face_the_center() {
        let encounter = Encounter::new(still_fish(1.0), rod(1.0, 100.0, 0.0));
        let (mut board, _, _) = active_board(&encounter);
        board.set_hook_position(Vec2::new(0.0, 1.0));
        board.set_fish_position(Vec2::new(-1.0, 0.0));
        let (hook, fish) = board.rotations();
        assert!(hook.abs() < 1e-4, "hook {hook}");
        assert!((fish - 90.0).abs() < 1e-4, "fish {fish}");
    }

    #[test]
    fn test_deactivated_board_stops_ticking() {
        let mut encounter = Encounter::new(still_fish(1.0), rod(1.0, 100.0, 0.0));
        let (mut board, mut rng, mut effects) = active_board(&encounter);
        board.deactivate(&encounter, &mut effects);
        assert!(effects.contains(&FishingEffect::StopSfx(SFX_LINE_TENSION)));

        let durability = encounter.rod.current_line_durability;
        let outcome = board.tick(1.0, &PlayerInput::default(), &mut encounter, &mut rng, &mut effects);
        assert_eq!(outcome, None);
        assert_eq!(encounter.rod.current_line_durability, durability);
    }
}
