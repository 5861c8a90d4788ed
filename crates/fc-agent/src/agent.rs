//! `ShipAiAgent` — the per-ship AI pipeline and its public API.

use std::sync::Arc;

use fc_avoid::{avoid, AvoidanceConfig, SweepSource};
use fc_control::{ControlInputs, FlightController};
use fc_core::math::normalize_or_zero;
use fc_core::{
    AgentId, AgentRng, Quat, ShipConfig, ShipKinematics, ShipPerformance, ShipSnapshot, StateId,
    Vec3,
};
use fc_path::{follow_path, FollowConfig, Location, PathData, PathProgress};
use fc_state::{StateParams, StateRegistry, StateView};
use fc_steer::{
    apply_targeting_jitter, combine, BehaviourInput, BehaviourOutput, BehaviourOverrides,
    SteeringContext, SteeringRequest,
};

use crate::weapons::fire_decision;

/// One ship's AI: owns every piece of per-agent mutable state, shares the
/// immutable pieces (state registry, behavior overrides, paths).
///
/// # Lifecycle
///
/// ```text
/// new() → initialise() → enable_ai() → advance() per tick → drop
/// ```
///
/// `initialise` characterizes the performance envelope and tunes the PID
/// gains; call it again (or `recalculate_ship_parameters`) whenever the
/// ship's mass, thrusters, or weapons change.
pub struct ShipAiAgent {
    id: AgentId,
    config: ShipConfig,
    perf: ShipPerformance,

    registry: Arc<StateRegistry>,
    overrides: Arc<BehaviourOverrides>,

    controller: FlightController,
    params: StateParams,
    progress: PathProgress,

    follow_cfg: FollowConfig,
    avoid_cfg: AvoidanceConfig,

    state_id: StateId,
    enabled: bool,
    initialised: bool,

    /// Targeting accuracy in `[0, 1]`; below 1 the combined heading wanders.
    accuracy: f32,
    /// Simulated seconds since initialise — the jitter phase clock.
    elapsed_secs: f32,

    rng: AgentRng,

    /// The most recent combined steering target; obstacle avoidance uses it
    /// for its clear-line shortcut and search ordering.
    last_target: Option<Vec3>,

    // Per-tick behavior buffers.  `inputs` is rebuilt by the state action
    // every tick (explicit ordering, no positional slot conventions);
    // `outputs` is cleared and refilled in place.
    inputs: Vec<BehaviourInput>,
    outputs: Vec<BehaviourOutput>,

    warned_unknown_state: bool,
}

impl ShipAiAgent {
    /// Create an agent for `config`, seeded deterministically from
    /// `global_seed` and `id`.  The agent starts disabled and uninitialised.
    pub fn new(id: AgentId, config: ShipConfig, registry: Arc<StateRegistry>, global_seed: u64) -> Self {
        let perf = ShipPerformance::estimate(&config);
        let controller = FlightController::new(&config, &perf);
        Self {
            id,
            perf,
            controller,
            registry,
            overrides: Arc::new(BehaviourOverrides::new()),
            params: StateParams::new(),
            progress: PathProgress::new(),
            follow_cfg: FollowConfig::default(),
            avoid_cfg: AvoidanceConfig::default(),
            state_id: StateRegistry::IDLE,
            enabled: false,
            initialised: false,
            accuracy: 1.0,
            elapsed_secs: 0.0,
            rng: AgentRng::new(global_seed, id),
            last_target: None,
            inputs: Vec::with_capacity(8),
            outputs: Vec::with_capacity(8),
            warned_unknown_state: false,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// One-time setup: characterize the envelope and tune the PIDs.
    ///
    /// Idempotent; safe to call again after configuration changes.
    pub fn initialise(&mut self) {
        self.recalculate_ship_parameters();
        self.initialised = true;
    }

    /// Re-estimate the performance envelope from the current `ShipConfig`
    /// and rebuild the controller gains.  Call after any loadout change.
    pub fn recalculate_ship_parameters(&mut self) {
        self.perf = ShipPerformance::estimate(&self.config);
        self.controller = FlightController::new(&self.config, &self.perf);
    }

    pub fn enable_ai(&mut self) {
        self.enabled = true;
    }

    pub fn disable_ai(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn config(&self) -> &ShipConfig {
        &self.config
    }

    /// Mutable ship configuration.  Follow any edit with
    /// [`recalculate_ship_parameters`][Self::recalculate_ship_parameters].
    pub fn config_mut(&mut self) -> &mut ShipConfig {
        &mut self.config
    }

    pub fn performance(&self) -> &ShipPerformance {
        &self.perf
    }

    pub fn state(&self) -> StateId {
        self.state_id
    }

    /// Sub-phase index within the current state (e.g. StrafingRun 0=run-in,
    /// 1=egress).
    pub fn current_state_stage(&self) -> u32 {
        self.params.stage
    }

    pub fn has_completed_state_action(&self) -> bool {
        self.params.completed
    }

    pub fn path_progress(&self) -> &PathProgress {
        &self.progress
    }

    /// Read-only view of the target bookkeeping (for telemetry and hosts).
    pub fn state_params(&self) -> &StateParams {
        &self.params
    }

    pub fn follow_config_mut(&mut self) -> &mut FollowConfig {
        &mut self.follow_cfg
    }

    pub fn avoidance_config_mut(&mut self) -> &mut AvoidanceConfig {
        &mut self.avoid_cfg
    }

    // ── State control ─────────────────────────────────────────────────────

    /// Switch the FSM state.  Stage, completion, and PID history reset;
    /// assigned targets are kept (re-targeting is a separate call).
    pub fn set_state(&mut self, state_id: StateId) {
        if self.state_id != state_id {
            self.state_id = state_id;
            self.params.reset_progress();
            self.controller.reset();
            self.warned_unknown_state = false;
        }
    }

    /// Install shared behavior overrides (the `Custom*` slots).
    pub fn set_behaviour_overrides(&mut self, overrides: Arc<BehaviourOverrides>) {
        self.overrides = overrides;
    }

    /// Targeting accuracy: 1 = perfect, 0 = maximum wander.
    pub fn set_accuracy(&mut self, accuracy: f32) {
        self.accuracy = accuracy.clamp(0.0, 1.0);
    }

    // ── Target assignment ─────────────────────────────────────────────────

    pub fn assign_target_path(&mut self, path: Arc<PathData>) {
        self.params.target_path = Some(path);
        self.progress.reset();
        self.params.reset_progress();
    }

    pub fn assign_target_location(&mut self, location: Location) {
        self.params.target_location = Some(location);
        self.params.reset_progress();
    }

    pub fn assign_target_position(&mut self, position: Vec3) {
        self.params.target_position = Some(position);
        self.params.reset_progress();
    }

    /// Assign (or refresh) the targeted ship snapshot.  Hosts refresh this
    /// every tick for moving targets; `fc-sim` does it automatically.
    pub fn assign_target_ship(&mut self, ship: ShipSnapshot) {
        // A fresh snapshot of the same ship is a refresh, not a re-target.
        let same = self.params.target_ship.is_some_and(|t| t.agent == ship.agent);
        self.params.target_ship = Some(ship);
        if !same {
            self.params.reset_progress();
        }
    }

    pub fn assign_target_rotation(&mut self, rotation: Quat) {
        self.params.target_rotation = Some(rotation);
    }

    pub fn assign_target_velocity(&mut self, velocity: Vec3) {
        self.params.target_velocity = Some(velocity);
    }

    pub fn assign_target_radius(&mut self, radius_m: f32) {
        self.params.target_radius = radius_m.max(0.0);
    }

    pub fn assign_target_distance(&mut self, distance_m: f32) {
        self.params.target_distance = distance_m.max(0.0);
    }

    pub fn assign_target_angular_distance(&mut self, angle_rad: f32) {
        self.params.target_angular_distance_rad = angle_rad.max(0.0);
    }

    pub fn assign_target_time(&mut self, secs: f32) {
        self.params.target_time_secs = secs.max(0.0);
    }

    pub fn set_ships_to_evade(&mut self, ships: Vec<ShipSnapshot>) {
        self.params.ships_to_evade = ships;
    }

    pub fn clear_targets(&mut self) {
        self.params.clear_targets();
        self.last_target = None;
        self.controller.reset();
    }

    // ── Discontinuous moves ───────────────────────────────────────────────

    /// Notify the agent that the world (or the ship) was shifted by `delta`
    /// — an origin shift or scripted teleport.  Cached world-space targets
    /// move with it, the path cursor re-seeds, and the PIDs reset so the
    /// jump cannot spike the control surfaces.
    pub fn teleport(&mut self, delta: Vec3) {
        if let Some(target) = &mut self.last_target {
            *target += delta;
        }
        if let Some(pos) = &mut self.params.target_position {
            *pos += delta;
        }
        if let Some(location) = &mut self.params.target_location {
            location.position += delta;
        }
        self.progress.reset();
        self.reset_pid_controllers();
    }

    /// Clear all PID accumulators.  Required whenever velocity or position
    /// is externally forced.
    pub fn reset_pid_controllers(&mut self) {
        self.controller.reset();
    }

    // ── The tick ──────────────────────────────────────────────────────────

    /// Run one AI step and produce actuator inputs.
    ///
    /// `kin` is the host-measured kinematic state for this tick; `sweeps`
    /// answers the obstacle queries.  A disabled or uninitialised agent
    /// returns [`ControlInputs::NEUTRAL`].
    pub fn advance(
        &mut self,
        dt:     f32,
        kin:    &ShipKinematics,
        sweeps: &dyn SweepSource,
    ) -> ControlInputs {
        if !self.enabled || !self.initialised {
            return ControlInputs::NEUTRAL;
        }
        self.elapsed_secs += dt;

        // ── ① State action fills the behavior list ────────────────────────
        let registry = Arc::clone(&self.registry);
        let Some(state) = registry.get(self.state_id) else {
            if !self.warned_unknown_state {
                log::warn!("agent {}: state {} not registered; idling", self.id, self.state_id);
                self.warned_unknown_state = true;
            }
            return self.steer_idle(dt, kin);
        };

        let view = StateView {
            kin,
            perf: &self.perf,
            ship_radius: self.config.radius_m,
            grounded: self.config.grounded,
            dt,
        };
        self.inputs = state.run(&mut self.params, &view);

        // ── ② One output per input ────────────────────────────────────────
        self.compute_outputs(kin, sweeps);

        // ── ③ Combine under the state's policy ────────────────────────────
        let combined = combine(
            &self.inputs,
            &self.outputs,
            state.combiner_policy,
            kin,
            &mut self.rng,
        );

        if let Some(target) = combined.target {
            self.last_target = Some(target);
        } else if let Some(focus) = self.params.focus_position() {
            self.last_target = Some(focus);
        }

        // No opinion from any behavior: hold attitude and coast.
        let (mut heading, up, velocity) = if combined.has_opinion() {
            (combined.heading, combined.up, combined.velocity)
        } else {
            (kin.forward(), None, kin.velocity)
        };

        // ── ④ Accuracy degradation ────────────────────────────────────────
        if combined.use_targeting_accuracy && self.accuracy < 1.0 {
            heading = apply_targeting_jitter(heading, self.accuracy, self.elapsed_secs);
        }

        // ── ⑤ Actuation ───────────────────────────────────────────────────
        let mut controls = self.controller.steer(kin, heading, up, velocity, dt);

        // ── ⑥ Weapons ─────────────────────────────────────────────────────
        let (primary, secondary) = fire_decision(&self.config, kin, self.params.target_ship.as_ref());
        controls.primary_fire = primary;
        controls.secondary_fire = secondary;

        controls
    }

    /// Fallback pipeline when no state is available: behave like Idle.
    fn steer_idle(&mut self, dt: f32, kin: &ShipKinematics) -> ControlInputs {
        self.controller.steer(kin, kin.forward(), None, Vec3::ZERO, dt)
    }

    /// Dispatch every behavior input to its computing layer.
    fn compute_outputs(&mut self, kin: &ShipKinematics, sweeps: &dyn SweepSource) {
        self.outputs.clear();

        let ctx = SteeringContext::new(kin, &self.perf, self.config.grounded);
        let overrides = Arc::clone(&self.overrides);

        for i in 0..self.inputs.len() {
            let output = match &self.inputs[i].request {
                SteeringRequest::ObstacleAvoidance => avoid(
                    kin,
                    &self.perf,
                    self.config.grounded,
                    self.config.radius_m,
                    self.last_target,
                    sweeps,
                    &self.avoid_cfg,
                ),
                SteeringRequest::FollowPath { path } => {
                    let path = Arc::clone(path);
                    match follow_path(
                        &path,
                        &mut self.progress,
                        kin,
                        &self.perf,
                        self.config.grounded,
                        &self.follow_cfg,
                    ) {
                        Some(follow) => {
                            if follow.completed {
                                self.params.completed = true;
                            }
                            let heading = normalize_or_zero(follow.target_point - kin.position);
                            BehaviourOutput::move_along(heading, heading * follow.desired_speed)
                                .with_target(follow.target_point)
                        }
                        None => BehaviourOutput::NONE,
                    }
                }
                request => overrides.compute(request, &ctx),
            };
            self.outputs.push(output);
        }
    }
}
