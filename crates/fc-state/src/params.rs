//! Per-agent state scratch, passed mutably to the active state each tick.

use std::sync::Arc;

use fc_core::{Quat, ShipSnapshot, Vec3};
use fc_path::{Location, PathData};

/// Everything a state action may read or update about its agent's goals.
///
/// One instance per agent, owned by the agent.  Target fields are written by
/// the agent's `assign_target_*` API; the stage index and completion flag
/// are written by state actions and reset on every state change.
#[derive(Clone, Default)]
pub struct StateParams {
    // ── Targets ───────────────────────────────────────────────────────────
    pub target_position: Option<Vec3>,
    pub target_rotation: Option<Quat>,
    pub target_velocity: Option<Vec3>,
    pub target_location: Option<Location>,
    pub target_path: Option<Arc<PathData>>,
    /// Per-tick snapshot of the targeted ship; the host refreshes it.
    pub target_ship: Option<ShipSnapshot>,
    /// Ships whose projected paths should be evaded (MoveTo caps at 5).
    pub ships_to_evade: Vec<ShipSnapshot>,

    // ── Scalar targets ────────────────────────────────────────────────────
    /// Radius around the target used by arrival/docking/strafing, metres.
    pub target_radius: f32,
    /// Completion distance for docking-style states, metres.
    pub target_distance: f32,
    /// Completion attitude tolerance, radians.
    pub target_angular_distance_rad: f32,
    /// Generic time parameter available to custom states, seconds.
    pub target_time_secs: f32,

    // ── Per-state scratch ─────────────────────────────────────────────────
    /// Sub-phase within the current state (e.g. StrafingRun approach=0,
    /// retreat=1).
    pub stage: u32,
    /// Latched once the current state's action is complete; cleared on state
    /// change.
    pub completed: bool,
}

impl StateParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the per-state scratch.  Called by the agent on every state
    /// change so stages and completion never leak across states.
    pub fn reset_progress(&mut self) {
        self.stage = 0;
        self.completed = false;
    }

    /// Drop every target reference (but keep scalar tolerances).
    pub fn clear_targets(&mut self) {
        self.target_position = None;
        self.target_rotation = None;
        self.target_velocity = None;
        self.target_location = None;
        self.target_path = None;
        self.target_ship = None;
        self.ships_to_evade.clear();
    }

    /// The current aim point, in precedence order: ship, location, position.
    pub fn focus_position(&self) -> Option<Vec3> {
        self.target_ship
            .as_ref()
            .map(|s| s.position())
            .or_else(|| self.target_location.as_ref().map(|l| l.position))
            .or(self.target_position)
    }
}
