//! State type and the read-only per-tick view handed to state actions.

use fc_core::{ShipKinematics, ShipPerformance, StateId};
use fc_steer::{BehaviourInput, CombinerPolicy};

use crate::params::StateParams;

/// Read-only agent context for one state-action invocation.
#[derive(Copy, Clone)]
pub struct StateView<'a> {
    pub kin: &'a ShipKinematics,
    pub perf: &'a ShipPerformance,
    /// Bounding-sphere radius of the controlled ship, metres.
    pub ship_radius: f32,
    pub grounded: bool,
    /// Simulation step, seconds.
    pub dt: f32,
}

/// A state's behavior: fill an ordered list of steering requests for this
/// tick, updating stage/completion in `StateParams` as needed.
///
/// Must be `Send + Sync` — one registry serves every agent, across threads.
pub type StateAction =
    Box<dyn Fn(&mut StateParams, &StateView<'_>) -> Vec<BehaviourInput> + Send + Sync>;

/// One named FSM state.
pub struct AiState {
    pub id: StateId,
    pub name: String,
    /// How this state's behavior outputs merge each tick.
    pub combiner_policy: CombinerPolicy,
    action: StateAction,
}

impl AiState {
    pub(crate) fn new(
        id: StateId,
        name: impl Into<String>,
        combiner_policy: CombinerPolicy,
        action: StateAction,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            combiner_policy,
            action,
        }
    }

    /// Run the state for one tick.
    #[inline]
    pub fn run(&self, params: &mut StateParams, view: &StateView<'_>) -> Vec<BehaviourInput> {
        (self.action)(params, view)
    }
}

impl std::fmt::Debug for AiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiState")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("combiner_policy", &self.combiner_policy)
            .finish_non_exhaustive()
    }
}
