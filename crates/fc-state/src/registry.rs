//! The explicit state registry.
//!
//! Constructed once at program start and shared (typically as
//! `Arc<StateRegistry>`) with every agent — dependency injection instead of
//! a lazily-initialized global.  Built-in states sit at fixed IDs so hosts
//! can refer to them by constant.

use fc_core::StateId;
use fc_steer::CombinerPolicy;

use crate::builtin;
use crate::error::{StateError, StateResult};
use crate::state::{AiState, StateAction};

/// Registry of all states an agent can be switched into.
pub struct StateRegistry {
    states: Vec<AiState>,
}

impl StateRegistry {
    // ── Built-in state IDs ────────────────────────────────────────────────
    pub const IDLE: StateId = StateId(0);
    pub const MOVE_TO: StateId = StateId(1);
    pub const DOGFIGHT: StateId = StateId(2);
    pub const DOCKING: StateId = StateId(3);
    pub const STRAFING_RUN: StateId = StateId(4);

    /// A registry with no states at all.  Mostly useful in tests; agents
    /// built against it can only idle.
    pub fn empty() -> Self {
        Self { states: Vec::new() }
    }

    /// The standard registry: the five built-in states at IDs 0–4.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        // Registration order pins the documented IDs.
        for (name, action) in [
            ("idle", builtin::idle_action()),
            ("move_to", builtin::move_to_action()),
            ("dogfight", builtin::dogfight_action()),
            ("docking", builtin::docking_action()),
            ("strafing_run", builtin::strafing_run_action()),
        ] {
            registry
                .register(name, CombinerPolicy::PriorityOnly, action)
                .expect("built-in state names are distinct");
        }
        registry
    }

    /// Register a custom state; returns its assigned ID.
    ///
    /// Names must be unique across the registry — a duplicate is a
    /// configuration error, not a replacement.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        combiner_policy: CombinerPolicy,
        action: StateAction,
    ) -> StateResult<StateId> {
        let name = name.into();
        if self.states.iter().any(|s| s.name == name) {
            return Err(StateError::DuplicateName(name));
        }
        let id = StateId(self.states.len() as u16);
        self.states.push(AiState::new(id, name, combiner_policy, action));
        Ok(id)
    }

    /// Look up a state by ID.
    pub fn get(&self, id: StateId) -> Option<&AiState> {
        self.states.get(id.index())
    }

    /// Look up a state by ID, surfacing a typed error for diagnostics.
    pub fn try_get(&self, id: StateId) -> StateResult<&AiState> {
        self.get(id).ok_or(StateError::UnknownState(id))
    }

    /// Look up a state ID by name.
    pub fn id_of(&self, name: &str) -> Option<StateId> {
        self.states.iter().find(|s| s.name == name).map(|s| s.id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
