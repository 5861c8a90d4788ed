//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use fc_agent::ShipAiAgent;
use fc_avoid::SweepSource;
use fc_core::{AgentId, ShipConfig, ShipKinematics, SimConfig};
use fc_state::StateRegistry;

use crate::integrate::Integrator;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<S, I>`].
///
/// # Example
///
/// ```rust,ignore
/// let registry = Arc::new(StateRegistry::with_builtins());
/// let mut sim = SimBuilder::new(config, registry, scene, PointMassIntegrator)
///     .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::ZERO))
///     .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::X * 500.0))
///     .build()?;
/// ```
///
/// Agents are created in call order — the first `ship()` is `AgentId(0)` —
/// seeded deterministically from `config.seed`, initialised, and enabled.
pub struct SimBuilder<S: SweepSource, I: Integrator> {
    config: SimConfig,
    registry: Arc<StateRegistry>,
    scene: S,
    integrator: I,
    ships: Vec<(ShipConfig, ShipKinematics)>,
}

impl<S: SweepSource, I: Integrator> SimBuilder<S, I> {
    pub fn new(config: SimConfig, registry: Arc<StateRegistry>, scene: S, integrator: I) -> Self {
        Self {
            config,
            registry,
            scene,
            integrator,
            ships: Vec::new(),
        }
    }

    /// Add one ship at its initial kinematic state.
    pub fn ship(mut self, config: ShipConfig, kinematics: ShipKinematics) -> Self {
        self.ships.push((config, kinematics));
        self
    }

    /// Validate and assemble the simulation.
    pub fn build(self) -> SimResult<Sim<S, I>> {
        if self.ships.is_empty() {
            return Err(SimError::Config("a simulation needs at least one ship".into()));
        }
        let count = self.ships.len();

        let mut agents = Vec::with_capacity(count);
        let mut kinematics = Vec::with_capacity(count);
        for (i, (ship_config, kin)) in self.ships.into_iter().enumerate() {
            let mut agent = ShipAiAgent::new(
                AgentId(i as u32),
                ship_config,
                Arc::clone(&self.registry),
                self.config.seed,
            );
            agent.initialise();
            agent.enable_ai();
            agents.push(agent);
            kinematics.push(kin);
        }

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            agents,
            kinematics,
            targets: vec![None; count],
            destroyed: vec![false; count],
            scene: self.scene,
            integrator: self.integrator,
        })
    }
}
