//! The `Sim` struct and its tick loop.

use fc_agent::ShipAiAgent;
use fc_avoid::SweepSource;
use fc_control::ControlInputs;
use fc_core::{AgentId, ShipKinematics, ShipSnapshot, SimClock, SimConfig};

use crate::integrate::Integrator;
use crate::proximity::ProximityIndex;
use crate::{SimObserver, SimResult};

/// Evade lists consider ships within this many metres (grid cell size too).
const EVADE_RADIUS_M: f32 = 600.0;

/// The main simulation runner.
///
/// `Sim<S, I>` owns every agent and its kinematics and drives the
/// snapshot → advance → integrate → observe loop described in the crate
/// docs.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: SweepSource, I: Integrator> {
    /// Global configuration (total ticks, seed, tick duration, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick.
    pub clock: SimClock,

    /// All agents, indexed by `AgentId`.
    pub agents: Vec<ShipAiAgent>,

    /// World kinematics per agent, same indexing.
    pub kinematics: Vec<ShipKinematics>,

    /// Per-agent assigned target ship (another agent), refreshed into a
    /// `ShipSnapshot` each tick.
    pub targets: Vec<Option<AgentId>>,

    /// Per-agent destroyed flags, set by the host (combat damage is out of
    /// scope here); propagated into snapshots so Dogfight completes.
    pub destroyed: Vec<bool>,

    /// Static scene obstacles / host sweep adapter.
    pub scene: S,

    /// Applies `ControlInputs` to kinematics each tick.
    pub integrator: I,
}

impl<S: SweepSource, I: Integrator> Sim<S, I> {
    // ── Host API ──────────────────────────────────────────────────────────

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agent(&self, id: AgentId) -> &ShipAiAgent {
        &self.agents[id.index()]
    }

    pub fn agent_mut(&mut self, id: AgentId) -> &mut ShipAiAgent {
        &mut self.agents[id.index()]
    }

    pub fn kinematics_of(&self, id: AgentId) -> &ShipKinematics {
        &self.kinematics[id.index()]
    }

    /// Point `agent` at `target` (another agent) for targeting states.
    pub fn set_target(&mut self, agent: AgentId, target: Option<AgentId>) {
        self.targets[agent.index()] = target;
    }

    /// Mark an agent destroyed/alive.  Destroyed agents stop advancing and
    /// show up as destroyed in other agents' snapshots.
    pub fn set_destroyed(&mut self, agent: AgentId, destroyed: bool) {
        self.destroyed[agent.index()] = destroyed;
    }

    // ── Run loops ─────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.tick(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<usize> {
        let now = self.clock.current_tick;
        let dt = self.config.tick_duration_secs;
        observer.on_tick_start(now);

        // ── Phase 1: freeze the world ─────────────────────────────────────
        let snapshots = self.build_snapshots();
        self.refresh_agent_views(&snapshots);

        // ── Phase 2: advance the AI (possibly parallel) ───────────────────
        let controls = self.advance_agents(dt);
        let active = self
            .agents
            .iter()
            .enumerate()
            .filter(|(i, a)| a.is_enabled() && !self.destroyed[*i])
            .count();

        // ── Phase 3: integrate, sequentially in AgentId order ─────────────
        for (i, control) in controls.iter().enumerate() {
            if self.destroyed[i] {
                continue;
            }
            self.integrator.step(
                &mut self.kinematics[i],
                control,
                self.agents[i].config(),
                self.agents[i].performance(),
                dt,
            );
        }

        // ── Phase 4: observe ──────────────────────────────────────────────
        observer.on_tick_end(now, active);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.kinematics, &self.agents);
        }

        self.clock.advance();
        Ok(active)
    }

    /// One `ShipSnapshot` per agent, from this tick's kinematics.
    fn build_snapshots(&self) -> Vec<ShipSnapshot> {
        self.kinematics
            .iter()
            .enumerate()
            .map(|(i, kin)| {
                let mut snap =
                    ShipSnapshot::new(AgentId(i as u32), *kin, self.agents[i].config().radius_m);
                snap.destroyed = self.destroyed[i];
                snap
            })
            .collect()
    }

    /// Push fresh target snapshots and evade lists into every agent.
    fn refresh_agent_views(&mut self, snapshots: &[ShipSnapshot]) {
        let index = ProximityIndex::build(&self.kinematics, EVADE_RADIUS_M);

        for i in 0..self.agents.len() {
            let id = AgentId(i as u32);
            if let Some(target) = self.targets[i] {
                self.agents[i].assign_target_ship(snapshots[target.index()]);
            }

            // Nearby live ships (minus the attack target) become the evade
            // list; MoveTo turns them into unblock cones.
            let neighbors = index.within(self.kinematics[i].position, EVADE_RADIUS_M, &self.kinematics, id);
            let evade: Vec<ShipSnapshot> = neighbors
                .into_iter()
                .filter(|n| Some(*n) != self.targets[i] && !self.destroyed[n.index()])
                .map(|n| snapshots[n.index()])
                .collect();
            self.agents[i].set_ships_to_evade(evade);
        }
    }

    /// Run every live agent's AI for this tick.
    fn advance_agents(&mut self, dt: f32) -> Vec<ControlInputs> {
        let scene = &self.scene;
        let kinematics = self.kinematics.as_slice();
        let destroyed = self.destroyed.as_slice();

        #[cfg(not(feature = "parallel"))]
        {
            self.agents
                .iter_mut()
                .zip(kinematics)
                .zip(destroyed)
                .map(|((agent, kin), dead)| {
                    if *dead {
                        ControlInputs::NEUTRAL
                    } else {
                        agent.advance(dt, kin, scene)
                    }
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Each agent owns its RNG and scratch; kinematics and scene are
            // read-only for the tick, so per-agent parallelism is data-race
            // free and (thanks to per-agent RNGs) deterministic.
            self.agents
                .par_iter_mut()
                .zip(kinematics.par_iter())
                .zip(destroyed.par_iter())
                .map(|((agent, kin), dead)| {
                    if *dead {
                        ControlInputs::NEUTRAL
                    } else {
                        agent.advance(dt, kin, scene)
                    }
                })
                .collect()
        }
    }
}
