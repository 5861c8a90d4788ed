//! `fc-sim` — tick loop orchestrator for fleets of AI ships.
//!
//! # Four-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Snapshot  — capture every ship's kinematics into immutable
//!                 ShipSnapshots; refresh each agent's target and evade
//!                 lists from them.
//!   ② Advance   — every enabled agent runs its AI pipeline against the
//!                 frozen snapshots (parallel with the `parallel` feature).
//!   ③ Integrate — apply the produced ControlInputs to the kinematics via
//!                 the pluggable Integrator, sequentially in AgentId order.
//!   ④ Observe   — tick/snapshot observer callbacks.
//! ```
//!
//! The snapshot/advance split is what makes the parallel phase safe: agents
//! only read frozen per-tick data and mutate exclusively their own state.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the advance phase on Rayon's thread pool.         |
//! | `fx-hash`  | FxHash for the proximity grid's cell map.              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let registry = Arc::new(StateRegistry::with_builtins());
//! let mut sim = SimBuilder::new(config, registry, SphereScene::empty(), PointMassIntegrator)
//!     .ship(ShipConfig::default(), ShipKinematics::at_rest(Vec3::ZERO))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod integrate;
pub mod observer;
pub mod proximity;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use integrate::{Integrator, PointMassIntegrator};
pub use observer::{NoopObserver, SimObserver};
pub use proximity::ProximityIndex;
pub use sim::Sim;
