//! `fc-core` — foundational types for the `rust_fc` flight-control AI
//! framework.
//!
//! This crate is a dependency of every other `fc-*` crate.  It intentionally
//! has no `fc-*` dependencies and minimal external ones (only `glam`, `rand`,
//! `log`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StateId`, `WaypointId`                      |
//! | [`math`]        | curvature / braking-distance formulas, vector helpers   |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                         |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)               |
//! | [`kinematics`]  | `ShipKinematics` — position/rotation/velocity snapshot  |
//! | [`config`]      | `ShipConfig`, thruster and weapon descriptions          |
//! | [`target`]      | `ShipSnapshot` — per-tick view of another ship          |
//! | [`performance`] | `ShipPerformance` — estimated maneuvering envelope      |
//! | [`error`]       | `CoreError`, `CoreResult`                               |
//!
//! # Coordinate convention
//!
//! Right-handed; in a ship's local frame `+Z` is forward, `+Y` is up, and
//! `+X` is right (`right = up × forward`).  World space uses the same axes.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod kinematics;
pub mod math;
pub mod performance;
pub mod rng;
pub mod target;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MovementMode, ShipConfig, ThrusterConfig, WeaponKind, WeaponMount};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, StateId, WaypointId};
pub use kinematics::ShipKinematics;
pub use performance::ShipPerformance;
pub use rng::{AgentRng, SimRng};
pub use target::ShipSnapshot;
pub use time::{SimClock, SimConfig, Tick};

// Re-export the math types every downstream crate signature uses.
pub use glam::{Quat, Vec3};
