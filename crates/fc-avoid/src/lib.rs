//! `fc-avoid` — sweep-test obstacle avoidance for the rust_fc framework.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`sweep`]   | `SweepQuality`, `SweepHit`, `SweepSource` trait                |
//! | [`predict`] | `on_collision_course` — closest-approach predicate             |
//! | [`avoid`]   | the per-tick avoidance search                                  |
//! | [`scene`]   | `SphereScene` — rstar-backed static obstacle field             |
//!
//! # Pluggability
//!
//! The avoidance search queries the world exclusively through the
//! [`SweepSource`] trait, so the host's physics engine supplies real
//! raycasts/sweeps while tests and demos use the bundled [`SphereScene`].
//! Swapping the source never changes the search logic.
//!
//! # Output convention
//!
//! `avoid` returns a [`BehaviourOutput`][fc_steer::BehaviourOutput]; the
//! all-zero output means "nothing in the way — no action needed", which lets
//! lower-priority behaviors through the `PriorityOnly` combiner.  It is
//! never a command to stop.

pub mod avoid;
pub mod predict;
pub mod scene;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use avoid::{avoid, AvoidanceConfig};
pub use predict::on_collision_course;
pub use scene::SphereScene;
pub use sweep::{SweepHit, SweepQuality, SweepSource};
