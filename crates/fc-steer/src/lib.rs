//! `fc-steer` — steering behavior primitives and the behavior combiner.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`input`]      | `SteeringRequest` (behavior menu), `BehaviourInput`           |
//! | [`output`]     | `BehaviourOutput` — heading/up/velocity/target per behavior   |
//! | [`behaviours`] | the stateless built-in primitives                             |
//! | [`custom`]     | `CustomBehaviour` trait + `BehaviourOverrides` registry       |
//! | [`accuracy`]   | targeting-accuracy heading jitter                             |
//! | [`combiner`]   | `CombinerPolicy` + `combine`                                  |
//! | [`error`]      | `SteerError`, `SteerResult<T>`                                |
//!
//! # Tick shape
//!
//! Each tick the active FSM state emits an ordered `Vec<BehaviourInput>`
//! (priority = position).  The agent computes one `BehaviourOutput` per
//! input — stateless primitives here, obstacle avoidance in `fc-avoid`,
//! path following in `fc-path` — then merges them with exactly one
//! [`CombinerPolicy`].  Inputs are rebuilt from scratch every tick; nothing
//! in this crate persists between ticks.
//!
//! # The heading convention
//!
//! A `BehaviourOutput` heading is either `Vec3::ZERO` ("no opinion" — defer
//! to lower-priority behaviors) or unit length.  `up` and `target` use
//! `Option` instead of a zero sentinel.

pub mod accuracy;
pub mod behaviours;
pub mod combiner;
pub mod custom;
pub mod error;
pub mod input;
pub mod output;


pub use accuracy::apply_targeting_jitter;
pub use behaviours::{compute_primitive, SteeringContext};
pub use combiner::{combine, CombinedOutput, CombinerPolicy};
pub use custom::{BehaviourOverrides, CustomBehaviour, OverrideSlot};
pub use error::{SteerError, SteerResult};
pub use input::{BehaviourInput, SteeringRequest};
pub use output::BehaviourOutput;
