//! `fc-agent` — one autonomous ship's AI, end to end.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`agent`]   | `ShipAiAgent` — the full per-ship pipeline             |
//! | [`weapons`] | turret / ballistic fire decisions                      |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                         |
//!
//! # Tick pipeline
//!
//! ```text
//! advance(dt, kinematics, sweeps)
//!   ① active state fills Vec<BehaviourInput>      (fc-state)
//!   ② each input → BehaviourOutput
//!        primitives / custom overrides            (fc-steer)
//!        FollowPath                               (fc-path)
//!        ObstacleAvoidance                        (fc-avoid)
//!   ③ combine under the state's policy            (fc-steer)
//!   ④ targeting-accuracy jitter                   (fc-steer)
//!   ⑤ attitude + translation PIDs                 (fc-control)
//!   ⑥ weapon-fire decision                        (here)
//!   → ControlInputs for the host's actuators
//! ```
//!
//! The agent never reads or writes world state directly: kinematics arrive
//! as a per-tick snapshot, collision queries go through the host's
//! [`SweepSource`][fc_avoid::SweepSource], and the only output is a
//! [`ControlInputs`][fc_control::ControlInputs] struct.

pub mod agent;
pub mod error;
pub mod weapons;


pub use agent::ShipAiAgent;
pub use error::{AgentError, AgentResult};
