//! `fc-state` — the finite-state-machine layer above the steering behaviors.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`state`]    | `AiState`, `StateAction`, `StateView`                       |
//! | [`registry`] | `StateRegistry` — explicit, injected, seeded with built-ins |
//! | [`params`]   | `StateParams` — per-agent mutable scratch                   |
//! | [`builtin`]  | Idle, MoveTo, Dogfight, Docking, StrafingRun actions        |
//! | [`error`]    | `StateError`, `StateResult<T>`                              |
//!
//! # Design
//!
//! A state is a pure-ish function: given the agent's scratch parameters and
//! a read-only view of its kinematics/envelope, it returns an ordered
//! `Vec<BehaviourInput>` (priority = position) and may update the scratch
//! (stage index, completion flag).  States never touch actuation and never
//! persist anything outside `StateParams`.
//!
//! The registry is an explicit object constructed once at startup and shared
//! by reference (typically `Arc<StateRegistry>`) with every agent — there
//! are no global statics or lazy-init guards.  Built-in states occupy fixed
//! IDs 0–4; `register` appends custom states after them.

pub mod builtin;
pub mod error;
pub mod params;
pub mod registry;
pub mod state;


pub use error::{StateError, StateResult};
pub use params::StateParams;
pub use registry::StateRegistry;
pub use state::{AiState, StateAction, StateView};
