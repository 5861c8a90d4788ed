//! `fc-control` — the actuation layer: desired heading/velocity in,
//! normalized control-surface inputs out.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`pid`]        | `Pid` — clamped PD+I controller with envelope-derived gains |
//! | [`attitude`]   | heading/up → local pitch/yaw/roll errors per movement mode |
//! | [`controller`] | `FlightController` — six PIDs, `ControlInputs`            |
//!
//! # Reset discipline
//!
//! PID integrators accumulate history.  Whenever the ship's state is forced
//! from outside (teleport, velocity reset, retarget), call
//! [`FlightController::reset`] or the stale accumulators will spike the
//! control surfaces on the next tick.

pub mod attitude;
pub mod controller;
pub mod pid;


pub use attitude::{attitude_errors, AttitudeErrors};
pub use controller::{ControlInputs, FlightController};
pub use pid::Pid;
