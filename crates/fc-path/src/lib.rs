//! `fc-path` — waypoint paths and path-following for the rust_fc framework.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`path`]     | `Waypoint`, `PathData`, `PathBuilder`                        |
//! | [`bezier`]   | cubic Bezier evaluation, tangents, curvature                 |
//! | [`progress`] | `PathProgress` — per-agent cursor along a shared path        |
//! | [`follow`]   | `follow_path` — lookahead target + curvature speed profile   |
//! | [`loader`]   | CSV waypoint loading                                         |
//! | [`location`] | `Location` — named point targets                             |
//! | [`error`]    | `PathError`, `PathResult<T>`                                 |
//!
//! # Ownership model
//!
//! A `PathData` is immutable after construction and shared between agents
//! (typically as `Arc<PathData>`).  All mutable state — which segment an
//! agent is on, its interpolation parameter, whether it has finished an open
//! path — lives in the agent-owned [`PathProgress`], so any number of agents
//! can follow the same path concurrently without synchronisation.

pub mod bezier;
pub mod error;
pub mod follow;
pub mod loader;
pub mod location;
pub mod path;
pub mod progress;

#[cfg(test)]
mod tests;

pub use error::{PathError, PathResult};
pub use follow::{FollowConfig, FollowOutput, FollowQuality, follow_path};
pub use loader::{load_path_csv, load_path_reader};
pub use location::Location;
pub use path::{PathBuilder, PathData, Waypoint};
pub use progress::PathProgress;
