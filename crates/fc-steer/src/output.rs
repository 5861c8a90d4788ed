//! Computed steering output, one per behavior input per tick.

use fc_core::Vec3;
use fc_core::math::is_unit_or_zero;

/// What one behavior wants the ship to do.
///
/// Ephemeral: produced, combined, and discarded within a single tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BehaviourOutput {
    /// Desired facing.  Either `Vec3::ZERO` ("no opinion") or unit length.
    pub heading: Vec3,
    /// Desired up vector, when the behavior cares about roll (e.g. docking).
    pub up: Option<Vec3>,
    /// Desired world-space velocity.
    pub velocity: Vec3,
    /// World position the behavior is steering toward, when meaningful.
    pub target: Option<Vec3>,
    /// Propagated from the input: apply targeting-accuracy jitter downstream.
    pub use_targeting_accuracy: bool,
}

impl BehaviourOutput {
    /// The all-zero "no opinion" output.  Not a command to stop — the
    /// combiner skips it entirely.
    pub const NONE: BehaviourOutput = BehaviourOutput {
        heading: Vec3::ZERO,
        up: None,
        velocity: Vec3::ZERO,
        target: None,
        use_targeting_accuracy: false,
    };

    /// A heading/velocity pair with no up or target opinion.
    pub fn move_along(heading: Vec3, velocity: Vec3) -> Self {
        debug_assert!(is_unit_or_zero(heading));
        Self {
            heading,
            up: None,
            velocity,
            target: None,
            use_targeting_accuracy: false,
        }
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_up(mut self, up: Vec3) -> Self {
        debug_assert!(is_unit_or_zero(up));
        self.up = Some(up);
        self
    }

    /// `true` when this output expresses an opinion the combiner can use.
    #[inline]
    pub fn has_opinion(&self) -> bool {
        self.heading != Vec3::ZERO
    }
}

impl Default for BehaviourOutput {
    fn default() -> Self {
        Self::NONE
    }
}
