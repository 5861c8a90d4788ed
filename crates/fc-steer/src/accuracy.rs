//! Targeting-accuracy heading jitter.
//!
//! An agent with accuracy < 1 should not track its target perfectly.  The
//! combined heading is perturbed by two phase-shifted sinusoids on the axes
//! orthogonal to it, amplitude scaled by `(1 − accuracy)`, then
//! renormalized.  The wander is a smooth function of elapsed time, so it
//! reads as sloppy piloting rather than noise, and it is fully deterministic
//! for replays.

use fc_core::math::{normalize_or_zero, orthonormal_basis};
use fc_core::Vec3;

/// Peak angular wander at accuracy 0, radians (~17°).
const MAX_JITTER_RAD: f32 = 0.3;

/// Sinusoid frequencies (Hz-ish) and the relative phase shift.  Chosen
/// incommensurate so the wander pattern does not visibly repeat.
const FREQ_A: f32 = 1.7;
const FREQ_B: f32 = 2.3;
const PHASE_SHIFT: f32 = 1.1;

/// Perturb a unit `heading` for an agent of the given `accuracy ∈ [0, 1]`.
///
/// Accuracy ≥ 1 and the zero heading pass through unchanged.  The result is
/// renormalized, so `|output| ∈ {0, 1}` is preserved.
pub fn apply_targeting_jitter(heading: Vec3, accuracy: f32, time_secs: f32) -> Vec3 {
    if accuracy >= 1.0 || heading == Vec3::ZERO {
        return heading;
    }
    let amplitude = MAX_JITTER_RAD * (1.0 - accuracy.clamp(0.0, 1.0));
    let (right, up) = orthonormal_basis(heading);

    let wander = right * (time_secs * FREQ_A).sin() * amplitude
        + up * (time_secs * FREQ_B + PHASE_SHIFT).sin() * amplitude;

    normalize_or_zero(heading + wander)
}
