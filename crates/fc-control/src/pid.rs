//! A small PID controller with a clamped output.

/// Proportional-integral-derivative controller producing outputs in
/// `[-1, 1]` — one per controlled axis.
///
/// The integral term is conservative: it only accumulates while the output
/// is unsaturated (simple anti-windup), and [`reset`][Self::reset] clears
/// all history.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pid {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    integral: f32,
    prev_error: Option<f32>,
}

impl Pid {
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral: 0.0,
            prev_error: None,
        }
    }

    /// Gains derived from the ship's estimated envelope.
    ///
    /// The axis is modelled as a double integrator driven by a normalized
    /// input scaled by `authority` (the achievable acceleration on that
    /// axis).  Choosing the closed-loop natural frequency as the reciprocal
    /// of the thruster ramp time and critically damping gives:
    ///
    ///   kp = ω² / authority,  kd = 2ω / authority,  ω = 1 / ramp
    ///
    /// No integral term: steady-state errors are corrected upstream by the
    /// steering layer re-aiming every tick.
    pub fn tuned(authority: f32, ramp_secs: f32) -> Self {
        let authority = authority.max(1e-3);
        let omega = 1.0 / ramp_secs.max(0.01);
        Self::new(omega * omega / authority, 0.0, 2.0 * omega / authority)
    }

    /// Gains for a velocity (single-integrator) axis: full deflection when
    /// the error equals the speed gained in one ramp time at full thrust.
    pub fn velocity_tuned(authority: f32, ramp_secs: f32) -> Self {
        let authority = authority.max(1e-3);
        Self::new(1.0 / (authority * ramp_secs.max(0.01)), 0.0, 0.0)
    }

    /// Advance the controller by `dt` seconds against `error`, returning the
    /// clamped output.
    pub fn update(&mut self, error: f32, dt: f32) -> f32 {
        if dt <= 0.0 {
            return 0.0;
        }

        let derivative = match self.prev_error {
            Some(prev) => (error - prev) / dt,
            None => 0.0,
        };
        self.prev_error = Some(error);

        let raw = self.kp * error + self.ki * self.integral + self.kd * derivative;
        let out = raw.clamp(-1.0, 1.0);

        // Anti-windup: freeze the integral while saturated.
        if self.ki != 0.0 && (raw - out).abs() < f32::EPSILON {
            self.integral += error * dt;
        }

        out
    }

    /// Clear integral and derivative history.
    ///
    /// Required after any externally forced state change (teleport, velocity
    /// reset) so stale history cannot spike the output.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = None;
    }
}
