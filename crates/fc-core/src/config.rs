//! Ship configuration: thrust, weapons, and movement mode.
//!
//! `ShipConfig` is the host-provided description of the controlled vehicle's
//! hardware.  The AI never reads it on the hot path — it is characterized
//! once into a [`ShipPerformance`][crate::ShipPerformance] envelope at
//! initialisation and again whenever the loadout changes.

use glam::Vec3;

// ── Thrusters ─────────────────────────────────────────────────────────────────

/// Per-axis thrust capacities of the ship's propulsion, in newtons.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrusterConfig {
    /// Forward (`+Z`) thrust.
    pub forward_n: f32,
    /// Reverse (`-Z`) thrust — also the braking capacity along forward travel.
    pub reverse_n: f32,
    /// Lateral (`±X`) thrust.
    pub lateral_n: f32,
    /// Vertical (`±Y`) thrust.
    pub vertical_n: f32,
    /// Turning moment available on each axis (N·m).
    pub turn_moment_nm: f32,
    /// Seconds for a thruster to ramp from idle to full output.
    pub ramp_up_secs: f32,
}

impl Default for ThrusterConfig {
    fn default() -> Self {
        Self {
            forward_n:      100_000.0,
            reverse_n:      50_000.0,
            lateral_n:      30_000.0,
            vertical_n:     30_000.0,
            turn_moment_nm: 40_000.0,
            ramp_up_secs:   0.25,
        }
    }
}

// ── Weapons ───────────────────────────────────────────────────────────────────

/// How a weapon mount aims.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponKind {
    /// Fires along the ship's forward axis; the ship must point at the target.
    Fixed,
    /// Self-aiming; fires whenever a target is assigned.
    Turret,
    /// Fire-and-forget; treated like `Fixed` for the launch decision.
    Guided,
}

/// One weapon mount's ballistic description.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponMount {
    pub kind: WeaponKind,
    /// Muzzle speed of the projectile relative to the ship (m/s).
    pub projectile_speed: f32,
    /// Seconds before the projectile despawns; bounds the firing solution.
    pub projectile_lifetime_secs: f32,
    /// `true` for the primary trigger group, `false` for secondary.
    pub primary: bool,
}

impl WeaponMount {
    /// Maximum effective range of this mount.
    #[inline]
    pub fn range_m(&self) -> f32 {
        self.projectile_speed * self.projectile_lifetime_secs
    }
}

// ── Movement mode ─────────────────────────────────────────────────────────────

/// How the actuation layer decomposes a desired heading into axis inputs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementMode {
    /// Horizontal-plane flight; banks (rolls) into turns like an aircraft.
    PlanarBanked,
    /// Horizontal-plane flight with a level keel; yaw only.
    Planar,
    /// Unconstrained 3D flight with yaw/roll-bias blending and a
    /// pitch-steering threshold gate.
    #[default]
    Full3d,
}

// ── ShipConfig ────────────────────────────────────────────────────────────────

/// Physical description of the controlled ship.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipConfig {
    pub mass_kg: f32,
    /// Bounding-sphere radius used for sweeps, docking, and arrival checks.
    pub radius_m: f32,
    /// Quadratic drag coefficient along the forward axis (1/m).  Zero for
    /// ships whose velocity is not speed-limited by drag.
    pub drag_coefficient_z: f32,
    /// Hard cap on commanded speed (m/s), independent of thrust.
    pub max_speed: f32,
    /// `true` when operating near a surface (reduces avoidance search to the
    /// horizontal plane and selects ground turn acceleration).
    pub grounded: bool,
    pub movement_mode: MovementMode,
    pub thrusters: ThrusterConfig,
    pub weapons: Vec<WeaponMount>,
}

impl ShipConfig {
    /// `true` if any mount in the given trigger group exists.
    pub fn has_weapon_group(&self, primary: bool) -> bool {
        self.weapons.iter().any(|w| w.primary == primary)
    }

    /// Moment of inertia approximation for a solid sphere of the ship's
    /// mass and radius — good enough for gain derivation.
    #[inline]
    pub fn moment_of_inertia(&self) -> f32 {
        0.4 * self.mass_kg * self.radius_m * self.radius_m
    }

    /// Gravity-relative "down" used by planar modes; ships fly with world
    /// `+Y` up.
    #[inline]
    pub fn world_up(&self) -> Vec3 {
        Vec3::Y
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            mass_kg:            10_000.0,
            radius_m:           8.0,
            drag_coefficient_z: 0.0,
            max_speed:          200.0,
            grounded:           false,
            movement_mode:      MovementMode::Full3d,
            thrusters:          ThrusterConfig::default(),
            weapons:            Vec::new(),
        }
    }
}
