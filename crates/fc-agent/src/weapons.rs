//! Weapon-fire decisions.
//!
//! Turrets aim themselves, so they fire whenever a live target is assigned.
//! Fixed and guided mounts fire only when the ballistic solution works out:
//! a round leaving the ship right now, inheriting the ship's velocity, must
//! pass within the target's radius before the round expires — the same
//! closest-approach predicate obstacle avoidance uses.

use fc_avoid::on_collision_course;
use fc_core::{ShipConfig, ShipKinematics, ShipSnapshot, WeaponKind};

/// Fire decision for one trigger group: `(primary, secondary)`.
pub fn fire_decision(
    config: &ShipConfig,
    kin:    &ShipKinematics,
    target: Option<&ShipSnapshot>,
) -> (bool, bool) {
    let Some(target) = target else {
        return (false, false);
    };
    if target.destroyed {
        return (false, false);
    }

    let mut primary = false;
    let mut secondary = false;
    for mount in &config.weapons {
        let fires = match mount.kind {
            WeaponKind::Turret => true,
            WeaponKind::Fixed | WeaponKind::Guided => {
                ballistic_hit(kin, target, mount.projectile_speed, mount.projectile_lifetime_secs)
            }
        };
        if fires {
            if mount.primary {
                primary = true;
            } else {
                secondary = true;
            }
        }
    }
    (primary, secondary)
}

/// Would a round fired along the nose right now reach the target within its
/// lifetime?
fn ballistic_hit(
    kin:           &ShipKinematics,
    target:        &ShipSnapshot,
    muzzle_speed:  f32,
    lifetime_secs: f32,
) -> bool {
    if muzzle_speed <= 0.0 || lifetime_secs <= 0.0 {
        return false;
    }
    let projectile_vel = kin.forward() * muzzle_speed + kin.velocity;
    on_collision_course(
        target.position() - kin.position,
        target.velocity() - projectile_vel,
        target.radius_m,
        lifetime_secs,
    )
}
