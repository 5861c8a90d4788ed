//! Synthetic obstacle field for the patrol demo.

use fc_avoid::SphereScene;
use fc_core::Vec3;

/// A handful of asteroid-sized spheres scattered near the circuit legs —
/// close enough that the avoidance layer has to work, far enough that the
/// circuit stays flyable.
pub fn build_scene() -> SphereScene {
    SphereScene::from_spheres([
        (Vec3::new(500.0, 200.0, -40.0), 35.0),   // first leg, slightly off-line
        (Vec3::new(1040.0, 210.0, 500.0), 30.0),  // second leg
        (Vec3::new(500.0, 180.0, 1050.0), 45.0),  // third leg
        (Vec3::new(-60.0, 200.0, 500.0), 25.0),   // fourth leg
        (Vec3::new(700.0, 230.0, 700.0), 40.0),   // inside the circuit
    ])
}
