//! Per-tick spatial hash grid over agent positions.
//!
//! Rebuilt once per tick in O(N) and queried per agent for evade lists.
//! Cells are cubes of `cell_size` metres; a radius query visits the 3³
//! neighbourhood around the probe cell, so choose `cell_size` ≥ the largest
//! query radius for exact results.

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as CellMap;

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as CellMap;

use fc_core::{AgentId, ShipKinematics, Vec3};

/// A transient index of agent positions.
pub struct ProximityIndex {
    cell_size: f32,
    cells: CellMap<(i32, i32, i32), Vec<AgentId>>,
}

impl ProximityIndex {
    /// Build from the tick's kinematics array (indexed by `AgentId`).
    pub fn build(kinematics: &[ShipKinematics], cell_size: f32) -> Self {
        let cell_size = cell_size.max(1.0);
        let mut cells: CellMap<(i32, i32, i32), Vec<AgentId>> = CellMap::default();
        for (i, kin) in kinematics.iter().enumerate() {
            cells
                .entry(cell_of(kin.position, cell_size))
                .or_default()
                .push(AgentId(i as u32));
        }
        Self { cell_size, cells }
    }

    /// All agents within `radius` of `position`, excluding `exclude`.
    ///
    /// Results are in ascending `AgentId` order for determinism.
    pub fn within(
        &self,
        position:   Vec3,
        radius:     f32,
        kinematics: &[ShipKinematics],
        exclude:    AgentId,
    ) -> Vec<AgentId> {
        let (cx, cy, cz) = cell_of(position, self.cell_size);
        let reach = (radius / self.cell_size).ceil() as i32;
        let r_sq = radius * radius;

        let mut found = Vec::new();
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                for dz in -reach..=reach {
                    let Some(agents) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &agent in agents {
                        if agent == exclude {
                            continue;
                        }
                        let d = kinematics[agent.index()].position - position;
                        if d.length_squared() <= r_sq {
                            found.push(agent);
                        }
                    }
                }
            }
        }
        found.sort_unstable();
        found
    }
}

#[inline]
fn cell_of(p: Vec3, cell_size: f32) -> (i32, i32, i32) {
    (
        (p.x / cell_size).floor() as i32,
        (p.y / cell_size).floor() as i32,
        (p.z / cell_size).floor() as i32,
    )
}
