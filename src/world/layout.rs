//! Static world geometry
//!
//! The generated landscape as the simulation sees it: trees, cabins,
//! paths, campsites, water towers and loot chests. Everything here is
//! immutable after generation except chest collection state. Collision
//! is 2D on the ground plane; y is only carried for the host's benefit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub const CABIN_HALF_WIDTH: f32 = 3.0;
pub const CABIN_HALF_DEPTH: f32 = 4.0;
pub const TOWN_CHEST_VALUE: u32 = 50;
pub const CAMPSITE_CHEST_VALUE: u32 = 20;

/// A pine tree. Collision uses only the trunk cylinder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub position: Vec3,
    pub height: f32,
}

impl Tree {
    /// Trunk radius scales with tree height
    pub fn trunk_radius(&self) -> f32 {
        0.3 * self.height / 4.0
    }
}

/// A log cabin, axis-aligned in its own yaw-rotated frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cabin {
    pub position: Vec3,
    pub yaw: f32,
}

impl Cabin {
    /// True if a circle of `radius` around `point` overlaps the footprint
    pub fn blocks(&self, point: Vec3, radius: f32) -> bool {
        let dx = point.x - self.position.x;
        let dz = point.z - self.position.z;
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        // Rotate into the cabin's local frame
        let local_x = dx * cos_yaw + dz * sin_yaw;
        let local_z = -dx * sin_yaw + dz * cos_yaw;
        local_x.abs() < CABIN_HALF_WIDTH + radius && local_z.abs() < CABIN_HALF_DEPTH + radius
    }
}

/// A campsite clearing (fire pit, tents, one chest)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campsite {
    pub position: Vec3,
}

/// A straight dirt path between two cabins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSegment {
    pub start: Vec3,
    pub end: Vec3,
}

impl PathSegment {
    /// Ground-plane distance from `point` to the segment
    pub fn distance_to(&self, point: Vec3) -> f32 {
        point_segment_distance_xz(point, self.start, self.end)
    }
}

/// Landmark water tower raised over a cabin cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterTower {
    pub position: Vec3,
}

/// Where a chest was placed, which decides its gold value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestKind {
    Town,
    Campsite,
}

/// A one-shot gold chest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chest {
    pub position: Vec3,
    pub kind: ChestKind,
    pub value: u32,
    pub collected: bool,
}

impl Chest {
    /// Build a chest at a ground point; the kind decides its gold value
    /// and how high it sits (town chests are raised for visibility)
    pub fn new(position: Vec3, kind: ChestKind) -> Self {
        let (value, height) = match kind {
            ChestKind::Town => (TOWN_CHEST_VALUE, 1.5),
            ChestKind::Campsite => (CAMPSITE_CHEST_VALUE, 0.35),
        };
        Chest {
            position: Vec3::new(position.x, height, position.z),
            kind,
            value,
            collected: false,
        }
    }
}

/// The complete generated landscape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldLayout {
    /// Player spawn point
    pub spawn: Vec3,
    pub trees: Vec<Tree>,
    pub cabins: Vec<Cabin>,
    pub campsites: Vec<Campsite>,
    pub paths: Vec<PathSegment>,
    pub water_towers: Vec<WaterTower>,
    pub chests: Vec<Chest>,
}

impl WorldLayout {
    /// An empty layout with only a spawn point
    pub fn empty(spawn: Vec3) -> Self {
        WorldLayout {
            spawn,
            trees: Vec::new(),
            cabins: Vec::new(),
            campsites: Vec::new(),
            paths: Vec::new(),
            water_towers: Vec::new(),
            chests: Vec::new(),
        }
    }

    /// True if a circle of `radius` around `point` overlaps a tree trunk
    /// or a cabin footprint. Used to reject player movement.
    pub fn blocks(&self, point: Vec3, radius: f32) -> bool {
        for tree in &self.trees {
            let dx = point.x - tree.position.x;
            let dz = point.z - tree.position.z;
            let min = tree.trunk_radius() + radius;
            if dx * dx + dz * dz < min * min {
                return true;
            }
        }
        self.cabins.iter().any(|cabin| cabin.blocks(point, radius))
    }
}

/// Ground-plane distance from `point` to the segment `a..b`
pub fn point_segment_distance_xz(point: Vec3, a: Vec3, b: Vec3) -> f32 {
    let px = point.x - a.x;
    let pz = point.z - a.z;
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    let len_sq = dx * dx + dz * dz;
    let t = if len_sq > 0.0 {
        ((px * dx + pz * dz) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let cx = px - t * dx;
    let cz = pz - t * dz;
    (cx * cx + cz * cz).sqrt()
}
