//! Procedural world generation
//!
//! Rejection-sampled placement of cabins, paths, campsites, chests,
//! water towers and trees. Generation is deterministic for a given
//! seed; all spacing rules are best-effort, so requested counts are
//! upper bounds.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::WorldGenConfig;
use crate::world::layout::{
    Cabin, Campsite, Chest, ChestKind, PathSegment, Tree, WaterTower, WorldLayout,
};

const CABIN_ATTEMPTS: usize = 100;
const CAMPSITE_ATTEMPTS: usize = 50;
const TREE_ATTEMPTS: usize = 10;

const MIN_TREE_HEIGHT: f32 = 4.0;
const MAX_TREE_HEIGHT: f32 = 8.0;

/// Chests sit at 70% of the cluster radius from the cluster center,
/// water towers just outside it at 120%
const CHEST_RING_FACTOR: f32 = 0.7;
const TOWER_RING_FACTOR: f32 = 1.2;

/// Seeded generator producing a [`WorldLayout`]
pub struct WorldGenerator {
    config: WorldGenConfig,
    rng: Xoshiro256PlusPlus,
}

impl WorldGenerator {
    pub fn new(config: WorldGenConfig) -> Self {
        let rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
        WorldGenerator { config, rng }
    }

    /// Generate the full landscape. Order matters: paths depend on
    /// cabins, tree placement depends on both.
    pub fn generate(&mut self) -> WorldLayout {
        let mut layout = WorldLayout::empty(Vec3::ZERO);
        self.place_cabins(&mut layout);
        self.link_paths(&mut layout);
        self.place_campsites(&mut layout);
        self.place_cluster_landmarks(&mut layout);
        self.place_trees(&mut layout);
        log::info!(
            "Generated world: {} cabins, {} paths, {} campsites, {} chests, {} towers, {} trees",
            layout.cabins.len(),
            layout.paths.len(),
            layout.campsites.len(),
            layout.chests.len(),
            layout.water_towers.len(),
            layout.trees.len()
        );
        layout
    }

    fn sample_settlement_point(&mut self) -> Vec3 {
        let extent = self.config.settlement_half_extent;
        Vec3::new(
            self.rng.random_range(-extent..extent),
            0.0,
            self.rng.random_range(-extent..extent),
        )
    }

    /// Cabins must keep `min_cabin_spacing` from each other but also
    /// stay within `max_cabin_spacing` of every placed cabin, which
    /// pulls them together into village clusters.
    fn place_cabins(&mut self, layout: &mut WorldLayout) {
        for _ in 0..self.config.cabin_count {
            for _ in 0..CABIN_ATTEMPTS {
                let position = self.sample_settlement_point();
                if position.distance(layout.spawn) < self.config.spawn_clearance {
                    continue;
                }
                let valid = layout.cabins.iter().all(|other| {
                    let d = position.distance(other.position);
                    d >= self.config.min_cabin_spacing && d <= self.config.max_cabin_spacing
                });
                if valid {
                    let yaw = self.rng.random_range(0.0..std::f32::consts::TAU);
                    layout.cabins.push(Cabin { position, yaw });
                    break;
                }
            }
        }
    }

    /// Connect every pair of cabins closer than the link distance
    fn link_paths(&mut self, layout: &mut WorldLayout) {
        for i in 0..layout.cabins.len() {
            for j in (i + 1)..layout.cabins.len() {
                let a = layout.cabins[i].position;
                let b = layout.cabins[j].position;
                if a.distance(b) < self.config.path_link_distance {
                    layout.paths.push(PathSegment { start: a, end: b });
                }
            }
        }
    }

    fn place_campsites(&mut self, layout: &mut WorldLayout) {
        for _ in 0..self.config.campsite_count {
            for _ in 0..CAMPSITE_ATTEMPTS {
                let position = self.sample_settlement_point();
                if position.distance(layout.spawn) < self.config.spawn_clearance {
                    continue;
                }
                let clear_of_cabins = layout.cabins.iter().all(|cabin| {
                    position.distance(cabin.position) >= self.config.campsite_cabin_clearance
                });
                let clear_of_campsites = layout.campsites.iter().all(|other| {
                    position.distance(other.position) >= self.config.campsite_spacing
                });
                if clear_of_cabins && clear_of_campsites {
                    layout.campsites.push(Campsite { position });
                    break;
                }
            }
        }
    }

    /// Group cabins into clusters and drop one town chest and one water
    /// tower per cluster, then a small chest at every campsite.
    fn place_cluster_landmarks(&mut self, layout: &mut WorldLayout) {
        let radius = self.config.cluster_radius;
        let mut processed = vec![false; layout.cabins.len()];

        for seed in 0..layout.cabins.len() {
            if processed[seed] {
                continue;
            }
            let seed_pos = layout.cabins[seed].position;
            let mut center = Vec3::ZERO;
            let mut members = 0;
            for (i, cabin) in layout.cabins.iter().enumerate() {
                if !processed[i] && seed_pos.distance(cabin.position) <= radius {
                    processed[i] = true;
                    center += cabin.position;
                    members += 1;
                }
            }
            center /= members as f32;

            let chest_angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let chest_pos = center
                + Vec3::new(chest_angle.cos(), 0.0, chest_angle.sin()) * (radius * CHEST_RING_FACTOR);
            layout.chests.push(Chest::new(chest_pos, ChestKind::Town));

            let tower_angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let tower_pos = center
                + Vec3::new(tower_angle.cos(), 0.0, tower_angle.sin()) * (radius * TOWER_RING_FACTOR);
            layout.water_towers.push(WaterTower { position: tower_pos });
        }

        for i in 0..layout.campsites.len() {
            let position = layout.campsites[i].position + Vec3::new(2.0, 0.0, 0.0);
            layout
                .chests
                .push(Chest::new(position, ChestKind::Campsite));
        }
    }

    fn place_trees(&mut self, layout: &mut WorldLayout) {
        let extent = self.config.world_half_extent;
        for _ in 0..self.config.tree_count {
            for _ in 0..TREE_ATTEMPTS {
                let position = Vec3::new(
                    self.rng.random_range(-extent..extent),
                    0.0,
                    self.rng.random_range(-extent..extent),
                );
                if self.tree_position_valid(layout, position) {
                    let height = self.rng.random_range(MIN_TREE_HEIGHT..MAX_TREE_HEIGHT);
                    layout.trees.push(Tree { position, height });
                    break;
                }
            }
        }
    }

    fn tree_position_valid(&self, layout: &WorldLayout, position: Vec3) -> bool {
        let clear_of_paths = layout
            .paths
            .iter()
            .all(|path| path.distance_to(position) >= self.config.min_tree_path_clearance);
        if !clear_of_paths {
            return false;
        }
        let clear_of_cabins = layout.cabins.iter().all(|cabin| {
            position.distance(cabin.position) >= self.config.min_tree_cabin_clearance
        });
        if !clear_of_cabins {
            return false;
        }
        layout.trees.iter().all(|tree| {
            position.distance(tree.position) >= self.config.min_tree_tree_clearance
        })
    }
}
