pub mod generation;
pub mod layout;

pub use generation::WorldGenerator;
pub use layout::{
    Cabin, Campsite, Chest, ChestKind, PathSegment, Tree, WaterTower, WorldLayout,
};
