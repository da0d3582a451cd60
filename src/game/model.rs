use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::blueprint::model::{BuildingKind, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingState {
    pub id: u32,
    pub pos: GridPos,
    pub kind: BuildingKind,
}

// Everything a player sees of their own town: the full ledger and every
// placed building. Grid occupancy is derivable from the positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TownState {
    pub resources: BTreeMap<Resource, f64>,
    pub buildings: Vec<BuildingState>,
}

#[derive(Debug, Clone)]
pub enum SessionCommand {
    Build {
        username: String,
        building: String,
        pos: GridPos,
    },
    Shutdown,
}
