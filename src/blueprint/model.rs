use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    // Primary
    Food,
    Lumber,
    Stone,
    Weapons,
    Coins,
    // Secondary
    Wheat,
    Wood,
    Meat,
    Iron,
    Gold,
    // Population
    Settlers,
}

impl Resource {
    pub const ALL: [Resource; 11] = [
        Resource::Food,
        Resource::Lumber,
        Resource::Stone,
        Resource::Weapons,
        Resource::Coins,
        Resource::Wheat,
        Resource::Wood,
        Resource::Meat,
        Resource::Iron,
        Resource::Gold,
        Resource::Settlers,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    TownCenter,
    House,
    Farm,
    HuntingLodge,
    Woodcutter,
    LumberYard,
    Quarry,
    IronMine,
    GoldMine,
    Bakery,
    Butcher,
    Barracks,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 12] = [
        BuildingKind::TownCenter,
        BuildingKind::House,
        BuildingKind::Farm,
        BuildingKind::HuntingLodge,
        BuildingKind::Woodcutter,
        BuildingKind::LumberYard,
        BuildingKind::Quarry,
        BuildingKind::IronMine,
        BuildingKind::GoldMine,
        BuildingKind::Bakery,
        BuildingKind::Butcher,
        BuildingKind::Barracks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuildingKind::TownCenter => "town_center",
            BuildingKind::House => "house",
            BuildingKind::Farm => "farm",
            BuildingKind::HuntingLodge => "hunting_lodge",
            BuildingKind::Woodcutter => "woodcutter",
            BuildingKind::LumberYard => "lumber_yard",
            BuildingKind::Quarry => "quarry",
            BuildingKind::IronMine => "iron_mine",
            BuildingKind::GoldMine => "gold_mine",
            BuildingKind::Bakery => "bakery",
            BuildingKind::Butcher => "butcher",
            BuildingKind::Barracks => "barracks",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

// One case per producing building type. The effect itself is dispatched
// against the owning town's ledger, see `Town::apply_effect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEffect {
    TownCenter,
    House,
    Farm,
    HuntingLodge,
    Woodcutter,
    LumberYard,
    Quarry,
    IronMine,
    GoldMine,
    Bakery,
    Butcher,
}

pub type Cost = BTreeMap<Resource, f64>;

#[derive(Debug, Clone)]
pub struct BuildingPlan {
    pub kind: BuildingKind,
    pub hitpoints: u32,
    pub defense: f64,
    pub efficiency: f64,
    pub cost: Cost,
    pub build_time: u64,
    pub cycle_effect: Option<CycleEffect>,
}
