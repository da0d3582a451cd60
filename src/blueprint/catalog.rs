use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::blueprint::model::{BuildingKind, BuildingPlan, Cost, CycleEffect, Resource};
use crate::game::error::Error;

static CATALOG: OnceLock<Vec<BuildingPlan>> = OnceLock::new();

// Built once, never mutated afterwards.
pub fn catalog() -> &'static [BuildingPlan] {
    CATALOG.get_or_init(build_catalog)
}

pub fn plan(kind: BuildingKind) -> &'static BuildingPlan {
    catalog()
        .iter()
        .find(|plan| plan.kind == kind)
        .expect("catalog covers every building kind")
}

pub fn lookup(name: &str) -> Result<&'static BuildingPlan, Error> {
    catalog()
        .iter()
        .find(|plan| plan.kind.name() == name)
        .ok_or_else(|| Error::UnknownBuilding(name.to_string()))
}

fn cost(entries: &[(Resource, f64)]) -> Cost {
    entries.iter().copied().collect::<BTreeMap<_, _>>()
}

fn build_catalog() -> Vec<BuildingPlan> {
    vec![
        BuildingPlan {
            kind: BuildingKind::TownCenter,
            hitpoints: 100,
            defense: 0.05,
            efficiency: 1.00,
            cost: cost(&[
                (Resource::Lumber, 20.0),
                (Resource::Stone, 10.0),
                (Resource::Settlers, 10.0),
            ]),
            build_time: 60_000,
            cycle_effect: Some(CycleEffect::TownCenter),
        },
        BuildingPlan {
            kind: BuildingKind::House,
            hitpoints: 5,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[(Resource::Lumber, 2.0), (Resource::Stone, 1.0)]),
            build_time: 5_000,
            cycle_effect: Some(CycleEffect::House),
        },
        BuildingPlan {
            kind: BuildingKind::Farm,
            hitpoints: 2,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[(Resource::Lumber, 2.0), (Resource::Settlers, 2.0)]),
            build_time: 5_000,
            cycle_effect: Some(CycleEffect::Farm),
        },
        BuildingPlan {
            kind: BuildingKind::HuntingLodge,
            hitpoints: 5,
            defense: 0.05,
            efficiency: 1.00,
            cost: cost(&[(Resource::Lumber, 4.0), (Resource::Settlers, 3.0)]),
            build_time: 10_000,
            cycle_effect: Some(CycleEffect::HuntingLodge),
        },
        BuildingPlan {
            kind: BuildingKind::Woodcutter,
            hitpoints: 10,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[(Resource::Lumber, 2.0), (Resource::Settlers, 2.0)]),
            build_time: 10_000,
            cycle_effect: Some(CycleEffect::Woodcutter),
        },
        BuildingPlan {
            kind: BuildingKind::LumberYard,
            hitpoints: 10,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[(Resource::Lumber, 3.0), (Resource::Settlers, 4.0)]),
            build_time: 10_000,
            cycle_effect: Some(CycleEffect::LumberYard),
        },
        BuildingPlan {
            kind: BuildingKind::Quarry,
            hitpoints: 10,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[(Resource::Lumber, 3.0), (Resource::Settlers, 4.0)]),
            build_time: 10_000,
            cycle_effect: Some(CycleEffect::Quarry),
        },
        BuildingPlan {
            kind: BuildingKind::IronMine,
            hitpoints: 10,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[
                (Resource::Lumber, 3.0),
                (Resource::Stone, 1.0),
                (Resource::Settlers, 5.0),
            ]),
            build_time: 15_000,
            cycle_effect: Some(CycleEffect::IronMine),
        },
        BuildingPlan {
            kind: BuildingKind::GoldMine,
            hitpoints: 10,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[
                (Resource::Lumber, 3.0),
                (Resource::Stone, 1.0),
                (Resource::Settlers, 5.0),
            ]),
            build_time: 15_000,
            cycle_effect: Some(CycleEffect::GoldMine),
        },
        BuildingPlan {
            kind: BuildingKind::Bakery,
            hitpoints: 8,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[
                (Resource::Lumber, 3.0),
                (Resource::Stone, 1.0),
                (Resource::Settlers, 2.0),
            ]),
            build_time: 15_000,
            cycle_effect: Some(CycleEffect::Bakery),
        },
        BuildingPlan {
            kind: BuildingKind::Butcher,
            hitpoints: 8,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[
                (Resource::Lumber, 4.0),
                (Resource::Stone, 2.0),
                (Resource::Settlers, 2.0),
            ]),
            build_time: 15_000,
            cycle_effect: Some(CycleEffect::Butcher),
        },
        BuildingPlan {
            kind: BuildingKind::Barracks,
            hitpoints: 20,
            defense: 0.00,
            efficiency: 1.00,
            cost: cost(&[
                (Resource::Lumber, 5.0),
                (Resource::Stone, 4.0),
                (Resource::Settlers, 5.0),
            ]),
            build_time: 20_000,
            cycle_effect: None,
        },
    ]
}
