use std::collections::BTreeMap;

use crate::blueprint::catalog;
use crate::blueprint::model::{BuildingKind, BuildingPlan, CycleEffect, Resource};
use crate::game::building::Building;
use crate::game::model::{BuildingState, GridPos, TownState};

pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 4;

#[derive(Debug, Clone)]
pub struct Town {
    resources: BTreeMap<Resource, f64>,
    buildings: Vec<Building>,
    // Cells hold the id of the occupying building; the occupied set and the
    // building list stay in 1:1 correspondence.
    grid: [[Option<u32>; GRID_COLS]; GRID_ROWS],
}

impl Town {
    pub fn new() -> Self {
        let mut resources: BTreeMap<Resource, f64> =
            Resource::ALL.into_iter().map(|kind| (kind, 0.0)).collect();
        resources.insert(Resource::Food, 10.0);
        resources.insert(Resource::Lumber, 10.0);
        resources.insert(Resource::Stone, 5.0);
        resources.insert(Resource::Coins, 2.0);
        resources.insert(Resource::Settlers, 5.0);

        let mut town = Self {
            resources,
            buildings: Vec::new(),
            grid: [[None; GRID_COLS]; GRID_ROWS],
        };

        let center = Building::new(1, GridPos { x: 0, y: 0 }, BuildingKind::TownCenter);
        town.grid[0][0] = Some(center.id());
        town.buildings.push(center);
        town
    }

    fn cell(&self, pos: GridPos) -> Option<Option<u32>> {
        self.grid.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    pub fn can_build(&self, plan: &BuildingPlan, pos: GridPos) -> bool {
        match self.cell(pos) {
            Some(None) => {}
            _ => return false,
        }
        plan.cost
            .iter()
            .all(|(resource, amount)| self.resource(*resource) >= *amount)
    }

    // The caller is expected to have checked `can_build` first.
    pub fn build(&mut self, plan: &BuildingPlan, pos: GridPos) {
        for (resource, amount) in &plan.cost {
            self.sub_resource(*resource, *amount);
        }
        let building = Building::new(self.next_building_id(), pos, plan.kind);
        self.grid[pos.y][pos.x] = Some(building.id());
        self.buildings.push(building);
    }

    fn next_building_id(&self) -> u32 {
        // The founding town center keeps the list non-empty.
        self.buildings.iter().map(Building::id).max().unwrap_or(0) + 1
    }

    pub fn resource(&self, resource: Resource) -> f64 {
        self.resources.get(&resource).copied().unwrap_or(0.0)
    }

    pub fn add_resource(&mut self, resource: Resource, amount: f64) {
        *self.resources.entry(resource).or_insert(0.0) += amount;
        self.cap_resources();
    }

    // Unchecked; the ledger may go negative when overdrawn.
    pub fn sub_resource(&mut self, resource: Resource, amount: f64) {
        *self.resources.entry(resource).or_insert(0.0) -= amount;
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn buildings_named(&self, kind: BuildingKind) -> impl Iterator<Item = &Building> {
        self.buildings
            .iter()
            .filter(move |building| building.kind() == kind)
    }

    pub fn count_building(&self, kind: BuildingKind) -> usize {
        self.buildings_named(kind).count()
    }

    pub fn advance(&mut self, elapsed: u64) {
        for index in 0..self.buildings.len() {
            if self.buildings[index].cycle_up(elapsed) {
                if let Some(effect) = catalog::plan(self.buildings[index].kind()).cycle_effect {
                    self.apply_effect(effect);
                }
            }
        }
    }

    fn apply_effect(&mut self, effect: CycleEffect) {
        match effect {
            CycleEffect::TownCenter => {
                self.add_resource(Resource::Settlers, 1.0);
                self.add_resource(Resource::Food, 0.1);
                self.add_resource(Resource::Lumber, 0.1);
            }
            CycleEffect::House => self.add_resource(Resource::Settlers, 2.0),
            CycleEffect::Farm => self.add_resource(Resource::Wheat, 1.0),
            CycleEffect::HuntingLodge => self.add_resource(Resource::Meat, 1.0),
            CycleEffect::Woodcutter => self.add_resource(Resource::Wood, 1.0),
            CycleEffect::LumberYard => {
                if self.resource(Resource::Wood) >= 2.0 {
                    self.sub_resource(Resource::Wood, 2.0);
                    self.add_resource(Resource::Lumber, 1.0);
                }
            }
            CycleEffect::Quarry => self.add_resource(Resource::Stone, 1.0),
            CycleEffect::IronMine => self.add_resource(Resource::Iron, 1.0),
            CycleEffect::GoldMine => self.add_resource(Resource::Gold, 1.0),
            CycleEffect::Bakery => {
                if self.resource(Resource::Wheat) >= 2.0 {
                    self.sub_resource(Resource::Wheat, 2.0);
                    self.add_resource(Resource::Food, 1.0);
                }
            }
            CycleEffect::Butcher => {
                if self.resource(Resource::Meat) >= 2.0 {
                    self.sub_resource(Resource::Meat, 2.0);
                    self.add_resource(Resource::Food, 1.5);
                }
            }
        }
    }

    // Caps are recomputed from current building counts on every additive
    // update; subtraction and build costs are never clamped.
    fn cap_resources(&mut self) {
        let town_centers = self.count_building(BuildingKind::TownCenter) as f64;
        let houses = self.count_building(BuildingKind::House) as f64;
        let bakeries = self.count_building(BuildingKind::Bakery) as f64;
        let butchers = self.count_building(BuildingKind::Butcher) as f64;
        let farms = self.count_building(BuildingKind::Farm) as f64;
        let lumber_yards = self.count_building(BuildingKind::LumberYard) as f64;

        self.clamp(Resource::Settlers, houses * 4.0 + town_centers * 10.0);
        self.clamp(
            Resource::Food,
            town_centers * 10.0 + bakeries * 2.0 + butchers * 4.0,
        );
        self.clamp(Resource::Wheat, farms * 4.0);
        self.clamp(Resource::Lumber, town_centers * 10.0 + lumber_yards * 4.0);
    }

    fn clamp(&mut self, resource: Resource, cap: f64) {
        let amount = self.resources.entry(resource).or_insert(0.0);
        if *amount > cap {
            *amount = cap;
        }
    }

    pub fn snapshot(&self) -> TownState {
        TownState {
            resources: self.resources.clone(),
            buildings: self
                .buildings
                .iter()
                .map(|building| BuildingState {
                    id: building.id(),
                    pos: building.pos(),
                    kind: building.kind(),
                })
                .collect(),
        }
    }
}

impl Default for Town {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: usize, y: usize) -> GridPos {
        GridPos { x, y }
    }

    fn occupied_cells(town: &Town) -> Vec<(GridPos, u32)> {
        let mut cells = Vec::new();
        for y in 0..GRID_ROWS {
            for x in 0..GRID_COLS {
                if let Some(id) = town.grid[y][x] {
                    cells.push((pos(x, y), id));
                }
            }
        }
        cells
    }

    #[test]
    fn fresh_town_matches_starting_state() {
        let town = Town::new();
        assert_eq!(town.resource(Resource::Food), 10.0);
        assert_eq!(town.resource(Resource::Lumber), 10.0);
        assert_eq!(town.resource(Resource::Stone), 5.0);
        assert_eq!(town.resource(Resource::Coins), 2.0);
        assert_eq!(town.resource(Resource::Settlers), 5.0);
        for kind in [
            Resource::Weapons,
            Resource::Wheat,
            Resource::Wood,
            Resource::Meat,
            Resource::Iron,
            Resource::Gold,
        ] {
            assert_eq!(town.resource(kind), 0.0);
        }

        let buildings = town.buildings();
        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0].id(), 1);
        assert_eq!(buildings[0].kind(), BuildingKind::TownCenter);
        assert_eq!(buildings[0].pos(), pos(0, 0));
    }

    #[test]
    fn grid_and_building_list_stay_in_sync() {
        let mut town = Town::new();
        town.build(catalog::plan(BuildingKind::House), pos(0, 1));
        town.build(catalog::plan(BuildingKind::Farm), pos(2, 3));

        let cells = occupied_cells(&town);
        assert_eq!(cells.len(), town.buildings().len());
        for building in town.buildings() {
            assert!(cells.contains(&(building.pos(), building.id())));
        }
    }

    #[test]
    fn can_build_rejects_occupied_cell_regardless_of_resources() {
        let town = Town::new();
        assert!(!town.can_build(catalog::plan(BuildingKind::House), pos(0, 0)));
    }

    #[test]
    fn can_build_rejects_out_of_range_positions() {
        let town = Town::new();
        assert!(!town.can_build(catalog::plan(BuildingKind::House), pos(4, 0)));
        assert!(!town.can_build(catalog::plan(BuildingKind::House), pos(0, 17)));
    }

    #[test]
    fn can_build_rejects_any_single_shortfall() {
        let mut town = Town::new();
        // Plenty of lumber, but the stone for a house is gone.
        town.sub_resource(Resource::Stone, 5.0);
        assert!(!town.can_build(catalog::plan(BuildingKind::House), pos(0, 1)));
    }

    #[test]
    fn build_deducts_exactly_the_plan_cost() {
        let mut town = Town::new();
        let plan = catalog::plan(BuildingKind::House);
        assert!(town.can_build(plan, pos(0, 1)));
        town.build(plan, pos(0, 1));

        assert_eq!(town.resource(Resource::Lumber), 8.0);
        assert_eq!(town.resource(Resource::Stone), 4.0);
        assert_eq!(town.buildings().len(), 2);
        let house = &town.buildings()[1];
        assert_eq!(house.pos(), pos(0, 1));
        assert_eq!(town.grid[1][0], Some(house.id()));
    }

    #[test]
    fn building_ids_increment_from_the_town_center() {
        let mut town = Town::new();
        town.build(catalog::plan(BuildingKind::House), pos(0, 1));
        town.build(catalog::plan(BuildingKind::Farm), pos(1, 1));
        let ids: Vec<u32> = town.buildings().iter().map(Building::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn sub_resource_can_overdraw() {
        let mut town = Town::new();
        town.sub_resource(Resource::Coins, 5.0);
        assert_eq!(town.resource(Resource::Coins), -3.0);
    }

    #[test]
    fn add_resource_clamps_capped_kinds() {
        let mut town = Town::new();
        // One town center: settlers cap at 10.
        town.add_resource(Resource::Settlers, 20.0);
        assert_eq!(town.resource(Resource::Settlers), 10.0);

        // No farms yet, so wheat caps at zero.
        town.add_resource(Resource::Wheat, 5.0);
        assert_eq!(town.resource(Resource::Wheat), 0.0);

        town.build(catalog::plan(BuildingKind::Farm), pos(1, 0));
        town.add_resource(Resource::Wheat, 5.0);
        assert_eq!(town.resource(Resource::Wheat), 4.0);
    }

    #[test]
    fn uncapped_kinds_grow_freely() {
        let mut town = Town::new();
        town.add_resource(Resource::Stone, 100.0);
        assert_eq!(town.resource(Resource::Stone), 105.0);
    }

    #[test]
    fn advance_fires_town_center_cycle_after_threshold() {
        let mut town = Town::new();
        for _ in 0..49 {
            town.advance(100);
        }
        assert_eq!(town.resource(Resource::Settlers), 5.0);

        town.advance(100);
        // One settler gained; food and lumber were already at their caps.
        assert_eq!(town.resource(Resource::Settlers), 6.0);
        assert_eq!(town.resource(Resource::Food), 10.0);
        assert_eq!(town.resource(Resource::Lumber), 10.0);
    }

    #[test]
    fn lumber_yard_conversion_requires_input_wood() {
        let mut town = Town::new();
        town.sub_resource(Resource::Lumber, 5.0);

        town.apply_effect(CycleEffect::LumberYard);
        assert_eq!(town.resource(Resource::Lumber), 5.0);

        town.add_resource(Resource::Wood, 2.0);
        town.apply_effect(CycleEffect::LumberYard);
        assert_eq!(town.resource(Resource::Wood), 0.0);
        assert_eq!(town.resource(Resource::Lumber), 6.0);
    }

    #[test]
    fn butcher_converts_meat_into_food() {
        let mut town = Town::new();
        town.sub_resource(Resource::Food, 10.0);
        town.add_resource(Resource::Meat, 2.0);

        town.apply_effect(CycleEffect::Butcher);
        assert_eq!(town.resource(Resource::Meat), 0.0);
        assert_eq!(town.resource(Resource::Food), 1.5);
    }

    #[test]
    fn snapshot_carries_full_ledger_and_buildings() {
        let mut town = Town::new();
        town.build(catalog::plan(BuildingKind::House), pos(0, 1));
        let state = town.snapshot();

        assert_eq!(state.resources.len(), Resource::ALL.len());
        assert_eq!(state.buildings.len(), 2);
        assert_eq!(state.buildings[1].kind, BuildingKind::House);
        assert_eq!(state.buildings[1].pos, pos(0, 1));
    }
}
