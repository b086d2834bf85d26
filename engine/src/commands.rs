//! Player commands that build, upgrade and sell towers.
//!
//! Each command has a `try_*` form explaining a rejection and a plain form
//! that reports success only. Rejected commands leave the state untouched.

use log::debug;
use rogue_defence_core::{CellCoord, Event, PlacementError, TowerId, TowerKind, UpgradeError};
use rogue_defence_world::{query, Tower};

use crate::Engine;

/// Relative slack absorbing the `f64` rounding of a decimal ratio product.
const RATIO_TOLERANCE: f64 = 4.0 * f64::EPSILON;

impl Engine {
    /// Explains why a tower cannot be built at `cell`, ignoring its cost.
    #[must_use]
    pub fn placement_error(&self, cell: CellCoord) -> Option<PlacementError> {
        query::placement_error(&self.state, self.config.playable_rows, cell)
    }

    /// Reports whether a tower could be built at `cell`, ignoring its cost.
    #[must_use]
    pub fn is_valid_placement(&self, cell: CellCoord) -> bool {
        self.placement_error(cell).is_none()
    }

    /// Builds a level-one tower, charging its cost.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlacementError`] that applies to the request.
    pub fn try_place_tower(
        &mut self,
        cell: CellCoord,
        kind: TowerKind,
    ) -> Result<TowerId, PlacementError> {
        if let Some(error) = self.placement_error(cell) {
            return Err(error);
        }
        let stats = *self.config.towers.get(kind);
        if self.state.money < stats.cost {
            return Err(PlacementError::InsufficientFunds);
        }

        self.state.money -= stats.cost;
        let id = TowerId::new(self.next_tower_id);
        self.next_tower_id = self.next_tower_id.wrapping_add(1);
        self.state.grid.insert(Tower::new(id, cell, kind, &stats));

        debug!("placed {kind:?} tower {} at {cell:?}", id.get());
        self.events.push(Event::TowerPlaced { tower: id, kind, cell });
        Ok(id)
    }

    /// Builds a level-one tower, reporting whether it was built.
    pub fn place_tower(&mut self, cell: CellCoord, kind: TowerKind) -> bool {
        self.try_place_tower(cell, kind).is_ok()
    }

    /// Gold required to raise the tower at `cell` by one level.
    #[must_use]
    pub fn upgrade_cost(&self, cell: CellCoord) -> Option<u32> {
        let tower = self.state.grid.tower(cell)?;
        let base = self.config.towers.get(tower.kind).cost;
        let factor = f64::from(self.config.upgrade_cost_multiplier).powf(f64::from(tower.level));
        Some((f64::from(base) * factor).floor() as u32)
    }

    /// Raises the tower at `cell` by one level.
    ///
    /// Returns the level the tower reached.
    ///
    /// # Errors
    ///
    /// Returns [`UpgradeError::MissingTower`] for an empty cell and
    /// [`UpgradeError::InsufficientFunds`] when the upgrade is unaffordable.
    pub fn try_upgrade_tower(&mut self, cell: CellCoord) -> Result<u32, UpgradeError> {
        let cost = self.upgrade_cost(cell).ok_or(UpgradeError::MissingTower)?;
        if self.state.money < cost {
            return Err(UpgradeError::InsufficientFunds);
        }
        let tower = self
            .state
            .grid
            .tower_mut(cell)
            .ok_or(UpgradeError::MissingTower)?;

        tower.level += 1;
        tower.total_invested = tower.total_invested.saturating_add(cost);
        let (id, level) = (tower.id, tower.level);
        self.state.money -= cost;

        debug!("upgraded tower {} to level {level} for {cost}", id.get());
        self.events.push(Event::TowerUpgraded {
            tower: id,
            level,
            cost,
        });
        Ok(level)
    }

    /// Raises the tower at `cell` by one level, reporting whether it was
    /// upgraded.
    pub fn upgrade_tower(&mut self, cell: CellCoord) -> bool {
        self.try_upgrade_tower(cell).is_ok()
    }

    /// Gold refunded if the tower at `cell` were sold now.
    #[must_use]
    pub fn sell_value(&self, cell: CellCoord) -> Option<u32> {
        self.state
            .grid
            .tower(cell)
            .map(|tower| self.refund_for(tower.total_invested))
    }

    /// Sells the tower at `cell`, returning the refunded gold.
    ///
    /// Empty cells are left alone and yield `None`.
    pub fn sell_tower(&mut self, cell: CellCoord) -> Option<u32> {
        let tower = self.state.grid.remove(cell)?;
        let refund = self.refund_for(tower.total_invested);
        self.state.money = self.state.money.saturating_add(refund);

        debug!("sold tower {} for {refund}", tower.id.get());
        self.events.push(Event::TowerSold {
            tower: tower.id,
            refund,
        });
        Some(refund)
    }

    /// `floor(invested * sell_ratio)`, with the ratio taken in the decimal
    /// form it was configured with rather than its nearest `f32`.
    pub(crate) fn refund_for(&self, invested: u32) -> u32 {
        let ratio = decimal_ratio(self.config.sell_ratio);
        let refund = (f64::from(invested) * ratio * (1.0 + RATIO_TOLERANCE)).floor();
        refund.clamp(0.0, f64::from(u32::MAX)) as u32
    }
}

/// Shortest decimal that round-trips to `ratio`, read back as `f64`.
fn decimal_ratio(ratio: f32) -> f64 {
    ratio.to_string().parse().unwrap_or_else(|_| f64::from(ratio))
}

#[cfg(test)]
mod tests {
    use rogue_defence_core::EngineConfig;

    use super::*;

    fn free_cell(engine: &Engine) -> CellCoord {
        (0..engine.config().playable_rows)
            .flat_map(|row| (0..engine.config().grid_w).map(move |column| CellCoord::new(column, row)))
            .find(|cell| engine.is_valid_placement(*cell))
            .expect("free cell")
    }

    #[test]
    fn refunds_floor_the_sell_ratio() {
        let engine = Engine::with_seed(1);
        assert_eq!(engine.refund_for(50), 35);
        assert_eq!(engine.refund_for(120), 84);
        assert_eq!(engine.refund_for(150), 105);
        assert_eq!(engine.refund_for(250), 175);
        assert_eq!(engine.refund_for(125), 87);
    }

    #[test]
    fn refunds_floor_ratios_beyond_thousandths() {
        let config = EngineConfig {
            sell_ratio: 0.6666,
            ..EngineConfig::default()
        };
        let engine = Engine::new(config, 1).expect("valid config");
        assert_eq!(engine.refund_for(3000), 1999);
        assert_eq!(engine.refund_for(10_000), 6666);
        assert_eq!(engine.refund_for(1), 0);

        let config = EngineConfig {
            sell_ratio: 0.125,
            ..EngineConfig::default()
        };
        let engine = Engine::new(config, 1).expect("valid config");
        assert_eq!(engine.refund_for(7), 0);
        assert_eq!(engine.refund_for(8), 1);
        assert_eq!(engine.refund_for(250), 31);
    }

    #[test]
    fn upgrade_costs_grow_geometrically() {
        let mut engine = Engine::with_seed(1);
        let cell = free_cell(&engine);
        assert!(engine.place_tower(cell, TowerKind::Archer));
        assert_eq!(engine.upgrade_cost(cell), Some(75));

        assert_eq!(engine.try_upgrade_tower(cell), Ok(2));
        assert_eq!(engine.upgrade_cost(cell), Some(112));
        assert_eq!(engine.state().money, 650 - 50 - 75);

        let tower = engine.state().grid.tower(cell).expect("tower");
        assert_eq!(tower.total_invested, 125);
        assert_eq!(engine.sell_value(cell), Some(87));
    }

    #[test]
    fn upgrades_reject_missing_and_unaffordable_towers() {
        let mut engine = Engine::with_seed(1);
        let cell = free_cell(&engine);
        assert_eq!(engine.try_upgrade_tower(cell), Err(UpgradeError::MissingTower));

        assert!(engine.place_tower(cell, TowerKind::Archer));
        engine.state_mut().money = 10;
        assert_eq!(
            engine.try_upgrade_tower(cell),
            Err(UpgradeError::InsufficientFunds)
        );
        assert_eq!(engine.state().money, 10);
        assert_eq!(engine.state().grid.tower(cell).map(|tower| tower.level), Some(1));
    }

    #[test]
    fn placement_rejects_known_cells() {
        let mut engine = Engine::with_seed(4);
        let path_cell = engine.state().path[1];
        assert_eq!(
            engine.try_place_tower(path_cell, TowerKind::Archer),
            Err(PlacementError::OnPath)
        );

        let ui_row = CellCoord::new(0, engine.config().playable_rows);
        assert_eq!(
            engine.try_place_tower(ui_row, TowerKind::Archer),
            Err(PlacementError::OutsidePlayableRows)
        );

        let cell = free_cell(&engine);
        assert!(engine.place_tower(cell, TowerKind::Archer));
        assert_eq!(
            engine.try_place_tower(cell, TowerKind::Mage),
            Err(PlacementError::Occupied)
        );

        if let Some(&obstacle) = engine.state().obstacles.first() {
            assert_eq!(
                engine.try_place_tower(obstacle, TowerKind::Archer),
                Err(PlacementError::OnObstacle)
            );
        }
    }

    #[test]
    fn placement_rejects_unaffordable_towers() {
        let mut engine = Engine::with_seed(4);
        engine.state_mut().money = 249;
        let cell = free_cell(&engine);
        assert_eq!(
            engine.try_place_tower(cell, TowerKind::Sniper),
            Err(PlacementError::InsufficientFunds)
        );
        assert_eq!(engine.state().money, 249);
        assert!(engine.state().grid.tower(cell).is_none());
    }

    #[test]
    fn selling_an_empty_cell_is_a_no_op() {
        let mut engine = Engine::with_seed(4);
        let cell = free_cell(&engine);
        assert_eq!(engine.sell_tower(cell), None);
        assert_eq!(engine.state().money, 650);
    }
}
