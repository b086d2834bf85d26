//! Tower placement lattice.

use rogue_defence_core::CellCoord;
use serde::Serialize;

use crate::entities::Tower;

/// Dense row-major lattice where every cell owns at most one tower.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<Tower>>,
}

impl Grid {
    /// Creates an empty grid with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity = columns as usize * rows as usize;
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    /// Provides the dimensions of the grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Returns the tower occupying the cell, if any.
    #[must_use]
    pub fn tower(&self, cell: CellCoord) -> Option<&Tower> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Returns mutable access to the tower occupying the cell, if any.
    pub fn tower_mut(&mut self, cell: CellCoord) -> Option<&mut Tower> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Stores a tower in its cell.
    ///
    /// # Panics
    ///
    /// Panics when the cell lies outside the grid or is already occupied;
    /// callers validate placements before inserting.
    pub fn insert(&mut self, tower: Tower) {
        let index = self
            .index(tower.cell)
            .unwrap_or_else(|| panic!("tower cell {:?} outside grid", tower.cell));
        let slot = &mut self.cells[index];
        assert!(slot.is_none(), "cell {:?} already holds a tower", tower.cell);
        *slot = Some(tower);
    }

    /// Removes and returns the tower occupying the cell.
    pub fn remove(&mut self, cell: CellCoord) -> Option<Tower> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::take)
    }

    /// Removes every tower, yielding them in row-major order.
    pub fn drain(&mut self) -> Vec<Tower> {
        self.cells.iter_mut().filter_map(Option::take).collect()
    }

    /// Iterates over placed towers in row-major order.
    pub fn towers(&self) -> impl Iterator<Item = &Tower> {
        self.cells.iter().filter_map(Option::as_ref)
    }

    /// Iterates mutably over placed towers in row-major order.
    pub fn towers_mut(&mut self) -> impl Iterator<Item = &mut Tower> {
        self.cells.iter_mut().filter_map(Option::as_mut)
    }

    /// Number of placed towers.
    #[must_use]
    pub fn tower_count(&self) -> usize {
        self.towers().count()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::entities::Tower;
    use rogue_defence_core::{CellCoord, EngineConfig, TowerId, TowerKind};

    fn tower(id: u32, cell: CellCoord) -> Tower {
        let config = EngineConfig::default();
        Tower::new(
            TowerId::new(id),
            cell,
            TowerKind::Mage,
            config.towers.get(TowerKind::Mage),
        )
    }

    #[test]
    fn insert_and_remove_round_trip() {
        let mut grid = Grid::new(4, 3);
        let cell = CellCoord::new(2, 1);
        grid.insert(tower(7, cell));
        assert_eq!(grid.tower(cell).map(|t| t.id), Some(TowerId::new(7)));
        assert_eq!(grid.tower_count(), 1);
        assert!(grid.remove(cell).is_some());
        assert!(grid.tower(cell).is_none());
        assert!(grid.remove(cell).is_none());
    }

    #[test]
    fn out_of_bounds_lookup_is_empty() {
        let grid = Grid::new(4, 3);
        assert!(grid.tower(CellCoord::new(9, 9)).is_none());
        assert!(!grid.contains(CellCoord::new(4, 0)));
    }

    #[test]
    #[should_panic(expected = "already holds a tower")]
    fn double_insert_panics() {
        let mut grid = Grid::new(4, 3);
        let cell = CellCoord::new(0, 0);
        grid.insert(tower(1, cell));
        grid.insert(tower(2, cell));
    }

    #[test]
    fn towers_iterate_row_major() {
        let mut grid = Grid::new(4, 3);
        grid.insert(tower(1, CellCoord::new(3, 1)));
        grid.insert(tower(2, CellCoord::new(0, 2)));
        grid.insert(tower(3, CellCoord::new(1, 0)));
        let order: Vec<u32> = grid.towers().map(|t| t.id.get()).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(grid.drain().len(), 3);
        assert_eq!(grid.tower_count(), 0);
    }
}
