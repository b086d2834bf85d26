//! Distance and interpolation helpers used by movement and targeting.

use serde::{Deserialize, Serialize};

/// Continuous position measured in grid cells.
///
/// Enemies, projectiles and cosmetic effects move with sub-cell precision;
/// towers and obstacles convert their [`CellCoord`] into a point when
/// distances are measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in cells.
    pub x: f32,
    /// Vertical position in cells.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation toward `other`, where `t = 0` yields `self`.
    #[must_use]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Returns the point advanced by `step` cells toward `target`.
    ///
    /// The caller guarantees that `target` is farther than `step`; a zero
    /// remaining distance leaves the point unchanged.
    #[must_use]
    pub fn step_toward(self, target: Point, step: f32) -> Point {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let remaining = dx.hypot(dy);
        if remaining <= f32::EPSILON {
            return self;
        }
        Point::new(self.x + dx / remaining * step, self.y + dy / remaining * step)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Continuous position of the cell.
    #[must_use]
    pub fn to_point(self) -> Point {
        Point::new(self.column as f32, self.row as f32)
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Reports whether the cell lies inside the axis-aligned box spanned by
    /// `a` and `b`, boundaries included.
    #[must_use]
    pub fn within_span(self, a: CellCoord, b: CellCoord) -> bool {
        let (min_column, max_column) = (a.column.min(b.column), a.column.max(b.column));
        let (min_row, max_row) = (a.row.min(b.row), a.row.max(b.row));
        (min_column..=max_column).contains(&self.column) && (min_row..=max_row).contains(&self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Point};

    #[test]
    fn distance_is_euclidean() {
        let origin = Point::new(0.0, 0.0);
        let target = Point::new(3.0, 4.0);
        assert!((origin.distance(target) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn lerp_interpolates_between_endpoints() {
        let start = Point::new(2.0, 1.0);
        let end = Point::new(4.0, 1.0);
        assert_eq!(start.lerp(end, 0.5), Point::new(3.0, 1.0));
        assert_eq!(start.lerp(end, 0.0), start);
    }

    #[test]
    fn step_toward_moves_along_direction() {
        let start = Point::new(0.0, 0.0);
        let stepped = start.step_toward(Point::new(0.0, 2.0), 0.25);
        assert!((stepped.y - 0.25).abs() < 1e-6);
        assert!(stepped.x.abs() < 1e-6);
    }

    #[test]
    fn span_containment_includes_endpoints() {
        let a = CellCoord::new(3, 2);
        let b = CellCoord::new(3, 5);
        assert!(CellCoord::new(3, 2).within_span(a, b));
        assert!(CellCoord::new(3, 5).within_span(b, a));
        assert!(!CellCoord::new(4, 3).within_span(a, b));
    }

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
    }
}
