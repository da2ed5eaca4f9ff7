//! Battle map geometry.
//!
//! The battle grid is a fixed-size rectangle of uniform-cost tiles. All
//! geometry here is pure computation; callers reject out-of-bounds
//! coordinates before any state is touched.

use crate::state::Position;

/// Fixed-size tileable battle grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleGrid {
    pub width: u32,
    pub height: u32,
}

impl BattleGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a coordinate lies inside the grid.
    pub fn contains(&self, position: Position) -> bool {
        position.longitude >= 0
            && position.latitude >= 0
            && (position.longitude as u32) < self.width
            && (position.latitude as u32) < self.height
    }

    /// Chessboard distance between two tiles.
    ///
    /// Diagonal steps cost the same as orthogonal ones, so this is the number
    /// of moves a combatant needs to reach `to` and the metric every range
    /// check uses.
    pub fn distance(&self, from: Position, to: Position) -> u32 {
        let dx = (from.longitude - to.longitude).unsigned_abs();
        let dy = (from.latitude - to.latitude).unsigned_abs();
        dx.max(dy)
    }

    /// Movement cost between two tiles. Every tile costs the same, so this is
    /// just the distance.
    pub fn movement_cost(&self, from: Position, to: Position) -> u32 {
        self.distance(from, to)
    }

    /// Whether `target` is reachable from `origin` with the given range.
    pub fn in_range(&self, origin: Position, target: Position, range: u32) -> bool {
        self.contains(target) && self.distance(origin, target) <= range
    }

    /// Iterates every tile of the grid in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |lat| (0..width).map(move |long| Position::new(long, lat)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_rejects_out_of_bounds() {
        let grid = BattleGrid::new(13, 5);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(12, 4)));
        assert!(!grid.contains(Position::new(13, 4)));
        assert!(!grid.contains(Position::new(12, 5)));
        assert!(!grid.contains(Position::new(-1, 0)));
    }

    #[test]
    fn distance_is_chebyshev() {
        let grid = BattleGrid::new(13, 5);
        assert_eq!(grid.distance(Position::new(4, 2), Position::new(8, 2)), 4);
        assert_eq!(grid.distance(Position::new(0, 0), Position::new(3, 2)), 3);
        assert_eq!(grid.distance(Position::new(5, 1), Position::new(5, 1)), 0);
    }

    #[test]
    fn in_range_requires_bounds_and_distance() {
        let grid = BattleGrid::new(13, 5);
        assert!(grid.in_range(Position::new(4, 2), Position::new(5, 3), 1));
        assert!(!grid.in_range(Position::new(4, 2), Position::new(7, 2), 2));
        assert!(!grid.in_range(Position::new(12, 4), Position::new(13, 4), 5));
    }

    #[test]
    fn tiles_covers_whole_grid() {
        let grid = BattleGrid::new(13, 5);
        assert_eq!(grid.tiles().count(), 65);
        assert!(grid.tiles().all(|tile| grid.contains(tile)));
    }
}
