use std::collections::HashSet;

use log::warn;
use rand::Rng;

use crate::config::{GridGeometry, MAX_PLACEMENT_ATTEMPTS};

/// Board position in board units; both axes are multiples of the cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when both coordinates lie in `[0, max_coordinate]`.
    #[must_use]
    pub fn is_within_bounds(self, geometry: GridGeometry) -> bool {
        let max = geometry.max_coordinate();
        (0..=max).contains(&self.x) && (0..=max).contains(&self.y)
    }

    /// Returns the zero-based (column, row) cell index of this position.
    #[must_use]
    pub fn cell(self, geometry: GridGeometry) -> (i32, i32) {
        (self.x / geometry.cell_size, self.y / geometry.cell_size)
    }
}

/// Samples one coordinate uniformly from `{0, cell, 2*cell, .., board - cell}`.
#[must_use]
pub fn random_cell_coordinate<R: Rng + ?Sized>(rng: &mut R, geometry: GridGeometry) -> i32 {
    rng.gen_range(0..geometry.cells_per_side()) * geometry.cell_size
}

/// Samples a position absent from `exclude`.
///
/// Sampling gives up after [`MAX_PLACEMENT_ATTEMPTS`] and returns the last
/// candidate even if it is occupied, so a saturated board still terminates.
#[must_use]
pub fn random_unique_position<R: Rng + ?Sized>(
    rng: &mut R,
    geometry: GridGeometry,
    exclude: &HashSet<Position>,
) -> Position {
    let mut candidate = random_position(rng, geometry);
    for _ in 1..MAX_PLACEMENT_ATTEMPTS {
        if !exclude.contains(&candidate) {
            return candidate;
        }
        candidate = random_position(rng, geometry);
    }

    if exclude.contains(&candidate) {
        warn!(
            "no free cell found after {MAX_PLACEMENT_ATTEMPTS} attempts, placing at ({}, {})",
            candidate.x, candidate.y
        );
    }
    candidate
}

fn random_position<R: Rng + ?Sized>(rng: &mut R, geometry: GridGeometry) -> Position {
    let x = random_cell_coordinate(rng, geometry);
    let y = random_cell_coordinate(rng, geometry);
    Position { x, y }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{random_cell_coordinate, random_unique_position, Position};
    use crate::config::GridGeometry;

    #[test]
    fn cell_coordinates_are_aligned_and_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let geometry = GridGeometry::default();

        for _ in 0..500 {
            let value = random_cell_coordinate(&mut rng, geometry);
            assert_eq!(value % geometry.cell_size, 0);
            assert!((0..=geometry.max_coordinate()).contains(&value));
        }
    }

    #[test]
    fn unique_position_avoids_excluded_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let geometry = GridGeometry {
            board_size: 60,
            cell_size: 20,
        };

        // Everything but (40, 40) is taken on a 3x3 board.
        let mut exclude = HashSet::new();
        for x in [0, 20, 40] {
            for y in [0, 20, 40] {
                exclude.insert(Position::new(x, y));
            }
        }
        exclude.remove(&Position::new(40, 40));

        let position = random_unique_position(&mut rng, geometry, &exclude);
        assert_eq!(position, Position::new(40, 40));
    }

    #[test]
    fn unique_position_terminates_on_a_full_board() {
        let mut rng = StdRng::seed_from_u64(5);
        let geometry = GridGeometry {
            board_size: 40,
            cell_size: 20,
        };
        let exclude: HashSet<Position> = [(0, 0), (20, 0), (0, 20), (20, 20)]
            .into_iter()
            .map(|(x, y)| Position::new(x, y))
            .collect();

        let position = random_unique_position(&mut rng, geometry, &exclude);
        assert!(position.is_within_bounds(geometry));
    }

    #[test]
    fn bounds_check_rejects_negative_and_overflowing_coordinates() {
        let geometry = GridGeometry::default();

        assert!(Position::new(0, 780).is_within_bounds(geometry));
        assert!(!Position::new(820, 0).is_within_bounds(geometry));
        assert!(!Position::new(0, -20).is_within_bounds(geometry));
    }
}
