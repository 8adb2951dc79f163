//! Tug-of-war system - two opposing motors decide one shared direction

use crate::components::{Direction, Motor, Track};

/// Resolve the shared direction from this step's binding.
///
/// The first motor wins whenever it is bound. If neither is bound the
/// previous direction carries over unchanged.
pub fn resolve_direction(first_bound: bool, second_bound: bool, previous: Direction) -> Direction {
    if first_bound {
        Direction::Plus
    } else if second_bound {
        Direction::Minus
    } else {
        previous
    }
}

/// Apply both motors at `position`: the first along `direction`, the second
/// against it.
pub fn apply_opposed_pair(
    track: &mut Track,
    first: &Motor,
    second: &Motor,
    position: i64,
    direction: Direction,
) {
    track.update_position(first, position, direction);
    track.update_position(second, position, -direction);
}
