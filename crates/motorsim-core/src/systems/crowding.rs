//! Crowding system - obstacles reverse the shared direction

use crate::components::{Direction, ObstacleField};

/// Check `position` against `field` and flip `direction` on a hit.
///
/// Returns whether a collision occurred.
pub fn crowding_system(field: &ObstacleField, position: i64, direction: &mut Direction) -> bool {
    let collision = field.check_collision(position);
    if collision {
        *direction = direction.flipped();
    }
    collision
}
