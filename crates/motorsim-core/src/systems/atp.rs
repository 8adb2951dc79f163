//! ATP system - charges motors once per step and draws down the pool

use crate::components::{EnergyPool, Motor};

/// Charge every motor exactly once and return the per-motor cost.
///
/// The returned values are the only record of this step's spend; callers
/// reuse them instead of asking the motors again.
pub fn charge_motors(motors: &mut [Motor]) -> Vec<f64> {
    motors.iter_mut().map(Motor::consume_atp).collect()
}

/// Deduct a step's total cost from the pool, if the run has one.
pub fn deduct_step_cost(pool: Option<&mut EnergyPool>, costs: &[f64]) {
    if let Some(pool) = pool {
        pool.consume_atp(costs.iter().sum());
    }
}

/// Whether the run may take another step under its energy budget.
pub fn has_energy(pool: Option<&EnergyPool>) -> bool {
    pool.map_or(true, |p| !p.is_depleted())
}
