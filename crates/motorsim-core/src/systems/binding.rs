//! Binding system - re-rolls every motor's attachment once per step

use rand::Rng;

use crate::components::Motor;

/// Roll binding for each motor in order, using its own probability.
///
/// Motors are rolled in slice order so a seeded run draws samples in a
/// fixed sequence.
pub fn binding_system(motors: &mut [Motor], probabilities: &[f64], rng: &mut impl Rng) {
    debug_assert_eq!(motors.len(), probabilities.len());
    for (motor, probability) in motors.iter_mut().zip(probabilities) {
        motor.bind_to_track(*probability, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;

    fn motors() -> Vec<Motor> {
        vec![
            Motor::new("A", 1.0, 8.0, 1.0, 1.0),
            Motor::new("B", 1.0, 8.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn test_per_motor_probabilities() {
        let mut rng = SimRng::from_seed_u64(1);
        let mut motors = motors();
        for _ in 0..20 {
            binding_system(&mut motors, &[0.0, 1.0], &mut rng);
            assert!(!motors[0].is_bound());
            assert!(motors[1].is_bound());
        }
    }

    #[test]
    fn test_rolls_are_seed_ordered() {
        let run = || {
            let mut rng = SimRng::from_seed_u64(77);
            let mut motors = motors();
            (0..30)
                .map(|_| {
                    binding_system(&mut motors, &[0.5, 0.5], &mut rng);
                    (motors[0].is_bound(), motors[1].is_bound())
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
