//! Property tests for projection and axis widening

use gbmkit_core::{Range, SimulationParameters, WorldPoint};
use gbmkit_engine::{project, unproject, widen, CancelScope, CanvasSize, PathGenerator};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn range_strategy() -> impl Strategy<Value = Range> {
    (-1.0e3..1.0e3f64, 1.0e-3..1.0e3f64).prop_map(|(min, extent)| Range::new(min, min + extent))
}

proptest! {
    #[test]
    fn prop_project_unproject(
        rx in range_strategy(),
        ry in range_strategy(),
        tx in 0.0..1.0f64,
        ty in 0.0..1.0f64,
        width in 1.0..4096.0f64,
        height in 1.0..4096.0f64,
    ) {
        let canvas = CanvasSize::new(width, height).unwrap();
        let world = WorldPoint::new(rx.min + tx * rx.extent(), ry.min + ty * ry.extent());

        let point = project(world, canvas, &rx, &ry).unwrap();
        prop_assert!(point.x >= -1e-6 && point.x <= width + 1e-6);
        prop_assert!(point.y >= -1e-6 && point.y <= height + 1e-6);

        let back = unproject(point, canvas, &rx, &ry).unwrap();
        prop_assert!((back.time - world.time).abs() <= 1e-6 * rx.extent().max(1.0));
        prop_assert!((back.value - world.value).abs() <= 1e-6 * ry.extent().max(1.0));
    }

    #[test]
    fn prop_higher_value_is_higher_on_canvas(
        ry in range_strategy(),
        a in 0.0..1.0f64,
        b in 0.0..1.0f64,
    ) {
        prop_assume!((a - b).abs() > 1e-6);
        let canvas = CanvasSize::new(100.0, 100.0).unwrap();
        let rx = Range::new(0.0, 1.0);
        let low = WorldPoint::new(0.5, ry.min + a.min(b) * ry.extent());
        let high = WorldPoint::new(0.5, ry.min + a.max(b) * ry.extent());

        let low_y = project(low, canvas, &rx, &ry).unwrap().y;
        let high_y = project(high, canvas, &rx, &ry).unwrap().y;
        prop_assert!(high_y < low_y);
    }

    #[test]
    fn prop_widened_range_covers_positive_values(
        max in 0.1..100.0f64,
        values in prop::collection::vec(1.0e-3..1.0e3f64, 1..64),
    ) {
        let range = Range::new(0.0, max);
        let inside = values.iter().all(|v| range.contains(*v));

        match widen(&range, values.iter().copied()) {
            None => prop_assert!(inside),
            Some(widened) => {
                prop_assert!(!inside);
                prop_assert!(widened.min <= range.min);
                prop_assert!(widened.max >= range.max);
                prop_assert!(values.iter().all(|v| widened.contains(*v)));
            }
        }
    }

    #[test]
    fn prop_generated_path_shape(
        samples in 2usize..200,
        horizon in 0.01..100.0f64,
        sigma in 0.0..1.0f64,
        seed in any::<u64>(),
    ) {
        let params = SimulationParameters {
            number_of_paths: 1,
            number_of_samples: samples,
            initial_value: 1.0,
            mu: 0.05,
            sigma,
            horizon,
        };
        let generator = PathGenerator::new(&params).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let path = generator.generate(&mut rng, &CancelScope::new()).unwrap();

        prop_assert_eq!(path.len(), samples);
        prop_assert_eq!(path[0], WorldPoint::new(0.0, 1.0));
        let last = path[samples - 1].time;
        prop_assert!((last - horizon).abs() <= 1e-9 * horizon.max(1.0));
        prop_assert!(path.windows(2).all(|w| w[1].time > w[0].time));
    }
}
