//! Tests for the simulation runner lifecycle

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gbmkit_core::{
    CanvasPoint, EventBus, EventBusConfig, EventCategory, EventFilter, Palette, Range, RunStatus,
    SamplePath, SimulationEvent, SimulationParameters, Stroke, WorldPoint,
};
use gbmkit_engine::{project, CanvasSize, SimulationRunner};

fn params(paths: usize, samples: usize, sigma: f64) -> SimulationParameters {
    SimulationParameters {
        number_of_paths: paths,
        number_of_samples: samples,
        initial_value: 1.0,
        mu: 0.1,
        sigma,
        horizon: 1.0,
    }
}

fn recording_bus() -> Arc<EventBus> {
    Arc::new(EventBus::with_config(EventBusConfig {
        enable_history: true,
        max_history_size: 100_000,
        ..Default::default()
    }))
}

#[tokio::test]
async fn test_run_completes_with_all_paths() {
    let runner = SimulationRunner::new(params(6, 25, 0.3)).with_seed(42);
    let outcome = runner.start(400.0, 300.0).await.unwrap();

    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.paths_drawn, 6);
    assert_eq!(runner.status(), RunStatus::Completed);

    let paths = runner.paths();
    assert_eq!(paths.len(), 6);
    for path in &paths {
        assert_eq!(path.world_points().len(), 25);
        assert_eq!(path.canvas_points().len(), 25);
        assert_eq!(path.world_points()[0].time, 0.0);
        assert_eq!(path.world_points()[0].value, 1.0);
    }
    assert_eq!(runner.range_x(), Range::new(0.0, 1.0));
}

#[tokio::test]
async fn test_strokes_cycle_through_palette() {
    let palette = Palette::from_names(&["Red", "Green"]).unwrap();
    let runner = SimulationRunner::with_palette(params(5, 10, 0.2), palette).with_seed(1);
    runner.start(100.0, 100.0).await.unwrap();

    let names: Vec<String> = runner.paths().iter().map(|p| p.stroke().name.clone()).collect();
    assert_eq!(names, vec!["Red", "Green", "Red", "Green", "Red"]);
}

#[tokio::test]
async fn test_same_seed_same_paths() {
    let first = SimulationRunner::new(params(4, 50, 0.4)).with_seed(7);
    let second = SimulationRunner::new(params(4, 50, 0.4)).with_seed(7);
    first.start(200.0, 100.0).await.unwrap();
    second.start(200.0, 100.0).await.unwrap();

    let a = first.paths();
    let b = second.paths();
    for (pa, pb) in a.iter().zip(b.iter()) {
        assert_eq!(pa.world_points(), pb.world_points());
    }
}

#[tokio::test]
async fn test_zero_volatility_draws_flat_line_without_widening() {
    let p = SimulationParameters {
        mu: 0.0,
        sigma: 0.0,
        ..params(3, 20, 0.0)
    };
    let runner = SimulationRunner::new(p);
    runner.start(200.0, 100.0).await.unwrap();

    assert_eq!(runner.range_y(), Range::new(0.0, 1.0));
    for path in runner.paths() {
        assert!(path.values().all(|v| v == 1.0));
        assert!(path.canvas_points().iter().all(|c| c.y == 0.0));
    }
}

#[tokio::test]
async fn test_completed_run_is_consistent_with_final_range() {
    let runner = SimulationRunner::new(params(30, 100, 0.8)).with_seed(2024);
    runner.start(640.0, 480.0).await.unwrap();

    let canvas = CanvasSize::new(640.0, 480.0).unwrap();
    let range_x = runner.range_x();
    let range_y = runner.range_y();
    assert!(range_y.max > 1.0, "volatile paths should widen the range");

    for path in runner.paths() {
        assert!(path.values().all(|v| range_y.contains(v)));
        for (world, drawn) in path.world_points().iter().zip(path.canvas_points()) {
            let expected = project(*world, canvas, &range_x, &range_y).unwrap();
            assert!((expected.x - drawn.x).abs() < 1e-9);
            assert!((expected.y - drawn.y).abs() < 1e-9);
            assert!(drawn.y >= 0.0 && drawn.y <= 480.0);
        }
    }
}

#[tokio::test]
async fn test_stop_after_second_path_truncates_output() {
    let runner = SimulationRunner::new(params(5, 50, 0.3)).with_seed(9);
    let handle = runner.stop_handle();
    runner.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Drawing]),
        move |event| {
            if event == (SimulationEvent::PathAppended { index: 1 }) {
                handle.stop();
            }
        },
    );

    let outcome = runner.start(100.0, 100.0).await.unwrap();
    assert_eq!(outcome.status, RunStatus::Cancelled);
    assert_eq!(outcome.paths_drawn, 2);
    assert_eq!(runner.status(), RunStatus::Cancelled);
    for path in runner.paths() {
        assert_eq!(path.canvas_points().len(), 50);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stop_from_another_task() {
    let runner = Arc::new(SimulationRunner::new(params(10_000, 2_000, 0.3)).with_seed(3));
    let mut events = runner.events().receiver();

    let task = {
        let runner = runner.clone();
        tokio::spawn(async move { runner.start(800.0, 600.0).await })
    };

    loop {
        if let Ok(SimulationEvent::PathAppended { index }) = events.recv().await {
            if index >= 2 {
                break;
            }
        }
    }
    runner.stop();

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.status, RunStatus::Cancelled);
    assert!(outcome.paths_drawn >= 3);
    assert!(outcome.paths_drawn < 10_000);
}

#[tokio::test]
async fn test_stop_is_harmless_when_idle() {
    let runner = SimulationRunner::new(params(3, 10, 0.2)).with_seed(5);
    runner.stop();
    runner.stop();
    assert_eq!(runner.status(), RunStatus::Idle);

    // a stale stop does not leak into the next run
    let outcome = runner.start(100.0, 100.0).await.unwrap();
    assert_eq!(outcome.status, RunStatus::Completed);

    runner.stop();
    assert_eq!(runner.status(), RunStatus::Completed);
}

#[tokio::test]
async fn test_invalid_parameters_never_start() {
    let bus = recording_bus();
    let runner = SimulationRunner::new(params(3, 1, 0.2)).with_event_bus(bus.clone());
    let err = runner.start(100.0, 100.0).await.unwrap_err();

    assert!(err.is_parameter_error());
    assert_eq!(runner.status(), RunStatus::Idle);
    assert!(bus.history().is_empty());
}

#[tokio::test]
async fn test_invalid_canvas_rejected() {
    let runner = SimulationRunner::new(params(3, 10, 0.2));
    let err = runner.start(0.0, 100.0).await.unwrap_err();
    assert!(err.is_parameter_error());
}

#[tokio::test]
async fn test_zero_paths_completes_empty() {
    let runner = SimulationRunner::new(params(0, 10, 0.2));
    let outcome = runner.start(100.0, 100.0).await.unwrap();
    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.paths_drawn, 0);
}

#[tokio::test]
async fn test_restart_resets_output() {
    let runner = SimulationRunner::new(params(4, 10, 0.5)).with_seed(11);
    runner.start(100.0, 100.0).await.unwrap();
    runner.start(100.0, 100.0).await.unwrap();
    assert_eq!(runner.path_count(), 4);
}

#[tokio::test]
async fn test_event_sequence() {
    let bus = recording_bus();
    let runner = SimulationRunner::new(params(4, 30, 0.6))
        .with_seed(17)
        .with_event_bus(bus.clone());
    runner.start(100.0, 100.0).await.unwrap();

    let history = bus.history();
    assert_eq!(history.first(), Some(&SimulationEvent::RunStarted { planned: 4 }));
    assert_eq!(
        history.last(),
        Some(&SimulationEvent::RunFinished {
            status: RunStatus::Completed,
            paths: 4
        })
    );

    let appended: Vec<usize> = history
        .iter()
        .filter_map(|e| match e {
            SimulationEvent::PathAppended { index } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(appended, vec![0, 1, 2, 3]);

    // every rescale touches a path that was already appended
    for (pos, event) in history.iter().enumerate() {
        if let SimulationEvent::PathRescaled { index } = event {
            let appended_before = history[..pos]
                .iter()
                .any(|e| *e == SimulationEvent::PathAppended { index: *index });
            assert!(appended_before);
        }
    }
}

#[tokio::test]
async fn test_overflow_fails_run() {
    let p = SimulationParameters {
        number_of_paths: 3,
        number_of_samples: 3,
        initial_value: 1.0,
        mu: 1.0e6,
        sigma: 1.0,
        horizon: 10.0,
    };
    let runner = SimulationRunner::new(p).with_seed(1);
    let err = runner.start(100.0, 100.0).await.unwrap_err();

    assert!(err.is_computation_error());
    assert!(!err.is_cancelled());
    assert_eq!(runner.status(), RunStatus::Failed);
    assert_eq!(runner.path_count(), 0);
}

/// Long volatile run whose value axis widens several times after path 0.
fn widening_params() -> SimulationParameters {
    SimulationParameters {
        number_of_paths: 400,
        number_of_samples: 20_000,
        initial_value: 1.0,
        mu: 0.05,
        sigma: 0.9,
        horizon: 1.0,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_drawing_continues_while_rescale_runs() {
    let bus = recording_bus();
    let runner = SimulationRunner::new(widening_params())
        .with_seed(5)
        .with_event_bus(bus.clone());
    let outcome = runner.start(800.0, 600.0).await.unwrap();
    assert_eq!(outcome.status, RunStatus::Completed);

    let history = bus.history();
    let widenings = history
        .iter()
        .filter(|e| matches!(e, SimulationEvent::RangeWidened { .. }))
        .count();
    assert!(widenings >= 2);

    // some path j was appended before an earlier path r < j got rescaled
    let mut highest_appended = None;
    let mut overtaken = false;
    for event in &history {
        match event {
            SimulationEvent::PathAppended { index } => highest_appended = Some(*index),
            SimulationEvent::PathRescaled { index } => {
                if highest_appended.is_some_and(|j| *index < j) {
                    overtaken = true;
                }
            }
            _ => {}
        }
    }
    assert!(overtaken, "rescale passes never overlapped with drawing");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failed_rescale_does_not_abort_run() {
    let bus = recording_bus();
    let runner = SimulationRunner::new(widening_params())
        .with_seed(5)
        .with_event_bus(bus.clone());

    // On the first widening after path 0 exists, swap path 0 for one that
    // cannot be projected, so the pass fails at index 0.
    let paths = runner.shared_paths();
    let poisoned = Arc::new(AtomicBool::new(false));
    let flag = poisoned.clone();
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::Drawing]),
        move |event| {
            if !matches!(event, SimulationEvent::RangeWidened { .. }) {
                return;
            }
            let mut paths = paths.write();
            if !paths.is_empty() && !flag.swap(true, Ordering::SeqCst) {
                paths[0] = SamplePath::new(
                    vec![WorldPoint::new(0.0, f64::MAX), WorldPoint::new(1.0, f64::MAX)],
                    vec![CanvasPoint::new(0.0, 0.0), CanvasPoint::new(0.0, 0.0)],
                    Stroke::new("Black", [0, 0, 0]),
                );
            }
        },
    );

    let outcome = runner.start(800.0, 600.0).await.unwrap();
    assert!(poisoned.load(Ordering::SeqCst));
    assert_eq!(outcome.status, RunStatus::Completed);
    assert_eq!(outcome.paths_drawn, 400);
    assert_eq!(runner.status(), RunStatus::Completed);

    let history = bus.history();
    assert!(history
        .iter()
        .any(|e| matches!(e, SimulationEvent::RescaleFailed { index: 0, .. })));
    assert_eq!(
        history.last(),
        Some(&SimulationEvent::RunFinished {
            status: RunStatus::Completed,
            paths: 400
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_second_start_rejected_while_running() {
    let runner = Arc::new(SimulationRunner::new(params(100_000, 2_000, 0.3)).with_seed(3));
    let mut events = runner.events().receiver();

    let first = {
        let runner = runner.clone();
        tokio::spawn(async move { runner.start(800.0, 600.0).await })
    };
    loop {
        if let Ok(SimulationEvent::PathAppended { .. }) = events.recv().await {
            break;
        }
    }

    let err = runner.start(800.0, 600.0).await.unwrap_err();
    assert!(err.is_already_running());
    assert!(!err.is_parameter_error());
    assert_eq!(runner.status(), RunStatus::Running);

    // the rejected call left the active run alone
    runner.stop();
    let outcome = first.await.unwrap().unwrap();
    assert_eq!(outcome.status, RunStatus::Cancelled);
    assert!(outcome.paths_drawn >= 1);
}
