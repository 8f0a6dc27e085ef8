use chaosgame_core::{Phase, PlaybackConfig, Session, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn full_board(n: usize, total_points: usize) -> Session {
    let config = PlaybackConfig::new(0, 180.0, total_points).unwrap();
    let mut session = Session::new(n, config);
    for i in 0..n {
        let angle = i as f64 / n as f64 * std::f64::consts::TAU;
        session.pointer_clicked(Vec2::new(angle.cos() * 0.9, angle.sin() * 0.9));
    }
    assert_eq!(session.phase(), Phase::AwaitingStart);
    session.pointer_clicked(Vec2::ZERO);
    assert_eq!(session.phase(), Phase::Ready);
    session
}

#[test]
fn full_game_for_various_n() {
    for n in 3..=8 {
        let mut session = full_board(n, 200);
        session.request_run();
        assert_eq!(session.phase(), Phase::Running);

        let mut rng = StdRng::seed_from_u64(42);
        let mut steps = 0;
        while session.phase() == Phase::Running {
            let report = session.step_random(&mut rng).expect("running session steps");
            assert!(report.anchor_index < n);
            steps += 1;
            assert!(steps <= 200, "generation must terminate at the budget");
        }
        assert_eq!(session.generated().len(), 200);
        assert_eq!(session.phase(), Phase::Finished);
        // The anchors are gone; the fractal stands alone.
        assert!(session.placed().is_empty());
    }
}

#[test]
fn generated_points_stay_in_anchor_hull_bounds() {
    // Every generated point is a convex combination of its predecessor and
    // an anchor, so the cloud can never escape the NDC square containing
    // the anchors and start point.
    let mut session = full_board(5, 500);
    session.request_run();
    let mut rng = StdRng::seed_from_u64(7);
    while session.step_random(&mut rng).is_some() {}
    for p in session.generated() {
        assert!(p.pos.x.abs() <= 1.0 + 1e-9);
        assert!(p.pos.y.abs() <= 1.0 + 1e-9);
    }
}

#[test]
fn undo_redo_restores_full_board() {
    let mut session = full_board(4, 10);
    let before = session.placed().to_vec();

    for _ in 0..5 {
        session.request_undo();
    }
    assert_eq!(session.phase(), Phase::Collecting);
    assert!(session.placed().is_empty());

    for _ in 0..5 {
        session.request_redo();
    }
    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(session.placed(), before.as_slice());
}

#[test]
fn placement_after_undo_invalidates_redo() {
    let config = PlaybackConfig::default();
    let mut session = Session::new(3, config);
    session.pointer_clicked(Vec2::new(-0.5, -0.5));
    session.pointer_clicked(Vec2::new(0.5, -0.5));
    session.request_undo();

    session.pointer_clicked(Vec2::new(0.4, -0.4));
    // Redo must now be a no-op.
    session.request_redo();
    assert_eq!(session.placed().len(), 2);
    assert_eq!(session.placed()[1].pos, Vec2::new(0.4, -0.4));
    assert!(!session.actions().redo);
}

#[test]
fn deterministic_replay_with_seeded_rng() {
    let run = |seed: u64| {
        let mut session = full_board(3, 100);
        session.request_run();
        let mut rng = StdRng::seed_from_u64(seed);
        while session.step_random(&mut rng).is_some() {}
        session.generated().to_vec()
    };
    assert_eq!(run(123), run(123));
    assert_ne!(run(123), run(456));
}
