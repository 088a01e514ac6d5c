use falsi::root_finding::bracket::BracketStep;
use falsi::root_finding::config::FalsiCfg;
use falsi::root_finding::regula_falsi::{bracket_history, modified_regula_falsi, FalsiError};
use falsi::root_finding::stagnation::{RegulaFalsiVariant, Side};

type FalsiResult = Result<(), FalsiError>;

fn cubic(x: f64) -> f64 { x * x * x - x - 2.0 }

fn cubic_cfg() -> FalsiCfg {
    FalsiCfg::new().with_tolerance(1e-6).with_resolution(50)
}


#[test]
fn steps_match_report() -> FalsiResult {
    let mut history = bracket_history(cubic, 1.0, 2.0, cubic_cfg())?;
    let steps: Vec<BracketStep> = history.by_ref().collect();

    assert!(history.is_finished());
    assert_eq!(history.next(), None);
    assert_eq!(history.evals(), steps.len() + 2);

    let report = history.finish()?;
    assert_eq!(report.iterations, steps.len());

    let last = steps.last().expect("at least one step");
    assert_eq!(last.estimate, report.root);
    assert_eq!(last.residual, report.f_root);
    assert_eq!(last.bracket, report.bracket);
    assert_eq!(last.scaled, None);

    let scaled = steps.iter().filter(|s| s.scaled.is_some()).count();
    assert_eq!(scaled, report.modifications);

    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step.iteration, i + 1);
    }
    Ok(())
}

#[test]
fn bracket_invariant_holds_every_step() -> FalsiResult {
    let cases: [(fn(f64) -> f64, f64, f64); 4] = [
        (cubic,                     1.0, 2.0),
        (|x| x.powi(10) - 1.0,      0.0, 1.3),
        (|x| (-x).exp() - x,        0.0, 1.0),
        (|x| 4.0 * x.cos() - x.exp(), -1.5, 6.0),
    ];

    for (f, a, b) in cases {
        for variant in [
            RegulaFalsiVariant::Pure,
            RegulaFalsiVariant::Illinois,
            RegulaFalsiVariant::Pegasus,
            RegulaFalsiVariant::AndersonBjorck,
        ] {
            let cfg = FalsiCfg::new()
                .with_tolerance(1e-10)
                .with_resolution(60)
                .with_variant(variant);

            let mut prev_width = b - a;
            for step in bracket_history(f, a, b, cfg)? {
                let (left, right) = step.bracket.pair();

                assert!(left < right, "variant={variant}");
                assert!(f(left) * f(right) <= 0.0, "variant={variant} step={}", step.iteration);
                assert!(step.bracket.contains(step.estimate), "variant={variant}");
                assert!(step.bracket.width() <= prev_width, "variant={variant}");
                prev_width = step.bracket.width();
            }
        }
    }
    Ok(())
}

#[test]
fn stale_right_end_is_scaled_on_second_left_move() -> FalsiResult {
    // first two estimates land left of the root of x^3 - x - 2
    let steps: Vec<BracketStep> = bracket_history(cubic, 1.0, 2.0, cubic_cfg())?.collect();

    assert_eq!(steps[0].scaled, None);
    assert_eq!(steps[0].bracket.right, 2.0);
    assert_eq!(steps[1].scaled, Some(Side::Right));
    assert_eq!(steps[1].bracket.right, 2.0);
    // scaling pulls the next estimate past the root, so the right end moves
    assert!(steps[2].bracket.right < 2.0);
    Ok(())
}

#[test]
fn pure_variant_never_scales() -> FalsiResult {
    let cfg = cubic_cfg().with_variant(RegulaFalsiVariant::Pure);

    let history = bracket_history(cubic, 1.0, 2.0, cfg)?;
    for step in history {
        assert_eq!(step.scaled, None);
        // plain false position never moves the convex side's right end
        assert_eq!(step.bracket.right, 2.0);
    }
    Ok(())
}

#[test]
fn early_finish_matches_full_run() -> FalsiResult {
    let mut history = bracket_history(cubic, 1.0, 2.0, cubic_cfg())?;
    let first = history.next().expect("first step");
    assert_eq!(first.iteration, 1);
    assert_eq!(history.iterations(), 1);
    assert!(!history.is_finished());
    assert!(history.outcome().is_none());

    let resumed = history.finish()?;
    let direct  = modified_regula_falsi(cubic, 1.0, 2.0, cubic_cfg())?;

    assert_eq!(resumed, direct);
    Ok(())
}

#[test]
fn exhausted_history_reports_non_convergence() -> FalsiResult {
    let cfg = FalsiCfg::new().with_tolerance(1e-12).with_resolution(3);
    let mut history = bracket_history(cubic, 1.0, 2.0, cfg)?;

    assert_eq!(history.size_hint(), (0, Some(3)));
    let steps: Vec<BracketStep> = history.by_ref().collect();
    assert_eq!(steps.len(), 3);
    assert_eq!(history.size_hint(), (0, Some(0)));

    assert!(matches!(
        history.outcome(),
        Some(Err(FalsiError::NonConvergence { iterations: 3, .. }))
    ));

    let last = steps[2];
    match history.finish() {
        Err(FalsiError::NonConvergence { x, fx, .. }) => {
            assert_eq!(x, last.estimate);
            assert_eq!(fx, last.residual);
        },
        other => panic!("expected NonConvergence, got {other:?}"),
    }
    Ok(())
}

#[test]
fn endpoint_root_yields_no_steps() -> FalsiResult {
    let mut history = bracket_history(|x: f64| x - 2.0, 0.0, 2.0, FalsiCfg::new())?;

    assert!(history.is_finished());
    assert_eq!(history.next(), None);

    let report = history.finish()?;
    assert_eq!(report.root, 2.0);
    assert_eq!(report.iterations, 0);
    Ok(())
}

#[test]
fn bad_bracket_fails_before_iterating() {
    let mut calls = 0;
    let f = |x: f64| { calls += 1; x * x + 1.0 };

    let rejected = matches!(
        bracket_history(f, -1.0, 1.0, FalsiCfg::new()),
        Err(FalsiError::NoSignChange { .. })
    );

    assert!(rejected);
    assert_eq!(calls, 2);
}

#[test]
fn pairs_for_plotting() -> FalsiResult {
    let pairs: Vec<(f64, f64)> = bracket_history(cubic, 1.0, 2.0, cubic_cfg())?
        .map(|step| step.bracket.pair())
        .collect();

    assert!(!pairs.is_empty());
    assert_eq!(pairs[0], (4.0 / 3.0, 2.0));
    Ok(())
}

#[test]
fn stale_end_is_scaled_every_step_until_it_moves() -> FalsiResult {
    // steep on the right: the left end creeps up while f(1) keeps halving
    let f = |x: f64| (10.0 * x).exp() - 2.0;
    let cfg = FalsiCfg::new().with_tolerance(1e-12).with_resolution(100);

    let steps: Vec<BracketStep> = bracket_history(f, -1.0, 1.0, cfg)?.collect();

    assert_eq!(steps[0].scaled, None);
    for step in &steps[1..14] {
        assert_eq!(step.scaled, Some(Side::Right), "step={}", step.iteration);
        assert_eq!(step.bracket.right, 1.0, "step={}", step.iteration);
    }

    // the right end finally moves
    assert_eq!(steps[14].scaled, None);
    assert!(steps[14].bracket.right < 1.0);

    // counts restart: one left move is not enough, the second one scales again
    assert!(steps[15].bracket.left > steps[14].bracket.left);
    assert_eq!(steps[15].scaled, None);
    assert_eq!(steps[16].scaled, Some(Side::Right));
    Ok(())
}

#[test]
fn threshold_two_scales_on_third_non_move() -> FalsiResult {
    let f = |x: f64| x.powi(10) - 1.0;
    let cfg = FalsiCfg::new()
        .with_tolerance(1e-12)
        .with_resolution(100)
        .with_stagnation_threshold(2);

    let steps: Vec<BracketStep> = bracket_history(f, 0.0, 1.3, cfg)?.collect();

    for step in &steps[..3] {
        assert_eq!(step.bracket.right, 1.3, "step={}", step.iteration);
    }
    assert_eq!(steps[0].scaled, None);
    assert_eq!(steps[1].scaled, None);
    assert_eq!(steps[2].scaled, Some(Side::Right));
    assert_eq!(steps[3].scaled, Some(Side::Right));
    Ok(())
}
