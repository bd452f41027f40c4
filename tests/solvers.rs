mod common;

use std::sync::Arc;

use common::{random_instance, two_set_instance, EnumeratingSolver, FixedSolver, SpreadRelaxation};
use letscover::domain::SolutionStatus;
use letscover::{
    parse_instance, ApproximateSolver, ExactSolver, ProblemInstance, RoundingConfig,
    SetCoverError, SolverError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn both_sets_are_needed() {
    let instance = two_set_instance();

    let exact = ExactSolver::new(Arc::new(EnumeratingSolver))
        .solve(&instance)
        .unwrap();
    assert_eq!(exact.total_weight, 6.0);
    assert!(exact.is_proven_optimal());
    assert_eq!(exact.selected, vec![0, 1]);

    // whatever the draws, repair has to add both sets
    let approx = ApproximateSolver::new(Arc::new(FixedSolver::new(
        SolutionStatus::Optimal,
        vec![0.5, 0.5],
    )));
    for seed in 0..25 {
        let outcome = approx
            .solve(&instance, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_eq!(outcome.total_weight, 6.0);
        assert_eq!(outcome.selected, vec![0, 1]);
        assert_eq!(outcome.trials, 2);
    }
}

#[test]
fn single_element_single_set() {
    let instance = ProblemInstance::from_one_based(1, 1, vec![7.0], vec![vec![1]]).unwrap();

    let exact = ExactSolver::new(Arc::new(EnumeratingSolver))
        .solve(&instance)
        .unwrap();
    assert_eq!(exact.total_weight, 7.0);

    let approx = ApproximateSolver::new(Arc::new(EnumeratingSolver))
        .solve(&instance, &mut StdRng::seed_from_u64(1))
        .unwrap();
    assert_eq!(approx.total_weight, 7.0);
    assert_eq!(approx.trials, 1);
}

#[test]
fn missing_weight_token_is_malformed() {
    let err: SetCoverError = parse_instance("1 2\n7\n1\n1\n").unwrap_err().into();
    assert!(matches!(err, SetCoverError::MalformedInstance(_)));
}

#[test]
fn exact_re_solve_is_stable() {
    let instance = ProblemInstance::new(
        4,
        4,
        vec![2.0, 3.0, 1.0, 4.0],
        vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![0, 3]],
    )
    .unwrap();
    let solver = ExactSolver::new(Arc::new(EnumeratingSolver));

    let first = solver.solve(&instance).unwrap();
    let second = solver.solve(&instance).unwrap();
    assert_eq!(first.total_weight, 3.0);
    assert_eq!(first.total_weight, second.total_weight);
}

#[test]
fn infeasible_backend_answer_is_unsolvable() {
    let instance = two_set_instance();
    let backend = Arc::new(FixedSolver::new(SolutionStatus::Infeasible, vec![]));

    let err = ExactSolver::new(backend.clone()).solve(&instance).unwrap_err();
    assert!(matches!(err, SetCoverError::Unsolvable(_)));

    let err = ApproximateSolver::new(backend.clone())
        .solve(&instance, &mut StdRng::seed_from_u64(0))
        .unwrap_err();
    assert!(matches!(err, SetCoverError::Unsolvable(_)));
    assert_eq!(backend.calls(), 2);
}

#[test]
fn time_limited_incumbent_is_flagged_unproven() {
    let instance = two_set_instance();
    let backend = Arc::new(FixedSolver::new(SolutionStatus::Feasible, vec![1.0, 1.0]));

    let outcome = ExactSolver::new(backend.clone())
        .with_time_limit(2.5)
        .solve(&instance)
        .unwrap();
    assert!(!outcome.is_proven_optimal());
    assert_eq!(outcome.total_weight, 6.0);
    assert_eq!(*backend.last_time_limit.lock().unwrap(), Some(2.5));
}

#[test]
fn time_limit_without_incumbent_is_a_timeout() {
    let instance = two_set_instance();
    let backend = Arc::new(FixedSolver::new(SolutionStatus::TimeLimit, vec![]));

    let err = ExactSolver::new(backend)
        .with_time_limit(0.5)
        .solve(&instance)
        .unwrap_err();
    assert!(matches!(err, SetCoverError::BackendTimeout { limit_secs } if limit_secs == 0.5));
}

#[test]
fn relaxation_is_never_time_limited() {
    let instance = two_set_instance();
    let backend = Arc::new(FixedSolver::new(SolutionStatus::Optimal, vec![1.0, 1.0]));
    let config = letscover::SolverConfig {
        time_limit: Some(1.0),
        ..Default::default()
    };

    ApproximateSolver::new(backend.clone())
        .with_config(config)
        .solve(&instance, &mut StdRng::seed_from_u64(0))
        .unwrap();
    assert_eq!(*backend.last_time_limit.lock().unwrap(), None);
}

#[test]
fn exact_solver_requires_integer_support() {
    let instance = two_set_instance();
    let backend =
        Arc::new(FixedSolver::new(SolutionStatus::Optimal, vec![1.0, 1.0]).continuous_only());

    let err = ExactSolver::new(backend.clone()).solve(&instance).unwrap_err();
    assert!(matches!(
        err,
        SetCoverError::Backend(SolverError::SolverNotAvailable(_))
    ));
    assert_eq!(backend.calls(), 0);
}

#[test]
fn non_covering_backend_answer_is_rejected() {
    let instance = two_set_instance();
    let backend = Arc::new(FixedSolver::new(SolutionStatus::Optimal, vec![1.0, 0.0]));

    let err = ExactSolver::new(backend).solve(&instance).unwrap_err();
    assert!(matches!(
        err,
        SetCoverError::Backend(SolverError::ExecutionFailed(_))
    ));
}

#[test]
fn empty_universe_needs_no_backend() {
    let instance = ProblemInstance::new(0, 0, vec![], vec![]).unwrap();
    let backend = Arc::new(FixedSolver::new(SolutionStatus::Infeasible, vec![]));

    let exact = ExactSolver::new(backend.clone()).solve(&instance).unwrap();
    assert_eq!(exact.total_weight, 0.0);

    let approx = ApproximateSolver::new(backend.clone())
        .solve(&instance, &mut StdRng::seed_from_u64(0))
        .unwrap();
    assert_eq!(approx.total_weight, 0.0);
    assert_eq!(approx.trials, 1);
    assert_eq!(backend.calls(), 0);
}

#[test]
fn random_instances_are_always_covered() {
    let mut rng = StdRng::seed_from_u64(2024);
    let exact_solver = ExactSolver::new(Arc::new(EnumeratingSolver));
    let spread = ApproximateSolver::new(Arc::new(SpreadRelaxation));
    let vertex = ApproximateSolver::new(Arc::new(EnumeratingSolver))
        .with_rounding(RoundingConfig::default().with_trial_threshold(32));

    for _ in 0..40 {
        let instance = random_instance(&mut rng, 12, 10);
        let exact = exact_solver.solve(&instance).unwrap();
        assert!(instance.covers(&exact.selected));

        let approx = spread.solve(&instance, &mut rng).unwrap();
        assert!(instance.covers(&approx.selected));
        assert!(approx.total_weight >= exact.total_weight);
        assert_eq!(approx.total_weight, instance.weight_of(&approx.selected));
        for repair in &approx.repairs {
            assert_eq!(repair.set, instance.cheapest_set_for(repair.element));
        }

        let approx = vertex.solve(&instance, &mut rng).unwrap();
        assert!(approx.total_weight >= approx.lower_bound);
        assert!(approx.total_weight >= exact.total_weight);
        assert_eq!(approx.trials, 6);
    }
}
