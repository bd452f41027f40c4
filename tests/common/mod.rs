#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use letscover::domain::{OptimizationProblem, Solution, SolutionStatus, SolverService};
use letscover::{ProblemInstance, SolverError};
use rand::Rng;

/// Brute-force backend: tries every 0/1 point and keeps the cheapest feasible one.
///
/// Continuous problems get the same answer, which is a valid (if not optimal)
/// point of the relaxation.
pub struct EnumeratingSolver;

impl SolverService for EnumeratingSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution, SolverError> {
        self.validate(problem)?;
        let n = problem.num_variables();
        assert!(n <= 16, "enumeration is limited to small models");

        let mut best: Option<(f64, Vec<f64>)> = None;
        for mask in 0u32..(1 << n) {
            let point: Vec<f64> = (0..n)
                .map(|i| if mask & (1 << i) != 0 { 1.0 } else { 0.0 })
                .collect();
            if !problem.is_satisfied_by(&point, 1e-9) {
                continue;
            }
            let value = problem.objective.evaluate(&point);
            if best.as_ref().map_or(true, |(b, _)| value < *b) {
                best = Some((value, point));
            }
        }

        Ok(match best {
            Some((value, point)) => Solution::optimal(value, point),
            None => Solution::new(SolutionStatus::Infeasible, "no 0/1 point is feasible"),
        })
    }

    fn name(&self) -> &str {
        "enumerate"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}

/// Backend returning a canned answer and recording what it was asked.
pub struct FixedSolver {
    status: SolutionStatus,
    values: Vec<f64>,
    supports_mip: bool,
    pub calls: AtomicUsize,
    pub last_time_limit: Mutex<Option<f64>>,
}

impl FixedSolver {
    pub fn new(status: SolutionStatus, values: Vec<f64>) -> Self {
        Self {
            status,
            values,
            supports_mip: true,
            calls: AtomicUsize::new(0),
            last_time_limit: Mutex::new(None),
        }
    }

    pub fn continuous_only(mut self) -> Self {
        self.supports_mip = false;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SolverService for FixedSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_time_limit.lock().unwrap() = problem.solver_config.time_limit;

        let value = problem.objective.evaluate(&self.values);
        Ok(match self.status {
            SolutionStatus::Optimal => Solution::optimal(value, self.values.clone()),
            SolutionStatus::Feasible => Solution::feasible(value, self.values.clone()),
            status => Solution::new(status, format!("canned {}", status)),
        })
    }

    fn name(&self) -> &str {
        "fixed"
    }

    fn supports_mip(&self) -> bool {
        self.supports_mip
    }
}

/// Relaxation backend answering `x[i] = 1 / k`, where `k` is the size of the
/// smallest membership list. Every row then sums to at least 1.
pub struct SpreadRelaxation;

impl SolverService for SpreadRelaxation {
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution, SolverError> {
        let k = problem
            .constraints
            .iter()
            .map(|c| c.terms.len())
            .min()
            .unwrap_or(1)
            .max(1);
        let values = vec![1.0 / k as f64; problem.num_variables()];
        let value = problem.objective.evaluate(&values);
        Ok(Solution::optimal(value, values))
    }

    fn name(&self) -> &str {
        "spread"
    }

    fn supports_mip(&self) -> bool {
        false
    }
}

/// m = 3, n = 2, weights [1, 5], membership [{0}, {0, 1}, {1}]
pub fn two_set_instance() -> ProblemInstance {
    ProblemInstance::from_one_based(3, 2, vec![1.0, 5.0], vec![vec![1], vec![1, 2], vec![2]])
        .unwrap()
}

/// Random instance with no empty membership list
pub fn random_instance<R: Rng>(
    rng: &mut R,
    max_elements: usize,
    max_sets: usize,
) -> ProblemInstance {
    let m = rng.gen_range(1..=max_elements);
    let n = rng.gen_range(1..=max_sets);
    let weights = (0..n).map(|_| rng.gen_range(1..=9) as f64).collect();
    let membership = (0..m)
        .map(|_| {
            let mut sets: Vec<usize> = (0..n).filter(|_| rng.gen_bool(0.3)).collect();
            if sets.is_empty() {
                sets.push(rng.gen_range(0..n));
            }
            sets
        })
        .collect();
    ProblemInstance::new(m, n, weights, membership).unwrap()
}
