// Infrastructure: run configured solves on an instance file and report them

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::instance_reader::read_instance;
use crate::application::{
    ApproximateOutcome, ApproximateSolver, ExactOutcome, ExactSolver, RoundingConfig,
};
use crate::domain::error::Result;
use crate::domain::{SolverConfig, SolverService};

/// Which solvers a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Exact,
    Approximate,
    Compare,
}

pub struct RunConfig {
    pub instance_path: PathBuf,
    pub mode: RunMode,
    pub solver: Arc<dyn SolverService>,
    pub solver_config: SolverConfig,
    pub rounding: RoundingConfig,
    /// Seed for the rounding trials; drawn from the OS when `None`
    pub seed: Option<u64>,
}

impl RunConfig {
    pub fn new(
        instance_path: impl Into<PathBuf>,
        mode: RunMode,
        solver: Arc<dyn SolverService>,
    ) -> Self {
        Self {
            instance_path: instance_path.into(),
            mode,
            solver,
            solver_config: SolverConfig::default(),
            rounding: RoundingConfig::default(),
            seed: None,
        }
    }

    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingConfig) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Outcomes of one run
#[derive(Debug, Clone)]
pub struct Report {
    pub universe_size: usize,
    pub set_count: usize,
    pub backend: String,
    pub exact: Option<ExactOutcome>,
    pub approximate: Option<ApproximateOutcome>,
}

impl Report {
    /// Approximate weight over the exact weight, when both ran.
    pub fn approximation_ratio(&self) -> Option<f64> {
        match (&self.exact, &self.approximate) {
            (Some(exact), Some(approx)) if exact.total_weight > 0.0 => {
                Some(approx.total_weight / exact.total_weight)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "m is {}", self.universe_size)?;
        writeln!(f, "n is {}", self.set_count)?;
        writeln!(f, "backend: {}", self.backend)?;
        if let Some(exact) = &self.exact {
            writeln!(
                f,
                "the ILP scheme takes time {:.6} seconds",
                exact.elapsed.as_secs_f64()
            )?;
            let label = if exact.is_proven_optimal() {
                "the optimal set cover weight is"
            } else {
                "the best set cover weight found within the time limit is"
            };
            writeln!(f, "{} {}", label, exact.total_weight)?;
        }
        if let Some(approx) = &self.approximate {
            writeln!(
                f,
                "the LP Rounding scheme takes time {:.6} seconds",
                approx.elapsed.as_secs_f64()
            )?;
            writeln!(
                f,
                "the approximate set cover weight is {} (LP bound {}, {} trials, {} repairs)",
                approx.total_weight,
                approx.lower_bound,
                approx.trials,
                approx.repairs.len()
            )?;
            if let Some(gap) = approx.ratio_to_bound() {
                writeln!(f, "weight over LP bound: {:.4}", gap)?;
            }
        }
        if let Some(ratio) = self.approximation_ratio() {
            writeln!(f, "approximation ratio: {:.4}", ratio)?;
        }
        Ok(())
    }
}

pub fn run(config: &RunConfig) -> Result<Report> {
    let instance = read_instance(&config.instance_path)?;
    info!(
        "loaded {} ({} elements, {} sets)",
        config.instance_path.display(),
        instance.universe_size(),
        instance.set_count()
    );

    let exact = match config.mode {
        RunMode::Exact | RunMode::Compare => Some(
            ExactSolver::new(Arc::clone(&config.solver))
                .with_config(config.solver_config.clone())
                .solve(&instance)?,
        ),
        RunMode::Approximate => None,
    };

    let approximate = match config.mode {
        RunMode::Approximate | RunMode::Compare => {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Some(
                ApproximateSolver::new(Arc::clone(&config.solver))
                    .with_config(config.solver_config.clone())
                    .with_rounding(config.rounding.clone())
                    .solve(&instance, &mut rng)?,
            )
        }
        RunMode::Exact => None,
    };

    Ok(Report {
        universe_size: instance.universe_size(),
        set_count: instance.set_count(),
        backend: config.solver.name().to_string(),
        exact,
        approximate,
    })
}
