use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info};
use rand::Rng;

use super::formulation::{covering_model, solution_values};
use super::rounding::{Repair, RoundingConfig, RoundingEngine};
use crate::domain::error::Result;
use crate::domain::{
    ProblemInstance, SetCoverError, SolutionStatus, SolverConfig, SolverError, SolverService,
    VariableDomain,
};

#[derive(Debug, Clone)]
pub struct ApproximateOutcome {
    pub elapsed: Duration,
    pub total_weight: f64,
    /// Optimum of the LP relaxation
    pub lower_bound: f64,
    pub selected: Vec<usize>,
    pub trials: usize,
    pub repairs: Vec<Repair>,
}

impl ApproximateOutcome {
    /// Weight relative to the LP bound; `None` when the bound is zero.
    pub fn ratio_to_bound(&self) -> Option<f64> {
        (self.lower_bound > 0.0).then(|| self.total_weight / self.lower_bound)
    }
}

/// LP relaxation followed by randomized rounding and repair
pub struct ApproximateSolver {
    backend: Arc<dyn SolverService>,
    config: SolverConfig,
    rounding: RoundingConfig,
}

impl ApproximateSolver {
    pub fn new(backend: Arc<dyn SolverService>) -> Self {
        Self {
            backend,
            config: SolverConfig::default(),
            rounding: RoundingConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingConfig) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn solve<R: Rng + ?Sized>(
        &self,
        instance: &ProblemInstance,
        rng: &mut R,
    ) -> Result<ApproximateOutcome> {
        let start = Instant::now();
        let (fractional, lower_bound) = self.relax(instance)?;

        let rounded = RoundingEngine::new(instance, self.rounding.clone()).run(&fractional, rng);
        let elapsed = start.elapsed();
        info!(
            "approximate cover: weight {} (LP bound {}) using {} sets, \
             {} trials, {} repairs in {:.3}s",
            rounded.total_weight,
            lower_bound,
            rounded.included.len(),
            rounded.trials(),
            rounded.repairs.len(),
            elapsed.as_secs_f64()
        );

        Ok(ApproximateOutcome {
            elapsed,
            total_weight: rounded.total_weight,
            lower_bound,
            trials: rounded.trials(),
            selected: rounded.included,
            repairs: rounded.repairs,
        })
    }

    /// Solve the LP relaxation; returns one value per set and the LP optimum.
    fn relax(&self, instance: &ProblemInstance) -> Result<(Vec<f64>, f64)> {
        if instance.set_count() == 0 {
            return Ok((Vec::new(), 0.0));
        }

        let config = SolverConfig {
            time_limit: None,
            ..self.config.clone()
        };
        let model = covering_model(instance, VariableDomain::Continuous, config);
        info!(
            "solving '{}' with {}: {} variables, {} constraints",
            model.name,
            self.backend.name(),
            model.num_variables(),
            model.constraints.len()
        );
        let solution = self.backend.solve(&model)?;

        match solution.status {
            SolutionStatus::Optimal => {
                let values = solution_values(&model, &solution)?.to_vec();
                let bound = solution
                    .objective_value
                    .unwrap_or_else(|| model.objective.evaluate(&values));
                Ok((values, bound))
            }
            SolutionStatus::Infeasible => {
                error!(
                    "backend reports the relaxation of a well-formed instance infeasible: {}",
                    solution.message
                );
                Err(SetCoverError::Unsolvable(solution.message))
            }
            status => Err(SolverError::ExecutionFailed(format!(
                "{} returned status '{}' for the LP relaxation",
                self.backend.name(),
                status
            ))
            .into()),
        }
    }
}
