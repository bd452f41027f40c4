use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info, warn};

use super::formulation::{covering_model, selected_sets, solution_values};
use crate::domain::error::Result;
use crate::domain::{
    ProblemInstance, SetCoverError, SolutionStatus, SolverConfig, SolverError, SolverService,
    VariableDomain,
};

/// Whether the backend proved the returned cover optimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optimality {
    Proven,
    /// The time limit stopped the search at a feasible incumbent
    Unproven,
}

#[derive(Debug, Clone)]
pub struct ExactOutcome {
    pub elapsed: Duration,
    pub total_weight: f64,
    pub optimality: Optimality,
    pub selected: Vec<usize>,
}

impl ExactOutcome {
    pub fn is_proven_optimal(&self) -> bool {
        self.optimality == Optimality::Proven
    }
}

/// Solves the 0/1 covering program with an integer-capable backend
pub struct ExactSolver {
    backend: Arc<dyn SolverService>,
    config: SolverConfig,
}

impl ExactSolver {
    pub fn new(backend: Arc<dyn SolverService>) -> Self {
        Self {
            backend,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Wall-clock budget in seconds for the backend search
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.config.time_limit = Some(seconds);
        self
    }

    pub fn solve(&self, instance: &ProblemInstance) -> Result<ExactOutcome> {
        let start = Instant::now();

        if !self.backend.supports_mip() {
            return Err(SolverError::SolverNotAvailable(format!(
                "{} cannot solve integer programs",
                self.backend.name()
            ))
            .into());
        }

        if instance.set_count() == 0 {
            return Ok(ExactOutcome {
                elapsed: start.elapsed(),
                total_weight: 0.0,
                optimality: Optimality::Proven,
                selected: Vec::new(),
            });
        }

        let model = covering_model(instance, VariableDomain::Binary, self.config.clone());
        info!(
            "solving '{}' with {}: {} variables, {} constraints",
            model.name,
            self.backend.name(),
            model.num_variables(),
            model.constraints.len()
        );
        let solution = self.backend.solve(&model)?;

        let optimality = match solution.status {
            SolutionStatus::Optimal => Optimality::Proven,
            SolutionStatus::Feasible => {
                warn!(
                    "time limit reached, returning unproven incumbent: {}",
                    solution.message
                );
                Optimality::Unproven
            }
            SolutionStatus::Infeasible => {
                error!(
                    "backend reports a well-formed cover instance infeasible: {}",
                    solution.message
                );
                return Err(SetCoverError::Unsolvable(solution.message));
            }
            SolutionStatus::TimeLimit => {
                return Err(SetCoverError::BackendTimeout {
                    limit_secs: self.config.time_limit.unwrap_or_default(),
                });
            }
        };

        let selected = selected_sets(solution_values(&model, &solution)?);
        let uncovered = instance.uncovered_elements(&selected);
        if !uncovered.is_empty() {
            return Err(SolverError::ExecutionFailed(format!(
                "{} returned a selection leaving {} elements uncovered (first: {})",
                self.backend.name(),
                uncovered.len(),
                uncovered[0]
            ))
            .into());
        }

        let total_weight = instance.weight_of(&selected);
        let elapsed = start.elapsed();
        info!(
            "exact cover: weight {} using {} sets in {:.3}s ({:?})",
            total_weight,
            selected.len(),
            elapsed.as_secs_f64(),
            optimality
        );

        Ok(ExactOutcome {
            elapsed,
            total_weight,
            optimality,
            selected,
        })
    }
}
