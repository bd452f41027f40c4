// HiGHS Solver Adapter
// Implements the SolverService interface for HiGHS
// Translates the covering models to the HiGHS row-wise API

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{SolutionStatus as DomainSolutionStatus, VariableDomain},
};
use highs::{HighsModelStatus, RowProblem, Sense};
use log::{debug, warn};
use std::time::Instant;

/// Tolerance used to accept a time-limited incumbent
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let num_vars = problem.num_variables();

        let mut pb = RowProblem::default();
        let mut columns = Vec::with_capacity(num_vars);
        for (var_def, &cost) in problem.variables.iter().zip(&problem.objective.coefficients) {
            let bounds = var_def.lower_bound..=var_def.upper_bound;
            let col = match var_def.domain {
                VariableDomain::Binary => pb.add_integer_column(cost, bounds),
                VariableDomain::Continuous => pb.add_column(cost, bounds),
            };
            columns.push(col);
        }

        for constraint in &problem.constraints {
            let terms: Vec<_> = constraint
                .terms
                .iter()
                .map(|&(i, coeff)| (columns[i], coeff))
                .collect();
            pb.add_row(constraint.lower_bound.., &terms);
        }

        let config = &problem.solver_config;
        let mut model = pb.optimise(Sense::Minimise);
        model.set_option("output_flag", config.verbose);
        if let Some(limit) = config.time_limit {
            model.set_option("time_limit", limit);
        }
        if let Some(gap) = config.gap_tolerance {
            model.set_option("mip_rel_gap", gap);
        }

        let solved = model.solve();
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;
        let statistics = SolverStatistics::for_problem(problem, solve_time);
        debug!(
            "HiGHS finished '{}' with status {:?} in {:.1}ms",
            problem.name,
            solved.status(),
            solve_time
        );

        match solved.status() {
            HighsModelStatus::Optimal => {
                let variable_values = solved.get_solution().columns().to_vec();
                let value = problem.objective.evaluate(&variable_values);
                let mut solution = DomainSolution::optimal(value, variable_values);
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                Ok(solution.with_statistics(statistics))
            }
            HighsModelStatus::ModelEmpty => {
                Ok(DomainSolution::optimal(0.0, vec![0.0; num_vars]).with_statistics(statistics))
            }
            HighsModelStatus::ReachedTimeLimit => {
                let variable_values = solved.get_solution().columns().to_vec();
                if problem.is_satisfied_by(&variable_values, FEASIBILITY_TOLERANCE) {
                    warn!("HiGHS hit the time limit on '{}', keeping incumbent", problem.name);
                    let value = problem.objective.evaluate(&variable_values);
                    Ok(DomainSolution::feasible(value, variable_values).with_statistics(statistics))
                } else {
                    Ok(DomainSolution::new(
                        DomainSolutionStatus::TimeLimit,
                        "Time limit reached before a feasible solution was found",
                    )
                    .with_statistics(statistics))
                }
            }
            HighsModelStatus::Infeasible => Ok(DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            )
            .with_statistics(statistics)),
            status => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
