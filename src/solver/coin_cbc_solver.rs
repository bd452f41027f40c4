use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{SolutionStatus as DomainSolutionStatus, VariableDomain},
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use log::{debug, warn};
use std::time::Instant;

/// Reason good_lp reports when CBC stops on its `seconds` limit
const CBC_STOPPED: &str = "Stopped";

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let num_vars = problem.num_variables();

        let mut vars = variables!();
        let mut lp_variables: Vec<GoodLpVariable> = Vec::with_capacity(num_vars);
        for var_def in &problem.variables {
            let var = match var_def.domain {
                VariableDomain::Binary => vars.add(variable().binary()),
                VariableDomain::Continuous => {
                    vars.add(variable().min(var_def.lower_bound).max(var_def.upper_bound))
                }
            };
            lp_variables.push(var);
        }

        let mut obj_expr: Expression = 0.into();
        for (&coeff, &var) in problem.objective.coefficients.iter().zip(&lp_variables) {
            if coeff != 0.0 {
                obj_expr += coeff * var;
            }
        }

        let mut lp_model = vars.minimise(obj_expr).using(coin_cbc::coin_cbc);

        let config = &problem.solver_config;
        lp_model.set_parameter("logLevel", if config.verbose { "1" } else { "0" });
        if let Some(limit) = config.time_limit {
            lp_model.set_parameter("seconds", &limit.to_string());
        }
        if let Some(gap) = config.gap_tolerance {
            lp_model.set_parameter("ratioGap", &gap.to_string());
        }

        for constraint in &problem.constraints {
            let mut lhs: Expression = 0.into();
            for &(i, coeff) in &constraint.terms {
                lhs += coeff * lp_variables[i];
            }
            lp_model = lp_model.with(lhs.geq(constraint.lower_bound));
        }

        let solution_result = lp_model.solve();
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;
        let statistics = SolverStatistics::for_problem(problem, solve_time);
        debug!("CBC finished '{}' in {:.1}ms", problem.name, solve_time);

        match solution_result {
            Ok(sol) => {
                let variable_values: Vec<f64> =
                    lp_variables.iter().map(|&var| sol.value(var)).collect();
                let value = problem.objective.evaluate(&variable_values);

                if sol.model().is_proven_optimal() {
                    let mut solution = DomainSolution::optimal(value, variable_values);
                    solution.message = format!("Optimal solution found for '{}'", problem.name);
                    Ok(solution.with_statistics(statistics))
                } else {
                    warn!("CBC stopped early on '{}', keeping incumbent", problem.name);
                    Ok(DomainSolution::feasible(value, variable_values).with_statistics(statistics))
                }
            }
            Err(ResolutionError::Infeasible) => Ok(DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            )
            .with_statistics(statistics)),
            Err(ResolutionError::Other(CBC_STOPPED)) if config.time_limit.is_some() => {
                let limit = config.time_limit.unwrap_or_default();
                debug!("CBC hit the {}s limit without incumbent", limit);
                Ok(DomainSolution::new(
                    DomainSolutionStatus::TimeLimit,
                    "Time limit reached before a feasible solution was found",
                )
                .with_statistics(statistics))
            }
            Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
