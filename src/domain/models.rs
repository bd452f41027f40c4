use super::value_objects::{SolutionStatus, SolverBackend, VariableDomain};

/// Decision variable in a covering model
#[derive(Debug, Clone)]
pub struct Variable {
    pub domain: VariableDomain,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub name: String,
}

impl Variable {
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            domain: VariableDomain::Binary,
            lower_bound: 0.0,
            upper_bound: 1.0,
            name: name.into(),
        }
    }

    /// Continuous variable in `[0, 1]`
    pub fn fraction(name: impl Into<String>) -> Self {
        Self {
            domain: VariableDomain::Continuous,
            lower_bound: 0.0,
            upper_bound: 1.0,
            name: name.into(),
        }
    }

    pub fn of_domain(domain: VariableDomain, name: impl Into<String>) -> Self {
        match domain {
            VariableDomain::Binary => Self::binary(name),
            VariableDomain::Continuous => Self::fraction(name),
        }
    }

    pub fn is_integer(&self) -> bool {
        self.domain == VariableDomain::Binary
    }
}

/// Linear objective to minimize
#[derive(Debug, Clone)]
pub struct ObjectiveFunction {
    pub coefficients: Vec<f64>,
}

impl ObjectiveFunction {
    pub fn minimize(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }

    /// Objective value at the given point
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum()
    }
}

/// Sparse linear constraint `Σ coeff * x[index] >= lower_bound`
#[derive(Debug, Clone)]
pub struct Constraint {
    pub terms: Vec<(usize, f64)>,
    pub lower_bound: f64,
    pub name: String,
}

impl Constraint {
    pub fn at_least(terms: Vec<(usize, f64)>, lower_bound: f64) -> Self {
        Self {
            terms,
            lower_bound,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Left-hand side at the given point
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(i, c)| c * values.get(i).copied().unwrap_or(0.0))
            .sum()
    }
}

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Wall-clock budget in seconds, honoured by integer solves
    pub time_limit: Option<f64>,
    pub gap_tolerance: Option<f64>,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::Auto,
            time_limit: None,
            gap_tolerance: None,
            verbose: false,
        }
    }
}

/// Complete minimization problem handed to a backend
#[derive(Debug, Clone)]
pub struct OptimizationProblem {
    pub name: String,
    pub objective: ObjectiveFunction,
    pub constraints: Vec<Constraint>,
    pub variables: Vec<Variable>,
    pub solver_config: SolverConfig,
}

impl OptimizationProblem {
    pub fn new(objective: ObjectiveFunction) -> Self {
        Self {
            name: String::new(),
            objective,
            constraints: Vec::new(),
            variables: Vec::new(),
            solver_config: SolverConfig::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn add_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_variables(mut self, variables: Vec<Variable>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.objective.num_variables()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.num_integer_variables() > 0
    }

    /// Whether `values` respects every bound, row and integrality requirement
    /// up to `tolerance`.
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let within_bounds = self.variables.iter().zip(values).all(|(var, &v)| {
            v >= var.lower_bound - tolerance
                && v <= var.upper_bound + tolerance
                && (!var.is_integer() || (v - v.round()).abs() <= tolerance)
        });
        within_bounds
            && self
                .constraints
                .iter()
                .all(|c| c.activity(values) >= c.lower_bound - tolerance)
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
    pub num_integer_vars: u32,
}

impl SolverStatistics {
    pub fn for_problem(problem: &OptimizationProblem, solve_time_ms: f64) -> Self {
        Self {
            solve_time_ms,
            num_variables: problem.num_variables() as u32,
            num_constraints: problem.constraints.len() as u32,
            num_integer_vars: problem.num_integer_variables() as u32,
        }
    }
}

/// Backend answer to an optimization problem
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    pub objective_value: Option<f64>,
    pub variable_values: Vec<f64>,
    pub message: String,
    pub statistics: SolverStatistics,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective_value: None,
            variable_values: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            objective_value: Some(value),
            variable_values,
            message: "Optimal solution found".to_string(),
            statistics: SolverStatistics::default(),
        }
    }

    /// Incumbent returned when the time limit stopped the search
    pub fn feasible(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Feasible,
            objective_value: Some(value),
            variable_values,
            message: "Feasible solution found, optimality not proven".to_string(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    pub fn is_feasible(&self) -> bool {
        matches!(
            self.status,
            SolutionStatus::Optimal | SolutionStatus::Feasible
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_activity_ignores_missing_values() {
        let row = Constraint::at_least(vec![(0, 1.0), (2, 1.0)], 1.0);
        assert_eq!(row.activity(&[0.25, 1.0, 0.5]), 0.75);
        assert_eq!(row.activity(&[1.0]), 1.0);
    }

    #[test]
    fn solution_flags() {
        assert!(Solution::optimal(1.0, vec![1.0]).is_feasible());
        let incumbent = Solution::feasible(2.0, vec![1.0]);
        assert!(incumbent.is_feasible());
        assert!(!incumbent.is_optimal());
        assert!(!Solution::new(SolutionStatus::Infeasible, "none").is_feasible());
    }

    #[test]
    fn counts_integer_variables() {
        let problem = OptimizationProblem::new(ObjectiveFunction::minimize(vec![1.0, 2.0]))
            .with_variables(vec![Variable::binary("a"), Variable::fraction("b")]);
        assert_eq!(problem.num_integer_variables(), 1);
        assert!(problem.is_mixed_integer());
        assert_eq!(problem.objective.evaluate(&[1.0, 0.5]), 2.0);
    }

    #[test]
    fn checks_candidate_points() {
        let problem = OptimizationProblem::new(ObjectiveFunction::minimize(vec![1.0, 1.0]))
            .with_variables(vec![Variable::binary("a"), Variable::binary("b")])
            .add_constraint(Constraint::at_least(vec![(0, 1.0), (1, 1.0)], 1.0));

        assert!(problem.is_satisfied_by(&[0.0, 1.0], 1e-6));
        assert!(!problem.is_satisfied_by(&[0.0, 0.0], 1e-6));
        assert!(!problem.is_satisfied_by(&[0.5, 0.5], 1e-6));
        assert!(!problem.is_satisfied_by(&[1.0], 1e-6));
    }
}
