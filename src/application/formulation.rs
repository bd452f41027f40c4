// Formulation: turn a set cover instance into the covering program
//
//   minimize    Σ w[i] * x[i]
//   subject to  Σ_{i ∋ e} x[i] >= 1      for every element e
//               x[i] ∈ {0, 1}  or  x[i] ∈ [0, 1]

use crate::domain::{
    Constraint, ObjectiveFunction, OptimizationProblem, ProblemInstance, Solution, SolverConfig,
    SolverError, Variable, VariableDomain,
};

/// Build the covering model for `instance` with the given variable domain.
pub fn covering_model(
    instance: &ProblemInstance,
    domain: VariableDomain,
    config: SolverConfig,
) -> OptimizationProblem {
    let variables = (0..instance.set_count())
        .map(|i| Variable::of_domain(domain, format!("set_{}", i)))
        .collect();

    let name = match domain {
        VariableDomain::Binary => "set_cover_ilp",
        VariableDomain::Continuous => "set_cover_lp_relaxation",
    };

    let mut problem =
        OptimizationProblem::new(ObjectiveFunction::minimize(instance.weights().to_vec()))
            .with_name(name)
            .with_variables(variables)
            .with_config(config);

    for (element, sets) in instance.membership().iter().enumerate() {
        let terms = sets.iter().map(|&s| (s, 1.0)).collect();
        let row = Constraint::at_least(terms, 1.0).with_name(format!("cover_{}", element));
        problem = problem.add_constraint(row);
    }

    problem
}

/// Sets whose binary variable is switched on.
pub fn selected_sets(values: &[f64]) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v > 0.5)
        .map(|(i, _)| i)
        .collect()
}

/// Variable values of a backend answer, checked against the model size.
pub fn solution_values<'s>(
    problem: &OptimizationProblem,
    solution: &'s Solution,
) -> Result<&'s [f64], SolverError> {
    if solution.variable_values.len() != problem.num_variables() {
        return Err(SolverError::ExecutionFailed(format!(
            "backend returned {} values for {} variables of '{}'",
            solution.variable_values.len(),
            problem.num_variables(),
            problem.name
        )));
    }
    Ok(&solution.variable_values)
}
