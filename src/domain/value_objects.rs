// Domain value objects shared by the covering models and the solver adapters

use std::fmt;

/// Domain of a decision variable in the covering model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableDomain {
    /// Continuous real number in its bounds (x ∈ [0, 1] for the relaxation)
    Continuous,
    /// Binary variable (x ∈ {0, 1})
    Binary,
}

impl fmt::Display for VariableDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableDomain::Continuous => write!(f, "Continuous"),
            VariableDomain::Binary => write!(f, "Binary"),
        }
    }
}

/// Status of a backend solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Found optimal solution
    Optimal,
    /// Found feasible solution, optimality not proven within the time limit
    Feasible,
    /// Problem has no feasible solution
    Infeasible,
    /// Time limit reached before any feasible solution was found
    TimeLimit,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionStatus::Optimal => write!(f, "Optimal"),
            SolutionStatus::Feasible => write!(f, "Feasible"),
            SolutionStatus::Infeasible => write!(f, "Infeasible"),
            SolutionStatus::TimeLimit => write!(f, "Time Limit Reached"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverBackend {
    /// Automatically select best solver
    #[default]
    Auto,
    /// COIN-OR CBC solver
    CoinCbc,
    /// HiGHS solver
    Highs,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            SolverBackend::Highs => write!(f, "HiGHS"),
        }
    }
}

impl std::str::FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SolverBackend::Auto),
            "cbc" | "coin_cbc" | "coin-cbc" => Ok(SolverBackend::CoinCbc),
            "highs" => Ok(SolverBackend::Highs),
            other => Err(format!("unknown solver backend '{}'", other)),
        }
    }
}
