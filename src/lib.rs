// Domain layer: instance model, backend contract, errors
pub mod domain;

// Application layer: exact and approximate covering solvers
pub mod application;

// Infrastructure layer: instance files and run orchestration
pub mod infrastructure;

// Solver adapters: Concrete implementations of SolverService
#[cfg(feature = "solvers")]
pub mod solver;

// Re-export commonly used types
pub use domain::{
    InstanceError, OptimizationProblem, ProblemInstance, SetCoverError, Solution, SolutionStatus,
    SolverBackend, SolverConfig, SolverError, SolverService, VariableDomain,
};

pub use application::{
    ApproximateOutcome, ApproximateSolver, ExactOutcome, ExactSolver, Optimality, RoundingConfig,
    RoundingEngine,
};

pub use infrastructure::{parse_instance, read_instance, run, Report, RunConfig, RunMode};

#[cfg(feature = "solvers")]
pub use solver::{CoinCbcSolver, HighsSolver, SolverFactory};
