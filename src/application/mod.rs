// Application layer: the exact and approximate covering solvers

pub mod approximate;
pub mod exact;
pub mod formulation;
pub mod rounding;

pub use approximate::{ApproximateOutcome, ApproximateSolver};
pub use exact::{ExactOutcome, ExactSolver, Optimality};
pub use rounding::{trial_count, Repair, RoundingConfig, RoundingEngine, RoundingOutcome};
