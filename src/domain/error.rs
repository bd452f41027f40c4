// Error taxonomy of the covering solvers

use std::path::PathBuf;

use super::solver_service::SolverError;

/// Structural problems with an instance description
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InstanceError {
    #[error("expected {expected} weights, found {found}")]
    WeightCountMismatch { expected: usize, found: usize },

    #[error("expected {expected} membership lists, found {found}")]
    MembershipCountMismatch { expected: usize, found: usize },

    #[error("set {set} has negative weight {weight}")]
    NegativeWeight { set: usize, weight: f64 },

    #[error("set {set} has non-finite weight {weight}")]
    NonFiniteWeight { set: usize, weight: f64 },

    #[error("element {element} references set {set}, but only {set_count} sets exist")]
    SetIndexOutOfRange {
        element: usize,
        set: usize,
        set_count: usize,
    },

    #[error("element {element} references set 0; set indices are 1-based")]
    ZeroSetIndex { element: usize },

    #[error("element {element} is contained in no set")]
    EmptyMembership { element: usize },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Errors surfaced by instance construction and by both solvers
#[derive(Debug, thiserror::Error)]
pub enum SetCoverError {
    #[error("malformed instance: {0}")]
    MalformedInstance(#[from] InstanceError),

    #[error("covering model is unsolvable: {0}")]
    Unsolvable(String),

    #[error("no feasible cover found within the {limit_secs}s time limit")]
    BackendTimeout { limit_secs: f64 },

    #[error(transparent)]
    Backend(#[from] SolverError),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SetCoverError>;
