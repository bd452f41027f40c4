// Domain module: instance model, backend contract and errors

pub mod error;
pub mod instance;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use error::{InstanceError, SetCoverError};
pub use instance::*;
pub use models::*;
pub use solver_service::{SolverError, SolverService};
pub use value_objects::*;
