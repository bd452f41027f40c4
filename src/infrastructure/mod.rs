// Infrastructure layer: instance files and run orchestration

pub mod instance_reader;
pub mod runner;

pub use instance_reader::{parse_instance, read_instance};
pub use runner::{run, Report, RunConfig, RunMode};
