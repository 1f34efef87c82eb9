pub mod cases;
pub mod registry;
pub mod runner;

pub use cases::{ArithmeticCase, HomepageTitleCase, StatusPayloadCase};
pub use registry::{CaseRegistry, RegistryError, RegistryResult};
pub use runner::{write_report, Runner, RunnerError, RunnerResult};
