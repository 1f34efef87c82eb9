pub mod case;
pub mod category;
pub mod config;
pub mod gate;
pub mod report;
pub mod validator;

pub use case::{ensure, run_lifecycle, CaseFailure, LifecycleError, LifecycleResult, TestCase};
pub use category::Category;
pub use config::{ConfigError, ConfigResult, HarnessConfig, ReportSection, RunSection};
pub use gate::{run_gated, GateState, GatedCase};
pub use report::{CaseRecord, Outcome, RunReport};
pub use validator::{
    parse_category_list, AllowAll, ConfigValidator, DenyAll, StaticValidator, Validator,
    ALLOWED_CATEGORIES_ENV,
};

pub mod prelude {
    pub use crate::case::*;
    pub use crate::category::*;
    pub use crate::config::*;
    pub use crate::gate::*;
    pub use crate::report::*;
    pub use crate::validator::*;
}
