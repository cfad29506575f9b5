pub mod config;
pub mod error;
pub mod guard;
pub mod process;

pub use config::DashConfig;
pub use error::{DashError, Result};
pub use guard::{GuardConfig, RouteDecision, RouteGuard};
pub use process::{
    Envelope, ErrorBody, LoginCredentials, LoginOutcome, ProcessAction, ProcessMetadata,
    ProcessStatus, ProcessSummary,
};
