pub mod cli;
pub mod config;
pub mod credentials;
pub mod deps;
pub mod error;
pub mod handlers;
pub mod install;
pub mod layout;
pub mod orchestrator;
pub mod runner;
pub mod summary;
pub mod tools;

pub use cli::{Cli, Cloud, Provider};
pub use config::RunConfig;
pub use error::{AuditError, Result};
pub use layout::ReportLayout;
pub use orchestrator::{DispatchReport, Orchestrator, ProviderReport};
pub use runner::{ToolOutcome, ToolRunner, ToolStatus};
pub use summary::SummaryWriter;
pub use tools::Tool;
