pub mod config;
pub mod evaluator;
pub mod notify;
pub mod product;
pub mod runner;

pub mod error;

pub use config::RunConfig;
pub use error::{ConfigError, MonitorError};
pub use runner::{RunOutcome, run_once};
