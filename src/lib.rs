pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

pub use config::CliConfig;
pub use core::workflow::{PrintWorkflow, SelectionForm, SelectionOutcome};
pub use utils::error::{Result, VoucherError};
