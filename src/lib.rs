//! Reefsim: the ecosystem simulation and evaluation engine behind the
//! reef-building training exercises.
//!
//! The heavy lifting lives in the workspace crates; this root crate wires
//! them together behind a thin orchestration service and the CLI runner.

pub use reefsim_core::{init_logging, Telemetry};

pub mod config {
    pub use reefsim_core::config::*;
}
pub mod engine {
    pub use reefsim_core::engine::*;
}
pub mod error {
    pub use reefsim_core::error::*;
}
pub mod evaluator {
    pub use reefsim_core::evaluator::*;
}
pub mod interaction {
    pub use reefsim_core::interaction::*;
}
pub mod observer {
    pub use reefsim_observer::*;
}
pub mod scoring {
    pub use reefsim_core::scoring::*;
}
pub mod state {
    pub use reefsim_data::*;
}
pub mod validator {
    pub use reefsim_core::validator::*;
}

pub mod scenario;
pub mod service;
