//! Core record-store logic for unitfile.
//! This crate is the single source of truth for the on-disk record format.

pub mod logging;
pub mod model;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::unit::{normalize_fragment, normalize_label, Unit, UnitError};
pub use store::{Collection, LineStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
