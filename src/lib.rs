//! Trip form state machine and client for a flight fare estimation service.

pub mod domain;
pub mod infra;
pub mod session;
pub mod util;

pub use session::PredictorSession;
