//! Outbound integrations.

pub mod estimator;

pub use estimator::{
    EstimateError, EstimateRequest, EstimationService, EstimatorClient, ErrorDetail,
    FALLBACK_ERROR_MESSAGE,
};
