//! Thin asynchronous client for the fare estimation service.
//!
//! - `POST /predict` with the eight trip fields as strings.
//! - Success bodies carry a numeric `prediction`; error bodies may carry a `message`.

use std::future::Future;

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CompleteTrip;
use crate::util::config::EstimatorConfig;
use crate::util::version;

const PREDICT_PATH: &str = "predict";

/// Shown when the service gives no usable error message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to get prediction. Please try again.";

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service responded with status {status}")]
    Rejected {
        status: u16,
        detail: Option<ErrorDetail>,
    },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl EstimateError {
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            EstimateError::Rejected { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// Message for the user: the service's own description, else the fallback.
    pub fn user_message(&self) -> String {
        self.detail()
            .map(|detail| detail.message.clone())
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
    }
}

/// Error description supplied by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
}

/// Wire body of a prediction request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EstimateRequest {
    pub airline: String,
    pub source_city: String,
    pub departure_time: String,
    pub stops: String,
    pub arrival_time: String,
    pub destination_city: String,
    pub class: String,
    pub departure_date: String,
}

impl From<&CompleteTrip> for EstimateRequest {
    fn from(trip: &CompleteTrip) -> Self {
        Self {
            airline: trip.airline.as_wire().to_string(),
            source_city: trip.source_city.as_wire().to_string(),
            departure_time: trip.departure_time.as_wire().to_string(),
            stops: trip.stops.as_wire().to_string(),
            arrival_time: trip.arrival_time.as_wire().to_string(),
            destination_city: trip.destination_city.as_wire().to_string(),
            class: trip.class.as_wire().to_string(),
            departure_date: trip.departure_date_iso(),
        }
    }
}

/// Anything that can turn a trip into a price estimate.
pub trait EstimationService {
    fn estimate(
        &self,
        request: &EstimateRequest,
    ) -> impl Future<Output = Result<f64, EstimateError>> + Send;
}

#[derive(Debug, Deserialize)]
struct PredictionDto {
    prediction: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorDto {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct EstimatorClient {
    http: Client,
    endpoint: Url,
}

impl EstimatorClient {
    pub fn new() -> Result<Self, EstimateError> {
        Self::from_config(&EstimatorConfig::default())
    }

    pub fn from_config(config: &EstimatorConfig) -> Result<Self, EstimateError> {
        let endpoint = predict_url(&config.base_url)?;
        let mut builder = Client::builder().user_agent(version::user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl EstimationService for EstimatorClient {
    async fn estimate(&self, request: &EstimateRequest) -> Result<f64, EstimateError> {
        tracing::debug!(endpoint = %self.endpoint, ?request, "requesting fare estimate");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        interpret_response(status, &body)
    }
}

fn predict_url(base: &str) -> Result<Url, url::ParseError> {
    let mut base_url = Url::parse(base)?;
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url.join(PREDICT_PATH)
}

fn interpret_response(status: StatusCode, body: &str) -> Result<f64, EstimateError> {
    if !status.is_success() {
        return Err(EstimateError::Rejected {
            status: status.as_u16(),
            detail: parse_error_detail(body),
        });
    }

    serde_json::from_str::<PredictionDto>(body)
        .map(|dto| dto.prediction)
        .map_err(|err| EstimateError::Malformed(err.to_string()))
}

fn parse_error_detail(body: &str) -> Option<ErrorDetail> {
    serde_json::from_str::<ErrorDto>(body)
        .ok()
        .and_then(|dto| dto.message)
        .filter(|message| !message.is_empty())
        .map(|message| ErrorDetail { message })
}
