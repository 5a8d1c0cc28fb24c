//! Async driver for one predictor form.
//!
//! The form lock is never held across the service call, so edits and further
//! submissions stay possible while a request is in flight. Only the latest
//! submission's settlement is applied.

use tokio::sync::Mutex;

use crate::domain::{
    project, FieldError, PredictorForm, RequestOutcome, ResultView, SubmitError, TripField,
};
use crate::infra::{EstimateRequest, EstimationService};

pub struct PredictorSession<S> {
    form: Mutex<PredictorForm>,
    service: S,
}

impl<S: EstimationService> PredictorSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            form: Mutex::new(PredictorForm::new()),
            service,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn set_field(&self, field: TripField, raw: &str) -> Result<(), FieldError> {
        self.form.lock().await.set_field(field, raw)
    }

    pub async fn is_complete(&self) -> bool {
        self.form.lock().await.is_complete()
    }

    pub async fn can_submit(&self) -> bool {
        self.form.lock().await.can_submit()
    }

    pub async fn outcome(&self) -> RequestOutcome {
        self.form.lock().await.outcome().clone()
    }

    pub async fn view(&self) -> ResultView {
        let form = self.form.lock().await;
        project(form.outcome(), form.query())
    }

    /// Submits the current trip and waits for its settlement.
    ///
    /// Service failures end up in [`RequestOutcome::Failed`]; the only error
    /// returned here is an incomplete trip. The returned outcome is the form's
    /// outcome after settling, which belongs to a newer submission if this one
    /// was superseded.
    pub async fn submit(&self) -> Result<RequestOutcome, SubmitError> {
        let submission = self.form.lock().await.begin_submission()?;
        let request = EstimateRequest::from(&submission.trip);
        tracing::info!(
            seq = submission.seq,
            route = %submission.trip.route_label(),
            "submitting trip for estimation"
        );

        let result = self.service.estimate(&request).await;
        let settlement = match result {
            Ok(price) => {
                tracing::info!(seq = submission.seq, price, "estimate received");
                Ok(price)
            }
            Err(err) => {
                tracing::warn!(seq = submission.seq, error = %err, "estimation failed");
                Err(err.user_message())
            }
        };

        let mut form = self.form.lock().await;
        if !form.settle(submission.seq, settlement) {
            tracing::debug!(
                seq = submission.seq,
                latest = form.latest_seq(),
                "discarding stale settlement"
            );
        }
        Ok(form.outcome().clone())
    }
}
