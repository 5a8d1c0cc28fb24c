/// Lifecycle state of the most recent submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestOutcome {
    #[default]
    Idle,
    Pending,
    Succeeded { price_estimate: f64 },
    Failed { message: String },
}

impl RequestOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestOutcome::Pending)
    }

    /// True for `Succeeded` and `Failed`.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            RequestOutcome::Succeeded { .. } | RequestOutcome::Failed { .. }
        )
    }

    pub fn price_estimate(&self) -> Option<f64> {
        match self {
            RequestOutcome::Succeeded { price_estimate } => Some(*price_estimate),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestOutcome::Failed { message } => Some(message),
            _ => None,
        }
    }
}
