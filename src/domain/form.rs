//! Synchronous half of the request lifecycle: field edits, the submit gate
//! and settlement bookkeeping. The async driver lives in [`crate::session`].

use thiserror::Error;
use time::Date;

use super::outcome::RequestOutcome;
use super::trip::{today_utc, CompleteTrip, FieldError, TripField, TripQuery};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("cannot submit an incomplete trip, missing: {}", join_fields(.missing))]
    Incomplete { missing: Vec<TripField> },
}

fn join_fields(fields: &[TripField]) -> String {
    fields
        .iter()
        .map(TripField::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A request that has been issued and not yet settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Submission {
    pub seq: u64,
    pub trip: CompleteTrip,
}

#[derive(Clone, Debug, Default)]
pub struct PredictorForm {
    query: TripQuery,
    outcome: RequestOutcome,
    /// Highest sequence number handed out so far.
    latest_seq: u64,
    /// Sequence number of the submission whose settlement will be applied.
    in_flight: Option<u64>,
}

impl PredictorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &TripQuery {
        &self.query
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    pub fn set_field(&mut self, field: TripField, raw: &str) -> Result<(), FieldError> {
        self.set_field_on(field, raw, today_utc())
    }

    /// Applies one field edit. A settled result is dropped back to `Idle`;
    /// an in-flight request keeps running.
    pub fn set_field_on(
        &mut self,
        field: TripField,
        raw: &str,
        today: Date,
    ) -> Result<(), FieldError> {
        self.query.set_field_on(field, raw, today)?;
        if self.outcome.is_settled() {
            self.outcome = RequestOutcome::Idle;
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.query.is_complete()
    }

    /// Whether the "predict" action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.is_complete() && !self.outcome.is_pending()
    }

    /// Moves to `Pending` and hands out the next sequence number. Any earlier
    /// in-flight submission is superseded.
    pub fn begin_submission(&mut self) -> Result<Submission, SubmitError> {
        let trip = self.query.complete().ok_or_else(|| SubmitError::Incomplete {
            missing: self.query.missing_fields(),
        })?;

        self.latest_seq += 1;
        let submission = Submission {
            seq: self.latest_seq,
            trip,
        };
        self.in_flight = Some(submission.seq);
        self.outcome = RequestOutcome::Pending;
        Ok(submission)
    }

    /// Applies a settlement for `seq`. Returns `false` and changes nothing when
    /// `seq` is not the latest in-flight submission.
    pub fn settle(&mut self, seq: u64, result: Result<f64, String>) -> bool {
        if self.in_flight != Some(seq) {
            return false;
        }

        self.in_flight = None;
        self.outcome = match result {
            Ok(price_estimate) => RequestOutcome::Succeeded { price_estimate },
            Err(message) => RequestOutcome::Failed { message },
        };
        true
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 05 - 20);

    fn complete_form() -> PredictorForm {
        let mut form = PredictorForm::new();
        for (field, raw) in [
            (TripField::Airline, "Indigo"),
            (TripField::SourceCity, "Delhi"),
            (TripField::DepartureTime, "Morning"),
            (TripField::Stops, "zero"),
            (TripField::ArrivalTime, "Evening"),
            (TripField::DestinationCity, "Mumbai"),
            (TripField::Class, "Economy"),
            (TripField::DepartureDate, "2024-06-01"),
        ] {
            form.set_field_on(field, raw, TODAY).unwrap();
        }
        form
    }

    #[test]
    fn incomplete_submission_is_rejected_without_side_effects() {
        let mut form = PredictorForm::new();
        form.set_field_on(TripField::Airline, "Indigo", TODAY).unwrap();

        let err = form.begin_submission().unwrap_err();
        let SubmitError::Incomplete { missing } = err;
        assert_eq!(missing.len(), 7);
        assert!(!missing.contains(&TripField::Airline));
        assert_eq!(form.outcome(), &RequestOutcome::Idle);
        assert_eq!(form.latest_seq(), 0);
        assert!(!form.can_submit());
    }

    #[test]
    fn success_settles_with_the_service_price() {
        let mut form = complete_form();
        let submission = form.begin_submission().unwrap();
        assert!(form.outcome().is_pending());
        assert!(!form.can_submit());

        assert!(form.settle(submission.seq, Ok(4567.8)));
        assert_eq!(
            form.outcome(),
            &RequestOutcome::Succeeded {
                price_estimate: 4567.8,
            }
        );
        assert!(form.can_submit());
    }

    #[test]
    fn failure_keeps_the_form_usable() {
        let mut form = complete_form();
        let submission = form.begin_submission().unwrap();
        form.settle(submission.seq, Err("Service unavailable".into()));

        assert_eq!(form.outcome().error_message(), Some("Service unavailable"));
        assert!(form.is_complete());
        assert!(form.can_submit());

        let retry = form.begin_submission().unwrap();
        assert_eq!(retry.seq, submission.seq + 1);
        assert!(form.outcome().is_pending());
    }

    #[test]
    fn edits_reset_settled_outcomes_but_not_pending() {
        let mut form = complete_form();
        let first = form.begin_submission().unwrap();

        form.set_field_on(TripField::Class, "Business", TODAY).unwrap();
        assert!(form.outcome().is_pending());

        form.settle(first.seq, Ok(100.0));
        form.set_field_on(TripField::Class, "Economy", TODAY).unwrap();
        assert_eq!(form.outcome(), &RequestOutcome::Idle);

        let second = form.begin_submission().unwrap();
        form.settle(second.seq, Err("boom".into()));
        form.set_field_on(TripField::Stops, "one", TODAY).unwrap();
        assert_eq!(form.outcome(), &RequestOutcome::Idle);
    }

    #[test]
    fn rejected_edit_keeps_the_result() {
        let mut form = complete_form();
        let submission = form.begin_submission().unwrap();
        form.settle(submission.seq, Ok(100.0));

        assert!(form.set_field_on(TripField::Stops, "three", TODAY).is_err());
        assert_eq!(form.outcome().price_estimate(), Some(100.0));
    }

    #[test]
    fn stale_settlements_are_discarded_in_either_order() {
        let mut form = complete_form();
        let older = form.begin_submission().unwrap();
        let newer = form.begin_submission().unwrap();

        assert!(!form.settle(older.seq, Ok(1.0)));
        assert!(form.outcome().is_pending());
        assert!(form.settle(newer.seq, Ok(2.0)));
        assert_eq!(form.outcome().price_estimate(), Some(2.0));

        let older = form.begin_submission().unwrap();
        let newer = form.begin_submission().unwrap();
        assert!(form.settle(newer.seq, Err("late".into())));
        assert!(!form.settle(older.seq, Ok(3.0)));
        assert_eq!(form.outcome().error_message(), Some("late"));
    }
}
