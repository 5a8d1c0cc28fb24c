//! Trip form state, request lifecycle and result projection live here.

pub mod form;
pub mod outcome;
pub mod projection;
pub mod trip;

pub use form::{PredictorForm, Submission, SubmitError};
pub use outcome::RequestOutcome;
pub use projection::{format_price, project, round_price, PredictionView, ResultView};
pub use trip::{
    today_utc, Airline, City, CompleteTrip, DayPart, FieldError, Stops, TravelClass, TripField,
    TripQuery,
};
