//! Maps the current outcome to what the result panel shows.

use super::outcome::RequestOutcome;
use super::trip::TripQuery;

pub const CURRENCY_GLYPH: &str = "₹";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultView {
    Empty,
    Loading,
    Error(String),
    Prediction(PredictionView),
}

/// Estimated price plus the echoed trip breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionView {
    pub price: i64,
    pub price_label: String,
    pub airline: String,
    pub route: String,
    pub class: String,
    pub stops: String,
}

/// Projects `outcome` against the query as it stands now. Breakdown labels of
/// fields cleared since submission are empty.
pub fn project(outcome: &RequestOutcome, query: &TripQuery) -> ResultView {
    match outcome {
        RequestOutcome::Idle => ResultView::Empty,
        RequestOutcome::Pending => ResultView::Loading,
        RequestOutcome::Failed { message } => ResultView::Error(message.clone()),
        RequestOutcome::Succeeded { price_estimate } => {
            let price = round_price(*price_estimate);
            ResultView::Prediction(PredictionView {
                price,
                price_label: format_price(price),
                airline: label_or_empty(query.airline().map(|v| v.label())),
                route: format!(
                    "{} → {}",
                    label_or_empty(query.source_city().map(|v| v.label())),
                    label_or_empty(query.destination_city().map(|v| v.label()))
                ),
                class: label_or_empty(query.class().map(|v| v.label())),
                stops: label_or_empty(query.stops().map(|v| v.label())),
            })
        }
    }
}

fn label_or_empty(label: Option<&'static str>) -> String {
    label.unwrap_or_default().to_string()
}

/// Nearest whole unit; non-finite estimates collapse to zero.
pub fn round_price(estimate: f64) -> i64 {
    if estimate.is_finite() {
        estimate.round() as i64
    } else {
        0
    }
}

/// `₹` followed by the amount grouped in thousands, e.g. `₹12,345`.
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0 { "-" } else { "" };
    format!("{sign}{CURRENCY_GLYPH}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::TripField;
    use time::macros::date;

    fn query() -> TripQuery {
        let mut query = TripQuery::new();
        for (field, raw) in [
            (TripField::Airline, "Indigo"),
            (TripField::SourceCity, "Delhi"),
            (TripField::DepartureTime, "Morning"),
            (TripField::Stops, "zero"),
            (TripField::ArrivalTime, "Evening"),
            (TripField::DestinationCity, "Mumbai"),
            (TripField::Class, "Economy"),
            (TripField::DepartureDate, "2030-01-15"),
        ] {
            query.set_field_on(field, raw, date!(2030 - 01 - 01)).unwrap();
        }
        query
    }

    #[test]
    fn success_projects_rounded_price_and_breakdown() {
        let view = project(
            &RequestOutcome::Succeeded {
                price_estimate: 4567.8,
            },
            &query(),
        );
        assert_eq!(
            view,
            ResultView::Prediction(PredictionView {
                price: 4568,
                price_label: "₹4,568".into(),
                airline: "Indigo".into(),
                route: "Delhi → Mumbai".into(),
                class: "Economy".into(),
                stops: "Non-stop".into(),
            })
        );
    }

    #[test]
    fn breakdown_follows_the_current_query() {
        let mut query = query();
        let today = date!(2030 - 01 - 01);
        query.set_field_on(TripField::Stops, "one", today).unwrap();
        query.set_field_on(TripField::Airline, "Air_India", today).unwrap();
        query.set_field_on(TripField::DestinationCity, "", today).unwrap();

        let ResultView::Prediction(view) = project(
            &RequestOutcome::Succeeded {
                price_estimate: 100.0,
            },
            &query,
        ) else {
            panic!("expected a prediction view");
        };
        assert_eq!(view.stops, "1 Stop");
        assert_eq!(view.airline, "Air India");
        assert_eq!(view.route, "Delhi → ");
    }

    #[test]
    fn non_success_states_project_without_a_price() {
        let query = query();
        assert_eq!(project(&RequestOutcome::Idle, &query), ResultView::Empty);
        assert_eq!(project(&RequestOutcome::Pending, &query), ResultView::Loading);
        assert_eq!(
            project(
                &RequestOutcome::Failed {
                    message: "nope".into()
                },
                &query
            ),
            ResultView::Error("nope".into())
        );
    }

    #[test]
    fn rounding_and_grouping() {
        assert_eq!(round_price(4567.4), 4567);
        assert_eq!(round_price(2.5), 3);
        assert_eq!(round_price(f64::NAN), 0);
        assert_eq!(format_price(0), "₹0");
        assert_eq!(format_price(999), "₹999");
        assert_eq!(format_price(1000), "₹1,000");
        assert_eq!(format_price(1234567), "₹1,234,567");
        assert_eq!(format_price(-4200), "-₹4,200");
    }
}
