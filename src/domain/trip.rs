//! Trip form fields and the static option lists behind them.
//!
//! Every option carries its wire value (what the estimation service expects)
//! and a human label for the breakdown view.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use time::{macros::format_description, Date, OffsetDateTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Airline {
    SpiceJet,
    AirAsia,
    Vistara,
    GoFirst,
    Indigo,
    AirIndia,
}

impl Airline {
    pub const ALL: [Airline; 6] = [
        Airline::SpiceJet,
        Airline::AirAsia,
        Airline::Vistara,
        Airline::GoFirst,
        Airline::Indigo,
        Airline::AirIndia,
    ];

    pub fn as_wire(&self) -> &'static str {
        match self {
            Airline::SpiceJet => "SpiceJet",
            Airline::AirAsia => "AirAsia",
            Airline::Vistara => "Vistara",
            Airline::GoFirst => "GO_FIRST",
            Airline::Indigo => "Indigo",
            Airline::AirIndia => "Air_India",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Airline::GoFirst => "GO FIRST",
            Airline::AirIndia => "Air India",
            other => other.as_wire(),
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|airline| airline.as_wire() == raw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum City {
    Delhi,
    Mumbai,
    Bangalore,
    Kolkata,
    Hyderabad,
    Chennai,
}

impl City {
    pub const ALL: [City; 6] = [
        City::Delhi,
        City::Mumbai,
        City::Bangalore,
        City::Kolkata,
        City::Hyderabad,
        City::Chennai,
    ];

    pub fn as_wire(&self) -> &'static str {
        match self {
            City::Delhi => "Delhi",
            City::Mumbai => "Mumbai",
            City::Bangalore => "Bangalore",
            City::Kolkata => "Kolkata",
            City::Hyderabad => "Hyderabad",
            City::Chennai => "Chennai",
        }
    }

    pub fn label(&self) -> &'static str {
        self.as_wire()
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|city| city.as_wire() == raw)
    }
}

/// Time-of-day bucket used for both departure and arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DayPart {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
    Night,
    LateNight,
}

impl DayPart {
    pub const ALL: [DayPart; 6] = [
        DayPart::EarlyMorning,
        DayPart::Morning,
        DayPart::Afternoon,
        DayPart::Evening,
        DayPart::Night,
        DayPart::LateNight,
    ];

    pub fn as_wire(&self) -> &'static str {
        match self {
            DayPart::EarlyMorning => "Early_Morning",
            DayPart::Morning => "Morning",
            DayPart::Afternoon => "Afternoon",
            DayPart::Evening => "Evening",
            DayPart::Night => "Night",
            DayPart::LateNight => "Late_Night",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|part| part.as_wire() == raw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stops {
    Zero,
    One,
    TwoOrMore,
}

impl Stops {
    pub const ALL: [Stops; 3] = [Stops::Zero, Stops::One, Stops::TwoOrMore];

    pub fn as_wire(&self) -> &'static str {
        match self {
            Stops::Zero => "zero",
            Stops::One => "one",
            Stops::TwoOrMore => "two_or_more",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stops::Zero => "Non-stop",
            Stops::One => "1 Stop",
            Stops::TwoOrMore => "2+ Stops",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stops| stops.as_wire() == raw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TravelClass {
    Economy,
    Business,
}

impl TravelClass {
    pub const ALL: [TravelClass; 2] = [TravelClass::Economy, TravelClass::Business];

    pub fn as_wire(&self) -> &'static str {
        match self {
            TravelClass::Economy => "Economy",
            TravelClass::Business => "Business",
        }
    }

    pub fn label(&self) -> &'static str {
        self.as_wire()
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.as_wire() == raw)
    }
}

/// Names of the eight form fields, keyed by their wire names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TripField {
    Airline,
    SourceCity,
    DepartureTime,
    Stops,
    ArrivalTime,
    DestinationCity,
    Class,
    DepartureDate,
}

impl TripField {
    pub const ALL: [TripField; 8] = [
        TripField::Airline,
        TripField::SourceCity,
        TripField::DepartureTime,
        TripField::Stops,
        TripField::ArrivalTime,
        TripField::DestinationCity,
        TripField::Class,
        TripField::DepartureDate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TripField::Airline => "airline",
            TripField::SourceCity => "source_city",
            TripField::DepartureTime => "departure_time",
            TripField::Stops => "stops",
            TripField::ArrivalTime => "arrival_time",
            TripField::DestinationCity => "destination_city",
            TripField::Class => "class",
            TripField::DepartureDate => "departure_date",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TripField::Airline => "Airline",
            TripField::SourceCity => "Source City",
            TripField::DepartureTime => "Departure Time",
            TripField::Stops => "Number of Stops",
            TripField::ArrivalTime => "Arrival Time",
            TripField::DestinationCity => "Destination City",
            TripField::Class => "Class",
            TripField::DepartureDate => "Departure Date",
        }
    }

    /// Wire values accepted by this field; empty for the free-form date.
    pub fn options(&self) -> Vec<&'static str> {
        match self {
            TripField::Airline => Airline::ALL.iter().map(Airline::as_wire).collect(),
            TripField::SourceCity | TripField::DestinationCity => {
                City::ALL.iter().map(City::as_wire).collect()
            }
            TripField::DepartureTime | TripField::ArrivalTime => {
                DayPart::ALL.iter().map(DayPart::as_wire).collect()
            }
            TripField::Stops => Stops::ALL.iter().map(Stops::as_wire).collect(),
            TripField::Class => TravelClass::ALL.iter().map(TravelClass::as_wire).collect(),
            TripField::DepartureDate => Vec::new(),
        }
    }
}

impl fmt::Display for TripField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TripField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("`{value}` is not a valid value for {field}")]
    UnknownOption { field: TripField, value: String },
    #[error("invalid departure date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("departure date {date} is before today ({today})")]
    DateInPast { date: String, today: String },
}

/// Mutable form state. Every field starts unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripQuery {
    airline: Option<Airline>,
    source_city: Option<City>,
    departure_time: Option<DayPart>,
    stops: Option<Stops>,
    arrival_time: Option<DayPart>,
    destination_city: Option<City>,
    class: Option<TravelClass>,
    departure_date: Option<Date>,
}

impl TripQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces one field from its raw wire value, checking the date against
    /// the current UTC day.
    pub fn set_field(&mut self, field: TripField, raw: &str) -> Result<(), FieldError> {
        self.set_field_on(field, raw, today_utc())
    }

    /// Same as [`TripQuery::set_field`] with an explicit "today".
    ///
    /// An empty value clears the field. Rejected values leave the query as it was.
    pub fn set_field_on(
        &mut self,
        field: TripField,
        raw: &str,
        today: Date,
    ) -> Result<(), FieldError> {
        if raw.is_empty() {
            self.clear(field);
            return Ok(());
        }

        match field {
            TripField::Airline => {
                self.airline = Some(parse_option(field, raw, Airline::from_wire)?)
            }
            TripField::SourceCity => {
                self.source_city = Some(parse_option(field, raw, City::from_wire)?)
            }
            TripField::DepartureTime => {
                self.departure_time = Some(parse_option(field, raw, DayPart::from_wire)?)
            }
            TripField::Stops => self.stops = Some(parse_option(field, raw, Stops::from_wire)?),
            TripField::ArrivalTime => {
                self.arrival_time = Some(parse_option(field, raw, DayPart::from_wire)?)
            }
            TripField::DestinationCity => {
                self.destination_city = Some(parse_option(field, raw, City::from_wire)?)
            }
            TripField::Class => {
                self.class = Some(parse_option(field, raw, TravelClass::from_wire)?)
            }
            TripField::DepartureDate => {
                self.departure_date = Some(parse_departure_date(raw, today)?)
            }
        }
        Ok(())
    }

    fn clear(&mut self, field: TripField) {
        match field {
            TripField::Airline => self.airline = None,
            TripField::SourceCity => self.source_city = None,
            TripField::DepartureTime => self.departure_time = None,
            TripField::Stops => self.stops = None,
            TripField::ArrivalTime => self.arrival_time = None,
            TripField::DestinationCity => self.destination_city = None,
            TripField::Class => self.class = None,
            TripField::DepartureDate => self.departure_date = None,
        }
    }

    pub fn is_set(&self, field: TripField) -> bool {
        match field {
            TripField::Airline => self.airline.is_some(),
            TripField::SourceCity => self.source_city.is_some(),
            TripField::DepartureTime => self.departure_time.is_some(),
            TripField::Stops => self.stops.is_some(),
            TripField::ArrivalTime => self.arrival_time.is_some(),
            TripField::DestinationCity => self.destination_city.is_some(),
            TripField::Class => self.class.is_some(),
            TripField::DepartureDate => self.departure_date.is_some(),
        }
    }

    /// Raw wire value of a field, empty when unset.
    pub fn value(&self, field: TripField) -> String {
        let wire = match field {
            TripField::Airline => self.airline.map(|v| v.as_wire()),
            TripField::SourceCity => self.source_city.map(|v| v.as_wire()),
            TripField::DepartureTime => self.departure_time.map(|v| v.as_wire()),
            TripField::Stops => self.stops.map(|v| v.as_wire()),
            TripField::ArrivalTime => self.arrival_time.map(|v| v.as_wire()),
            TripField::DestinationCity => self.destination_city.map(|v| v.as_wire()),
            TripField::Class => self.class.map(|v| v.as_wire()),
            TripField::DepartureDate => {
                return self.departure_date.map(format_date).unwrap_or_default()
            }
        };
        wire.unwrap_or_default().to_string()
    }

    pub fn is_complete(&self) -> bool {
        TripField::ALL.iter().all(|field| self.is_set(*field))
    }

    pub fn missing_fields(&self) -> Vec<TripField> {
        TripField::ALL
            .into_iter()
            .filter(|field| !self.is_set(*field))
            .collect()
    }

    /// Fully populated copy of the query, or `None` while anything is unset.
    pub fn complete(&self) -> Option<CompleteTrip> {
        Some(CompleteTrip {
            airline: self.airline?,
            source_city: self.source_city?,
            departure_time: self.departure_time?,
            stops: self.stops?,
            arrival_time: self.arrival_time?,
            destination_city: self.destination_city?,
            class: self.class?,
            departure_date: self.departure_date?,
        })
    }

    pub fn airline(&self) -> Option<Airline> {
        self.airline
    }

    pub fn source_city(&self) -> Option<City> {
        self.source_city
    }

    pub fn destination_city(&self) -> Option<City> {
        self.destination_city
    }

    pub fn stops(&self) -> Option<Stops> {
        self.stops
    }

    pub fn class(&self) -> Option<TravelClass> {
        self.class
    }
}

/// A trip query with every field present, as sent to the estimation service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompleteTrip {
    pub airline: Airline,
    pub source_city: City,
    pub departure_time: DayPart,
    pub stops: Stops,
    pub arrival_time: DayPart,
    pub destination_city: City,
    pub class: TravelClass,
    pub departure_date: Date,
}

impl CompleteTrip {
    pub fn route_label(&self) -> String {
        format!(
            "{} → {}",
            self.source_city.label(),
            self.destination_city.label()
        )
    }

    pub fn departure_date_iso(&self) -> String {
        format_date(self.departure_date)
    }
}

fn parse_option<T>(
    field: TripField,
    raw: &str,
    from_wire: fn(&str) -> Option<T>,
) -> Result<T, FieldError> {
    from_wire(raw).ok_or_else(|| FieldError::UnknownOption {
        field,
        value: raw.to_string(),
    })
}

fn parse_departure_date(raw: &str, today: Date) -> Result<Date, FieldError> {
    let date = Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| FieldError::InvalidDate(raw.to_string()))?;
    if date < today {
        return Err(FieldError::DateInPast {
            date: format_date(date),
            today: format_date(today),
        });
    }
    Ok(date)
}

/// ISO calendar date, e.g. `2024-06-01`.
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Current calendar day in UTC. Departure dates are checked against this.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}
