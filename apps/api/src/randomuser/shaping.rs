use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::randomuser::schema::Person;

#[derive(Debug, Error)]
#[error("unparseable registration date '{date}': {source}")]
pub struct DateParseError {
    pub date: String,
    #[source]
    pub source: chrono::ParseError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
    pub full_name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressView {
    pub city: String,
    pub postcode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    pub username: String,
    pub registered_date: String,
    pub summary: String,
}

pub fn person_view(person: &Person) -> PersonView {
    PersonView {
        full_name: format!("{} {}", person.name.first, person.name.last),
        country: person.location.country.clone(),
    }
}

pub fn address_view(person: &Person) -> AddressView {
    AddressView {
        city: person.location.city.clone(),
        postcode: person.location.postcode.to_string(),
    }
}

pub fn login_view(person: &Person) -> Result<LoginView, DateParseError> {
    let registered_date = registration_day(&person.registered.date)?;
    let username = person.login.username.clone();
    Ok(LoginView {
        summary: format!("{username} (registered on {registered_date})"),
        username,
        registered_date,
    })
}

/// `YYYY-MM-DD` of the UTC calendar day the timestamp falls on.
///
/// Accepts full RFC 3339 timestamps, offset-less date-times (taken as UTC)
/// and bare dates.
fn registration_day(date: &str) -> Result<String, DateParseError> {
    let day = match DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed.with_timezone(&Utc).date_naive(),
        Err(source) => NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.date())
            .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
            .map_err(|_| DateParseError {
                date: date.to_string(),
                source,
            })?,
    };
    Ok(day.format("%Y-%m-%d").to_string())
}
