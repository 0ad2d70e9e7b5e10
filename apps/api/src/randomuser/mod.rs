/// RandomUser proxy: fetch one upstream payload, validate it, and reshape the
/// first person for each `/random-*` endpoint.
use thiserror::Error;

pub mod client;
pub mod handlers;
pub mod schema;
pub mod shaping;

use crate::validation::ValidationFailure;
use client::{FetchError, PersonSource};
use schema::{validate_random_user_response, Person};
use shaping::DateParseError;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid upstream payload: {0}")]
    Invalid(#[from] ValidationFailure),

    #[error(transparent)]
    Date(#[from] DateParseError),
}

/// Fetches a payload from `source` and returns its validated first record.
pub async fn fetch_person(source: &dyn PersonSource) -> Result<Person, UpstreamError> {
    let raw = source.fetch().await?;
    let response = validate_random_user_response(&raw)?;
    // Validation rejects an empty `results`, so there is always a first record.
    response.into_first().ok_or_else(|| {
        ValidationFailure::single("results", "Array must contain at least 1 element(s)").into()
    })
}
