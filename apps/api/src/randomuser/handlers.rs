use axum::{extract::State, Json};

use crate::errors::{AppError, Resource};
use crate::randomuser::fetch_person;
use crate::randomuser::shaping::{
    address_view, login_view, person_view, AddressView, LoginView, PersonView,
};
use crate::state::AppState;

/// GET /random-person
pub async fn handle_random_person(
    State(state): State<AppState>,
) -> Result<Json<PersonView>, AppError> {
    let person = fetch_person(state.people.as_ref())
        .await
        .map_err(|e| AppError::upstream(Resource::Person, e))?;
    Ok(Json(person_view(&person)))
}

/// GET /random-address
pub async fn handle_random_address(
    State(state): State<AppState>,
) -> Result<Json<AddressView>, AppError> {
    let person = fetch_person(state.people.as_ref())
        .await
        .map_err(|e| AppError::upstream(Resource::Address, e))?;
    Ok(Json(address_view(&person)))
}

/// GET /random-login
pub async fn handle_random_login(
    State(state): State<AppState>,
) -> Result<Json<LoginView>, AppError> {
    let person = fetch_person(state.people.as_ref())
        .await
        .map_err(|e| AppError::upstream(Resource::Login, e))?;
    let login = login_view(&person).map_err(|e| AppError::upstream(Resource::Login, e.into()))?;
    Ok(Json(login))
}
