use super::model::{CreateUserRequest, User};
use crate::app::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use restfault::{Exception, ValidJson};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/{id}", get(get_one).delete(delete))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, Exception> {
    Ok(Json(state.users.list().await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<User>, Exception> {
    Ok(Json(state.users.get(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<impl IntoResponse, Exception> {
    let user = state.users.create(req).await?;
    let location = format!("/users/{}", user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, Exception> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
