use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use http::{HeaderValue, Method, StatusCode, header};
use serde::Serialize;
use tracing::warn;

use crate::{
    core::{Project, ProjectInput},
    query::{ListParams, ProjectPage},
    web::{AppState, Result, WebError},
};

const LIST_FAILED: &str = "Could not load projects";
const GET_FAILED: &str = "Could not load the project";
const CREATE_FAILED: &str =
    "Could not create the project. Please check the data and try again.";
const UPDATE_FAILED: &str =
    "Could not update the project. Please check the data and try again.";
const DELETE_FAILED: &str = "Could not delete the project. Please try again.";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_projects(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ProjectPage>> {
    let Query(params) = query?;

    let page = state
        .service
        .list(&params)
        .await
        .map_err(|err| WebError::from_service(err, LIST_FAILED))?;

    Ok(Json(page))
}

pub async fn create_project(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProjectInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>)> {
    let Json(input) = payload?;

    let project = state
        .service
        .create(&input)
        .await
        .map_err(|err| WebError::from_service(err, CREATE_FAILED))?;

    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>> {
    let project = state
        .service
        .get(&id)
        .await
        .map_err(|err| WebError::from_service(err, GET_FAILED))?;

    Ok(Json(project))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProjectInput>, JsonRejection>,
) -> Result<Json<Project>> {
    let Json(input) = payload?;

    let project = state
        .service
        .update(&id, &input)
        .await
        .map_err(|err| WebError::from_service(err, UPDATE_FAILED))?;

    Ok(Json(project))
}

/// Every failure, including an unknown id, is reported as a 500.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    match state.service.delete(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(err) => {
            warn!(id = %id, error = %err, "project delete failed");
            Err(WebError::Internal(DELETE_FAILED.to_string()))
        }
    }
}

pub fn method_not_allowed(method: &Method, allowed: &[Method]) -> Response {
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut response = (
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {method} Not Allowed"),
    )
        .into_response();
    if let Ok(value) = HeaderValue::from_str(&allow) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}
