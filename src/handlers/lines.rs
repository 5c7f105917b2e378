// Line management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Json, Response},
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::respond;
use crate::api_models::{
    ApiResponse, CreateLineRequest, LineResponse, SectionRequest, UpdateLineRequest,
};
use crate::error::AppError;
use crate::middleware::Invocation;
use crate::models::{Line, Section};
use crate::repository::SubwayRepository;
use crate::server::AppState;

async fn line_to_response(repository: &SubwayRepository, line: Line) -> LineResponse {
    let stations = repository.line_stations(&line).await;
    LineResponse::new(line, stations)
}

pub async fn create_line(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLineRequest>,
) -> Response {
    let invocation = Invocation::new(module_path!(), "create_line").arg(&payload);

    let outcome = state
        .logging
        .intercept(invocation, async {
            payload.validate()?;
            let first = Section {
                up_station_id: payload.up_station_id,
                down_station_id: payload.down_station_id,
                distance: payload.distance,
            };
            let line = state
                .repository
                .create_line(payload.name.clone(), payload.color.clone(), first)
                .await?;
            let response = line_to_response(&state.repository, line).await;

            Ok::<_, AppError>((StatusCode::CREATED, Json(ApiResponse::success(response))))
        })
        .await;

    respond(outcome)
}

pub async fn list_lines(State(state): State<Arc<AppState>>) -> Response {
    let invocation = Invocation::new(module_path!(), "list_lines");

    let outcome = state
        .logging
        .intercept(invocation, async {
            let mut responses = Vec::new();
            for line in state.repository.list_lines().await {
                responses.push(line_to_response(&state.repository, line).await);
            }

            Ok::<_, AppError>(Json(ApiResponse::success(responses)))
        })
        .await;

    respond(outcome)
}

pub async fn get_line(
    State(state): State<Arc<AppState>>,
    Path(line_id): Path<Uuid>,
) -> Response {
    let invocation = Invocation::new(module_path!(), "get_line").display_arg(&line_id);

    let outcome = state
        .logging
        .intercept(invocation, async {
            let line = state.repository.get_line(line_id).await?;
            let response = line_to_response(&state.repository, line).await;

            Ok::<_, AppError>(Json(ApiResponse::success(response)))
        })
        .await;

    respond(outcome)
}

pub async fn update_line(
    State(state): State<Arc<AppState>>,
    Path(line_id): Path<Uuid>,
    Json(payload): Json<UpdateLineRequest>,
) -> Response {
    let invocation = Invocation::new(module_path!(), "update_line")
        .display_arg(&line_id)
        .arg(&payload);

    let outcome = state
        .logging
        .intercept(invocation, async {
            payload.validate()?;
            let line = state
                .repository
                .update_line(line_id, payload.name.clone(), payload.color.clone())
                .await?;
            let response = line_to_response(&state.repository, line).await;

            Ok::<_, AppError>(Json(ApiResponse::success(response)))
        })
        .await;

    respond(outcome)
}

pub async fn delete_line(
    State(state): State<Arc<AppState>>,
    Path(line_id): Path<Uuid>,
) -> Response {
    let invocation = Invocation::new(module_path!(), "delete_line").display_arg(&line_id);

    let outcome = state
        .logging
        .intercept(invocation, async {
            state.repository.delete_line(line_id).await?;
            Ok::<_, AppError>(StatusCode::NO_CONTENT)
        })
        .await;

    respond(outcome)
}

pub async fn add_section(
    State(state): State<Arc<AppState>>,
    Path(line_id): Path<Uuid>,
    Json(payload): Json<SectionRequest>,
) -> Response {
    let invocation = Invocation::new(module_path!(), "add_section")
        .display_arg(&line_id)
        .arg(&payload);

    let outcome = state
        .logging
        .intercept(invocation, async {
            payload.validate()?;
            let section = Section {
                up_station_id: payload.up_station_id,
                down_station_id: payload.down_station_id,
                distance: payload.distance,
            };
            let line = state.repository.add_section(line_id, section).await?;
            let response = line_to_response(&state.repository, line).await;

            Ok::<_, AppError>((StatusCode::CREATED, Json(ApiResponse::success(response))))
        })
        .await;

    respond(outcome)
}
