// Station management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Json, Response},
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::respond;
use crate::api_models::{ApiResponse, CreateStationRequest, StationResponse};
use crate::error::AppError;
use crate::middleware::Invocation;
use crate::server::AppState;

pub async fn create_station(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateStationRequest>,
) -> Response {
    let invocation = Invocation::new(module_path!(), "create_station").arg(&payload);

    let outcome = state
        .logging
        .intercept(invocation, async {
            payload.validate()?;
            let station = state.repository.create_station(payload.name.clone()).await?;

            Ok::<_, AppError>((
                StatusCode::CREATED,
                Json(ApiResponse::success(StationResponse::from(station))),
            ))
        })
        .await;

    respond(outcome)
}

pub async fn list_stations(State(state): State<Arc<AppState>>) -> Response {
    let invocation = Invocation::new(module_path!(), "list_stations");

    let outcome = state
        .logging
        .intercept(invocation, async {
            let stations: Vec<StationResponse> = state
                .repository
                .list_stations()
                .await
                .into_iter()
                .map(StationResponse::from)
                .collect();

            Ok::<_, AppError>(Json(ApiResponse::success(stations)))
        })
        .await;

    respond(outcome)
}

pub async fn delete_station(
    State(state): State<Arc<AppState>>,
    Path(station_id): Path<Uuid>,
) -> Response {
    let invocation = Invocation::new(module_path!(), "delete_station").display_arg(&station_id);

    let outcome = state
        .logging
        .intercept(invocation, async {
            state.repository.delete_station(station_id).await?;
            Ok::<_, AppError>(StatusCode::NO_CONTENT)
        })
        .await;

    respond(outcome)
}
