// src/handlers/shift.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::shift::{AssignShiftPayload, CreateShiftPayload, Shift, ShiftAssignment},
};

// POST /api/shifts
#[utoipa::path(
    post,
    path = "/api/shifts",
    tag = "Shifts",
    request_body = CreateShiftPayload,
    responses(
        (status = 201, description = "Turno criado", body = Shift),
        (status = 400, description = "Horários inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_shift(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateShiftPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let shift = app_state.shift_service.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(shift)))
}

// GET /api/shifts
#[utoipa::path(
    get,
    path = "/api/shifts",
    tag = "Shifts",
    responses(
        (status = 200, description = "Turnos cadastrados", body = Vec<Shift>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_shifts(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let shifts = app_state.shift_service.list().await?;
    Ok((StatusCode::OK, Json(shifts)))
}

// POST /api/shifts/assign
#[utoipa::path(
    post,
    path = "/api/shifts/assign",
    tag = "Shifts",
    request_body = AssignShiftPayload,
    responses(
        (status = 201, description = "Turno atribuído; a vigência anterior foi encerrada", body = ShiftAssignment),
        (status = 404, description = "Funcionário ou turno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_shift(
    State(app_state): State<AppState>,
    Json(payload): Json<AssignShiftPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let assignment = app_state.shift_service.assign(&payload).await?;

    Ok((StatusCode::CREATED, Json(assignment)))
}
