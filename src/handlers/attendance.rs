// src/handlers/attendance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::attendance::{AttendanceDay, UpdateAttendanceStatusPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AttendanceListParams {
    pub staff_id: Option<String>,

    #[param(example = "2025-08-01")]
    pub from: Option<NaiveDate>,

    #[param(example = "2025-08-31")]
    pub to: Option<NaiveDate>,
}

// POST /api/attendance/check-in
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    tag = "Attendance",
    responses(
        (status = 201, description = "Check-in registrado", body = AttendanceDay),
        (status = 409, description = "Check-in já registrado hoje")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_in(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let day = app_state.attendance_service.check_in(&user).await?;
    Ok((StatusCode::CREATED, Json(day)))
}

// POST /api/attendance/check-out
#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    tag = "Attendance",
    responses(
        (status = 200, description = "Check-out registrado", body = AttendanceDay),
        (status = 404, description = "Sem check-in hoje")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_out(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let day = app_state.attendance_service.check_out(&user).await?;
    Ok((StatusCode::OK, Json(day)))
}

// PUT /api/attendance/{id}/status
#[utoipa::path(
    put,
    path = "/api/attendance/{id}/status",
    tag = "Attendance",
    params(("id" = Uuid, Path, description = "ID do registro de presença")),
    request_body = UpdateAttendanceStatusPayload,
    responses(
        (status = 200, description = "Status corrigido", body = AttendanceDay),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAttendanceStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let day = app_state
        .attendance_service
        .update_status(id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(day)))
}

// GET /api/attendance
#[utoipa::path(
    get,
    path = "/api/attendance",
    tag = "Attendance",
    params(AttendanceListParams),
    responses(
        (status = 200, description = "Registros de presença", body = Vec<AttendanceDay>),
        (status = 400, description = "Filtro malformado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    Query(params): Query<AttendanceListParams>,
) -> Result<impl IntoResponse, AppError> {
    let staff_id = params
        .staff_id
        .as_deref()
        .map(|raw| {
            Uuid::parse_str(raw)
                .map_err(|_| AppError::InvalidIdentifier(format!("staffId '{}'", raw)))
        })
        .transpose()?;

    let days = app_state
        .attendance_service
        .list(staff_id, params.from, params.to)
        .await?;

    Ok((StatusCode::OK, Json(days)))
}
