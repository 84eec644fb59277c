// src/handlers/leave.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::leave::{
        AllocateBalancePayload, CreateLeaveRequestPayload, CreateLeaveTypePayload, LeaveBalance,
        LeaveRequest, LeaveStatus, LeaveType, ReviewLeavePayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LeaveListParams {
    pub staff_id: Option<String>,
    pub status: Option<LeaveStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BalanceParams {
    #[param(example = 2025)]
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevokeLeavePayload {
    pub note: Option<String>,
}

// POST /api/leaves
#[utoipa::path(
    post,
    path = "/api/leaves",
    tag = "Leaves",
    request_body = CreateLeaveRequestPayload,
    responses(
        (status = 201, description = "Pedido de licença criado", body = LeaveRequest),
        (status = 409, description = "Saldo insuficiente ou ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateLeaveRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let request = app_state.leave_service.request(&user, &payload).await?;

    Ok((StatusCode::CREATED, Json(request)))
}

// GET /api/leaves
#[utoipa::path(
    get,
    path = "/api/leaves",
    tag = "Leaves",
    params(LeaveListParams),
    responses(
        (status = 200, description = "Pedidos de licença (admins veem todos; os demais, só os próprios)", body = Vec<LeaveRequest>),
        (status = 400, description = "Filtro malformado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_requests(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(params): Query<LeaveListParams>,
) -> Result<impl IntoResponse, AppError> {
    let staff_id = params
        .staff_id
        .as_deref()
        .map(|raw| {
            Uuid::parse_str(raw)
                .map_err(|_| AppError::InvalidIdentifier(format!("staffId '{}'", raw)))
        })
        .transpose()?;

    let requests = app_state
        .leave_service
        .list_requests_for(&user, staff_id, params.status)
        .await?;

    Ok((StatusCode::OK, Json(requests)))
}

// PUT /api/leaves/{id}/review
#[utoipa::path(
    put,
    path = "/api/leaves/{id}/review",
    tag = "Leaves",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = ReviewLeavePayload,
    responses(
        (status = 200, description = "Pedido revisado; saldo debitado na mesma transação", body = LeaveRequest),
        (status = 409, description = "Pedido não está pendente ou saldo insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn review_request(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewLeavePayload>,
) -> Result<impl IntoResponse, AppError> {
    let request = app_state.leave_service.review(id, &user, &payload).await?;
    Ok((StatusCode::OK, Json(request)))
}

// PUT /api/leaves/{id}/revoke
#[utoipa::path(
    put,
    path = "/api/leaves/{id}/revoke",
    tag = "Leaves",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = RevokeLeavePayload,
    responses(
        (status = 200, description = "Aprovação revogada; dias devolvidos ao saldo", body = LeaveRequest),
        (status = 409, description = "Pedido não está aprovado")
    ),
    security(("api_jwt" = []))
)]
pub async fn revoke_request(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RevokeLeavePayload>,
) -> Result<impl IntoResponse, AppError> {
    let request = app_state
        .leave_service
        .revoke(id, &user, payload.note.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(request)))
}

// GET /api/leaves/balance
#[utoipa::path(
    get,
    path = "/api/leaves/balance",
    tag = "Leaves",
    params(BalanceParams),
    responses(
        (status = 200, description = "Saldos do funcionário autenticado", body = Vec<LeaveBalance>)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_balances(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(params): Query<BalanceParams>,
) -> Result<impl IntoResponse, AppError> {
    let balances = app_state.leave_service.my_balances(&user, params.year).await?;
    Ok((StatusCode::OK, Json(balances)))
}

// POST /api/leaves/balance/allocate
#[utoipa::path(
    post,
    path = "/api/leaves/balance/allocate",
    tag = "Leaves",
    request_body = AllocateBalancePayload,
    responses(
        (status = 200, description = "Saldo alocado", body = LeaveBalance),
        (status = 404, description = "Funcionário ou tipo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn allocate_balance(
    State(app_state): State<AppState>,
    Json(payload): Json<AllocateBalancePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let balance = app_state.leave_service.allocate_balance(&payload).await?;

    Ok((StatusCode::OK, Json(balance)))
}

// POST /api/leaves/types
#[utoipa::path(
    post,
    path = "/api/leaves/types",
    tag = "Leaves",
    request_body = CreateLeaveTypePayload,
    responses(
        (status = 201, description = "Tipo de licença criado", body = LeaveType),
        (status = 409, description = "Nome já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_type(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateLeaveTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let leave_type = app_state.leave_service.create_type(&payload).await?;

    Ok((StatusCode::CREATED, Json(leave_type)))
}

// GET /api/leaves/types
#[utoipa::path(
    get,
    path = "/api/leaves/types",
    tag = "Leaves",
    responses(
        (status = 200, description = "Tipos de licença", body = Vec<LeaveType>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_types(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let types = app_state.leave_service.list_types().await?;
    Ok((StatusCode::OK, Json(types)))
}
