// src/handlers/branch.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::branch::{Branch, CreateBranchPayload},
};

// POST /api/branches
#[utoipa::path(
    post,
    path = "/api/branches",
    tag = "Branches",
    request_body = CreateBranchPayload,
    responses(
        (status = 201, description = "Filial criada", body = Branch)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_branch(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateBranchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let branch = app_state
        .branch_repo
        .create(&app_state.db_pool, &payload.name, payload.address.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(branch)))
}

// GET /api/branches
#[utoipa::path(
    get,
    path = "/api/branches",
    tag = "Branches",
    responses(
        (status = 200, description = "Filiais cadastradas", body = Vec<Branch>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_branches(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let branches = app_state.branch_repo.list(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(branches)))
}
