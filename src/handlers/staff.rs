// src/handlers/staff.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::staff::{
        CompleteProfilePayload, CreateStaffPayload, Department, EnrichedStaff, PageParams,
        ResetSalaryPinPayload, RosterFilters, RosterPage, SalaryHistory, SalaryView, SetSalaryPinPayload,
        Staff, StaffStatus, UpdateSalaryPayload, UpdateStaffPayload, ViewSalaryPayload,
    },
};

// A sacola de parâmetros do roster, tipada chave a chave. Os IDs chegam
// como texto para que um valor malformado vire 400 explícito, e não uma
// lista vazia silenciosa.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RosterQueryParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,

    #[param(example = "maria")]
    pub search: Option<String>,

    pub department: Option<Department>,
    pub designation: Option<String>,
    pub status: Option<StaffStatus>,

    pub branch_id: Option<String>,
    pub shift_id: Option<String>,

    pub exclude_admins: Option<bool>,
}

impl RosterQueryParams {
    fn filters(&self) -> Result<RosterFilters, AppError> {
        let branch_id = self
            .branch_id
            .as_deref()
            .map(|raw| {
                Uuid::parse_str(raw)
                    .map_err(|_| AppError::InvalidIdentifier(format!("branchId '{}'", raw)))
            })
            .transpose()?;

        let shift_id = self
            .shift_id
            .as_deref()
            .map(|raw| {
                Uuid::parse_str(raw)
                    .map_err(|_| AppError::InvalidIdentifier(format!("shiftId '{}'", raw)))
            })
            .transpose()?;

        Ok(RosterFilters {
            // Busca vazia é o mesmo que busca nenhuma.
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
            department: self.department,
            designation: self
                .designation
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
            status: self.status,
            branch_id,
            shift_id,
            exclude_admins: self.exclude_admins.unwrap_or(false),
        })
    }
}

// GET /api/staffs
#[utoipa::path(
    get,
    path = "/api/staffs",
    tag = "Staffs",
    params(RosterQueryParams),
    responses(
        (status = 200, description = "Página do roster com total consistente", body = RosterPage),
        (status = 400, description = "Filtro malformado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_staffs(
    State(app_state): State<AppState>,
    Query(params): Query<RosterQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let filters = params.filters()?;
    let page = PageParams::sanitized(params.page, params.limit);

    let roster = app_state.staff_service.roster(&filters, &page).await?;

    Ok((StatusCode::OK, Json(roster)))
}

// GET /api/staffs/{id}
#[utoipa::path(
    get,
    path = "/api/staffs/{id}",
    tag = "Staffs",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário enriquecido", body = EnrichedStaff),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_staff(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let staff = app_state.staff_service.detail(id).await?;
    Ok((StatusCode::OK, Json(staff)))
}

// POST /api/staffs
#[utoipa::path(
    post,
    path = "/api/staffs",
    tag = "Staffs",
    request_body = CreateStaffPayload,
    responses(
        (status = 201, description = "Funcionário criado", body = Staff),
        (status = 409, description = "staffId ou telefone duplicado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_staff(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateStaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let staff = app_state.staff_service.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(staff)))
}

// PUT /api/staffs/{id}
#[utoipa::path(
    put,
    path = "/api/staffs/{id}",
    tag = "Staffs",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = UpdateStaffPayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = Staff),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_staff(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let staff = app_state.staff_service.update(id, &payload).await?;

    Ok((StatusCode::OK, Json(staff)))
}

// POST /api/staffs/profile/complete
#[utoipa::path(
    post,
    path = "/api/staffs/profile/complete",
    tag = "Staffs",
    request_body = CompleteProfilePayload,
    responses(
        (status = 200, description = "Perfil concluído", body = Staff),
        (status = 409, description = "Perfil já concluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn complete_profile(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CompleteProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let staff = app_state
        .staff_service
        .complete_profile(&user, &payload)
        .await?;

    Ok((StatusCode::OK, Json(staff)))
}

// PUT /api/staffs/{id}/salary
#[utoipa::path(
    put,
    path = "/api/staffs/{id}/salary",
    tag = "Salary",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = UpdateSalaryPayload,
    responses(
        (status = 200, description = "Salário atualizado com trilha de auditoria", body = SalaryHistory),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_salary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalaryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .staff_service
        .update_salary(id, &payload, user.id)
        .await?;

    Ok((StatusCode::OK, Json(entry)))
}

// GET /api/staffs/{id}/salary/history
#[utoipa::path(
    get,
    path = "/api/staffs/{id}/salary/history",
    tag = "Salary",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Histórico de salários, mais recente primeiro", body = Vec<SalaryHistory>)
    ),
    security(("api_jwt" = []))
)]
pub async fn salary_history(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.staff_service.salary_history(id).await?;
    Ok((StatusCode::OK, Json(entries)))
}

// POST /api/staffs/salary/view
#[utoipa::path(
    post,
    path = "/api/staffs/salary/view",
    tag = "Salary",
    request_body = ViewSalaryPayload,
    responses(
        (status = 200, description = "Salário do próprio funcionário", body = SalaryView),
        (status = 403, description = "Visibilidade desligada ou PIN incorreto")
    ),
    security(("api_jwt" = []))
)]
pub async fn view_salary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ViewSalaryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let view = app_state.staff_service.view_salary(&user, &payload.pin).await?;

    Ok((StatusCode::OK, Json(view)))
}

// POST /api/staffs/salary/pin
#[utoipa::path(
    post,
    path = "/api/staffs/salary/pin",
    tag = "Salary",
    request_body = SetSalaryPinPayload,
    responses(
        (status = 204, description = "PIN configurado"),
        (status = 409, description = "PIN já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_salary_pin(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<SetSalaryPinPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .staff_service
        .set_salary_pin(&user, &payload.pin)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/staffs/salary/pin/forgot
#[utoipa::path(
    post,
    path = "/api/staffs/salary/pin/forgot",
    tag = "Salary",
    responses(
        (status = 204, description = "Token de redefinição gerado")
    ),
    security(("api_jwt" = []))
)]
pub async fn forgot_salary_pin(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    app_state.staff_service.forgot_salary_pin(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/staffs/salary/pin/reset
#[utoipa::path(
    post,
    path = "/api/staffs/salary/pin/reset",
    tag = "Salary",
    request_body = ResetSalaryPinPayload,
    responses(
        (status = 204, description = "PIN redefinido"),
        (status = 403, description = "Token inválido ou expirado")
    ),
    security(("api_jwt" = []))
)]
pub async fn reset_salary_pin(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ResetSalaryPinPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .staff_service
        .reset_salary_pin(&user, &payload.token, &payload.new_pin)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_with(branch_id: Option<&str>, shift_id: Option<&str>) -> RosterQueryParams {
        RosterQueryParams {
            page: None,
            limit: None,
            search: None,
            department: None,
            designation: None,
            status: None,
            branch_id: branch_id.map(str::to_owned),
            shift_id: shift_id.map(str::to_owned),
            exclude_admins: None,
        }
    }

    #[test]
    fn malformed_ids_fail_with_explicit_client_error() {
        let err = params_with(Some("nao-e-uuid"), None).filters().unwrap_err();
        assert!(matches!(err, AppError::InvalidIdentifier(_)));

        let err = params_with(None, Some("123")).filters().unwrap_err();
        assert!(matches!(err, AppError::InvalidIdentifier(_)));
    }

    #[test]
    fn blank_search_and_designation_are_dropped() {
        let mut params = params_with(None, None);
        params.search = Some("   ".to_string());
        params.designation = Some("".to_string());

        let filters = params.filters().unwrap();
        assert!(filters.search.is_none());
        assert!(filters.designation.is_none());
    }

    #[test]
    fn well_formed_ids_are_parsed() {
        let id = Uuid::new_v4();
        let params = params_with(Some(&id.to_string()), None);
        let filters = params.filters().unwrap();
        assert_eq!(filters.branch_id, Some(id));
        assert!(!filters.exclude_admins);
    }
}
