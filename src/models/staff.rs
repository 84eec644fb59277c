// src/models/staff.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::attendance::AttendanceStatus;
use crate::models::auth::UserRole;

// --- ENUMS ---

// Mapeia o CREATE TYPE department do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "department", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Management,
    Hr,
    Accounts,
    Sales,
    Marketing,
    Development,
    Support,
}

// Mapeia o CREATE TYPE staff_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "staff_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    Active,
    Inactive,
    Terminated,
}

// --- O CADASTRO ---

// A projeção padrão do funcionário. Os campos sensíveis (salário, PIN,
// token de redefinição) ficam de fora de propósito: eles só saem do banco
// pelos fluxos dedicados de salário.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub staff_id: String,
    pub phone: String,
    pub branch_id: Option<Uuid>,
    pub department: Department,
    pub designation: String,
    pub join_date: NaiveDate,
    pub status: StaffStatus,

    pub date_of_birth: Option<NaiveDate>,
    pub national_id: Option<String>,
    pub blood_group: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub exit_date: Option<NaiveDate>,

    pub profile_completed: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Colunas que o SELECT padrão nunca traz. Só os fluxos de salário leem isto.
#[derive(Debug, FromRow)]
pub struct SalarySecrets {
    pub salary: Option<Decimal>,
    pub salary_visible: bool,
    pub salary_pin: Option<String>,
    pub pin_reset_token: Option<String>,
    pub pin_reset_expires: Option<DateTime<Utc>>,
}

// --- O ROSTER (listagem enriquecida) ---

// Identidade vinculada, quando existe. Um funcionário sem User ainda é
// válido durante o onboarding e aparece com `user: null`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterUser {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodayAttendance {
    pub id: Uuid,
    pub status: AttendanceStatus,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub late_minutes: i32,
    pub total_minutes: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentShift {
    pub id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedStaff {
    #[serde(flatten)]
    pub staff: Staff,

    pub user: Option<RosterUser>,
    pub branch_name: Option<String>,
    pub today_attendance: Option<TodayAttendance>,
    pub current_shift: Option<CurrentShift>,
}

// A linha "achatada" que o SELECT do roster devolve; os LEFT JOINs deixam
// os campos das coleções vizinhas todos opcionais.
#[derive(Debug, FromRow)]
pub struct RosterRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub staff_id: String,
    pub phone: String,
    pub branch_id: Option<Uuid>,
    pub department: Department,
    pub designation: String,
    pub join_date: NaiveDate,
    pub status: StaffStatus,
    pub date_of_birth: Option<NaiveDate>,
    pub national_id: Option<String>,
    pub blood_group: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub exit_date: Option<NaiveDate>,
    pub profile_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_image: Option<String>,
    pub user_role: Option<UserRole>,

    pub branch_name: Option<String>,

    pub attendance_id: Option<Uuid>,
    pub attendance_status: Option<AttendanceStatus>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub late_minutes: Option<i32>,
    pub total_minutes: Option<i32>,

    pub shift_id: Option<Uuid>,
    pub shift_name: Option<String>,
    pub shift_start_time: Option<NaiveTime>,
    pub shift_end_time: Option<NaiveTime>,
}

impl From<RosterRow> for EnrichedStaff {
    fn from(row: RosterRow) -> Self {
        // `name` é NOT NULL em users: se veio None, o JOIN não encontrou nada.
        let user = match (row.user_name, row.user_email, row.user_role) {
            (Some(name), Some(email), Some(role)) => Some(RosterUser {
                name,
                email,
                image: row.user_image,
                role,
            }),
            _ => None,
        };

        let today_attendance = row.attendance_id.map(|id| TodayAttendance {
            id,
            status: row.attendance_status.unwrap_or(AttendanceStatus::Present),
            check_in: row.check_in,
            check_out: row.check_out,
            late_minutes: row.late_minutes.unwrap_or(0),
            total_minutes: row.total_minutes.unwrap_or(0),
        });

        let current_shift = match (
            row.shift_id,
            row.shift_name,
            row.shift_start_time,
            row.shift_end_time,
        ) {
            (Some(id), Some(name), Some(start_time), Some(end_time)) => Some(CurrentShift {
                id,
                name,
                start_time,
                end_time,
            }),
            _ => None,
        };

        EnrichedStaff {
            staff: Staff {
                id: row.id,
                user_id: row.user_id,
                staff_id: row.staff_id,
                phone: row.phone,
                branch_id: row.branch_id,
                department: row.department,
                designation: row.designation,
                join_date: row.join_date,
                status: row.status,
                date_of_birth: row.date_of_birth,
                national_id: row.national_id,
                blood_group: row.blood_group,
                address: row.address,
                emergency_contact: row.emergency_contact,
                father_name: row.father_name,
                mother_name: row.mother_name,
                exit_date: row.exit_date,
                profile_completed: row.profile_completed,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            user,
            branch_name: row.branch_name,
            today_attendance,
            current_shift,
        }
    }
}

// --- FILTROS E PAGINAÇÃO ---

// O conjunto de filtros reconhecidos, com tipo explícito por chave.
// Nada de objeto dinâmico: chave desconhecida nem chega aqui.
#[derive(Debug, Clone, Default)]
pub struct RosterFilters {
    pub search: Option<String>,
    pub department: Option<Department>,
    pub designation: Option<String>,
    pub status: Option<StaffStatus>,
    pub branch_id: Option<Uuid>,
    pub shift_id: Option<Uuid>,
    pub exclude_admins: bool,
}

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    // Coerção defensiva da paginação: página mínima 1, limite entre 1 e o
    // teto do servidor.
    pub fn sanitized(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_page: i64,
}

impl RosterMeta {
    pub fn new(total: i64, params: &PageParams) -> Self {
        Self {
            total,
            page: params.page,
            limit: params.limit,
            total_page: (total + params.limit - 1) / params.limit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterPage {
    pub staffs: Vec<EnrichedStaff>,
    pub meta: RosterMeta,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffPayload {
    #[validate(length(min = 3, message = "O staffId deve ter no mínimo 3 caracteres."))]
    #[schema(example = "STF-0001")]
    pub staff_id: String,

    #[validate(length(min = 8, message = "O telefone deve ter no mínimo 8 dígitos."))]
    #[schema(example = "+5511988887777")]
    pub phone: String,

    pub user_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,

    #[schema(example = "sales")]
    pub department: Department,

    #[validate(length(min = 2, message = "O cargo deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Vendedor Pleno")]
    pub designation: String,

    #[schema(value_type = String, format = Date, example = "2025-03-01")]
    pub join_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffPayload {
    pub phone: Option<String>,
    pub branch_id: Option<Uuid>,
    pub department: Option<Department>,
    pub designation: Option<String>,
    pub status: Option<StaffStatus>,

    #[schema(value_type = Option<String>, format = Date)]
    pub exit_date: Option<NaiveDate>,

    pub address: Option<String>,
    pub emergency_contact: Option<String>,

    // Quando presente, muda também o papel do User vinculado — na MESMA
    // transação que o restante da atualização.
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProfilePayload {
    #[validate(length(min = 8, message = "O telefone deve ter no mínimo 8 dígitos."))]
    #[schema(example = "+5511988887777")]
    pub phone: String,

    pub branch_id: Option<Uuid>,

    #[schema(example = "development")]
    pub department: Department,

    #[validate(length(min = 2, message = "O cargo deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Desenvolvedora")]
    pub designation: String,

    #[schema(value_type = String, format = Date, example = "2025-03-01")]
    pub join_date: NaiveDate,

    #[schema(value_type = Option<String>, format = Date, example = "1995-05-20")]
    pub date_of_birth: Option<NaiveDate>,

    pub national_id: Option<String>,

    #[schema(example = "O+")]
    pub blood_group: Option<String>,

    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
}

// --- SALÁRIO ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryHistory {
    pub id: Uuid,
    pub staff_id: Uuid,

    #[schema(value_type = Option<f64>, example = 1000.0)]
    pub previous_salary: Option<Decimal>,

    #[schema(value_type = f64, example = 1200.0)]
    pub new_salary: Decimal,

    pub changed_by: Uuid,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalaryPayload {
    #[schema(value_type = f64, example = 1200.0)]
    pub salary: Decimal,

    pub reason: Option<String>,

    // Permite ligar/desligar a visibilidade para o próprio funcionário.
    pub salary_visible: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewSalaryPayload {
    #[validate(length(min = 4, max = 8, message = "O PIN deve ter entre 4 e 8 dígitos."))]
    pub pin: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryView {
    #[schema(value_type = Option<f64>, example = 1200.0)]
    pub salary: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetSalaryPinPayload {
    #[validate(length(min = 4, max = 8, message = "O PIN deve ter entre 4 e 8 dígitos."))]
    pub pin: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetSalaryPinPayload {
    #[validate(length(min = 10, message = "Token de redefinição inválido."))]
    pub token: String,

    #[validate(length(min = 4, max = 8, message = "O PIN deve ter entre 4 e 8 dígitos."))]
    pub new_pin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_params_are_coerced_to_valid_ranges() {
        let p = PageParams::sanitized(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, DEFAULT_PAGE_SIZE);

        let p = PageParams::sanitized(Some(0), Some(-5));
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 1);

        let p = PageParams::sanitized(Some(3), Some(10_000));
        assert_eq!(p.page, 3);
        assert_eq!(p.limit, MAX_PAGE_SIZE);
        assert_eq!(p.offset(), 2 * MAX_PAGE_SIZE);
    }

    #[test]
    fn meta_total_page_is_ceiling_of_total_over_limit() {
        let params = PageParams { page: 1, limit: 10 };
        assert_eq!(RosterMeta::new(0, &params).total_page, 0);
        assert_eq!(RosterMeta::new(1, &params).total_page, 1);
        assert_eq!(RosterMeta::new(10, &params).total_page, 1);
        assert_eq!(RosterMeta::new(11, &params).total_page, 2);
        assert_eq!(RosterMeta::new(100, &params).total_page, 10);
    }
}
