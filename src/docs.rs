// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Staffs ---
        handlers::staff::list_staffs,
        handlers::staff::get_staff,
        handlers::staff::create_staff,
        handlers::staff::update_staff,
        handlers::staff::complete_profile,

        // --- Salary ---
        handlers::staff::update_salary,
        handlers::staff::salary_history,
        handlers::staff::view_salary,
        handlers::staff::set_salary_pin,
        handlers::staff::forgot_salary_pin,
        handlers::staff::reset_salary_pin,

        // --- Attendance ---
        handlers::attendance::check_in,
        handlers::attendance::check_out,
        handlers::attendance::update_status,
        handlers::attendance::list,

        // --- Shifts ---
        handlers::shift::create_shift,
        handlers::shift::list_shifts,
        handlers::shift::assign_shift,

        // --- Branches ---
        handlers::branch::create_branch,
        handlers::branch::list_branches,

        // --- Leaves ---
        handlers::leave::create_request,
        handlers::leave::list_requests,
        handlers::leave::review_request,
        handlers::leave::revoke_request,
        handlers::leave::my_balances,
        handlers::leave::allocate_balance,
        handlers::leave::create_type,
        handlers::leave::list_types,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Staffs ---
            models::staff::Department,
            models::staff::StaffStatus,
            models::staff::Staff,
            models::staff::RosterUser,
            models::staff::TodayAttendance,
            models::staff::CurrentShift,
            models::staff::EnrichedStaff,
            models::staff::RosterMeta,
            models::staff::RosterPage,
            models::staff::CreateStaffPayload,
            models::staff::UpdateStaffPayload,
            models::staff::CompleteProfilePayload,

            // --- Salary ---
            models::staff::SalaryHistory,
            models::staff::UpdateSalaryPayload,
            models::staff::ViewSalaryPayload,
            models::staff::SalaryView,
            models::staff::SetSalaryPinPayload,
            models::staff::ResetSalaryPinPayload,

            // --- Attendance ---
            models::attendance::AttendanceStatus,
            models::attendance::AttendanceDay,
            models::attendance::UpdateAttendanceStatusPayload,

            // --- Shifts ---
            models::shift::Shift,
            models::shift::ShiftAssignment,
            models::shift::CreateShiftPayload,
            models::shift::AssignShiftPayload,

            // --- Branches ---
            models::branch::Branch,
            models::branch::CreateBranchPayload,

            // --- Leaves ---
            models::leave::LeaveStatus,
            models::leave::LeaveType,
            models::leave::LeaveBalance,
            models::leave::LeaveRequest,
            models::leave::CreateLeaveTypePayload,
            models::leave::AllocateBalancePayload,
            models::leave::CreateLeaveRequestPayload,
            models::leave::ReviewDecision,
            models::leave::ReviewLeavePayload,
            handlers::leave::RevokeLeavePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário Autenticado"),
        (name = "Staffs", description = "Cadastro de Funcionários e Roster"),
        (name = "Salary", description = "Salários, Histórico e PIN"),
        (name = "Attendance", description = "Presença Diária"),
        (name = "Shifts", description = "Turnos e Atribuições"),
        (name = "Branches", description = "Filiais"),
        (name = "Leaves", description = "Licenças, Saldos e Aprovações")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
