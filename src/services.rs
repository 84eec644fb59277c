pub mod attendance_service;
pub use attendance_service::AttendanceService;
pub mod auth;
pub use auth::AuthService;
pub mod leave_service;
pub use leave_service::LeaveService;
pub mod shift_service;
pub use shift_service::ShiftService;
pub mod staff_service;
pub use staff_service::StaffService;
