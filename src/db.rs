pub mod attendance_repo;
pub use attendance_repo::AttendanceRepository;
pub mod branch_repo;
pub use branch_repo::BranchRepository;
pub mod counter_repo;
pub use counter_repo::CounterRepository;
pub mod leave_repo;
pub use leave_repo::LeaveRepository;
pub mod shift_repo;
pub use shift_repo::ShiftRepository;
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
