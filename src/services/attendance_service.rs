// src/services/attendance_service.rs

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AttendanceRepository, ShiftRepository, StaffRepository},
    models::{
        attendance::{late_minutes, worked_minutes, AttendanceDay, AttendanceStatus},
        auth::User,
        staff::Staff,
    },
};

#[derive(Clone)]
pub struct AttendanceService {
    attendance_repo: AttendanceRepository,
    shift_repo: ShiftRepository,
    staff_repo: StaffRepository,
    pool: PgPool,
}

impl AttendanceService {
    pub fn new(
        attendance_repo: AttendanceRepository,
        shift_repo: ShiftRepository,
        staff_repo: StaffRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            attendance_repo,
            shift_repo,
            staff_repo,
            pool,
        }
    }

    /// Check-in do dia. O atraso é medido contra o início do turno vigente;
    /// sem turno não há referência e portanto não há atraso.
    pub async fn check_in(&self, user: &User) -> Result<AttendanceDay, AppError> {
        let staff = self.staff_of_user(user).await?;
        let now = Utc::now();
        let today = now.date_naive();

        if self
            .attendance_repo
            .find_for_date(&self.pool, staff.id, today)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "O check-in de hoje já foi registrado.".to_string(),
            ));
        }

        let shift_start = self
            .shift_repo
            .active_shift(&self.pool, staff.id, today)
            .await?
            .map(|s| s.start_time);

        let late = late_minutes(now.time(), shift_start);
        let status = if late > 0 {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        self.attendance_repo
            .insert_check_in(&self.pool, staff.id, today, now, status, late)
            .await
    }

    pub async fn check_out(&self, user: &User) -> Result<AttendanceDay, AppError> {
        let staff = self.staff_of_user(user).await?;
        let now = Utc::now();
        let today = now.date_naive();

        let day = self
            .attendance_repo
            .find_for_date(&self.pool, staff.id, today)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Nenhum check-in registrado hoje.".to_string())
            })?;

        if day.check_out.is_some() {
            return Err(AppError::Conflict(
                "O check-out de hoje já foi registrado.".to_string(),
            ));
        }

        let check_in = day.check_in.ok_or_else(|| {
            AppError::Conflict("O registro de hoje não possui horário de entrada.".to_string())
        })?;

        let total = worked_minutes(check_in, now);
        self.attendance_repo
            .set_check_out(&self.pool, day.id, now, total)
            .await
    }

    /// Correção manual de status pelo admin (falta, meio período, licença).
    pub async fn update_status(
        &self,
        id: Uuid,
        status: AttendanceStatus,
    ) -> Result<AttendanceDay, AppError> {
        self.attendance_repo
            .update_status(&self.pool, id, status)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Registro de presença não encontrado.".to_string())
            })
    }

    pub async fn list(
        &self,
        staff_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceDay>, AppError> {
        self.attendance_repo.list(staff_id, from, to).await
    }

    async fn staff_of_user(&self, user: &User) -> Result<Staff, AppError> {
        self.staff_repo
            .find_by_user(&self.pool, user.id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "Nenhum cadastro de funcionário vinculado a este usuário.".to_string(),
                )
            })
    }
}
