// src/db/attendance_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::attendance::{AttendanceDay, AttendanceStatus},
};

const ATTENDANCE_COLUMNS: &str =
    "id, staff_id, work_date, status, check_in, check_out, late_minutes, total_minutes, created_at";

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // O registro do dia, se houver. O schema não impõe unicidade por
    // (staff, data), então o LIMIT 1 é obrigatório aqui.
    pub async fn find_for_date<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        work_date: NaiveDate,
    ) -> Result<Option<AttendanceDay>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let day = sqlx::query_as::<_, AttendanceDay>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance_days \
             WHERE staff_id = $1 AND work_date = $2 \
             ORDER BY created_at ASC LIMIT 1"
        ))
        .bind(staff_id)
        .bind(work_date)
        .fetch_optional(executor)
        .await?;
        Ok(day)
    }

    pub async fn insert_check_in<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        work_date: NaiveDate,
        check_in: DateTime<Utc>,
        status: AttendanceStatus,
        late_minutes: i32,
    ) -> Result<AttendanceDay, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let day = sqlx::query_as::<_, AttendanceDay>(&format!(
            "INSERT INTO attendance_days (staff_id, work_date, status, check_in, late_minutes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(staff_id)
        .bind(work_date)
        .bind(status)
        .bind(check_in)
        .bind(late_minutes)
        .fetch_one(executor)
        .await?;
        Ok(day)
    }

    pub async fn set_check_out<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        check_out: DateTime<Utc>,
        total_minutes: i32,
    ) -> Result<AttendanceDay, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let day = sqlx::query_as::<_, AttendanceDay>(&format!(
            "UPDATE attendance_days SET check_out = $2, total_minutes = $3 \
             WHERE id = $1 \
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(id)
        .bind(check_out)
        .bind(total_minutes)
        .fetch_one(executor)
        .await?;
        Ok(day)
    }

    // Correção manual de status pelo admin.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceDay>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let day = sqlx::query_as::<_, AttendanceDay>(&format!(
            "UPDATE attendance_days SET status = $2 WHERE id = $1 \
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?;
        Ok(day)
    }

    // Listagem administrativa, com filtros opcionais por funcionário e
    // intervalo de datas.
    pub async fn list(
        &self,
        staff_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceDay>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance_days WHERE 1 = 1 "
        ));

        if let Some(staff_id) = staff_id {
            qb.push(" AND staff_id = ");
            qb.push_bind(staff_id);
        }
        if let Some(from) = from {
            qb.push(" AND work_date >= ");
            qb.push_bind(from);
        }
        if let Some(to) = to {
            qb.push(" AND work_date <= ");
            qb.push_bind(to);
        }

        qb.push(" ORDER BY work_date DESC, created_at DESC ");

        let days = qb
            .build_query_as::<AttendanceDay>()
            .fetch_all(&self.pool)
            .await?;
        Ok(days)
    }
}
