// src/db/shift_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::shift::{ActiveShiftRow, Shift, ShiftAssignment},
};

const ASSIGNMENT_COLUMNS: &str =
    "id, staff_id, shift_id, start_date, end_date, is_active, created_at";

#[derive(Clone)]
pub struct ShiftRepository {
    pool: PgPool,
}

impl ShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        start_time: chrono::NaiveTime,
        end_time: chrono::NaiveTime,
    ) -> Result<Shift, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shift = sqlx::query_as::<_, Shift>(
            "INSERT INTO shifts (name, start_time, end_time) VALUES ($1, $2, $3) \
             RETURNING id, name, start_time, end_time, created_at",
        )
        .bind(name)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(executor)
        .await?;
        Ok(shift)
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Shift>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shifts = sqlx::query_as::<_, Shift>(
            "SELECT id, name, start_time, end_time, created_at FROM shifts ORDER BY start_time ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(shifts)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Shift>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shift = sqlx::query_as::<_, Shift>(
            "SELECT id, name, start_time, end_time, created_at FROM shifts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(shift)
    }

    // O turno vigente de um funcionário numa data, já com os dados do
    // turno resolvidos. Mesmo predicado de janela e mesmo desempate do
    // roster: vence a atribuição mais recente.
    pub async fn active_shift<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<ActiveShiftRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, ActiveShiftRow>(
            "SELECT sa.id AS assignment_id, sh.id AS shift_id, sh.name AS shift_name, \
                    sh.start_time, sh.end_time \
             FROM shift_assignments sa \
             JOIN shifts sh ON sh.id = sa.shift_id \
             WHERE sa.staff_id = $1 AND sa.is_active AND sa.start_date <= $2 \
               AND (sa.end_date IS NULL OR sa.end_date >= $2) \
             ORDER BY sa.created_at DESC, sa.id DESC \
             LIMIT 1",
        )
        .bind(staff_id)
        .bind(date)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    // A atribuição mais recente do funcionário, vigente ou não — a troca
    // de turno decide em código se precisa encerrá-la.
    pub async fn latest_assignment<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
    ) -> Result<Option<ShiftAssignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignment = sqlx::query_as::<_, ShiftAssignment>(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM shift_assignments \
             WHERE staff_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        ))
        .bind(staff_id)
        .fetch_optional(executor)
        .await?;
        Ok(assignment)
    }

    pub async fn close_assignment<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        end_date: NaiveDate,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE shift_assignments SET end_date = $2, is_active = FALSE WHERE id = $1",
        )
        .bind(id)
        .bind(end_date)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn insert_assignment<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        shift_id: Uuid,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<ShiftAssignment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignment = sqlx::query_as::<_, ShiftAssignment>(&format!(
            "INSERT INTO shift_assignments (staff_id, shift_id, start_date, end_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ASSIGNMENT_COLUMNS}"
        ))
        .bind(staff_id)
        .bind(shift_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(executor)
        .await?;
        Ok(assignment)
    }
}
