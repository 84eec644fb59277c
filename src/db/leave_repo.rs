// src/db/leave_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::leave::{
        CreateLeaveRequestPayload, LeaveBalance, LeaveRequest, LeaveStatus, LeaveType,
    },
};

const REQUEST_COLUMNS: &str = "id, staff_id, leave_type_id, start_date, end_date, \
     requested_days, approved_days, reason, status, reviewed_by, review_note, \
     created_at, updated_at";

const BALANCE_COLUMNS: &str = "id, staff_id, leave_type_id, year, allocated, used";

#[derive(Clone)]
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- TIPOS DE LICENÇA ---

    pub async fn create_type<'e, E>(
        &self,
        executor: E,
        name: &str,
        annual_allocation: i32,
    ) -> Result<LeaveType, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let leave_type = sqlx::query_as::<_, LeaveType>(
            "INSERT INTO leave_types (name, annual_allocation) VALUES ($1, $2) \
             RETURNING id, name, annual_allocation, created_at",
        )
        .bind(name)
        .bind(annual_allocation)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "O tipo de licença '{}' já existe.",
                        name
                    ));
                }
            }
            e.into()
        })?;
        Ok(leave_type)
    }

    pub async fn list_types<'e, E>(&self, executor: E) -> Result<Vec<LeaveType>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let types = sqlx::query_as::<_, LeaveType>(
            "SELECT id, name, annual_allocation, created_at FROM leave_types ORDER BY name ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(types)
    }

    pub async fn find_type<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<LeaveType>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let leave_type = sqlx::query_as::<_, LeaveType>(
            "SELECT id, name, annual_allocation, created_at FROM leave_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(leave_type)
    }

    // --- SALDOS ---

    pub async fn upsert_balance<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        leave_type_id: Uuid,
        year: i32,
        allocated: i32,
    ) -> Result<LeaveBalance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balance = sqlx::query_as::<_, LeaveBalance>(&format!(
            "INSERT INTO leave_balances (staff_id, leave_type_id, year, allocated) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (staff_id, leave_type_id, year) \
             DO UPDATE SET allocated = EXCLUDED.allocated \
             RETURNING {BALANCE_COLUMNS}"
        ))
        .bind(staff_id)
        .bind(leave_type_id)
        .bind(year)
        .bind(allocated)
        .fetch_one(executor)
        .await?;
        Ok(balance)
    }

    pub async fn find_balance<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        leave_type_id: Uuid,
        year: i32,
    ) -> Result<Option<LeaveBalance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balance = sqlx::query_as::<_, LeaveBalance>(&format!(
            "SELECT {BALANCE_COLUMNS} FROM leave_balances \
             WHERE staff_id = $1 AND leave_type_id = $2 AND year = $3"
        ))
        .bind(staff_id)
        .bind(leave_type_id)
        .bind(year)
        .fetch_optional(executor)
        .await?;
        Ok(balance)
    }

    // Variante com lock de linha para a revisão/revogação transacional.
    pub async fn find_balance_for_update<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        leave_type_id: Uuid,
        year: i32,
    ) -> Result<Option<LeaveBalance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balance = sqlx::query_as::<_, LeaveBalance>(&format!(
            "SELECT {BALANCE_COLUMNS} FROM leave_balances \
             WHERE staff_id = $1 AND leave_type_id = $2 AND year = $3 FOR UPDATE"
        ))
        .bind(staff_id)
        .bind(leave_type_id)
        .bind(year)
        .fetch_optional(executor)
        .await?;
        Ok(balance)
    }

    pub async fn list_balances<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        year: i32,
    ) -> Result<Vec<LeaveBalance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balances = sqlx::query_as::<_, LeaveBalance>(&format!(
            "SELECT {BALANCE_COLUMNS} FROM leave_balances \
             WHERE staff_id = $1 AND year = $2 ORDER BY leave_type_id"
        ))
        .bind(staff_id)
        .bind(year)
        .fetch_all(executor)
        .await?;
        Ok(balances)
    }

    // Ajuste do consumo (positivo na aprovação, negativo na revogação).
    pub async fn add_used<'e, E>(
        &self,
        executor: E,
        balance_id: Uuid,
        delta: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE leave_balances SET used = used + $2 WHERE id = $1")
            .bind(balance_id)
            .bind(delta)
            .execute(executor)
            .await?;
        Ok(())
    }

    // --- PEDIDOS ---

    pub async fn insert_request<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        payload: &CreateLeaveRequestPayload,
        requested_days: i32,
    ) -> Result<LeaveRequest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, LeaveRequest>(&format!(
            "INSERT INTO leave_requests \
                 (staff_id, leave_type_id, start_date, end_date, requested_days, reason) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(staff_id)
        .bind(payload.leave_type_id)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(requested_days)
        .bind(&payload.reason)
        .fetch_one(executor)
        .await?;
        Ok(request)
    }

    pub async fn find_request_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<LeaveRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, LeaveRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(request)
    }

    pub async fn set_request_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: LeaveStatus,
        approved_days: Option<i32>,
        reviewed_by: Uuid,
        review_note: Option<&str>,
    ) -> Result<LeaveRequest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, LeaveRequest>(&format!(
            "UPDATE leave_requests SET \
                 status = $2, approved_days = $3, reviewed_by = $4, review_note = $5, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .bind(approved_days)
        .bind(reviewed_by)
        .bind(review_note)
        .fetch_one(executor)
        .await?;
        Ok(request)
    }

    pub async fn list_requests(
        &self,
        staff_id: Option<Uuid>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequest>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE 1 = 1 "
        ));

        if let Some(staff_id) = staff_id {
            qb.push(" AND staff_id = ");
            qb.push_bind(staff_id);
        }
        if let Some(status) = status {
            qb.push(" AND status = ");
            qb.push_bind(status);
        }

        qb.push(" ORDER BY created_at DESC ");

        let requests = qb
            .build_query_as::<LeaveRequest>()
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }
}
