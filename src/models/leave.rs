// src/models/leave.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE leave_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "leave_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    PartiallyApproved,
    Rejected,
    Revoked,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveType {
    pub id: Uuid,
    pub name: String,
    pub annual_allocation: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub leave_type_id: Uuid,
    pub year: i32,
    pub allocated: i32,
    pub used: i32,
}

impl LeaveBalance {
    pub fn remaining(&self) -> i32 {
        self.allocated - self.used
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub leave_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub requested_days: i32,
    pub approved_days: Option<i32>,
    pub reason: String,
    pub status: LeaveStatus,
    pub reviewed_by: Option<Uuid>,
    pub review_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dias corridos, bordas inclusivas: um pedido de um único dia vale 1.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveTypePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Férias")]
    pub name: String,

    #[validate(range(min = 1, max = 365, message = "A alocação anual deve estar entre 1 e 365."))]
    #[schema(example = 30)]
    pub annual_allocation: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocateBalancePayload {
    pub staff_id: Uuid,
    pub leave_type_id: Uuid,

    #[validate(range(min = 2000, max = 2100, message = "Ano fora do intervalo esperado."))]
    #[schema(example = 2025)]
    pub year: i32,

    #[validate(range(min = 0, max = 365, message = "A alocação deve estar entre 0 e 365."))]
    #[schema(example = 30)]
    pub allocated: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequestPayload {
    pub leave_type_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-09-01")]
    pub start_date: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2025-09-05")]
    pub end_date: NaiveDate,

    #[validate(length(min = 3, message = "Descreva o motivo do pedido."))]
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLeavePayload {
    pub decision: ReviewDecision,

    // Na aprovação: ausente = aprova tudo; menor que o pedido = aprovação
    // parcial.
    #[schema(example = 3)]
    pub approved_days: Option<i32>,

    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_days_counts_both_endpoints() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(inclusive_days(start, start), 1);

        let end = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();
        assert_eq!(inclusive_days(start, end), 5);
    }
}
