// src/models/shift.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAssignment {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub shift_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ShiftAssignment {
    // O predicado de "vigência": ativo e com a data dentro da janela
    // [start_date, end_date], com end_date aberto significando "sem fim".
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.start_date <= date
            && self.end_date.map_or(true, |end| end >= date)
    }
}

// O turno vigente de um funcionário, com os dados do turno já resolvidos.
#[derive(Debug, Clone, FromRow)]
pub struct ActiveShiftRow {
    pub assignment_id: Uuid,
    pub shift_id: Uuid,
    pub shift_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Manhã")]
    pub name: String,

    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,

    #[schema(value_type = String, example = "18:00:00")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignShiftPayload {
    pub staff_id: Uuid,
    pub shift_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-08-01")]
    pub start_date: NaiveDate,

    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn assignment(start: NaiveDate, end: Option<NaiveDate>, is_active: bool) -> ShiftAssignment {
        ShiftAssignment {
            id: Uuid::new_v4(),
            staff_id: Uuid::new_v4(),
            shift_id: Uuid::new_v4(),
            start_date: start,
            end_date: end,
            is_active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn active_window_contains_date() {
        let start = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();

        assert!(assignment(start, Some(end), true).is_active_on(today));
        assert!(assignment(start, None, true).is_active_on(today));

        // Bordas inclusivas dos dois lados.
        assert!(assignment(start, Some(end), true).is_active_on(start));
        assert!(assignment(start, Some(end), true).is_active_on(end));
    }

    #[test]
    fn inactive_or_out_of_window_is_not_current() {
        let start = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();

        let before = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let inside = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();

        assert!(!assignment(start, Some(end), true).is_active_on(before));
        assert!(!assignment(start, Some(end), true).is_active_on(after));
        assert!(!assignment(start, Some(end), false).is_active_on(inside));
    }
}
