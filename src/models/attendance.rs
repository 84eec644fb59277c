// src/models/attendance.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE attendance_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
    OnLeave,
}

// Um registro por funcionário por dia. A unicidade é conceitual: quem lê
// precisa se proteger com LIMIT 1.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDay {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub work_date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub late_minutes: i32,
    pub total_minutes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceStatusPayload {
    #[schema(example = "half_day")]
    pub status: AttendanceStatus,
}

// Minutos de atraso em relação ao início do turno. Sem turno ativo não há
// referência, então não há atraso.
pub fn late_minutes(check_in: NaiveTime, shift_start: Option<NaiveTime>) -> i32 {
    match shift_start {
        Some(start) if check_in > start => (check_in - start).num_minutes() as i32,
        _ => 0,
    }
}

pub fn worked_minutes(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i32 {
    (check_out - check_in).num_minutes().max(0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn late_minutes_counts_only_after_shift_start() {
        let start = NaiveTime::from_hms_opt(9, 0, 0);

        let on_time = NaiveTime::from_hms_opt(8, 55, 0).unwrap();
        assert_eq!(late_minutes(on_time, start), 0);

        let late = NaiveTime::from_hms_opt(9, 17, 0).unwrap();
        assert_eq!(late_minutes(late, start), 17);

        // Sem turno ativo, nunca há atraso.
        assert_eq!(late_minutes(late, None), 0);
    }

    #[test]
    fn worked_minutes_spans_check_in_to_check_out() {
        let check_in = Utc.with_ymd_and_hms(2025, 8, 4, 12, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2025, 8, 4, 20, 30, 0).unwrap();
        assert_eq!(worked_minutes(check_in, check_out), 510);

        // Relógio fora de ordem não gera total negativo.
        assert_eq!(worked_minutes(check_out, check_in), 0);
    }
}
