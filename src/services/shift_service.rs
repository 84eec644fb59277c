// src/services/shift_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{ShiftRepository, StaffRepository},
    models::shift::{AssignShiftPayload, CreateShiftPayload, Shift, ShiftAssignment},
};

#[derive(Clone)]
pub struct ShiftService {
    shift_repo: ShiftRepository,
    staff_repo: StaffRepository,
    pool: PgPool,
}

impl ShiftService {
    pub fn new(shift_repo: ShiftRepository, staff_repo: StaffRepository, pool: PgPool) -> Self {
        Self {
            shift_repo,
            staff_repo,
            pool,
        }
    }

    pub async fn create(&self, payload: &CreateShiftPayload) -> Result<Shift, AppError> {
        if payload.end_time <= payload.start_time {
            return Err(AppError::BadRequest(
                "O fim do turno deve ser depois do início.".to_string(),
            ));
        }

        self.shift_repo
            .create(&self.pool, &payload.name, payload.start_time, payload.end_time)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Shift>, AppError> {
        self.shift_repo.list(&self.pool).await
    }

    /// Troca de turno numa transação só: encerra a atribuição vigente (se
    /// houver) e insere a nova — preservando a invariante de no máximo uma
    /// atribuição ativa por funcionário.
    pub async fn assign(&self, payload: &AssignShiftPayload) -> Result<ShiftAssignment, AppError> {
        if let Some(end) = payload.end_date {
            if end < payload.start_date {
                return Err(AppError::BadRequest(
                    "A data final deve ser igual ou posterior à inicial.".to_string(),
                ));
            }
        }

        let mut tx = self.pool.begin().await?;

        self.staff_repo
            .find_by_id(&mut *tx, payload.staff_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Funcionário não encontrado.".to_string()))?;

        self.shift_repo
            .find_by_id(&mut *tx, payload.shift_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Turno não encontrado.".to_string()))?;

        if let Some(latest) = self
            .shift_repo
            .latest_assignment(&mut *tx, payload.staff_id)
            .await?
        {
            if latest.is_active_on(payload.start_date) {
                let closes_at = payload.start_date - chrono::Duration::days(1);
                self.shift_repo
                    .close_assignment(&mut *tx, latest.id, closes_at)
                    .await?;
            }
        }

        let assignment = self
            .shift_repo
            .insert_assignment(
                &mut *tx,
                payload.staff_id,
                payload.shift_id,
                payload.start_date,
                payload.end_date,
            )
            .await?;

        tx.commit().await?;
        Ok(assignment)
    }
}
