// src/services/leave_service.rs

use chrono::{Datelike, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LeaveRepository, StaffRepository},
    models::{
        auth::User,
        leave::{
            inclusive_days, AllocateBalancePayload, CreateLeaveRequestPayload,
            CreateLeaveTypePayload, LeaveBalance, LeaveRequest, LeaveStatus, LeaveType,
            ReviewDecision, ReviewLeavePayload,
        },
        staff::Staff,
    },
};

// O coração da revisão: decide o novo status e quantos dias debitar do
// saldo. Função pura — a transação em volta só aplica o resultado.
pub(crate) fn resolve_review(
    decision: ReviewDecision,
    requested_days: i32,
    approved_days: Option<i32>,
) -> Result<(LeaveStatus, i32), AppError> {
    match decision {
        ReviewDecision::Reject => Ok((LeaveStatus::Rejected, 0)),
        ReviewDecision::Approve => {
            let days = approved_days.unwrap_or(requested_days);
            if days <= 0 || days > requested_days {
                return Err(AppError::BadRequest(
                    "Os dias aprovados devem estar entre 1 e o total pedido.".to_string(),
                ));
            }
            if days < requested_days {
                Ok((LeaveStatus::PartiallyApproved, days))
            } else {
                Ok((LeaveStatus::Approved, days))
            }
        }
    }
}

#[derive(Clone)]
pub struct LeaveService {
    leave_repo: LeaveRepository,
    staff_repo: StaffRepository,
    pool: PgPool,
}

impl LeaveService {
    pub fn new(leave_repo: LeaveRepository, staff_repo: StaffRepository, pool: PgPool) -> Self {
        Self {
            leave_repo,
            staff_repo,
            pool,
        }
    }

    // --- CATÁLOGO E SALDOS ---

    pub async fn create_type(&self, payload: &CreateLeaveTypePayload) -> Result<LeaveType, AppError> {
        self.leave_repo
            .create_type(&self.pool, &payload.name, payload.annual_allocation)
            .await
    }

    pub async fn list_types(&self) -> Result<Vec<LeaveType>, AppError> {
        self.leave_repo.list_types(&self.pool).await
    }

    pub async fn allocate_balance(
        &self,
        payload: &AllocateBalancePayload,
    ) -> Result<LeaveBalance, AppError> {
        self.staff_repo
            .find_by_id(&self.pool, payload.staff_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Funcionário não encontrado.".to_string()))?;

        self.leave_repo
            .find_type(&self.pool, payload.leave_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tipo de licença não encontrado.".to_string()))?;

        self.leave_repo
            .upsert_balance(
                &self.pool,
                payload.staff_id,
                payload.leave_type_id,
                payload.year,
                payload.allocated,
            )
            .await
    }

    pub async fn my_balances(
        &self,
        user: &User,
        year: Option<i32>,
    ) -> Result<Vec<LeaveBalance>, AppError> {
        let staff = self.staff_of_user(user).await?;
        let year = year.unwrap_or_else(|| Utc::now().year());
        self.leave_repo.list_balances(&self.pool, staff.id, year).await
    }

    // --- PEDIDOS ---

    /// Pedido de licença do próprio funcionário. O saldo do ano da data
    /// inicial precisa existir e comportar o total pedido.
    pub async fn request(
        &self,
        user: &User,
        payload: &CreateLeaveRequestPayload,
    ) -> Result<LeaveRequest, AppError> {
        if payload.end_date < payload.start_date {
            return Err(AppError::BadRequest(
                "A data final deve ser igual ou posterior à inicial.".to_string(),
            ));
        }

        let staff = self.staff_of_user(user).await?;

        self.leave_repo
            .find_type(&self.pool, payload.leave_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tipo de licença não encontrado.".to_string()))?;

        let requested_days = inclusive_days(payload.start_date, payload.end_date) as i32;
        let year = payload.start_date.year();

        let balance = self
            .leave_repo
            .find_balance(&self.pool, staff.id, payload.leave_type_id, year)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(
                    "Nenhum saldo alocado para este tipo de licença no ano.".to_string(),
                )
            })?;

        if balance.remaining() < requested_days {
            return Err(AppError::Conflict(format!(
                "Saldo insuficiente: restam {} dia(s), pedido de {}.",
                balance.remaining(),
                requested_days
            )));
        }

        self.leave_repo
            .insert_request(&self.pool, staff.id, payload, requested_days)
            .await
    }

    /// Revisão (aprovar / aprovar parcialmente / rejeitar). Só pedidos
    /// pendentes são revisáveis; o débito do saldo acontece na mesma
    /// transação que a mudança de status.
    pub async fn review(
        &self,
        id: Uuid,
        reviewer: &User,
        payload: &ReviewLeavePayload,
    ) -> Result<LeaveRequest, AppError> {
        let mut tx = self.pool.begin().await?;

        let request = self
            .leave_repo
            .find_request_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido de licença não encontrado.".to_string()))?;

        if request.status != LeaveStatus::Pending {
            return Err(AppError::Conflict(
                "Apenas pedidos pendentes podem ser revisados.".to_string(),
            ));
        }

        let (status, deduct) =
            resolve_review(payload.decision, request.requested_days, payload.approved_days)?;

        if deduct > 0 {
            let year = request.start_date.year();
            let balance = self
                .leave_repo
                .find_balance_for_update(&mut *tx, request.staff_id, request.leave_type_id, year)
                .await?
                .ok_or_else(|| {
                    AppError::Conflict(
                        "Nenhum saldo alocado para este tipo de licença no ano.".to_string(),
                    )
                })?;

            if balance.remaining() < deduct {
                return Err(AppError::Conflict(format!(
                    "Saldo insuficiente: restam {} dia(s), aprovação de {}.",
                    balance.remaining(),
                    deduct
                )));
            }

            self.leave_repo.add_used(&mut *tx, balance.id, deduct).await?;
        }

        let approved_days = (deduct > 0).then_some(deduct);
        let updated = self
            .leave_repo
            .set_request_status(
                &mut *tx,
                id,
                status,
                approved_days,
                reviewer.id,
                payload.note.as_deref(),
            )
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Revogação de um pedido já aprovado: devolve os dias debitados na
    /// mesma transação.
    pub async fn revoke(
        &self,
        id: Uuid,
        reviewer: &User,
        note: Option<&str>,
    ) -> Result<LeaveRequest, AppError> {
        let mut tx = self.pool.begin().await?;

        let request = self
            .leave_repo
            .find_request_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido de licença não encontrado.".to_string()))?;

        if !matches!(
            request.status,
            LeaveStatus::Approved | LeaveStatus::PartiallyApproved
        ) {
            return Err(AppError::Conflict(
                "Apenas pedidos aprovados podem ser revogados.".to_string(),
            ));
        }

        let restore = request.approved_days.unwrap_or(0);
        if restore > 0 {
            let year = request.start_date.year();
            if let Some(balance) = self
                .leave_repo
                .find_balance_for_update(&mut *tx, request.staff_id, request.leave_type_id, year)
                .await?
            {
                self.leave_repo.add_used(&mut *tx, balance.id, -restore).await?;
            }
        }

        let updated = self
            .leave_repo
            .set_request_status(
                &mut *tx,
                id,
                LeaveStatus::Revoked,
                request.approved_days,
                reviewer.id,
                note,
            )
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Listagem com escopo por papel: admins enxergam tudo (e podem filtrar
    /// por funcionário); os demais só enxergam os próprios pedidos.
    pub async fn list_requests_for(
        &self,
        user: &User,
        staff_id: Option<Uuid>,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequest>, AppError> {
        let staff_id = if user.role.is_privileged() {
            staff_id
        } else {
            Some(self.staff_of_user(user).await?.id)
        };

        self.leave_repo.list_requests(staff_id, status).await
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_approval_deducts_everything_requested() {
        let (status, deduct) = resolve_review(ReviewDecision::Approve, 5, None).unwrap();
        assert_eq!(status, LeaveStatus::Approved);
        assert_eq!(deduct, 5);

        // Aprovar exatamente o pedido também é aprovação integral.
        let (status, deduct) = resolve_review(ReviewDecision::Approve, 5, Some(5)).unwrap();
        assert_eq!(status, LeaveStatus::Approved);
        assert_eq!(deduct, 5);
    }

    #[test]
    fn partial_approval_keeps_the_approved_count() {
        let (status, deduct) = resolve_review(ReviewDecision::Approve, 5, Some(3)).unwrap();
        assert_eq!(status, LeaveStatus::PartiallyApproved);
        assert_eq!(deduct, 3);
    }

    #[test]
    fn rejection_never_touches_the_balance() {
        let (status, deduct) = resolve_review(ReviewDecision::Reject, 5, Some(3)).unwrap();
        assert_eq!(status, LeaveStatus::Rejected);
        assert_eq!(deduct, 0);
    }

    #[test]
    fn approved_days_outside_the_request_are_rejected() {
        assert!(resolve_review(ReviewDecision::Approve, 5, Some(0)).is_err());
        assert!(resolve_review(ReviewDecision::Approve, 5, Some(-2)).is_err());
        assert!(resolve_review(ReviewDecision::Approve, 5, Some(6)).is_err());
    }
}
