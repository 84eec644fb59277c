// src/services/staff_service.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CounterRepository, StaffRepository, UserRepository},
    models::{
        auth::User,
        staff::{
            CompleteProfilePayload, CreateStaffPayload, EnrichedStaff, PageParams, RosterFilters,
            RosterPage, SalaryHistory, SalaryView, Staff, UpdateSalaryPayload, UpdateStaffPayload,
        },
    },
};

// Nome da sequência atômica usada na geração do staff_id legível.
const STAFF_ID_COUNTER: &str = "staff_id";

// Validade do token de redefinição do PIN de salário.
const PIN_RESET_TTL_MINUTES: i64 = 30;

pub(crate) fn format_staff_id(seq: i64) -> String {
    format!("STF-{:04}", seq)
}

#[derive(Clone)]
pub struct StaffService {
    staff_repo: StaffRepository,
    user_repo: UserRepository,
    counter_repo: CounterRepository,
    pool: PgPool,
}

impl StaffService {
    pub fn new(
        staff_repo: StaffRepository,
        user_repo: UserRepository,
        counter_repo: CounterRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            staff_repo,
            user_repo,
            counter_repo,
            pool,
        }
    }

    // --- ROSTER ---

    /// Listagem filtrada e paginada, enriquecida com identidade, filial,
    /// presença de hoje e turno vigente. Leitura pura.
    pub async fn roster(
        &self,
        filters: &RosterFilters,
        page: &PageParams,
    ) -> Result<RosterPage, AppError> {
        let today = Utc::now().date_naive();
        self.staff_repo.roster(filters, page, today).await
    }

    pub async fn detail(&self, id: Uuid) -> Result<EnrichedStaff, AppError> {
        let today = Utc::now().date_naive();
        self.staff_repo
            .find_enriched(id, today)
            .await?
            .ok_or_else(|| AppError::NotFound("Funcionário não encontrado.".to_string()))
    }

    // --- CICLO DE VIDA ---

    /// Criação administrativa. O check-then-insert roda dentro da transação
    /// para que duas criações concorrentes com o mesmo staffId não deixem
    /// registro parcial; o índice único é o guarda final.
    pub async fn create(&self, payload: &CreateStaffPayload) -> Result<Staff, AppError> {
        let mut tx = self.pool.begin().await?;

        if self
            .staff_repo
            .find_by_staff_id(&mut *tx, &payload.staff_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Já existe um funcionário com o staffId '{}'.",
                payload.staff_id
            )));
        }

        if let Some(user_id) = payload.user_id {
            self.user_repo
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".to_string()))?;
        }

        let staff = self.staff_repo.create(&mut *tx, payload).await?;

        tx.commit().await?;

        tracing::info!("✅ Funcionário {} criado.", staff.staff_id);
        Ok(staff)
    }

    /// Conclusão de perfil (autoatendimento). Cria o cadastro se não
    /// existir — com staff_id vindo da sequência atômica — e vira o
    /// profile_completed exatamente uma vez: a segunda tentativa falha
    /// explicitamente e não altera nada.
    pub async fn complete_profile(
        &self,
        user: &User,
        payload: &CompleteProfilePayload,
    ) -> Result<Staff, AppError> {
        let mut tx = self.pool.begin().await?;

        let staff = match self.staff_repo.find_by_user(&mut *tx, user.id).await? {
            Some(existing) if existing.profile_completed => {
                return Err(AppError::Conflict(
                    "O perfil já foi concluído e não pode ser reenviado.".to_string(),
                ));
            }
            Some(existing) => {
                self.staff_repo
                    .complete_existing(&mut *tx, existing.id, payload)
                    .await?
            }
            None => {
                let seq = self
                    .counter_repo
                    .next_value(&mut *tx, STAFF_ID_COUNTER)
                    .await?;
                let staff_id = format_staff_id(seq);
                self.staff_repo
                    .create_completed(&mut *tx, user.id, &staff_id, payload)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(staff)
    }

    /// Atualização administrativa. Se o payload carrega mudança de papel,
    /// o User vinculado muda na MESMA transação — ou tudo, ou nada.
    pub async fn update(&self, id: Uuid, payload: &UpdateStaffPayload) -> Result<Staff, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = self
            .staff_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Funcionário não encontrado.".to_string()))?;

        let staff = self.staff_repo.update(&mut *tx, id, payload).await?;

        if let Some(role) = payload.role {
            let user_id = existing.user_id.ok_or_else(|| {
                AppError::BadRequest(
                    "Funcionário sem usuário vinculado não pode ter papel alterado.".to_string(),
                )
            })?;
            self.user_repo.update_role(&mut *tx, user_id, role).await?;
        }

        tx.commit().await?;
        Ok(staff)
    }

    // --- SALÁRIO ---

    /// Troca de salário com trilha de auditoria na mesma transação: se o
    /// INSERT do histórico falhar, o novo salário também não é gravado.
    pub async fn update_salary(
        &self,
        staff_id: Uuid,
        payload: &UpdateSalaryPayload,
        changed_by: Uuid,
    ) -> Result<SalaryHistory, AppError> {
        let mut tx = self.pool.begin().await?;

        let secrets = self
            .staff_repo
            .salary_secrets_for_update(&mut *tx, staff_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Funcionário não encontrado.".to_string()))?;

        self.staff_repo
            .set_salary(&mut *tx, staff_id, payload.salary, payload.salary_visible)
            .await?;

        let entry = self
            .staff_repo
            .insert_salary_history(
                &mut *tx,
                staff_id,
                secrets.salary,
                payload.salary,
                changed_by,
                payload.reason.as_deref(),
            )
            .await?;

        tx.commit().await?;
        Ok(entry)
    }

    pub async fn salary_history(&self, staff_id: Uuid) -> Result<Vec<SalaryHistory>, AppError> {
        self.staff_repo
            .find_by_id(&self.pool, staff_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Funcionário não encontrado.".to_string()))?;

        self.staff_repo
            .list_salary_history(&self.pool, staff_id)
            .await
    }

    /// Visualização do próprio salário: falha FECHADA. Exige a flag de
    /// visibilidade E o PIN correto; a ausência de qualquer um esconde o
    /// valor, nunca o contrário.
    pub async fn view_salary(&self, user: &User, pin: &str) -> Result<SalaryView, AppError> {
        let staff = self.staff_of_user(user).await?;
        let secrets = self
            .staff_repo
            .salary_secrets(&self.pool, staff.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Funcionário não encontrado.".to_string()))?;

        if !secrets.salary_visible {
            return Err(AppError::Forbidden(
                "O salário não está visível para este funcionário.".to_string(),
            ));
        }

        let pin_hash = secrets.salary_pin.ok_or_else(|| {
            AppError::Forbidden("Configure um PIN de salário antes de consultar.".to_string())
        })?;

        let pin_clone = pin.to_owned();
        let is_pin_valid = tokio::task::spawn_blocking(move || verify(&pin_clone, &pin_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação do PIN: {}", e))??;

        if !is_pin_valid {
            return Err(AppError::Forbidden("PIN incorreto.".to_string()));
        }

        Ok(SalaryView {
            salary: secrets.salary,
        })
    }

    pub async fn set_salary_pin(&self, user: &User, pin: &str) -> Result<(), AppError> {
        let staff = self.staff_of_user(user).await?;
        let secrets = self
            .staff_repo
            .salary_secrets(&self.pool, staff.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Funcionário não encontrado.".to_string()))?;

        if secrets.salary_pin.is_some() {
            return Err(AppError::Conflict(
                "O PIN já foi configurado. Use o fluxo de redefinição.".to_string(),
            ));
        }

        let pin_hash = hash_blocking(pin).await?;
        self.staff_repo
            .set_salary_pin(&self.pool, staff.id, &pin_hash)
            .await
    }

    /// Gera o token de redefinição com validade curta. O envio por e-mail
    /// fica fora deste serviço; o token sai apenas no log operacional.
    pub async fn forgot_salary_pin(&self, user: &User) -> Result<(), AppError> {
        let staff = self.staff_of_user(user).await?;

        let token = Uuid::new_v4().to_string();
        let expires = Utc::now() + chrono::Duration::minutes(PIN_RESET_TTL_MINUTES);

        self.staff_repo
            .set_pin_reset(&self.pool, staff.id, &token, expires)
            .await?;

        tracing::info!(
            "🔑 Token de redefinição de PIN gerado para {}: {}",
            staff.staff_id,
            token
        );
        Ok(())
    }

    pub async fn reset_salary_pin(
        &self,
        user: &User,
        token: &str,
        new_pin: &str,
    ) -> Result<(), AppError> {
        let staff = self.staff_of_user(user).await?;
        let secrets = self
            .staff_repo
            .salary_secrets(&self.pool, staff.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Funcionário não encontrado.".to_string()))?;

        let valid = match (secrets.pin_reset_token, secrets.pin_reset_expires) {
            (Some(stored), Some(expires)) => stored == token && expires > Utc::now(),
            _ => false,
        };
        if !valid {
            return Err(AppError::Forbidden(
                "Token de redefinição inválido ou expirado.".to_string(),
            ));
        }

        let pin_hash = hash_blocking(new_pin).await?;
        self.staff_repo
            .reset_salary_pin(&self.pool, staff.id, &pin_hash)
            .await
    }

    // O cadastro do usuário autenticado — os fluxos de autoatendimento
    // partem daqui.
    pub async fn staff_of_user(&self, user: &User) -> Result<Staff, AppError> {
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

async fn hash_blocking(value: &str) -> Result<String, AppError> {
    let value = value.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&value, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_id_is_zero_padded_to_four_digits() {
        assert_eq!(format_staff_id(1), "STF-0001");
        assert_eq!(format_staff_id(42), "STF-0042");
        assert_eq!(format_staff_id(9999), "STF-9999");

        // Acima de quatro dígitos a sequência continua sem truncar.
        assert_eq!(format_staff_id(12345), "STF-12345");
    }
}
