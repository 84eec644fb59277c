// src/db/staff_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::staff::{
        CompleteProfilePayload, CreateStaffPayload, EnrichedStaff, PageParams, RosterFilters,
        RosterMeta, RosterPage, RosterRow, SalaryHistory, SalarySecrets, Staff,
        UpdateStaffPayload,
    },
};

// A projeção padrão do cadastro. Salário, PIN e token de redefinição NUNCA
// entram aqui — só saem pelos fluxos dedicados de salário.
const STAFF_COLUMNS: &str = "id, user_id, staff_id, phone, branch_id, department, designation, \
     join_date, status, date_of_birth, national_id, blood_group, address, emergency_contact, \
     father_name, mother_name, exit_date, profile_completed, created_at, updated_at";

// O SELECT achatado do roster: cadastro + identidade + filial + presença de
// hoje + turno vigente, tudo via LEFT JOIN (funcionário sem vínculo continua
// aparecendo).
const ROSTER_SELECT: &str = "SELECT \
     s.id, s.user_id, s.staff_id, s.phone, s.branch_id, s.department, s.designation, \
     s.join_date, s.status, s.date_of_birth, s.national_id, s.blood_group, s.address, \
     s.emergency_contact, s.father_name, s.mother_name, s.exit_date, s.profile_completed, \
     s.created_at, s.updated_at, \
     u.name AS user_name, u.email AS user_email, u.image AS user_image, u.role AS user_role, \
     b.name AS branch_name, \
     a.id AS attendance_id, a.status AS attendance_status, a.check_in, a.check_out, \
     a.late_minutes, a.total_minutes, \
     cs.shift_id AS shift_id, cs.shift_name, cs.start_time AS shift_start_time, \
     cs.end_time AS shift_end_time ";

// Monta a "origem" do roster: FROM + joins. A ordem aqui é contrato:
// a identidade precisa estar no escopo antes dos predicados que dependem
// dela (papel, busca), e o turno vigente precisa ser derivado antes do
// filtro por shiftId.
fn push_roster_source(qb: &mut QueryBuilder<'static, Postgres>, today: NaiveDate) {
    qb.push(" FROM staffs s ");
    qb.push(" LEFT JOIN users u ON u.id = s.user_id ");
    qb.push(" LEFT JOIN branches b ON b.id = s.branch_id ");

    // Presença de HOJE: no máximo um registro — o LIMIT 1 protege contra
    // linhas duplicadas, que o schema não impede.
    qb.push(
        " LEFT JOIN LATERAL ( \
           SELECT ad.id, ad.status, ad.check_in, ad.check_out, ad.late_minutes, ad.total_minutes \
           FROM attendance_days ad \
           WHERE ad.staff_id = s.id AND ad.work_date = ",
    );
    qb.push_bind(today);
    qb.push(" LIMIT 1) a ON TRUE ");

    // Turno vigente: janela [start_date, end_date] contendo hoje, ativo.
    // O desempate entre anomalias (duas vigências simultâneas) é
    // determinístico: vence a atribuição mais recente.
    qb.push(
        " LEFT JOIN LATERAL ( \
           SELECT sh.id AS shift_id, sh.name AS shift_name, sh.start_time, sh.end_time \
           FROM shift_assignments sa \
           JOIN shifts sh ON sh.id = sa.shift_id \
           WHERE sa.staff_id = s.id AND sa.is_active AND sa.start_date <= ",
    );
    qb.push_bind(today);
    qb.push(" AND (sa.end_date IS NULL OR sa.end_date >= ");
    qb.push_bind(today);
    qb.push(") ORDER BY sa.created_at DESC, sa.id DESC LIMIT 1) cs ON TRUE ");
}

// Os estágios de filtro, na ordem do contrato:
// 1. predicados locais do cadastro (mais baratos, estreitam primeiro);
// 2. excludeAdmins — depende do papel do User já juntado (vínculo ausente
//    conta como não-privilegiado, nunca como erro);
// 3. busca textual — alcança campos do cadastro E da identidade;
// 4. filtro pelo turno DERIVADO — só existe depois do lateral.
// As duas pontas do fork (contagem e página) passam por esta MESMA função,
// então o total reportado é sempre consistente com o que a paginação
// alcançaria.
fn push_roster_filters(qb: &mut QueryBuilder<'static, Postgres>, filters: &RosterFilters) {
    qb.push(" WHERE 1 = 1 ");

    if let Some(department) = filters.department {
        qb.push(" AND s.department = ");
        qb.push_bind(department);
    }
    if let Some(designation) = &filters.designation {
        qb.push(" AND s.designation = ");
        qb.push_bind(designation.clone());
    }
    if let Some(status) = filters.status {
        qb.push(" AND s.status = ");
        qb.push_bind(status);
    }
    if let Some(branch_id) = filters.branch_id {
        qb.push(" AND s.branch_id = ");
        qb.push_bind(branch_id);
    }

    if filters.exclude_admins {
        qb.push(" AND (u.role IS NULL OR u.role NOT IN ('admin', 'super_admin')) ");
    }

    if let Some(term) = &filters.search {
        let pattern = format!("%{}%", term);
        qb.push(" AND (s.staff_id ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR s.designation ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR s.department::TEXT ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR u.name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR u.email ILIKE ");
        qb.push_bind(pattern);
        qb.push(") ");
    }

    if let Some(shift_id) = filters.shift_id {
        // Ausência de turno vigente nunca casa com um shiftId concreto.
        qb.push(" AND cs.shift_id = ");
        qb.push_bind(shift_id);
    }
}

fn roster_page_query(
    filters: &RosterFilters,
    page: &PageParams,
    today: NaiveDate,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(ROSTER_SELECT);
    push_roster_source(&mut qb, today);
    push_roster_filters(&mut qb, filters);

    // Mais novos primeiro, com desempate estável para a paginação.
    qb.push(" ORDER BY s.created_at DESC, s.id DESC ");
    qb.push(" LIMIT ");
    qb.push_bind(page.limit);
    qb.push(" OFFSET ");
    qb.push_bind(page.offset());
    qb
}

fn roster_count_query(filters: &RosterFilters, today: NaiveDate) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) ");
    push_roster_source(&mut qb, today);
    push_roster_filters(&mut qb, filters);
    qb
}

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A consulta central do sistema: página filtrada do roster + total
    /// calculado com a mesma sequência de filtros. Leitura pura, sem
    /// transação.
    pub async fn roster(
        &self,
        filters: &RosterFilters,
        page: &PageParams,
        today: NaiveDate,
    ) -> Result<RosterPage, AppError> {
        let total = roster_count_query(filters, today)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let rows = roster_page_query(filters, page, today)
            .build_query_as::<RosterRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(RosterPage {
            staffs: rows.into_iter().map(EnrichedStaff::from).collect(),
            meta: RosterMeta::new(total, page),
        })
    }

    /// Um único funcionário com os mesmos joins do roster.
    pub async fn find_enriched(
        &self,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<Option<EnrichedStaff>, AppError> {
        let mut qb = QueryBuilder::new(ROSTER_SELECT);
        push_roster_source(&mut qb, today);
        qb.push(" WHERE s.id = ");
        qb.push_bind(id);

        let row = qb
            .build_query_as::<RosterRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(EnrichedStaff::from))
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Staff>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staffs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(staff)
    }

    pub async fn find_by_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<Option<Staff>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staffs WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(executor)
        .await?;
        Ok(staff)
    }

    pub async fn find_by_staff_id<'e, E>(
        &self,
        executor: E,
        staff_id: &str,
    ) -> Result<Option<Staff>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staffs WHERE staff_id = $1"
        ))
        .bind(staff_id)
        .fetch_optional(executor)
        .await?;
        Ok(staff)
    }

    /// Criação administrativa: campos mínimos. A violação de unicidade vira
    /// Conflict descritivo em vez de um 500 genérico.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &CreateStaffPayload,
    ) -> Result<Staff, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "INSERT INTO staffs (staff_id, phone, user_id, branch_id, department, designation, join_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {STAFF_COLUMNS}"
        ))
        .bind(&payload.staff_id)
        .bind(&payload.phone)
        .bind(payload.user_id)
        .bind(payload.branch_id)
        .bind(payload.department)
        .bind(&payload.designation)
        .bind(payload.join_date)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Já existe um funcionário com o staffId '{}' ou este telefone.",
                        payload.staff_id
                    ));
                }
            }
            e.into()
        })?;

        Ok(staff)
    }

    /// Conclusão de perfil quando ainda não existe cadastro: cria já
    /// completo, com o staff_id gerado pela sequência atômica.
    pub async fn create_completed<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        staff_id: &str,
        payload: &CompleteProfilePayload,
    ) -> Result<Staff, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "INSERT INTO staffs ( \
                 user_id, staff_id, phone, branch_id, department, designation, join_date, \
                 date_of_birth, national_id, blood_group, address, emergency_contact, \
                 father_name, mother_name, profile_completed \
             ) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, TRUE) \
             RETURNING {STAFF_COLUMNS}"
        ))
        .bind(user_id)
        .bind(staff_id)
        .bind(&payload.phone)
        .bind(payload.branch_id)
        .bind(payload.department)
        .bind(&payload.designation)
        .bind(payload.join_date)
        .bind(payload.date_of_birth)
        .bind(&payload.national_id)
        .bind(&payload.blood_group)
        .bind(&payload.address)
        .bind(&payload.emergency_contact)
        .bind(&payload.father_name)
        .bind(&payload.mother_name)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "Telefone ou vínculo de usuário já cadastrado.".to_string(),
                    );
                }
            }
            e.into()
        })?;

        Ok(staff)
    }

    /// Conclusão de perfil sobre um cadastro pré-existente (criado pelo
    /// admin): mescla os campos enviados e liga o profile_completed.
    pub async fn complete_existing<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &CompleteProfilePayload,
    ) -> Result<Staff, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "UPDATE staffs SET \
                 phone = $2, branch_id = $3, department = $4, designation = $5, join_date = $6, \
                 date_of_birth = $7, national_id = $8, blood_group = $9, address = $10, \
                 emergency_contact = $11, father_name = $12, mother_name = $13, \
                 profile_completed = TRUE, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {STAFF_COLUMNS}"
        ))
        .bind(id)
        .bind(&payload.phone)
        .bind(payload.branch_id)
        .bind(payload.department)
        .bind(&payload.designation)
        .bind(payload.join_date)
        .bind(payload.date_of_birth)
        .bind(&payload.national_id)
        .bind(&payload.blood_group)
        .bind(&payload.address)
        .bind(&payload.emergency_contact)
        .bind(&payload.father_name)
        .bind(&payload.mother_name)
        .fetch_one(executor)
        .await?;

        Ok(staff)
    }

    /// Atualização administrativa: campo ausente mantém o valor atual.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateStaffPayload,
    ) -> Result<Staff, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "UPDATE staffs SET \
                 phone = COALESCE($2, phone), \
                 branch_id = COALESCE($3, branch_id), \
                 department = COALESCE($4, department), \
                 designation = COALESCE($5, designation), \
                 status = COALESCE($6, status), \
                 exit_date = COALESCE($7, exit_date), \
                 address = COALESCE($8, address), \
                 emergency_contact = COALESCE($9, emergency_contact), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {STAFF_COLUMNS}"
        ))
        .bind(id)
        .bind(&payload.phone)
        .bind(payload.branch_id)
        .bind(payload.department)
        .bind(&payload.designation)
        .bind(payload.status)
        .bind(payload.exit_date)
        .bind(&payload.address)
        .bind(&payload.emergency_contact)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Este telefone já está em uso.".to_string());
                }
            }
            e.into()
        })?;

        Ok(staff)
    }

    // --- SALÁRIO ---

    pub async fn salary_secrets<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<SalarySecrets>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let secrets = sqlx::query_as::<_, SalarySecrets>(
            "SELECT salary, salary_visible, salary_pin, pin_reset_token, pin_reset_expires \
             FROM staffs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(secrets)
    }

    /// Variante com lock de linha, para a atualização transacional de
    /// salário (o valor anterior lido é exatamente o que vai para a
    /// trilha de auditoria).
    pub async fn salary_secrets_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<SalarySecrets>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let secrets = sqlx::query_as::<_, SalarySecrets>(
            "SELECT salary, salary_visible, salary_pin, pin_reset_token, pin_reset_expires \
             FROM staffs WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(secrets)
    }

    pub async fn set_salary<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        salary: Decimal,
        salary_visible: Option<bool>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE staffs SET salary = $2, salary_visible = COALESCE($3, salary_visible), \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(salary)
        .bind(salary_visible)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Trilha de auditoria: só INSERT, nunca UPDATE/DELETE.
    pub async fn insert_salary_history<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
        previous_salary: Option<Decimal>,
        new_salary: Decimal,
        changed_by: Uuid,
        reason: Option<&str>,
    ) -> Result<SalaryHistory, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, SalaryHistory>(
            "INSERT INTO salary_histories (staff_id, previous_salary, new_salary, changed_by, reason) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, staff_id, previous_salary, new_salary, changed_by, reason, created_at",
        )
        .bind(staff_id)
        .bind(previous_salary)
        .bind(new_salary)
        .bind(changed_by)
        .bind(reason)
        .fetch_one(executor)
        .await?;
        Ok(entry)
    }

    pub async fn list_salary_history<'e, E>(
        &self,
        executor: E,
        staff_id: Uuid,
    ) -> Result<Vec<SalaryHistory>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, SalaryHistory>(
            "SELECT id, staff_id, previous_salary, new_salary, changed_by, reason, created_at \
             FROM salary_histories WHERE staff_id = $1 ORDER BY created_at DESC",
        )
        .bind(staff_id)
        .fetch_all(executor)
        .await?;
        Ok(entries)
    }

    pub async fn set_salary_pin<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        pin_hash: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE staffs SET salary_pin = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(pin_hash)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn set_pin_reset<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE staffs SET pin_reset_token = $2, pin_reset_expires = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .bind(expires)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Troca o PIN e invalida o token de redefinição de uma vez.
    pub async fn reset_salary_pin<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        pin_hash: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE staffs SET salary_pin = $2, pin_reset_token = NULL, \
             pin_reset_expires = NULL, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(pin_hash)
        .execute(executor)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::staff::{Department, StaffStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
    }

    fn all_filters() -> RosterFilters {
        RosterFilters {
            search: Some("maria".to_string()),
            department: Some(Department::Sales),
            designation: Some("Vendedor".to_string()),
            status: Some(StaffStatus::Active),
            branch_id: Some(Uuid::new_v4()),
            shift_id: Some(Uuid::new_v4()),
            exclude_admins: true,
        }
    }

    fn page_sql(filters: &RosterFilters) -> String {
        roster_page_query(filters, &PageParams { page: 2, limit: 10 }, today()).into_sql()
    }

    fn count_sql(filters: &RosterFilters) -> String {
        roster_count_query(filters, today()).into_sql()
    }

    #[test]
    fn count_and_page_share_the_same_filter_sequence() {
        let filters = all_filters();
        let page = page_sql(&filters);
        let count = count_sql(&filters);

        // Tudo entre o FROM e o ORDER BY final precisa ser idêntico nos
        // dois ramos do fork: é isso que garante total == soma das páginas.
        let page_shared = {
            let start = page.find("FROM staffs").unwrap();
            let end = page.rfind("ORDER BY s.created_at").unwrap();
            page[start..end].trim_end().to_string()
        };
        let count_shared = {
            let start = count.find("FROM staffs").unwrap();
            count[start..].trim_end().to_string()
        };
        assert_eq!(page_shared, count_shared);
    }

    #[test]
    fn filter_stages_keep_their_contract_order() {
        let sql = page_sql(&all_filters());

        let department = sql.find("AND s.department = ").unwrap();
        let role = sql.find("u.role IS NULL").unwrap();
        let search = sql.find("s.staff_id ILIKE").unwrap();
        let shift = sql.find("AND cs.shift_id = ").unwrap();
        let order = sql.rfind("ORDER BY s.created_at DESC").unwrap();
        let limit = sql.rfind("LIMIT").unwrap();

        // Locais do cadastro -> papel -> busca -> turno derivado -> sort ->
        // paginação.
        assert!(department < role);
        assert!(role < search);
        assert!(search < shift);
        assert!(shift < order);
        assert!(order < limit);
    }

    #[test]
    fn search_depends_on_the_user_join() {
        let sql = page_sql(&all_filters());

        // A busca alcança campos da identidade juntada, então o JOIN precisa
        // vir antes dela no texto da consulta.
        let join = sql.find("LEFT JOIN users u").unwrap();
        let search = sql.find("u.name ILIKE").unwrap();
        assert!(join < search);
    }

    #[test]
    fn empty_filters_emit_no_optional_predicates() {
        let sql = page_sql(&RosterFilters::default());

        assert!(!sql.contains("ILIKE"));
        assert!(!sql.contains("u.role IS NULL"));
        assert!(!sql.contains("AND cs.shift_id"));
        assert!(!sql.contains("AND s.department"));

        // Os joins e a ordenação existem sempre.
        assert!(sql.contains("LEFT JOIN users u"));
        assert!(sql.contains("LEFT JOIN branches b"));
        assert!(sql.contains("ORDER BY s.created_at DESC, s.id DESC"));
    }

    #[test]
    fn lateral_sub_lookups_are_guarded_and_deterministic() {
        let sql = page_sql(&RosterFilters::default());

        // Cada sub-consulta devolve no máximo uma linha.
        assert_eq!(sql.matches("LIMIT 1").count(), 2);

        // Janela de vigência do turno + desempate determinístico.
        assert!(sql.contains("sa.end_date IS NULL OR sa.end_date >="));
        assert!(sql.contains("ORDER BY sa.created_at DESC, sa.id DESC"));
    }

    #[test]
    fn exclude_admins_uses_the_privileged_role_set() {
        let filters = RosterFilters {
            exclude_admins: true,
            ..Default::default()
        };
        let sql = page_sql(&filters);
        assert!(sql.contains("NOT IN ('admin', 'super_admin')"));

        // Funcionário sem vínculo continua passando pelo filtro.
        assert!(sql.contains("u.role IS NULL OR"));
    }

    #[test]
    fn count_query_has_no_ordering_or_pagination() {
        let sql = count_sql(&all_filters());
        assert!(sql.starts_with("SELECT COUNT(*)"));
        assert!(!sql.contains("ORDER BY s.created_at"));
        assert!(!sql.contains("OFFSET"));
    }
}
