// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AttendanceRepository, BranchRepository, CounterRepository, LeaveRepository,
        ShiftRepository, StaffRepository, UserRepository,
    },
    services::{AttendanceService, AuthService, LeaveService, ShiftService, StaffService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub auth_service: AuthService,
    pub staff_service: StaffService,
    pub attendance_service: AttendanceService,
    pub shift_service: ShiftService,
    pub leave_service: LeaveService,

    // Filiais são CRUD raso: o handler fala direto com o repositório.
    pub branch_repo: BranchRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let staff_repo = StaffRepository::new(db_pool.clone());
        let branch_repo = BranchRepository::new(db_pool.clone());
        let attendance_repo = AttendanceRepository::new(db_pool.clone());
        let shift_repo = ShiftRepository::new(db_pool.clone());
        let leave_repo = LeaveRepository::new(db_pool.clone());
        let counter_repo = CounterRepository::new();

        let auth_service =
            AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let staff_service = StaffService::new(
            staff_repo.clone(),
            user_repo,
            counter_repo,
            db_pool.clone(),
        );
        let attendance_service = AttendanceService::new(
            attendance_repo,
            shift_repo.clone(),
            staff_repo.clone(),
            db_pool.clone(),
        );
        let shift_service = ShiftService::new(shift_repo, staff_repo.clone(), db_pool.clone());
        let leave_service = LeaveService::new(leave_repo, staff_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            staff_service,
            attendance_service,
            shift_service,
            leave_service,
            branch_repo,
        })
    }
}
