// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do usuário autenticado
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Autoatendimento do funcionário: conclusão de perfil e salário próprio
    let staff_self_routes = Router::new()
        .route("/profile/complete", post(handlers::staff::complete_profile))
        .route("/salary/view", post(handlers::staff::view_salary))
        .route("/salary/pin", post(handlers::staff::set_salary_pin))
        .route("/salary/pin/forgot", post(handlers::staff::forgot_salary_pin))
        .route("/salary/pin/reset", post(handlers::staff::reset_salary_pin))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Gestão de funcionários (o roster mora aqui) — só admins.
    // A ordem das layers importa: a última adicionada roda primeiro.
    let staff_admin_routes = Router::new()
        .route(
            "/",
            get(handlers::staff::list_staffs).post(handlers::staff::create_staff),
        )
        .route(
            "/{id}",
            get(handlers::staff::get_staff).put(handlers::staff::update_staff),
        )
        .route("/{id}/salary", put(handlers::staff::update_salary))
        .route("/{id}/salary/history", get(handlers::staff::salary_history))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Presença: check-in/out do próprio funcionário
    let attendance_self_routes = Router::new()
        .route("/check-in", post(handlers::attendance::check_in))
        .route("/check-out", post(handlers::attendance::check_out))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Presença: correções e listagem administrativa
    let attendance_admin_routes = Router::new()
        .route("/", get(handlers::attendance::list))
        .route("/{id}/status", put(handlers::attendance::update_status))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let shift_routes = Router::new()
        .route(
            "/",
            post(handlers::shift::create_shift).get(handlers::shift::list_shifts),
        )
        .route("/assign", post(handlers::shift::assign_shift))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let branch_routes = Router::new()
        .route(
            "/",
            post(handlers::branch::create_branch).get(handlers::branch::list_branches),
        )
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Licenças: pedido, listagem (com escopo por papel no serviço) e saldo
    let leave_self_routes = Router::new()
        .route(
            "/",
            post(handlers::leave::create_request).get(handlers::leave::list_requests),
        )
        .route("/balance", get(handlers::leave::my_balances))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Licenças: revisão, revogação, catálogo e alocação — só admins
    let leave_admin_routes = Router::new()
        .route("/{id}/review", put(handlers::leave::review_request))
        .route("/{id}/revoke", put(handlers::leave::revoke_request))
        .route(
            "/types",
            post(handlers::leave::create_type).get(handlers::leave::list_types),
        )
        .route("/balance/allocate", post(handlers::leave::allocate_balance))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/staffs", staff_self_routes)
        .nest("/api/staffs", staff_admin_routes)
        .nest("/api/attendance", attendance_self_routes)
        .nest("/api/attendance", attendance_admin_routes)
        .nest("/api/shifts", shift_routes)
        .nest("/api/branches", branch_routes)
        .nest("/api/leaves", leave_self_routes)
        .nest("/api/leaves", leave_admin_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
