// src/db/counter_repo.rs

use sqlx::{Executor, Postgres};

use crate::common::error::AppError;

// Sequência atômica por nome. O incremento é um único comando sobre uma
// única linha: o banco serializa escritores concorrentes, então dois
// "complete profile" simultâneos nunca recebem o mesmo valor — ao
// contrário de derivar a sequência de um COUNT da coleção.
#[derive(Clone)]
pub struct CounterRepository;

impl CounterRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn next_value<'e, E>(&self, executor: E, name: &str) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let value = sqlx::query_scalar::<_, i64>(
            "INSERT INTO counters (name, value) VALUES ($1, 1) \
             ON CONFLICT (name) DO UPDATE SET value = counters.value + 1 \
             RETURNING value",
        )
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(value)
    }
}
