//! Record store adapter — the only code that talks SQL.
//!
//! `AppState` holds an `Arc<dyn CurriculoStore>`; production wires in
//! `PgCurriculoStore`, tests wire in an in-memory store.
//! Every caller-supplied value goes through `.bind()`, never into the query text.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::curriculo::{CurriculoRow, NewCurriculo};

#[async_trait]
pub trait CurriculoStore: Send + Sync {
    /// Inserts one row and returns it with its generated id.
    async fn insert(&self, curriculo: &NewCurriculo) -> Result<CurriculoRow, AppError>;

    /// Every stored row, in whatever order the backend yields them.
    async fn fetch_all(&self) -> Result<Vec<CurriculoRow>, AppError>;

    /// `Ok(None)` when no row has this id.
    async fn fetch_by_id(&self, id: i32) -> Result<Option<CurriculoRow>, AppError>;
}

pub struct PgCurriculoStore {
    pool: PgPool,
}

impl PgCurriculoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurriculoStore for PgCurriculoStore {
    async fn insert(&self, curriculo: &NewCurriculo) -> Result<CurriculoRow, AppError> {
        let row = sqlx::query_as::<_, CurriculoRow>(
            r#"
            INSERT INTO curriculos
                (nome, telefone, email, endereco_web, experiencia_profissional)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nome, telefone, email, endereco_web, experiencia_profissional
            "#,
        )
        .bind(&curriculo.nome)
        .bind(&curriculo.telefone)
        .bind(&curriculo.email)
        .bind(&curriculo.endereco_web)
        .bind(&curriculo.experiencia_profissional)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn fetch_all(&self) -> Result<Vec<CurriculoRow>, AppError> {
        let rows = sqlx::query_as::<_, CurriculoRow>(
            "SELECT id, nome, telefone, email, endereco_web, experiencia_profissional FROM curriculos",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn fetch_by_id(&self, id: i32) -> Result<Option<CurriculoRow>, AppError> {
        let row = sqlx::query_as::<_, CurriculoRow>(
            "SELECT id, nome, telefone, email, endereco_web, experiencia_profissional FROM curriculos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
