//! Repository for the `clientes` table.

use gestion_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, ClientFilters, CreateClient, UpdateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre, email, empresa, activo, fecha_creacion";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    ///
    /// If `activo` is `None` in the input, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clientes (nombre, email, empresa, activo)
             VALUES ($1, $2, $3, COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.nombre)
            .bind(&input.email)
            .bind(&input.empresa)
            .bind(input.activo)
            .fetch_one(pool)
            .await
    }

    /// Find a client by its internal ID. Inactive clients are included.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clientes WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a client row with this ID exists (active or not).
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clientes WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List clients matching `filters`, most recently created first.
    pub async fn list(pool: &PgPool, filters: &ClientFilters) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clientes
             WHERE ($1::BOOLEAN IS NULL OR activo = $1)
               AND ($2::TEXT IS NULL OR empresa = $2)
             ORDER BY fecha_creacion DESC, id DESC"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(filters.activo)
            .bind(&filters.empresa)
            .fetch_all(pool)
            .await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clientes SET
                nombre = COALESCE($2, nombre),
                email = COALESCE($3, email),
                empresa = COALESCE($4, empresa),
                activo = COALESCE($5, activo)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.nombre)
            .bind(&input.email)
            .bind(&input.empresa)
            .bind(input.activo)
            .fetch_optional(pool)
            .await
    }

    /// Logically delete a client by setting `activo = false`.
    ///
    /// The row, its projects and its email reservation all persist. Returns
    /// `true` if the row exists, whether or not it was already inactive.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE clientes SET activo = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
