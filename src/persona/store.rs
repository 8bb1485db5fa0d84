// src/persona/store.rs

use sqlx::SqlitePool;
use tracing::info;

use crate::api::error::ApiError;
use crate::persona::types::{
    CreatePersonaRequest, Persona, UpdatePersonaRequest, coerce_annual_income,
};

/// Owns every read and write of the personas table. Handlers never touch
/// the pool directly.
pub struct PersonaStore {
    pool: SqlitePool,
}

impl PersonaStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, req: CreatePersonaRequest) -> Result<Persona, ApiError> {
        let name = req
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ApiError::validation("name is required"))?;

        let annual_income = match &req.annual_income {
            Some(value) if !value.is_null() => Some(coerce_annual_income(value)?),
            _ => None,
        };

        let result = sqlx::query(
            r#"
            INSERT INTO personas (name, location, annual_income, extras)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&name)
        .bind(&req.location)
        .bind(annual_income)
        .bind(&req.extras)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(%id, "created persona");

        Ok(Persona {
            id,
            name,
            location: req.location,
            annual_income,
            extras: req.extras,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Persona, ApiError> {
        sqlx::query_as::<_, Persona>(
            r#"
            SELECT id, name, location, annual_income, extras
            FROM personas
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("persona not found"))
    }

    /// Insertion order, so listings are deterministic.
    pub async fn list(&self) -> Result<Vec<Persona>, ApiError> {
        let personas = sqlx::query_as::<_, Persona>(
            r#"
            SELECT id, name, location, annual_income, extras
            FROM personas
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(personas)
    }

    /// Applies only the keys present in the payload. All validation happens
    /// before the single UPDATE, so a rejected payload leaves the row as it
    /// was.
    pub async fn update(&self, id: i64, req: UpdatePersonaRequest) -> Result<Persona, ApiError> {
        let mut persona = self.get(id).await?;

        if let Some(name) = req.name {
            if name.is_empty() {
                return Err(ApiError::validation("name must not be empty"));
            }
            persona.name = name;
        }
        if let Some(location) = req.location {
            persona.location = location;
        }
        if let Some(annual_income) = req.annual_income {
            persona.annual_income = match annual_income {
                Some(value) => Some(coerce_annual_income(&value)?),
                None => None,
            };
        }
        if let Some(extras) = req.extras {
            persona.extras = extras;
        }

        sqlx::query(
            r#"
            UPDATE personas
            SET name = ?, location = ?, annual_income = ?, extras = ?
            WHERE id = ?
            "#,
        )
        .bind(&persona.name)
        .bind(&persona.location)
        .bind(persona.annual_income)
        .bind(&persona.extras)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(persona)
    }

    /// Idempotent failure mode: once a row is gone, every further delete of
    /// the same id reports NotFound.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM personas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("persona not found"));
        }

        info!(%id, "deleted persona");
        Ok(())
    }
}
