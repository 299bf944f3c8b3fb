//! Relational storage for saved calculations.
//!
//! One table, two operations. Rows are insert-only; their lifetime
//! belongs to the database.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::api::{CalculationRecord, ValidCalculation};

#[async_trait]
pub trait CalculationStore: Send + Sync {
    async fn create_calculation(
        &self,
        calculation: &ValidCalculation,
    ) -> Result<CalculationRecord>;
    async fn get_calculations(&self) -> Result<Vec<CalculationRecord>>;
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .with_context(|| format!("Failed to open history database: {database_url}"))?;
        migrate(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CalculationStore for SqliteStore {
    async fn create_calculation(
        &self,
        calculation: &ValidCalculation,
    ) -> Result<CalculationRecord> {
        let created_at: DateTime<Utc> = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO calculations
            (lifetime_profit, acquisition_budget_pct, conversion_rate_pct, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, lifetime_profit, acquisition_budget_pct, conversion_rate_pct, created_at
            "#,
        )
        .bind(calculation.lifetime_profit.to_string())
        .bind(calculation.acquisition_budget_pct.to_string())
        .bind(calculation.conversion_rate_pct.to_string())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record_from_row(&row))
    }

    async fn get_calculations(&self) -> Result<Vec<CalculationRecord>> {
        // Insertion order; the API contract promises no ordering.
        let rows = sqlx::query(
            "SELECT id, lifetime_profit, acquisition_budget_pct, conversion_rate_pct, created_at \
             FROM calculations ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }
}

fn record_from_row(row: &SqliteRow) -> CalculationRecord {
    CalculationRecord {
        id: row.get("id"),
        lifetime_profit: row.get("lifetime_profit"),
        acquisition_budget_pct: row.get("acquisition_budget_pct"),
        conversion_rate_pct: row.get("conversion_rate_pct"),
        created_at: row.get("created_at"),
    }
}
