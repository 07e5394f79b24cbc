use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};

/// A named tag attachable to tasks.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Keyword {
    pub id: i64,
    pub name: String,
    #[serde(with = "crate::serde_helpers::date_dmy")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::serde_helpers::date_dmy")]
    pub updated_at: DateTime<Utc>,
}

impl Keyword {
    /// Find all keywords, newest first.
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Keyword>(
            "SELECT id, name, created_at, updated_at
             FROM keywords
             ORDER BY id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Insert a keyword inside its own transaction.
    pub async fn create(pool: &SqlitePool, name: &str) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let keyword = Self::insert(&mut *tx, name).await?;
        tx.commit().await?;
        Ok(keyword)
    }

    pub async fn insert<'a, E>(executor: E, name: &str) -> Result<Self, sqlx::Error>
    where
        E: Executor<'a, Database = Sqlite>,
    {
        let now = Utc::now();
        sqlx::query_as::<_, Keyword>(
            "INSERT INTO keywords (name, created_at, updated_at)
             VALUES (?, ?, ?)
             RETURNING id, name, created_at, updated_at",
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await
    }

    /// Fetch the subset of `ids` that exist, ordered by id ascending.
    pub async fn find_by_ids<'a, E>(executor: E, ids: &[i64]) -> Result<Vec<Self>, sqlx::Error>
    where
        E: Executor<'a, Database = Sqlite>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, name, created_at, updated_at
             FROM keywords
             WHERE id IN ({placeholders})
             ORDER BY id ASC",
        );
        let mut query = sqlx::query_as::<_, Keyword>(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        query.fetch_all(executor).await
    }
}
