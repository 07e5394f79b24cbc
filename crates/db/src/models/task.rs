use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite, SqliteConnection, SqlitePool};
use thiserror::Error;

use super::keyword::Keyword;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("Task not found")]
    TaskNotFound,
    #[error("Unknown keyword ids: {0:?}")]
    UnknownKeywords(Vec<i64>),
}

/// A unit of work with a title and a done/pending state.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub is_done: bool,
    #[serde(with = "crate::serde_helpers::date_dmy")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::serde_helpers::date_dmy")]
    pub updated_at: DateTime<Utc>,
}

/// A task together with its attached keywords, as the list and create
/// endpoints return it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWithKeywords {
    #[serde(flatten)]
    pub task: Task,
    pub keywords: Vec<Keyword>,
}

impl std::ops::Deref for TaskWithKeywords {
    type Target = Task;
    fn deref(&self) -> &Self::Target {
        &self.task
    }
}

impl std::ops::DerefMut for TaskWithKeywords {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.task
    }
}

impl Task {
    pub async fn find_by_id<'a, E>(executor: E, id: i64) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'a, Database = Sqlite>,
    {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, is_done, created_at, updated_at
             FROM tasks
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Find all tasks, newest first, with their keywords eager-loaded.
    /// One join query covers the whole set instead of a fetch per task.
    pub async fn find_all_with_keywords(
        pool: &SqlitePool,
    ) -> Result<Vec<TaskWithKeywords>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, is_done, created_at, updated_at
             FROM tasks
             ORDER BY id DESC",
        )
        .fetch_all(pool)
        .await?;

        let rows = sqlx::query_as::<_, (i64, i64, String, DateTime<Utc>, DateTime<Utc>)>(
            "SELECT tk.task_id, k.id, k.name, k.created_at, k.updated_at
             FROM task_keywords tk
             INNER JOIN keywords k ON k.id = tk.keyword_id
             ORDER BY tk.task_id ASC, k.id ASC",
        )
        .fetch_all(pool)
        .await?;

        let mut by_task: HashMap<i64, Vec<Keyword>> = HashMap::new();
        for (task_id, id, name, created_at, updated_at) in rows {
            by_task.entry(task_id).or_default().push(Keyword {
                id,
                name,
                created_at,
                updated_at,
            });
        }

        Ok(tasks
            .into_iter()
            .map(|task| {
                let keywords = by_task.remove(&task.id).unwrap_or_default();
                TaskWithKeywords { task, keywords }
            })
            .collect())
    }

    /// Create a task and attach the given keywords in one transaction.
    /// Any unknown keyword id fails the whole operation; nothing is
    /// persisted.
    pub async fn create_with_keywords(
        pool: &SqlitePool,
        title: &str,
        keyword_ids: &[i64],
    ) -> Result<TaskWithKeywords, TaskError> {
        let mut tx = pool.begin().await?;
        let task = Self::insert(&mut *tx, title).await?;

        if !keyword_ids.is_empty() {
            let mut ids: Vec<i64> = keyword_ids.to_vec();
            ids.sort_unstable();
            ids.dedup();

            let found = Keyword::find_by_ids(&mut *tx, &ids).await?;
            if found.len() != ids.len() {
                // Dropping the transaction here rolls the insert back.
                let known: HashSet<i64> = found.iter().map(|k| k.id).collect();
                let missing = ids.into_iter().filter(|id| !known.contains(id)).collect();
                return Err(TaskError::UnknownKeywords(missing));
            }
            Self::attach_keywords(&mut tx, task.id, &ids).await?;
        }

        let keywords = Self::keywords(&mut *tx, task.id).await?;
        tx.commit().await?;
        Ok(TaskWithKeywords { task, keywords })
    }

    /// Flip `is_done` inside a transaction and return the updated task.
    pub async fn toggle(pool: &SqlitePool, id: i64) -> Result<Self, TaskError> {
        let mut tx = pool.begin().await?;
        let task = Self::find_by_id(&mut *tx, id)
            .await?
            .ok_or(TaskError::TaskNotFound)?;

        let updated = sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET is_done = ?, updated_at = ?
             WHERE id = ?
             RETURNING id, title, is_done, created_at, updated_at",
        )
        .bind(!task.is_done)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn insert<'a, E>(executor: E, title: &str) -> Result<Self, sqlx::Error>
    where
        E: Executor<'a, Database = Sqlite>,
    {
        let now = Utc::now();
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, is_done, created_at, updated_at)
             VALUES (?, 0, ?, ?)
             RETURNING id, title, is_done, created_at, updated_at",
        )
        .bind(title)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await
    }

    /// Keywords attached to a task, ordered by id ascending.
    pub async fn keywords<'a, E>(executor: E, task_id: i64) -> Result<Vec<Keyword>, sqlx::Error>
    where
        E: Executor<'a, Database = Sqlite>,
    {
        sqlx::query_as::<_, Keyword>(
            "SELECT k.id, k.name, k.created_at, k.updated_at
             FROM keywords k
             INNER JOIN task_keywords tk ON tk.keyword_id = k.id
             WHERE tk.task_id = ?
             ORDER BY k.id ASC",
        )
        .bind(task_id)
        .fetch_all(executor)
        .await
    }

    async fn attach_keywords(
        conn: &mut SqliteConnection,
        task_id: i64,
        keyword_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now();
        for keyword_id in keyword_ids {
            sqlx::query(
                "INSERT INTO task_keywords (task_id, keyword_id, created_at)
                 VALUES (?, ?, ?)
                 ON CONFLICT (task_id, keyword_id) DO NOTHING",
            )
            .bind(task_id)
            .bind(keyword_id)
            .bind(now)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}
