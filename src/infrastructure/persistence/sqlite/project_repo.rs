//! SQLite Project Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::codec::{db_error, format_timestamp, parse_timestamp, parse_uuid};
use super::DbPool;
use crate::application::ports::{ProjectRecord, ProjectRepositoryPort, RepositoryError};
use crate::domain::project::{ProjectStats, UserId};

/// SQLite Project Repository
pub struct SqliteProjectRepository {
    pool: DbPool,
}

impl SqliteProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProjectRow {
    id: String,
    owner_id: String,
    name: String,
    description: Option<String>,
    word_count: i64,
    chapter_count: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ProjectRow> for ProjectRecord {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(ProjectRecord {
            id: parse_uuid(&row.id)?,
            owner_id: parse_uuid(&row.owner_id)?,
            name: row.name,
            description: row.description,
            word_count: row.word_count.max(0) as u64,
            chapter_count: row.chapter_count.max(0) as u64,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[async_trait]
impl ProjectRepositoryPort for SqliteProjectRepository {
    async fn save(&self, project: &ProjectRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, owner_id, name, description, word_count, chapter_count, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(project.id.to_string())
        .bind(project.owner_id.to_string())
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.word_count as i64)
        .bind(project.chapter_count as i64)
        .bind(format_timestamp(&project.created_at))
        .bind(format_timestamp(&project.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectRecord>, RepositoryError> {
        let row: Option<ProjectRow> = sqlx::query_as(
            "SELECT id, owner_id, name, description, word_count, chapter_count, created_at, updated_at FROM projects WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(ProjectRecord::try_from).transpose()
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<ProjectRecord>, RepositoryError> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            "SELECT id, owner_id, name, description, word_count, chapter_count, created_at, updated_at FROM projects WHERE owner_id = ? ORDER BY created_at DESC",
        )
        .bind(owner.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(ProjectRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        // 使用事务确保原子性
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM chapters WHERE project_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("project {}", id)));
        }

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn update_stats(
        &self,
        id: Uuid,
        stats: &ProjectStats,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE projects SET word_count = ?, chapter_count = ?, updated_at = ? WHERE id = ?",
        )
        .bind(stats.word_count as i64)
        .bind(stats.chapter_count as i64)
        .bind(format_timestamp(&updated_at))
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("project {}", id)));
        }

        Ok(())
    }
}
