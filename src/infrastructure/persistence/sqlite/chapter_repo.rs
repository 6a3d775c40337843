//! SQLite Chapter Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::codec::{db_error, format_timestamp, now, parse_timestamp, parse_uuid};
use super::DbPool;
use crate::application::ports::{ChapterRecord, ChapterRepositoryPort, RepositoryError};
use crate::domain::chapter::{ChapterChanges, ChapterStatus, NewChapter};
use crate::domain::project::{ProjectStats, UserId};

/// SQLite Chapter Repository
pub struct SqliteChapterRepository {
    pool: DbPool,
}

impl SqliteChapterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ChapterRow {
    id: String,
    project_id: String,
    title: String,
    content: Option<String>,
    outline: Option<String>,
    chapter_number: i64,
    order_index: i64,
    word_count: i64,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ChapterRow> for ChapterRecord {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        let status = ChapterStatus::from_str(&row.status).ok_or_else(|| {
            RepositoryError::SerializationError(format!("unknown chapter status: {}", row.status))
        })?;

        Ok(ChapterRecord {
            id: parse_uuid(&row.id)?,
            project_id: parse_uuid(&row.project_id)?,
            title: row.title,
            content: row.content,
            outline: row.outline,
            chapter_number: row.chapter_number,
            order_index: row.order_index,
            word_count: row.word_count.max(0) as usize,
            status,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct PublishedStatsRow {
    word_count: i64,
    chapter_count: i64,
    latest_update: Option<String>,
}

impl SqliteChapterRepository {
    async fn fetch_by_id<'e, E>(
        executor: E,
        id: Uuid,
    ) -> Result<Option<ChapterRecord>, RepositoryError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row: Option<ChapterRow> = sqlx::query_as(
            "SELECT id, project_id, title, content, outline, chapter_number, order_index, word_count, status, created_at, updated_at FROM chapters WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await
        .map_err(db_error)?;

        row.map(ChapterRecord::try_from).transpose()
    }
}

#[async_trait]
impl ChapterRepositoryPort for SqliteChapterRepository {
    async fn create(
        &self,
        project_id: Uuid,
        chapter: &NewChapter,
    ) -> Result<ChapterRecord, RepositoryError> {
        let id = Uuid::new_v4();
        let timestamp = format_timestamp(&now());

        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // 从项目的高水位领取编号，删除章节后编号也不会被再次分配；UNIQUE 约束兜底
        let counters: Option<(i64, i64)> = sqlx::query_as(
            r#"
            UPDATE projects SET
                next_chapter_number = next_chapter_number + 1,
                next_order_index = next_order_index + 1
            WHERE id = ?
            RETURNING next_chapter_number - 1, next_order_index - 1
            "#,
        )
        .bind(project_id.to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;

        let (chapter_number, order_index) =
            counters.ok_or_else(|| RepositoryError::NotFound(format!("project {}", project_id)))?;

        sqlx::query(
            r#"
            INSERT INTO chapters (id, project_id, title, content, outline, chapter_number,
                                  order_index, word_count, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(project_id.to_string())
        .bind(chapter.title.as_str())
        .bind(chapter.content.as_ref().map(|c| c.as_str()))
        .bind(chapter.outline.as_ref().map(|o| o.as_str()))
        .bind(chapter_number)
        .bind(order_index)
        .bind(chapter.word_count() as i64)
        .bind(ChapterStatus::Draft.as_str())
        .bind(&timestamp)
        .bind(&timestamp)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        let record = Self::fetch_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("chapter {}", id)))?;

        tx.commit().await.map_err(db_error)?;

        Ok(record)
    }

    async fn find_in_project(
        &self,
        id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<ChapterRecord>, RepositoryError> {
        let row: Option<ChapterRow> = sqlx::query_as(
            "SELECT id, project_id, title, content, outline, chapter_number, order_index, word_count, status, created_at, updated_at FROM chapters WHERE id = ? AND project_id = ?",
        )
        .bind(id.to_string())
        .bind(project_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(ChapterRecord::try_from).transpose()
    }

    async fn find_owned(
        &self,
        id: Uuid,
        owner: UserId,
    ) -> Result<Option<ChapterRecord>, RepositoryError> {
        let row: Option<ChapterRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.project_id, c.title, c.content, c.outline, c.chapter_number,
                   c.order_index, c.word_count, c.status, c.created_at, c.updated_at
            FROM chapters c
            JOIN projects p ON p.id = c.project_id
            WHERE c.id = ? AND p.owner_id = ?
            "#,
        )
        .bind(id.to_string())
        .bind(owner.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(ChapterRecord::try_from).transpose()
    }

    async fn list_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<ChapterRecord>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(
            "SELECT id, project_id, title, content, outline, chapter_number, order_index, word_count, status, created_at, updated_at FROM chapters WHERE project_id = ? ORDER BY order_index",
        )
        .bind(project_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(ChapterRecord::try_from).collect()
    }

    async fn list_by_status(
        &self,
        project_id: Uuid,
        status: ChapterStatus,
    ) -> Result<Vec<ChapterRecord>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(
            "SELECT id, project_id, title, content, outline, chapter_number, order_index, word_count, status, created_at, updated_at FROM chapters WHERE project_id = ? AND status = ? ORDER BY order_index",
        )
        .bind(project_id.to_string())
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(ChapterRecord::try_from).collect()
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &ChapterChanges,
    ) -> Result<ChapterRecord, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // NULL 参数表示保持原值；word_count 只随正文一起变化
        let result = sqlx::query(
            r#"
            UPDATE chapters SET
                title = COALESCE(?, title),
                content = COALESCE(?, content),
                outline = COALESCE(?, outline),
                word_count = COALESCE(?, word_count),
                status = COALESCE(?, status),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.title.as_ref().map(|t| t.as_str()))
        .bind(changes.content.as_ref().map(|c| c.as_str()))
        .bind(changes.outline.as_ref().map(|o| o.as_str()))
        .bind(changes.word_count().map(|n| n as i64))
        .bind(changes.status.map(|s| s.as_str()))
        .bind(format_timestamp(&now()))
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("chapter {}", id)));
        }

        let record = Self::fetch_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("chapter {}", id)))?;

        tx.commit().await.map_err(db_error)?;

        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chapters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("chapter {}", id)));
        }

        Ok(())
    }

    async fn bulk_set_status(
        &self,
        project_id: Uuid,
        from_order_index: i64,
        status: ChapterStatus,
    ) -> Result<u64, RepositoryError> {
        // 单条 UPDATE，要么全部生效要么全部不生效
        let result = sqlx::query(
            "UPDATE chapters SET status = ?, updated_at = ? WHERE project_id = ? AND order_index >= ?",
        )
        .bind(status.as_str())
        .bind(format_timestamp(&now()))
        .bind(project_id.to_string())
        .bind(from_order_index)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected())
    }

    async fn publish_if_draft(
        &self,
        id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<ChapterRecord>, RepositoryError> {
        // 每个章节独立事务；出错时 tx 被 drop 即回滚
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let result = sqlx::query(
            "UPDATE chapters SET status = ?, updated_at = ? WHERE id = ? AND project_id = ? AND status = ?",
        )
        .bind(ChapterStatus::Published.as_str())
        .bind(format_timestamp(&now()))
        .bind(id.to_string())
        .bind(project_id.to_string())
        .bind(ChapterStatus::Draft.as_str())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(db_error)?;
            return Ok(None);
        }

        let record = Self::fetch_by_id(&mut *tx, id).await?;

        tx.commit().await.map_err(db_error)?;

        Ok(record)
    }

    async fn published_stats(&self, project_id: Uuid) -> Result<ProjectStats, RepositoryError> {
        let row: PublishedStatsRow = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(word_count), 0) AS word_count,
                   COUNT(*) AS chapter_count,
                   MAX(updated_at) AS latest_update
            FROM chapters
            WHERE project_id = ? AND status = ?
            "#,
        )
        .bind(project_id.to_string())
        .bind(ChapterStatus::Published.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(ProjectStats {
            word_count: row.word_count.max(0) as u64,
            chapter_count: row.chapter_count.max(0) as u64,
            latest_update: row.latest_update.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}
