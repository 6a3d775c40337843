//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::chapter::{ChapterChanges, ChapterStatus, NewChapter};
use crate::domain::project::{ProjectStats, UserId};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Project Repository
// ============================================================================

/// 项目实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// 已发布章节总字数（派生字段）
    pub word_count: u64,
    /// 已发布章节数（派生字段）
    pub chapter_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == *user.as_uuid()
    }
}

/// Project Repository Port
#[async_trait]
pub trait ProjectRepositoryPort: Send + Sync {
    /// 保存项目
    async fn save(&self, project: &ProjectRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找项目
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectRecord>, RepositoryError>;

    /// 获取用户的所有项目（最近创建在前）
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<ProjectRecord>, RepositoryError>;

    /// 删除项目及其全部章节
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// 写入派生统计字段
    async fn update_stats(
        &self,
        id: Uuid,
        stats: &ProjectStats,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
}

// ============================================================================
// Chapter Repository
// ============================================================================

/// 章节实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ChapterRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub outline: Option<String>,
    /// 项目内唯一，创建时分配，之后不再变化
    pub chapter_number: i64,
    /// 项目内阅读顺序
    pub order_index: i64,
    /// 始终等于 count_words(content)
    pub word_count: usize,
    pub status: ChapterStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chapter Repository Port
///
/// 所有查询都限定在单个项目内
#[async_trait]
pub trait ChapterRepositoryPort: Send + Sync {
    /// 创建章节
    ///
    /// chapter_number 与 order_index 取项目的编号高水位（空项目从 1 开始，已分配的编号不再复用）
    async fn create(
        &self,
        project_id: Uuid,
        chapter: &NewChapter,
    ) -> Result<ChapterRecord, RepositoryError>;

    /// 在指定项目中查找章节
    async fn find_in_project(
        &self,
        id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 查找属于指定用户（经由所属项目）的章节
    async fn find_owned(
        &self,
        id: Uuid,
        owner: UserId,
    ) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 获取项目的全部章节（按 order_index 升序）
    async fn list_by_project(&self, project_id: Uuid)
        -> Result<Vec<ChapterRecord>, RepositoryError>;

    /// 获取项目中指定状态的章节（按 order_index 升序）
    async fn list_by_status(
        &self,
        project_id: Uuid,
        status: ChapterStatus,
    ) -> Result<Vec<ChapterRecord>, RepositoryError>;

    /// 应用部分更新并返回更新后的章节
    async fn update(
        &self,
        id: Uuid,
        changes: &ChapterChanges,
    ) -> Result<ChapterRecord, RepositoryError>;

    /// 删除章节
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// 将 order_index >= from_order_index 的章节状态统一设置为 status（原子操作）
    ///
    /// 返回受影响的行数
    async fn bulk_set_status(
        &self,
        project_id: Uuid,
        from_order_index: i64,
        status: ChapterStatus,
    ) -> Result<u64, RepositoryError>;

    /// 仅当章节属于该项目且仍为草稿时发布
    ///
    /// 写入失败时回滚该章节的改动；不满足条件时返回 `None`
    async fn publish_if_draft(
        &self,
        id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 统计项目中已发布章节
    async fn published_stats(&self, project_id: Uuid) -> Result<ProjectStats, RepositoryError> {
        // 默认实现：读取已发布章节后折叠
        let chapters = self
            .list_by_status(project_id, ChapterStatus::Published)
            .await?;
        Ok(ProjectStats::from_published(
            chapters.iter().map(|c| (c.word_count, c.updated_at)),
        ))
    }
}
