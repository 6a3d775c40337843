//! Chapter Command Handlers - 章节生命周期
//!
//! 单章节的创建/更新/删除：
//! 1. 校验归属
//! 2. 校验长度约束
//! 3. 持有项目写锁完成写入与统计重算

use std::sync::Arc;

use crate::application::commands::{CreateChapter, DeleteChapter, UpdateChapter};
use crate::application::error::ApplicationError;
use crate::application::ownership::project_owned_by;
use crate::application::ports::{
    ChapterRecord, ChapterRepositoryPort, ProjectLockPort, ProjectRepositoryPort, RepositoryError,
};
use crate::application::stats_aggregator::ProjectStatsAggregator;
use crate::domain::chapter::{ChapterChanges, NewChapter};

// ============================================================================
// CreateChapter
// ============================================================================

/// CreateChapter Handler
pub struct CreateChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    project_repo: Arc<dyn ProjectRepositoryPort>,
    locks: Arc<dyn ProjectLockPort>,
    aggregator: Arc<ProjectStatsAggregator>,
}

impl CreateChapterHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        project_repo: Arc<dyn ProjectRepositoryPort>,
        locks: Arc<dyn ProjectLockPort>,
        aggregator: Arc<ProjectStatsAggregator>,
    ) -> Self {
        Self {
            chapter_repo,
            project_repo,
            locks,
            aggregator,
        }
    }

    pub async fn handle(&self, command: CreateChapter) -> Result<ChapterRecord, ApplicationError> {
        let project_id = command.project_id;
        project_owned_by(self.project_repo.as_ref(), project_id, command.user).await?;

        let new_chapter = NewChapter::new(command.title, command.content, command.outline)?;

        // 编号分配与统计重算作为整体串行执行
        let _guard = self.locks.lock(project_id).await;

        let chapter = self.chapter_repo.create(project_id, &new_chapter).await?;
        self.aggregator.recompute(project_id).await?;

        tracing::info!(
            project_id = %project_id,
            chapter_id = %chapter.id,
            chapter_number = chapter.chapter_number,
            order_index = chapter.order_index,
            word_count = chapter.word_count,
            "Chapter created"
        );

        Ok(chapter)
    }
}

// ============================================================================
// UpdateChapter
// ============================================================================

/// UpdateChapter Handler
pub struct UpdateChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    locks: Arc<dyn ProjectLockPort>,
    aggregator: Arc<ProjectStatsAggregator>,
}

impl UpdateChapterHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        locks: Arc<dyn ProjectLockPort>,
        aggregator: Arc<ProjectStatsAggregator>,
    ) -> Self {
        Self {
            chapter_repo,
            locks,
            aggregator,
        }
    }

    pub async fn handle(&self, command: UpdateChapter) -> Result<ChapterRecord, ApplicationError> {
        let chapter_id = command.chapter_id;

        // 经由所属项目校验归属
        let existing = self
            .chapter_repo
            .find_owned(chapter_id, command.user)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", chapter_id))?;

        let changes = ChapterChanges::new(
            command.title,
            command.content,
            command.outline,
            command.status,
        )?;

        if changes.is_empty() {
            tracing::debug!(chapter_id = %chapter_id, "Empty update, only updated_at is refreshed");
        }

        let project_id = existing.project_id;
        let _guard = self.locks.lock(project_id).await;

        let chapter = match self.chapter_repo.update(chapter_id, &changes).await {
            Ok(chapter) => chapter,
            Err(RepositoryError::NotFound(_)) => {
                return Err(ApplicationError::not_found("Chapter", chapter_id))
            }
            Err(e) => return Err(e.into()),
        };
        self.aggregator.recompute(project_id).await?;

        tracing::info!(
            project_id = %project_id,
            chapter_id = %chapter_id,
            content_changed = changes.content.is_some(),
            word_count = chapter.word_count,
            status = %chapter.status,
            "Chapter updated"
        );

        Ok(chapter)
    }
}

// ============================================================================
// DeleteChapter
// ============================================================================

/// 删除章节响应
#[derive(Debug, Clone)]
pub struct DeleteChapterResponse {
    pub message: String,
}

/// DeleteChapter Handler
pub struct DeleteChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    locks: Arc<dyn ProjectLockPort>,
    aggregator: Arc<ProjectStatsAggregator>,
}

impl DeleteChapterHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        locks: Arc<dyn ProjectLockPort>,
        aggregator: Arc<ProjectStatsAggregator>,
    ) -> Self {
        Self {
            chapter_repo,
            locks,
            aggregator,
        }
    }

    pub async fn handle(
        &self,
        command: DeleteChapter,
    ) -> Result<DeleteChapterResponse, ApplicationError> {
        let chapter_id = command.chapter_id;

        let chapter = self
            .chapter_repo
            .find_owned(chapter_id, command.user)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", chapter_id))?;

        let project_id = chapter.project_id;
        let _guard = self.locks.lock(project_id).await;

        self.chapter_repo.delete(chapter_id).await?;
        self.aggregator.recompute(project_id).await?;

        tracing::info!(
            project_id = %project_id,
            chapter_id = %chapter_id,
            title = %chapter.title,
            "Chapter deleted"
        );

        Ok(DeleteChapterResponse {
            message: format!("Chapter '{}' deleted successfully", chapter.title),
        })
    }
}
