//! Chapter Query Handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ownership::project_owned_by;
use crate::application::ports::{ChapterRecord, ChapterRepositoryPort, ProjectRepositoryPort};
use crate::application::queries::{GetChapter, ListChapters, ListUnpublishedChapters};
use crate::domain::chapter::{content_preview, ChapterStatus};

// ============================================================================
// Response DTOs
// ============================================================================

/// 未发布章节列表项
#[derive(Debug, Clone)]
pub struct UnpublishedChapter {
    pub id: Uuid,
    pub title: String,
    pub chapter_number: i64,
    pub order_index: i64,
    pub word_count: usize,
    /// 正文前 200 字符，超出部分以 `...` 结尾
    pub content_preview: String,
    pub is_current: bool,
    pub updated_at: DateTime<Utc>,
}

impl UnpublishedChapter {
    fn from_record(record: ChapterRecord, current: Option<Uuid>) -> Self {
        Self {
            is_current: current == Some(record.id),
            content_preview: content_preview(record.content.as_deref()),
            id: record.id,
            title: record.title,
            chapter_number: record.chapter_number,
            order_index: record.order_index,
            word_count: record.word_count,
            updated_at: record.updated_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetChapter Handler
pub struct GetChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl GetChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, query: GetChapter) -> Result<ChapterRecord, ApplicationError> {
        self.chapter_repo
            .find_owned(query.chapter_id, query.user)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", query.chapter_id))
    }
}

/// ListChapters Handler
pub struct ListChaptersHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl ListChaptersHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        project_repo: Arc<dyn ProjectRepositoryPort>,
    ) -> Self {
        Self {
            chapter_repo,
            project_repo,
        }
    }

    pub async fn handle(&self, query: ListChapters) -> Result<Vec<ChapterRecord>, ApplicationError> {
        project_owned_by(self.project_repo.as_ref(), query.project_id, query.user).await?;
        Ok(self.chapter_repo.list_by_project(query.project_id).await?)
    }
}

/// ListUnpublishedChapters Handler
pub struct ListUnpublishedChaptersHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl ListUnpublishedChaptersHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        project_repo: Arc<dyn ProjectRepositoryPort>,
    ) -> Self {
        Self {
            chapter_repo,
            project_repo,
        }
    }

    pub async fn handle(
        &self,
        query: ListUnpublishedChapters,
    ) -> Result<Vec<UnpublishedChapter>, ApplicationError> {
        project_owned_by(self.project_repo.as_ref(), query.project_id, query.user).await?;

        let drafts = self
            .chapter_repo
            .list_by_status(query.project_id, ChapterStatus::Draft)
            .await?;

        Ok(drafts
            .into_iter()
            .map(|record| UnpublishedChapter::from_record(record, query.current_chapter_id))
            .collect())
    }
}
