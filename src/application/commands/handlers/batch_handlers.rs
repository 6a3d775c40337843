//! Batch Command Handlers - 批量章节操作
//!
//! 两种批量操作刻意保持不同语义：
//! - BatchUpdateStatus: 级联覆盖，不检查每个章节原来的状态
//! - BatchPublishChapters: 逐个校验（属于该项目且仍为草稿），单项失败只记录不中断

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{BatchPublishChapters, BatchUpdateStatus};
use crate::application::error::ApplicationError;
use crate::application::ownership::project_owned_by;
use crate::application::ports::{ChapterRepositoryPort, ProjectLockPort, ProjectRepositoryPort};
use crate::application::stats_aggregator::ProjectStatsAggregator;
use crate::domain::chapter::ChapterStatus;

/// 章节不存在/不属于该项目/已发布时的失败原因
pub const NOT_PUBLISHABLE_REASON: &str = "chapter not found or already published";

/// 章节 id 不是合法 UUID 时的失败原因
pub const INVALID_ID_REASON: &str = "invalid chapter id";

// ============================================================================
// BatchUpdateStatus
// ============================================================================

/// 级联更新响应
#[derive(Debug, Clone)]
pub struct BatchUpdateStatusResponse {
    pub message: String,
}

/// BatchUpdateStatus Handler
pub struct BatchUpdateStatusHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    project_repo: Arc<dyn ProjectRepositoryPort>,
    locks: Arc<dyn ProjectLockPort>,
    aggregator: Arc<ProjectStatsAggregator>,
}

impl BatchUpdateStatusHandler {
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

    pub async fn handle(
        &self,
        command: BatchUpdateStatus,
    ) -> Result<BatchUpdateStatusResponse, ApplicationError> {
        let project_id = command.project_id;
        project_owned_by(self.project_repo.as_ref(), project_id, command.user).await?;

        let status = ChapterStatus::parse(&command.status)?;

        let _guard = self.locks.lock(project_id).await;

        let affected = self
            .chapter_repo
            .bulk_set_status(project_id, command.from_order_index, status)
            .await?;
        self.aggregator.recompute(project_id).await?;

        tracing::info!(
            project_id = %project_id,
            from_order_index = command.from_order_index,
            status = %status,
            affected = affected,
            "Chapter status bulk updated"
        );

        Ok(BatchUpdateStatusResponse {
            message: format!(
                "Chapters from order index {} set to {}",
                command.from_order_index, status
            ),
        })
    }
}

// ============================================================================
// BatchPublishChapters
// ============================================================================

/// 发布成功的章节
#[derive(Debug, Clone)]
pub struct PublishedChapter {
    pub id: Uuid,
    pub title: String,
    pub published_at: DateTime<Utc>,
}

/// 发布失败的章节，id 为请求中的原文
#[derive(Debug, Clone)]
pub struct FailedChapter {
    pub id: String,
    pub reason: String,
}

/// 批量发布结果
///
/// 单项失败是数据而非错误：调用方总是拿到完整的结果清单
#[derive(Debug, Clone)]
pub struct BatchPublishResult {
    /// 当且仅当没有失败项时为 true
    pub success: bool,
    pub published_chapters: Vec<PublishedChapter>,
    pub failed_chapters: Vec<FailedChapter>,
    pub total_count: usize,
    pub success_count: usize,
}

impl BatchPublishResult {
    fn new(published_chapters: Vec<PublishedChapter>, failed_chapters: Vec<FailedChapter>) -> Self {
        let success_count = published_chapters.len();
        Self {
            success: failed_chapters.is_empty(),
            total_count: success_count + failed_chapters.len(),
            success_count,
            published_chapters,
            failed_chapters,
        }
    }
}

/// BatchPublishChapters Handler
pub struct BatchPublishChaptersHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    project_repo: Arc<dyn ProjectRepositoryPort>,
    locks: Arc<dyn ProjectLockPort>,
    aggregator: Arc<ProjectStatsAggregator>,
}

impl BatchPublishChaptersHandler {
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

    pub async fn handle(
        &self,
        command: BatchPublishChapters,
    ) -> Result<BatchPublishResult, ApplicationError> {
        let project_id = command.project_id;
        project_owned_by(self.project_repo.as_ref(), project_id, command.user).await?;

        let _guard = self.locks.lock(project_id).await;

        let mut published = Vec::new();
        let mut failed = Vec::new();

        // 按调用方给出的顺序逐个处理
        for raw_id in command.chapter_ids {
            let chapter_id = match Uuid::parse_str(raw_id.trim()) {
                Ok(id) => id,
                Err(_) => {
                    failed.push(FailedChapter {
                        id: raw_id,
                        reason: INVALID_ID_REASON.to_string(),
                    });
                    continue;
                }
            };

            match self.chapter_repo.publish_if_draft(chapter_id, project_id).await {
                Ok(Some(chapter)) => published.push(PublishedChapter {
                    id: chapter.id,
                    title: chapter.title,
                    published_at: chapter.updated_at,
                }),
                Ok(None) => failed.push(FailedChapter {
                    id: raw_id,
                    reason: NOT_PUBLISHABLE_REASON.to_string(),
                }),
                Err(e) => {
                    tracing::warn!(
                        project_id = %project_id,
                        chapter_id = %chapter_id,
                        error = %e,
                        "Chapter publish failed, continuing batch"
                    );
                    failed.push(FailedChapter {
                        id: raw_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        // 所有单项写入结束后只重算一次
        self.aggregator.recompute(project_id).await?;

        let result = BatchPublishResult::new(published, failed);

        tracing::info!(
            project_id = %project_id,
            total = result.total_count,
            published = result.success_count,
            failed = result.failed_chapters.len(),
            "Batch publish finished"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::application::ports::{ChapterRecord, RepositoryError};
    use crate::domain::chapter::{ChapterChanges, NewChapter};
    use crate::domain::project::UserId;
    use crate::test_support::{other_user, published_totals, TestContext};

    async fn seed(ctx: &TestContext, project_id: Uuid, title: &str, content: &str) -> ChapterRecord {
        let chapter = NewChapter::new(title, Some(content.to_string()), None).unwrap();
        ctx.chapter_repo.create(project_id, &chapter).await.unwrap()
    }

    fn update_handler(ctx: &TestContext) -> BatchUpdateStatusHandler {
        BatchUpdateStatusHandler::new(
            ctx.chapter_repo.clone(),
            ctx.project_repo.clone(),
            ctx.locks.clone(),
            ctx.aggregator.clone(),
        )
    }

    fn publish_handler(ctx: &TestContext) -> BatchPublishChaptersHandler {
        BatchPublishChaptersHandler::new(
            ctx.chapter_repo.clone(),
            ctx.project_repo.clone(),
            ctx.locks.clone(),
            ctx.aggregator.clone(),
        )
    }

    fn publish(ctx: &TestContext, project_id: Uuid, ids: Vec<Uuid>) -> BatchPublishChapters {
        BatchPublishChapters {
            project_id,
            user: ctx.user,
            chapter_ids: ids.iter().map(Uuid::to_string).collect(),
        }
    }

    fn assert_counts_consistent(result: &BatchPublishResult, requested: usize) {
        assert_eq!(result.total_count, requested);
        assert_eq!(
            result.success_count + result.failed_chapters.len(),
            result.total_count
        );
        assert_eq!(result.success, result.failed_chapters.is_empty());
    }

    #[tokio::test]
    async fn test_cascading_update_from_order_index() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("级联").await;
        let a = seed(&ctx, project.id, "A", "一").await;
        let b = seed(&ctx, project.id, "B", "二二").await;
        let c = seed(&ctx, project.id, "C", "三三三").await;

        let changes = ChapterChanges {
            status: Some(ChapterStatus::Published),
            ..Default::default()
        };
        ctx.chapter_repo.update(c.id, &changes).await.unwrap();

        let response = update_handler(&ctx)
            .handle(BatchUpdateStatus {
                project_id: project.id,
                user: ctx.user,
                from_order_index: 2,
                status: "published".to_string(),
            })
            .await
            .unwrap();
        assert!(!response.message.is_empty());

        let chapters = ctx.chapter_repo.list_by_project(project.id).await.unwrap();
        let statuses: Vec<(Uuid, ChapterStatus)> =
            chapters.iter().map(|ch| (ch.id, ch.status)).collect();
        assert_eq!(
            statuses,
            vec![
                (a.id, ChapterStatus::Draft),
                (b.id, ChapterStatus::Published),
                (c.id, ChapterStatus::Published),
            ]
        );

        let stored = ctx.project(project.id).await;
        assert_eq!(stored.word_count, 5);
        assert_eq!(stored.chapter_count, 2);
    }

    #[tokio::test]
    async fn test_cascading_unpublish_ignores_prior_status() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("撤回").await;
        let ids = vec![
            seed(&ctx, project.id, "A", "一").await.id,
            seed(&ctx, project.id, "B", "二").await.id,
        ];
        publish_handler(&ctx)
            .handle(publish(&ctx, project.id, ids))
            .await
            .unwrap();

        update_handler(&ctx)
            .handle(BatchUpdateStatus {
                project_id: project.id,
                user: ctx.user,
                from_order_index: 0,
                status: "draft".to_string(),
            })
            .await
            .unwrap();

        let stored = ctx.project(project.id).await;
        assert_eq!((stored.word_count, stored.chapter_count), (0, 0));
    }

    #[tokio::test]
    async fn test_cascading_update_forbidden_for_other_user() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("他人").await;

        let result = update_handler(&ctx)
            .handle(BatchUpdateStatus {
                project_id: project.id,
                user: other_user(),
                from_order_index: 1,
                status: "published".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_cascading_update_rejects_malformed_status() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("非法状态").await;

        let result = update_handler(&ctx)
            .handle(BatchUpdateStatus {
                project_id: project.id,
                user: ctx.user,
                from_order_index: 1,
                status: "hidden".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_batch_publish_mixed_outcome() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("混合").await;
        let a = seed(&ctx, project.id, "A", "hello world").await;
        let missing = Uuid::new_v4();

        let result = publish_handler(&ctx)
            .handle(publish(&ctx, project.id, vec![a.id, missing]))
            .await
            .unwrap();

        assert_counts_consistent(&result, 2);
        assert!(!result.success);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.published_chapters[0].id, a.id);
        assert_eq!(result.published_chapters[0].title, "A");
        assert_eq!(result.failed_chapters[0].id, missing.to_string());
        assert_eq!(result.failed_chapters[0].reason, NOT_PUBLISHABLE_REASON);

        let stored = ctx.project(project.id).await;
        assert_eq!(stored.word_count, 2);
        assert_eq!(stored.chapter_count, 1);
    }

    #[tokio::test]
    async fn test_batch_publish_is_idempotent_per_id() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("幂等").await;
        let a = seed(&ctx, project.id, "A", "一二").await;
        let handler = publish_handler(&ctx);

        let first = handler
            .handle(publish(&ctx, project.id, vec![a.id]))
            .await
            .unwrap();
        assert!(first.success);

        let second = handler
            .handle(publish(&ctx, project.id, vec![a.id]))
            .await
            .unwrap();
        assert_counts_consistent(&second, 1);
        assert!(!second.success);
        assert!(second.published_chapters.is_empty());
        assert_eq!(second.failed_chapters[0].reason, NOT_PUBLISHABLE_REASON);

        let stored = ctx.project(project.id).await;
        assert_eq!((stored.word_count, stored.chapter_count), (2, 1));
    }

    #[tokio::test]
    async fn test_batch_publish_rejects_chapter_of_other_project() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("目标").await;
        let other = ctx.create_project("其他").await;
        let foreign = seed(&ctx, other.id, "外部", "x").await;

        let result = publish_handler(&ctx)
            .handle(publish(&ctx, project.id, vec![foreign.id]))
            .await
            .unwrap();
        assert_counts_consistent(&result, 1);
        assert_eq!(result.failed_chapters[0].id, foreign.id.to_string());

        let untouched = ctx
            .chapter_repo
            .find_in_project(foreign.id, other.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.status, ChapterStatus::Draft);
    }

    #[tokio::test]
    async fn test_batch_publish_all_failed_still_returns_result() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("全失败").await;

        let result = publish_handler(&ctx)
            .handle(publish(&ctx, project.id, vec![Uuid::new_v4(), Uuid::new_v4()]))
            .await
            .unwrap();
        assert_counts_consistent(&result, 2);
        assert_eq!(result.success_count, 0);
    }

    #[tokio::test]
    async fn test_batch_publish_empty_request() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("空").await;

        let result = publish_handler(&ctx)
            .handle(publish(&ctx, project.id, Vec::new()))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.total_count, 0);
    }

    #[tokio::test]
    async fn test_batch_publish_malformed_id_fails_alone() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("格式").await;
        let a = seed(&ctx, project.id, "A", "hello world").await;
        let b = seed(&ctx, project.id, "B", "你好").await;

        let result = publish_handler(&ctx)
            .handle(BatchPublishChapters {
                project_id: project.id,
                user: ctx.user,
                chapter_ids: vec![a.id.to_string(), "not-a-uuid".to_string(), b.id.to_string()],
            })
            .await
            .unwrap();

        assert_counts_consistent(&result, 3);
        let published: Vec<Uuid> = result.published_chapters.iter().map(|p| p.id).collect();
        assert_eq!(published, vec![a.id, b.id]);
        assert_eq!(result.failed_chapters.len(), 1);
        assert_eq!(result.failed_chapters[0].id, "not-a-uuid");
        assert_eq!(result.failed_chapters[0].reason, INVALID_ID_REASON);

        let stored = ctx.project(project.id).await;
        assert_eq!((stored.word_count, stored.chapter_count), (4, 2));
    }

    #[tokio::test]
    async fn test_batch_publish_forbidden_for_other_user() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("他人").await;

        let result = publish_handler(&ctx)
            .handle(BatchPublishChapters {
                project_id: project.id,
                user: other_user(),
                chapter_ids: vec![Uuid::new_v4().to_string()],
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::Forbidden(_))));
    }

    /// 对指定章节的发布写入返回数据库错误，其余委托给真实仓储
    struct FailingPublishRepository {
        inner: Arc<dyn ChapterRepositoryPort>,
        fail_on: Uuid,
    }

    #[async_trait]
    impl ChapterRepositoryPort for FailingPublishRepository {
        async fn create(
            &self,
            project_id: Uuid,
            chapter: &NewChapter,
        ) -> Result<ChapterRecord, RepositoryError> {
            self.inner.create(project_id, chapter).await
        }

        async fn find_in_project(
            &self,
            id: Uuid,
            project_id: Uuid,
        ) -> Result<Option<ChapterRecord>, RepositoryError> {
            self.inner.find_in_project(id, project_id).await
        }

        async fn find_owned(
            &self,
            id: Uuid,
            owner: UserId,
        ) -> Result<Option<ChapterRecord>, RepositoryError> {
            self.inner.find_owned(id, owner).await
        }

        async fn list_by_project(
            &self,
            project_id: Uuid,
        ) -> Result<Vec<ChapterRecord>, RepositoryError> {
            self.inner.list_by_project(project_id).await
        }

        async fn list_by_status(
            &self,
            project_id: Uuid,
            status: ChapterStatus,
        ) -> Result<Vec<ChapterRecord>, RepositoryError> {
            self.inner.list_by_status(project_id, status).await
        }

        async fn update(
            &self,
            id: Uuid,
            changes: &ChapterChanges,
        ) -> Result<ChapterRecord, RepositoryError> {
            self.inner.update(id, changes).await
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
            self.inner.delete(id).await
        }

        async fn bulk_set_status(
            &self,
            project_id: Uuid,
            from_order_index: i64,
            status: ChapterStatus,
        ) -> Result<u64, RepositoryError> {
            self.inner
                .bulk_set_status(project_id, from_order_index, status)
                .await
        }

        async fn publish_if_draft(
            &self,
            id: Uuid,
            project_id: Uuid,
        ) -> Result<Option<ChapterRecord>, RepositoryError> {
            if id == self.fail_on {
                return Err(RepositoryError::DatabaseError("disk I/O error".to_string()));
            }
            self.inner.publish_if_draft(id, project_id).await
        }
    }

    #[tokio::test]
    async fn test_persistence_failure_does_not_abort_batch() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("部分失败").await;
        let a = seed(&ctx, project.id, "A", "一").await;
        let b = seed(&ctx, project.id, "B", "二二").await;
        let c = seed(&ctx, project.id, "C", "三三三").await;

        let failing: Arc<dyn ChapterRepositoryPort> = Arc::new(FailingPublishRepository {
            inner: ctx.chapter_repo.clone(),
            fail_on: b.id,
        });
        let aggregator = Arc::new(ProjectStatsAggregator::new(
            failing.clone(),
            ctx.project_repo.clone(),
        ));
        let handler = BatchPublishChaptersHandler::new(
            failing,
            ctx.project_repo.clone(),
            ctx.locks.clone(),
            aggregator,
        );

        let result = handler
            .handle(publish(&ctx, project.id, vec![a.id, b.id, c.id]))
            .await
            .unwrap();

        assert_counts_consistent(&result, 3);
        let published: Vec<Uuid> = result.published_chapters.iter().map(|p| p.id).collect();
        assert_eq!(published, vec![a.id, c.id]);
        assert_eq!(result.failed_chapters[0].id, b.id.to_string());
        assert!(result.failed_chapters[0].reason.contains("disk I/O error"));

        let stored_b = ctx
            .chapter_repo
            .find_in_project(b.id, project.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_b.status, ChapterStatus::Draft);

        let stored = ctx.project(project.id).await;
        assert_eq!(
            (stored.word_count, stored.chapter_count),
            published_totals(&ctx, project.id).await
        );
        assert_eq!((stored.word_count, stored.chapter_count), (4, 2));
    }
}
