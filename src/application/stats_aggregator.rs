//! Project Stats Aggregator - 项目统计重算
//!
//! 每次影响章节的写操作结束前调用一次 `recompute`，
//! 统计只由当前已发布章节推导（不做增量加减）。

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{ChapterRepositoryPort, ProjectRepositoryPort, RepositoryError};
use crate::domain::project::ProjectStats;

/// 默认尝试次数（首次 + 1 次重试）
pub const DEFAULT_RECOMPUTE_ATTEMPTS: u32 = 2;

/// 项目统计聚合器
pub struct ProjectStatsAggregator {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    project_repo: Arc<dyn ProjectRepositoryPort>,
    max_attempts: u32,
}

impl ProjectStatsAggregator {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        project_repo: Arc<dyn ProjectRepositoryPort>,
    ) -> Self {
        Self {
            chapter_repo,
            project_repo,
            max_attempts: DEFAULT_RECOMPUTE_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// 重算并持久化项目的 word_count / chapter_count / updated_at
    ///
    /// 幂等；失败时按 `max_attempts` 重试，最终失败返回 `StatsRecomputeFailed`
    pub async fn recompute(&self, project_id: Uuid) -> Result<ProjectStats, ApplicationError> {
        let mut attempt = 1;
        loop {
            match self.try_recompute(project_id).await {
                Ok(stats) => {
                    tracing::debug!(
                        project_id = %project_id,
                        word_count = stats.word_count,
                        chapter_count = stats.chapter_count,
                        "Project stats recomputed"
                    );
                    return Ok(stats);
                }
                Err(e) if attempt < self.max_attempts => {
                    tracing::warn!(
                        project_id = %project_id,
                        attempt = attempt,
                        error = %e,
                        "Project stats recompute failed, retrying"
                    );
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        project_id = %project_id,
                        attempts = attempt,
                        error = %e,
                        "Project stats recompute failed"
                    );
                    return Err(ApplicationError::StatsRecomputeFailed(e.to_string()));
                }
            }
        }
    }

    async fn try_recompute(&self, project_id: Uuid) -> Result<ProjectStats, RepositoryError> {
        let stats = self.chapter_repo.published_stats(project_id).await?;

        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("project {}", project_id)))?;

        let updated_at = stats.effective_updated_at(project.updated_at);
        self.project_repo
            .update_stats(project_id, &stats, updated_at)
            .await?;

        Ok(stats)
    }
}
