//! 测试辅助：内存 SQLite + 真实仓储

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::{
    ChapterRepositoryPort, ProjectLockPort, ProjectRecord, ProjectRepositoryPort,
};
use crate::application::ProjectStatsAggregator;
use crate::domain::chapter::ChapterStatus;
use crate::domain::project::UserId;
use crate::infrastructure::memory::InMemoryProjectLocks;
use crate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteChapterRepository,
    SqliteProjectRepository,
};

pub(crate) struct TestContext {
    pub chapter_repo: Arc<dyn ChapterRepositoryPort>,
    pub project_repo: Arc<dyn ProjectRepositoryPort>,
    pub locks: Arc<dyn ProjectLockPort>,
    pub aggregator: Arc<ProjectStatsAggregator>,
    pub user: UserId,
}

impl TestContext {
    pub async fn new() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let chapter_repo: Arc<dyn ChapterRepositoryPort> =
            Arc::new(SqliteChapterRepository::new(pool.clone()));
        let project_repo: Arc<dyn ProjectRepositoryPort> =
            Arc::new(SqliteProjectRepository::new(pool));
        let aggregator = Arc::new(ProjectStatsAggregator::new(
            chapter_repo.clone(),
            project_repo.clone(),
        ));

        Self {
            chapter_repo,
            project_repo,
            locks: Arc::new(InMemoryProjectLocks::new()),
            aggregator,
            user: UserId::from_uuid(Uuid::new_v4()),
        }
    }

    /// 直接落库一个属于 `self.user` 的空项目
    pub async fn create_project(&self, name: &str) -> ProjectRecord {
        let now = Utc::now();
        let project = ProjectRecord {
            id: Uuid::new_v4(),
            owner_id: *self.user.as_uuid(),
            name: name.to_string(),
            description: None,
            word_count: 0,
            chapter_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.project_repo.save(&project).await.unwrap();
        project
    }

    pub async fn project(&self, id: Uuid) -> ProjectRecord {
        self.project_repo.find_by_id(id).await.unwrap().unwrap()
    }
}

pub(crate) fn other_user() -> UserId {
    UserId::from_uuid(Uuid::new_v4())
}

/// 按定义从章节列表折叠出 (word_count, chapter_count)
pub(crate) async fn published_totals(ctx: &TestContext, project_id: Uuid) -> (u64, u64) {
    ctx.chapter_repo
        .list_by_project(project_id)
        .await
        .unwrap()
        .iter()
        .filter(|c| c.status == ChapterStatus::Published)
        .fold((0, 0), |(words, count), c| {
            (words + c.word_count as u64, count + 1)
        })
}
