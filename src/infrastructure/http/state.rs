//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    BatchPublishChaptersHandler, BatchUpdateStatusHandler, CreateChapterHandler,
    CreateProjectHandler, DeleteChapterHandler, DeleteProjectHandler, UpdateChapterHandler,
    UpdateProjectHandler,
    // Query handlers
    GetChapterHandler, GetProjectHandler, ListChaptersHandler, ListProjectsHandler,
    ListUnpublishedChaptersHandler,
    // Ports
    ChapterRepositoryPort, ProjectLockPort, ProjectRepositoryPort, ProjectStatsAggregator,
};
use crate::infrastructure::auth::JwtVerifier;

/// 应用状态
pub struct AppState {
    // ========== Auth ==========
    pub jwt_verifier: Arc<JwtVerifier>,

    // ========== Project Handlers ==========
    pub create_project_handler: CreateProjectHandler,
    pub update_project_handler: UpdateProjectHandler,
    pub delete_project_handler: DeleteProjectHandler,
    pub get_project_handler: GetProjectHandler,
    pub list_projects_handler: ListProjectsHandler,

    // ========== Chapter Command Handlers ==========
    pub create_chapter_handler: CreateChapterHandler,
    pub update_chapter_handler: UpdateChapterHandler,
    pub delete_chapter_handler: DeleteChapterHandler,
    pub batch_update_status_handler: BatchUpdateStatusHandler,
    pub batch_publish_handler: BatchPublishChaptersHandler,

    // ========== Chapter Query Handlers ==========
    pub get_chapter_handler: GetChapterHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub list_unpublished_handler: ListUnpublishedChaptersHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        project_repo: Arc<dyn ProjectRepositoryPort>,
        locks: Arc<dyn ProjectLockPort>,
        aggregator: Arc<ProjectStatsAggregator>,
        jwt_verifier: Arc<JwtVerifier>,
    ) -> Self {
        Self {
            jwt_verifier,

            // Project handlers
            create_project_handler: CreateProjectHandler::new(project_repo.clone()),
            update_project_handler: UpdateProjectHandler::new(project_repo.clone(), locks.clone()),
            delete_project_handler: DeleteProjectHandler::new(project_repo.clone(), locks.clone()),
            get_project_handler: GetProjectHandler::new(project_repo.clone()),
            list_projects_handler: ListProjectsHandler::new(project_repo.clone()),

            // Chapter command handlers
            create_chapter_handler: CreateChapterHandler::new(
                chapter_repo.clone(),
                project_repo.clone(),
                locks.clone(),
                aggregator.clone(),
            ),
            update_chapter_handler: UpdateChapterHandler::new(
                chapter_repo.clone(),
                locks.clone(),
                aggregator.clone(),
            ),
            delete_chapter_handler: DeleteChapterHandler::new(
                chapter_repo.clone(),
                locks.clone(),
                aggregator.clone(),
            ),
            batch_update_status_handler: BatchUpdateStatusHandler::new(
                chapter_repo.clone(),
                project_repo.clone(),
                locks.clone(),
                aggregator.clone(),
            ),
            batch_publish_handler: BatchPublishChaptersHandler::new(
                chapter_repo.clone(),
                project_repo.clone(),
                locks,
                aggregator,
            ),

            // Chapter query handlers
            get_chapter_handler: GetChapterHandler::new(chapter_repo.clone()),
            list_chapters_handler: ListChaptersHandler::new(
                chapter_repo.clone(),
                project_repo.clone(),
            ),
            list_unpublished_handler: ListUnpublishedChaptersHandler::new(
                chapter_repo,
                project_repo,
            ),
        }
    }
}
