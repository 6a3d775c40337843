//! Project Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ownership::project_owned_by;
use crate::application::ports::{ProjectRecord, ProjectRepositoryPort};
use crate::application::queries::{GetProject, ListProjects};

/// GetProject Handler
pub struct GetProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl GetProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, query: GetProject) -> Result<ProjectRecord, ApplicationError> {
        project_owned_by(self.project_repo.as_ref(), query.project_id, query.user).await
    }
}

/// ListProjects Handler
pub struct ListProjectsHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl ListProjectsHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, query: ListProjects) -> Result<Vec<ProjectRecord>, ApplicationError> {
        Ok(self.project_repo.find_by_owner(query.user).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{other_user, TestContext};

    #[tokio::test]
    async fn test_list_projects_only_returns_own() {
        let ctx = TestContext::new().await;
        ctx.create_project("我的一").await;
        ctx.create_project("我的二").await;

        let handler = ListProjectsHandler::new(ctx.project_repo.clone());
        let mine = handler.handle(ListProjects { user: ctx.user }).await.unwrap();
        assert_eq!(mine.len(), 2);

        let theirs = handler
            .handle(ListProjects { user: other_user() })
            .await
            .unwrap();
        assert!(theirs.is_empty());
    }

    #[tokio::test]
    async fn test_get_project_checks_owner() {
        let ctx = TestContext::new().await;
        let project = ctx.create_project("详情").await;
        let handler = GetProjectHandler::new(ctx.project_repo.clone());

        let found = handler
            .handle(GetProject {
                project_id: project.id,
                user: ctx.user,
            })
            .await
            .unwrap();
        assert_eq!(found.name, "详情");

        let result = handler
            .handle(GetProject {
                project_id: project.id,
                user: other_user(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::Forbidden(_))));

        let result = handler
            .handle(GetProject {
                project_id: uuid::Uuid::new_v4(),
                user: ctx.user,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }
}
