//! Project Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateProject, DeleteProject, UpdateProject};
use crate::application::error::ApplicationError;
use crate::application::ownership::project_owned_by;
use crate::application::ports::{ProjectLockPort, ProjectRecord, ProjectRepositoryPort};
use crate::domain::project::ProjectName;

/// CreateProject Handler
pub struct CreateProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl CreateProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, command: CreateProject) -> Result<ProjectRecord, ApplicationError> {
        let name = ProjectName::new(command.name)?;
        let now = Utc::now();

        let project = ProjectRecord {
            id: Uuid::new_v4(),
            owner_id: *command.user.as_uuid(),
            name: name.into_inner(),
            description: command.description,
            word_count: 0,
            chapter_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.project_repo.save(&project).await?;

        tracing::info!(
            project_id = %project.id,
            owner_id = %project.owner_id,
            "Project created"
        );

        Ok(project)
    }
}

/// UpdateProject Handler
pub struct UpdateProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
    locks: Arc<dyn ProjectLockPort>,
}

impl UpdateProjectHandler {
    pub fn new(
        project_repo: Arc<dyn ProjectRepositoryPort>,
        locks: Arc<dyn ProjectLockPort>,
    ) -> Self {
        Self {
            project_repo,
            locks,
        }
    }

    pub async fn handle(&self, command: UpdateProject) -> Result<ProjectRecord, ApplicationError> {
        let project_id = command.project_id;
        project_owned_by(self.project_repo.as_ref(), project_id, command.user).await?;

        let name = command.name.map(ProjectName::new).transpose()?;

        // 与统计重算共用 updated_at，需要串行
        let _guard = self.locks.lock(project_id).await;

        let mut project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", project_id))?;

        if let Some(name) = name {
            project.name = name.into_inner();
        }
        if let Some(description) = command.description {
            project.description = Some(description);
        }
        project.updated_at = Utc::now();
        self.project_repo.save(&project).await?;

        let updated = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", project_id))?;

        tracing::info!(project_id = %project_id, name = %updated.name, "Project updated");

        Ok(updated)
    }
}

/// 删除项目响应
#[derive(Debug, Clone)]
pub struct DeleteProjectResponse {
    pub message: String,
}

/// DeleteProject Handler
pub struct DeleteProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
    locks: Arc<dyn ProjectLockPort>,
}

impl DeleteProjectHandler {
    pub fn new(
        project_repo: Arc<dyn ProjectRepositoryPort>,
        locks: Arc<dyn ProjectLockPort>,
    ) -> Self {
        Self {
            project_repo,
            locks,
        }
    }

    pub async fn handle(
        &self,
        command: DeleteProject,
    ) -> Result<DeleteProjectResponse, ApplicationError> {
        let project =
            project_owned_by(self.project_repo.as_ref(), command.project_id, command.user).await?;

        {
            let _guard = self.locks.lock(project.id).await;
            self.project_repo.delete(project.id).await?;
        }
        self.locks.forget(project.id);

        tracing::info!(project_id = %project.id, "Project deleted");

        Ok(DeleteProjectResponse {
            message: format!("Project '{}' deleted successfully", project.name),
        })
    }
}
