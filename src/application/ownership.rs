//! 项目归属校验
//!
//! 每次请求都重新查询项目，不缓存归属关系

use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{ProjectRecord, ProjectRepositoryPort};
use crate::domain::project::UserId;

/// 返回属于 `user` 的项目
///
/// - 项目不存在: `NotFound`
/// - 项目属于其他用户: `Forbidden`
pub async fn project_owned_by(
    project_repo: &dyn ProjectRepositoryPort,
    project_id: Uuid,
    user: UserId,
) -> Result<ProjectRecord, ApplicationError> {
    let project = project_repo
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApplicationError::not_found("Project", project_id))?;

    if !project.is_owned_by(user) {
        tracing::warn!(
            project_id = %project_id,
            user_id = %user,
            "Project access denied"
        );
        return Err(ApplicationError::forbidden(format!(
            "project {} does not belong to the current user",
            project_id
        )));
    }

    Ok(project)
}
