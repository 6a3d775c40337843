//! Project Queries

use uuid::Uuid;

use crate::domain::project::UserId;

/// 获取项目详情查询
#[derive(Debug, Clone)]
pub struct GetProject {
    pub project_id: Uuid,
    pub user: UserId,
}

/// 列出当前用户的项目
#[derive(Debug, Clone)]
pub struct ListProjects {
    pub user: UserId,
}
