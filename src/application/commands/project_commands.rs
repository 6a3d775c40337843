//! Project Commands

use uuid::Uuid;

use crate::domain::project::UserId;

/// 创建项目命令
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub user: UserId,
    pub name: String,
    pub description: Option<String>,
}

/// 更新项目命令（只携带显式提供的字段）
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub project_id: Uuid,
    pub user: UserId,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// 删除项目命令
#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub project_id: Uuid,
    pub user: UserId,
}
