//! Chapter Commands

use uuid::Uuid;

use crate::domain::project::UserId;

/// 创建章节命令
#[derive(Debug, Clone)]
pub struct CreateChapter {
    pub project_id: Uuid,
    pub user: UserId,
    pub title: String,
    pub content: Option<String>,
    pub outline: Option<String>,
}

/// 更新章节命令（只携带显式提供的字段）
#[derive(Debug, Clone)]
pub struct UpdateChapter {
    pub chapter_id: Uuid,
    pub user: UserId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub outline: Option<String>,
    pub status: Option<String>,
}

/// 删除章节命令
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub chapter_id: Uuid,
    pub user: UserId,
}
