//! Batch Commands

use uuid::Uuid;

use crate::domain::project::UserId;

/// 级联更新状态：order_index >= from_order_index 的章节全部改为 status
#[derive(Debug, Clone)]
pub struct BatchUpdateStatus {
    pub project_id: Uuid,
    pub user: UserId,
    pub from_order_index: i64,
    pub status: String,
}

/// 选择性批量发布：逐个校验并发布指定的草稿章节
///
/// chapter_ids 保留调用方原文，格式错误的 id 作为单项失败返回
#[derive(Debug, Clone)]
pub struct BatchPublishChapters {
    pub project_id: Uuid,
    pub user: UserId,
    pub chapter_ids: Vec<String>,
}
