//! Chapter Queries

use uuid::Uuid;

use crate::domain::project::UserId;

/// 获取章节详情查询
#[derive(Debug, Clone)]
pub struct GetChapter {
    pub chapter_id: Uuid,
    pub user: UserId,
}

/// 列出项目章节查询（按 order_index 排序）
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub project_id: Uuid,
    pub user: UserId,
}

/// 列出未发布章节查询
#[derive(Debug, Clone)]
pub struct ListUnpublishedChapters {
    pub project_id: Uuid,
    pub user: UserId,
    /// 客户端当前正在编辑的章节，用于标记 is_current
    pub current_chapter_id: Option<Uuid>,
}
