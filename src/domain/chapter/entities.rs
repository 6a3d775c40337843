//! Chapter Context - 新建/更新输入

use crate::domain::count_words_opt;

use super::{ChapterContent, ChapterError, ChapterOutline, ChapterStatus, ChapterTitle};

/// 已校验的新章节
///
/// 章节编号与排序索引由存储层按项目自增分配，这里不携带
#[derive(Debug, Clone)]
pub struct NewChapter {
    pub title: ChapterTitle,
    pub content: Option<ChapterContent>,
    pub outline: Option<ChapterOutline>,
}

impl NewChapter {
    pub fn new(
        title: impl Into<String>,
        content: Option<String>,
        outline: Option<String>,
    ) -> Result<Self, ChapterError> {
        Ok(Self {
            title: ChapterTitle::new(title)?,
            content: content.map(ChapterContent::new).transpose()?,
            outline: outline.map(ChapterOutline::new).transpose()?,
        })
    }

    pub fn word_count(&self) -> usize {
        count_words_opt(self.content.as_ref().map(ChapterContent::as_str))
    }
}

/// 已校验的部分更新
///
/// 只包含客户端显式提供的字段；`None` 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct ChapterChanges {
    pub title: Option<ChapterTitle>,
    pub content: Option<ChapterContent>,
    pub outline: Option<ChapterOutline>,
    pub status: Option<ChapterStatus>,
}

impl ChapterChanges {
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        outline: Option<String>,
        status: Option<String>,
    ) -> Result<Self, ChapterError> {
        Ok(Self {
            title: title.map(ChapterTitle::new).transpose()?,
            content: content.map(ChapterContent::new).transpose()?,
            outline: outline.map(ChapterOutline::new).transpose()?,
            status: status.as_deref().map(ChapterStatus::parse).transpose()?,
        })
    }

    /// 仅当本次更新包含正文时返回新的字数
    pub fn word_count(&self) -> Option<usize> {
        self.content.as_ref().map(ChapterContent::word_count)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.outline.is_none()
            && self.status.is_none()
    }
}
