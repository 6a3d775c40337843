//! Chapter Context - 章节限界上下文
//!
//! 职责:
//! - 章节标识、标题、状态等值对象
//! - 内容/大纲长度约束与字数派生
//! - 新建与部分更新的输入校验

mod entities;
mod errors;
mod value_objects;

pub use entities::{ChapterChanges, NewChapter};
pub use errors::ChapterError;
pub use value_objects::{
    content_preview, ChapterContent, ChapterOutline, ChapterStatus, ChapterTitle,
    MAX_CONTENT_CHARS, MAX_OUTLINE_CHARS, MAX_TITLE_CHARS, PREVIEW_CHARS,
};
