//! Chapter Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChapterError {
    #[error("无效的章节标题: {0}")]
    InvalidTitle(&'static str),

    #[error("章节内容超过 1MB 限制: 最多 {limit} 字符, 实际 {actual} 字符")]
    ContentTooLong { limit: usize, actual: usize },

    #[error("章节大纲超过长度限制: 最多 {limit} 字符, 实际 {actual} 字符")]
    OutlineTooLong { limit: usize, actual: usize },

    #[error("无效的章节状态: {0} (可选: draft, published)")]
    InvalidStatus(String),
}
