//! Chapter Context - Value Objects

use serde::{Deserialize, Serialize};

use super::ChapterError;
use crate::domain::word_counter::count_words;

/// 标题最大字符数
pub const MAX_TITLE_CHARS: usize = 200;

/// 正文最大字符数（1MB）
pub const MAX_CONTENT_CHARS: usize = 1_000_000;

/// 大纲最大字符数
pub const MAX_OUTLINE_CHARS: usize = 50_000;

/// 未发布章节列表中的内容预览长度
pub const PREVIEW_CHARS: usize = 200;

/// 章节标题（1–200 字符）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterTitle(String);

impl ChapterTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, ChapterError> {
        let title = title.into();
        if title.is_empty() {
            return Err(ChapterError::InvalidTitle("标题不能为空"));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(ChapterError::InvalidTitle("标题长度不能超过200字符"));
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ChapterTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 章节状态
///
/// 无终态：draft 与 published 之间可任意往返
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterStatus {
    /// 草稿
    #[default]
    Draft,
    /// 已发布
    Published,
}

impl ChapterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterStatus::Draft => "draft",
            ChapterStatus::Published => "published",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ChapterStatus::Draft),
            "published" => Some(ChapterStatus::Published),
            _ => None,
        }
    }

    /// 解析客户端传入的状态值
    pub fn parse(s: &str) -> Result<Self, ChapterError> {
        Self::from_str(s).ok_or_else(|| ChapterError::InvalidStatus(s.to_string()))
    }
}

impl std::fmt::Display for ChapterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 章节正文（≤ 1,000,000 字符）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterContent(String);

impl ChapterContent {
    pub fn new(content: impl Into<String>) -> Result<Self, ChapterError> {
        let content = content.into();
        let actual = content.chars().count();
        if actual > MAX_CONTENT_CHARS {
            return Err(ChapterError::ContentTooLong {
                limit: MAX_CONTENT_CHARS,
                actual,
            });
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.0)
    }
}

/// 章节大纲（≤ 50,000 字符）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterOutline(String);

impl ChapterOutline {
    pub fn new(outline: impl Into<String>) -> Result<Self, ChapterError> {
        let outline = outline.into();
        let actual = outline.chars().count();
        if actual > MAX_OUTLINE_CHARS {
            return Err(ChapterError::OutlineTooLong {
                limit: MAX_OUTLINE_CHARS,
                actual,
            });
        }
        Ok(Self(outline))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 生成内容预览
///
/// 不超过 200 字符时原样返回，否则截取前 200 字符并追加 `...`
pub fn content_preview(content: Option<&str>) -> String {
    let content = content.unwrap_or_default();
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
