//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{
    BatchPublishResult, ChapterRecord, FailedChapter, ProjectRecord, PublishedChapter,
    UnpublishedChapter,
};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 仅包含提示信息的响应
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Project DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetProjectRequest {
    pub id: Uuid,
}

/// 只更新请求中出现的字段
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteProjectRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub word_count: u64,
    pub chapter_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProjectRecord> for ProjectResponse {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            word_count: record.word_count,
            chapter_count: record.chapter_count,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectResponse>,
    pub total: usize,
}

// ============================================================================
// Chapter DTOs
// ============================================================================

/// 创建章节请求
///
/// 客户端提供的编号/排序字段不会被读取，由服务端分配
#[derive(Debug, Deserialize)]
pub struct CreateChapterRequest {
    pub project_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub outline: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListChaptersRequest {
    pub project_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct GetChapterRequest {
    pub id: Uuid,
}

/// 部分更新：缺省或为 null 的字段保持原值
#[derive(Debug, Deserialize)]
pub struct UpdateChapterRequest {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub outline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChapterRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ListUnpublishedRequest {
    pub project_id: Uuid,
    #[serde(default)]
    pub current_chapter_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct BatchStatusRequest {
    pub project_id: Uuid,
    pub from_order_index: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchPublishRequest {
    pub project_id: Uuid,
    /// 逐个解析，格式错误的 id 记为单项失败
    pub chapter_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub outline: Option<String>,
    pub chapter_number: i64,
    pub order_index: i64,
    pub word_count: usize,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ChapterRecord> for ChapterResponse {
    fn from(record: ChapterRecord) -> Self {
        Self {
            id: record.id,
            project_id: record.project_id,
            title: record.title,
            content: record.content,
            outline: record.outline,
            chapter_number: record.chapter_number,
            order_index: record.order_index,
            word_count: record.word_count,
            status: record.status.as_str().to_string(),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterListResponse {
    pub project_id: Uuid,
    pub total: usize,
    pub chapters: Vec<ChapterResponse>,
}

#[derive(Debug, Serialize)]
pub struct UnpublishedChapterResponse {
    pub id: Uuid,
    pub title: String,
    pub chapter_number: i64,
    pub order_index: i64,
    pub word_count: usize,
    pub content_preview: String,
    pub is_current: bool,
    pub updated_at: String,
}

impl From<UnpublishedChapter> for UnpublishedChapterResponse {
    fn from(item: UnpublishedChapter) -> Self {
        Self {
            id: item.id,
            title: item.title,
            chapter_number: item.chapter_number,
            order_index: item.order_index,
            word_count: item.word_count,
            content_preview: item.content_preview,
            is_current: item.is_current,
            updated_at: item.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnpublishedListResponse {
    pub total: usize,
    pub chapters: Vec<UnpublishedChapterResponse>,
}

#[derive(Debug, Serialize)]
pub struct PublishedChapterResponse {
    pub id: Uuid,
    pub title: String,
    pub published_at: String,
}

impl From<PublishedChapter> for PublishedChapterResponse {
    fn from(item: PublishedChapter) -> Self {
        Self {
            id: item.id,
            title: item.title,
            published_at: item.published_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FailedChapterResponse {
    pub id: String,
    pub reason: String,
}

impl From<FailedChapter> for FailedChapterResponse {
    fn from(item: FailedChapter) -> Self {
        Self {
            id: item.id,
            reason: item.reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchPublishResponse {
    pub success: bool,
    pub published_chapters: Vec<PublishedChapterResponse>,
    pub failed_chapters: Vec<FailedChapterResponse>,
    pub total_count: usize,
    pub success_count: usize,
}

impl From<BatchPublishResult> for BatchPublishResponse {
    fn from(result: BatchPublishResult) -> Self {
        Self {
            success: result.success,
            published_chapters: result
                .published_chapters
                .into_iter()
                .map(PublishedChapterResponse::from)
                .collect(),
            failed_chapters: result
                .failed_chapters
                .into_iter()
                .map(FailedChapterResponse::from)
                .collect(),
            total_count: result.total_count,
            success_count: result.success_count,
        }
    }
}
