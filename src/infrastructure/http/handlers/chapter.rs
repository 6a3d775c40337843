//! Chapter HTTP Handlers

use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::application::{
    BatchPublishChapters, BatchUpdateStatus, CreateChapter, DeleteChapter, GetChapter,
    ListChapters, ListUnpublishedChapters, UpdateChapter,
};
use crate::infrastructure::auth::AuthenticatedUser;
use crate::infrastructure::http::dto::{
    ApiResponse, BatchPublishRequest, BatchPublishResponse, BatchStatusRequest,
    ChapterListResponse, ChapterResponse, CreateChapterRequest, DeleteChapterRequest,
    GetChapterRequest, ListChaptersRequest, ListUnpublishedRequest, MessageResponse,
    UnpublishedChapterResponse, UnpublishedListResponse, UpdateChapterRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建章节
pub async fn create_chapter(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<CreateChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let command = CreateChapter {
        project_id: req.project_id,
        user: auth.user_id,
        title: req.title,
        content: req.content,
        outline: req.outline,
    };

    let chapter = state.create_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ChapterResponse::from(chapter))))
}

/// 列出项目章节（按 order_index 排序）
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<ListChaptersRequest>,
) -> Result<Json<ApiResponse<ChapterListResponse>>, ApiError> {
    let query = ListChapters {
        project_id: req.project_id,
        user: auth.user_id,
    };

    let chapters = state.list_chapters_handler.handle(query).await?;
    let chapters: Vec<ChapterResponse> = chapters.into_iter().map(ChapterResponse::from).collect();

    Ok(Json(ApiResponse::success(ChapterListResponse {
        project_id: req.project_id,
        total: chapters.len(),
        chapters,
    })))
}

/// 获取章节详情
pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<GetChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let query = GetChapter {
        chapter_id: req.id,
        user: auth.user_id,
    };

    let chapter = state.get_chapter_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(ChapterResponse::from(chapter))))
}

/// 更新章节（部分更新）
pub async fn update_chapter(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let command = UpdateChapter {
        chapter_id: req.id,
        user: auth.user_id,
        title: req.title,
        content: req.content,
        outline: req.outline,
        status: req.status,
    };

    let chapter = state.update_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ChapterResponse::from(chapter))))
}

/// 删除章节
pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<DeleteChapterRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let command = DeleteChapter {
        chapter_id: req.id,
        user: auth.user_id,
    };

    let result = state.delete_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: result.message,
    })))
}

/// 列出未发布章节（可标记当前编辑中的章节）
pub async fn list_unpublished_chapters(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<ListUnpublishedRequest>,
) -> Result<Json<ApiResponse<UnpublishedListResponse>>, ApiError> {
    let query = ListUnpublishedChapters {
        project_id: req.project_id,
        user: auth.user_id,
        current_chapter_id: req.current_chapter_id,
    };

    let items = state.list_unpublished_handler.handle(query).await?;
    let chapters: Vec<UnpublishedChapterResponse> = items
        .into_iter()
        .map(UnpublishedChapterResponse::from)
        .collect();

    Ok(Json(ApiResponse::success(UnpublishedListResponse {
        total: chapters.len(),
        chapters,
    })))
}

/// 级联更新状态
pub async fn batch_update_status(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<BatchStatusRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let command = BatchUpdateStatus {
        project_id: req.project_id,
        user: auth.user_id,
        from_order_index: req.from_order_index,
        status: req.status,
    };

    let result = state.batch_update_status_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: result.message,
    })))
}

/// 批量发布
///
/// 单项失败不影响 errno，调用方通过 success / failed_chapters 判断
pub async fn batch_publish_chapters(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<BatchPublishRequest>,
) -> Result<Json<ApiResponse<BatchPublishResponse>>, ApiError> {
    let command = BatchPublishChapters {
        project_id: req.project_id,
        user: auth.user_id,
        chapter_ids: req.chapter_ids,
    };

    let result = state.batch_publish_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(BatchPublishResponse::from(result))))
}
