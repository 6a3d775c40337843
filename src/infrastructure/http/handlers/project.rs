//! Project HTTP Handlers

use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::application::{CreateProject, DeleteProject, GetProject, ListProjects, UpdateProject};
use crate::infrastructure::auth::AuthenticatedUser;
use crate::infrastructure::http::dto::{
    ApiResponse, CreateProjectRequest, DeleteProjectRequest, GetProjectRequest, MessageResponse,
    ProjectListResponse, ProjectResponse, UpdateProjectRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建项目
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    let command = CreateProject {
        user: auth.user_id,
        name: req.name,
        description: req.description,
    };

    let project = state.create_project_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ProjectResponse::from(project))))
}

/// 获取项目详情（含统计字段）
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<GetProjectRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    let query = GetProject {
        project_id: req.id,
        user: auth.user_id,
    };

    let project = state.get_project_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(ProjectResponse::from(project))))
}

/// 列出当前用户的项目
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<ProjectListResponse>>, ApiError> {
    let projects = state
        .list_projects_handler
        .handle(ListProjects { user: auth.user_id })
        .await?;

    let projects: Vec<ProjectResponse> = projects.into_iter().map(ProjectResponse::from).collect();

    Ok(Json(ApiResponse::success(ProjectListResponse {
        total: projects.len(),
        projects,
    })))
}

/// 更新项目名称/简介
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    let command = UpdateProject {
        project_id: req.id,
        user: auth.user_id,
        name: req.name,
        description: req.description,
    };

    let project = state.update_project_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ProjectResponse::from(project))))
}

/// 删除项目（级联删除章节）
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<DeleteProjectRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let command = DeleteProject {
        project_id: req.id,
        user: auth.user_id,
    };

    let result = state.delete_project_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: result.message,
    })))
}
