//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、ProjectLock）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - stats_aggregator: 项目统计重算
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ownership;
pub mod ports;
pub mod queries;
pub mod stats_aggregator;

// Re-exports
pub use commands::{
    // Batch commands
    BatchPublishChapters,
    BatchUpdateStatus,
    // Chapter commands
    CreateChapter,
    DeleteChapter,
    UpdateChapter,
    // Project commands
    CreateProject,
    DeleteProject,
    UpdateProject,
    // Handlers
    handlers::{
        BatchPublishChaptersHandler, BatchPublishResult, BatchUpdateStatusHandler,
        BatchUpdateStatusResponse, CreateChapterHandler, CreateProjectHandler,
        DeleteChapterHandler, DeleteChapterResponse, DeleteProjectHandler, DeleteProjectResponse,
        FailedChapter, PublishedChapter, UpdateChapterHandler, UpdateProjectHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    ChapterRecord, ChapterRepositoryPort, ProjectGuard, ProjectLockPort, ProjectRecord,
    ProjectRepositoryPort, RepositoryError,
};

pub use queries::{
    // Chapter queries
    GetChapter,
    ListChapters,
    ListUnpublishedChapters,
    // Project queries
    GetProject,
    ListProjects,
    // Handlers
    handlers::{
        GetChapterHandler, GetProjectHandler, ListChaptersHandler, ListProjectsHandler,
        ListUnpublishedChaptersHandler, UnpublishedChapter,
    },
};

pub use stats_aggregator::{ProjectStatsAggregator, DEFAULT_RECOMPUTE_ATTEMPTS};
