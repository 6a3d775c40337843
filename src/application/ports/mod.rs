//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod project_lock;
mod repositories;

pub use project_lock::{ProjectGuard, ProjectLockPort};
pub use repositories::{
    ChapterRecord, ChapterRepositoryPort, ProjectRecord, ProjectRepositoryPort, RepositoryError,
};
