//! AINovel - 多租户小说创作后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Chapter Context: 章节、状态、内容校验
//! - Project Context: 项目、派生统计
//! - WordCounter: 中英文混排字数统计
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, ProjectLock）
//! - Commands: 章节生命周期、批量操作、项目管理
//! - Queries: 章节与项目查询
//! - ProjectStatsAggregator: 由已发布章节重算项目统计
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（errno 信封）
//! - Auth: Bearer JWT 校验
//! - Memory: 按项目串行化写操作的锁表
//! - Persistence: SQLite 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

pub use config::{load_config, AppConfig};
