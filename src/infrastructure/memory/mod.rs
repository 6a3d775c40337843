//! Memory Layer - In-Memory State Management
//!
//! 实现 ProjectLockPort，按项目串行化章节写操作

mod project_locks;

pub use project_locks::InMemoryProjectLocks;
