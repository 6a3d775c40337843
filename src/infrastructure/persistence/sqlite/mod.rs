//! SQLite Persistence - SQLite 数据库持久化实现

mod chapter_repo;
mod codec;
mod database;
mod project_repo;

pub use chapter_repo::*;
pub use database::*;
pub use project_repo::*;
