//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod auth;
pub mod http;
pub mod memory;
pub mod persistence;

pub use auth::JwtVerifier;
pub use memory::InMemoryProjectLocks;
pub use persistence::sqlite::{SqliteChapterRepository, SqliteProjectRepository};
