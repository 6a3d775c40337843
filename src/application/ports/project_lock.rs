//! Project Lock Port - 按项目串行化写操作
//!
//! 章节写入与统计重算必须作为一个整体执行，同一项目的并发写请求在此排队。
//! 具体实现在 infrastructure/memory 层

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

/// 项目写锁守卫，drop 时释放
pub type ProjectGuard = OwnedMutexGuard<()>;

/// Project Lock Port
#[async_trait]
pub trait ProjectLockPort: Send + Sync {
    /// 获取项目写锁（等待直到可用）
    async fn lock(&self, project_id: Uuid) -> ProjectGuard;

    /// 释放不再使用的锁条目
    fn forget(&self, project_id: Uuid);
}
