//! In-Memory Project Locks Implementation

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::ports::{ProjectGuard, ProjectLockPort};

/// 内存项目写锁表
///
/// 每个项目一把 tokio Mutex，按需创建；只在单进程内有效
pub struct InMemoryProjectLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl InMemoryProjectLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 当前持有锁条目的项目数
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Default for InMemoryProjectLocks {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectLockPort for InMemoryProjectLocks {
    async fn lock(&self, project_id: Uuid) -> ProjectGuard {
        // 先克隆出 Arc，DashMap 分片锁不能跨 await 持有
        let mutex = self
            .locks
            .entry(project_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;
        tracing::trace!(project_id = %project_id, "Project lock acquired");
        guard
    }

    fn forget(&self, project_id: Uuid) {
        if self.locks.remove(&project_id).is_some() {
            tracing::debug!(project_id = %project_id, "Project lock released");
        }
    }
}
