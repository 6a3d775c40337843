//! Project Context - 已发布章节统计

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 项目聚合统计
///
/// 只由当前已发布章节推导，从不读取上一次的统计结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectStats {
    /// 已发布章节字数之和
    pub word_count: u64,
    /// 已发布章节数
    pub chapter_count: u64,
    /// 已发布章节中最晚的 updated_at
    pub latest_update: Option<DateTime<Utc>>,
}

impl ProjectStats {
    /// 由已发布章节的 (word_count, updated_at) 折叠得到统计
    pub fn from_published<I>(chapters: I) -> Self
    where
        I: IntoIterator<Item = (usize, DateTime<Utc>)>,
    {
        chapters
            .into_iter()
            .fold(Self::default(), |acc, (word_count, updated_at)| Self {
                word_count: acc.word_count + word_count as u64,
                chapter_count: acc.chapter_count + 1,
                latest_update: Some(match acc.latest_update {
                    Some(latest) if latest >= updated_at => latest,
                    _ => updated_at,
                }),
            })
    }

    /// 项目对外展示的更新时间：max(项目自身, 最近更新的已发布章节)
    pub fn effective_updated_at(&self, project_updated_at: DateTime<Utc>) -> DateTime<Utc> {
        match self.latest_update {
            Some(latest) if latest > project_updated_at => latest,
            _ => project_updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_empty_stats() {
        let stats = ProjectStats::from_published(Vec::new());
        assert_eq!(stats, ProjectStats::default());

        let now = Utc::now();
        assert_eq!(stats.effective_updated_at(now), now);
    }

    #[test]
    fn test_sums_and_latest() {
        let base = Utc::now();
        let later = base + Duration::seconds(30);
        let stats = ProjectStats::from_published(vec![(120, later), (80, base)]);

        assert_eq!(stats.word_count, 200);
        assert_eq!(stats.chapter_count, 2);
        assert_eq!(stats.latest_update, Some(later));
    }

    #[test]
    fn test_effective_updated_at_takes_max() {
        let base = Utc::now();
        let stats = ProjectStats::from_published(vec![(1, base + Duration::seconds(5))]);

        assert_eq!(stats.effective_updated_at(base), base + Duration::seconds(5));
        assert_eq!(
            stats.effective_updated_at(base + Duration::seconds(10)),
            base + Duration::seconds(10)
        );
    }
}
