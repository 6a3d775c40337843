//! Project Context - 项目限界上下文
//!
//! 职责:
//! - 项目标识与名称
//! - 已发布章节的聚合统计

mod errors;
mod stats;
mod value_objects;

pub use errors::ProjectError;
pub use stats::ProjectStats;
pub use value_objects::{ProjectName, UserId, MAX_PROJECT_NAME_CHARS};
