//! Project Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProjectError;

/// 项目名称最大字符数
pub const MAX_PROJECT_NAME_CHARS: usize = 100;

/// 用户标识（来自已认证的 JWT subject）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 项目名称（1–100 字符）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl Into<String>) -> Result<Self, ProjectError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProjectError::InvalidName("项目名称不能为空"));
        }
        if name.chars().count() > MAX_PROJECT_NAME_CHARS {
            return Err(ProjectError::InvalidName("项目名称长度不能超过100字符"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_bounds() {
        assert!(ProjectName::new("").is_err());
        assert!(ProjectName::new("  ").is_err());
        assert!(ProjectName::new("斗破苍穹").is_ok());
        assert!(ProjectName::new("名".repeat(100)).is_ok());
        assert!(ProjectName::new("名".repeat(101)).is_err());
    }
}
