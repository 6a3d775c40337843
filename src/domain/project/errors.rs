//! Project Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("无效的项目名称: {0}")]
    InvalidName(&'static str),
}
