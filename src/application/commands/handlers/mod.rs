//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod batch_handlers;
mod chapter_handlers;
mod project_handlers;

pub use batch_handlers::*;
pub use chapter_handlers::*;
pub use project_handlers::*;
