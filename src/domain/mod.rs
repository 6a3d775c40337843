//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Project Context: 项目与已发布统计
//! - Chapter Context: 章节生命周期
//!
//! 以及共享的中英混排字数统计

pub mod chapter;
pub mod project;

mod word_counter;

pub use word_counter::{count_words, count_words_opt};
