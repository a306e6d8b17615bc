//! Draft Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("页数超出范围: {pages} (允许 {min}..={max})")]
    PagesOutOfRange { pages: u32, min: u32, max: u32 },

    #[error("大纲索引越界: {index} (共 {len} 条)")]
    OutlineIndexOutOfRange { index: usize, len: usize },

    #[error("章节不存在: {0}")]
    ChapterNotFound(usize),

    #[error("未知的语言水平: {0}")]
    UnknownLevel(String),
}
