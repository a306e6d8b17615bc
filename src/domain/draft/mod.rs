//! Draft Context - 书稿限界上下文
//!
//! 职责:
//! - 书稿聚合（简报、大纲、章节、封面、元数据、当前阶段）
//! - 章节实体及其生成状态
//! - 页数与字数推导

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::{DraftAggregate, MAX_CHAPTERS};
pub use entities::{Brief, Chapter, ChapterStatus, CoverArt, Metadata};
pub use errors::DraftError;
pub use value_objects::{ChapterId, Level, Pages, WORDS_PER_PAGE};
