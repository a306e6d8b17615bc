//! Domain Layer - 领域层
//!
//! 包含:
//! - Draft Context: 书稿聚合
//! - Stage: 五个创作阶段
//! - Publish: 发布产物
//! - Text Normalizer: 生成文本规整

pub mod draft;
pub mod publish;
pub mod text_normalizer;

mod stage;

pub use publish::{PublishArtifact, DEFAULT_PLACEHOLDER_COVER, UNTITLED_TITLE};
pub use stage::Stage;
pub use text_normalizer::{
    classify_description, clean_chapter_title, normalize_slug, parse_title_batch,
    DescriptionFit, DESCRIPTION_LIMIT, TITLE_BATCH_SIZE,
};
