//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口:
//! - 生成服务（大纲/章节必需，书名/封面/slug/描述可选）
//! - 发布方
//! - 用户通知

mod cover_generator;
mod generation;
mod metadata_generator;
mod notifier;
mod publisher;
mod story_writer;
mod title_generator;

pub use cover_generator::CoverGeneratorPort;
pub use generation::{GenerationError, GenerationErrorKind, RATE_LIMIT_STATUS};
pub use metadata_generator::{MetaGeneratorPort, SlugGeneratorPort};
pub use notifier::{NotifierPort, StudioEvent};
pub use publisher::{PublishError, PublisherPort};
pub use story_writer::StoryWriterPort;
pub use title_generator::{TitleGeneratorPort, TitleRequest};
