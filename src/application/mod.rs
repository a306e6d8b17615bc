//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（生成服务、发布方、通知）
//! - retry: 限流退避重试策略
//! - slots: 生成任务状态与书名候选选择
//! - studio: 五阶段编排器
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod retry;
pub mod slots;
pub mod studio;

pub use error::StudioError;

pub use ports::{
    // Generators
    CoverGeneratorPort,
    GenerationError,
    GenerationErrorKind,
    MetaGeneratorPort,
    SlugGeneratorPort,
    StoryWriterPort,
    TitleGeneratorPort,
    TitleRequest,
    RATE_LIMIT_STATUS,
    // Publisher
    PublishError,
    PublisherPort,
    // Notifier
    NotifierPort,
    StudioEvent,
};

pub use retry::RetryPolicy;
pub use slots::{SlotBoard, SlotKey, SlotState, TitlePicker};
pub use studio::{Collaborators, SlotReport, Studio, StudioSettings, META_CONTEXT_CHARS};
