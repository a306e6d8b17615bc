//! Book Studio - 五阶段书稿生成编排
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Draft Context: 书稿聚合（简报、大纲、章节、封面、元数据）
//! - Stage: 五个创作阶段
//! - Text Normalizer: 生成文本规整
//! - Publish: 发布产物
//!
//! 应用层 (application/):
//! - Ports: 端口定义（StoryWriter, TitleGenerator, CoverGenerator, Slug/Meta, Publisher, Notifier）
//! - Retry: 限流退避重试
//! - Slots: 生成任务状态机与书名候选
//! - Studio: 阶段编排器
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 离线生成服务、内存书库
//! - Events: 工作室事件广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
