//! Notifier Port - 面向用户的通知
//!
//! 生成失败、发布结果等都以事件形式推送，具体实现在 infrastructure/events 层

use serde::{Deserialize, Serialize};

use super::GenerationErrorKind;
use crate::application::slots::SlotKey;
use crate::domain::Stage;

/// 工作室事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum StudioEvent {
    /// 生成任务开始
    SlotStarted { slot: SlotKey },
    /// 生成结果已写入书稿
    SlotSucceeded { slot: SlotKey },
    /// 生成失败，书稿保持不变
    SlotFailed {
        slot: SlotKey,
        kind: GenerationErrorKind,
        message: String,
    },
    /// 书名候选已就绪
    TitleCandidatesReady { candidates: Vec<String> },
    /// 阶段切换
    StageChanged { from: Stage, to: Stage },
    /// 发布成功
    Published { title: String, slug: String },
    /// 发布失败，停留在发布阶段
    PublishFailed { error: String },
    /// 书稿被丢弃并重置
    DraftReset,
}

/// Notifier Port
pub trait NotifierPort: Send + Sync {
    fn notify(&self, event: StudioEvent);
}
