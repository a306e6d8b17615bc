//! 应用层错误定义

use thiserror::Error;

use crate::application::ports::PublishError;
use crate::domain::draft::DraftError;
use crate::domain::Stage;

/// 工作室操作错误
///
/// 生成失败不会出现在这里：它们在任务边界被转换为用户通知
#[derive(Debug, Error)]
pub enum StudioError {
    /// 只能在发布阶段发布
    #[error("Publishing requires the publish stage, current stage is {0}")]
    NotAtPublishStage(Stage),

    /// 发布方返回失败，书稿保持不变
    #[error("Publish failed: {0}")]
    Publish(#[from] PublishError),

    /// 书稿命令无效
    #[error("Invalid draft operation: {0}")]
    Draft(#[from] DraftError),
}
