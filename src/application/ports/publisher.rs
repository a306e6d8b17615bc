//! Publisher Port - 发布交接
//!
//! 唯一提交状态的外部调用，产物之后的存储与索引由实现方负责

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::PublishArtifact;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("Publish rejected: {0}")]
    Rejected(String),

    #[error("Publisher unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PublisherPort: Send + Sync {
    async fn publish(&self, artifact: &PublishArtifact) -> Result<(), PublishError>;
}
