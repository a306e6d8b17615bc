//! Story Writer Port - 大纲与章节正文生成
//!
//! 书稿生成的必需端口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;

use super::GenerationError;
use crate::domain::draft::Brief;

/// Story Writer Port
#[async_trait]
pub trait StoryWriterPort: Send + Sync {
    /// 根据简报生成章节标题列表（原始文本，未清洗）
    async fn generate_outline(&self, brief: &Brief) -> Result<Vec<String>, GenerationError>;

    /// 生成单个章节正文
    async fn generate_chapter(&self, title: &str, brief: &Brief) -> Result<String, GenerationError>;
}
