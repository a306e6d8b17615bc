//! Title Generator Port - 书名候选生成（可选）

use async_trait::async_trait;

use super::GenerationError;
use crate::domain::draft::Level;

/// 书名生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRequest {
    pub level: Level,
    pub genre: String,
    pub word_count: u32,
    pub pages: u32,
    /// 可选的场景提示
    pub scene: Option<String>,
}

/// Title Generator Port
#[async_trait]
pub trait TitleGeneratorPort: Send + Sync {
    /// 返回原始文本，期望为 5 个字符串组成的 JSON 数组
    async fn generate_titles(&self, request: &TitleRequest) -> Result<String, GenerationError>;
}
