//! Cover Generator Port - 封面图生成（可选）

use async_trait::async_trait;

use super::GenerationError;

#[async_trait]
pub trait CoverGeneratorPort: Send + Sync {
    /// 根据场景提示词生成封面，返回图片地址
    async fn generate_cover(&self, prompt: &str) -> Result<String, GenerationError>;
}
