//! Metadata Generator Ports - slug 与 SEO 描述生成（均可选）

use async_trait::async_trait;

use super::GenerationError;

#[async_trait]
pub trait SlugGeneratorPort: Send + Sync {
    async fn generate_slug(&self, title: &str) -> Result<String, GenerationError>;
}

#[async_trait]
pub trait MetaGeneratorPort: Send + Sync {
    /// context 为正文开头片段或体裁描述
    async fn generate_meta(&self, title: &str, context: &str) -> Result<String, GenerationError>;
}
