//! 发布产物
//!
//! 只在第 5 阶段发布时由书稿聚合转换一次，之后不可变

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::{Brief, Chapter, DraftAggregate};

/// 标题为空时的兜底标题
pub const UNTITLED_TITLE: &str = "Untitled Book";

/// 未生成封面时的占位图
pub const DEFAULT_PLACEHOLDER_COVER: &str = "https://via.placeholder.com/500x750";

/// 交给发布方的不可变快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishArtifact {
    pub title: String,
    pub brief: Brief,
    pub outline: Vec<String>,
    pub chapters: Vec<Chapter>,
    pub cover_url: String,
    pub description: String,
    pub slug: String,
    pub assembled_at: DateTime<Utc>,
}

impl PublishArtifact {
    /// 组装发布产物（总函数，不会失败）
    ///
    /// 标题和封面缺失时使用兜底值，其余字段原样复制
    pub fn assemble(draft: &DraftAggregate, placeholder_cover: &str) -> Self {
        let metadata = draft.metadata();
        let title = if metadata.title.is_empty() {
            UNTITLED_TITLE.to_string()
        } else {
            metadata.title.clone()
        };
        let cover_url = draft
            .cover()
            .url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| placeholder_cover.to_string());

        Self {
            title,
            brief: draft.brief().clone(),
            outline: draft.outline().to_vec(),
            chapters: draft.chapters().to_vec(),
            cover_url,
            description: metadata.description.clone(),
            slug: metadata.slug.clone(),
            assembled_at: Utc::now(),
        }
    }
}
