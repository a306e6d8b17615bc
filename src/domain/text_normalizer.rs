//! 文本规整器
//!
//! 把生成服务返回的原始文本清洗为可直接写入书稿的字段值。
//! 全部为纯函数，无挂起点。

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 元描述推荐的最大字符数
pub const DESCRIPTION_LIMIT: usize = 160;

/// 标题候选批次大小
pub const TITLE_BATCH_SIZE: usize = 5;

/// 行首的 markdown 标记、编号、列表符号
static LEADING_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[#*\-\d.\s]+").expect("valid regex"));

/// 行首的 "Kapitel N" / "Chapter N"，可带冒号或句点
static CHAPTER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:kapitel|chapter)\s*\d+[:.]?\s*").expect("valid regex")
});

/// 副标题分隔符: 连字符、en dash、em dash、冒号
static SUBTITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[–—\-:]").expect("valid regex"));

/// 残留的 markdown 符号
static MARKDOWN_GLYPHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_\[\]]").expect("valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// 清洗章节标题
///
/// 清洗步骤:
/// 1. 去掉行首的 markdown / 编号 / 列表标记
/// 2. 去掉 "Kapitel N" / "Chapter N" 前缀
/// 3. 在第一个破折号或冒号处截断，只保留前半部分
/// 4. 去掉 `*` `_` `[` `]`
/// 5. 去掉首尾空白
pub fn clean_chapter_title(raw: &str) -> String {
    let title = LEADING_MARKERS.replace(raw, "");
    let title = CHAPTER_PREFIX.replace(&title, "");
    let title = SUBTITLE_SEPARATOR
        .split(&title)
        .next()
        .unwrap_or_default()
        .to_string();
    let title = MARKDOWN_GLYPHS.replace_all(&title, "");
    title.trim().to_string()
}

/// 规整 slug: 去首尾空白、转小写、连续空白折叠为单个连字符
///
/// 只用于生成结果，用户手动输入的 slug 不做处理
pub fn normalize_slug(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    WHITESPACE_RUN.replace_all(&lowered, "-").into_owned()
}

/// 元描述长度评估（仅提示，不阻止发布）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionFit {
    Optimal,
    TooLong,
}

impl DescriptionFit {
    pub fn label(&self) -> &'static str {
        match self {
            DescriptionFit::Optimal => "Optimal",
            DescriptionFit::TooLong => "Too Long",
        }
    }
}

pub fn classify_description(description: &str) -> DescriptionFit {
    if description.chars().count() <= DESCRIPTION_LIMIT {
        DescriptionFit::Optimal
    } else {
        DescriptionFit::TooLong
    }
}

/// 解析标题候选批次
///
/// 生成服务可能用 ```json 代码块包裹结果；去掉包裹后必须是字符串数组。
/// 最多保留 `TITLE_BATCH_SIZE` 个，空数组视为无效。
pub fn parse_title_batch(raw: &str) -> Result<Vec<String>, &'static str> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let value: serde_json::Value =
        serde_json::from_str(cleaned.trim()).map_err(|_| "标题结果不是合法的 JSON")?;

    let items = value.as_array().ok_or("标题结果不是数组")?;
    let mut titles = Vec::with_capacity(TITLE_BATCH_SIZE);
    for item in items.iter().take(TITLE_BATCH_SIZE) {
        let title = item.as_str().ok_or("标题数组中包含非字符串元素")?;
        titles.push(title.trim().to_string());
    }

    if titles.is_empty() {
        return Err("标题数组为空");
    }
    Ok(titles)
}
