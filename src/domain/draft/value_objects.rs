//! Draft Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DraftError;

/// 每页对应的目标字数
pub const WORDS_PER_PAGE: u32 = 250;

/// 章节稳定标识
///
/// 大纲重新生成时章节全部重建，旧 ID 随之失效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChapterId(Uuid);

impl ChapterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChapterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 语言水平（CEFR）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    A1,
    #[default]
    A2,
    B1,
    B2,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::A1, Level::A2, Level::B1, Level::B2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
        }
    }
}

impl std::str::FromStr for Level {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(Level::A1),
            "A2" => Ok(Level::A2),
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            _ => Err(DraftError::UnknownLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 目标页数
///
/// 不变量: 大于 0，字数始终为 `pages * WORDS_PER_PAGE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pages(u32);

impl Pages {
    /// 上限保证字数不会溢出 u32
    pub const MAX: u32 = u32::MAX / WORDS_PER_PAGE;

    pub fn new(pages: u32) -> Result<Self, DraftError> {
        Self::within(pages, 1, Self::MAX)
    }

    /// 在给定闭区间内创建
    pub fn within(pages: u32, min: u32, max: u32) -> Result<Self, DraftError> {
        let min = min.max(1);
        let max = max.min(Self::MAX);
        if pages < min || pages > max {
            return Err(DraftError::PagesOutOfRange { pages, min, max });
        }
        Ok(Self(pages))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn word_count(&self) -> u32 {
        self.0 * WORDS_PER_PAGE
    }
}

impl std::fmt::Display for Pages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
