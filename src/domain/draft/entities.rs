//! Draft Context - Entities

use serde::{Deserialize, Serialize};

use super::{ChapterId, Level, Pages};

/// 创作简报
///
/// 不变量:
/// - word_count 由页数推导，不能单独编辑
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brief {
    level: Level,
    genre: String,
    word_count: u32,
}

impl Brief {
    pub fn new(level: Level, genre: impl Into<String>, pages: Pages) -> Self {
        Self {
            level,
            genre: genre.into(),
            word_count: pages.word_count(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    pub(super) fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub(super) fn set_genre(&mut self, genre: String) {
        self.genre = genre;
    }

    pub(super) fn apply_pages(&mut self, pages: Pages) {
        self.word_count = pages.word_count();
    }
}

/// 章节生成状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterStatus {
    Pending,
    Generating,
    Done,
}

impl ChapterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterStatus::Pending => "pending",
            ChapterStatus::Generating => "generating",
            ChapterStatus::Done => "done",
        }
    }
}

/// 章节
///
/// 与大纲条目一一对应，按索引寻址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    id: ChapterId,
    title: String,
    content: String,
    status: ChapterStatus,
}

impl Chapter {
    /// 新建空章节（pending）
    pub fn pending(title: impl Into<String>) -> Self {
        Self {
            id: ChapterId::new(),
            title: title.into(),
            content: String::new(),
            status: ChapterStatus::Pending,
        }
    }

    pub fn id(&self) -> ChapterId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> ChapterStatus {
        self.status
    }

    pub(super) fn rename(&mut self, title: String) {
        self.title = title;
    }

    /// pending/done -> generating，已在生成中返回 false
    pub(super) fn begin_generation(&mut self) -> bool {
        if self.status == ChapterStatus::Generating {
            return false;
        }
        self.status = ChapterStatus::Generating;
        true
    }

    pub(super) fn complete(&mut self, content: String) {
        self.content = content;
        self.status = ChapterStatus::Done;
    }

    /// 生成失败：回到 pending，保留原有内容
    pub(super) fn revert(&mut self) {
        self.status = ChapterStatus::Pending;
    }
}

/// 发布元数据，用户可随时编辑
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub slug: String,
}

/// 封面：提示词 + 生成后的图片地址
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverArt {
    pub prompt: String,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_lifecycle() {
        let mut chapter = Chapter::pending("Der Brief");
        assert_eq!(chapter.status(), ChapterStatus::Pending);

        assert!(chapter.begin_generation());
        assert!(!chapter.begin_generation());

        chapter.complete("Es war dunkel.".to_string());
        assert_eq!(chapter.status(), ChapterStatus::Done);

        // 重新生成失败时保留上一次的内容
        assert!(chapter.begin_generation());
        chapter.revert();
        assert_eq!(chapter.status(), ChapterStatus::Pending);
        assert_eq!(chapter.content(), "Es war dunkel.");
    }

    #[test]
    fn test_brief_word_count_follows_pages() {
        let mut brief = Brief::new(Level::A2, "Krimi", Pages::new(16).unwrap());
        assert_eq!(brief.word_count(), 4000);

        brief.apply_pages(Pages::new(24).unwrap());
        assert_eq!(brief.word_count(), 6000);
    }
}
