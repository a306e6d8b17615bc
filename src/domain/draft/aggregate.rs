//! Draft Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Brief, Chapter, ChapterId, CoverArt, DraftError, Level, Metadata, Pages};
use crate::domain::Stage;

/// 大纲条目上限
pub const MAX_CHAPTERS: usize = 6;

/// DraftAggregate 聚合根
///
/// 不变量:
/// - chapters 与 outline 等长且顺序一致
/// - outline 长度为 0 或 1..=MAX_CHAPTERS
/// - brief.word_count 始终等于 pages * WORDS_PER_PAGE
///
/// 所有写操作都通过显式命令方法完成，每个字段只有一个写入方
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftAggregate {
    brief: Brief,
    pages: Pages,
    outline: Vec<String>,
    chapters: Vec<Chapter>,
    cover: CoverArt,
    metadata: Metadata,
    stage: Stage,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DraftAggregate {
    pub fn new(level: Level, genre: impl Into<String>, pages: Pages) -> Self {
        let now = Utc::now();
        Self {
            brief: Brief::new(level, genre, pages),
            pages,
            outline: Vec::new(),
            chapters: Vec::new(),
            cover: CoverArt::default(),
            metadata: Metadata::default(),
            stage: Stage::Brief,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // ------------------------------------------------------------------
    // Brief
    // ------------------------------------------------------------------

    pub fn set_level(&mut self, level: Level) {
        self.brief.set_level(level);
        self.touch();
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.brief.set_genre(genre.into());
        self.touch();
    }

    /// 修改页数只重算字数，不影响已有大纲和章节
    pub fn set_pages(&mut self, pages: Pages) {
        self.pages = pages;
        self.brief.apply_pages(pages);
        self.touch();
    }

    // ------------------------------------------------------------------
    // Outline / Chapters
    // ------------------------------------------------------------------

    /// 应用新大纲
    ///
    /// 章节列表整体重建（新 ID、pending、空内容），旧章节内容全部丢弃
    pub fn apply_outline(&mut self, titles: Vec<String>) {
        let mut titles = titles;
        titles.truncate(MAX_CHAPTERS);
        self.chapters = titles.iter().map(Chapter::pending).collect();
        self.outline = titles;
        self.touch();
    }

    /// 原地编辑大纲条目，同步重命名对应章节（内容与状态不变）
    pub fn edit_outline_entry(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DraftError> {
        let len = self.outline.len();
        let entry = self
            .outline
            .get_mut(index)
            .ok_or(DraftError::OutlineIndexOutOfRange { index, len })?;
        let text = text.into();
        *entry = text.clone();
        if let Some(chapter) = self.chapters.get_mut(index) {
            chapter.rename(text);
        }
        self.touch();
        Ok(())
    }

    /// 标记章节开始生成，返回章节 ID 与当前标题
    ///
    /// 章节已在生成中时返回 `Ok(None)`
    pub fn begin_chapter(
        &mut self,
        index: usize,
    ) -> Result<Option<(ChapterId, String)>, DraftError> {
        let chapter = self
            .chapters
            .get_mut(index)
            .ok_or(DraftError::ChapterNotFound(index))?;
        if !chapter.begin_generation() {
            return Ok(None);
        }
        let started = (chapter.id(), chapter.title().to_string());
        self.touch();
        Ok(Some(started))
    }

    /// 写入章节生成结果（generating -> done）
    ///
    /// 章节已不存在（大纲被重新生成）时返回 None
    pub fn set_chapter_result(&mut self, id: ChapterId, content: String) -> Option<usize> {
        let index = self.chapter_index(id)?;
        self.chapters[index].complete(content);
        self.touch();
        Some(index)
    }

    /// 章节生成失败（generating -> pending）
    pub fn revert_chapter(&mut self, id: ChapterId) -> Option<usize> {
        let index = self.chapter_index(id)?;
        self.chapters[index].revert();
        self.touch();
        Some(index)
    }

    pub fn chapter_index(&self, id: ChapterId) -> Option<usize> {
        self.chapters.iter().position(|c| c.id() == id)
    }

    // ------------------------------------------------------------------
    // Cover
    // ------------------------------------------------------------------

    pub fn set_cover_prompt(&mut self, prompt: impl Into<String>) {
        self.cover.prompt = prompt.into();
        self.touch();
    }

    pub fn set_cover_url(&mut self, url: impl Into<String>) {
        self.cover.url = Some(url.into());
        self.touch();
    }

    /// 由简报与标题拼出的默认封面提示词
    pub fn default_cover_prompt(&self) -> String {
        format!(
            "A cinematic book cover for a {} German {} book titled \"{}\". High quality, minimalist, atmospheric.",
            self.brief.level(),
            self.brief.genre(),
            self.metadata.title
        )
    }

    /// 提示词为空且已有标题时填入默认提示词
    pub fn seed_cover_prompt(&mut self) -> bool {
        if !self.cover.prompt.is_empty() || self.metadata.title.is_empty() {
            return false;
        }
        self.cover.prompt = self.default_cover_prompt();
        self.touch();
        true
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = title.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.metadata.description = description.into();
        self.touch();
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.metadata.slug = slug.into();
        self.touch();
    }

    // ------------------------------------------------------------------
    // Stage
    // ------------------------------------------------------------------

    /// 当前阶段的前进门槛
    ///
    /// - Brief: 标题非空
    /// - Outline: 大纲非空
    /// - Chapters / Cover: 无门槛
    /// - Publish: 最后一个阶段，不可前进
    pub fn gate_open(&self) -> bool {
        match self.stage {
            Stage::Brief => !self.metadata.title.is_empty(),
            Stage::Outline => !self.outline.is_empty(),
            Stage::Chapters | Stage::Cover => true,
            Stage::Publish => false,
        }
    }

    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.touch();
    }

    // Getters
    pub fn brief(&self) -> &Brief {
        &self.brief
    }

    pub fn pages(&self) -> Pages {
        self.pages
    }

    pub fn outline(&self) -> &[String] {
        &self.outline
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn get_chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn cover(&self) -> &CoverArt {
        &self.cover
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::ChapterStatus;

    fn draft() -> DraftAggregate {
        DraftAggregate::new(Level::A2, "Krimi", Pages::new(16).unwrap())
    }

    fn titles(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Titel {}", i)).collect()
    }

    #[test]
    fn test_apply_outline_builds_pending_chapters() {
        for n in 0..=MAX_CHAPTERS {
            let mut draft = draft();
            draft.apply_outline(titles(n));

            assert_eq!(draft.outline().len(), n);
            assert_eq!(draft.chapters().len(), n);
            for (i, chapter) in draft.chapters().iter().enumerate() {
                assert_eq!(chapter.title(), draft.outline()[i]);
                assert_eq!(chapter.status(), ChapterStatus::Pending);
                assert!(chapter.content().is_empty());
            }
        }
    }

    #[test]
    fn test_apply_outline_caps_at_six() {
        let mut draft = draft();
        draft.apply_outline(titles(9));
        assert_eq!(draft.outline().len(), MAX_CHAPTERS);
        assert_eq!(draft.chapters().len(), MAX_CHAPTERS);
        assert_eq!(draft.outline()[5], "Titel 5");
    }

    #[test]
    fn test_regenerating_outline_discards_chapter_content() {
        let mut draft = draft();
        draft.apply_outline(titles(3));
        let (id, _) = draft.begin_chapter(0).unwrap().unwrap();
        draft.set_chapter_result(id, "Inhalt".to_string());

        draft.apply_outline(vec!["Titel 0".to_string()]);

        assert_eq!(draft.chapters().len(), 1);
        assert_eq!(draft.chapters()[0].status(), ChapterStatus::Pending);
        assert!(draft.chapters()[0].content().is_empty());
        assert_ne!(draft.chapters()[0].id(), id);
        // 旧章节的结果不能再写入
        assert_eq!(draft.set_chapter_result(id, "spät".to_string()), None);
    }

    #[test]
    fn test_edit_outline_entry_renames_chapter_in_place() {
        let mut draft = draft();
        draft.apply_outline(titles(2));
        let (id, _) = draft.begin_chapter(1).unwrap().unwrap();
        draft.set_chapter_result(id, "Text".to_string());

        draft.edit_outline_entry(1, "Neuer Titel").unwrap();

        let chapter = draft.get_chapter(1).unwrap();
        assert_eq!(draft.outline()[1], "Neuer Titel");
        assert_eq!(chapter.title(), "Neuer Titel");
        assert_eq!(chapter.content(), "Text");
        assert_eq!(chapter.status(), ChapterStatus::Done);
        assert_eq!(chapter.id(), id);

        assert_eq!(
            draft.edit_outline_entry(5, "x"),
            Err(DraftError::OutlineIndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_begin_chapter_is_guarded() {
        let mut draft = draft();
        draft.apply_outline(titles(1));
        assert!(draft.begin_chapter(0).unwrap().is_some());
        assert!(draft.begin_chapter(0).unwrap().is_none());
        assert_eq!(draft.begin_chapter(3), Err(DraftError::ChapterNotFound(3)));
    }

    #[test]
    fn test_set_pages_keeps_outline() {
        let mut draft = draft();
        draft.apply_outline(titles(2));
        let before = draft.chapters().to_vec();

        draft.set_pages(Pages::new(24).unwrap());

        assert_eq!(draft.brief().word_count(), 6000);
        assert_eq!(draft.chapters(), before.as_slice());
    }

    #[test]
    fn test_gates() {
        let mut draft = draft();
        assert!(!draft.gate_open());
        draft.set_title("Herz unter dem Tisch");
        assert!(draft.gate_open());

        draft.set_stage(Stage::Outline);
        assert!(!draft.gate_open());
        draft.apply_outline(titles(1));
        assert!(draft.gate_open());

        draft.set_stage(Stage::Publish);
        assert!(!draft.gate_open());
    }

    #[test]
    fn test_seed_cover_prompt() {
        let mut draft = draft();
        assert!(!draft.seed_cover_prompt());

        draft.set_title("Stunde 23:59");
        assert!(draft.seed_cover_prompt());
        assert_eq!(
            draft.cover().prompt,
            "A cinematic book cover for a A2 German Krimi book titled \"Stunde 23:59\". High quality, minimalist, atmospheric."
        );

        // 已有提示词时不覆盖
        draft.set_cover_prompt("eigener Prompt");
        assert!(!draft.seed_cover_prompt());
        assert_eq!(draft.cover().prompt, "eigener Prompt");
    }
}
