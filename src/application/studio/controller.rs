//! Stage Controller - 五阶段创作流程
//!
//! Studio 独占书稿聚合，所有修改都经由显式命令方法。
//! 生成任务在 tokio 上并发执行，结果通过通道交回，由调用方驱动写入
//! （`poll_outcomes` / `settle_next` / `settle_all`）。

use tokio::sync::mpsc;

use super::outcome::{SlotOutcome, SlotReport};
use super::Collaborators;
use crate::application::error::StudioError;
use crate::application::ports::StudioEvent;
use crate::application::retry::RetryPolicy;
use crate::application::slots::{SlotBoard, SlotKey, SlotState, TitlePicker};
use crate::domain::draft::{Brief, Chapter, CoverArt, DraftAggregate, Level, Metadata, Pages};
use crate::domain::{classify_description, DescriptionFit, PublishArtifact, Stage};

/// 工作室设置
#[derive(Debug, Clone)]
pub struct StudioSettings {
    pub retry: RetryPolicy,
    pub default_level: Level,
    pub default_genre: String,
    pub default_pages: u32,
    pub min_pages: u32,
    pub max_pages: u32,
    pub placeholder_cover_url: String,
    /// 结果通道容量
    pub outcome_buffer: usize,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            default_level: Level::A2,
            default_genre: "Krimi".to_string(),
            default_pages: 16,
            min_pages: 8,
            max_pages: 32,
            placeholder_cover_url: crate::domain::DEFAULT_PLACEHOLDER_COVER.to_string(),
            outcome_buffer: 64,
        }
    }
}

/// 书稿生成编排器
///
/// 必须在 tokio 运行时内使用（生成任务通过 `tokio::spawn` 启动）
pub struct Studio {
    pub(super) settings: StudioSettings,
    pub(super) collaborators: Collaborators,
    pub(super) draft: DraftAggregate,
    pub(super) slots: SlotBoard,
    pub(super) title_picker: TitlePicker,
    pub(super) outcome_tx: mpsc::Sender<SlotOutcome>,
    outcome_rx: mpsc::Receiver<SlotOutcome>,
    /// 已启动但结果尚未取回的任务数
    pub(super) in_flight: usize,
    default_pages: Pages,
}

impl Studio {
    pub fn new(
        settings: StudioSettings,
        collaborators: Collaborators,
    ) -> Result<Self, StudioError> {
        let default_pages = Pages::within(
            settings.default_pages,
            settings.min_pages,
            settings.max_pages,
        )?;
        let draft = DraftAggregate::new(
            settings.default_level,
            settings.default_genre.clone(),
            default_pages,
        );
        let (outcome_tx, outcome_rx) = mpsc::channel(settings.outcome_buffer.max(1));

        tracing::info!(
            level = %settings.default_level,
            genre = %settings.default_genre,
            pages = default_pages.get(),
            "Studio opened"
        );

        Ok(Self {
            settings,
            collaborators,
            draft,
            slots: SlotBoard::new(),
            title_picker: TitlePicker::new(),
            outcome_tx,
            outcome_rx,
            in_flight: 0,
            default_pages,
        })
    }

    pub(super) fn notify(&self, event: StudioEvent) {
        self.collaborators.notifier.notify(event);
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn draft(&self) -> &DraftAggregate {
        &self.draft
    }

    pub fn stage(&self) -> Stage {
        self.draft.stage()
    }

    pub fn brief(&self) -> &Brief {
        self.draft.brief()
    }

    pub fn pages(&self) -> Pages {
        self.draft.pages()
    }

    pub fn outline(&self) -> &[String] {
        self.draft.outline()
    }

    pub fn chapters(&self) -> &[Chapter] {
        self.draft.chapters()
    }

    pub fn metadata(&self) -> &Metadata {
        self.draft.metadata()
    }

    pub fn cover(&self) -> &CoverArt {
        self.draft.cover()
    }

    pub fn title_picker(&self) -> &TitlePicker {
        &self.title_picker
    }

    pub fn settings(&self) -> &StudioSettings {
        &self.settings
    }

    pub fn slot_state(&self, key: SlotKey) -> SlotState {
        self.slots.state(key)
    }

    pub fn chapter_slot_state(&self, index: usize) -> Option<SlotState> {
        self.draft
            .get_chapter(index)
            .map(|c| self.slots.state(SlotKey::Chapter(c.id())))
    }

    /// 元描述长度提示
    pub fn description_fit(&self) -> DescriptionFit {
        classify_description(&self.draft.metadata().description)
    }

    /// 阻塞导航的操作（大纲生成）是否在进行中
    pub fn is_busy(&self) -> bool {
        self.slots.is_running(SlotKey::Outline)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // ------------------------------------------------------------------
    // Brief & metadata editing
    // ------------------------------------------------------------------

    pub fn set_level(&mut self, level: Level) {
        self.draft.set_level(level);
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.draft.set_genre(genre);
    }

    /// 设置目标页数，字数随之重算
    pub fn set_pages(&mut self, pages: u32) -> Result<(), StudioError> {
        let pages = Pages::within(pages, self.settings.min_pages, self.settings.max_pages)?;
        self.draft.set_pages(pages);
        tracing::debug!(
            pages = pages.get(),
            word_count = self.draft.brief().word_count(),
            "Target pages changed"
        );
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.set_title(title);
        self.seed_cover_prompt_on_cover_stage();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.set_description(description);
    }

    /// 手动输入的 slug 原样保存
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.draft.set_slug(slug);
    }

    pub fn set_cover_prompt(&mut self, prompt: impl Into<String>) {
        self.draft.set_cover_prompt(prompt);
    }

    /// 编辑大纲条目，同步重命名章节
    pub fn edit_outline_entry(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), StudioError> {
        self.draft.edit_outline_entry(index, text)?;
        Ok(())
    }

    pub(super) fn seed_cover_prompt_on_cover_stage(&mut self) {
        if self.draft.stage() == Stage::Cover && self.draft.seed_cover_prompt() {
            tracing::debug!(prompt = %self.draft.cover().prompt, "Cover prompt seeded");
        }
    }

    // ------------------------------------------------------------------
    // Stage navigation
    // ------------------------------------------------------------------

    pub fn can_advance(&self) -> bool {
        !self.is_busy() && self.draft.gate_open()
    }

    /// 前进一个阶段；门槛不满足或忙碌时为空操作
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        let from = self.draft.stage();
        let Some(to) = from.next() else {
            return false;
        };
        self.draft.set_stage(to);
        self.seed_cover_prompt_on_cover_stage();
        tracing::info!(from = %from, to = %to, "Stage advanced");
        self.notify(StudioEvent::StageChanged { from, to });
        true
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_busy() && self.draft.stage().previous().is_some()
    }

    /// 后退一个阶段，不清除已生成内容
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        let from = self.draft.stage();
        let Some(to) = from.previous() else {
            return false;
        };
        self.draft.set_stage(to);
        self.seed_cover_prompt_on_cover_stage();
        tracing::info!(from = %from, to = %to, "Stage retreated");
        self.notify(StudioEvent::StageChanged { from, to });
        true
    }

    // ------------------------------------------------------------------
    // Outcome processing
    // ------------------------------------------------------------------

    /// 非阻塞地写入所有已完成的结果
    pub fn poll_outcomes(&mut self) -> Vec<SlotReport> {
        let mut reports = Vec::new();
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            reports.push(self.apply_outcome(outcome));
        }
        reports
    }

    /// 等待下一个结果并写入；没有进行中的任务时返回 None
    pub async fn settle_next(&mut self) -> Option<SlotReport> {
        if self.in_flight == 0 {
            return None;
        }
        let outcome = self.outcome_rx.recv().await?;
        Some(self.apply_outcome(outcome))
    }

    /// 等待所有进行中的任务完成
    pub async fn settle_all(&mut self) -> Vec<SlotReport> {
        let mut reports = Vec::new();
        while let Some(report) = self.settle_next().await {
            reports.push(report);
        }
        reports
    }

    // ------------------------------------------------------------------
    // Publish / cancel
    // ------------------------------------------------------------------

    /// 组装产物并交给发布方
    ///
    /// 成功后重置为空书稿；失败时停留在发布阶段，可无限次重试
    pub async fn publish(&mut self) -> Result<PublishArtifact, StudioError> {
        let stage = self.draft.stage();
        if stage != Stage::Publish {
            return Err(StudioError::NotAtPublishStage(stage));
        }

        let artifact = PublishArtifact::assemble(&self.draft, &self.settings.placeholder_cover_url);

        match self.collaborators.publisher.publish(&artifact).await {
            Ok(()) => {
                tracing::info!(
                    title = %artifact.title,
                    slug = %artifact.slug,
                    chapters = artifact.chapters.len(),
                    "Draft published"
                );
                self.notify(StudioEvent::Published {
                    title: artifact.title.clone(),
                    slug: artifact.slug.clone(),
                });
                self.reset();
                Ok(artifact)
            }
            Err(e) => {
                tracing::error!(error = %e, "Publish failed");
                self.notify(StudioEvent::PublishFailed {
                    error: e.to_string(),
                });
                Err(StudioError::Publish(e))
            }
        }
    }

    /// 放弃当前书稿
    pub fn cancel(&mut self) {
        tracing::info!(
            stage = %self.draft.stage(),
            in_flight = self.in_flight,
            "Draft discarded"
        );
        self.reset();
    }

    /// 重置为空书稿
    ///
    /// 更换结果通道，之后才完成的旧任务结果无处投递，直接丢弃
    fn reset(&mut self) {
        self.draft = DraftAggregate::new(
            self.settings.default_level,
            self.settings.default_genre.clone(),
            self.default_pages,
        );
        self.slots.clear();
        self.title_picker = TitlePicker::new();
        let (outcome_tx, outcome_rx) = mpsc::channel(self.settings.outcome_buffer.max(1));
        self.outcome_tx = outcome_tx;
        self.outcome_rx = outcome_rx;
        self.in_flight = 0;
        self.notify(StudioEvent::DraftReset);
    }
}
