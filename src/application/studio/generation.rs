//! Generation Slots - 生成任务的触发与结果写入
//!
//! 触发方法只启动后台任务并立即返回；后台任务经重试策略调用生成服务，
//! 结果送回工作室后由 `apply_outcome` 写入书稿

use std::future::Future;

use super::outcome::{SlotOutcome, SlotReport};
use super::Studio;
use crate::application::error::StudioError;
use crate::application::ports::{GenerationError, StudioEvent, TitleRequest};
use crate::application::slots::{SlotKey, SlotState};
use crate::domain::draft::MAX_CHAPTERS;
use crate::domain::{clean_chapter_title, normalize_slug, parse_title_batch};

/// 描述生成时取第一章开头的字符数
pub const META_CONTEXT_CHARS: usize = 200;

/// 结果写入方式
enum Applied {
    Written,
    /// 目标已不存在或用户已离开，结果被丢弃
    Dropped,
}

impl Studio {
    /// 启动后台生成任务
    ///
    /// 调用方需先把任务置为 running
    fn spawn_slot<T, F, Fut, W>(&mut self, key: SlotKey, operation: F, wrap: W)
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, GenerationError>> + Send + 'static,
        W: FnOnce(Result<T, GenerationError>) -> SlotOutcome + Send + 'static,
    {
        let tx = self.outcome_tx.clone();
        let retry = self.settings.retry;
        self.in_flight += 1;

        tracing::debug!(slot = %key, in_flight = self.in_flight, "Generation started");
        self.notify(StudioEvent::SlotStarted { slot: key });

        tokio::spawn(async move {
            // 生成服务 panic 时同样送回失败结果
            let result = match tokio::spawn(async move { retry.run(operation).await }).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(slot = %key, error = %e, "Generation task aborted");
                    Err(GenerationError::failed(format!("Generation task aborted: {}", e)))
                }
            };
            if tx.send(wrap(result)).await.is_err() {
                tracing::debug!(slot = %key, "Draft was reset, dropping stale result");
            }
        });
    }

    // ------------------------------------------------------------------
    // Title candidates
    // ------------------------------------------------------------------

    /// 获取一批书名候选并进入选择模式
    ///
    /// 未配置书名生成或已有批次在进行中时返回 false
    pub fn fetch_title_batch(&mut self, scene: Option<String>) -> bool {
        let Some(generator) = self.collaborators.title_generator.clone() else {
            return false;
        };
        if !self.slots.try_start(SlotKey::TitleBatch) {
            return false;
        }
        self.title_picker.open();

        let brief = self.draft.brief();
        let request = TitleRequest {
            level: brief.level(),
            genre: brief.genre().to_string(),
            word_count: brief.word_count(),
            pages: self.draft.pages().get(),
            scene: scene.filter(|s| !s.trim().is_empty()),
        };

        self.spawn_slot(
            SlotKey::TitleBatch,
            move || {
                let generator = generator.clone();
                let request = request.clone();
                async move { generator.generate_titles(&request).await }
            },
            SlotOutcome::TitleBatch,
        );
        true
    }

    pub fn select_title(&mut self, index: usize) -> bool {
        self.title_picker.select(index)
    }

    /// 确认选中的书名，写入元数据并退出选择模式
    ///
    /// 没有选中项或批次仍在进行中时返回 false
    pub fn confirm_title(&mut self) -> bool {
        if self.slots.is_running(SlotKey::TitleBatch) {
            return false;
        }
        let Some(title) = self.title_picker.take_selection() else {
            return false;
        };
        tracing::info!(title = %title, "Title confirmed");
        self.set_title(title);
        true
    }

    /// 放弃候选，不修改元数据
    pub fn dismiss_title_picker(&mut self) {
        self.title_picker.close();
    }

    // ------------------------------------------------------------------
    // Outline / Chapters
    // ------------------------------------------------------------------

    /// 生成大纲，完成后整体替换章节列表
    pub fn generate_outline(&mut self) -> bool {
        if !self.slots.try_start(SlotKey::Outline) {
            return false;
        }
        let writer = self.collaborators.story_writer.clone();
        let brief = self.draft.brief().clone();

        self.spawn_slot(
            SlotKey::Outline,
            move || {
                let writer = writer.clone();
                let brief = brief.clone();
                async move { writer.generate_outline(&brief).await }
            },
            SlotOutcome::Outline,
        );
        true
    }

    /// 生成第 `index` 章正文
    ///
    /// 章节已在生成中时返回 `Ok(false)`，索引无效时返回错误
    pub fn generate_chapter(&mut self, index: usize) -> Result<bool, StudioError> {
        let Some((id, title)) = self.draft.begin_chapter(index)? else {
            return Ok(false);
        };
        let key = SlotKey::Chapter(id);
        self.slots.try_start(key);

        let writer = self.collaborators.story_writer.clone();
        let brief = self.draft.brief().clone();

        self.spawn_slot(
            key,
            move || {
                let writer = writer.clone();
                let brief = brief.clone();
                let title = title.clone();
                async move { writer.generate_chapter(&title, &brief).await }
            },
            move |result| SlotOutcome::Chapter { id, result },
        );
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Cover / Metadata
    // ------------------------------------------------------------------

    /// 按当前提示词生成封面
    pub fn generate_cover(&mut self) -> bool {
        let Some(generator) = self.collaborators.cover_generator.clone() else {
            return false;
        };
        let prompt = self.draft.cover().prompt.trim().to_string();
        if prompt.is_empty() || !self.slots.try_start(SlotKey::Cover) {
            return false;
        }

        self.spawn_slot(
            SlotKey::Cover,
            move || {
                let generator = generator.clone();
                let prompt = prompt.clone();
                async move { generator.generate_cover(&prompt).await }
            },
            SlotOutcome::Cover,
        );
        true
    }

    pub fn generate_slug(&mut self) -> bool {
        let Some(generator) = self.collaborators.slug_generator.clone() else {
            return false;
        };
        let title = self.draft.metadata().title.clone();
        if title.trim().is_empty() || !self.slots.try_start(SlotKey::Slug) {
            return false;
        }

        self.spawn_slot(
            SlotKey::Slug,
            move || {
                let generator = generator.clone();
                let title = title.clone();
                async move { generator.generate_slug(&title).await }
            },
            SlotOutcome::Slug,
        );
        true
    }

    /// 生成 SEO 描述，上下文取第一章开头
    pub fn generate_meta(&mut self) -> bool {
        let Some(generator) = self.collaborators.meta_generator.clone() else {
            return false;
        };
        let title = self.draft.metadata().title.clone();
        if title.trim().is_empty() || !self.slots.try_start(SlotKey::Meta) {
            return false;
        }
        let context = self.meta_context();

        self.spawn_slot(
            SlotKey::Meta,
            move || {
                let generator = generator.clone();
                let title = title.clone();
                let context = context.clone();
                async move { generator.generate_meta(&title, &context).await }
            },
            SlotOutcome::Meta,
        );
        true
    }

    /// 第一章开头片段；第一章为空时退回体裁描述
    pub fn meta_context(&self) -> String {
        let opening: String = self
            .draft
            .get_chapter(0)
            .map(|c| c.content().chars().take(META_CONTEXT_CHARS).collect())
            .unwrap_or_default();
        if opening.trim().is_empty() {
            format!("A {} story.", self.draft.brief().genre())
        } else {
            opening
        }
    }

    // ------------------------------------------------------------------
    // Outcome application
    // ------------------------------------------------------------------

    /// 把一个任务结果写入书稿
    ///
    /// 失败时书稿保持不变，任务标记为 failed 并通知用户
    pub(super) fn apply_outcome(&mut self, outcome: SlotOutcome) -> SlotReport {
        self.in_flight = self.in_flight.saturating_sub(1);
        let slot = outcome.key();

        let applied = match outcome {
            SlotOutcome::TitleBatch(result) => self.apply_title_batch(result),
            SlotOutcome::Outline(result) => self.apply_outline(result),
            SlotOutcome::Chapter { id, result } => match result {
                Ok(content) => Ok(match self.draft.set_chapter_result(id, content) {
                    Some(_) => Applied::Written,
                    None => Applied::Dropped,
                }),
                Err(e) => match self.draft.revert_chapter(id) {
                    Some(_) => Err(e),
                    None => Ok(Applied::Dropped),
                },
            },
            SlotOutcome::Cover(result) => result.and_then(|url| {
                let url = url.trim();
                if url.is_empty() {
                    return Err(GenerationError::malformed("Empty cover url"));
                }
                self.draft.set_cover_url(url);
                Ok(Applied::Written)
            }),
            SlotOutcome::Slug(result) => result.and_then(|raw| {
                let slug = normalize_slug(&raw);
                if slug.is_empty() {
                    return Err(GenerationError::malformed("Empty slug"));
                }
                self.draft.set_slug(slug);
                Ok(Applied::Written)
            }),
            SlotOutcome::Meta(result) => result.map(|description| {
                self.draft.set_description(description.trim());
                Applied::Written
            }),
        };

        let state = match applied {
            Ok(Applied::Written) => {
                self.slots.succeed(slot);
                tracing::debug!(slot = %slot, in_flight = self.in_flight, "Generation applied");
                self.notify(StudioEvent::SlotSucceeded { slot });
                SlotState::Succeeded
            }
            Ok(Applied::Dropped) => {
                self.slots.forget(slot);
                tracing::debug!(slot = %slot, "Generation result no longer has a target, dropped");
                SlotState::Idle
            }
            Err(e) => {
                self.slots.fail(slot);
                tracing::warn!(slot = %slot, error = %e, "Generation failed");
                self.notify(StudioEvent::SlotFailed {
                    slot,
                    kind: e.kind(),
                    message: e.to_string(),
                });
                SlotState::Failed
            }
        };

        SlotReport { slot, state }
    }

    fn apply_title_batch(
        &mut self,
        result: Result<String, GenerationError>,
    ) -> Result<Applied, GenerationError> {
        let parsed =
            result.and_then(|raw| parse_title_batch(&raw).map_err(GenerationError::malformed));
        match parsed {
            Ok(candidates) => {
                if !self.title_picker.fill(candidates.clone()) {
                    return Ok(Applied::Dropped);
                }
                self.notify(StudioEvent::TitleCandidatesReady { candidates });
                Ok(Applied::Written)
            }
            Err(e) => {
                self.title_picker.close();
                Err(e)
            }
        }
    }

    /// 逐条清洗后截取前 6 条，清洗为空的条目保留原位
    fn apply_outline(
        &mut self,
        result: Result<Vec<String>, GenerationError>,
    ) -> Result<Applied, GenerationError> {
        let titles: Vec<String> = result?
            .iter()
            .map(|raw| clean_chapter_title(raw))
            .take(MAX_CHAPTERS)
            .collect();
        if titles.iter().all(|title| title.is_empty()) {
            return Err(GenerationError::malformed("No outline generated"));
        }

        tracing::info!(chapters = titles.len(), "Outline applied, chapters rebuilt");
        self.draft.apply_outline(titles);
        self.slots.forget_chapters();
        Ok(Applied::Written)
    }
}
