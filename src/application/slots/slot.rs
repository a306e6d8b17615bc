//! Generation Slot - 单字段生成任务状态机
//!
//! idle -> running -> {succeeded, failed}，结束后可再次触发

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::draft::ChapterId;

/// 生成任务标识，每个任务只写自己的目标字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKey {
    TitleBatch,
    Outline,
    Chapter(ChapterId),
    Cover,
    Slug,
    Meta,
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotKey::TitleBatch => f.write_str("title_batch"),
            SlotKey::Outline => f.write_str("outline"),
            SlotKey::Chapter(id) => write!(f, "chapter:{}", id),
            SlotKey::Cover => f.write_str("cover"),
            SlotKey::Slug => f.write_str("slug"),
            SlotKey::Meta => f.write_str("meta"),
        }
    }
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl SlotState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotState::Idle => "idle",
            SlotState::Running => "running",
            SlotState::Succeeded => "succeeded",
            SlotState::Failed => "failed",
        }
    }

    pub fn is_running(&self) -> bool {
        *self == SlotState::Running
    }
}

/// 所有任务的状态表
#[derive(Debug, Default)]
pub struct SlotBoard {
    states: HashMap<SlotKey, SlotState>,
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: SlotKey) -> SlotState {
        self.states.get(&key).copied().unwrap_or_default()
    }

    pub fn is_running(&self, key: SlotKey) -> bool {
        self.state(key).is_running()
    }

    /// 进入 running；已在运行中时忽略并返回 false
    pub fn try_start(&mut self, key: SlotKey) -> bool {
        let state = self.states.entry(key).or_default();
        if state.is_running() {
            return false;
        }
        *state = SlotState::Running;
        true
    }

    pub fn succeed(&mut self, key: SlotKey) {
        self.states.insert(key, SlotState::Succeeded);
    }

    pub fn fail(&mut self, key: SlotKey) {
        self.states.insert(key, SlotState::Failed);
    }

    /// 移除任务记录（对应的章节已不存在）
    pub fn forget(&mut self, key: SlotKey) {
        self.states.remove(&key);
    }

    /// 大纲重建后旧章节的任务全部作废
    pub fn forget_chapters(&mut self) {
        self.states
            .retain(|key, _| !matches!(key, SlotKey::Chapter(_)));
    }

    pub fn running_count(&self) -> usize {
        self.states.values().filter(|s| s.is_running()).count()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_lifecycle_is_reenterable() {
        let mut board = SlotBoard::new();
        assert_eq!(board.state(SlotKey::Slug), SlotState::Idle);

        assert!(board.try_start(SlotKey::Slug));
        assert!(!board.try_start(SlotKey::Slug));
        board.fail(SlotKey::Slug);
        assert_eq!(board.state(SlotKey::Slug), SlotState::Failed);

        assert!(board.try_start(SlotKey::Slug));
        board.succeed(SlotKey::Slug);
        assert_eq!(board.state(SlotKey::Slug), SlotState::Succeeded);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut board = SlotBoard::new();
        let chapter = SlotKey::Chapter(ChapterId::new());
        assert!(board.try_start(chapter));
        assert!(board.try_start(SlotKey::Slug));
        assert_eq!(board.running_count(), 2);

        board.forget_chapters();
        assert_eq!(board.state(chapter), SlotState::Idle);
        assert!(board.is_running(SlotKey::Slug));
    }

    #[test]
    fn test_slot_key_display() {
        assert_eq!(SlotKey::TitleBatch.to_string(), "title_batch");
        assert!(SlotKey::Chapter(ChapterId::new()).to_string().starts_with("chapter:"));
    }
}
