//! 生成任务结果
//!
//! 后台任务只负责调用生成服务，结果通过通道交回工作室统一写入书稿

use serde::{Deserialize, Serialize};

use crate::application::ports::GenerationError;
use crate::application::slots::{SlotKey, SlotState};
use crate::domain::draft::ChapterId;

#[derive(Debug)]
pub(crate) enum SlotOutcome {
    TitleBatch(Result<String, GenerationError>),
    Outline(Result<Vec<String>, GenerationError>),
    Chapter {
        id: ChapterId,
        result: Result<String, GenerationError>,
    },
    Cover(Result<String, GenerationError>),
    Slug(Result<String, GenerationError>),
    Meta(Result<String, GenerationError>),
}

impl SlotOutcome {
    pub(crate) fn key(&self) -> SlotKey {
        match self {
            SlotOutcome::TitleBatch(_) => SlotKey::TitleBatch,
            SlotOutcome::Outline(_) => SlotKey::Outline,
            SlotOutcome::Chapter { id, .. } => SlotKey::Chapter(*id),
            SlotOutcome::Cover(_) => SlotKey::Cover,
            SlotOutcome::Slug(_) => SlotKey::Slug,
            SlotOutcome::Meta(_) => SlotKey::Meta,
        }
    }
}

/// 一次结果写入后的任务状态
///
/// 章节已被大纲重建替换时，结果被丢弃，状态报告为 Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotReport {
    pub slot: SlotKey,
    pub state: SlotState,
}
