//! Studio - 书稿生成编排
//!
//! - Stage Controller: 阶段推进与门槛、书稿编辑、发布
//! - Generation: 各字段生成任务的触发与结果写入

mod collaborators;
mod controller;
mod generation;
mod outcome;


pub use collaborators::Collaborators;
pub use controller::{Studio, StudioSettings};
pub use generation::META_CONTEXT_CHARS;
pub use outcome::SlotReport;
