//! Generation Slots - 生成任务状态
//!
//! - SlotBoard: 每个字段一个独立的任务状态机
//! - TitlePicker: 书名批量生成后的选择阶段

mod slot;
mod title_picker;

pub use slot::{SlotBoard, SlotKey, SlotState};
pub use title_picker::TitlePicker;
