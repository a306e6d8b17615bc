//! 创作阶段
//!
//! 五个有序阶段: Brief -> Outline -> Chapters -> Cover -> Publish

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Brief,
    Outline,
    Chapters,
    Cover,
    Publish,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Brief,
        Stage::Outline,
        Stage::Chapters,
        Stage::Cover,
        Stage::Publish,
    ];

    /// 阶段编号（1..=5）
    pub fn number(&self) -> u8 {
        match self {
            Stage::Brief => 1,
            Stage::Outline => 2,
            Stage::Chapters => 3,
            Stage::Cover => 4,
            Stage::Publish => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Brief => "Brief",
            Stage::Outline => "Outline",
            Stage::Chapters => "Chapters",
            Stage::Cover => "Cover",
            Stage::Publish => "Publish",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::default(), Stage::Brief);
        assert_eq!(Stage::Brief.next(), Some(Stage::Outline));
        assert_eq!(Stage::Publish.next(), None);
        assert_eq!(Stage::Brief.previous(), None);
        assert_eq!(Stage::Cover.previous(), Some(Stage::Chapters));
    }

    #[test]
    fn test_stage_numbers() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(usize::from(stage.number()), i + 1);
            assert_eq!(Stage::from_number(stage.number()), Some(*stage));
        }
        assert_eq!(Stage::from_number(0), None);
        assert_eq!(Stage::from_number(6), None);
    }
}
