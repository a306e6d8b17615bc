//! Title Candidate Picker - 两阶段书名选择
//!
//! 先批量获取候选，再由用户选中一个确认写入元数据

/// 书名候选选择器
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitlePicker {
    picking: bool,
    candidates: Vec<String>,
    selected: Option<usize>,
}

impl TitlePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_picking(&self) -> bool {
        self.picking
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.candidates.get(i))
            .map(String::as_str)
    }

    /// 开始获取新批次：进入选择模式，清空候选与选中项
    pub(crate) fn open(&mut self) {
        self.picking = true;
        self.candidates.clear();
        self.selected = None;
    }

    /// 写入新批次，整体替换旧候选
    ///
    /// 用户已离开选择模式时丢弃
    pub(crate) fn fill(&mut self, candidates: Vec<String>) -> bool {
        if !self.picking {
            return false;
        }
        self.candidates = candidates;
        self.selected = None;
        true
    }

    /// 选中候选，索引无效或不在选择模式时返回 false
    pub fn select(&mut self, index: usize) -> bool {
        if !self.picking || index >= self.candidates.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// 取出选中的书名并退出选择模式
    pub(crate) fn take_selection(&mut self) -> Option<String> {
        let title = self.selected_title()?.to_string();
        self.close();
        Some(title)
    }

    /// 退出选择模式，丢弃候选
    pub fn close(&mut self) {
        self.picking = false;
        self.candidates.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<String> {
        vec!["Herz unter dem Tisch".into(), "Stunde 23:59".into()]
    }

    #[test]
    fn test_pick_and_take() {
        let mut picker = TitlePicker::new();
        picker.open();
        assert!(picker.fill(batch()));
        assert!(picker.take_selection().is_none());

        assert!(picker.select(1));
        assert_eq!(picker.take_selection(), Some("Stunde 23:59".to_string()));
        assert!(!picker.is_picking());
        assert!(picker.candidates().is_empty());
    }

    #[test]
    fn test_select_out_of_range() {
        let mut picker = TitlePicker::new();
        assert!(!picker.select(0));
        picker.open();
        picker.fill(batch());
        assert!(!picker.select(2));
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn test_refill_clears_selection() {
        let mut picker = TitlePicker::new();
        picker.open();
        picker.fill(batch());
        picker.select(0);

        picker.open();
        assert_eq!(picker.selected(), None);
        assert!(picker.candidates().is_empty());
        picker.fill(vec!["Finger im Kaffee".into()]);
        assert_eq!(picker.candidates().len(), 1);
    }

    #[test]
    fn test_fill_after_close_is_dropped() {
        let mut picker = TitlePicker::new();
        picker.open();
        picker.close();
        assert!(!picker.fill(batch()));
        assert!(picker.candidates().is_empty());
    }
}
