// src/view_models.rs

use crate::model::Verdict;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionInfo {
    pub idx: usize, // 0-based index into catalog.sections
    pub title: String,
    pub solved: usize,
    pub total: usize,
    pub active: bool,
}

impl SectionInfo {
    pub fn label(&self) -> String {
        if self.total == 0 {
            self.title.clone()
        } else if self.solved == self.total {
            format!("{} ✅", self.title)
        } else {
            format!("{} ({}/{})", self.title, self.solved, self.total)
        }
    }
}

/// What the output panel of one exercise renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputView {
    Empty,
    Running,
    Output(String),
    Error(String),
}

impl OutputView {
    pub fn text(&self) -> String {
        match self {
            OutputView::Empty => String::new(),
            OutputView::Running => "⏳ Kod çalıştırılıyor...".to_string(),
            OutputView::Output(out) if out.is_empty() => "✅ Çıktı:\nÇıktı yok".to_string(),
            OutputView::Output(out) => format!("✅ Çıktı:\n{out}"),
            OutputView::Error(err) => format!("❌ Hata:\n{err}"),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, OutputView::Error(_))
    }
}

pub fn verdict_badge(verdict: Verdict) -> Option<&'static str> {
    match verdict {
        Verdict::Correct => Some("✓ Doğru!"),
        Verdict::Incorrect => Some("✗ Tekrar dene"),
        Verdict::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_label_shows_progress() {
        let mut info = SectionInfo {
            idx: 1,
            title: "Map".into(),
            solved: 1,
            total: 3,
            active: false,
        };
        assert_eq!(info.label(), "Map (1/3)");
        info.solved = 3;
        assert_eq!(info.label(), "Map ✅");
        info.total = 0;
        assert_eq!(info.label(), "Map");
    }

    #[test]
    fn output_texts() {
        assert_eq!(OutputView::Running.text(), "⏳ Kod çalıştırılıyor...");
        assert_eq!(OutputView::Output(String::new()).text(), "✅ Çıktı:\nÇıktı yok");
        assert_eq!(OutputView::Output("10".into()).text(), "✅ Çıktı:\n10");
        assert_eq!(OutputView::Error("boom".into()).text(), "❌ Hata:\nboom");
        assert!(OutputView::Empty.text().is_empty());
    }

    #[test]
    fn badge_only_for_decided_verdicts() {
        assert_eq!(verdict_badge(Verdict::Correct), Some("✓ Doğru!"));
        assert_eq!(verdict_badge(Verdict::Incorrect), Some("✗ Tekrar dene"));
        assert_eq!(verdict_badge(Verdict::Unknown), None);
    }
}
