/// Tabs in the side panel, cycled with `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Loops,
    Chapters,
    History,
}

impl ViewTab {
    pub const ALL: [ViewTab; 3] = [ViewTab::Loops, ViewTab::Chapters, ViewTab::History];

    pub fn next(self) -> Self {
        match self {
            ViewTab::Loops => ViewTab::Chapters,
            ViewTab::Chapters => ViewTab::History,
            ViewTab::History => ViewTab::Loops,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewTab::Loops => "Loops",
            ViewTab::Chapters => "Chapters",
            ViewTab::History => "History",
        }
    }
}
