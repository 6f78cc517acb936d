//! UI components grouped by feature domain.
mod chapter_panel;
mod history_panel;
mod loop_panel;
mod naming_dialog;
mod player_panel;
mod side_panel;
mod status_bar;
mod title_bar;

pub use chapter_panel::ChapterPanel;
pub use history_panel::HistoryPanel;
pub use loop_panel::LoopPanel;
pub use naming_dialog::NamingDialog;
pub use player_panel::PlayerPanel;
pub use side_panel::SidePanel;
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
