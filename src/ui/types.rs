use serde::Deserialize;

use crate::api::Backend;
use crate::ui::confirm::ConfirmGate;
use crate::ui::notice::NoticeBoard;
use crate::ui::panels::grades::GradesPanel;
use crate::ui::panels::students::StudentsPanel;
use crate::ui::panels::subjects::SubjectsPanel;
use crate::ui::tabs::Section;

/// One UI event from the hosting shell, one JSON object per line.
#[derive(Debug, Deserialize, Clone)]
pub struct Event {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct UiState {
    pub backend: Box<dyn Backend>,
    /// For `health`; the backend trait deliberately does not expose it.
    pub api_base: String,
    pub active: Section,
    pub notice: NoticeBoard,
    pub confirm: ConfirmGate,
    pub students: StudentsPanel,
    pub subjects: SubjectsPanel,
    pub grades: GradesPanel,
}

impl UiState {
    pub fn new(backend: Box<dyn Backend>, api_base: String) -> Self {
        Self {
            backend,
            api_base,
            active: Section::Students,
            notice: NoticeBoard::default(),
            confirm: ConfirmGate::default(),
            students: StudentsPanel::default(),
            subjects: SubjectsPanel::default(),
            grades: GradesPanel::default(),
        }
    }
}
