pub mod confirm;
pub mod error;
pub mod notice;
pub mod panels;
pub mod router;
pub mod tabs;
pub mod types;

pub use confirm::{ConfirmGate, PendingDelete};
pub use notice::NoticeBoard;
pub use router::handle_event;
pub use tabs::Section;
pub use types::{Event, UiState};
