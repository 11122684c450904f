//! Transient notice banner: one message at a time, visible for three
//! seconds from the most recent post. A new post replaces whatever is
//! showing and restarts the window (last call wins).

use std::time::{Duration, Instant};

use serde::Serialize;

const DISPLAY_WINDOW: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
    #[serde(skip)]
    posted: Instant,
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn post(&mut self, message: impl Into<String>, is_error: bool) {
        self.current = Some(Notice {
            message: message.into(),
            is_error,
            posted: Instant::now(),
        });
    }

    /// The notice still inside its display window at `now`, if any.
    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|n| now.duration_since(n.posted) < DISPLAY_WINDOW)
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_window() {
        let mut board = NoticeBoard::default();
        board.post("saved", false);
        let posted = Instant::now();
        assert!(board.current_at(posted).is_some());
        assert!(board.current_at(posted + Duration::from_secs(4)).is_none());
    }

    #[test]
    fn newer_post_replaces_and_restarts() {
        let mut board = NoticeBoard::default();
        board.post("first", false);
        board.post("second", true);
        let n = board.current().expect("visible");
        assert_eq!(n.message, "second");
        assert!(n.is_error);
    }
}
