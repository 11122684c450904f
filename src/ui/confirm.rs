//! Yes/no gate in front of destructive actions.
//!
//! Holds at most one pending delete; opening while something is already
//! pending overwrites it (no queueing). The action is handed out exactly
//! once via `take`, so a delete request can only follow a confirmation.

use crate::ui::tabs::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDelete {
    pub section: Section,
    pub record_id: i64,
}

#[derive(Debug, Default)]
pub struct ConfirmGate {
    pending: Option<PendingDelete>,
}

impl ConfirmGate {
    pub fn open(&mut self, action: PendingDelete) {
        self.pending = Some(action);
    }

    pub fn take(&mut self) -> Option<PendingDelete> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingDelete> {
        self.pending.as_ref()
    }
}
