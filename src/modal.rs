use crate::state::Change;
use log::debug;
use std::fmt;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum ModalVisibility {
    #[default]
    Closed,
    Open,
}

// Which dismissal path closed the dialog
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CloseReason {
    CloseControl,
    Backdrop,
    Escape,
    Selection,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CloseReason::CloseControl => write!(f, "close button"),
            CloseReason::Backdrop => write!(f, "click outside"),
            CloseReason::Escape => write!(f, "escape"),
            CloseReason::Selection => write!(f, "option selected"),
        }
    }
}

/// Open/closed state machine for the headphone selection dialog.
///
/// Both transitions are no-ops from the state they lead to and then return
/// `None`, so repeated calls never produce a second notification.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModalController {
    visibility: ModalVisibility,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> ModalVisibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == ModalVisibility::Open
    }

    /// Background content must not scroll while the dialog is up.
    pub fn background_scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn open(&mut self) -> Option<Change> {
        if self.is_open() {
            debug!("Headphone dialog already open.");
            return None;
        }
        self.visibility = ModalVisibility::Open;
        debug!("Headphone dialog opened.");
        Some(Change::ModalOpened)
    }

    pub fn close(&mut self, reason: CloseReason) -> Option<Change> {
        if !self.is_open() {
            return None;
        }
        self.visibility = ModalVisibility::Closed;
        debug!("Headphone dialog closed ({}).", reason);
        Some(Change::ModalClosed(reason))
    }
}
