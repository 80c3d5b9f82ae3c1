use crate::device::{DeviceStateStore, HeadphoneState, UsbState};
use crate::modal::{CloseReason, ModalController, ModalVisibility};

// Represents the current high-level state of the application UI
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum State {
    Initialising, // App is starting, loading settings and saved device state
    Running,      // Main operational state, showing the device panel
    About,        // Showing the about screen
}

// Notification emitted by every effective mutation of the panel
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Change {
    UsbChanged(UsbState),
    HeadphoneChanged(HeadphoneState),
    ModalOpened,
    ModalClosed(CloseReason),
}

impl Change {
    /// True for changes to the device states themselves, which are the only
    /// ones worth persisting.
    pub fn is_device_change(&self) -> bool {
        matches!(self, Change::UsbChanged(_) | Change::HeadphoneChanged(_))
    }
}

/// Owns the device states and the dialog visibility.
///
/// Fields are private: the operations below are the only way to mutate
/// anything, and each queues the notifications it produced until the owner
/// drains them with [`PanelState::take_changes`].
#[derive(Debug, Default)]
pub struct PanelState {
    devices: DeviceStateStore,
    modal: ModalController,
    changes: Vec<Change>,
    status_message: Option<String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn usb(&self) -> UsbState {
        self.devices.usb()
    }

    pub fn headphone(&self) -> HeadphoneState {
        self.devices.headphone()
    }

    pub fn modal_visibility(&self) -> ModalVisibility {
        self.modal.visibility()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn background_scroll_locked(&self) -> bool {
        self.modal.background_scroll_locked()
    }

    pub fn toggle_usb(&mut self) {
        let change = self.devices.toggle_usb();
        self.changes.push(change);
    }

    /// Records `option` and closes the dialog in one step. The option is
    /// stored before visibility flips and nothing can render in between.
    pub fn select_headphone_option(&mut self, option: HeadphoneState) {
        let change = self.devices.select_headphone(option);
        self.changes.push(change);
        self.changes.extend(self.modal.close(CloseReason::Selection));
    }

    /// Returns false when the dialog was already open.
    pub fn open_modal(&mut self) -> bool {
        let change = self.modal.open();
        self.push_transition(change)
    }

    /// Returns false when the dialog was already closed.
    pub fn close_modal(&mut self, reason: CloseReason) -> bool {
        let change = self.modal.close(reason);
        self.push_transition(change)
    }

    /// Replaces both device states with a loaded snapshot.
    pub fn restore(&mut self, usb: UsbState, headphone: HeadphoneState) {
        let changes = self.devices.restore(usb, headphone);
        self.changes.extend(changes);
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn take_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    fn push_transition(&mut self, change: Option<Change>) -> bool {
        match change {
            Some(change) => {
                self.changes.push(change);
                true
            }
            None => false,
        }
    }
}
