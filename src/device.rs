use crate::state::Change;
use log::info;
use std::fmt;
use std::str::FromStr;

// USB port power, flipped by the USB control
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum UsbState {
    #[default]
    Off,
    On,
}

impl UsbState {
    pub fn is_on(self) -> bool {
        self == UsbState::On
    }

    pub fn toggled(self) -> Self {
        match self {
            UsbState::Off => UsbState::On,
            UsbState::On => UsbState::Off,
        }
    }

    /// Text shown on the USB button and in the status panel.
    pub fn label(self) -> &'static str {
        match self {
            UsbState::Off => "OFF",
            UsbState::On => "ON",
        }
    }
}

impl From<bool> for UsbState {
    fn from(on: bool) -> Self {
        if on {
            UsbState::On
        } else {
            UsbState::Off
        }
    }
}

impl fmt::Display for UsbState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Headphone jack wiring mode
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum HeadphoneState {
    #[default]
    Disconnected,
    ThreePin,
    FourPin,
}

impl HeadphoneState {
    /// Options in the order the selection dialog lists them.
    pub const OPTIONS: [HeadphoneState; 3] = [
        HeadphoneState::ThreePin,
        HeadphoneState::FourPin,
        HeadphoneState::Disconnected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HeadphoneState::Disconnected => "Disconnected",
            HeadphoneState::ThreePin => "3 Pin",
            HeadphoneState::FourPin => "4 Pin",
        }
    }
}

impl fmt::Display for HeadphoneState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid headphone configuration: {0:?}")]
pub struct ParseHeadphoneError(pub String);

// Labels must match exactly; the saved state file stores them verbatim.
impl FromStr for HeadphoneState {
    type Err = ParseHeadphoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeadphoneState::OPTIONS
            .into_iter()
            .find(|option| option.label() == s)
            .ok_or_else(|| ParseHeadphoneError(s.to_string()))
    }
}

/// The two tracked device states.
///
/// Every mutation returns the [`Change`] it produced so the owner can queue
/// it for whoever re-renders or persists the panel.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeviceStateStore {
    usb: UsbState,
    headphone: HeadphoneState,
}

impl DeviceStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn usb(&self) -> UsbState {
        self.usb
    }

    pub fn headphone(&self) -> HeadphoneState {
        self.headphone
    }

    pub fn toggle_usb(&mut self) -> Change {
        self.usb = self.usb.toggled();
        info!("USB toggled to: {}", self.usb);
        Change::UsbChanged(self.usb)
    }

    /// Records the selected option. Selecting the current value again still
    /// counts as a selection and is reported.
    pub fn select_headphone(&mut self, option: HeadphoneState) -> Change {
        self.headphone = option;
        info!("Headphone option selected: {}", option);
        Change::HeadphoneChanged(option)
    }

    // Applies a loaded snapshot, reporting only the fields that differ.
    pub(crate) fn restore(&mut self, usb: UsbState, headphone: HeadphoneState) -> Vec<Change> {
        let mut changes = Vec::new();
        if self.usb != usb {
            self.usb = usb;
            changes.push(Change::UsbChanged(usb));
        }
        if self.headphone != headphone {
            self.headphone = headphone;
            changes.push(Change::HeadphoneChanged(headphone));
        }
        changes
    }
}
