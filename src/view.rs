//! Pure projection of the panel state into what each surface displays.

use crate::device::{HeadphoneState, UsbState};
use crate::input::InputRouter;
use crate::state::PanelState;

pub const MODAL_TITLE: &str = "Select Headphone Type";

// Styling class of the USB button; exactly one applies at a time
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UsbClass {
    On,
    Off,
}

impl UsbClass {
    pub fn name(self) -> &'static str {
        match self {
            UsbClass::On => "on",
            UsbClass::Off => "off",
        }
    }
}

impl From<UsbState> for UsbClass {
    fn from(usb: UsbState) -> Self {
        match usb {
            UsbState::On => UsbClass::On,
            UsbState::Off => UsbClass::Off,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbButtonView {
    pub label: &'static str,
    pub class: UsbClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadphoneButtonView {
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPanelView {
    pub usb: &'static str,
    pub headphone: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub option: HeadphoneState,
    pub label: &'static str,
    pub shortcut: Option<char>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: &'static str,
    pub options: Vec<OptionView>,
}

/// Everything the presentation layer draws for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub usb_button: UsbButtonView,
    pub headphone_button: HeadphoneButtonView,
    pub status: StatusPanelView,
    pub modal: Option<ModalView>,
    pub scroll_locked: bool,
    pub message: Option<String>,
}

/// Builds the whole view in one pass, so the buttons and the status panel
/// always agree.
pub fn render(panel: &PanelState, router: &InputRouter) -> PanelView {
    let usb = panel.usb();
    let headphone = panel.headphone();

    let modal = panel.is_modal_open().then(|| ModalView {
        title: MODAL_TITLE,
        options: HeadphoneState::OPTIONS
            .into_iter()
            .map(|option| OptionView {
                option,
                label: option.label(),
                shortcut: router.shortcut_for(option),
                selected: option == headphone,
            })
            .collect(),
    });

    PanelView {
        usb_button: UsbButtonView {
            label: usb.label(),
            class: usb.into(),
        },
        headphone_button: HeadphoneButtonView {
            label: headphone.label(),
        },
        status: StatusPanelView {
            usb: usb.label(),
            headphone: headphone.label(),
        },
        modal,
        scroll_locked: panel.background_scroll_locked(),
        message: panel.status_message().map(str::to_string),
    }
}
