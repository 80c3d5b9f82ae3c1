use crate::device::HeadphoneState;
use crate::modal::{CloseReason, ModalVisibility};
use crate::state::PanelState;
use eframe::egui;
use log::debug;

/// Scale applied to a control while the pointer is held down on it.
pub const PRESSED_SCALE: f32 = 0.98;

// Anything on screen that can receive a click
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    UsbButton,
    HeadphoneButton,
    Option(HeadphoneState),
    CloseControl,
    Backdrop, // Overlay area outside the dialog content
}

// Keys the router cares about
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyInput {
    Char(char),
    Escape,
}

impl KeyInput {
    /// Maps an egui key to router input. Letters and digits become `Char`,
    /// Escape is kept, everything else is ignored.
    pub fn from_egui(key: egui::Key) -> Option<Self> {
        if key == egui::Key::Escape {
            return Some(KeyInput::Escape);
        }
        let mut chars = key.name().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => Some(KeyInput::Char(c)),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Input {
    Click(Target),
    Key(KeyInput),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleUsb,
    OpenModal,
    CloseModal(CloseReason),
    SelectHeadphone(HeadphoneState),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Trigger {
    Click(Target),
    Key(char), // Lowercase; matched case-insensitively
    Escape,
}

impl Trigger {
    fn matches(&self, input: &Input) -> bool {
        match (self, input) {
            (Trigger::Click(target), Input::Click(clicked)) => target == clicked,
            (Trigger::Key(key), Input::Key(KeyInput::Char(c))) => c.to_ascii_lowercase() == *key,
            (Trigger::Escape, Input::Key(KeyInput::Escape)) => true,
            _ => false,
        }
    }
}

// One row of the routing table
#[derive(Debug, Copy, Clone)]
pub struct Binding {
    trigger: Trigger,
    // `None` means the binding is live whether or not the dialog is open
    when: Option<ModalVisibility>,
    action: Action,
    // Consumed keys are not passed on to other widgets
    consume: bool,
}

const fn click(target: Target, when: Option<ModalVisibility>, action: Action) -> Binding {
    Binding { trigger: Trigger::Click(target), when, action, consume: false }
}

// Option entries only exist on screen while the dialog is open
const fn option_click(option: HeadphoneState) -> Binding {
    click(Target::Option(option), Some(ModalVisibility::Open), Action::SelectHeadphone(option))
}

const fn shortcut(key: char, when: ModalVisibility, action: Action) -> Binding {
    Binding { trigger: Trigger::Key(key), when: Some(when), action, consume: true }
}

const CLOSED: ModalVisibility = ModalVisibility::Closed;
const OPEN: ModalVisibility = ModalVisibility::Open;

pub const DEFAULT_BINDINGS: &[Binding] = &[
    // Pointer
    click(Target::UsbButton, None, Action::ToggleUsb),
    click(Target::HeadphoneButton, None, Action::OpenModal),
    option_click(HeadphoneState::ThreePin),
    option_click(HeadphoneState::FourPin),
    option_click(HeadphoneState::Disconnected),
    click(Target::CloseControl, Some(OPEN), Action::CloseModal(CloseReason::CloseControl)),
    click(Target::Backdrop, Some(OPEN), Action::CloseModal(CloseReason::Backdrop)),
    // Keyboard, dialog closed
    shortcut('u', CLOSED, Action::ToggleUsb),
    shortcut('h', CLOSED, Action::OpenModal),
    // Keyboard, dialog open. Fixed mapping, not tied to the listing order.
    shortcut('1', OPEN, Action::SelectHeadphone(HeadphoneState::ThreePin)),
    shortcut('2', OPEN, Action::SelectHeadphone(HeadphoneState::FourPin)),
    shortcut('3', OPEN, Action::SelectHeadphone(HeadphoneState::Disconnected)),
    Binding {
        trigger: Trigger::Escape,
        when: Some(OPEN),
        action: Action::CloseModal(CloseReason::Escape),
        consume: false,
    },
];

/// Outcome of routing one input.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Routed {
    pub action: Option<Action>,
    pub consumed: bool,
}

/// Maps raw input to panel actions using a table of bindings, each gated on
/// the dialog visibility at the time the input arrives.
#[derive(Debug, Clone)]
pub struct InputRouter {
    bindings: &'static [Binding],
}

impl Default for InputRouter {
    fn default() -> Self {
        Self { bindings: DEFAULT_BINDINGS }
    }
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the first binding matching `input` that is live under `modal`.
    pub fn route(&self, input: &Input, modal: ModalVisibility) -> Routed {
        self.bindings
            .iter()
            .find(|b| b.trigger.matches(input) && b.when.map_or(true, |when| when == modal))
            .map(|b| Routed { action: Some(b.action), consumed: b.consume })
            .unwrap_or_default()
    }

    /// Routes `input` against the panel's current dialog state and applies
    /// the resulting action.
    pub fn dispatch(&self, panel: &mut PanelState, input: Input) -> Routed {
        let routed = self.route(&input, panel.modal_visibility());
        match routed.action {
            Some(action) => {
                debug!("Input {:?} -> {:?}", input, action);
                apply(panel, action);
            }
            None => debug!("Input {:?} ignored.", input),
        }
        routed
    }

    /// Key that selects `option` while the dialog is open.
    pub fn shortcut_for(&self, option: HeadphoneState) -> Option<char> {
        self.bindings.iter().find_map(|b| match (b.trigger, b.action) {
            (Trigger::Key(key), Action::SelectHeadphone(selected)) if selected == option => {
                Some(key)
            }
            _ => None,
        })
    }
}

pub fn apply(panel: &mut PanelState, action: Action) {
    match action {
        Action::ToggleUsb => panel.toggle_usb(),
        Action::OpenModal => {
            panel.open_modal();
        }
        Action::CloseModal(reason) => {
            panel.close_modal(reason);
        }
        Action::SelectHeadphone(option) => panel.select_headphone_option(option),
    }
}

/// Press-down scaling for the control under the pointer.
///
/// Purely cosmetic: it never produces a click, and a control can show the
/// pressed look without being clicked if the pointer leaves before release.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PressFeedback {
    pressed: Option<Target>,
}

impl PressFeedback {
    pub fn press(&mut self, target: Target) {
        self.pressed = Some(target);
    }

    pub fn release(&mut self) {
        self.pressed = None;
    }

    pub fn leave(&mut self, target: Target) {
        if self.pressed == Some(target) {
            self.pressed = None;
        }
    }

    pub fn pressed(&self) -> Option<Target> {
        self.pressed
    }

    pub fn scale(&self, target: Target) -> f32 {
        if self.pressed == Some(target) {
            PRESSED_SCALE
        } else {
            1.0
        }
    }

    /// Feeds one frame of pointer state for `target`.
    pub fn update(&mut self, target: Target, pointer_down: bool, hovered: bool) {
        if pointer_down && hovered {
            self.press(target);
        } else if self.pressed == Some(target) {
            if !hovered {
                self.leave(target);
            } else {
                self.release();
            }
        }
    }
}
