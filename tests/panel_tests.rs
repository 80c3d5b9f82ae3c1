use device_panel::device::{HeadphoneState, UsbState};
use device_panel::input::{
    Action, Input, InputRouter, KeyInput, PressFeedback, Routed, Target, PRESSED_SCALE,
};
use device_panel::modal::{CloseReason, ModalVisibility};
use device_panel::state::{Change, PanelState};
use device_panel::view::{render, PanelView, UsbClass};
use eframe::egui;

fn click(panel: &mut PanelState, target: Target) -> Routed {
    InputRouter::new().dispatch(panel, Input::Click(target))
}

fn key(panel: &mut PanelState, c: char) -> Routed {
    InputRouter::new().dispatch(panel, Input::Key(KeyInput::Char(c)))
}

fn escape(panel: &mut PanelState) -> Routed {
    InputRouter::new().dispatch(panel, Input::Key(KeyInput::Escape))
}

fn view(panel: &PanelState) -> PanelView {
    render(panel, &InputRouter::new())
}

// Buttons and status panel must agree at every observable point
fn assert_consistent(view: &PanelView) {
    assert_eq!(view.usb_button.label, view.status.usb);
    assert_eq!(view.headphone_button.label, view.status.headphone);
    let expected_class = if view.usb_button.label == "ON" { UsbClass::On } else { UsbClass::Off };
    assert_eq!(view.usb_button.class, expected_class);
}

#[test]
fn test_initial_view() {
    let panel = PanelState::new();
    let view = view(&panel);

    assert_eq!(view.usb_button.label, "OFF");
    assert_eq!(view.usb_button.class, UsbClass::Off);
    assert_eq!(view.headphone_button.label, "Disconnected");
    assert_eq!(view.status.usb, "OFF");
    assert_eq!(view.status.headphone, "Disconnected");
    assert_eq!(view.modal, None);
    assert!(!view.scroll_locked);
    assert_eq!(view.message, None);
}

#[test]
fn test_click_usb_once() {
    let mut panel = PanelState::new();
    click(&mut panel, Target::UsbButton);

    let view = view(&panel);
    assert_eq!(view.usb_button.label, "ON");
    assert_eq!(view.usb_button.class, UsbClass::On);
    assert_eq!(view.status.usb, "ON");
    assert_eq!(panel.take_changes(), vec![Change::UsbChanged(UsbState::On)]);
}

#[test]
fn test_toggle_parity() {
    let mut panel = PanelState::new();
    for n in 1..=7 {
        panel.toggle_usb();
        assert_eq!(panel.usb() == UsbState::On, n % 2 == 1);
        assert_consistent(&view(&panel));
    }
}

#[test]
fn test_select_four_pin_closes_modal() {
    let mut panel = PanelState::new();
    click(&mut panel, Target::HeadphoneButton);
    assert!(view(&panel).modal.is_some());
    panel.take_changes();

    click(&mut panel, Target::Option(HeadphoneState::FourPin));

    let view = view(&panel);
    assert_eq!(view.modal, None);
    assert_eq!(view.headphone_button.label, "4 Pin");
    assert_eq!(view.status.headphone, "4 Pin");
    assert_eq!(
        panel.take_changes(),
        vec![
            Change::HeadphoneChanged(HeadphoneState::FourPin),
            Change::ModalClosed(CloseReason::Selection),
        ]
    );
}

#[test]
fn test_select_always_leaves_modal_closed() {
    for option in HeadphoneState::OPTIONS {
        for start_open in [false, true] {
            let mut panel = PanelState::new();
            if start_open {
                panel.open_modal();
            }
            panel.select_headphone_option(option);
            assert_eq!(panel.headphone(), option);
            assert_eq!(panel.modal_visibility(), ModalVisibility::Closed);
        }
    }
}

#[test]
fn test_select_from_closed_emits_no_close() {
    let mut panel = PanelState::new();
    panel.select_headphone_option(HeadphoneState::ThreePin);
    assert_eq!(
        panel.take_changes(),
        vec![Change::HeadphoneChanged(HeadphoneState::ThreePin)]
    );
}

#[test]
fn test_open_is_idempotent() {
    let mut panel = PanelState::new();
    assert!(panel.open_modal());
    assert!(!panel.open_modal());
    assert_eq!(panel.modal_visibility(), ModalVisibility::Open);
    assert_eq!(panel.take_changes(), vec![Change::ModalOpened]);

    // A single close is enough
    assert!(panel.close_modal(CloseReason::CloseControl));
    assert_eq!(panel.modal_visibility(), ModalVisibility::Closed);
}

#[test]
fn test_close_when_closed_is_silent() {
    let mut panel = PanelState::new();
    assert!(!panel.close_modal(CloseReason::CloseControl));
    assert!(!panel.has_pending_changes());

    // Routed close inputs are not even bound while closed
    assert_eq!(click(&mut panel, Target::Backdrop).action, None);
    assert_eq!(escape(&mut panel).action, None);
    assert!(!panel.has_pending_changes());
}

#[test]
fn test_escape_keeps_headphone_state() {
    let mut panel = PanelState::new();
    panel.select_headphone_option(HeadphoneState::ThreePin);
    click(&mut panel, Target::HeadphoneButton);
    panel.take_changes();

    let routed = escape(&mut panel);
    assert_eq!(routed.action, Some(Action::CloseModal(CloseReason::Escape)));
    assert!(!routed.consumed);
    assert!(!panel.is_modal_open());
    assert_eq!(panel.headphone(), HeadphoneState::ThreePin);
    assert_eq!(panel.take_changes(), vec![Change::ModalClosed(CloseReason::Escape)]);
}

#[test]
fn test_backdrop_click_closes_without_mutation() {
    let mut panel = PanelState::new();
    click(&mut panel, Target::HeadphoneButton);
    panel.take_changes();

    click(&mut panel, Target::Backdrop);
    assert!(!panel.is_modal_open());
    assert_eq!(panel.usb(), UsbState::Off);
    assert_eq!(panel.headphone(), HeadphoneState::Disconnected);
    assert_eq!(panel.take_changes(), vec![Change::ModalClosed(CloseReason::Backdrop)]);
}

#[test]
fn test_close_control() {
    let mut panel = PanelState::new();
    click(&mut panel, Target::HeadphoneButton);
    click(&mut panel, Target::CloseControl);
    assert!(!panel.is_modal_open());
    assert_eq!(panel.headphone(), HeadphoneState::Disconnected);
}

#[test]
fn test_usb_shortcut_only_when_closed() {
    let mut panel = PanelState::new();

    let routed = key(&mut panel, 'u');
    assert_eq!(routed, Routed { action: Some(Action::ToggleUsb), consumed: true });
    assert_eq!(panel.usb(), UsbState::On);

    panel.open_modal();
    let routed = key(&mut panel, 'u');
    assert_eq!(routed, Routed::default());
    assert_eq!(panel.usb(), UsbState::On);
}

#[test]
fn test_letter_shortcuts_case_insensitive() {
    let mut panel = PanelState::new();
    key(&mut panel, 'U');
    assert_eq!(panel.usb(), UsbState::On);

    key(&mut panel, 'H');
    assert!(panel.is_modal_open());
}

#[test]
fn test_headphone_shortcut_only_when_closed() {
    let mut panel = PanelState::new();
    assert!(key(&mut panel, 'h').consumed);
    assert!(panel.is_modal_open());
    panel.take_changes();

    // Already open: no binding, nothing happens
    assert_eq!(key(&mut panel, 'h'), Routed::default());
    assert!(!panel.has_pending_changes());
}

#[test]
fn test_number_shortcuts_when_open() {
    let cases = [
        ('1', HeadphoneState::ThreePin),
        ('2', HeadphoneState::FourPin),
        ('3', HeadphoneState::Disconnected),
    ];
    for (c, expected) in cases {
        let mut panel = PanelState::new();
        panel.select_headphone_option(HeadphoneState::FourPin);
        panel.open_modal();

        let routed = key(&mut panel, c);
        assert!(routed.consumed);
        assert_eq!(panel.headphone(), expected);
        assert!(!panel.is_modal_open());
    }
}

#[test]
fn test_number_shortcuts_ignored_when_closed() {
    let mut panel = PanelState::new();
    for c in ['1', '2', '3'] {
        assert_eq!(key(&mut panel, c), Routed::default());
    }
    assert_eq!(panel.headphone(), HeadphoneState::Disconnected);
    assert!(!panel.has_pending_changes());
}

#[test]
fn test_option_click_ignored_when_closed() {
    let mut panel = PanelState::new();
    assert_eq!(click(&mut panel, Target::Option(HeadphoneState::FourPin)).action, None);
    assert_eq!(panel.headphone(), HeadphoneState::Disconnected);
}

#[test]
fn test_usb_click_works_while_open() {
    let mut panel = PanelState::new();
    panel.open_modal();
    click(&mut panel, Target::UsbButton);
    assert_eq!(panel.usb(), UsbState::On);
    assert!(panel.is_modal_open());
}

#[test]
fn test_modal_view_lists_options() {
    let mut panel = PanelState::new();
    panel.select_headphone_option(HeadphoneState::FourPin);
    panel.open_modal();

    let view = view(&panel);
    assert!(view.scroll_locked);
    let modal = view.modal.expect("modal should be rendered while open");
    let labels: Vec<_> = modal.options.iter().map(|o| o.label).collect();
    assert_eq!(labels, vec!["3 Pin", "4 Pin", "Disconnected"]);
    let shortcuts: Vec<_> = modal.options.iter().map(|o| o.shortcut).collect();
    assert_eq!(shortcuts, vec![Some('1'), Some('2'), Some('3')]);
    let selected: Vec<_> = modal.options.iter().filter(|o| o.selected).map(|o| o.option).collect();
    assert_eq!(selected, vec![HeadphoneState::FourPin]);
}

#[test]
fn test_render_does_not_mutate() {
    let mut panel = PanelState::new();
    panel.toggle_usb();
    panel.take_changes();

    let first = view(&panel);
    let second = view(&panel);
    assert_eq!(first, second);
    assert!(!panel.has_pending_changes());
}

#[test]
fn test_status_message_in_view() {
    let mut panel = PanelState::new();
    panel.set_status_message("Failed to save state: disk full");
    assert_eq!(view(&panel).message.as_deref(), Some("Failed to save state: disk full"));

    panel.clear_status_message();
    assert_eq!(view(&panel).message, None);
}

#[test]
fn test_key_input_from_egui() {
    assert_eq!(KeyInput::from_egui(egui::Key::U), Some(KeyInput::Char('U')));
    assert_eq!(KeyInput::from_egui(egui::Key::Num1), Some(KeyInput::Char('1')));
    assert_eq!(KeyInput::from_egui(egui::Key::Escape), Some(KeyInput::Escape));
    assert_eq!(KeyInput::from_egui(egui::Key::Enter), None);
}

#[test]
fn test_press_feedback() {
    let mut feedback = PressFeedback::default();
    assert_eq!(feedback.scale(Target::UsbButton), 1.0);

    feedback.update(Target::UsbButton, true, true);
    assert_eq!(feedback.pressed(), Some(Target::UsbButton));
    assert_eq!(feedback.scale(Target::UsbButton), PRESSED_SCALE);
    assert_eq!(feedback.scale(Target::HeadphoneButton), 1.0);

    // Released over the control
    feedback.update(Target::UsbButton, false, true);
    assert_eq!(feedback.pressed(), None);

    // Pointer leaves while still held
    feedback.update(Target::HeadphoneButton, true, true);
    feedback.update(Target::HeadphoneButton, true, false);
    assert_eq!(feedback.scale(Target::HeadphoneButton), 1.0);

    // Leaving a different control does not reset the pressed one
    feedback.press(Target::UsbButton);
    feedback.leave(Target::HeadphoneButton);
    assert_eq!(feedback.pressed(), Some(Target::UsbButton));
}

#[test]
fn test_press_feedback_never_mutates_panel() {
    let mut panel = PanelState::new();
    let mut feedback = PressFeedback::default();
    feedback.update(Target::UsbButton, true, true);
    feedback.update(Target::UsbButton, true, false);

    assert_eq!(panel.usb(), UsbState::Off);
    assert!(panel.take_changes().is_empty());
}
