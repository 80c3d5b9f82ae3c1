use crate::about;
use crate::input::{Input, KeyInput, PressFeedback, Routed, Target};
use crate::state::State;
use crate::view::{self, ModalView, PanelView, StatusPanelView, UsbClass};
use crate::{DevicePanel, INITIAL_WIDTH, PROGRAM_TITLE};
use eframe::egui::{
    self, Align, Align2, Color32, Context, FontId, Layout, Rect, RichText, ScrollArea, Sense, Ui,
    Vec2,
};

const ON_COLOR: Color32 = Color32::from_rgb(46, 160, 67);
const OFF_COLOR: Color32 = Color32::from_rgb(200, 60, 60);
const MESSAGE_COLOR: Color32 = Color32::from_rgb(255, 170, 0);
const DEVICE_BUTTON: ButtonStyle = ButtonStyle::new(Vec2::new(180.0, 44.0));
const OPTION_BUTTON: ButtonStyle = ButtonStyle::new(Vec2::new(240.0, 36.0));
const CLOSE_BUTTON: ButtonStyle = ButtonStyle::new(Vec2::new(60.0, 24.0));
const LABEL_WIDTH: f32 = 90.0;

// Look of a painted panel button
#[derive(Debug, Copy, Clone)]
struct ButtonStyle {
    size: Vec2,
    fill: Option<Color32>, // None uses the theme's widget fill
    selected: bool,
}

impl ButtonStyle {
    const fn new(size: Vec2) -> Self {
        Self { size, fill: None, selected: false }
    }

    fn filled(self, fill: Color32) -> Self {
        Self { fill: Some(fill), ..self }
    }

    fn selected(self, selected: bool) -> Self {
        Self { selected, ..self }
    }
}

impl DevicePanel {
    /// Routes one input through the panel. Nothing else mutates it.
    pub fn handle_input(&mut self, input: Input) -> Routed {
        self.router.dispatch(&mut self.panel, input)
    }

    fn handle_save_clicked(&mut self) {
        if self.save_state() {
            self.panel.set_status_message("Device state saved.");
        }
    }

    fn handle_load_clicked(&mut self) {
        if self.load_saved_state() {
            self.panel.set_status_message("Device state loaded.");
        }
    }
}

// --- UI Drawing Functions ---

pub(crate) fn draw_about_screen(app: &mut DevicePanel, ui: &mut Ui) {
    ui.set_width(INITIAL_WIDTH);
    ui.vertical_centered(|ui| {
        ui.heading(format!("About {}", PROGRAM_TITLE));
        ui.separator();
        for line in about::about() {
            ui.label(line);
        }
        ui.separator();
        if ui.button("OK").clicked() {
            app.state = State::Running;
        }
    });
}

pub(crate) fn draw_running_state(app: &mut DevicePanel, ui: &mut Ui, ctx: &Context) {
    // Keys first so this frame already shows their effect
    handle_key_presses(app, ctx);

    let view = view::render(&app.panel, &app.router);
    let mut clicks = Vec::new();

    ui.columns(2, |columns| {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .enable_scrolling(!view.scroll_locked)
            .show(&mut columns[0], |ui| {
                draw_device_controls(ui, &view, &mut app.feedback, &mut clicks);
                ui.separator();
                draw_status_panel(ui, &view.status);
                if let Some(message) = &view.message {
                    ui.add_space(5.0);
                    ui.colored_label(MESSAGE_COLOR, message);
                }
            });

        columns[1].vertical(|ui| {
            draw_control_buttons(app, ui, ctx);
        });
    });

    if let Some(modal) = &view.modal {
        draw_headphone_modal(ctx, modal, &mut app.feedback, &mut clicks);
    }

    for target in clicks {
        app.handle_input(Input::Click(target));
    }
    if !app.process_changes().is_empty() {
        ctx.request_repaint();
    }
}

fn handle_key_presses(app: &mut DevicePanel, ctx: &Context) {
    let presses: Vec<(egui::Key, egui::Modifiers)> = ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } => Some((*key, *modifiers)),
                _ => None,
            })
            .collect()
    });

    for (key, modifiers) in presses {
        let Some(input) = KeyInput::from_egui(key) else {
            continue;
        };
        if app.handle_input(Input::Key(input)).consumed {
            ctx.input_mut(|i| i.consume_key(modifiers, key));
        }
    }
}

fn draw_device_controls(
    ui: &mut Ui,
    view: &PanelView,
    feedback: &mut PressFeedback,
    clicks: &mut Vec<Target>,
) {
    ui.heading("Devices");
    ui.add_space(5.0);

    ui.horizontal(|ui| {
        ui.add_sized([LABEL_WIDTH, DEVICE_BUTTON.size.y], egui::Label::new("USB"));
        let fill = match view.usb_button.class {
            UsbClass::On => ON_COLOR,
            UsbClass::Off => OFF_COLOR,
        };
        let target = Target::UsbButton;
        let style = DEVICE_BUTTON.filled(fill);
        if panel_button(ui, feedback, target, view.usb_button.label, style).clicked() {
            clicks.push(target);
        }
    });

    ui.horizontal(|ui| {
        ui.add_sized([LABEL_WIDTH, DEVICE_BUTTON.size.y], egui::Label::new("Headphone"));
        let target = Target::HeadphoneButton;
        let label = view.headphone_button.label;
        if panel_button(ui, feedback, target, label, DEVICE_BUTTON).clicked() {
            clicks.push(target);
        }
    });
    ui.add_space(10.0);
}

fn draw_status_panel(ui: &mut Ui, status: &StatusPanelView) {
    ui.heading("Status");
    egui::Grid::new("status_panel")
        .num_columns(2)
        .spacing([40.0, 6.0])
        .show(ui, |ui| {
            ui.label("USB:");
            ui.label(RichText::new(status.usb).strong());
            ui.end_row();

            ui.label("Headphone:");
            ui.label(RichText::new(status.headphone).strong());
            ui.end_row();
        });
}

fn draw_headphone_modal(
    ctx: &Context,
    modal: &ModalView,
    feedback: &mut PressFeedback,
    clicks: &mut Vec<Target>,
) {
    let response = egui::Modal::new(egui::Id::new("headphone_modal")).show(ctx, |ui| {
        ui.set_width(OPTION_BUTTON.size.x);
        ui.horizontal(|ui| {
            ui.heading(modal.title);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let target = Target::CloseControl;
                if panel_button(ui, feedback, target, "Close", CLOSE_BUTTON).clicked() {
                    clicks.push(target);
                }
            });
        });
        ui.separator();

        for option in &modal.options {
            let text = match option.shortcut {
                Some(key) => format!("{}    {}", key, option.label),
                None => option.label.to_string(),
            };
            let target = Target::Option(option.option);
            let style = OPTION_BUTTON.selected(option.selected);
            if panel_button(ui, feedback, target, &text, style).clicked() {
                clicks.push(target);
            }
        }
    });

    if response.backdrop_response.clicked() {
        clicks.push(Target::Backdrop);
    }
}

/// Draws the control buttons in the right column.
fn draw_control_buttons(app: &mut DevicePanel, ui: &mut Ui, ctx: &Context) {
    let can_persist = app.backend.is_some();

    if ui.add_enabled(can_persist, egui::Button::new("Save State")).clicked() {
        app.handle_save_clicked();
    }
    if ui.add_enabled(can_persist, egui::Button::new("Load State")).clicked() {
        app.handle_load_clicked();
    }

    if ui.button("About").clicked() {
        app.state = State::About;
    }

    if ui.button("Exit").clicked() {
        // Ask eframe to close the window. `on_exit` will be called.
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

// --- UI Helper Widgets ---

/// A clickable, painted button that shrinks slightly while held.
fn panel_button(
    ui: &mut Ui,
    feedback: &mut PressFeedback,
    target: Target,
    text: &str,
    style: ButtonStyle,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(style.size, Sense::click());
    feedback.update(target, response.is_pointer_button_down_on(), response.hovered());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact_selectable(&response, style.selected);
        let rect = Rect::from_center_size(rect.center(), rect.size() * feedback.scale(target));
        let (fill, text_color) = match style.fill {
            Some(fill) => (fill, Color32::WHITE),
            None => (visuals.weak_bg_fill, visuals.text_color()),
        };
        ui.painter().rect(rect, visuals.rounding, fill, visuals.bg_stroke);
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(16.0),
            text_color,
        );
    }
    response
}
