use crate::config::ConfigData;
use crate::persist::{FileBackend, StateBackend};
use crate::state::{Change, PanelState, State};
use crate::{ui, Args, DevicePanel, INITIAL_HEIGHT, INITIAL_WIDTH, SETTINGS_FILE_NAME};
use eframe::{egui, glow};
use fast_config::Config;
use std::path::PathBuf;
use std::time::Duration;

// Opens the settings file, falling back to in-memory defaults on failure
fn open_settings() -> Option<Config<ConfigData>> {
    let config_dir = dirs::config_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string()); // Fallback to current dir
    let config_path = format!("{}/{}", config_dir, SETTINGS_FILE_NAME);

    match Config::new(&config_path, ConfigData::default()) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::error!("Error opening settings file at {}: {}", config_path, e);
            None
        }
    }
}

impl DevicePanel {
    /// Builds the app from command line arguments and the settings file.
    pub fn new(args: &Args) -> Self {
        let config = open_settings();
        let settings = config
            .as_ref()
            .map(|cfg| cfg.data.clone())
            .unwrap_or_default();

        let mut app = Self::from_settings(args, &settings);
        app.config = config;
        app
    }

    /// Builds the app from already loaded settings. Device state is only
    /// loaded and saved when `--persist` is given or the settings opt in.
    pub fn from_settings(args: &Args, settings: &ConfigData) -> Self {
        let backend: Option<Box<dyn StateBackend>> = if !args.persist && !settings.persist_state {
            log::info!("Device state persistence disabled.");
            None
        } else {
            let path = args
                .state_file
                .clone()
                .or_else(|| settings.state_file.as_ref().map(PathBuf::from))
                .or_else(FileBackend::default_path);
            match path {
                Some(path) => {
                    log::info!("Device state file: {}", path.display());
                    Some(Box::new(FileBackend::new(path)))
                }
                None => {
                    log::warn!("No data directory available; device state will not be saved.");
                    None
                }
            }
        };

        Self::with_backend(backend, settings.autosave)
    }

    /// Builds the app without touching the settings file.
    pub fn with_backend(backend: Option<Box<dyn StateBackend>>, autosave: bool) -> Self {
        Self {
            state: State::Initialising,
            panel: PanelState::new(),
            router: Default::default(),
            feedback: Default::default(),
            config: None,
            backend,
            autosave,
        }
    }

    // Initialization logic called once at the start
    pub fn init(&mut self) {
        self.load_saved_state();
        self.state = State::Running;
        log::info!("Initialization complete. State set to Running.");
    }

    /// Replaces the panel's device states with the saved ones. On failure the
    /// panel is left exactly as it was.
    pub fn load_saved_state(&mut self) -> bool {
        let Some(backend) = self.backend.as_ref() else {
            return false;
        };
        match backend.load_state() {
            Ok((usb, headphone)) => {
                self.panel.restore(usb, headphone);
                // Restored values came from storage, no need to write them back
                for change in self.panel.take_changes() {
                    log::debug!("Restored {:?}", change);
                }
                self.panel.clear_status_message();
                true
            }
            Err(e) => {
                log::error!("Failed to load state: {}", e);
                self.panel.set_status_message(format!("Failed to load state: {}", e));
                false
            }
        }
    }

    /// Writes the current device states to the backend, if there is one.
    pub fn save_state(&mut self) -> bool {
        let usb = self.panel.usb();
        let headphone = self.panel.headphone();
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };
        match backend.save_state(usb, headphone) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save state: {}", e);
                self.panel.set_status_message(format!("Failed to save state: {}", e));
                false
            }
        }
    }

    /// Drains queued notifications and autosaves after device changes.
    /// Returns the drained changes.
    pub fn process_changes(&mut self) -> Vec<Change> {
        let changes = self.panel.take_changes();
        if self.autosave && changes.iter().any(Change::is_device_change) && self.save_state() {
            self.panel.clear_status_message();
        }
        changes
    }

    // Graceful shutdown logic
    fn shutdown_app(&mut self) {
        log::info!("Shutdown requested.");

        if self.backend.is_some() && self.save_state() {
            log::info!("Device state saved.");
        }

        // Save configuration
        if let Some(config) = self.config.as_mut() {
            if let Err(e) = config.save() {
                log::error!("Failed to save configuration on exit: {}", e);
            } else {
                log::info!("Configuration saved.");
            }
        }
        log::info!("Shutdown complete.");
    }
}

// Main eframe application loop
impl eframe::App for DevicePanel {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Resize::default()
                .default_width(INITIAL_WIDTH)
                .default_height(INITIAL_HEIGHT)
                .auto_sized()
                .show(ui, |ui| match self.state {
                    State::Initialising => {
                        ui.centered_and_justified(|ui| {
                            ui.label("Initialising...");
                        });
                        self.init();
                        ctx.request_repaint();
                    }
                    State::About => {
                        ui::draw_about_screen(self, ui);
                    }
                    State::Running => {
                        ui::draw_running_state(self, ui, ctx);
                    }
                });
        });

        // Pressed controls need a repaint when the pointer is released
        if self.feedback.pressed().is_some() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }

    // Called when the application is about to close
    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        self.shutdown_app();
    }
}
