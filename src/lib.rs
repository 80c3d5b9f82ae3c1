// Export modules for testing
pub mod about;
pub mod app;
pub mod config;
pub mod device;
pub mod input;
pub mod modal;
pub mod persist;
pub mod state;
pub mod ui;
pub mod view;

// Re-export main types
pub use crate::config::ConfigData;
pub use crate::device::{DeviceStateStore, HeadphoneState, UsbState};
pub use crate::input::{InputRouter, PressFeedback};
pub use crate::modal::{CloseReason, ModalController, ModalVisibility};
pub use crate::persist::{FileBackend, PersistError, StateBackend};
pub use crate::state::{Change, PanelState, State};

// Constants
pub const PROGRAM_TITLE: &str = "Device Panel";
pub const INITIAL_WIDTH: f32 = 520.0;
pub const INITIAL_HEIGHT: f32 = 320.0;
pub const SETTINGS_FILE_NAME: &str = "device_panel.json";

// Args struct for command line parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// State file to use with persistence instead of the data directory
    #[arg(short, long)]
    pub state_file: Option<PathBuf>,

    /// Load the device state at startup and save it on change and on exit
    #[arg(long, default_value_t = false)]
    pub persist: bool,
}

pub use fast_config::Config;

// The main application struct
pub struct DevicePanel {
    // State
    pub state: State,
    pub panel: PanelState,

    // Input handling
    pub router: InputRouter,
    pub feedback: PressFeedback,

    // Configuration and storage
    pub config: Option<Config<ConfigData>>, // None when the settings file could not be opened
    pub backend: Option<Box<dyn StateBackend>>, // None when persistence is off
    pub autosave: bool,
}
