use serde::{Deserialize, Serialize};

// Settings saved to JSON next to the other per-user config files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigData {
    #[serde(default)] // Load/save the device state at all; off unless opted in
    pub persist_state: bool,
    #[serde(default = "default_true")] // Save after every device state change
    pub autosave: bool,
    #[serde(default)] // None means the platform data directory
    pub state_file: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            persist_state: false,
            autosave: true,
            state_file: None,
        }
    }
}
