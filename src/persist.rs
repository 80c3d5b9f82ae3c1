//! Optional saving and loading of the two device states.
//!
//! A failed save or load never touches the in-memory panel; callers log the
//! error and report it in the status line.

use crate::device::{HeadphoneState, ParseHeadphoneError, UsbState};
use chrono::{DateTime, Local};
use fast_config::Config;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const STATE_DIR_NAME: &str = "device_panel";
pub const STATE_FILE_NAME: &str = "device_state.json";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to create state directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("state file {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error(transparent)]
    InvalidHeadphone(#[from] ParseHeadphoneError),
}

/// Storage for the device states.
pub trait StateBackend {
    fn save_state(&mut self, usb: UsbState, headphone: HeadphoneState) -> Result<(), PersistError>;
    fn load_state(&self) -> Result<(UsbState, HeadphoneState), PersistError>;
}

// On-disk layout of the state file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub usb: bool,
    pub headphone: String,
    #[serde(default)]
    pub saved_at: Option<String>, // RFC 3339, informational only
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            usb: false,
            headphone: HeadphoneState::default().label().to_string(),
            saved_at: None,
        }
    }
}

impl PersistedState {
    /// Validates the stored fields; nothing is returned unless both parse.
    pub fn to_states(&self) -> Result<(UsbState, HeadphoneState), PersistError> {
        let headphone = self.headphone.parse::<HeadphoneState>()?;
        Ok((UsbState::from(self.usb), headphone))
    }
}

/// JSON state file handled through `fast_config`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/device_panel/device_state.json`, if the platform has a
    /// data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(STATE_DIR_NAME).join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Config<PersistedState>, PersistError> {
        let path_str = self.path.to_string_lossy().into_owned();
        Config::new(&path_str, PersistedState::default()).map_err(|e| PersistError::Config {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

impl StateBackend for FileBackend {
    fn save_state(&mut self, usb: UsbState, headphone: HeadphoneState) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| PersistError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut config = self.open()?;
        config.data = PersistedState {
            usb: usb.is_on(),
            headphone: headphone.label().to_string(),
            saved_at: Some(Local::now().to_rfc3339()),
        };
        config.save().map_err(|e| PersistError::Config {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        info!(
            "Saved device state to {}: USB {}, headphone {}",
            self.path.display(),
            usb,
            headphone
        );
        Ok(())
    }

    fn load_state(&self) -> Result<(UsbState, HeadphoneState), PersistError> {
        if !self.path.exists() {
            debug!("No state file at {}, using defaults.", self.path.display());
            return Ok((UsbState::default(), HeadphoneState::default()));
        }

        let config = self.open()?;
        let states = config.data.to_states()?;

        match config.data.saved_at.as_deref().map(DateTime::parse_from_rfc3339) {
            Some(Ok(saved_at)) => info!(
                "Loaded device state from {} (saved {})",
                self.path.display(),
                saved_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            ),
            _ => info!("Loaded device state from {}", self.path.display()),
        }
        Ok(states)
    }
}
