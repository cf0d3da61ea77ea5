//! Init payload handed to a standalone window process.
//!
//! The parent serializes a [`WindowData`] to JSON bytes and base64-encodes
//! them, so the record travels as a single command-line argument.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or checking a window payload.
#[derive(Debug, Error)]
pub enum WindowDataError {
    #[error("Failed to encode window data: {0}")]
    Encode(String),
    #[error("Failed to decode window data: {0}")]
    Decode(String),
    #[error("Invalid window data: {0}")]
    Invalid(String),
}

/// Title, icon and size of a standalone window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowData {
    pub title: String,
    pub icon: PathBuf,
    pub size: (i32, i32),
}

impl Default for WindowData {
    fn default() -> Self {
        Self {
            title: "Teacup Window".to_string(),
            icon: PathBuf::from("assets/icon.png"),
            size: (500, 500),
        }
    }
}

impl WindowData {
    pub fn new(title: impl Into<String>, icon: impl Into<PathBuf>, size: (i32, i32)) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            size,
        }
    }

    /// Check the record before anything is spawned or opened.
    pub fn validate(&self) -> Result<(), WindowDataError> {
        if self.icon.as_os_str().is_empty() {
            return Err(WindowDataError::Invalid("icon path is empty".to_string()));
        }
        let (width, height) = self.size;
        if width <= 0 || height <= 0 {
            return Err(WindowDataError::Invalid(format!(
                "size must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(())
    }

    /// Window size in pixels. Only meaningful on a validated record.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.size.0.max(0) as u32, self.size.1.max(0) as u32)
    }

    /// Encode into one command-line-safe string.
    pub fn encode(&self) -> Result<String, WindowDataError> {
        self.validate()?;
        let bytes = serde_json::to_vec(self).map_err(|e| WindowDataError::Encode(e.to_string()))?;
        Ok(STANDARD.encode(bytes))
    }

    pub fn decode(payload: &str) -> Result<Self, WindowDataError> {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| WindowDataError::Decode(e.to_string()))?;
        let data: Self =
            serde_json::from_slice(&bytes).map_err(|e| WindowDataError::Decode(e.to_string()))?;
        data.validate()?;
        Ok(data)
    }

    /// Record for a child process argument.
    ///
    /// Only a missing argument falls back to the default record; a payload
    /// that is present must decode and validate.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, WindowDataError> {
        match arg {
            None => {
                log::warn!("No window data passed; using default window data");
                Ok(Self::default())
            }
            Some(payload) => Self::decode(payload),
        }
    }
}
