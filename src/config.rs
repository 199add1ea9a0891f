//! Typed inspection configuration.
//!
//! The TOML file form is deserialized into a private struct, then resolved
//! into the immutable [`InspectionConfig`] the rest of the crate works with:
//! defaults filled in, the frame width derived from the height when absent,
//! and everything validated up front so invocation time never sees a bad
//! config.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// On-disk form. Field names match the host config keys, including the
/// historical `cancel_automatically` spelling.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    stream_url: String,
    model_path: PathBuf,
    #[serde(default = "default_img_height")]
    img_height: u32,
    img_width: Option<u32>,
    #[serde(default)]
    debug: bool,
    #[serde(default = "default_true")]
    cancel_on_error: bool,
    #[serde(default = "default_true", rename = "cancel_automatically")]
    cancel_on_nok: bool,
    #[serde(default)]
    enable_xy_conditioning: bool,
    #[serde(default)]
    clear_view_x: i32,
    #[serde(default)]
    clear_view_y: i32,
}

fn default_img_height() -> u32 {
    550
}

fn default_true() -> bool {
    true
}

/// Resolved inspection settings, read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct InspectionConfig {
    /// Snapshot endpoint of the bed camera.
    pub stream_url: String,
    /// Path to the 3-class ONNX bed model.
    pub model_path: PathBuf,
    /// Frame width the model expects, in pixels.
    pub img_width: u32,
    /// Frame height the model expects, in pixels.
    pub img_height: u32,
    /// Emit extra capture/classification detail.
    pub debug: bool,
    /// Cancel the print when the inspection itself fails.
    pub cancel_on_error: bool,
    /// Cancel the print when the bed is not clear.
    pub cancel_on_nok: bool,
    /// Reposition the toolhead before the first capture.
    pub enable_xy_conditioning: bool,
    /// X coordinate of the spot with an unobstructed camera view.
    pub clear_view_x: i32,
    /// Y coordinate of the spot with an unobstructed camera view.
    pub clear_view_y: i32,
}

impl InspectionConfig {
    /// Load and resolve a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse and resolve a config from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;
        Self::resolve(file)
    }

    fn resolve(file: FileConfig) -> Result<Self, ConfigError> {
        // The camera mounts used with this model are 16:9, so an omitted
        // width is derived from the height at that ratio.
        let img_width = file.img_width.unwrap_or(file.img_height / 9 * 16);

        if file.img_height == 0 || img_width == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if file.model_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyModelPath);
        }
        Url::parse(&file.stream_url).map_err(|e| ConfigError::InvalidStreamUrl {
            url: file.stream_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            stream_url: file.stream_url,
            model_path: file.model_path,
            img_width,
            img_height: file.img_height,
            debug: file.debug,
            cancel_on_error: file.cancel_on_error,
            cancel_on_nok: file.cancel_on_nok,
            enable_xy_conditioning: file.enable_xy_conditioning,
            clear_view_x: file.clear_view_x,
            clear_view_y: file.clear_view_y,
        })
    }
}
