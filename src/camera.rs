//! Frame acquisition from the bed camera.
//!
//! One blocking HTTP GET per frame against the configured snapshot URL,
//! decoded and resized to exactly the dimensions the model expects. Retry
//! policy lives in the engine, not here.

use std::time::Duration;

use image::RgbImage;
use tracing::debug;

use crate::config::InspectionConfig;
use crate::error::CaptureError;

/// How long a single snapshot request may take before it is abandoned.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One decoded, resized snapshot of the print bed.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbImage,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Anything that can produce bed frames for the engine.
pub trait FrameSource {
    /// Acquire one frame. Blocking; no internal retry.
    fn acquire(&mut self) -> Result<Frame, CaptureError>;
}

/// Frame source backed by the camera's HTTP snapshot endpoint.
pub struct StreamFrameSource {
    client: reqwest::blocking::Client,
    stream_url: String,
    width: u32,
    height: u32,
}

impl StreamFrameSource {
    pub fn new(config: &InspectionConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent("platecheck/0.1")
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            stream_url: config.stream_url.clone(),
            width: config.img_width,
            height: config.img_height,
        }
    }

    /// Decode raw snapshot bytes and resize them to the target dimensions.
    fn decode_frame(bytes: &[u8], width: u32, height: u32) -> Result<Frame, CaptureError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| CaptureError::Decode(e.to_string()))?;
        let image = image::imageops::resize(
            &decoded.to_rgb8(),
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        Ok(Frame { image })
    }
}

impl FrameSource for StreamFrameSource {
    fn acquire(&mut self) -> Result<Frame, CaptureError> {
        let response = self
            .client
            .get(&self.stream_url)
            .send()
            .map_err(|e| CaptureError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptureError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .map_err(|e| CaptureError::Request(e.to_string()))?;

        let frame = Self::decode_frame(&bytes, self.width, self.height)?;
        debug!("Captured bed frame ({}x{} px)", frame.width(), frame.height());
        Ok(frame)
    }
}
