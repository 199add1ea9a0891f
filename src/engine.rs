//! The inspection decision engine.
//!
//! One invocation runs: optional repositioning, capture, classification,
//! a confidence-gated single retake, then a verdict. Capture or classifier
//! failures end the sequence immediately as an error outcome; only low
//! confidence earns a second look.

use tracing::{debug, info};

use crate::camera::FrameSource;
use crate::classifier::{Classification, Classifier};
use crate::conditioning::ConditioningAction;
use crate::config::InspectionConfig;
use crate::error::InspectionError;
use crate::labels::PlateState;

/// Minimum confidence for a classification to be accepted on the first pass.
pub const CONFIDENCE_THRESHOLD: f32 = 0.9;

/// Capture/classify cycles per invocation: the first pass plus one retake.
pub const MAX_ATTEMPTS: u32 = 2;

/// Terminal verdict of one inspection, handed to the action dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Bed is clear; the print may proceed.
    Continue,
    /// Bed is not printable, with the offending state.
    Nok(PlateState),
    /// The inspection itself failed.
    Error(String),
}

/// Sequences the collaborators into a terminal [`Outcome`].
pub struct InspectionEngine<'a> {
    config: &'a InspectionConfig,
}

impl<'a> InspectionEngine<'a> {
    pub fn new(config: &'a InspectionConfig) -> Self {
        Self { config }
    }

    /// Run one full decision sequence. Never panics and never raises: every
    /// path ends in an [`Outcome`].
    pub fn run(
        &self,
        frames: &mut dyn FrameSource,
        classifier: &mut dyn Classifier,
        conditioning: &ConditioningAction<'_>,
    ) -> Outcome {
        match self.classify_with_retry(frames, classifier, conditioning) {
            Ok(result) if result.state.is_clear() => Outcome::Continue,
            Ok(result) => Outcome::Nok(result.state),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }

    fn classify_with_retry(
        &self,
        frames: &mut dyn FrameSource,
        classifier: &mut dyn Classifier,
        conditioning: &ConditioningAction<'_>,
    ) -> Result<Classification, InspectionError> {
        if self.config.enable_xy_conditioning {
            conditioning.reposition();
        }

        let mut result = Self::capture_and_classify(frames, classifier)?;
        let mut attempt = 1;

        // A low-confidence pass gets exactly one repositioned retake. The
        // retake repositions even when enable_xy_conditioning is off; the
        // flag only governs the reposition before the first capture.
        while result.confidence < CONFIDENCE_THRESHOLD && attempt < MAX_ATTEMPTS {
            attempt += 1;
            info!(
                "Classification confidence {:.2} below {:.2}, retaking frame",
                result.confidence, CONFIDENCE_THRESHOLD
            );
            conditioning.reposition();
            result = Self::capture_and_classify(frames, classifier)?;
        }

        Ok(result)
    }

    fn capture_and_classify(
        frames: &mut dyn FrameSource,
        classifier: &mut dyn Classifier,
    ) -> Result<Classification, InspectionError> {
        let frame = frames.acquire()?;
        let result = classifier.classify(&frame)?;
        debug!(
            "Classified bed frame as '{}' with confidence {:.3}",
            result.state, result.confidence
        );
        Ok(result)
    }
}
