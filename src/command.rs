//! The host-facing inspection command.
//!
//! Wires the configured frame source and classifier into the engine for one
//! invocation, then routes the outcome through the dispatcher. The model is
//! reloaded on every invocation; a bed check runs once per print, so the
//! load cost does not warrant a cached handle.

use std::sync::Mutex;

use tracing::info;

use crate::camera::StreamFrameSource;
use crate::classifier::OnnxClassifier;
use crate::conditioning::ConditioningAction;
use crate::config::InspectionConfig;
use crate::dispatch::ActionDispatcher;
use crate::engine::{InspectionEngine, Outcome};
use crate::host::{MotionControl, PrinterHost};

/// Command name the host registers for the inspection routine.
pub const COMMAND_NAME: &str = "CHECK_WEBCAM";

/// One engine context per host, constructed once from config and invoked by
/// the host's command dispatcher.
pub struct BedCheckCommand {
    config: InspectionConfig,
    in_flight: Mutex<()>,
}

impl BedCheckCommand {
    pub fn new(config: InspectionConfig) -> Self {
        Self {
            config,
            in_flight: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &InspectionConfig {
        &self.config
    }

    /// Run one full inspection and dispatch its side effects.
    ///
    /// Overlapping invocations are refused: the sequence holds no reentrancy
    /// protection of its own, so a second command while one is in flight is
    /// answered with a notice instead of a concurrent run.
    pub fn execute(&self, host: &dyn PrinterHost, motion: &dyn MotionControl) -> Outcome {
        let Ok(_guard) = self.in_flight.try_lock() else {
            host.respond_info("A bed inspection is already in progress.");
            return Outcome::Error("inspection already in progress".to_string());
        };

        info!("Starting bed inspection");
        let outcome = self.run_sequence(host, motion);
        ActionDispatcher::new(host, &self.config).dispatch(&outcome);
        outcome
    }

    fn run_sequence(&self, host: &dyn PrinterHost, motion: &dyn MotionControl) -> Outcome {
        let mut classifier = match OnnxClassifier::load(
            &self.config.model_path,
            self.config.img_width,
            self.config.img_height,
        ) {
            Ok(classifier) => classifier,
            Err(e) => return Outcome::Error(e.to_string()),
        };

        let mut frames = StreamFrameSource::new(&self.config);
        let conditioning = ConditioningAction::new(
            host,
            motion,
            self.config.clear_view_x,
            self.config.clear_view_y,
        );

        InspectionEngine::new(&self.config).run(&mut frames, &mut classifier, &conditioning)
    }
}
