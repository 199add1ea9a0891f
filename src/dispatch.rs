//! Maps a terminal [`Outcome`] to its operator-visible side effects.

use tracing::warn;

use crate::config::InspectionConfig;
use crate::engine::Outcome;
use crate::host::PrinterHost;

/// Turns an outcome into exactly one notification, plus a cancellation when
/// the matching flag is set.
pub struct ActionDispatcher<'a> {
    host: &'a dyn PrinterHost,
    cancel_on_nok: bool,
    cancel_on_error: bool,
}

impl<'a> ActionDispatcher<'a> {
    pub fn new(host: &'a dyn PrinterHost, config: &InspectionConfig) -> Self {
        Self {
            host,
            cancel_on_nok: config.cancel_on_nok,
            cancel_on_error: config.cancel_on_error,
        }
    }

    pub fn dispatch(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Continue => {
                self.host
                    .respond_info("Bed inspection detected no issues.");
            }
            Outcome::Nok(state) => {
                self.host
                    .respond_info(&format!("Bed inspection detected a problem: {state}"));
                if self.cancel_on_nok {
                    self.cancel();
                }
            }
            Outcome::Error(message) => {
                warn!("Bed inspection failed: {message}");
                self.host
                    .respond_info(&format!("Internal error during bed inspection: {message}"));
                if self.cancel_on_error {
                    self.cancel();
                }
            }
        }
    }

    fn cancel(&self) {
        self.host
            .respond_info("Bed inspection triggered a print cancellation.");
        self.host.cancel_print();
    }
}
