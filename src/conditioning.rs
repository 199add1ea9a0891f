//! Toolhead repositioning for a clearer camera view.

use tracing::info;

use crate::host::{MotionControl, PrinterHost};

/// Moves the toolhead out of the camera's line of sight before a capture.
///
/// Issues a home of X and Y first when either axis is unhomed, then a move
/// to the configured clear-view position. The motion host owns physical
/// completion; this never fails the inspection sequence.
pub struct ConditioningAction<'a> {
    host: &'a dyn PrinterHost,
    motion: &'a dyn MotionControl,
    clear_view_x: i32,
    clear_view_y: i32,
}

impl<'a> ConditioningAction<'a> {
    pub fn new(
        host: &'a dyn PrinterHost,
        motion: &'a dyn MotionControl,
        clear_view_x: i32,
        clear_view_y: i32,
    ) -> Self {
        Self {
            host,
            motion,
            clear_view_x,
            clear_view_y,
        }
    }

    pub fn reposition(&self) {
        self.host
            .respond_info("Repositioning the toolhead for a better view of the bed.");

        let homed = self.motion.homed_axes();
        if !homed.x || !homed.y {
            info!("XY not homed, homing before reposition");
            self.motion.home_xy();
        }

        self.motion.move_to(self.clear_view_x, self.clear_view_y);
    }
}
