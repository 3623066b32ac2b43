//! # Data Store
//!
//! State owned by the UI loop of the console executable.

use std::sync::Arc;

use arm_if::eqpt::{ArmController, Pose, SimArm};
use serde::Serialize;

use crate::{
    axis_ctrl::AxisControls,
    control_buttons::{ControlButtons, JawState, Orientation},
    notifications::NotificationLog,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Set once the operator asks to leave
    pub exit_requested: bool,

    // Equipment
    pub arm: Arc<dyn ArmController>,

    /// The simulated arm, when running without hardware. Lets the operator pull the "cable".
    pub sim: Option<Arc<SimArm>>,

    // Controls
    pub controls: AxisControls,

    pub buttons: ControlButtons,

    pub notifications: Arc<NotificationLog>,
}

/// Snapshot printed by the `status` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub connected: bool,

    /// Last pose read from the arm, if any.
    pub arm_pose: Option<Pose>,

    /// Values shown by the axis controls.
    pub displayed_pose: Pose,

    pub jaw: JawState,

    pub orientation: Orientation,

    pub num_cycles: u128,

    pub session_time_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    pub fn new(
        arm: Arc<dyn ArmController>,
        sim: Option<Arc<SimArm>>,
        controls: AxisControls,
        notifications: Arc<NotificationLog>,
    ) -> Self {
        Self {
            num_cycles: 0,
            num_consec_cycle_overruns: 0,
            exit_requested: false,
            buttons: ControlButtons::new(arm.clone()),
            arm,
            sim,
            controls,
            notifications,
        }
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }

    pub fn status_report(&self) -> StatusReport {
        StatusReport {
            connected: self.arm.is_connected(),
            arm_pose: self.arm.position(),
            displayed_pose: self.controls.displayed_pose(),
            jaw: self.buttons.jaw(),
            orientation: self.buttons.orientation(),
            num_cycles: self.num_cycles,
            session_time_s: util::session::get_elapsed_seconds(),
        }
    }
}
