//! # Position Poller
//!
//! Background loop sampling the arm's pose and offering it to the renderer through the pose
//! queues.
//!
//! While the arm is connected the reading is mirrored onto the axis controls. While it is not,
//! the values in the controls' numeric boxes stand in for it so the 3D view follows the
//! operator's input. A failed reading is treated as the device having gone away: the operator
//! is notified, the connection closed, and polling carries on in manual mode.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use arm_if::eqpt::{ArmController, Pose};
use log::{info, warn};

use crate::{
    axis_ctrl::AxisControls,
    notifications::Notifications,
    pose_queue::{Accepted, PoseSender},
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Name of the poller thread.
pub const THREAD_NAME: &str = "position_poller";

/// Notification appended when a reading fails.
pub const DISCONNECTED_MSG: &str = "WARNING: DEVICE DISCONNECTED";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct PositionPoller {
    arm: Arc<dyn ArmController>,

    controls: AxisControls,

    notifications: Arc<dyn Notifications>,

    sender: PoseSender,

    period: Duration,

    /// The pose published by the previous cycle, republished when a reading fails.
    last_published: Pose,
}

/// Result of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    pub outcome: PollOutcome,

    /// Axes whose queue accepted the value this cycle.
    pub accepted: Accepted,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Where the pose published by a poll cycle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Read from the connected arm.
    Live(Pose),

    /// Taken from the controls' numeric boxes, the arm is not connected.
    Manual(Pose),

    /// The reading failed and the arm has been disconnected, the previous cycle's pose was
    /// published again.
    Disconnected(Pose),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PositionPoller {
    pub fn new(
        arm: Arc<dyn ArmController>,
        controls: AxisControls,
        notifications: Arc<dyn Notifications>,
        sender: PoseSender,
        period: Duration,
    ) -> Self {
        Self {
            arm,
            controls,
            notifications,
            sender,
            period,
            last_published: Pose::default(),
        }
    }

    /// Run one poll cycle without sleeping.
    pub fn cycle(&mut self) -> PollReport {
        let outcome = if self.arm.is_connected() {
            match self.arm.update_position() {
                Ok(pose) => {
                    self.controls.set_pose(pose);
                    PollOutcome::Live(pose)
                }
                Err(e) => {
                    self.notifications.append_line(DISCONNECTED_MSG);
                    self.arm.close();
                    warn!("Position update failed, arm disconnected: {}", e);
                    PollOutcome::Disconnected(self.last_published)
                }
            }
        } else {
            PollOutcome::Manual(self.controls.displayed_pose())
        };

        self.last_published = outcome.pose();
        let accepted = self.sender.publish(self.last_published);

        PollReport { outcome, accepted }
    }

    /// Start polling on a background thread.
    ///
    /// The thread loops for the life of the process. Nothing waits on it at exit so the handle
    /// can be dropped.
    pub fn spawn(mut self) -> io::Result<JoinHandle<()>> {
        info!("Starting position poller, period {:?}", self.period);

        thread::Builder::new()
            .name(String::from(THREAD_NAME))
            .spawn(move || loop {
                self.cycle();
                thread::sleep(self.period);
            })
    }
}

impl PollOutcome {
    /// The pose published by the cycle.
    pub fn pose(&self) -> Pose {
        match self {
            PollOutcome::Live(p) | PollOutcome::Manual(p) | PollOutcome::Disconnected(p) => *p,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
