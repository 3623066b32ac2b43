//! # Pose Sample Queues
//!
//! Three single-slot channels, one per axis, carrying the latest observed angle from the
//! position poller to the renderer.
//!
//! A sample is only inserted when its slot is empty, and reading a sample empties the slot.
//! The renderer therefore never sees a backlog and the poller never blocks. Superseded samples
//! offered while a slot is occupied are dropped.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use arm_if::eqpt::{Angle, Pose};
#[cfg(test)]
use arm_if::eqpt::Axis;
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Producer side of the pose queues, owned by the position poller.
#[derive(Debug, Clone)]
pub struct PoseSender {
    pitch: Sender<Angle>,
    yaw: Sender<Angle>,
    roll: Sender<Angle>,
}

/// Consumer side of the pose queues, owned by the renderer.
#[derive(Debug)]
pub struct PoseReceiver {
    pitch: Receiver<Angle>,
    yaw: Receiver<Angle>,
    roll: Receiver<Angle>,
}

/// Which axes were accepted by [`PoseSender::publish`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    pub pitch: bool,
    pub yaw: bool,
    pub roll: bool,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Create a new set of empty pose queues.
pub fn pose_channel() -> (PoseSender, PoseReceiver) {
    let (pitch_tx, pitch_rx) = bounded(1);
    let (yaw_tx, yaw_rx) = bounded(1);
    let (roll_tx, roll_rx) = bounded(1);

    (
        PoseSender {
            pitch: pitch_tx,
            yaw: yaw_tx,
            roll: roll_tx,
        },
        PoseReceiver {
            pitch: pitch_rx,
            yaw: yaw_rx,
            roll: roll_rx,
        },
    )
}

/// Insert into a slot if it is empty. Returns true if the value was inserted.
fn offer(slot: &Sender<Angle>, value: Angle) -> bool {
    match slot.try_send(value) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => false,
        // Renderer gone, nobody will read the sample anyway
        Err(TrySendError::Disconnected(_)) => false,
    }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PoseSender {
    /// Offer each axis of the pose to its queue.
    ///
    /// Axes whose slot still holds an unread sample are skipped.
    pub fn publish(&self, pose: Pose) -> Accepted {
        Accepted {
            pitch: offer(&self.pitch, pose.pitch),
            yaw: offer(&self.yaw, pose.yaw),
            roll: offer(&self.roll, pose.roll),
        }
    }

    /// Offer a single axis value to its queue.
    #[cfg(test)]
    pub fn offer(&self, axis: Axis, value: Angle) -> bool {
        match axis {
            Axis::Pitch => offer(&self.pitch, value),
            Axis::Yaw => offer(&self.yaw, value),
            Axis::Roll => offer(&self.roll, value),
        }
    }
}

impl PoseReceiver {
    /// True if every axis has an unread sample.
    pub fn is_complete(&self) -> bool {
        !(self.pitch.is_empty() || self.yaw.is_empty() || self.roll.is_empty())
    }

    /// Take one sample from each queue, but only if all three hold a sample.
    ///
    /// Never blocks. Returns `None` and leaves the queues untouched if any slot is empty.
    pub fn drain(&self) -> Option<Pose> {
        if !self.is_complete() {
            return None;
        }

        // This is the only consumer, so slots seen as full stay full until taken here
        Some(Pose {
            pitch: take(&self.pitch)?,
            yaw: take(&self.yaw)?,
            roll: take(&self.roll)?,
        })
    }

    /// Take the sample for a single axis, if there is one.
    #[cfg(test)]
    pub fn take(&self, axis: Axis) -> Option<Angle> {
        match axis {
            Axis::Pitch => take(&self.pitch),
            Axis::Yaw => take(&self.yaw),
            Axis::Roll => take(&self.roll),
        }
    }
}

fn take(slot: &Receiver<Angle>) -> Option<Angle> {
    match slot.try_recv() {
        Ok(v) => Some(v),
        Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
    }
}

impl Accepted {
    /// True if every axis was accepted.
    pub fn all(&self) -> bool {
        self.pitch && self.yaw && self.roll
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
