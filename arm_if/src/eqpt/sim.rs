//! # Simulated Arm
//!
//! An [`ArmController`] with no hardware behind it. The console uses it when running without
//! an arm attached, and tests use it to script readings, inject I/O failures and inspect the
//! commands that were sent.
//!
//! Commanded angles are tracked as a demand. Each position update moves the simulated pose
//! toward the demand by at most the configured slew, or straight to it when no slew is set.
//! Scripted readings, when queued, take priority over the simulated motion.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::VecDeque;
use std::io;
use std::sync::{Mutex, MutexGuard};

use log::debug;

use super::arm::{Angle, ArmAction, ArmController, ArmError, Axis, Pose};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A simulated gimbal arm.
#[derive(Debug, Default)]
pub struct SimArm {
    state: Mutex<SimState>,
}

#[derive(Debug)]
struct SimState {
    connected: bool,

    /// False once the device has been "removed", connecting and reading then fail.
    plugged: bool,

    pose: Pose,

    demand: Pose,

    last_read: Option<Pose>,

    readings: VecDeque<Pose>,

    pending_failures: usize,

    slew_deg: Option<Angle>,

    sent: Vec<SentCmd>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command received by the simulated arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentCmd {
    SetAxis(Axis, Angle),
    Action(ArmAction),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SimState {
    fn default() -> Self {
        Self {
            connected: false,
            plugged: true,
            pose: Pose::default(),
            demand: Pose::default(),
            last_read: None,
            readings: VecDeque::new(),
            pending_failures: 0,
            slew_deg: None,
            sent: Vec::new(),
        }
    }
}

impl SimArm {
    /// Create a new, disconnected, simulated arm at the zero pose.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new simulated arm which is already connected.
    pub fn connected() -> Self {
        let arm = Self::default();
        arm.state().connected = true;
        arm
    }

    /// Limit how far each axis moves per position update.
    pub fn with_slew(self, slew_deg: Angle) -> Self {
        self.state().slew_deg = Some(slew_deg.abs());
        self
    }

    /// Queue a reading to be returned by a future position update.
    pub fn push_reading(&self, pose: Pose) {
        self.state().readings.push_back(pose);
    }

    /// Make the next `n` position updates fail with an I/O error.
    pub fn fail_next_updates(&self, n: usize) {
        self.state().pending_failures = n;
    }

    /// Simulate the device being physically removed.
    pub fn unplug(&self) {
        debug!("SimArm unplugged");
        self.state().plugged = false;
    }

    /// Simulate the device being plugged back in. The connection must be reopened.
    pub fn replug(&self) {
        debug!("SimArm plugged in");
        self.state().plugged = true;
    }

    /// Commands received so far, oldest first.
    pub fn sent(&self) -> Vec<SentCmd> {
        self.state().sent.clone()
    }

    /// Forget the commands received so far.
    #[cfg(test)]
    pub fn clear_sent(&self) {
        self.state().sent.clear();
    }

    /// The simulated physical pose.
    pub fn pose(&self) -> Pose {
        self.state().pose
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        // The state stays consistent even if a holder panicked, so poisoning is ignored
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn command(&self, cmd: SentCmd) -> Result<(), ArmError> {
        let mut state = self.state();

        if !state.connected {
            return Err(ArmError::NotConnected);
        }
        if !state.plugged {
            return Err(ArmError::DeviceLost);
        }

        if let SentCmd::SetAxis(axis, value) = cmd {
            state.demand.set(axis, value);
        }

        debug!("SimArm received {:?}", cmd);
        state.sent.push(cmd);

        Ok(())
    }
}

impl SimState {
    fn step_toward_demand(&mut self) {
        for axis in Axis::ALL.iter().copied() {
            let current = self.pose.get(axis);
            let error = self.demand.get(axis) - current;

            let step = match self.slew_deg {
                Some(slew) => error.max(-slew).min(slew),
                None => error,
            };

            self.pose.set(axis, current + step);
        }
    }
}

impl ArmController for SimArm {
    fn is_connected(&self) -> bool {
        self.state().connected
    }

    fn connect(&self) -> Result<(), ArmError> {
        let mut state = self.state();

        if !state.plugged {
            return Err(ArmError::DeviceLost);
        }

        state.connected = true;
        Ok(())
    }

    fn close(&self) {
        let mut state = self.state();
        state.connected = false;
        state.last_read = None;
    }

    fn update_position(&self) -> Result<Pose, ArmError> {
        let mut state = self.state();

        if !state.connected {
            return Err(ArmError::NotConnected);
        }
        if !state.plugged {
            return Err(ArmError::DeviceLost);
        }
        if state.pending_failures > 0 {
            state.pending_failures -= 1;
            return Err(ArmError::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                "simulated serial read timeout",
            )));
        }

        match state.readings.pop_front() {
            Some(reading) => state.pose = reading,
            None => state.step_toward_demand(),
        }

        let pose = state.pose;
        state.last_read = Some(pose);

        Ok(pose)
    }

    fn position(&self) -> Option<Pose> {
        self.state().last_read
    }

    fn set_pitch(&self, pitch: Angle) -> Result<(), ArmError> {
        self.command(SentCmd::SetAxis(Axis::Pitch, pitch))
    }

    fn set_yaw(&self, yaw: Angle) -> Result<(), ArmError> {
        self.command(SentCmd::SetAxis(Axis::Yaw, yaw))
    }

    fn set_roll(&self, roll: Angle) -> Result<(), ArmError> {
        self.command(SentCmd::SetAxis(Axis::Roll, roll))
    }

    fn open_arm(&self) -> Result<(), ArmError> {
        self.command(SentCmd::Action(ArmAction::Open))
    }

    fn close_arm(&self) -> Result<(), ArmError> {
        self.command(SentCmd::Action(ArmAction::Close))
    }

    fn portrait(&self) -> Result<(), ArmError> {
        self.command(SentCmd::Action(ArmAction::Portrait))
    }

    fn landscape(&self) -> Result<(), ArmError> {
        self.command(SentCmd::Action(ArmAction::Landscape))
    }

    fn tilt(&self) -> Result<(), ArmError> {
        self.command(SentCmd::Action(ArmAction::Tilt))
    }

    fn nod(&self) -> Result<(), ArmError> {
        self.command(SentCmd::Action(ArmAction::Nod))
    }

    fn shake(&self) -> Result<(), ArmError> {
        self.command(SentCmd::Action(ArmAction::Shake))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_disconnected_arm_rejects_everything() {
        let arm = SimArm::new();

        assert!(!arm.is_connected());
        assert!(matches!(arm.update_position(), Err(ArmError::NotConnected)));
        assert!(matches!(arm.set_pitch(10), Err(ArmError::NotConnected)));
        assert!(arm.position().is_none());
        assert!(arm.sent().is_empty());
    }

    #[test]
    fn test_scripted_readings_then_demand() {
        let arm = SimArm::connected();
        arm.push_reading(Pose::new(10, -5, 0));

        assert_eq!(arm.update_position().unwrap(), Pose::new(10, -5, 0));
        assert_eq!(arm.position(), Some(Pose::new(10, -5, 0)));

        // With no readings queued the pose jumps to the demand
        arm.set_yaw(30).unwrap();
        assert_eq!(arm.update_position().unwrap(), Pose::new(0, 30, 0));

        assert_eq!(arm.sent(), vec![SentCmd::SetAxis(Axis::Yaw, 30)]);
    }

    #[test]
    fn test_slew_limits_motion() {
        let arm = SimArm::connected().with_slew(4);

        arm.set_pitch(10).unwrap();
        arm.set_yaw(-6).unwrap();

        assert_eq!(arm.update_position().unwrap(), Pose::new(4, -4, 0));
        assert_eq!(arm.update_position().unwrap(), Pose::new(8, -6, 0));
        assert_eq!(arm.update_position().unwrap(), Pose::new(10, -6, 0));
    }

    #[test]
    fn test_failures_and_unplug() {
        let arm = SimArm::connected();

        arm.fail_next_updates(1);
        assert!(matches!(arm.update_position(), Err(ArmError::Io(_))));
        assert!(arm.update_position().is_ok());

        arm.unplug();
        assert!(matches!(arm.update_position(), Err(ArmError::DeviceLost)));

        arm.close();
        assert!(!arm.is_connected());
        assert!(matches!(arm.connect(), Err(ArmError::DeviceLost)));

        arm.replug();
        assert!(arm.connect().is_ok());
        assert!(arm.is_connected());
    }

    #[test]
    fn test_actions_are_recorded() {
        let arm = SimArm::connected();

        arm.action(ArmAction::Open).unwrap();
        arm.set_axis(Axis::Roll, 45).unwrap();
        arm.nod().unwrap();

        assert_eq!(
            arm.sent(),
            vec![
                SentCmd::Action(ArmAction::Open),
                SentCmd::SetAxis(Axis::Roll, 45),
                SentCmd::Action(ArmAction::Nod),
            ]
        );

        arm.clear_sent();
        assert!(arm.sent().is_empty());
    }
}
