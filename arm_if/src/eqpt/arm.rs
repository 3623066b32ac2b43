//! # Arm Equipment Interface
//!
//! Pose types and the [`ArmController`] capability. The capability is shared between the
//! position poller thread and the UI loop, so implementations must do their own locking.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// An axis angle in whole degrees.
pub type Angle = i32;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Orientation of the arm, the unit of comparison for "did the arm move".
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pose {
    /// Elevation of the phone mount.
    ///
    /// Units: degrees
    pub pitch: Angle,

    /// Heading of the phone mount.
    ///
    /// Units: degrees
    pub yaw: Angle,

    /// Rotation of the phone about its own long axis.
    ///
    /// Units: degrees
    pub roll: Angle,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The three rotational axes of the arm.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Pitch,
    Yaw,
    Roll,
}

/// Discrete actions the arm firmware can perform.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmAction {
    Open,
    Close,
    Portrait,
    Landscape,
    Tilt,
    Nod,
    Shake,
}

/// Errors raised by an arm controller.
#[derive(Debug, thiserror::Error)]
pub enum ArmError {
    #[error("The arm is not connected")]
    NotConnected,

    #[error("The arm device has been removed")]
    DeviceLost,

    #[error("I/O error while talking to the arm: {0}")]
    Io(#[from] std::io::Error),

    #[error("The arm sent an invalid response: {0}")]
    InvalidResponse(String),
}

/// Error returned when parsing an [`Axis`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not an axis, expected one of pitch, yaw or roll")]
pub struct ParseAxisError(pub String);

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Capability to monitor and command the gimbal arm.
///
/// All methods take `&self`: the controller is owned by the application and shared with every
/// component through an `Arc`.
pub trait ArmController: Send + Sync {
    /// True while a connection to the arm is open.
    fn is_connected(&self) -> bool;

    /// Open the connection to the arm.
    fn connect(&self) -> Result<(), ArmError>;

    /// Release the connection to the arm.
    fn close(&self);

    /// Read the arm's current position from the hardware.
    ///
    /// On success the returned pose is also available from [`ArmController::position`].
    fn update_position(&self) -> Result<Pose, ArmError>;

    /// Position read by the last successful [`ArmController::update_position`], if any.
    fn position(&self) -> Option<Pose>;

    fn set_pitch(&self, pitch: Angle) -> Result<(), ArmError>;

    fn set_yaw(&self, yaw: Angle) -> Result<(), ArmError>;

    fn set_roll(&self, roll: Angle) -> Result<(), ArmError>;

    fn open_arm(&self) -> Result<(), ArmError>;

    fn close_arm(&self) -> Result<(), ArmError>;

    fn portrait(&self) -> Result<(), ArmError>;

    fn landscape(&self) -> Result<(), ArmError>;

    fn tilt(&self) -> Result<(), ArmError>;

    fn nod(&self) -> Result<(), ArmError>;

    fn shake(&self) -> Result<(), ArmError>;

    /// Command a single axis.
    fn set_axis(&self, axis: Axis, value: Angle) -> Result<(), ArmError> {
        match axis {
            Axis::Pitch => self.set_pitch(value),
            Axis::Yaw => self.set_yaw(value),
            Axis::Roll => self.set_roll(value),
        }
    }

    /// Perform a discrete action.
    fn action(&self, action: ArmAction) -> Result<(), ArmError> {
        match action {
            ArmAction::Open => self.open_arm(),
            ArmAction::Close => self.close_arm(),
            ArmAction::Portrait => self.portrait(),
            ArmAction::Landscape => self.landscape(),
            ArmAction::Tilt => self.tilt(),
            ArmAction::Nod => self.nod(),
            ArmAction::Shake => self.shake(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Pose {
    pub fn new(pitch: Angle, yaw: Angle, roll: Angle) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Get the angle of one axis.
    pub fn get(&self, axis: Axis) -> Angle {
        match axis {
            Axis::Pitch => self.pitch,
            Axis::Yaw => self.yaw,
            Axis::Roll => self.roll,
        }
    }

    /// Set the angle of one axis.
    pub fn set(&mut self, axis: Axis, value: Angle) {
        match axis {
            Axis::Pitch => self.pitch = value,
            Axis::Yaw => self.yaw = value,
            Axis::Roll => self.roll = value,
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P: {} Y: {} R: {}", self.pitch, self.yaw, self.roll)
    }
}

impl Axis {
    /// All axes in pitch, yaw, roll order.
    pub const ALL: [Axis; 3] = [Axis::Pitch, Axis::Yaw, Axis::Roll];

    pub fn name(&self) -> &'static str {
        match self {
            Axis::Pitch => "pitch",
            Axis::Yaw => "yaw",
            Axis::Roll => "roll",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pitch" | "p" => Ok(Axis::Pitch),
            "yaw" | "y" => Ok(Axis::Yaw),
            "roll" | "r" => Ok(Axis::Roll),
            _ => Err(ParseAxisError(String::from(s))),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pose_axis_access() {
        let mut pose = Pose::new(10, -5, 0);

        assert_eq!(pose.get(Axis::Pitch), 10);
        assert_eq!(pose.get(Axis::Yaw), -5);
        assert_eq!(pose.get(Axis::Roll), 0);

        pose.set(Axis::Roll, 45);
        assert_eq!(pose, Pose::new(10, -5, 45));
        assert_eq!(pose.to_string(), "P: 10 Y: -5 R: 45");
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("pitch".parse::<Axis>(), Ok(Axis::Pitch));
        assert_eq!("Yaw".parse::<Axis>(), Ok(Axis::Yaw));
        assert_eq!("r".parse::<Axis>(), Ok(Axis::Roll));
        assert_eq!(
            "heading".parse::<Axis>(),
            Err(ParseAxisError(String::from("heading")))
        );
    }
}
