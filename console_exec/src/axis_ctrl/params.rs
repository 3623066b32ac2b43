//! Parameters structure for AxisCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt;
use std::str::FromStr;

use arm_if::eqpt::{Angle, Axis};
use serde::{Deserialize, Serialize};

use crate::params::ParamsError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for a single axis control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisParams {
    /// The axis this control drives.
    pub axis: Axis,

    /// Label shown next to the control.
    pub label: String,

    /// Lowest value accepted from the numeric box and the spinbox arrows.
    ///
    /// Units: degrees
    pub min: Angle,

    /// Highest value accepted from the numeric box and the spinbox arrows.
    ///
    /// Units: degrees
    pub max: Angle,

    /// Directional step buttons moving this axis.
    #[serde(default)]
    pub buttons: Vec<StepButton>,
}

/// A directional button moving an axis by a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepButton {
    pub direction: Direction,

    /// Change applied to the displayed value on each press.
    ///
    /// Units: degrees
    pub step: Angle,

    /// Exclusive bound on the value a press may produce. The press is rejected once the new value
    /// would reach it.
    ///
    /// Units: degrees
    pub limit: Angle,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Direction of a step button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AxisParams {
    /// Pitch control: [0, 90], up and down buttons in steps of 5.
    ///
    /// The down button stops at 0 rather than the axis minimum, which keeps the arm off its
    /// end stop.
    pub fn default_pitch() -> Self {
        Self {
            axis: Axis::Pitch,
            label: String::from("Pitch"),
            min: 0,
            max: 90,
            buttons: vec![
                StepButton {
                    direction: Direction::Up,
                    step: 5,
                    limit: 90,
                },
                StepButton {
                    direction: Direction::Down,
                    step: -5,
                    limit: 0,
                },
            ],
        }
    }

    /// Yaw control: [-90, 90], left and right buttons in steps of 20.
    pub fn default_yaw() -> Self {
        Self {
            axis: Axis::Yaw,
            label: String::from("Yaw"),
            min: -90,
            max: 90,
            buttons: vec![
                StepButton {
                    direction: Direction::Right,
                    step: 20,
                    limit: 90,
                },
                StepButton {
                    direction: Direction::Left,
                    step: -20,
                    limit: -90,
                },
            ],
        }
    }

    /// Roll control: [0, 90], no buttons.
    pub fn default_roll() -> Self {
        Self {
            axis: Axis::Roll,
            label: String::from("Roll"),
            min: 0,
            max: 90,
            buttons: Vec::new(),
        }
    }

    /// The button for the given direction, if this control has one.
    pub fn button(&self, direction: Direction) -> Option<&StepButton> {
        self.buttons.iter().find(|b| b.direction == direction)
    }

    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.min > self.max {
            return Err(ParamsError::InvalidRange {
                axis: self.axis,
                min: self.min,
                max: self.max,
            });
        }

        for (i, button) in self.buttons.iter().enumerate() {
            if button.step == 0 {
                return Err(ParamsError::ZeroStep {
                    axis: self.axis,
                    direction: button.direction,
                });
            }

            if self.buttons[..i]
                .iter()
                .any(|b| b.direction == button.direction)
            {
                return Err(ParamsError::DuplicateButton {
                    axis: self.axis,
                    direction: button.direction,
                });
            }
        }

        Ok(())
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Capitalised name, as printed on the button.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(format!(
                "Unknown direction \"{}\", expected one of up, down, left or right",
                s
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        for p in [
            AxisParams::default_pitch(),
            AxisParams::default_yaw(),
            AxisParams::default_roll(),
        ]
        .iter()
        {
            assert!(p.validate().is_ok());
        }

        let pitch = AxisParams::default_pitch();
        assert_eq!(pitch.button(Direction::Down).unwrap().limit, 0);
        assert!(pitch.button(Direction::Left).is_none());
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let mut p = AxisParams::default_yaw();
        p.min = 100;
        assert!(matches!(
            p.validate(),
            Err(ParamsError::InvalidRange { axis: Axis::Yaw, .. })
        ));

        let mut p = AxisParams::default_yaw();
        p.buttons[0].step = 0;
        assert!(matches!(p.validate(), Err(ParamsError::ZeroStep { .. })));

        let mut p = AxisParams::default_pitch();
        p.buttons[1].direction = Direction::Up;
        assert!(matches!(
            p.validate(),
            Err(ParamsError::DuplicateButton {
                direction: Direction::Up,
                ..
            })
        ));
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("Up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Right.to_string(), "Right");
    }
}
