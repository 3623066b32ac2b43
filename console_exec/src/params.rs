//! # Console Executable Parameters
//!
//! This module provides parameters for the console executable, loaded from
//! `params/console_exec.toml`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use arm_if::eqpt::{Angle, Axis};
use serde::{Deserialize, Serialize};

use crate::axis_ctrl::{AxisParams, Direction};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleExecParams {
    /// Time between position polls.
    ///
    /// Units: seconds
    pub poll_period_s: f64,

    /// Time between renderer cycles, which is also the UI loop period.
    ///
    /// Units: seconds
    pub render_period_s: f64,

    /// Name of the position log file, created in the session directory.
    pub position_log_file: String,

    /// Slew limit of the simulated arm used when running offline, or `None` to move instantly.
    ///
    /// Units: degrees per poll
    #[serde(default)]
    pub sim_slew_deg: Option<Angle>,

    pub pitch: AxisParams,

    pub yaw: AxisParams,

    pub roll: AxisParams,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamsError {
    #[error("The {name} period must be positive and finite, found {value} s")]
    InvalidPeriod { name: &'static str, value: f64 },

    #[error("The position log file name is empty")]
    EmptyLogFile,

    #[error("Parameters for the {expected} control are labelled as {found}")]
    AxisMismatch { expected: Axis, found: Axis },

    #[error("The {axis} range is empty: min {min} is greater than max {max}")]
    InvalidRange { axis: Axis, min: Angle, max: Angle },

    #[error("The {direction} button of the {axis} control has a zero step")]
    ZeroStep { axis: Axis, direction: Direction },

    #[error("The {axis} control has more than one {direction} button")]
    DuplicateButton { axis: Axis, direction: Direction },

    #[error("The {direction} button is on both the {first} and {second} controls")]
    SharedDirection {
        direction: Direction,
        first: Axis,
        second: Axis,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ConsoleExecParams {
    fn default() -> Self {
        Self {
            poll_period_s: 0.1,
            render_period_s: 0.05,
            position_log_file: String::from("position_log.txt"),
            sim_slew_deg: None,
            pitch: AxisParams::default_pitch(),
            yaw: AxisParams::default_yaw(),
            roll: AxisParams::default_roll(),
        }
    }
}

impl ConsoleExecParams {
    /// Check the loaded parameters are usable.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("poll", self.poll_period_s),
            ("render", self.render_period_s),
        ]
        .iter()
        {
            if !value.is_finite() || *value <= 0.0 {
                return Err(ParamsError::InvalidPeriod {
                    name: *name,
                    value: *value,
                });
            }
        }

        if self.position_log_file.trim().is_empty() {
            return Err(ParamsError::EmptyLogFile);
        }

        let axes = self.axes();

        for (expected, params) in axes.iter() {
            if params.axis != *expected {
                return Err(ParamsError::AxisMismatch {
                    expected: *expected,
                    found: params.axis,
                });
            }
            params.validate()?;
        }

        // A direction may only belong to one control so step commands are unambiguous
        for direction in Direction::ALL.iter().copied() {
            let mut owners = axes
                .iter()
                .filter(|(_, p)| p.button(direction).is_some())
                .map(|(a, _)| *a);

            if let (Some(first), Some(second)) = (owners.next(), owners.next()) {
                return Err(ParamsError::SharedDirection {
                    direction,
                    first,
                    second,
                });
            }
        }

        Ok(())
    }

    fn axes(&self) -> [(Axis, &AxisParams); 3] {
        [
            (Axis::Pitch, &self.pitch),
            (Axis::Yaw, &self.yaw),
            (Axis::Roll, &self.roll),
        ]
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
