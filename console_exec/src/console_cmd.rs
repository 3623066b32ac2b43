//! # Console Commands
//!
//! Operator commands typed at the console prompt. Each command triggers the same handler the
//! matching widget would.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::str::FromStr;

use arm_if::{
    eqpt::{Angle, Axis},
    tc::arm_ctrl::ArmCmd,
};
use structopt::{clap::AppSettings, StructOpt};

use crate::axis_ctrl::Direction;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command entered by the operator.
#[derive(Debug, Clone, PartialEq, Eq, StructOpt)]
#[structopt(name = "console", setting = AppSettings::NoBinaryName)]
pub enum ConsoleCmd {
    /// Release an axis slider at the given value.
    #[structopt(name = "slide", setting = AppSettings::AllowNegativeNumbers)]
    Slide { axis: Axis, value: Angle },

    /// Type into an axis numeric box and move focus away, which validates and applies it.
    #[structopt(name = "type", setting = AppSettings::AllowLeadingHyphen)]
    Type { axis: Axis, text: String },

    /// Type into an axis numeric box without leaving it.
    #[structopt(name = "edit", setting = AppSettings::AllowLeadingHyphen)]
    Edit { axis: Axis, text: String },

    /// Press an axis spinbox arrow.
    #[structopt(name = "spin")]
    Spin { axis: Axis, arrow: SpinArrow },

    /// Press a directional step button.
    #[structopt(name = "move")]
    Move { direction: Direction },

    /// Press one of the arm action buttons.
    #[structopt(name = "arm")]
    Arm(ArmCmd),

    /// Open the connection to the arm.
    #[structopt(name = "connect")]
    Connect,

    /// Close the connection to the arm.
    #[structopt(name = "disconnect")]
    Disconnect,

    /// Pull the simulated arm's cable.
    #[structopt(name = "unplug")]
    Unplug,

    /// Plug the simulated arm's cable back in.
    #[structopt(name = "replug")]
    Replug,

    /// Print the console status.
    #[structopt(name = "status")]
    Status,

    /// Leave the console.
    #[structopt(name = "exit", alias = "quit")]
    Exit,
}

/// A spinbox arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinArrow {
    Up,
    Down,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ConsoleCmd {
    /// Parse a line typed at the prompt.
    ///
    /// Returns `Ok(None)` for blank lines. Errors carry clap's message, which also covers `help`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, structopt::clap::Error> {
        let words: Vec<&str> = line.split_whitespace().collect();

        if words.is_empty() {
            return Ok(None);
        }

        Self::from_iter_safe(words).map(Some)
    }
}

impl SpinArrow {
    /// Change applied by one press of the arrow.
    pub fn delta(&self) -> Angle {
        match self {
            SpinArrow::Up => 1,
            SpinArrow::Down => -1,
        }
    }
}

impl FromStr for SpinArrow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "+" => Ok(SpinArrow::Up),
            "down" | "-" => Ok(SpinArrow::Down),
            _ => Err(format!("Unknown spin arrow \"{}\", expected up or down", s)),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
