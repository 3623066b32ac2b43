//! Axis control module
//!
//! One interactive control per arm axis. Each control holds the value the operator sees in its
//! slider and numeric box, validates operator input against the axis bounds, applies the
//! directional step buttons and forwards accepted values to the arm.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use arm_if::eqpt::{Angle, Axis};
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during AxisCtrl operation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AxisCtrlError {
    #[error("Position input must be a number between {min} and {max}, got \"{text}\"")]
    InvalidEntry {
        text: String,
        min: Angle,
        max: Angle,
    },

    #[error("Can't move {0} any farther")]
    LimitReached(Direction),

    #[error("The {axis} control has no {direction} button")]
    NoButton { axis: Axis, direction: Direction },
}
