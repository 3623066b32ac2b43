//! # Arm control telecommands
//!
//! Discrete commands behind the console's action buttons.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::eqpt::arm::ArmAction;
use serde::{Deserialize, Serialize};
use structopt::StructOpt;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A discrete command for the arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, StructOpt)]
pub enum ArmCmd {
    /// Open the phone clamp.
    #[structopt(name = "open")]
    Open,

    /// Close the phone clamp.
    #[structopt(name = "close")]
    Close,

    /// Open the clamp if it is closed, close it otherwise.
    #[structopt(name = "toggle")]
    Toggle,

    /// Rotate the phone to portrait orientation.
    #[structopt(name = "portrait")]
    Portrait,

    /// Rotate the phone to landscape orientation.
    #[structopt(name = "landscape")]
    Landscape,

    /// Tilt the "head" to one side and back.
    #[structopt(name = "tilt")]
    Tilt,

    /// Nod the "head".
    #[structopt(name = "nod")]
    Nod,

    /// Shake the "head".
    #[structopt(name = "shake")]
    Shake,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ArmCmd {
    /// The arm action this command maps onto.
    ///
    /// `Toggle` depends on the clamp state and so has no fixed action.
    pub fn action(&self) -> Option<ArmAction> {
        match self {
            ArmCmd::Open => Some(ArmAction::Open),
            ArmCmd::Close => Some(ArmAction::Close),
            ArmCmd::Toggle => None,
            ArmCmd::Portrait => Some(ArmAction::Portrait),
            ArmCmd::Landscape => Some(ArmAction::Landscape),
            ArmCmd::Tilt => Some(ArmAction::Tilt),
            ArmCmd::Nod => Some(ArmAction::Nod),
            ArmCmd::Shake => Some(ArmAction::Shake),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
