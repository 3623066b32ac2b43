//! # Control Buttons
//!
//! The console's discrete action buttons: clamp open/close, phone orientation and the head
//! gestures. Presses are forwarded to the arm only while it is connected.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::sync::Arc;

use arm_if::{
    eqpt::{ArmAction, ArmController},
    tc::arm_ctrl::ArmCmd,
};
use log::{info, warn};
use serde::Serialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct ControlButtons {
    arm: Arc<dyn ArmController>,

    jaw: JawState,

    orientation: Orientation,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// State of the phone clamp as last commanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JawState {
    Open,
    Closed,
}

/// Orientation of the phone as last commanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ControlButtons {
    /// The arm is assumed to start closed and in portrait.
    pub fn new(arm: Arc<dyn ArmController>) -> Self {
        Self {
            arm,
            jaw: JawState::Closed,
            orientation: Orientation::Portrait,
        }
    }

    pub fn jaw(&self) -> JawState {
        self.jaw
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Handle a button press.
    ///
    /// Returns the action sent to the arm, or `None` if nothing was sent.
    pub fn press(&mut self, cmd: ArmCmd) -> Option<ArmAction> {
        let action = match cmd.action() {
            Some(a) => a,
            None => match self.jaw {
                JawState::Closed => ArmAction::Open,
                JawState::Open => ArmAction::Close,
            },
        };

        if !self.arm.is_connected() {
            return None;
        }

        if let Err(e) = self.arm.action(action) {
            warn!("Could not send {:?} to the arm: {}", action, e);
            return None;
        }

        info!("Arm action {:?} sent", action);

        match action {
            ArmAction::Open => self.jaw = JawState::Open,
            ArmAction::Close => self.jaw = JawState::Closed,
            ArmAction::Portrait => self.orientation = Orientation::Portrait,
            ArmAction::Landscape => self.orientation = Orientation::Landscape,
            ArmAction::Tilt | ArmAction::Nod | ArmAction::Shake => (),
        }

        Some(action)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
