//! # Equipment Interface
//!
//! This module defines the capability the console uses to talk to the arm, and the simulated
//! arm used when no hardware is attached.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod arm;
pub mod sim;

pub use arm::*;
pub use sim::{SentCmd, SimArm};
