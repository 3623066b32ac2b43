//! # Telecommand module
//!
//! Commands issued by the operator which map directly onto arm actions.

pub mod arm_ctrl;
