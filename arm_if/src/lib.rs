//! # Arm interface crate.
//!
//! Provides the interface between the operator console and the gimbal arm: pose types, the
//! arm controller capability and the commands the operator can issue.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Operator commands for the arm
pub mod tc;

/// Arm equipment interface and implementations
pub mod eqpt;
