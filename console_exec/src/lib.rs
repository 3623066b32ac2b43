//! # Console library.
//!
//! The position synchronisation and render pipeline of the gimbal arm operator console, split
//! out of the executable so it can be exercised without a terminal.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Axis controls - one bounded slider/numeric box/step button group per arm axis
pub mod axis_ctrl;

/// Console command processor - applies operator commands to the data store
pub mod cmd_processor;

/// Console commands - parsing of lines typed at the operator prompt
pub mod console_cmd;

/// Control buttons - clamp, orientation and gesture actions
pub mod control_buttons;

pub mod data_store;

/// Notification area shown to the operator
pub mod notifications;

pub mod params;

/// Position poller - background sampling of the arm pose
pub mod poller;

/// Single-slot per-axis queues between the poller and the renderer
pub mod pose_queue;

/// Position log - one record per rendered pose change
pub mod position_log;

/// Pose projector - maps a pose onto the 3D wireframe
pub mod projector;

/// Pose renderer - drains the pose queues, logs changes and redraws
pub mod renderer;
