//! # Console command processor
//!
//! Executes operator commands against the UI loop's data store.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};

// Internal
use crate::{console_cmd::ConsoleCmd, data_store::DataStore};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute an operator command.
///
/// Rejections from the controls are reported through the notification area or the log by the
/// controls themselves, so nothing here is fatal.
pub fn exec(ds: &mut DataStore, cmd: &ConsoleCmd) {
    debug!("Console command: {:?}", cmd);

    match cmd {
        ConsoleCmd::Slide { axis, value } => {
            ds.controls.get(*axis).slider_released(*value);
        }
        ConsoleCmd::Type { axis, text } => {
            ds.controls.get(*axis).numeric_entry(text).ok();
        }
        ConsoleCmd::Edit { axis, text } => {
            ds.controls.get(*axis).edit_entry(text);
        }
        ConsoleCmd::Spin { axis, arrow } => {
            ds.controls.get(*axis).spin(arrow.delta());
        }
        ConsoleCmd::Move { direction } => match ds.controls.for_direction(*direction) {
            Some(control) => {
                control.press(*direction).ok();
            }
            None => warn!("No control has a {} button", direction),
        },
        ConsoleCmd::Arm(arm_cmd) => {
            ds.buttons.press(*arm_cmd);
        }
        ConsoleCmd::Connect => match ds.arm.connect() {
            Ok(()) => info!("Arm connected"),
            Err(e) => warn!("Could not connect to the arm: {}", e),
        },
        ConsoleCmd::Disconnect => {
            ds.arm.close();
            info!("Arm connection closed");
        }
        ConsoleCmd::Unplug => match ds.sim {
            Some(ref sim) => sim.unplug(),
            None => warn!("Only the simulated arm can be unplugged"),
        },
        ConsoleCmd::Replug => match ds.sim {
            Some(ref sim) => sim.replug(),
            None => warn!("Only the simulated arm can be plugged back in"),
        },
        ConsoleCmd::Status => {
            let s = ds.status_report();
            println!(
                "Connected: {}\nArm position: {}\nControls: {}\nJaw: {:?}, orientation: {:?}\n\
                Cycles: {}, session time: {:.01} s",
                s.connected,
                s.arm_pose
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| String::from("unknown")),
                s.displayed_pose,
                s.jaw,
                s.orientation,
                s.num_cycles,
                s.session_time_s
            );
        }
        ConsoleCmd::Exit => {
            info!("Exit requested");
            ds.exit_requested = true;
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        axis_ctrl::{AxisControls, AxisParams},
        control_buttons::JawState,
        notifications::NotificationLog,
    };
    use arm_if::{
        eqpt::{ArmAction, ArmController, Axis, Pose, SentCmd, SimArm},
        tc::arm_ctrl::ArmCmd,
    };
    use std::sync::Arc;

    fn data_store() -> (DataStore, Arc<SimArm>) {
        let sim = Arc::new(SimArm::new());
        let notes = Arc::new(NotificationLog::new());
        let controls = AxisControls::new(
            AxisParams::default_pitch(),
            AxisParams::default_yaw(),
            AxisParams::default_roll(),
            sim.clone(),
            notes.clone(),
        );

        (
            DataStore::new(sim.clone(), Some(sim.clone()), controls, notes),
            sim,
        )
    }

    fn run(ds: &mut DataStore, line: &str) {
        let cmd = ConsoleCmd::parse_line(line).unwrap().unwrap();
        exec(ds, &cmd);
    }

    #[test]
    fn test_commands_drive_controls() {
        let (mut ds, sim) = data_store();

        run(&mut ds, "connect");
        assert!(sim.is_connected());

        run(&mut ds, "slide pitch 40");
        run(&mut ds, "type yaw -30");
        run(&mut ds, "spin roll up");
        run(&mut ds, "move right");
        run(&mut ds, "arm toggle");

        assert_eq!(ds.controls.current_pose(), Pose::new(40, -10, 1));
        assert_eq!(ds.buttons.jaw(), JawState::Open);
        assert_eq!(
            sim.sent(),
            vec![
                SentCmd::SetAxis(Axis::Pitch, 40),
                SentCmd::SetAxis(Axis::Yaw, -30),
                SentCmd::SetAxis(Axis::Roll, 1),
                SentCmd::SetAxis(Axis::Yaw, -10),
                SentCmd::Action(ArmAction::Open),
            ]
        );
    }

    #[test]
    fn test_rejections_are_not_fatal() {
        let (mut ds, sim) = data_store();
        sim.connect().unwrap();

        run(&mut ds, "type pitch 200");
        run(&mut ds, "move down");

        assert_eq!(ds.controls.current_pose(), Pose::default());
        assert!(sim.sent().is_empty());
        assert_eq!(
            ds.notifications.lines(),
            vec!["Error: Can't Move Down Any Farther"]
        );
    }

    #[test]
    fn test_unplug_and_exit() {
        let (mut ds, sim) = data_store();

        run(&mut ds, "connect");
        run(&mut ds, "unplug");
        assert!(sim.update_position().is_err());

        run(&mut ds, "replug");
        assert!(sim.update_position().is_ok());

        run(&mut ds, "disconnect");
        assert!(!sim.is_connected());

        exec(&mut ds, &ConsoleCmd::Arm(ArmCmd::Nod));
        assert!(sim.sent().is_empty());

        run(&mut ds, "status");
        assert!(!ds.exit_requested);
        run(&mut ds, "exit");
        assert!(ds.exit_requested);
    }
}
