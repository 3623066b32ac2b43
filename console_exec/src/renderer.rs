//! # Pose Renderer
//!
//! Consumer side of the pose queues, run once per UI cycle. When a complete pose is available
//! and it differs from the pose last drawn, the renderer appends a position log record and
//! redraws the 3D view.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::io::Write;

use arm_if::eqpt::Pose;
use log::{trace, warn};

use crate::{
    pose_queue::PoseReceiver,
    position_log::PositionLog,
    projector::{self, Wireframe},
};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Somewhere to draw wireframes, e.g. a 3D view.
pub trait WireframeSink {
    fn draw(&mut self, frame: &Wireframe);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct PoseRenderer<W: Write, S: WireframeSink> {
    receiver: PoseReceiver,

    log: PositionLog<W>,

    sink: S,

    /// The pose last drawn.
    rendered: Pose,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// What a render cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// At least one queue was empty, nothing was consumed.
    Idle,

    /// A pose was drained but matched the one already drawn.
    Unchanged(Pose),

    /// A new pose was drained, logged and drawn.
    Redrawn(Pose),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<W: Write, S: WireframeSink> PoseRenderer<W, S> {
    pub fn new(receiver: PoseReceiver, log: PositionLog<W>, sink: S) -> Self {
        Self {
            receiver,
            log,
            sink,
            rendered: Pose::default(),
        }
    }

    /// Run one render cycle.
    pub fn cycle(&mut self) -> RenderOutcome {
        let pose = match self.receiver.drain() {
            Some(p) => p,
            None => return RenderOutcome::Idle,
        };

        if pose == self.rendered {
            return RenderOutcome::Unchanged(pose);
        }

        self.rendered = pose;

        if let Err(e) = self.log.record(&pose) {
            warn!("Could not write to the position log: {}", e);
        }

        trace!("Redrawing at {}", pose);
        self.redraw();

        RenderOutcome::Redrawn(pose)
    }

    /// Draw the current pose without logging it.
    pub fn redraw(&mut self) {
        self.sink.draw(&projector::project(self.rendered));
    }

    /// The pose last drawn.
    pub fn rendered(&self) -> Pose {
        self.rendered
    }

    pub fn log(&self) -> &PositionLog<W> {
        &self.log
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        axis_ctrl::{AxisControls, AxisParams},
        notifications::NotificationLog,
        poller::PositionPoller,
        pose_queue::pose_channel,
    };
    use arm_if::eqpt::{ArmController, Axis, SimArm};
    use std::io;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<Wireframe>,
    }

    impl WireframeSink for RecordingSink {
        fn draw(&mut self, frame: &Wireframe) {
            self.frames.push(frame.clone());
        }
    }

    /// A writer that always fails.
    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn log_lines<S: WireframeSink>(r: &PoseRenderer<Vec<u8>, S>) -> Vec<String> {
        String::from_utf8(r.log().get_ref().clone())
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_idle_when_incomplete() {
        let (tx, rx) = pose_channel();
        let mut r = PoseRenderer::new(rx, PositionLog::new(Vec::new()), RecordingSink::default());

        assert_eq!(r.cycle(), RenderOutcome::Idle);

        tx.offer(Axis::Pitch, 10);
        tx.offer(Axis::Yaw, 10);
        assert_eq!(r.cycle(), RenderOutcome::Idle);

        assert!(r.sink().frames.is_empty());
        assert_eq!(r.log().num_records(), 0);
    }

    #[test]
    fn test_identical_poses_log_once() {
        let (tx, rx) = pose_channel();
        let mut r = PoseRenderer::new(rx, PositionLog::new(Vec::new()), RecordingSink::default());

        for _ in 0..5 {
            tx.publish(Pose::new(20, 0, 0));
            r.cycle();
        }

        assert_eq!(r.log().num_records(), 1);
        assert_eq!(r.sink().frames.len(), 1);
        assert_eq!(r.rendered(), Pose::new(20, 0, 0));
    }

    #[test]
    fn test_initial_zero_pose_is_not_logged() {
        let (tx, rx) = pose_channel();
        let mut r = PoseRenderer::new(rx, PositionLog::new(Vec::new()), RecordingSink::default());

        tx.publish(Pose::default());
        assert_eq!(r.cycle(), RenderOutcome::Unchanged(Pose::default()));
        assert_eq!(r.log().num_records(), 0);

        r.redraw();
        assert_eq!(r.sink().frames.len(), 1);
        assert_eq!(r.sink().frames[0].pose, Pose::default());
        assert_eq!(r.log().num_records(), 0);
    }

    #[test]
    fn test_connected_scenario() {
        let arm = Arc::new(SimArm::connected());
        let notes = Arc::new(NotificationLog::new());
        let controls = AxisControls::new(
            AxisParams::default_pitch(),
            AxisParams::default_yaw(),
            AxisParams::default_roll(),
            arm.clone(),
            notes.clone(),
        );
        let (tx, rx) = pose_channel();
        let mut poller =
            PositionPoller::new(arm.clone(), controls, notes, tx, Duration::from_millis(100));
        let mut r = PoseRenderer::new(rx, PositionLog::new(Vec::new()), RecordingSink::default());

        for pose in [
            Pose::new(10, -5, 0),
            Pose::new(10, -5, 0),
            Pose::new(12, -5, 0),
        ]
        .iter()
        {
            arm.push_reading(*pose);
            poller.cycle();
            r.cycle();
        }

        let lines = log_lines(&r);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - Position: P: 10 Y: -5 R: 0"));
        assert!(lines[1].ends_with(" - Position: P: 12 Y: -5 R: 0"));

        assert_eq!(r.sink().frames.len(), 2);
        assert_eq!(r.sink().frames[1], projector::project(Pose::new(12, -5, 0)));
        assert!(arm.sent().is_empty());
    }

    #[test]
    fn test_disconnected_scenario() {
        let arm = Arc::new(SimArm::new());
        let notes = Arc::new(NotificationLog::new());
        let controls = AxisControls::new(
            AxisParams::default_pitch(),
            AxisParams::default_yaw(),
            AxisParams::default_roll(),
            arm.clone(),
            notes.clone(),
        );
        let (tx, rx) = pose_channel();
        let mut poller = PositionPoller::new(
            arm.clone(),
            controls.clone(),
            notes,
            tx,
            Duration::from_millis(100),
        );
        let mut r = PoseRenderer::new(rx, PositionLog::new(Vec::new()), RecordingSink::default());

        controls.yaw.numeric_entry("40").unwrap();
        poller.cycle();

        assert_eq!(r.cycle(), RenderOutcome::Redrawn(Pose::new(0, 40, 0)));
        assert_eq!(log_lines(&r).len(), 1);
        assert!(arm.sent().is_empty());
    }

    #[test]
    fn test_failure_after_reconnect_logs_nothing_new() {
        let arm = Arc::new(SimArm::new());
        let notes = Arc::new(NotificationLog::new());
        let controls = AxisControls::new(
            AxisParams::default_pitch(),
            AxisParams::default_yaw(),
            AxisParams::default_roll(),
            arm.clone(),
            notes.clone(),
        );
        let (tx, rx) = pose_channel();
        let mut poller = PositionPoller::new(
            arm.clone(),
            controls.clone(),
            notes,
            tx,
            Duration::from_millis(100),
        );
        let mut r = PoseRenderer::new(rx, PositionLog::new(Vec::new()), RecordingSink::default());

        controls.yaw.numeric_entry("40").unwrap();
        poller.cycle();
        r.cycle();

        arm.connect().unwrap();
        arm.fail_next_updates(1);
        poller.cycle();
        assert_eq!(r.cycle(), RenderOutcome::Unchanged(Pose::new(0, 40, 0)));

        poller.cycle();
        assert_eq!(r.cycle(), RenderOutcome::Unchanged(Pose::new(0, 40, 0)));

        let lines = log_lines(&r);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(" - Position: P: 0 Y: 40 R: 0"));
        assert_eq!(r.sink().frames.len(), 1);
    }

    #[test]
    fn test_log_failure_does_not_stop_rendering() {
        let (tx, rx) = pose_channel();
        let mut r = PoseRenderer::new(rx, PositionLog::new(BrokenWriter), RecordingSink::default());

        tx.publish(Pose::new(5, 5, 5));
        assert_eq!(r.cycle(), RenderOutcome::Redrawn(Pose::new(5, 5, 5)));

        tx.publish(Pose::new(6, 5, 5));
        assert_eq!(r.cycle(), RenderOutcome::Redrawn(Pose::new(6, 5, 5)));

        assert_eq!(r.sink().frames.len(), 2);
    }
}
