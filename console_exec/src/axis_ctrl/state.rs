//! Implementations for the AxisCtrl state structures

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard};

// Internal
use super::{AxisCtrlError, AxisParams, Direction};
use crate::notifications::Notifications;
use arm_if::eqpt::{Angle, ArmController, Axis, Pose};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A bounded control for one axis: a slider, a numeric box with spinbox arrows and any
/// directional step buttons.
///
/// The display state is locked internally, the position poller writes it from its own thread.
pub struct AxisControl {
    params: AxisParams,

    arm: Arc<dyn ArmController>,

    notifications: Arc<dyn Notifications>,

    state: Mutex<ControlState>,
}

/// What the operator currently sees on a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    /// The value last applied to the control.
    pub current: Angle,

    /// Slider position.
    pub slider: Angle,

    /// Contents of the numeric box, which may be a partial edit.
    pub entry_text: String,
}

/// The three axis controls of the console.
#[derive(Clone)]
pub struct AxisControls {
    pub pitch: Arc<AxisControl>,
    pub yaw: Arc<AxisControl>,
    pub roll: Arc<AxisControl>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ControlState {
    fn showing(value: Angle) -> Self {
        Self {
            current: value,
            slider: value,
            entry_text: value.to_string(),
        }
    }
}

impl AxisControl {
    /// Create a new control showing zero, or the nearest bound if zero is out of range.
    pub fn new(
        params: AxisParams,
        arm: Arc<dyn ArmController>,
        notifications: Arc<dyn Notifications>,
    ) -> Self {
        let initial = 0.max(params.min).min(params.max);

        Self {
            params,
            arm,
            notifications,
            state: Mutex::new(ControlState::showing(initial)),
        }
    }

    pub fn axis(&self) -> Axis {
        self.params.axis
    }

    pub fn params(&self) -> &AxisParams {
        &self.params
    }

    /// Copy of the display state.
    pub fn snapshot(&self) -> ControlState {
        self.state().clone()
    }

    /// The value last applied to the control.
    pub fn get_value(&self) -> Angle {
        self.state().current
    }

    /// Show a value on the slider and numeric box and make it current.
    ///
    /// Used to mirror readings from the arm. Nothing is clamped and no command is sent.
    pub fn set_value(&self, value: Angle) {
        *self.state() = ControlState::showing(value);
    }

    /// The integer in the numeric box.
    ///
    /// Falls back to the current value while the box holds something that is not an integer,
    /// e.g. an edit in progress.
    pub fn displayed_value(&self) -> Angle {
        let state = self.state();
        state.entry_text.trim().parse().unwrap_or(state.current)
    }

    /// Replace the numeric box contents without validating, as keystrokes do.
    pub fn edit_entry(&self, text: &str) {
        self.state().entry_text = String::from(text);
    }

    /// Slider released at `value`.
    ///
    /// The value is mirrored into the numeric box, made current and sent to the arm. Slider
    /// positions outside the axis range are clamped, the slider cannot reach them.
    pub fn slider_released(&self, value: Angle) -> Angle {
        let value = self.clamp(value);
        self.apply(value);
        value
    }

    /// The numeric box lost focus holding `text`.
    ///
    /// An integer within the axis range is mirrored onto the slider, made current and sent to
    /// the arm. Anything else restores the box to the current value and nothing is sent.
    pub fn numeric_entry(&self, text: &str) -> Result<Angle, AxisCtrlError> {
        match text.trim().parse::<Angle>() {
            Ok(v) if v >= self.params.min && v <= self.params.max => {
                self.apply(v);
                Ok(v)
            }
            _ => {
                let mut state = self.state();
                state.entry_text = state.current.to_string();
                drop(state);

                warn!(
                    "Error: Position input must be a number between {} and {}",
                    self.params.min, self.params.max
                );

                Err(AxisCtrlError::InvalidEntry {
                    text: String::from(text),
                    min: self.params.min,
                    max: self.params.max,
                })
            }
        }
    }

    /// Spinbox arrow pressed, moving the displayed value by `delta` within the axis range.
    pub fn spin(&self, delta: Angle) -> Angle {
        let value = self.clamp(self.displayed_value().saturating_add(delta));
        self.apply(value);
        value
    }

    /// Directional step button pressed.
    ///
    /// The step is applied to the displayed value. A press that would reach the button's limit
    /// is rejected with a notification and changes nothing.
    pub fn press(&self, direction: Direction) -> Result<Angle, AxisCtrlError> {
        let button = self
            .params
            .button(direction)
            .ok_or(AxisCtrlError::NoButton {
                axis: self.params.axis,
                direction,
            })?;

        let new = self.displayed_value().saturating_add(button.step);

        let blocked = if button.step > 0 {
            new >= button.limit
        } else {
            new <= button.limit
        };

        if blocked {
            self.notifications.append_line(&format!(
                "Error: Can't Move {} Any Farther",
                direction.label()
            ));
            return Err(AxisCtrlError::LimitReached(direction));
        }

        self.apply(new);
        Ok(new)
    }

    /// Show, make current and send.
    fn apply(&self, value: Angle) {
        self.set_value(value);
        self.send_command(value);
    }

    /// Send the value to the arm if it is connected. Failures are not retried.
    fn send_command(&self, value: Angle) {
        if !self.arm.is_connected() {
            debug!(
                "Arm not connected, {} command to {} not sent",
                self.params.axis, value
            );
            return;
        }

        if let Err(e) = self.arm.set_axis(self.params.axis, value) {
            warn!(
                "Could not send {} command to {}: {}",
                self.params.axis, value, e
            );
        }
    }

    fn clamp(&self, value: Angle) -> Angle {
        value.max(self.params.min).min(self.params.max)
    }

    fn state(&self) -> MutexGuard<'_, ControlState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AxisControls {
    pub fn new(
        pitch: AxisParams,
        yaw: AxisParams,
        roll: AxisParams,
        arm: Arc<dyn ArmController>,
        notifications: Arc<dyn Notifications>,
    ) -> Self {
        Self {
            pitch: Arc::new(AxisControl::new(
                pitch,
                arm.clone(),
                notifications.clone(),
            )),
            yaw: Arc::new(AxisControl::new(yaw, arm.clone(), notifications.clone())),
            roll: Arc::new(AxisControl::new(roll, arm, notifications)),
        }
    }

    pub fn get(&self, axis: Axis) -> &Arc<AxisControl> {
        match axis {
            Axis::Pitch => &self.pitch,
            Axis::Yaw => &self.yaw,
            Axis::Roll => &self.roll,
        }
    }

    /// The control owning the step button for `direction`, if any.
    pub fn for_direction(&self, direction: Direction) -> Option<&Arc<AxisControl>> {
        Axis::ALL
            .iter()
            .map(|a| self.get(*a))
            .find(|c| c.params().button(direction).is_some())
    }

    /// Values shown in the numeric boxes.
    pub fn displayed_pose(&self) -> Pose {
        Pose::new(
            self.pitch.displayed_value(),
            self.yaw.displayed_value(),
            self.roll.displayed_value(),
        )
    }

    /// Current values of the controls.
    pub fn current_pose(&self) -> Pose {
        Pose::new(
            self.pitch.get_value(),
            self.yaw.get_value(),
            self.roll.get_value(),
        )
    }

    /// Mirror a pose onto all three controls without sending anything.
    pub fn set_pose(&self, pose: Pose) {
        for axis in Axis::ALL.iter().copied() {
            self.get(axis).set_value(pose.get(axis));
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::notifications::NotificationLog;
    use arm_if::eqpt::{SentCmd, SimArm};

    fn controls(connected: bool) -> (AxisControls, Arc<SimArm>, Arc<NotificationLog>) {
        let arm = Arc::new(if connected {
            SimArm::connected()
        } else {
            SimArm::new()
        });
        let notes = Arc::new(NotificationLog::new());

        let controls = AxisControls::new(
            AxisParams::default_pitch(),
            AxisParams::default_yaw(),
            AxisParams::default_roll(),
            arm.clone(),
            notes.clone(),
        );

        (controls, arm, notes)
    }

    #[test]
    fn test_step_thresholds() {
        let (c, arm, notes) = controls(true);

        c.pitch.set_value(86);
        assert_eq!(
            c.pitch.press(Direction::Up),
            Err(AxisCtrlError::LimitReached(Direction::Up))
        );
        assert_eq!(c.pitch.get_value(), 86);

        c.yaw.set_value(75);
        assert!(c.yaw.press(Direction::Right).is_err());

        c.yaw.set_value(-75);
        assert!(c.yaw.press(Direction::Left).is_err());

        c.pitch.set_value(3);
        assert!(c.pitch.press(Direction::Down).is_err());

        // Exactly at the boundary is also rejected
        c.pitch.set_value(5);
        assert!(c.pitch.press(Direction::Down).is_err());
        assert_eq!(c.pitch.get_value(), 5);

        assert!(arm.sent().is_empty());
        assert_eq!(
            notes.lines(),
            vec![
                "Error: Can't Move Up Any Farther",
                "Error: Can't Move Right Any Farther",
                "Error: Can't Move Left Any Farther",
                "Error: Can't Move Down Any Farther",
                "Error: Can't Move Down Any Farther",
            ]
        );
    }

    #[test]
    fn test_step_applies_and_sends() {
        let (c, arm, notes) = controls(true);

        c.pitch.set_value(80);
        assert_eq!(c.pitch.press(Direction::Up), Ok(85));
        assert_eq!(
            c.pitch.snapshot(),
            ControlState {
                current: 85,
                slider: 85,
                entry_text: String::from("85"),
            }
        );

        c.yaw.set_value(-60);
        assert_eq!(c.yaw.press(Direction::Left), Ok(-80));

        assert_eq!(
            arm.sent(),
            vec![
                SentCmd::SetAxis(Axis::Pitch, 85),
                SentCmd::SetAxis(Axis::Yaw, -80),
            ]
        );
        assert!(notes.lines().is_empty());
    }

    #[test]
    fn test_step_uses_displayed_value() {
        let (c, _arm, _notes) = controls(false);

        c.yaw.edit_entry("10");
        assert_eq!(c.yaw.press(Direction::Right), Ok(30));
    }

    #[test]
    fn test_missing_button() {
        let (c, _arm, _notes) = controls(true);

        assert_eq!(
            c.roll.press(Direction::Up),
            Err(AxisCtrlError::NoButton {
                axis: Axis::Roll,
                direction: Direction::Up
            })
        );
        assert!(Arc::ptr_eq(
            c.for_direction(Direction::Down).unwrap(),
            &c.pitch
        ));
        assert!(Arc::ptr_eq(
            c.for_direction(Direction::Left).unwrap(),
            &c.yaw
        ));
    }

    #[test]
    fn test_invalid_entry_reverts() {
        let (c, arm, _notes) = controls(true);

        c.yaw.set_value(10);

        for text in ["abc", "95", "-91", "", "4.5"].iter() {
            assert!(matches!(
                c.yaw.numeric_entry(text),
                Err(AxisCtrlError::InvalidEntry { .. })
            ));
            assert_eq!(c.yaw.get_value(), 10);
            assert_eq!(c.yaw.snapshot().entry_text, "10");
        }

        assert!(arm.sent().is_empty());
    }

    #[test]
    fn test_valid_entry_is_sent() {
        let (c, arm, _notes) = controls(true);

        assert_eq!(c.yaw.numeric_entry(" -90 "), Ok(-90));
        assert_eq!(c.yaw.snapshot().slider, -90);
        assert_eq!(arm.sent(), vec![SentCmd::SetAxis(Axis::Yaw, -90)]);
    }

    #[test]
    fn test_disconnected_sends_nothing() {
        let (c, arm, _notes) = controls(false);

        assert_eq!(c.yaw.numeric_entry("40"), Ok(40));
        assert_eq!(c.pitch.slider_released(30), 30);
        assert_eq!(c.current_pose(), Pose::new(30, 40, 0));
        assert!(arm.sent().is_empty());
    }

    #[test]
    fn test_displayed_value_fallback() {
        let (c, _arm, _notes) = controls(false);

        c.roll.set_value(20);
        c.roll.edit_entry("2");
        assert_eq!(c.roll.displayed_value(), 2);

        c.roll.edit_entry("-");
        assert_eq!(c.roll.displayed_value(), 20);
        assert_eq!(c.displayed_pose(), Pose::new(0, 0, 20));
    }

    #[test]
    fn test_spin_and_slider_clamp() {
        let (c, arm, _notes) = controls(true);

        c.roll.set_value(89);
        assert_eq!(c.roll.spin(1), 90);
        assert_eq!(c.roll.spin(1), 90);
        assert_eq!(c.roll.spin(-1), 89);

        assert_eq!(c.yaw.slider_released(200), 90);

        assert_eq!(
            arm.sent(),
            vec![
                SentCmd::SetAxis(Axis::Roll, 90),
                SentCmd::SetAxis(Axis::Roll, 90),
                SentCmd::SetAxis(Axis::Roll, 89),
                SentCmd::SetAxis(Axis::Yaw, 90),
            ]
        );
    }

    #[test]
    fn test_set_value_is_unclamped_and_silent() {
        let (c, arm, _notes) = controls(true);

        c.set_pose(Pose::new(120, -5, 0));
        assert_eq!(c.current_pose(), Pose::new(120, -5, 0));
        assert!(arm.sent().is_empty());
    }
}
