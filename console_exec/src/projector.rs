//! # Pose Projector
//!
//! Maps a pose onto the line segments of a stylised arm and phone rig for the 3D view.
//!
//! The rig is made of:
//!     - a static base drawn in grey, unaffected by the pose,
//!     - the arm, two rails and two crossbars swept up by pitch,
//!     - a heading arrow from the phone pivot, oriented by yaw and pitch,
//!     - the phone rectangle, four edges rotated by roll about the heading axis,
//!     - a short arrow marking the top edge of the phone.
//!
//! Segments are given as an origin and a vector, the segment running from `origin` to
//! `origin + vector`. The scale constants fix the rig's proportions and must not be changed.
//!
//! Axis convention: x is left/right (the view's "front" label sits on x), y is front/back and z
//! is height.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::f64::consts::PI;

use arm_if::eqpt::Pose;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Extent of the 3D view the rig is designed for.
pub const VIEW_LIMITS: ViewLimits = ViewLimits {
    x: (-2.0, 2.0),
    y: (-2.0, 2.0),
    z: (0.0, 4.0),
};

/// Length of the arm rails.
const ARM_LENGTH: f64 = 2.0;

/// Distance from the arm root to the phone pivot along the arm.
const PIVOT_DIST: f64 = 1.75;

/// Length of the heading arrow.
const HEADING_LENGTH: f64 = 2.0;

const HEADING_ARROW_RATIO: f64 = 0.25;

const TOP_ARROW_RATIO: f64 = 0.5;

/// Static base, as (origin, vector) pairs. The first two are the long rails of the mount.
const BASE_SEGMENTS: [([f64; 3], [f64; 3]); 8] = [
    ([-1.0, 1.5, 0.0], [0.0, -3.0, 0.0]),
    ([1.0, 1.5, 0.0], [0.0, -3.0, 0.0]),
    ([-0.4, 1.5, 0.0], [0.0, -1.0, 0.0]),
    ([0.4, 1.5, 0.0], [0.0, -1.0, 0.0]),
    ([1.0, 1.5, 0.0], [-0.6, 0.0, 0.0]),
    ([-1.0, 1.5, 0.0], [0.6, 0.0, 0.0]),
    ([0.4, 0.5, 0.0], [-0.8, 0.0, 0.0]),
    ([1.0, -1.5, 0.0], [-2.0, 0.0, 0.0]),
];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Axis ranges of the 3D view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewLimits {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub z: (f64, f64),
}

/// One line segment of the wireframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Which part of the rig this segment belongs to.
    pub part: Part,

    pub origin: Point3<f64>,

    pub vector: Vector3<f64>,

    /// Length of the arrow head as a fraction of the segment length, zero for plain lines.
    pub arrow_ratio: f64,
}

/// The full set of segments for a pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wireframe {
    /// The pose this wireframe was projected from.
    pub pose: Pose,

    pub segments: Vec<Segment>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Parts of the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Part {
    Base,
    Arm,
    Heading,
    Phone,
    PhoneTop,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Project a pose onto the rig's wireframe.
pub fn project(pose: Pose) -> Wireframe {
    // Positive yaw turns the heading arrow the opposite way to the raw angle
    let yaw = -f64::from(pose.yaw).to_radians();
    let pitch = f64::from(pose.pitch).to_radians();
    let roll = f64::from(pose.roll).to_radians();

    let (sp, cp) = pitch.sin_cos();
    let (sy, cy) = yaw.sin_cos();
    let (sr, cr) = roll.sin_cos();

    let mut segments = Vec::with_capacity(BASE_SEGMENTS.len() + 10);

    // ---- BASE ----

    for (origin, vector) in BASE_SEGMENTS.iter() {
        segments.push(Segment::line(
            Part::Base,
            Point3::new(origin[0], origin[1], origin[2]),
            Vector3::new(vector[0], vector[1], vector[2]),
        ));
    }

    // ---- ARM ----

    let rail = Vector3::new(0.0, -cp, sp) * ARM_LENGTH;
    segments.push(Segment::line(Part::Arm, Point3::new(0.2, 1.0, 0.0), rail));
    segments.push(Segment::line(Part::Arm, Point3::new(-0.2, 1.0, 0.0), rail));
    segments.push(Segment::line(
        Part::Arm,
        Point3::new(0.2, 1.0, 0.0),
        Vector3::new(-0.4, 0.0, 0.0),
    ));
    segments.push(Segment::line(
        Part::Arm,
        Point3::new(0.2, -cp * 2.0 + 1.0, sp * 2.0),
        Vector3::new(-0.4, 0.0, 0.0),
    ));

    // ---- HEADING ----

    let pivot = Point3::new(0.0, -cp * PIVOT_DIST + 1.0, sp * PIVOT_DIST);

    segments.push(Segment::arrow(
        Part::Heading,
        pivot,
        Vector3::new(-sy, (pitch + PI).sin() * cy, (pitch + PI).cos() * cy) * HEADING_LENGTH,
        HEADING_ARROW_RATIO,
    ));

    // ---- PHONE ----

    let sr2 = sr * sr;
    let cr2 = cr * cr;

    // Corners of the phone the edges are drawn from, one near the top and one near the bottom.
    // The bottom formulas are the top ones with the roll terms' signs flipped.
    let top_corner = Point3::new(
        0.5 * cr + 0.75 * sr,
        -2.5 * cp + 1.25 * sr2 * cp + 1.0,
        -0.5 * sr * sp + (sp * 0.75) * cr + sp * 1.75,
    );
    let bottom_corner = Point3::new(
        -0.5 * cr + 0.75 * -sr,
        -1.0 * cp - 1.25 * sr2 * cp + 1.0,
        0.5 * sr * sp + (sp * 0.75) * -cr + sp * 1.75,
    );

    segments.push(Segment::line(
        Part::Phone,
        top_corner,
        Vector3::new(-1.0 * cr, -1.0 * sr2 * cp, 1.0 * sr * sp),
    ));
    segments.push(Segment::line(
        Part::Phone,
        top_corner,
        Vector3::new(-1.5 * sr, 1.5 * cr2 * cp, -1.5 * cr * sp),
    ));
    segments.push(Segment::line(
        Part::Phone,
        bottom_corner,
        Vector3::new(1.0 * cr, 1.0 * sr2 * cp, -1.0 * sr * sp),
    ));
    segments.push(Segment::line(
        Part::Phone,
        bottom_corner,
        Vector3::new(1.5 * sr, -1.5 * cr2 * cp, 1.5 * cr * sp),
    ));

    // ---- PHONE TOP ----

    segments.push(Segment::arrow(
        Part::PhoneTop,
        pivot,
        Vector3::new(0.75 * sr, -0.75 * cr * cp, 0.75 * cr * sp),
        TOP_ARROW_RATIO,
    ));

    Wireframe { pose, segments }
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Segment {
    fn line(part: Part, origin: Point3<f64>, vector: Vector3<f64>) -> Self {
        Self::arrow(part, origin, vector, 0.0)
    }

    fn arrow(part: Part, origin: Point3<f64>, vector: Vector3<f64>, arrow_ratio: f64) -> Self {
        Self {
            part,
            origin,
            vector,
            arrow_ratio,
        }
    }

    /// End point of the segment.
    pub fn end(&self) -> Point3<f64> {
        self.origin + self.vector
    }
}

impl Wireframe {
    /// Segments belonging to one part of the rig, in drawing order.
    pub fn part(&self, part: Part) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.part == part)
    }
}

impl Part {
    /// Suggested drawing colour as a hex string.
    pub fn colour(&self) -> &'static str {
        match self {
            Part::Base => "#727985",
            Part::Arm => "#a83e32",
            Part::Heading => "#32a852",
            Part::Phone => "#3e48d6",
            Part::PhoneTop => "#0917de",
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-9;

    fn assert_point_eq(actual: Point3<f64>, expected: [f64; 3]) {
        assert_abs_diff_eq!(actual.x, expected[0], epsilon = EPS);
        assert_abs_diff_eq!(actual.y, expected[1], epsilon = EPS);
        assert_abs_diff_eq!(actual.z, expected[2], epsilon = EPS);
    }

    fn assert_vector_eq(actual: Vector3<f64>, expected: [f64; 3]) {
        assert_abs_diff_eq!(actual.x, expected[0], epsilon = EPS);
        assert_abs_diff_eq!(actual.y, expected[1], epsilon = EPS);
        assert_abs_diff_eq!(actual.z, expected[2], epsilon = EPS);
    }

    #[test]
    fn test_segment_topology() {
        let frame = project(Pose::new(30, -20, 45));

        assert_eq!(frame.segments.len(), 18);
        assert_eq!(frame.part(Part::Base).count(), 8);
        assert_eq!(frame.part(Part::Arm).count(), 4);
        assert_eq!(frame.part(Part::Heading).count(), 1);
        assert_eq!(frame.part(Part::Phone).count(), 4);
        assert_eq!(frame.part(Part::PhoneTop).count(), 1);
        assert_eq!(frame.pose, Pose::new(30, -20, 45));
    }

    #[test]
    fn test_projection_is_deterministic() {
        for pose in [
            Pose::new(0, 0, 0),
            Pose::new(90, 90, 90),
            Pose::new(45, -90, 10),
            Pose::new(17, 33, 71),
        ]
        .iter()
        {
            assert_eq!(project(*pose), project(*pose));
        }
    }

    #[test]
    fn test_base_is_static() {
        let a = project(Pose::new(0, 0, 0));
        let b = project(Pose::new(80, -70, 60));

        let base_a: Vec<_> = a.part(Part::Base).collect();
        let base_b: Vec<_> = b.part(Part::Base).collect();
        assert_eq!(base_a, base_b);

        assert_point_eq(base_a[0].origin, [-1.0, 1.5, 0.0]);
        assert_point_eq(base_a[1].end(), [1.0, -1.5, 0.0]);
    }

    #[test]
    fn test_arm_sweeps_with_pitch() {
        // Flat arm lies along -y
        let flat = project(Pose::new(0, 0, 0));
        let rails: Vec<_> = flat.part(Part::Arm).collect();
        assert_point_eq(rails[0].end(), [0.2, -1.0, 0.0]);
        assert_point_eq(rails[1].end(), [-0.2, -1.0, 0.0]);
        assert_point_eq(rails[3].origin, [0.2, -1.0, 0.0]);

        // Raised arm points straight up
        let raised = project(Pose::new(90, 0, 0));
        let rails: Vec<_> = raised.part(Part::Arm).collect();
        assert_point_eq(rails[0].end(), [0.2, 1.0, 2.0]);
        assert_point_eq(rails[3].origin, [0.2, 1.0, 2.0]);
    }

    #[test]
    fn test_heading_and_phone_at_rest() {
        let frame = project(Pose::new(0, 0, 0));

        let heading = frame.part(Part::Heading).next().unwrap();
        assert_point_eq(heading.origin, [0.0, -0.75, 0.0]);
        assert_vector_eq(heading.vector, [0.0, 0.0, -2.0]);
        assert_abs_diff_eq!(heading.arrow_ratio, 0.25);

        let phone: Vec<_> = frame.part(Part::Phone).collect();
        assert_point_eq(phone[0].origin, [0.5, -1.5, 0.0]);
        assert_vector_eq(phone[0].vector, [-1.0, 0.0, 0.0]);
        assert_vector_eq(phone[1].vector, [0.0, 1.5, 0.0]);
        assert_point_eq(phone[2].origin, [-0.5, 0.0, 0.0]);
        assert_vector_eq(phone[2].vector, [1.0, 0.0, 0.0]);
        assert_vector_eq(phone[3].vector, [0.0, -1.5, 0.0]);

        let top = frame.part(Part::PhoneTop).next().unwrap();
        assert_point_eq(top.origin, [0.0, -0.75, 0.0]);
        assert_vector_eq(top.vector, [0.0, -0.75, 0.0]);
    }

    #[test]
    fn test_yaw_sign_is_inverted() {
        let left = project(Pose::new(0, 90, 0));
        let right = project(Pose::new(0, -90, 0));

        let h_left = left.part(Part::Heading).next().unwrap();
        let h_right = right.part(Part::Heading).next().unwrap();

        // Positive yaw swings the heading towards +x
        assert_vector_eq(h_left.vector, [2.0, 0.0, 0.0]);
        assert_vector_eq(h_right.vector, [-2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_roll_rotates_phone() {
        let frame = project(Pose::new(0, 0, 90));

        let phone: Vec<_> = frame.part(Part::Phone).collect();
        assert_point_eq(phone[0].origin, [0.75, -0.25, 0.0]);
        assert_vector_eq(phone[0].vector, [0.0, -1.0, 0.0]);
        assert_vector_eq(phone[1].vector, [-1.5, 0.0, 0.0]);
        assert_point_eq(phone[2].origin, [-0.75, -1.25, 0.0]);

        let top = frame.part(Part::PhoneTop).next().unwrap();
        assert_vector_eq(top.vector, [0.75, 0.0, 0.0]);
    }
}
