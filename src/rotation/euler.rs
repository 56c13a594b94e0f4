//! Euler-angle axis sequences and matrix extraction.
//!
//! This module implements the conversion engine between rotation matrices
//! and Euler-angle triples about arbitrary axis sequences, following
//! Shoemake's algorithm from Graphics Gems IV (pg. 222).
//!
//! An axis sequence is 3 letters from {X, Y, Z}: all uppercase for
//! rotations about the fixed global axes, all lowercase for rotations
//! about the body-fixed axes. Non-adjacent repeats are allowed ("XYX"),
//! adjacent repeats are not ("XXY").
//!
//! The extraction reduces every sequence to one of two canonical forms by
//! conjugating the rotation matrix with a permutation matrix: the
//! repeated-axis form (first and third axes equal) and the distinct-axis
//! form. Both have a singular configuration (gimbal lock) where only the
//! sum of the first and third angles is determined; there the third angle
//! is fixed at 0 and the first absorbs the combined rotation.

use crate::error::{RotationError, RotationResult};
use nalgebra::{Matrix3, Vector3};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Two angle configurations closer to singular than the square root of
/// this tolerance are treated as gimbal lock.
const SINGULAR_TOL: f64 = 1e-15;

/// One of the three coordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along this axis.
    pub fn unit_vector(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    fn from_letter(letter: char) -> Option<Axis> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            _ => None,
        }
    }

    fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

/// Frame the successive rotations are taken about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// Fixed global axes (uppercase sequence); composition `q3 * q2 * q1`.
    Global,
    /// Body-fixed axes (lowercase sequence); composition `q1 * q2 * q3`.
    Body,
}

/// A validated 3-axis Euler rotation sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisSequence {
    axes: [Axis; 3],
    frame: Frame,
}

impl AxisSequence {
    /// Global "XYZ", the canonical sequence used for rotation-matrix
    /// construction.
    pub(crate) const GLOBAL_XYZ: AxisSequence = AxisSequence {
        axes: [Axis::X, Axis::Y, Axis::Z],
        frame: Frame::Global,
    };

    /// Body "xyz", the roll-pitch-yaw convention.
    pub(crate) const BODY_XYZ: AxisSequence = AxisSequence {
        axes: [Axis::X, Axis::Y, Axis::Z],
        frame: Frame::Body,
    };

    /// Build a sequence from axes and frame.
    ///
    /// Fails if the same axis appears twice in succession.
    pub fn new(axes: [Axis; 3], frame: Frame) -> RotationResult<Self> {
        if axes[0] == axes[1] || axes[1] == axes[2] {
            return Err(RotationError::InvalidArgument(
                "cannot rotate about the same axis twice in succession".to_string(),
            ));
        }
        Ok(AxisSequence { axes, frame })
    }

    /// Parse a 3-letter axis string such as "XYZ", "zyx", or "XYX".
    ///
    /// # Arguments
    /// * `sequence` - Exactly 3 letters from {X, Y, Z}; all uppercase for
    ///   global axes or all lowercase for body-fixed axes; adjacent
    ///   repeated letters are rejected.
    pub fn parse(sequence: &str) -> RotationResult<Self> {
        let letters: Vec<char> = sequence.chars().collect();
        if letters.len() != 3 {
            return Err(RotationError::InvalidArgument(format!(
                "axis sequence '{sequence}' must contain exactly 3 letters"
            )));
        }

        let mut axes = [Axis::X; 3];
        for (slot, letter) in axes.iter_mut().zip(&letters) {
            *slot = Axis::from_letter(*letter).ok_or_else(|| {
                RotationError::InvalidArgument(format!(
                    "axis sequence '{sequence}' may only contain X/x, Y/y, or Z/z"
                ))
            })?;
        }

        let frame = if letters.iter().all(|letter| letter.is_ascii_uppercase()) {
            Frame::Global
        } else if letters.iter().all(|letter| letter.is_ascii_lowercase()) {
            Frame::Body
        } else {
            return Err(RotationError::InvalidArgument(format!(
                "axis sequence '{sequence}' must be either all uppercase or all lowercase"
            )));
        };

        Self::new(axes, frame)
    }

    /// The three rotation axes in application order.
    pub fn axes(&self) -> [Axis; 3] {
        self.axes
    }

    /// Whether the sequence is about global or body-fixed axes.
    pub fn frame(&self) -> Frame {
        self.frame
    }
}

impl FromStr for AxisSequence {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AxisSequence::parse(s)
    }
}

impl fmt::Display for AxisSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in self.axes {
            let letter = match self.frame {
                Frame::Global => axis.letter(),
                Frame::Body => axis.letter().to_ascii_lowercase(),
            };
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

/// True if the ordered axis pair is right-handed (XY, YZ, or ZX).
pub fn is_right_handed(first: Axis, second: Axis) -> bool {
    matches!(
        (first, second),
        (Axis::X, Axis::Y) | (Axis::Y, Axis::Z) | (Axis::Z, Axis::X)
    )
}

/// The axis not contained in the pair. The pair is distinct by sequence
/// validation.
fn remaining_axis(first: Axis, second: Axis) -> Axis {
    [Axis::X, Axis::Y, Axis::Z]
        .into_iter()
        .find(|axis| *axis != first && *axis != second)
        .unwrap_or(Axis::Z)
}

/// Permutation matrix mapping the canonical frame to the requested axis
/// ordering: rows are the unit vectors of the first two axes followed by
/// the unused one.
pub(crate) fn permutation_matrix(axes: &[Axis; 3]) -> Matrix3<f64> {
    let rows = [
        axes[0].unit_vector().transpose(),
        axes[1].unit_vector().transpose(),
        remaining_axis(axes[0], axes[1]).unit_vector().transpose(),
    ];
    Matrix3::from_rows(&rows)
}

/// Extract the Euler triple of `rotation` about `sequence`.
///
/// Conjugates the matrix into the canonical frame, runs the closed-form
/// extraction, then undoes the body-frame angle order and the handedness
/// of the axis pair.
pub(crate) fn angles_from_matrix(
    rotation: &Matrix3<f64>,
    sequence: &AxisSequence,
) -> (f64, f64, f64) {
    let body = sequence.frame == Frame::Body;
    let mut axes = sequence.axes;
    if body {
        // body-fixed angles are the global angles of the reversed sequence
        axes.reverse();
    }
    let same = axes[0] == axes[2];
    let right_handed = is_right_handed(axes[0], axes[1]);

    let p = permutation_matrix(&axes);
    let aligned = p * rotation * p.transpose();

    let (mut theta1, theta2, mut theta3) = extract_canonical(&aligned, same);

    if body {
        std::mem::swap(&mut theta1, &mut theta3);
    }
    if right_handed {
        (theta1, theta2, theta3)
    } else {
        (-theta1, -theta2, -theta3)
    }
}

/// Closed-form extraction from a canonically-aligned rotation matrix.
///
/// With `same` the first and third rotation axes coincide (proper Euler
/// form, canonical "XYX"); otherwise all three are distinct (Tait-Bryan
/// form, canonical "XYZ"). `acos`/`asin` arguments are clamped to [-1, 1]
/// against floating round-off.
fn extract_canonical(m: &Matrix3<f64>, same: bool) -> (f64, f64, f64) {
    let singular = SINGULAR_TOL.sqrt();

    if same {
        let theta2 = m[(0, 0)].clamp(-1.0, 1.0).acos();
        if theta2.sin().abs() < singular {
            // the first and third axes are (anti)parallel, so only the sum
            // theta1 + theta3 is determined; choose theta3 = 0 and solve
            // for theta1
            debug!(theta2, "gimbal lock in repeated-axis Euler extraction");
            let sign = comparison_sign(theta2.cos());
            let theta1 = (sign * m[(2, 1)]).atan2(m[(1, 1)]);
            (theta1, theta2, 0.0)
        } else {
            let sign = comparison_sign(theta2.sin());
            let theta1 = (sign * m[(0, 1)]).atan2(sign * m[(0, 2)]);
            let theta3 = (sign * m[(1, 0)]).atan2(-sign * m[(2, 0)]);
            (theta1, theta2, theta3)
        }
    } else {
        let theta2 = (-m[(2, 0)]).clamp(-1.0, 1.0).asin();
        if theta2.cos().abs() < singular {
            debug!(theta2, "gimbal lock in distinct-axis Euler extraction");
            let sign = comparison_sign(theta2.sin());
            let theta1 = (-m[(1, 2)]).atan2(sign * m[(0, 2)]);
            (theta1, theta2, 0.0)
        } else {
            let sign = comparison_sign(theta2.cos());
            let theta1 = (sign * m[(2, 1)]).atan2(sign * m[(2, 2)]);
            let theta3 = (sign * m[(1, 0)]).atan2(sign * m[(0, 0)]);
            (theta1, theta2, theta3)
        }
    }
}

/// Three-way comparison against zero as a multiplier (-1.0, 0.0, or 1.0).
fn comparison_sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RotationError;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-15;

    #[test]
    fn test_sequence_parse_global() {
        let seq = AxisSequence::parse("XYZ").unwrap();
        assert_eq!(seq.axes(), [Axis::X, Axis::Y, Axis::Z]);
        assert_eq!(seq.frame(), Frame::Global);
    }

    #[test]
    fn test_sequence_parse_body() {
        let seq = AxisSequence::parse("zyx").unwrap();
        assert_eq!(seq.axes(), [Axis::Z, Axis::Y, Axis::X]);
        assert_eq!(seq.frame(), Frame::Body);
    }

    #[test]
    fn test_sequence_parse_repeated_non_adjacent() {
        let seq = AxisSequence::parse("XYX").unwrap();
        assert_eq!(seq.axes(), [Axis::X, Axis::Y, Axis::X]);
    }

    #[test]
    fn test_sequence_rejects_wrong_length() {
        assert!(matches!(
            AxisSequence::parse("XY"),
            Err(RotationError::InvalidArgument(_))
        ));
        assert!(matches!(
            AxisSequence::parse("XYZX"),
            Err(RotationError::InvalidArgument(_))
        ));
        assert!(matches!(
            AxisSequence::parse(""),
            Err(RotationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sequence_rejects_bad_letters() {
        assert!(matches!(
            AxisSequence::parse("XYW"),
            Err(RotationError::InvalidArgument(_))
        ));
        assert!(matches!(
            AxisSequence::parse("ab1"),
            Err(RotationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sequence_rejects_mixed_case() {
        assert!(matches!(
            AxisSequence::parse("xYz"),
            Err(RotationError::InvalidArgument(_))
        ));
        assert!(matches!(
            AxisSequence::parse("Xyz"),
            Err(RotationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sequence_rejects_adjacent_repeats() {
        assert!(matches!(
            AxisSequence::parse("xxy"),
            Err(RotationError::InvalidArgument(_))
        ));
        assert!(matches!(
            AxisSequence::parse("XZZ"),
            Err(RotationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sequence_display_roundtrip() {
        for text in ["XYZ", "ZXZ", "xyx", "zyx"] {
            let seq: AxisSequence = text.parse().unwrap();
            assert_eq!(seq.to_string(), text);
        }
    }

    #[test]
    fn test_right_handed_pairs() {
        assert!(is_right_handed(Axis::X, Axis::Y));
        assert!(is_right_handed(Axis::Y, Axis::Z));
        assert!(is_right_handed(Axis::Z, Axis::X));
        assert!(!is_right_handed(Axis::Y, Axis::X));
        assert!(!is_right_handed(Axis::Z, Axis::Y));
        assert!(!is_right_handed(Axis::X, Axis::Z));
    }

    #[test]
    fn test_permutation_matrix_identity_for_xyz() {
        let p = permutation_matrix(&[Axis::X, Axis::Y, Axis::Z]);
        assert_eq!(p, Matrix3::identity());
    }

    #[test]
    fn test_permutation_matrix_rows() {
        // XZX: rows are X, Z, and the unused Y
        let p = permutation_matrix(&[Axis::X, Axis::Z, Axis::X]);
        let expected = Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0);
        assert_eq!(p, expected);
    }

    #[test]
    fn test_extract_single_axis_rotation() {
        // pure rotation about X by 0.7 rad, canonical Tait-Bryan form
        let angle: f64 = 0.7;
        let (sin, cos) = angle.sin_cos();
        let rx = Matrix3::new(1.0, 0.0, 0.0, 0.0, cos, -sin, 0.0, sin, cos);
        let (t1, t2, t3) = extract_canonical(&rx, false);
        assert!((t1 - angle).abs() < TOLERANCE);
        assert!(t2.abs() < TOLERANCE);
        assert!(t3.abs() < TOLERANCE);
    }

    #[test]
    fn test_extract_repeated_axis_identity_is_lock() {
        // the identity matrix is the theta2 = 0 singular case
        let (t1, t2, t3) = extract_canonical(&Matrix3::identity(), true);
        assert!(t1.abs() < TOLERANCE);
        assert!(t2.abs() < TOLERANCE);
        assert!(t3.abs() < TOLERANCE);
    }

    #[test]
    fn test_extract_clamps_out_of_domain() {
        // slightly super-unit entries from round-off must clamp, not panic
        let eps = 1e-16;
        let m = Matrix3::new(
            1.0 + eps,
            0.0,
            0.0,
            0.0,
            1.0 + eps,
            0.0,
            0.0,
            0.0,
            1.0 + eps,
        );
        let (t1, t2, t3) = extract_canonical(&m, true);
        assert!(t1.abs() < TOLERANCE);
        assert!(t2.abs() < TOLERANCE);
        assert!(t3.abs() < TOLERANCE);

        let m = Matrix3::new(0.0, 0.0, 1.0 + eps, 0.0, 1.0, 0.0, -1.0 - eps, 0.0, 0.0);
        let (_, t2, _) = extract_canonical(&m, false);
        assert!((t2 - PI / 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_angles_from_matrix_body_frame_swaps() {
        // a pure roll looks the same about body or global axes
        let angle: f64 = 0.4;
        let (sin, cos) = angle.sin_cos();
        let rx = Matrix3::new(1.0, 0.0, 0.0, 0.0, cos, -sin, 0.0, sin, cos);

        let body = AxisSequence::parse("xyz").unwrap();
        let (t1, t2, t3) = angles_from_matrix(&rx, &body);
        assert!((t1 - angle).abs() < TOLERANCE);
        assert!(t2.abs() < TOLERANCE);
        assert!(t3.abs() < TOLERANCE);

        let global = AxisSequence::parse("XYZ").unwrap();
        let (t1, t2, t3) = angles_from_matrix(&rx, &global);
        assert!((t1 - angle).abs() < TOLERANCE);
        assert!(t2.abs() < TOLERANCE);
        assert!(t3.abs() < TOLERANCE);
    }
}
