//! Unit quaternions representing 3D spatial rotations.
//!
//! A [`UnitQuaternion`] is a quaternion constrained to norm 1, encoding a
//! rotation by angle θ about the unit axis **a** as
//! `scalar = cos(θ/2)`, `vector = a·sin(θ/2)` (the Euler-Rodrigues
//! parameters). Every construction and mutation renormalizes, so the
//! invariant `scalar² + |vector|² = 1` holds within floating tolerance at
//! all times.
//!
//! Conversions are provided to and from angle-axis pairs, Euler-angle
//! triples about arbitrary axis sequences (see [`euler`]), and 3×3
//! orthonormal rotation matrices. Derived representations are recomputed
//! from the canonical (scalar, vector) form on demand; nothing is cached.
//!
//! # Examples
//!
//! ```
//! use std::f64::consts::FRAC_PI_2;
//! use nalgebra::Vector3;
//! use unit_quaternion::UnitQuaternion;
//!
//! let q = UnitQuaternion::from_angle_axis(FRAC_PI_2, &Vector3::z())?;
//! let v = q.transform(&Vector3::x());
//! assert!((v - Vector3::y()).norm() < 1e-15);
//! # Ok::<(), unit_quaternion::RotationError>(())
//! ```

pub mod euler;

use crate::error::{RotationError, RotationResult};
use crate::quaternion::Quaternion;
use euler::{Axis, AxisSequence, Frame};
use nalgebra::{Matrix3, Vector3};
use std::fmt;
use std::ops::Mul;

/// Tolerance for the elementwise orthonormality check on rotation-matrix
/// input.
const ORTHONORMAL_TOL: f64 = 1e-15;

/// Below this |sin(θ/2)| the rotation axis is undefined (identity or full
/// turn) and the convention axis (1, 0, 0) is returned.
const AXIS_TOL: f64 = 1e-15;

/// A quaternion of norm 1 representing a 3D rotation.
///
/// Wraps a [`Quaternion`] value; the unit invariant is restored by
/// renormalizing on every construction and mutation rather than by
/// rejecting non-unit input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitQuaternion {
    inner: Quaternion,
}

impl UnitQuaternion {
    /// The identity rotation (1, 0, 0, 0).
    pub fn identity() -> Self {
        UnitQuaternion {
            inner: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }

    /// Create a unit quaternion from 4 components, renormalizing if the
    /// input does not already have magnitude 1.
    ///
    /// Fails only when all components are zero, since the zero quaternion
    /// cannot be normalized.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> RotationResult<Self> {
        let raw = Quaternion::new(w, x, y, z);
        if raw.norm() == 0.0 {
            return Err(RotationError::InvalidArgument(
                "components must not all be zero".to_string(),
            ));
        }
        Ok(UnitQuaternion {
            inner: raw.normalized(),
        })
    }

    /// Overwrite the components in place, renormalizing.
    ///
    /// On failure the previous value is left untouched.
    pub fn set(&mut self, w: f64, x: f64, y: f64, z: f64) -> RotationResult<()> {
        *self = Self::new(w, x, y, z)?;
        Ok(())
    }

    /// Create a rotation of `angle` radians about `axis` (right-hand
    /// rule). The axis need not be a unit vector but must be nonzero.
    pub fn from_angle_axis(angle: f64, axis: &Vector3<f64>) -> RotationResult<Self> {
        let norm = axis.norm();
        if norm == 0.0 {
            return Err(RotationError::InvalidArgument(
                "axis must not be the zero vector".to_string(),
            ));
        }
        let half = angle / 2.0;
        Ok(UnitQuaternion {
            inner: Quaternion::from_parts(half.cos(), axis * (half.sin() / norm)),
        })
    }

    /// In-place variant of [`UnitQuaternion::from_angle_axis`].
    pub fn set_angle_axis(&mut self, angle: f64, axis: &Vector3<f64>) -> RotationResult<()> {
        *self = Self::from_angle_axis(angle, axis)?;
        Ok(())
    }

    /// Create a rotation from 3 Euler angles about the given axis
    /// sequence.
    ///
    /// # Arguments
    /// * `theta1`, `theta2`, `theta3` - Rotation angles in radians about
    ///   the first, second, and third axis of the sequence
    /// * `axes` - 3 letters from {X, Y, Z}: uppercase for fixed global
    ///   axes, lowercase for body-fixed axes; adjacent repeats rejected
    pub fn from_euler(theta1: f64, theta2: f64, theta3: f64, axes: &str) -> RotationResult<Self> {
        let sequence = AxisSequence::parse(axes)?;
        Ok(Self::compose_euler(theta1, theta2, theta3, &sequence))
    }

    /// In-place variant of [`UnitQuaternion::from_euler`].
    pub fn set_euler(
        &mut self,
        theta1: f64,
        theta2: f64,
        theta3: f64,
        axes: &str,
    ) -> RotationResult<()> {
        *self = Self::from_euler(theta1, theta2, theta3, axes)?;
        Ok(())
    }

    /// Create a rotation from a 3×3 orthonormal matrix.
    ///
    /// Fails when `‖R·Rᵗ − I‖` exceeds 1e-15 elementwise. The matrix is
    /// reduced to a global-"XYZ" Euler triple and reconstructed from it.
    pub fn from_rotation_matrix(matrix: &Matrix3<f64>) -> RotationResult<Self> {
        if !is_orthonormal(matrix, ORTHONORMAL_TOL) {
            return Err(RotationError::InvalidArgument(format!(
                "matrix is not orthonormal to within {ORTHONORMAL_TOL:e}"
            )));
        }
        let (theta1, theta2, theta3) =
            euler::angles_from_matrix(matrix, &AxisSequence::GLOBAL_XYZ);
        Ok(Self::compose_euler(
            theta1,
            theta2,
            theta3,
            &AxisSequence::GLOBAL_XYZ,
        ))
    }

    /// In-place variant of [`UnitQuaternion::from_rotation_matrix`].
    pub fn set_rotation_matrix(&mut self, matrix: &Matrix3<f64>) -> RotationResult<()> {
        *self = Self::from_rotation_matrix(matrix)?;
        Ok(())
    }

    /// Create a rotation from roll, pitch, and yaw angles: successive
    /// body-fixed rotations about x, then y, then z. Equivalent to
    /// `from_euler(roll, pitch, yaw, "xyz")`.
    pub fn from_roll_pitch_yaw(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self::compose_euler(roll, pitch, yaw, &AxisSequence::BODY_XYZ)
    }

    /// Generate a random rotation (useful for testing).
    pub fn random() -> Self {
        let axis = Vector3::new(
            rand::random::<f64>() * 2.0 - 1.0,
            rand::random::<f64>() * 2.0 - 1.0,
            rand::random::<f64>() * 2.0 - 1.0,
        );
        let angle = rand::random::<f64>() * 2.0 * std::f64::consts::PI;
        Self::from_angle_axis(angle, &axis).unwrap_or_else(|_| Self::identity())
    }

    /// Get the angle-axis representation `(angle, axis)`.
    ///
    /// The angle is `2·acos(scalar)` in [0, 2π]. When the rotation is the
    /// identity or a full turn the axis is undefined and (1, 0, 0) is
    /// returned by convention.
    pub fn angle_axis(&self) -> (f64, Vector3<f64>) {
        let angle = 2.0 * self.inner.scalar().clamp(-1.0, 1.0).acos();
        let half_sin = (angle / 2.0).sin();
        if half_sin.abs() < AXIS_TOL {
            (angle, Vector3::x())
        } else {
            (angle, self.inner.vector() / half_sin)
        }
    }

    /// Get the rotation angle in radians, in [0, 2π].
    pub fn angle(&self) -> f64 {
        2.0 * self.inner.scalar().clamp(-1.0, 1.0).acos()
    }

    /// Get the Euler angles of this rotation about the given axis
    /// sequence (same validation rules as [`UnitQuaternion::from_euler`]).
    ///
    /// Euler angles are not unique; in singular (gimbal-lock)
    /// configurations the third angle is fixed at 0 and the first absorbs
    /// the combined rotation.
    pub fn euler(&self, axes: &str) -> RotationResult<(f64, f64, f64)> {
        let sequence = AxisSequence::parse(axes)?;
        Ok(euler::angles_from_matrix(
            &self.rotation_matrix(),
            &sequence,
        ))
    }

    /// Get the roll, pitch, and yaw angles (body-fixed "xyz" convention).
    pub fn roll_pitch_yaw(&self) -> (f64, f64, f64) {
        euler::angles_from_matrix(&self.rotation_matrix(), &AxisSequence::BODY_XYZ)
    }

    /// Get the 3×3 rotation matrix of this quaternion.
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        let s = self.inner.scalar();
        let v = self.inner.vector();
        Matrix3::new(
            s * s + v.x * v.x - v.y * v.y - v.z * v.z,
            2.0 * (v.x * v.y - s * v.z),
            2.0 * (v.x * v.z + s * v.y),
            2.0 * (v.x * v.y + s * v.z),
            s * s - v.x * v.x + v.y * v.y - v.z * v.z,
            2.0 * (v.y * v.z - s * v.x),
            2.0 * (v.x * v.z - s * v.y),
            2.0 * (s * v.x + v.y * v.z),
            s * s - v.x * v.x - v.y * v.y + v.z * v.z,
        )
    }

    /// Rotate a vector: `rotation_matrix() · vec`.
    pub fn transform(&self, vec: &Vector3<f64>) -> Vector3<f64> {
        self.rotation_matrix() * vec
    }

    /// The inverse rotation. For a unit quaternion this is the conjugate.
    pub fn inverse(&self) -> Self {
        UnitQuaternion {
            inner: self.inner.conjugate(),
        }
    }

    /// Approximate equality accounting for the double cover (`q` and `-q`
    /// represent the same rotation).
    pub fn is_approx(&self, other: &Self, tolerance: f64) -> bool {
        (self.inner - other.inner).norm() < tolerance
            || (self.inner + other.inner).norm() < tolerance
    }

    /// Borrow the underlying quaternion value.
    #[inline]
    pub fn quaternion(&self) -> &Quaternion {
        &self.inner
    }

    /// Get the scalar (real) part.
    #[inline]
    pub fn scalar(&self) -> f64 {
        self.inner.scalar()
    }

    /// Get the vector (imaginary) part.
    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        self.inner.vector()
    }

    /// Get the real component w.
    #[inline]
    pub fn w(&self) -> f64 {
        self.inner.w()
    }

    /// Get the i component.
    #[inline]
    pub fn x(&self) -> f64 {
        self.inner.x()
    }

    /// Get the j component.
    #[inline]
    pub fn y(&self) -> f64 {
        self.inner.y()
    }

    /// Get the k component.
    #[inline]
    pub fn z(&self) -> f64 {
        self.inner.z()
    }

    /// Rotation of `angle` about a coordinate axis. Always unit norm, no
    /// renormalization needed.
    fn axis_rotation(angle: f64, axis: Axis) -> Self {
        let half = angle / 2.0;
        UnitQuaternion {
            inner: Quaternion::from_parts(half.cos(), axis.unit_vector() * half.sin()),
        }
    }

    /// Compose three single-axis rotations for a validated sequence:
    /// `q3·q2·q1` about global axes, `q1·q2·q3` about body axes.
    fn compose_euler(theta1: f64, theta2: f64, theta3: f64, sequence: &AxisSequence) -> Self {
        let [a1, a2, a3] = sequence.axes();
        let q1 = Self::axis_rotation(theta1, a1);
        let q2 = Self::axis_rotation(theta2, a2);
        let q3 = Self::axis_rotation(theta3, a3);
        match sequence.frame() {
            Frame::Global => q3 * q2 * q1,
            Frame::Body => q1 * q2 * q3,
        }
    }
}

impl Default for UnitQuaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for UnitQuaternion {
    type Output = UnitQuaternion;

    /// Hamilton product of two rotations, renormalized against
    /// floating-point drift.
    fn mul(self, other: UnitQuaternion) -> UnitQuaternion {
        UnitQuaternion {
            inner: (self.inner * other.inner).normalized(),
        }
    }
}

impl fmt::Display for UnitQuaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

/// Elementwise check that `mat.transpose() * mat` is the identity within
/// `tol`.
fn is_orthonormal(mat: &Matrix3<f64>, tol: f64) -> bool {
    let gram = mat.transpose() * mat;
    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            if (gram[(i, j)] - expected).abs() > tol {
                return false;
            }
        }
    }
    true
}

// ============================================================================
// Tests
// ============================================================================
