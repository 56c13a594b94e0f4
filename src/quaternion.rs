//! General quaternion algebra.
//!
//! This module provides the plain quaternion `w + xi + yj + zk` as a value
//! type with the usual ring operations: addition, subtraction, negation,
//! scaling, the Hamilton product, conjugation, norm, inverse, and
//! normalization. Any 4 reals form a valid quaternion; the unit-norm
//! constraint used for rotations lives in
//! [`UnitQuaternion`](crate::rotation::UnitQuaternion).
//!
//! # Examples
//!
//! ```
//! use unit_quaternion::Quaternion;
//!
//! let q1 = Quaternion::new(1.0, 2.0, 3.0, 4.0);
//! let q2 = Quaternion::new(5.0, 6.0, 7.0, 8.0);
//!
//! // Hamilton product (non-commutative)
//! assert_eq!(q1 * q2, Quaternion::new(-60.0, 12.0, 30.0, 24.0));
//! ```

use nalgebra::Vector3;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A quaternion `scalar + vector · (i, j, k)` over `f64`.
///
/// Stored as a scalar part and a 3-vector part (the Euler parameters).
/// There is no norm invariant here. All operations return new values; the
/// only in-place mutation is [`Quaternion::set`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    scalar: f64,
    vector: Vector3<f64>,
}

impl Quaternion {
    /// Create a quaternion from its 4 components.
    ///
    /// # Arguments
    /// * `w` - Real (scalar) part
    /// * `x` - i component
    /// * `y` - j component
    /// * `z` - k component
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Quaternion {
            scalar: w,
            vector: Vector3::new(x, y, z),
        }
    }

    /// Create a quaternion from a scalar part and a vector part.
    pub fn from_parts(scalar: f64, vector: Vector3<f64>) -> Self {
        Quaternion { scalar, vector }
    }

    /// The zero quaternion (0, 0, 0, 0).
    pub fn zero() -> Self {
        Quaternion::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Overwrite all 4 components in place.
    pub fn set(&mut self, w: f64, x: f64, y: f64, z: f64) {
        self.scalar = w;
        self.vector = Vector3::new(x, y, z);
    }

    /// Get the scalar (real) part.
    #[inline]
    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    /// Get the vector (imaginary) part.
    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        self.vector
    }

    /// Get the scalar and vector parts as a pair.
    #[inline]
    pub fn parts(&self) -> (f64, Vector3<f64>) {
        (self.scalar, self.vector)
    }

    /// Get the real component w.
    #[inline]
    pub fn w(&self) -> f64 {
        self.scalar
    }

    /// Get the i component.
    #[inline]
    pub fn x(&self) -> f64 {
        self.vector.x
    }

    /// Get the j component.
    #[inline]
    pub fn y(&self) -> f64 {
        self.vector.y
    }

    /// Get the k component.
    #[inline]
    pub fn z(&self) -> f64 {
        self.vector.z
    }

    /// Squared magnitude of the quaternion.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.scalar * self.scalar + self.vector.norm_squared()
    }

    /// Magnitude of the quaternion.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Conjugate of the quaternion: `(w, -x, -y, -z)`.
    pub fn conjugate(&self) -> Self {
        Quaternion {
            scalar: self.scalar,
            vector: -self.vector,
        }
    }

    /// Multiplicative inverse: conjugate divided by the squared norm.
    ///
    /// Undefined for the zero quaternion (division by zero); callers must
    /// not invoke it on zero.
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.norm_squared()
    }

    /// Unit quaternion in the same direction: `self / self.norm()`.
    ///
    /// Undefined for the zero quaternion; callers must not invoke it on
    /// zero.
    pub fn normalized(&self) -> Self {
        *self / self.norm()
    }
}

impl Add for Quaternion {
    type Output = Quaternion;

    fn add(self, other: Quaternion) -> Quaternion {
        Quaternion {
            scalar: self.scalar + other.scalar,
            vector: self.vector + other.vector,
        }
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;

    fn sub(self, other: Quaternion) -> Quaternion {
        Quaternion {
            scalar: self.scalar - other.scalar,
            vector: self.vector - other.vector,
        }
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Quaternion {
        Quaternion {
            scalar: -self.scalar,
            vector: -self.vector,
        }
    }
}

impl Mul<f64> for Quaternion {
    type Output = Quaternion;

    fn mul(self, s: f64) -> Quaternion {
        Quaternion {
            scalar: self.scalar * s,
            vector: self.vector * s,
        }
    }
}

impl Div<f64> for Quaternion {
    type Output = Quaternion;

    fn div(self, s: f64) -> Quaternion {
        Quaternion {
            scalar: self.scalar / s,
            vector: self.vector / s,
        }
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product:
    /// `scalar = a.s * b.s - a.v · b.v`,
    /// `vector = a.s * b.v + b.s * a.v + a.v × b.v`.
    fn mul(self, other: Quaternion) -> Quaternion {
        Quaternion {
            scalar: self.scalar * other.scalar - self.vector.dot(&other.vector),
            vector: self.scalar * other.vector
                + other.scalar * self.vector
                + self.vector.cross(&other.vector),
        }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, [{}, {}, {}])",
            self.scalar, self.vector.x, self.vector.y, self.vector.z
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
