//! Quaternion arithmetic and unit-quaternion representations of 3D
//! spatial rotations.
//!
//! The crate provides two value types: [`Quaternion`], a plain
//! 4-component hypercomplex number with the usual algebra, and
//! [`UnitQuaternion`], a norm-1 quaternion representing a rotation with
//! bidirectional conversions to angle-axis pairs, Euler-angle triples
//! about arbitrary axis sequences (intrinsic or extrinsic, repeated axes
//! allowed), and 3×3 orthonormal rotation matrices.

pub mod error;
pub mod logger;
pub mod quaternion;
pub mod rotation;

pub use error::{RotationError, RotationResult};
pub use logger::{init_logger, init_logger_with_level};
pub use quaternion::Quaternion;
pub use rotation::euler::{Axis, AxisSequence, Frame};
pub use rotation::UnitQuaternion;
