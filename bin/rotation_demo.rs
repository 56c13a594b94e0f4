use clap::Parser;
use nalgebra::Vector3;
use tracing::info;
use unit_quaternion::{init_logger, RotationResult, UnitQuaternion};

#[derive(Parser)]
#[command(name = "rotation_demo")]
#[command(about = "Convert an angle-axis rotation into the other supported representations")]
struct Args {
    /// Rotation angle in radians
    #[arg(short, long, default_value = "1.5707963267948966")]
    angle: f64,

    /// Rotation axis components (need not be a unit vector)
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values = ["0.0", "0.0", "1.0"])]
    axis: Vec<f64>,

    /// Euler axis sequence, e.g. XYZ (global axes) or zyx (body axes)
    #[arg(short, long, default_value = "XYZ")]
    sequence: String,
}

fn main() -> RotationResult<()> {
    init_logger();
    let args = Args::parse();

    let axis = Vector3::new(args.axis[0], args.axis[1], args.axis[2]);
    let q = UnitQuaternion::from_angle_axis(args.angle, &axis)?;
    info!("quaternion: {q}");

    let (angle, unit_axis) = q.angle_axis();
    info!(
        "angle-axis: {angle:.6} rad about [{:.6}, {:.6}, {:.6}]",
        unit_axis.x, unit_axis.y, unit_axis.z
    );

    let (theta1, theta2, theta3) = q.euler(&args.sequence)?;
    info!(
        "euler {}: ({theta1:.6}, {theta2:.6}, {theta3:.6})",
        args.sequence
    );

    info!("rotation matrix: {}", q.rotation_matrix());

    let rotated = q.transform(&Vector3::x());
    info!(
        "x axis maps to [{:.6}, {:.6}, {:.6}]",
        rotated.x, rotated.y, rotated.z
    );

    Ok(())
}
