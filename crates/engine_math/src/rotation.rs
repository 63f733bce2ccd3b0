//! Euler angle / quaternion conversion.
//!
//! Script-facing rotations are Euler angles in **degrees**, packed per axis:
//! `x` is pitch (about X), `y` is yaw (about Y), `z` is roll (about Z). The
//! quaternion is composed Z·Y·X, so the Y angle is the middle one of the
//! decomposition and the one that hits gimbal lock at ±90°.

use glam::{Quat, Vec3};

/// Convert per-axis Euler angles in degrees into a unit quaternion.
///
/// Uses the half-angle formula: each axis angle is halved, its sine and
/// cosine are taken, and the three are combined directly into `w, x, y, z`.
#[must_use]
pub fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    let half = Vec3::new(
        degrees.x.to_radians(),
        degrees.y.to_radians(),
        degrees.z.to_radians(),
    ) * 0.5;

    let (sx, cx) = half.x.sin_cos();
    let (sy, cy) = half.y.sin_cos();
    let (sz, cz) = half.z.sin_cos();

    let w = cx * cy * cz + sx * sy * sz;
    let x = sx * cy * cz - cx * sy * sz;
    let y = cx * sy * cz + sx * cy * sz;
    let z = cx * cy * sz - sx * sy * cz;

    Quat::from_xyzw(x, y, z, w)
}

/// Convert a quaternion back into per-axis Euler angles in degrees.
///
/// The `asin` argument for the Y angle is clamped to `[-1, 1]`. At the poles
/// (`|sin| >= 1`) the Y angle is exactly ±90° by sign.
#[must_use]
pub fn quat_to_euler_degrees(q: Quat) -> Vec3 {
    let sinx_cosy = 2.0 * (q.w * q.x + q.y * q.z);
    let cosx_cosy = 1.0 - 2.0 * (q.x * q.x + q.y * q.y);
    let angle_x = sinx_cosy.atan2(cosx_cosy);

    let sin_y = 2.0 * (q.w * q.y - q.z * q.x);
    let angle_y = if sin_y.abs() >= 1.0 {
        std::f32::consts::FRAC_PI_2.copysign(sin_y)
    } else {
        sin_y.clamp(-1.0, 1.0).asin()
    };

    let sinz_cosy = 2.0 * (q.w * q.z + q.x * q.y);
    let cosz_cosy = 1.0 - 2.0 * (q.y * q.y + q.z * q.z);
    let angle_z = sinz_cosy.atan2(cosz_cosy);

    Vec3::new(
        angle_x.to_degrees(),
        angle_y.to_degrees(),
        angle_z.to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    use glam::EulerRot;

    use super::*;

    const EPS: f32 = 1e-3;

    fn assert_vec3_close(a: Vec3, b: Vec3) {
        assert!(
            a.abs_diff_eq(b, EPS),
            "expected {b:?}, got {a:?} (tolerance {EPS})"
        );
    }

    #[test]
    fn test_pitch_ninety_example() {
        let q = euler_degrees_to_quat(Vec3::new(90.0, 0.0, 0.0));
        let half_sqrt2 = std::f32::consts::FRAC_1_SQRT_2;
        assert!((q.w - half_sqrt2).abs() < EPS);
        assert!((q.x - half_sqrt2).abs() < EPS);
        assert!(q.y.abs() < EPS);
        assert!(q.z.abs() < EPS);

        assert_vec3_close(quat_to_euler_degrees(q), Vec3::new(90.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_is_identity() {
        let q = euler_degrees_to_quat(Vec3::ZERO);
        assert!(q.abs_diff_eq(Quat::IDENTITY, EPS));
        assert_vec3_close(quat_to_euler_degrees(Quat::IDENTITY), Vec3::ZERO);
    }

    #[test]
    fn test_output_is_unit_length() {
        let q = euler_degrees_to_quat(Vec3::new(33.0, -71.0, 140.0));
        assert!((q.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_matches_glam_zyx_composition() {
        let degrees = Vec3::new(25.0, -40.0, 110.0);
        let expected = Quat::from_euler(
            EulerRot::ZYX,
            degrees.z.to_radians(),
            degrees.y.to_radians(),
            degrees.x.to_radians(),
        );
        let q = euler_degrees_to_quat(degrees);
        assert!(q.abs_diff_eq(expected, EPS), "{q:?} != {expected:?}");
    }

    #[test]
    fn test_roundtrip_away_from_pole() {
        let samples = [
            Vec3::new(10.0, 20.0, 30.0),
            Vec3::new(-45.0, 60.0, -120.0),
            Vec3::new(170.0, -85.0, 5.0),
            Vec3::new(0.0, 80.0, 0.0),
            Vec3::new(-179.0, 0.0, 179.0),
        ];
        for euler in samples {
            let back = quat_to_euler_degrees(euler_degrees_to_quat(euler));
            assert_vec3_close(back, euler);
        }
    }

    #[test]
    fn test_quat_roundtrip_from_axis_angle() {
        let axes = [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::new(1.0, 1.0, 0.0).normalize(),
            Vec3::new(1.0, -2.0, 3.0).normalize(),
        ];
        for axis in axes {
            for degrees in [30.0_f32, 120.0, -135.0, 170.0] {
                let q = Quat::from_axis_angle(axis, degrees.to_radians());
                let back = euler_degrees_to_quat(quat_to_euler_degrees(q));
                assert!(
                    back.abs_diff_eq(q, EPS) || back.abs_diff_eq(-q, EPS),
                    "axis {axis:?}, {degrees} deg: {q:?} came back as {back:?}"
                );
            }
        }
    }

    #[test]
    fn test_yaw_past_ninety_decomposes_through_roll_and_pitch() {
        let euler = quat_to_euler_degrees(Quat::from_rotation_y(120f32.to_radians()));
        assert_vec3_close(euler, Vec3::new(180.0, 60.0, 180.0));
    }

    #[test]
    fn test_pole_is_clamped_to_ninety() {
        // f32 rounding leaves the asin argument a hair under 1 here.
        const POLE_EPS: f32 = 0.05;
        let q = euler_degrees_to_quat(Vec3::new(0.0, 90.0, 0.0));
        let euler = quat_to_euler_degrees(q);
        assert!((euler.y - 90.0).abs() < POLE_EPS);

        let q = euler_degrees_to_quat(Vec3::new(0.0, -90.0, 0.0));
        let euler = quat_to_euler_degrees(q);
        assert!((euler.y + 90.0).abs() < POLE_EPS);
    }

    #[test]
    fn test_unnormalised_pole_does_not_produce_nan() {
        // Slightly over-long quaternion pushes the asin argument past 1.
        let q = Quat::from_xyzw(0.0, 0.7072, 0.0, 0.7072);
        let euler = quat_to_euler_degrees(q);
        assert!(!euler.is_nan());
        assert!((euler.y - 90.0).abs() < 1e-4);

        let q = Quat::from_xyzw(0.0, -0.7072, 0.0, 0.7072);
        let euler = quat_to_euler_degrees(q);
        assert!(!euler.is_nan());
        assert!((euler.y + 90.0).abs() < 1e-4);
    }
}
