//! Property checks over randomly sampled rotations and motions
//!
//! Sampling uses a fixed seed so failures are reproducible. Set
//! `RUST_LOG=gyre_core=trace` to see the degenerate-input logging.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use gyre_core::{Angle, DualQuaternion, Mat3, Quaternion, Real, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const SAMPLES: usize = 500;

fn init() -> StdRng {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    StdRng::seed_from_u64(42)
}

fn random_vec(rng: &mut StdRng, extent: f64) -> Vec3<f64> {
    Vec3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

fn random_rotation(rng: &mut StdRng) -> Quaternion<f64> {
    loop {
        let axis = random_vec(rng, 1.0);
        if axis.length() > 0.1 {
            return Quaternion::from_axis_angle(axis, rng.gen_range(0.0..360.0));
        }
    }
}

fn random_motion(rng: &mut StdRng) -> (Quaternion<f64>, Vec3<f64>, DualQuaternion<f64>) {
    let rotation = random_rotation(rng);
    let translation = random_vec(rng, 10.0);
    let motion = DualQuaternion::from_rotation_translation(rotation, translation);
    (rotation, translation, motion)
}

#[test]
fn normalize_is_idempotent() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let raw = Quaternion::<f64>::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        );
        let unit = raw.unit();
        assert_relative_eq!(unit.length(), 1.0, epsilon = 1e-12);
        assert_eq!(unit.unit(), unit);

        let v = random_vec(&mut rng, 100.0).unit();
        assert_relative_eq!(v.length(), 1.0, epsilon = 1e-12);
        assert_eq!(v.unit(), v);
    }
}

#[test]
fn conjugate_is_inverse_for_unit() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let q = random_rotation(&mut rng);
        assert_eq!(q * q.conjugated(), Quaternion::identity());
        assert_eq!(q.conjugated(), q.inverse());
    }
}

#[test]
fn composition_is_associative() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let (a, b, c) = (
            random_rotation(&mut rng),
            random_rotation(&mut rng),
            random_rotation(&mut rng),
        );
        assert_eq!((a * b) * c, a * (b * c));

        let p = random_vec(&mut rng, 10.0);
        assert_eq!((a * b).rotate_point(p), a.rotate_point(b.rotate_point(p)));
    }
}

#[test]
fn rotate_point_matches_matrix() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let q = random_rotation(&mut rng);
        let p = random_vec(&mut rng, 10.0);
        assert_eq!(q.rotate_point(p), q.to_mat4().transform_point(p));
        assert_eq!(q.rotate_point(p), q.to_mat3() * p);
        assert_relative_eq!(q.rotate_point(p).length(), p.length(), epsilon = 1e-9);
    }
}

#[test]
fn matrix_extraction_recovers_rotation() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let q = random_rotation(&mut rng);
        let back = Quaternion::from_mat3(&q.to_mat3());
        assert!(back.angular_distance(&q).as_degrees() < 1e-5);
        assert_eq!(back.to_mat3(), q.to_mat3());
    }
    assert_eq!(Quaternion::<f64>::from_mat3(&Mat3::identity()), Quaternion::identity());
}

#[test]
fn euler_roundtrip_away_from_gimbal_lock() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let euler = Vec3::<f64>::new(
            rng.gen_range(-179.0..179.0),
            rng.gen_range(-85.0..85.0),
            rng.gen_range(-179.0..179.0),
        );
        let back = Quaternion::from_euler_vec(euler).to_euler();
        assert_abs_diff_eq!(back, euler, epsilon = 1e-8);
    }
}

#[test]
fn slerp_hits_endpoints_and_stays_unit() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let a = random_rotation(&mut rng);
        let b = random_rotation(&mut rng);
        let t = rng.gen_range(0.0..1.0);

        let mid = Quaternion::slerp(&a, &b, t);
        assert_relative_eq!(mid.length(), 1.0, epsilon = 1e-9);
        assert!(Quaternion::slerp(&a, &b, 0.0).angular_distance(&a).as_degrees() < 1e-5);
        assert!(Quaternion::slerp(&a, &b, 1.0).angular_distance(&b).as_degrees() < 1e-5);

        // Constant angular velocity along the shorter arc
        let total = a.angular_distance(&b).as_degrees();
        assert_relative_eq!(a.angular_distance(&mid).as_degrees(), total * t, epsilon = 1e-3);
    }
}

#[test]
fn dual_quaternion_matches_rotate_then_translate() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let (rotation, translation, motion) = random_motion(&mut rng);
        let p = random_vec(&mut rng, 10.0);
        assert_eq!(motion.transform_point(p), rotation.rotate_point(p) + translation);
        assert_eq!(motion.to_mat4().transform_point(p), motion.transform_point(p));
        assert_eq!(motion.translation(), translation);
    }
}

#[test]
fn dual_quaternion_composition_and_inverse() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let (_, _, a) = random_motion(&mut rng);
        let (_, _, b) = random_motion(&mut rng);
        let p = random_vec(&mut rng, 10.0);
        assert_eq!((a * b).transform_point(p), a.transform_point(b.transform_point(p)));
        assert_eq!(a.inverse().transform_point(a.transform_point(p)), p);
    }
}

#[test]
fn widening_is_exact_and_narrowing_bounded() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let x: f32 = rng.gen_range(-1.0e6..1.0e6);
        let wide: f64 = x.cast();
        assert_eq!(wide.cast::<f32>(), x);

        let y: f64 = rng.gen_range(-1.0e6..1.0e6);
        let back: f64 = y.cast::<f32>().cast();
        assert!((back - y).abs() <= y.abs() * f64::from(f32::EPSILON));
    }
}

#[test]
fn precision_conversion_keeps_rotation() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let q = random_rotation(&mut rng);
        let narrow = q.unit_as::<f32>();
        assert!(narrow.is_unit());
        let wide = narrow.as_precision::<f64>();
        assert!(wide.angular_distance(&q).as_degrees() < 0.01);

        let v = Vec3::new(0.1f32, -3.7, 1.0e3);
        assert_eq!(v.as_precision::<f64>().as_precision::<f32>().to_array(), v.to_array());
    }
}

#[test]
fn angle_wrapping_stays_in_range() {
    let mut rng = init();
    for _ in 0..SAMPLES {
        let a = Angle::<f64>::from_degrees(rng.gen_range(-5000.0..5000.0));
        let unsigned = a.normalized().as_radians();
        assert!((0.0..std::f64::consts::TAU).contains(&unsigned));

        let signed = a.normalized_signed().as_radians();
        assert!(signed > -std::f64::consts::PI - 1e-12 && signed <= std::f64::consts::PI + 1e-12);

        let b = Angle::from_degrees(rng.gen_range(-5000.0..5000.0));
        let step = a.delta_to(&b).as_degrees();
        assert!((-180.0 - 1e-9..=180.0 + 1e-9).contains(&step));
    }
}
