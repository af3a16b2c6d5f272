//! Algebraic properties of the transforms, checked over randomized inputs.

use std::f64::consts::{PI, TAU};

use approx::{assert_abs_diff_eq, assert_relative_eq};
use kiln_linalg::{vec3, Mat3, Mat4, Matrix, Vec3};

const ITERATIONS: usize = 200;

fn range(rng: &mut fastrand::Rng, min: f64, max: f64) -> f64 {
    min + rng.f64() * (max - min)
}

fn random_vec3(rng: &mut fastrand::Rng, extent: f64) -> Vec3<f64> {
    vec3(
        range(rng, -extent, extent),
        range(rng, -extent, extent),
        range(rng, -extent, extent),
    )
}

fn random_matrix(rng: &mut fastrand::Rng) -> Mat4<f64> {
    Matrix::from_fn(|_, _| range(rng, -10.0, 10.0))
}

/// A model matrix composed from elementary transforms with non-zero scale factors.
fn random_model(rng: &mut fastrand::Rng) -> Mat4<f64> {
    let t = random_vec3(rng, 100.0);
    let scale = |rng: &mut fastrand::Rng| {
        let s = range(rng, 0.25, 4.0);
        if rng.bool() {
            s
        } else {
            -s
        }
    };
    Mat4::translation(t.x, t.y, t.z)
        .rotate_x(range(rng, -TAU, TAU))
        .rotate_y(range(rng, -TAU, TAU))
        .rotate_z(range(rng, -TAU, TAU))
        .scale(scale(rng), scale(rng), scale(rng))
}

#[test]
fn rotation_z_maps_x_onto_unit_circle() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0001);
    for _ in 0..ITERATIONS {
        let angle = range(&mut rng, -4.0 * PI, 4.0 * PI);
        let v = Mat4::rotation_z(angle).transform_vector(Vec3::X);
        assert_abs_diff_eq!(v, vec3(angle.cos(), angle.sin(), 0.0), epsilon = 1e-12);
    }
}

#[test]
fn rotations_are_periodic() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0002);
    for _ in 0..ITERATIONS {
        let angle = range(&mut rng, -PI, PI);
        assert_abs_diff_eq!(
            Mat4::rotation_x(angle),
            Mat4::rotation_x(angle + TAU),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Mat3::rotation(angle),
            Mat3::rotation(angle - TAU),
            epsilon = 1e-12
        );
    }
}

#[test]
fn identity_is_neutral() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0003);
    for _ in 0..ITERATIONS {
        let m = random_matrix(&mut rng);
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::scaling(1.0, 1.0, 1.0), m);
        assert_eq!(Mat4::translation(0.0, 0.0, 0.0) * m, m);
    }
}

#[test]
fn transpose_is_an_involution() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0004);
    for _ in 0..ITERATIONS {
        let m = random_matrix(&mut rng);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose()[(1, 3)], m[(3, 1)]);
    }
}

#[test]
fn inverse_of_model_matrices() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0005);
    for _ in 0..ITERATIONS {
        let m = random_model(&mut rng);
        let inv = m.inverse().unwrap();
        assert_abs_diff_eq!(m * inv, Mat4::IDENTITY, epsilon = 1e-5);
        assert_abs_diff_eq!(inv * m, Mat4::IDENTITY, epsilon = 1e-5);

        let p = random_vec3(&mut rng, 50.0);
        assert_abs_diff_eq!(inv.transform_point(m.transform_point(p)), p, epsilon = 1e-5);
    }
}

#[test]
fn inverse_of_well_conditioned_matrices() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0006);
    let mut checked = 0;
    while checked < ITERATIONS {
        let m = random_matrix(&mut rng);
        // Skip nearly singular draws; their inverse is dominated by rounding.
        if m.determinant().abs() < 1.0 {
            continue;
        }
        let inv = m.inverse().unwrap();
        assert_abs_diff_eq!(m * inv, Mat4::IDENTITY, epsilon = 1e-5);
        assert_relative_eq!(
            inv.determinant(),
            1.0 / m.determinant(),
            max_relative = 1e-6
        );
        checked += 1;
    }
}

#[test]
fn inverse_3x3() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0007);
    for _ in 0..ITERATIONS {
        let m = Mat3::translation(range(&mut rng, -100.0, 100.0), range(&mut rng, -100.0, 100.0))
            .rotate(range(&mut rng, -PI, PI))
            .scale(range(&mut rng, 0.5, 3.0), range(&mut rng, 0.5, 3.0));
        assert_abs_diff_eq!(m * m.inverse().unwrap(), Mat3::IDENTITY, epsilon = 1e-9);
    }
}

#[test]
fn composition_is_associative() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0008);
    for _ in 0..ITERATIONS {
        let a = random_matrix(&mut rng);
        let b = random_matrix(&mut rng);
        let c = random_matrix(&mut rng);
        assert_relative_eq!((a * b) * c, a * (b * c), epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn composition_is_not_commutative() {
    let t = Mat4::translation(10.0, 0.0, 0.0);
    let s = Mat4::scaling(2.0, 2.0, 2.0);
    let p = vec3(1.0, 0.0, 0.0);
    assert_eq!((t * s).transform_point(p), vec3(12.0, 0.0, 0.0));
    assert_eq!((s * t).transform_point(p), vec3(22.0, 0.0, 0.0));
}

#[test]
fn normalize_yields_unit_vectors() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_0009);
    for _ in 0..ITERATIONS {
        let v = random_vec3(&mut rng, 1000.0);
        if v.length() <= 1e-5 {
            continue;
        }
        assert_abs_diff_eq!(v.normalize().length(), 1.0, epsilon = 1e-12);
    }
    assert_eq!(Vec3::<f64>::ZERO.normalize(), Vec3::<f64>::ZERO);
}

#[test]
fn normal_matrix_of_rigid_transforms_is_the_rotation() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_000a);
    for _ in 0..ITERATIONS {
        let t = random_vec3(&mut rng, 100.0);
        let world = Mat4::translation(t.x, t.y, t.z)
            .rotate_y(range(&mut rng, -PI, PI))
            .rotate_x(range(&mut rng, -PI, PI));
        let normal = world.normal_matrix().unwrap();
        let n = random_vec3(&mut rng, 1.0);
        assert_abs_diff_eq!(
            normal.transform_vector(n),
            world.transform_vector(n),
            epsilon = 1e-9
        );
    }
}

/// Cross-checks against `nalgebra`, which uses the same OpenGL conventions.
mod nalgebra_reference {
    use super::*;

    fn to_nalgebra(m: Mat4<f64>) -> nalgebra::Matrix4<f64> {
        nalgebra::Matrix4::from_column_slice(m.as_slice())
    }

    fn point(v: Vec3<f64>) -> nalgebra::Point3<f64> {
        nalgebra::Point3::new(v.x, v.y, v.z)
    }

    #[test]
    fn inverse() {
        let mut rng = fastrand::Rng::with_seed(0x5eed_0101);
        for _ in 0..ITERATIONS {
            let m = random_model(&mut rng);
            let ours = to_nalgebra(m.inverse().unwrap());
            let theirs = to_nalgebra(m).try_inverse().unwrap();
            assert_relative_eq!(ours, theirs, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn determinant() {
        let mut rng = fastrand::Rng::with_seed(0x5eed_0102);
        for _ in 0..ITERATIONS {
            let m = random_matrix(&mut rng);
            assert_relative_eq!(
                m.determinant(),
                to_nalgebra(m).determinant(),
                epsilon = 1e-6,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn perspective() {
        let mut rng = fastrand::Rng::with_seed(0x5eed_0103);
        for _ in 0..ITERATIONS {
            let fov = range(&mut rng, 0.1, 3.0);
            let aspect = range(&mut rng, 0.2, 5.0);
            let near = range(&mut rng, 0.1, 10.0);
            let far = near + range(&mut rng, 1.0, 5000.0);
            let ours = to_nalgebra(Mat4::perspective(fov, aspect, near, far).unwrap());
            let theirs = nalgebra::Matrix4::new_perspective(aspect, fov, near, far);
            assert_relative_eq!(ours, theirs, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn orthographic() {
        let ours = to_nalgebra(Mat4::orthographic(-4.0, 2.0, -1.0, 3.0, 0.5, 80.0).unwrap());
        let theirs = nalgebra::Matrix4::new_orthographic(-4.0, 2.0, -1.0, 3.0, 0.5, 80.0);
        assert_relative_eq!(ours, theirs, epsilon = 1e-12);
    }

    #[test]
    fn look_at() {
        let mut rng = fastrand::Rng::with_seed(0x5eed_0104);
        for _ in 0..ITERATIONS {
            let camera = random_vec3(&mut rng, 500.0);
            let target = random_vec3(&mut rng, 500.0);
            let ours = to_nalgebra(Mat4::look_at(camera, target, Vec3::Y));
            let theirs =
                nalgebra::Matrix4::look_at_rh(&point(camera), &point(target), &nalgebra::Vector3::y());
            assert_relative_eq!(ours, theirs, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}
