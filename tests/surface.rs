//! Inside/outside classification against closed triangulated surfaces.

use approx::assert_relative_eq;
use nalgebra::Point3;
use orthant::prelude::TriangleSurface;

/// Unit cube triangulated with outward-winding faces.
fn cube() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let vertices = vec![
        Point3::new(0., 0., 0.),
        Point3::new(1., 0., 0.),
        Point3::new(1., 1., 0.),
        Point3::new(0., 1., 0.),
        Point3::new(0., 0., 1.),
        Point3::new(1., 0., 1.),
        Point3::new(1., 1., 1.),
        Point3::new(0., 1., 1.),
    ];
    let faces = vec![
        // bottom, top
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        // front, back
        [0, 1, 5],
        [0, 5, 4],
        [2, 3, 7],
        [2, 7, 6],
        // left, right
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    (vertices, faces)
}

#[test]
fn cube_classifies_interior_and_exterior_points() {
    let (vertices, faces) = cube();
    let surface = TriangleSurface::try_new(vertices, faces, false).unwrap();

    for inside in [
        Point3::new(0.5, 0.5, 0.5),
        Point3::new(0.5, 0.5, 0.9),
        Point3::new(0.2, 0.8, 0.4),
    ] {
        assert!(surface.contains(&inside).unwrap(), "{:?}", inside);
    }

    for outside in [
        Point3::new(0.5, 0.5, -0.5),
        Point3::new(2., 2., 2.),
        Point3::new(-1., 0.5, 0.5),
        Point3::new(0.5, 3., 0.5),
    ] {
        assert!(!surface.contains(&outside).unwrap(), "{:?}", outside);
    }
}

#[test]
fn face_payload_survives_the_round_trip() {
    let (vertices, faces) = cube();
    let count = faces.len();
    let surface = TriangleSurface::try_new(vertices, faces, false).unwrap();
    // Every face index is addressable and its normal is unit length.
    for face in 0..count {
        let n = surface.normal(face);
        assert_relative_eq!(n.norm(), 1., epsilon = 1e-12);
    }
}

#[test]
fn fin_faces_are_rejected() {
    let (vertices, mut faces) = cube();
    // A duplicated face gives its edges four incident faces.
    faces.push(faces[0]);
    assert!(TriangleSurface::try_new(vertices, faces, false).is_err());
}
