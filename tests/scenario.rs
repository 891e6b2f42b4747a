//! End-to-end walk through a small one-dimensional tree: capacity-driven
//! splitting, ordered traversal, sphere queries with and without an exact
//! object predicate, and nearest-neighbor lookup.

use nalgebra::{Point1, Vector1, U1};
use orthant::prelude::*;

fn build() -> OrthantTree<f64, U1, Point1<f64>> {
    let bounds = BoundingBox::try_new(Vector1::new(0.), Vector1::new(1.)).unwrap();
    let mut tree = OrthantTree::new(bounds, 2).unwrap();
    for x in [0.1, 0.9, 0.5, 0.2, 0.8] {
        tree.insert(Point1::new(x)).unwrap();
    }
    tree
}

#[test]
fn third_insert_splits_the_root() {
    let bounds = BoundingBox::try_new(Vector1::new(0.), Vector1::new(1.)).unwrap();
    let mut tree = OrthantTree::new(bounds, 2).unwrap();
    tree.insert(Point1::new(0.1)).unwrap();
    tree.insert(Point1::new(0.9)).unwrap();
    assert!(tree.is_leaf());
    tree.insert(Point1::new(0.5)).unwrap();
    assert!(!tree.is_leaf());

    let lower = tree.child(Orthant::from_index(0)).unwrap();
    let upper = tree.child(Orthant::from_index(1)).unwrap();
    assert_eq!(lower.bounds().interval(0).hi(), 0.5);
    assert_eq!(upper.bounds().interval(0).lo(), 0.5);
}

#[test]
fn traversal_is_sorted() {
    let tree = build();
    let xs: Vec<f64> = tree.traverse().map(|p| p[0]).collect();
    assert_eq!(xs, vec![0.1, 0.2, 0.5, 0.8, 0.9]);
}

#[test]
fn nearest_in_and_out_of_bounds() {
    let tree = build();
    assert_eq!(
        tree.nearest(&Point1::new(0.15)).unwrap(),
        Some(&Point1::new(0.1))
    );
    assert_eq!(
        tree.nearest(&Point1::new(-3.)).unwrap(),
        Some(&Point1::new(0.1))
    );
    assert_eq!(
        tree.nearest(&Point1::new(42.)).unwrap(),
        Some(&Point1::new(0.9))
    );
}

#[test]
fn sphere_query_with_exact_predicate() {
    let tree = build();
    let got: Vec<f64> = tree
        .objects_in_sphere(Point1::new(0.7), 0.15)
        .map(|p| p[0])
        .collect();
    assert_eq!(got, vec![0.8]);
}

/// The same sphere with only the intersection predicate: near-boundary
/// objects from intersecting leaves may leak in, true members never leak
/// out.
struct SphereShell(Sphere<f64, U1>);

impl Region<f64, U1> for SphereShell {
    fn intersects(&self, bounds: &BoundingBox<f64, U1>) -> bool {
        self.0.intersects(bounds)
    }
}

#[test]
fn sphere_query_without_exact_predicate_overapproximates() {
    let tree = build();
    let shell = SphereShell(Sphere::new(Point1::new(0.7), 0.15));
    let got: Vec<f64> = tree.objects_in_region(shell).map(|p| p[0]).collect();

    // No false negatives: the one true member is present.
    assert!(got.contains(&0.8));
    // False positives only from leaves whose box intersects the sphere.
    assert!(got.iter().all(|&x| [0.5, 0.8, 0.9].contains(&x)));
}
