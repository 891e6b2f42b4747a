//! Randomized equivalence tests: tree answers must match exhaustive scans
//! over the same objects, across dimensions 1 through 4, random capacities,
//! and query points both inside and far outside the root box.

use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint, OVector, U1, U2, U3, U4};
use orthant::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_point<D: DimName>(rng: &mut StdRng, spread: f64) -> OPoint<f64, D>
where
    DefaultAllocator: Allocator<D>,
{
    OPoint::from(OVector::from_fn(|_, _| rng.random_range(-spread..spread)))
}

fn random_tree<D: DimName>(rng: &mut StdRng) -> (OrthantTree<f64, D, OPoint<f64, D>>, Vec<OPoint<f64, D>>)
where
    DefaultAllocator: Allocator<D>,
{
    let capacity = rng.random_range(1..=8);
    let count = rng.random_range(2..=80);
    let points: Vec<OPoint<f64, D>> = (0..count).map(|_| random_point(rng, 1.)).collect();
    let tree = OrthantTree::from_objects(points.clone(), capacity).unwrap();
    (tree, points)
}

fn check_nearest<D: DimName>(rng: &mut StdRng)
where
    DefaultAllocator: Allocator<D>,
{
    for _ in 0..60 {
        let (tree, points) = random_tree::<D>(rng);
        for _ in 0..20 {
            // Spread 3 puts a good share of the queries outside the box.
            let query = random_point::<D>(rng, 3.);
            let got = tree.nearest(&query).unwrap().unwrap();
            let best = points
                .iter()
                .map(|p| (p - &query).norm())
                .fold(f64::INFINITY, f64::min);
            assert_eq!(
                (got - &query).norm(),
                best,
                "nearest disagrees with exhaustive scan at {:?}",
                query
            );
        }
    }
}

#[test]
fn nearest_matches_exhaustive_scan_1d() {
    check_nearest::<U1>(&mut StdRng::seed_from_u64(11));
}

#[test]
fn nearest_matches_exhaustive_scan_2d() {
    check_nearest::<U2>(&mut StdRng::seed_from_u64(22));
}

#[test]
fn nearest_matches_exhaustive_scan_3d() {
    check_nearest::<U3>(&mut StdRng::seed_from_u64(33));
}

#[test]
fn nearest_matches_exhaustive_scan_4d() {
    check_nearest::<U4>(&mut StdRng::seed_from_u64(44));
}

fn check_sphere<D: DimName>(rng: &mut StdRng)
where
    DefaultAllocator: Allocator<D>,
{
    for _ in 0..60 {
        let (tree, points) = random_tree::<D>(rng);
        for _ in 0..10 {
            let center = random_point::<D>(rng, 2.);
            let radius = rng.random_range(0.01..1.5);

            let mut got: Vec<OPoint<f64, D>> = tree
                .objects_in_sphere(center.clone(), radius)
                .cloned()
                .collect();
            let mut expected: Vec<OPoint<f64, D>> = points
                .iter()
                .filter(|p| (*p - &center).norm() < radius)
                .cloned()
                .collect();

            got.sort_by(|a, b| coordinate_cmp(a, b));
            expected.sort_by(|a, b| coordinate_cmp(a, b));
            assert_eq!(got, expected);
        }
    }
}

#[test]
fn sphere_query_matches_exhaustive_scan_2d() {
    check_sphere::<U2>(&mut StdRng::seed_from_u64(7));
}

#[test]
fn sphere_query_matches_exhaustive_scan_3d() {
    check_sphere::<U3>(&mut StdRng::seed_from_u64(8));
}

#[test]
fn traversal_yields_the_whole_multiset() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..40 {
        let (tree, points) = random_tree::<U3>(&mut rng);
        let mut got: Vec<OPoint<f64, U3>> = tree.traverse().cloned().collect();
        let mut expected = points;
        got.sort_by(|a, b| coordinate_cmp(a, b));
        expected.sort_by(|a, b| coordinate_cmp(a, b));
        assert_eq!(got, expected);
    }
}
