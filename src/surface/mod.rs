use std::collections::HashMap;

use anyhow::{anyhow, ensure};
use nalgebra::{Point3, Vector3, U3};

use crate::{
    misc::{FloatingPoint, Positioned},
    tree::OrthantTree,
};

/// Objects per tree node for the centroid index.
const CENTROID_NODE_CAPACITY: usize = 10;

/// A face centroid tagged with the index of its face: the payload-bearing
/// object stored in the surface's spatial index.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceCentroid<T: FloatingPoint> {
    point: Point3<T>,
    face: usize,
}

impl<T: FloatingPoint> FaceCentroid<T> {
    pub fn point(&self) -> &Point3<T> {
        &self.point
    }

    /// Index of the owning face, carried back unchanged by queries.
    pub fn face(&self) -> usize {
        self.face
    }
}

impl<T: FloatingPoint> Positioned<T, U3> for FaceCentroid<T> {
    fn position(&self) -> &Point3<T> {
        &self.point
    }
}

/// A closed triangulated surface that classifies points as inside or
/// outside via its nearest face.
///
/// Faces must wind counter-clockwise seen from the outside so that their
/// normals point outward; `inside_out` flips the orientation for surfaces
/// wound the other way.
///
/// # Examples
/// ```
/// use nalgebra::Point3;
/// use orthant::prelude::TriangleSurface;
///
/// // A tetrahedron around the origin-ish corner of space.
/// let vertices = vec![
///     Point3::new(0., 0., 0.),
///     Point3::new(1., 0., 0.1),
///     Point3::new(0.1, 1., 0.),
///     Point3::new(0.2, 0.3, 1.),
/// ];
/// let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
/// let surface = TriangleSurface::try_new(vertices, faces, false).unwrap();
///
/// assert!(surface.contains(&Point3::new(0.3, 0.3, 0.25)).unwrap());
/// assert!(!surface.contains(&Point3::new(2., 2., 2.)).unwrap());
/// ```
pub struct TriangleSurface<T: FloatingPoint> {
    vertices: Vec<Point3<T>>,
    faces: Vec<[usize; 3]>,
    normals: Vec<Vector3<T>>,
    centroids: OrthantTree<T, U3, FaceCentroid<T>>,
}

impl<T: FloatingPoint> TriangleSurface<T> {
    /// Build a surface from vertices and triangular faces.
    ///
    /// Validates that face indices are in range, that every undirected edge
    /// belongs to exactly two faces (a closed 2-manifold, no breaks and no
    /// fins), and that no face is degenerate. One spatial index is built
    /// over the face centroids.
    pub fn try_new(
        vertices: Vec<Point3<T>>,
        faces: Vec<[usize; 3]>,
        inside_out: bool,
    ) -> anyhow::Result<Self> {
        ensure!(!faces.is_empty(), "surface has no faces");
        for (index, face) in faces.iter().enumerate() {
            for &v in face {
                ensure!(
                    v < vertices.len(),
                    "face {} refers to missing vertex {}",
                    index,
                    v
                );
            }
        }

        let mut edge_uses: HashMap<(usize, usize), usize> = HashMap::new();
        for (index, face) in faces.iter().enumerate() {
            for (a, b) in [
                (face[0], face[1]),
                (face[1], face[2]),
                (face[0], face[2]),
            ] {
                ensure!(a != b, "face {} repeats vertex {}", index, a);
                *edge_uses.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }
        for (edge, uses) in &edge_uses {
            ensure!(
                *uses == 2,
                "edge {:?} belongs to {} faces; a closed surface requires exactly 2",
                edge,
                uses
            );
        }

        let third = T::from_f64(1. / 3.).unwrap();
        let mut normals = Vec::with_capacity(faces.len());
        let mut centroids = Vec::with_capacity(faces.len());
        for (index, face) in faces.iter().enumerate() {
            let a = &vertices[face[0]];
            let b = &vertices[face[1]];
            let c = &vertices[face[2]];
            let mut normal = (b - a).cross(&(c - a));
            ensure!(normal.norm() > T::zero(), "face {} is degenerate", index);
            normal.normalize_mut();
            if inside_out {
                normal = -normal;
            }
            normals.push(normal);
            centroids.push(FaceCentroid {
                point: Point3::from((a.coords + b.coords + c.coords) * third),
                face: index,
            });
        }

        let centroids = OrthantTree::from_objects(centroids, CENTROID_NODE_CAPACITY)?;
        Ok(Self {
            vertices,
            faces,
            normals,
            centroids,
        })
    }

    pub fn vertices(&self) -> &[Point3<T>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Outward unit normal of a face.
    pub fn normal(&self, face: usize) -> &Vector3<T> {
        &self.normals[face]
    }

    /// Whether `point` lies inside the surface.
    ///
    /// The point is inside iff the vector from the nearest face centroid to
    /// it opposes that face's outward normal. Points much closer to the
    /// surface than the face size may be misclassified; the test is as
    /// fine-grained as the triangulation.
    pub fn contains(&self, point: &Point3<T>) -> anyhow::Result<bool> {
        let nearest = self
            .centroids
            .nearest(point)?
            .ok_or_else(|| anyhow!("surface has no faces"))?;
        let to_point = point - &nearest.point;
        Ok(to_point.dot(&self.normals[nearest.face]) < T::zero())
    }
}
