//! Mesh normalization: validation, split normals and triangulation.
//!
//! Raw host meshes are n-gon based and carry face-varying attributes in
//! per-loop layers. This stage turns one into a clean triangle soup of
//! face-corner records:
//!
//! - degenerate faces are dropped (never fatal, always logged)
//! - split normals come from the host's loop-normal layer when present,
//!   otherwise each face gets its flat Newell normal on every corner
//! - n-gons are triangulated by ear clipping, so non-convex faces do not
//!   produce degenerate triangles the way a naive fan would
//!
//! The corner sequence is deterministic: faces in host face order, triangles
//! in clip order within a face, corners in loop winding order.

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::model::FaceCorner;
use crate::data_structures::scene::RawMesh;
use crate::export::Diagnostic;

/// Squared-length floor below which a face normal counts as zero area.
const DEGENERATE_AREA_SQ: f32 = 1e-12;

/// A validated, triangulated view over a raw mesh.
///
/// Borrows the raw mesh for positions and attribute layers; owns the
/// per-loop normals (which may have been recomputed) and the triangle list
/// of loop indices. [`NormalizedMesh::corners`] can be called any number of
/// times and always yields the same finite sequence.
pub struct NormalizedMesh<'a> {
    mesh: &'a RawMesh,
    /// One normal per loop, parallel to `mesh.loops`.
    normals: Vec<[f32; 3]>,
    uvs: Option<&'a [[f32; 2]]>,
    colors: Option<&'a [[f32; 4]]>,
    /// Triangles as loop-index triples, winding preserved.
    triangles: Vec<[usize; 3]>,
}

impl<'a> NormalizedMesh<'a> {
    /// Validate and triangulate `mesh`. Dropped faces and ignored layers are
    /// appended to `diagnostics`; this never fails as a whole.
    pub fn normalize(mesh: &'a RawMesh, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let uvs = checked_layer(mesh, mesh.uv_layer.as_deref(), "uv", diagnostics);
        let colors = checked_layer(mesh, mesh.color_layer.as_deref(), "color", diagnostics);

        // Split normals from the host layer if usable, recomputed flat below
        // otherwise.
        let host_normals = checked_layer(mesh, mesh.loop_normals.as_deref(), "normal", diagnostics);
        let mut normals = match host_normals {
            Some(layer) => layer.to_vec(),
            None => vec![[0.0; 3]; mesh.loops.len()],
        };

        let mut triangles = Vec::new();
        for (face_index, face) in mesh.faces.iter().enumerate() {
            let corners: Vec<usize> = face.loop_range().collect();

            if let Err(reason) = validate_face(mesh, &corners) {
                log::warn!("Mesh {}: dropping face {} ({})", mesh.name, face_index, reason);
                diagnostics.push(Diagnostic::DroppedFace {
                    mesh: mesh.name.clone(),
                    face: face_index,
                    reason,
                });
                continue;
            }

            let newell = newell_normal(mesh, &corners);
            if newell.magnitude2() < DEGENERATE_AREA_SQ {
                log::warn!("Mesh {}: dropping face {} (zero area)", mesh.name, face_index);
                diagnostics.push(Diagnostic::DroppedFace {
                    mesh: mesh.name.clone(),
                    face: face_index,
                    reason: "zero area",
                });
                continue;
            }
            let face_normal = newell.normalize();

            if host_normals.is_none() {
                for &corner in &corners {
                    normals[corner] = face_normal.into();
                }
            }

            triangulate_into(mesh, &corners, face_normal, face_index, &mut triangles);
        }

        Self {
            mesh,
            normals,
            uvs,
            colors,
            triangles,
        }
    }

    /// Number of face corners the triangulated mesh yields.
    pub fn corner_count(&self) -> usize {
        self.triangles.len() * 3
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Triangles as loop-index triples, mostly useful for inspection.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// The face-corner sequence: 3 corners per triangle, restartable,
    /// identical on every call.
    pub fn corners(&self) -> impl Iterator<Item = FaceCorner> + '_ {
        self.triangles
            .iter()
            .flat_map(move |triangle| triangle.iter().map(move |&l| self.corner(l)))
    }

    fn corner(&self, loop_index: usize) -> FaceCorner {
        let vertex = self.mesh.loops[loop_index] as usize;
        FaceCorner {
            position: self.mesh.positions[vertex],
            normal: self.normals[loop_index],
            uv: self.uvs.map_or([0.0; 2], |layer| layer[loop_index]),
            // Opaque white when no color layer is present.
            color: self.colors.map_or([1.0; 4], |layer| layer[loop_index]),
        }
    }
}

/// A per-loop layer is only usable when it covers every loop.
fn checked_layer<'a, T>(
    mesh: &RawMesh,
    layer: Option<&'a [T]>,
    name: &'static str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<&'a [T]> {
    let layer = layer?;
    if layer.len() == mesh.loops.len() {
        return Some(layer);
    }
    log::warn!(
        "Mesh {}: {} layer has {} entries for {} loops, ignoring it",
        mesh.name,
        name,
        layer.len(),
        mesh.loops.len()
    );
    diagnostics.push(Diagnostic::IgnoredLayer {
        mesh: mesh.name.clone(),
        layer: name,
    });
    None
}

fn validate_face(mesh: &RawMesh, corners: &[usize]) -> Result<(), &'static str> {
    if corners.len() < 3 {
        return Err("fewer than 3 corners");
    }
    if corners.last().is_some_and(|&l| l >= mesh.loops.len()) {
        return Err("loop range out of bounds");
    }
    for (i, &l) in corners.iter().enumerate() {
        let vertex = mesh.loops[l];
        if vertex as usize >= mesh.positions.len() {
            return Err("corner references missing vertex");
        }
        // An n-gon visiting the same shared vertex twice is degenerate.
        if corners[..i].iter().any(|&c| mesh.loops[c] == vertex) {
            return Err("repeated vertex in face");
        }
    }
    Ok(())
}

fn position(mesh: &RawMesh, loop_index: usize) -> Vector3<f32> {
    mesh.positions[mesh.loops[loop_index] as usize].into()
}

/// Newell's method over the face polygon. Robust for non-planar and
/// non-convex faces; the magnitude is proportional to the face area.
fn newell_normal(mesh: &RawMesh, corners: &[usize]) -> Vector3<f32> {
    let mut n = Vector3::new(0.0f32, 0.0, 0.0);
    for i in 0..corners.len() {
        let a = position(mesh, corners[i]);
        let b = position(mesh, corners[(i + 1) % corners.len()]);
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n
}

/// Triangulate one validated face into `out`, preserving loop winding.
///
/// Triangles pass through, everything larger is ear clipped. When no ear can
/// be found (numerically broken input) the face falls back to a fan from its
/// first corner so that export still terminates with usable output.
fn triangulate_into(
    mesh: &RawMesh,
    corners: &[usize],
    face_normal: Vector3<f32>,
    face_index: usize,
    out: &mut Vec<[usize; 3]>,
) {
    if corners.len() == 3 {
        out.push([corners[0], corners[1], corners[2]]);
        return;
    }

    let points: Vec<Vector3<f32>> = corners.iter().map(|&l| position(mesh, l)).collect();
    match ear_clip(&points, face_normal) {
        Some(triangles) => {
            out.extend(
                triangles
                    .into_iter()
                    .map(|[a, b, c]| [corners[a], corners[b], corners[c]]),
            );
        }
        None => {
            log::warn!(
                "Mesh {}: no ear found on face {}, falling back to fan",
                mesh.name,
                face_index
            );
            for i in 1..corners.len() - 1 {
                out.push([corners[0], corners[i], corners[i + 1]]);
            }
        }
    }
}

/// Ear clipping over a polygon given as 3D points and its plane normal.
///
/// Scans the remaining corners in loop order and clips the first ear found,
/// which makes the triangle order a pure function of the input. Returns
/// triangles as indices into `points`, or `None` when a pass finds no ear.
fn ear_clip(points: &[Vector3<f32>], normal: Vector3<f32>) -> Option<Vec<[usize; 3]>> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len() - 2);

    while remaining.len() > 3 {
        let ear = (0..remaining.len()).find(|&i| {
            let prev = remaining[(i + remaining.len() - 1) % remaining.len()];
            let cur = remaining[i];
            let next = remaining[(i + 1) % remaining.len()];
            is_ear(points, &remaining, prev, cur, next, normal)
        })?;

        let prev = remaining[(ear + remaining.len() - 1) % remaining.len()];
        let cur = remaining[ear];
        let next = remaining[(ear + 1) % remaining.len()];
        triangles.push([prev, cur, next]);
        remaining.remove(ear);
    }

    triangles.push([remaining[0], remaining[1], remaining[2]]);
    Some(triangles)
}

fn is_ear(
    points: &[Vector3<f32>],
    remaining: &[usize],
    prev: usize,
    cur: usize,
    next: usize,
    normal: Vector3<f32>,
) -> bool {
    let a = points[prev];
    let b = points[cur];
    let c = points[next];

    // Reflex corners cannot be clipped.
    if (b - a).cross(c - b).dot(normal) <= 0.0 {
        return false;
    }

    // No other remaining corner may lie inside the candidate triangle.
    remaining
        .iter()
        .filter(|&&r| r != prev && r != cur && r != next)
        .all(|&r| !point_in_triangle(points[r], a, b, c, normal))
}

/// Same-side test against all three edges, in the face plane.
fn point_in_triangle(
    p: Vector3<f32>,
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
    normal: Vector3<f32>,
) -> bool {
    (b - a).cross(p - a).dot(normal) >= 0.0
        && (c - b).cross(p - b).dot(normal) >= 0.0
        && (a - c).cross(p - c).dot(normal) >= 0.0
}
