use lvl_forge::data_structures::scene::{Face, RawMesh};
use lvl_forge::export::Diagnostic;
use lvl_forge::export::normalize::NormalizedMesh;
use lvl_forge::export::build_models;

use crate::common::test_utils::{quad_mesh, textured_object, u_shape_mesh};

mod common;

/// Signed area of a triangle in the z=0 plane, positive for CCW winding.
fn signed_area(mesh: &RawMesh, triangle: [usize; 3]) -> f32 {
    let p = |l: usize| mesh.positions[mesh.loops[l] as usize];
    let [a, b, c] = triangle.map(p);
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]))
}

#[test]
fn quad_splits_into_two_deterministic_triangles() {
    let mesh = quad_mesh();
    let mut diagnostics = Vec::new();
    let normalized = NormalizedMesh::normalize(&mesh, &mut diagnostics);

    assert!(diagnostics.is_empty());
    // First ear in loop order is corner 0, clipped as (prev, ear, next).
    assert_eq!(normalized.triangles(), [[3, 0, 1], [1, 2, 3]]);

    // All four corners covered, none omitted.
    let mut covered: Vec<usize> = normalized.triangles().iter().flatten().copied().collect();
    covered.sort_unstable();
    covered.dedup();
    assert_eq!(covered, [0, 1, 2, 3]);
}

#[test]
fn quad_through_the_pipeline_keeps_four_vertices() {
    let (models, _) = build_models(&[textured_object("Quad", quad_mesh(), "q.png")]).unwrap();
    let model = &models[0];

    assert_eq!(model.vertex_count(), 4);
    // Corner sequence D,A,B / B,C,D with first-seen index assignment.
    assert_eq!(model.indices, [0, 1, 2, 2, 3, 0]);
}

#[test]
fn non_convex_polygon_ear_clips_without_flipped_triangles() {
    let mesh = u_shape_mesh();
    let mut diagnostics = Vec::new();
    let normalized = NormalizedMesh::normalize(&mesh, &mut diagnostics);

    assert!(diagnostics.is_empty());
    assert_eq!(normalized.triangle_count(), 6);

    // Every triangle keeps the polygon winding (a naive fan from corner 0
    // would emit flipped triangles for this shape) and the pieces add up to
    // the polygon area.
    let mut total = 0.0;
    for &triangle in normalized.triangles() {
        let area = signed_area(&mesh, triangle);
        assert!(area > 0.0, "flipped or degenerate triangle {triangle:?}");
        total += area;
    }
    assert!((total - 5.0).abs() < 1e-5, "covered area was {total}");
}

#[test]
fn triangulation_is_deterministic() {
    let mesh = u_shape_mesh();
    let mut first = Vec::new();
    let mut second = Vec::new();
    let a = NormalizedMesh::normalize(&mesh, &mut first);
    let b = NormalizedMesh::normalize(&mesh, &mut second);
    assert_eq!(a.triangles(), b.triangles());
}

#[test]
fn quad_with_coincident_corner_positions_falls_back_to_a_fan() {
    // Four distinct shared vertices, but the last one sits exactly on the
    // first. The face passes validation (indices are distinct, area is
    // nonzero), yet every convex corner's candidate triangle has the
    // coincident point on its boundary, so no ear exists and triangulation
    // must fall back to a fan from the first corner.
    let mesh = RawMesh {
        name: "Pinched".to_string(),
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
        ],
        loops: vec![0, 1, 2, 3],
        faces: vec![Face::new(0, 4)],
        loop_normals: None,
        uv_layer: None,
        color_layer: None,
    };

    let mut diagnostics = Vec::new();
    let normalized = NormalizedMesh::normalize(&mesh, &mut diagnostics);

    assert_eq!(normalized.triangles(), [[0, 1, 2], [0, 2, 3]]);
    assert!(diagnostics.is_empty());
}

#[test]
fn degenerate_faces_are_dropped_not_fatal() {
    let mesh = RawMesh {
        name: "Broken".to_string(),
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        // Face 0: collinear (zero area). Face 1: repeats a vertex.
        // Face 2: a good triangle that must survive.
        loops: vec![0, 1, 2, 0, 1, 0, 0, 1, 3],
        faces: vec![Face::new(0, 3), Face::new(3, 3), Face::new(6, 3)],
        loop_normals: None,
        uv_layer: None,
        color_layer: None,
    };

    let mut diagnostics = Vec::new();
    let normalized = NormalizedMesh::normalize(&mesh, &mut diagnostics);

    assert_eq!(normalized.triangle_count(), 1);
    assert_eq!(
        diagnostics,
        vec![
            Diagnostic::DroppedFace {
                mesh: "Broken".to_string(),
                face: 0,
                reason: "zero area",
            },
            Diagnostic::DroppedFace {
                mesh: "Broken".to_string(),
                face: 1,
                reason: "repeated vertex in face",
            },
        ]
    );
}

#[test]
fn faces_referencing_missing_data_are_dropped() {
    let mesh = RawMesh {
        name: "OutOfRange".to_string(),
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        loops: vec![0, 1, 7, 0, 1, 2],
        // Face 1 ranges past the end of the loop array.
        faces: vec![Face::new(0, 3), Face::new(3, 3), Face::new(4, 4)],
        loop_normals: None,
        uv_layer: None,
        color_layer: None,
    };

    let mut diagnostics = Vec::new();
    let normalized = NormalizedMesh::normalize(&mesh, &mut diagnostics);

    assert_eq!(normalized.triangle_count(), 1);
    assert_eq!(
        diagnostics,
        vec![
            Diagnostic::DroppedFace {
                mesh: "OutOfRange".to_string(),
                face: 0,
                reason: "corner references missing vertex",
            },
            Diagnostic::DroppedFace {
                mesh: "OutOfRange".to_string(),
                face: 2,
                reason: "loop range out of bounds",
            },
        ]
    );
}

#[test]
fn mismatched_uv_layer_is_ignored_with_a_diagnostic() {
    let mut mesh = quad_mesh();
    mesh.uv_layer = Some(vec![[0.0, 0.0]; 3]); // 3 entries for 4 loops

    let mut diagnostics = Vec::new();
    let normalized = NormalizedMesh::normalize(&mesh, &mut diagnostics);

    assert_eq!(
        diagnostics,
        vec![Diagnostic::IgnoredLayer {
            mesh: "Quad".to_string(),
            layer: "uv",
        }]
    );
    assert!(normalized.corners().all(|c| c.uv == [0.0, 0.0]));
}

#[test]
fn host_loop_normals_win_over_recomputation() {
    let mut mesh = quad_mesh();
    let split = [0.0, 0.70710678, 0.70710678];
    mesh.loop_normals = Some(vec![split; 4]);

    let mut diagnostics = Vec::new();
    let normalized = NormalizedMesh::normalize(&mesh, &mut diagnostics);

    assert!(normalized.corners().all(|c| c.normal == split));
}

#[test]
fn recomputed_flat_normal_matches_the_face_plane() {
    let mesh = quad_mesh();
    let mut diagnostics = Vec::new();
    let normalized = NormalizedMesh::normalize(&mesh, &mut diagnostics);

    // CCW in the z=0 plane faces +z.
    assert!(normalized.corners().all(|c| c.normal == [0.0, 0.0, 1.0]));
}
