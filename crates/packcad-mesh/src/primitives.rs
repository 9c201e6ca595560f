//! Direct tessellation of the primitive shapes the pack generator needs.
//!
//! Everything here is built as triangles from the start — there is no
//! B-rep or boolean stage. The holder frame (a plate with a circular
//! cutout) is produced by triangulating between the hole circle and the
//! rectangular outer boundary, which is what lets the generator avoid a
//! CSG dependency entirely.

use crate::TriangleMesh;
use packcad_math::GEOM_EPS;
use std::f64::consts::TAU;

/// Append a quad as two triangles with a flat face normal.
///
/// `points` must form a simple loop. `hint` selects the face orientation:
/// the loop is reversed if its winding normal opposes the hint.
fn push_quad(mesh: &mut TriangleMesh, points: [[f64; 3]; 4], hint: [f64; 3]) {
    let e1 = [
        points[1][0] - points[0][0],
        points[1][1] - points[0][1],
        points[1][2] - points[0][2],
    ];
    let e2 = [
        points[2][0] - points[0][0],
        points[2][1] - points[0][1],
        points[2][2] - points[0][2],
    ];
    let mut n = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len < GEOM_EPS {
        return; // degenerate quad
    }
    n = [n[0] / len, n[1] / len, n[2] / len];

    let mut loop_points = points;
    if n[0] * hint[0] + n[1] * hint[1] + n[2] * hint[2] < 0.0 {
        loop_points = [points[0], points[3], points[2], points[1]];
        n = [-n[0], -n[1], -n[2]];
    }

    let base = mesh.num_vertices() as u32;
    for p in &loop_points {
        mesh.vertices
            .extend_from_slice(&[p[0] as f32, p[1] as f32, p[2] as f32]);
        mesh.normals
            .extend_from_slice(&[n[0] as f32, n[1] as f32, n[2] as f32]);
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Axis-aligned box centered at the origin, `12` triangles.
pub fn box_mesh(sx: f64, sy: f64, sz: f64) -> TriangleMesh {
    let (hx, hy, hz) = (sx / 2.0, sy / 2.0, sz / 2.0);
    let mut mesh = TriangleMesh::new();

    // Right / left
    push_quad(
        &mut mesh,
        [
            [hx, -hy, -hz],
            [hx, hy, -hz],
            [hx, hy, hz],
            [hx, -hy, hz],
        ],
        [1.0, 0.0, 0.0],
    );
    push_quad(
        &mut mesh,
        [
            [-hx, -hy, -hz],
            [-hx, hy, -hz],
            [-hx, hy, hz],
            [-hx, -hy, hz],
        ],
        [-1.0, 0.0, 0.0],
    );
    // Top / bottom
    push_quad(
        &mut mesh,
        [
            [-hx, hy, -hz],
            [hx, hy, -hz],
            [hx, hy, hz],
            [-hx, hy, hz],
        ],
        [0.0, 1.0, 0.0],
    );
    push_quad(
        &mut mesh,
        [
            [-hx, -hy, -hz],
            [hx, -hy, -hz],
            [hx, -hy, hz],
            [-hx, -hy, hz],
        ],
        [0.0, -1.0, 0.0],
    );
    // Front / back (Z)
    push_quad(
        &mut mesh,
        [
            [-hx, -hy, hz],
            [hx, -hy, hz],
            [hx, hy, hz],
            [-hx, hy, hz],
        ],
        [0.0, 0.0, 1.0],
    );
    push_quad(
        &mut mesh,
        [
            [-hx, -hy, -hz],
            [hx, -hy, -hz],
            [hx, hy, -hz],
            [-hx, hy, -hz],
        ],
        [0.0, 0.0, -1.0],
    );

    mesh
}

/// Cylinder along +Y with its base circle centered at the origin.
///
/// Side normals are per-vertex radial (smooth shading); caps are flat fans.
pub fn cylinder_mesh(radius: f64, height: f64, segments: u32) -> TriangleMesh {
    let n = segments.max(3) as usize;
    let mut mesh = TriangleMesh::new();

    // Side: two shared rings.
    let base = mesh.num_vertices() as u32;
    for i in 0..n {
        let theta = TAU * (i as f64) / (n as f64);
        let (sin, cos) = theta.sin_cos();
        let (x, z) = (radius * cos, radius * sin);
        for y in [0.0, height] {
            mesh.vertices
                .extend_from_slice(&[x as f32, y as f32, z as f32]);
            mesh.normals
                .extend_from_slice(&[cos as f32, 0.0, sin as f32]);
        }
    }
    for i in 0..n as u32 {
        let next = (i + 1) % n as u32;
        let (b0, t0) = (base + 2 * i, base + 2 * i + 1);
        let (b1, t1) = (base + 2 * next, base + 2 * next + 1);
        mesh.indices.extend_from_slice(&[b0, t0, t1, b0, t1, b1]);
    }

    // Caps: dedicated rings so cap normals stay flat.
    for (y, ny) in [(0.0f64, -1.0f32), (height, 1.0f32)] {
        let center = mesh.num_vertices() as u32;
        mesh.vertices.extend_from_slice(&[0.0, y as f32, 0.0]);
        mesh.normals.extend_from_slice(&[0.0, ny, 0.0]);
        let ring = mesh.num_vertices() as u32;
        for i in 0..n {
            let theta = TAU * (i as f64) / (n as f64);
            let (sin, cos) = theta.sin_cos();
            mesh.vertices.extend_from_slice(&[
                (radius * cos) as f32,
                y as f32,
                (radius * sin) as f32,
            ]);
            mesh.normals.extend_from_slice(&[0.0, ny, 0.0]);
        }
        for i in 0..n as u32 {
            let next = (i + 1) % n as u32;
            if ny < 0.0 {
                mesh.indices
                    .extend_from_slice(&[center, ring + i, ring + next]);
            } else {
                mesh.indices
                    .extend_from_slice(&[center, ring + next, ring + i]);
            }
        }
    }

    mesh
}

/// Point on the rectangle `[-hw, hw] × [-hd, hd]` hit by a ray from the
/// center at angle `theta`.
fn rect_boundary_point(hw: f64, hd: f64, theta: f64) -> (f64, f64) {
    let (sin, cos) = theta.sin_cos();
    let tx = if cos.abs() < GEOM_EPS {
        f64::INFINITY
    } else {
        hw / cos.abs()
    };
    let tz = if sin.abs() < GEOM_EPS {
        f64::INFINITY
    } else {
        hd / sin.abs()
    };
    let t = tx.min(tz);
    (t * cos, t * sin)
}

/// A rectangular plate with a centered circular cutout — the holder frame.
///
/// Footprint `outer_w × outer_d` centered at the origin in X/Z, spanning
/// `y ∈ [0, height]`. Built as an annulus between the hole circle and the
/// rectangle boundary (top and bottom), plus the hole wall and the four
/// sampled outer walls. `hole_radius` must leave material on every side.
pub fn frame_plate_mesh(
    outer_w: f64,
    outer_d: f64,
    hole_radius: f64,
    height: f64,
    segments: u32,
) -> TriangleMesh {
    let n = segments.max(8) as usize;
    let (hw, hd) = (outer_w / 2.0, outer_d / 2.0);
    let mut mesh = TriangleMesh::new();

    for i in 0..n {
        let t0 = TAU * (i as f64) / (n as f64);
        let t1 = TAU * ((i + 1) as f64) / (n as f64);
        let tm = (t0 + t1) / 2.0;

        let (s0, c0) = (t0.sin(), t0.cos());
        let (s1, c1) = (t1.sin(), t1.cos());
        let inner0 = (hole_radius * c0, hole_radius * s0);
        let inner1 = (hole_radius * c1, hole_radius * s1);
        let outer0 = rect_boundary_point(hw, hd, t0);
        let outer1 = rect_boundary_point(hw, hd, t1);

        // Top and bottom annulus segments.
        push_quad(
            &mut mesh,
            [
                [inner0.0, height, inner0.1],
                [outer0.0, height, outer0.1],
                [outer1.0, height, outer1.1],
                [inner1.0, height, inner1.1],
            ],
            [0.0, 1.0, 0.0],
        );
        push_quad(
            &mut mesh,
            [
                [inner0.0, 0.0, inner0.1],
                [outer0.0, 0.0, outer0.1],
                [outer1.0, 0.0, outer1.1],
                [inner1.0, 0.0, inner1.1],
            ],
            [0.0, -1.0, 0.0],
        );
        // Hole wall, facing the axis.
        push_quad(
            &mut mesh,
            [
                [inner0.0, 0.0, inner0.1],
                [inner1.0, 0.0, inner1.1],
                [inner1.0, height, inner1.1],
                [inner0.0, height, inner0.1],
            ],
            [-tm.cos(), 0.0, -tm.sin()],
        );
        // Outer wall, facing away.
        push_quad(
            &mut mesh,
            [
                [outer0.0, 0.0, outer0.1],
                [outer1.0, 0.0, outer1.1],
                [outer1.0, height, outer1.1],
                [outer0.0, height, outer0.1],
            ],
            [tm.cos(), 0.0, tm.sin()],
        );
    }

    mesh
}
