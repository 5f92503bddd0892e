//! Marching tetrahedra: surface extraction for a single tetrahedron
//!
//! Every grid cell is split into six tetrahedra around its main diagonal, so
//! no triangulation lookup table is needed. A tetrahedron has only three
//! kinds of sign configuration: uniform (nothing emitted), one corner
//! against three (one triangle) and two against two (a quad, emitted as two
//! triangles).

use glam::{UVec3, Vec3};

/// Below this value difference an edge is treated as flat
pub const DEGENERATE_EPSILON: f32 = 1e-12;

/// Cube corner offsets, numbered like marching cubes (0 and 6 are opposite)
pub const CUBE_CORNERS: [UVec3; 8] = [
    UVec3::new(0, 0, 0),
    UVec3::new(1, 0, 0),
    UVec3::new(1, 1, 0),
    UVec3::new(0, 1, 0),
    UVec3::new(0, 0, 1),
    UVec3::new(1, 0, 1),
    UVec3::new(1, 1, 1),
    UVec3::new(0, 1, 1),
];

/// Six tetrahedra sharing the 0-6 diagonal. Consecutive entries share a face,
/// and the ring 1-2-3-7-4-5 walks the cube edges around the diagonal.
pub const CELL_TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 6, 1, 2],
    [0, 6, 2, 3],
    [0, 6, 3, 7],
    [0, 6, 7, 4],
    [0, 6, 4, 5],
    [0, 6, 5, 1],
];

pub type Triangle = [Vec3; 3];

/// Bit `i` is set when corner `i` is inside (negative)
#[inline]
pub fn inside_mask(values: &[f32; 4]) -> u8 {
    values
        .iter()
        .enumerate()
        .fold(0u8, |mask, (i, &v)| if v < 0.0 { mask | (1 << i) } else { mask })
}

/// Zero crossing on the edge `p0 -> p1`, `t = -v0 / (v1 - v0)`.
///
/// Endpoints are put in a fixed order first so the shared edge of two
/// neighbouring tetrahedra yields the exact same bits. A flat edge clamps to
/// the endpoint closest to zero.
#[inline]
pub fn edge_crossing(p0: Vec3, p1: Vec3, v0: f32, v1: f32) -> Vec3 {
    let (p0, p1, v0, v1) = if precedes(p1, p0) {
        (p1, p0, v1, v0)
    } else {
        (p0, p1, v0, v1)
    };

    let delta = v1 - v0;
    let t = if delta.abs() <= DEGENERATE_EPSILON || !delta.is_finite() {
        if v0.abs() <= v1.abs() { 0.0 } else { 1.0 }
    } else {
        (-v0 / delta).clamp(0.0, 1.0)
    };
    p0.lerp(p1, t)
}

#[inline]
fn precedes(a: Vec3, b: Vec3) -> bool {
    (a.x, a.y, a.z) < (b.x, b.y, b.z)
}

/// Extract the surface of one tetrahedron, appending 0, 1 or 2 triangles.
///
/// Triangles are wound counter-clockwise seen from outside: their normal
/// points from the inside corners toward the outside corners.
pub fn polygonize_tetrahedron(corners: &[Vec3; 4], values: &[f32; 4], out: &mut Vec<Triangle>) {
    let mask = inside_mask(values);
    if mask == 0 || mask == 0b1111 {
        return;
    }

    let mut inside = [0usize; 4];
    let mut outside = [0usize; 4];
    let (mut n_in, mut n_out) = (0, 0);
    for i in 0..4 {
        if mask & (1 << i) != 0 {
            inside[n_in] = i;
            n_in += 1;
        } else {
            outside[n_out] = i;
            n_out += 1;
        }
    }
    let (inside, outside) = (&inside[..n_in], &outside[..n_out]);

    let crossing = |a: usize, b: usize| edge_crossing(corners[a], corners[b], values[a], values[b]);
    let outward = centroid(corners, outside) - centroid(corners, inside);

    match (inside, outside) {
        (&[lone], &[a, b, c]) | (&[a, b, c], &[lone]) => {
            let tri = [crossing(lone, a), crossing(lone, b), crossing(lone, c)];
            out.push(orient(tri, outward));
        }
        (&[a, b], &[c, d]) => {
            let (ac, ad) = (crossing(a, c), crossing(a, d));
            let (bd, bc) = (crossing(b, d), crossing(b, c));
            out.push(orient([ac, ad, bd], outward));
            out.push(orient([ac, bd, bc], outward));
        }
        _ => {}
    }
}

fn centroid(corners: &[Vec3; 4], ids: &[usize]) -> Vec3 {
    ids.iter().map(|&i| corners[i]).sum::<Vec3>() / ids.len() as f32
}

#[inline]
fn orient(tri: Triangle, outward: Vec3) -> Triangle {
    let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
    if normal.dot(outward) < 0.0 {
        [tri[0], tri[2], tri[1]]
    } else {
        tri
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const UNIT_TET: [Vec3; 4] = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ];

    fn values_for_mask(mask: u8) -> [f32; 4] {
        std::array::from_fn(|i| if mask & (1 << i) != 0 { -0.5 } else { 0.5 })
    }

    #[test]
    fn triangle_count_per_mask() {
        for mask in 0u8..16 {
            let mut out = Vec::new();
            polygonize_tetrahedron(&UNIT_TET, &values_for_mask(mask), &mut out);
            let expected = match mask.count_ones() {
                0 | 4 => 0,
                1 | 3 => 1,
                _ => 2,
            };
            assert_eq!(out.len(), expected, "mask {mask:04b}");
        }
    }

    #[test]
    fn mask_counts_negative_corners() {
        assert_eq!(inside_mask(&[-1.0, 1.0, 0.0, -0.1]), 0b1001);
        // Exactly zero counts as outside
        assert_eq!(inside_mask(&[0.0, 0.0, 0.0, 0.0]), 0);
    }

    #[test]
    fn crossing_interpolates_linearly() {
        let p = edge_crossing(Vec3::ZERO, Vec3::X, -0.25, 0.75);
        assert_relative_eq!(p.x, 0.25, epsilon = 1e-6);
        // Same edge walked the other way lands on the same bits
        let q = edge_crossing(Vec3::X, Vec3::ZERO, 0.75, -0.25);
        assert_eq!(p, q);
    }

    #[test]
    fn flat_edge_clamps_to_an_endpoint() {
        let p = edge_crossing(Vec3::ZERO, Vec3::Y, -0.0, 0.0);
        assert!(p.is_finite());
        assert!(p == Vec3::ZERO || p == Vec3::Y);

        let q = edge_crossing(Vec3::ZERO, Vec3::Y, 1e-14, -1e-14);
        assert!(q.is_finite());
    }

    #[test]
    fn vertices_lie_on_linear_zero_set() {
        // f(p) = x + y + z - 0.4 is reproduced exactly by linear interpolation
        let f = |p: Vec3| p.x + p.y + p.z - 0.4;
        for tet in CELL_TETRAHEDRA {
            let corners = tet.map(|c| CUBE_CORNERS[c].as_vec3());
            let values = corners.map(f);
            let mut out = Vec::new();
            polygonize_tetrahedron(&corners, &values, &mut out);
            for tri in out {
                for v in tri {
                    assert_relative_eq!(f(v), 0.0, epsilon = 1e-5);
                }
            }
        }
    }

    #[test]
    fn triangles_face_outward() {
        // Inside is x < 0.5, so normals must point toward +X
        let f = |p: Vec3| p.x - 0.5;
        let mut out = Vec::new();
        for tet in CELL_TETRAHEDRA {
            let corners = tet.map(|c| CUBE_CORNERS[c].as_vec3());
            polygonize_tetrahedron(&corners, &corners.map(f), &mut out);
        }
        assert!(!out.is_empty());
        for tri in out {
            let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            assert!(n.x > 0.0, "normal {n:?}");
        }
    }

    #[test]
    fn decomposition_covers_the_cube() {
        let volume: f32 = CELL_TETRAHEDRA
            .iter()
            .map(|tet| {
                let [a, b, c, d] = tet.map(|i| CUBE_CORNERS[i].as_vec3());
                ((b - a).cross(c - a).dot(d - a)).abs() / 6.0
            })
            .sum();
        assert_relative_eq!(volume, 1.0, epsilon = 1e-6);
    }
}
