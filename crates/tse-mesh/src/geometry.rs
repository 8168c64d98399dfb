use std::f32::consts::TAU;

use serde::Serialize;

/// One mesh vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vertex {
    /// Position `[x, y, z]`.
    pub position: [f32; 3],
    /// Unit normal `[nx, ny, nz]`.
    pub normal: [f32; 3],
}

/// An unbatched vertex + index buffer, usually one cell or one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawGeometry {
    /// Vertex buffer.
    pub vertices: Vec<Vertex>,
    /// Triangle list into `vertices`.
    pub indices: Vec<u32>,
}

impl RawGeometry {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Move every vertex by `offset`.
    pub fn translate(mut self, offset: [f32; 3]) -> Self {
        for v in &mut self.vertices {
            v.position[0] += offset[0];
            v.position[1] += offset[1];
            v.position[2] += offset[2];
        }
        self
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` when empty.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (
                std::array::from_fn(|axis| lo[axis].min(v.position[axis])),
                std::array::from_fn(|axis| hi[axis].max(v.position[axis])),
            )
        }))
    }

    fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex { position, normal });
        index
    }

    /// Quad from a centre and two half-edge vectors whose cross product
    /// points along `normal`.
    fn push_quad(&mut self, center: [f32; 3], u: [f32; 3], v: [f32; 3], normal: [f32; 3]) {
        let corner = |su: f32, sv: f32| {
            [
                center[0] + su * u[0] + sv * v[0],
                center[1] + su * u[1] + sv * v[1],
                center[2] + su * u[2] + sv * v[2],
            ]
        };
        let a = self.push_vertex(corner(-1.0, -1.0), normal);
        let b = self.push_vertex(corner(1.0, -1.0), normal);
        let c = self.push_vertex(corner(1.0, 1.0), normal);
        let d = self.push_vertex(corner(-1.0, 1.0), normal);
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
}

/// Box centred on the origin. 24 vertices, 12 triangles.
pub fn box_geometry(width: f32, height: f32, depth: f32) -> RawGeometry {
    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    // (normal, u, v) per face with u x v == normal.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, hy, 0.0], [0.0, 0.0, hz]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, hz], [0.0, hy, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, hz], [hx, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [hx, 0.0, 0.0], [0.0, 0.0, hz]),
        ([0.0, 0.0, 1.0], [hx, 0.0, 0.0], [0.0, hy, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, hy, 0.0], [hx, 0.0, 0.0]),
    ];

    let mut geometry = RawGeometry::default();
    for (normal, u, v) in faces {
        let center = [normal[0] * hx, normal[1] * hy, normal[2] * hz];
        geometry.push_quad(center, u, v, normal);
    }
    geometry
}

/// Horizontal rectangle at `y = 0` facing up. 4 vertices, 2 triangles.
pub fn plane_geometry(width: f32, depth: f32) -> RawGeometry {
    let mut geometry = RawGeometry::default();
    geometry.push_quad(
        [0.0, 0.0, 0.0],
        [0.0, 0.0, depth / 2.0],
        [width / 2.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    );
    geometry
}

/// Capped frustum along `y`, centred on the origin.
///
/// A zero radius collapses that end to a point and drops its cap, which is
/// how cones are made.
pub fn cylinder_geometry(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
) -> RawGeometry {
    let radial = radial_segments.max(3);
    let rows = height_segments.max(1);
    let half = height / 2.0;
    let slope = if height == 0.0 {
        0.0
    } else {
        (radius_bottom - radius_top) / height
    };

    let mut geometry = RawGeometry::default();

    // Side wall, top row first.
    let mut grid = Vec::with_capacity(((rows + 1) * (radial + 1)) as usize);
    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            let normal = normalize([sin, slope, cos]);
            grid.push(geometry.push_vertex([radius * sin, half - v * height, radius * cos], normal));
        }
    }
    let at = |x: u32, y: u32| grid[(y * (radial + 1) + x) as usize];
    for x in 0..radial {
        for y in 0..rows {
            let a = at(x, y);
            let b = at(x, y + 1);
            let c = at(x + 1, y + 1);
            let d = at(x + 1, y);
            if radius_top > 0.0 || y != 0 {
                geometry.indices.extend_from_slice(&[a, b, d]);
            }
            if radius_bottom > 0.0 || y != rows - 1 {
                geometry.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    if radius_top > 0.0 {
        push_cap(&mut geometry, radius_top, half, radial, true);
    }
    if radius_bottom > 0.0 {
        push_cap(&mut geometry, radius_bottom, -half, radial, false);
    }
    geometry
}

/// Cone with its tip up, centred on the origin.
pub fn cone_geometry(radius: f32, height: f32, radial_segments: u32, height_segments: u32) -> RawGeometry {
    cylinder_geometry(0.0, radius, height, radial_segments, height_segments)
}

fn push_cap(geometry: &mut RawGeometry, radius: f32, y: f32, radial: u32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = [0.0, sign, 0.0];

    let centers: Vec<u32> = (0..radial)
        .map(|_| geometry.push_vertex([0.0, y, 0.0], normal))
        .collect();
    let ring: Vec<u32> = (0..=radial)
        .map(|x| {
            let theta = x as f32 / radial as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            geometry.push_vertex([radius * sin, y, radius * cos], normal)
        })
        .collect();

    for (&c, edge) in centers.iter().zip(ring.windows(2)) {
        let (i, j) = (edge[0], edge[1]);
        if top {
            geometry.indices.extend_from_slice(&[i, j, c]);
        } else {
            geometry.indices.extend_from_slice(&[j, i, c]);
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len == 0.0 {
        v
    } else {
        [v[0] / len, v[1] / len, v[2] / len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn assert_outward_winding(geometry: &RawGeometry) {
        for tri in geometry.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| geometry.vertices[i as usize]);
            let face = cross(sub(b.position, a.position), sub(c.position, a.position));
            let dot = face[0] * a.normal[0] + face[1] * a.normal[1] + face[2] * a.normal[2];
            assert!(dot > 0.0, "triangle {tri:?} winds against its normal");
        }
    }

    #[test]
    fn box_counts_and_bounds() {
        let geometry = box_geometry(1.0, 4.0, 1.0);
        assert_eq!(geometry.vertex_count(), 24);
        assert_eq!(geometry.triangle_count(), 12);
        assert_eq!(geometry.bounds(), Some(([-0.5, -2.0, -0.5], [0.5, 2.0, 0.5])));
        assert_outward_winding(&geometry);
    }

    #[test]
    fn plane_faces_up() {
        let geometry = plane_geometry(1.0, 1.0);
        assert_eq!(geometry.vertex_count(), 4);
        assert_eq!(geometry.triangle_count(), 2);
        assert!(geometry.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
        assert_outward_winding(&geometry);
    }

    #[test]
    fn cone_drops_tip_triangles_and_top_cap() {
        let geometry = cone_geometry(0.4, 2.0, 4, 4);
        // Wall 5x5 + bottom cap 4 centres + 5 ring.
        assert_eq!(geometry.vertex_count(), 34);
        // Wall 4*4*2 minus 4 degenerate tip triangles, cap 4.
        assert_eq!(geometry.triangle_count(), 32);
        let (lo, hi) = geometry.bounds().unwrap();
        assert!((lo[1] + 1.0).abs() < 1e-6);
        assert!((hi[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cylinder_has_both_caps() {
        let geometry = cylinder_geometry(0.4, 0.4, 1.0, 8, 1);
        assert_eq!(geometry.vertex_count(), 18 + 2 * 17);
        assert_eq!(geometry.triangle_count(), 16 + 2 * 8);
    }

    #[test]
    fn translate_moves_bounds() {
        let geometry = box_geometry(1.0, 1.0, 1.0).translate([3.0, 0.5, -2.0]);
        assert_eq!(geometry.bounds(), Some(([2.5, 0.0, -2.5], [3.5, 1.0, -1.5])));
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        assert_eq!(RawGeometry::default().bounds(), None);
    }
}
