use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use dragview_core::SPHERE_RADIUS;
use wgpu::{BufferAddress, VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// Slices and stacks of the textured sphere.
pub const SPHERE_SEGMENTS: u32 = 36;

/// 頂点構造体
/// 位置、法線、テクスチャ座標を含む
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// 新しい頂点を作成
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    /// 頂点バッファレイアウトを取得
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &[
                // position
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                // normal
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
                // uv
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as BufferAddress,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// メッシュ構造体
/// 頂点とインデックスを含む
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// 空のメッシュを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// Latitude/longitude sphere centred on the origin.
    ///
    /// u runs around the equator and v from the north pole (0) to the south
    /// pole (1); the seam column is duplicated so the texture wraps cleanly.
    pub fn uv_sphere(radius: f32, slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);
        let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
        let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);

        for stack in 0..=stacks {
            let v = stack as f32 / stacks as f32;
            let phi = v * PI;
            let (ring_radius, y) = phi.sin_cos();

            for slice in 0..=slices {
                let u = slice as f32 / slices as f32;
                let (sin_theta, cos_theta) = (u * TAU).sin_cos();
                let normal = [ring_radius * cos_theta, y, ring_radius * sin_theta];
                let position = normal.map(|n| n * radius);
                vertices.push(Vertex::new(position, normal, [u, v]));
            }
        }

        let row = slices + 1;
        for stack in 0..stacks {
            for slice in 0..slices {
                let a = stack * row + slice;
                let b = a + row;
                indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
            }
        }

        Self { vertices, indices }
    }

    /// The pickable sphere, radius 0.5
    pub fn textured_sphere() -> Self {
        Self::uv_sphere(SPHERE_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS)
    }

    /// Small marker drawn at a pick hit point
    pub fn marker_sphere() -> Self {
        Self::uv_sphere(0.05, 10, 10)
    }

    /// Unit cube (1x1x1, origin centred) used to box a picked sphere.
    pub fn cube() -> Self {
        // (normal, tangent, bitangent) per face
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut mesh = Self::new();
        for (normal, tangent, bitangent) in faces {
            let base = mesh.vertices.len() as u32;
            for (s, t) in corners {
                let position: [f32; 3] =
                    std::array::from_fn(|i| 0.5 * (normal[i] + s * tangent[i] + t * bitangent[i]));
                let uv = [(s + 1.0) * 0.5, (1.0 - t) * 0.5];
                mesh.vertices.push(Vertex::new(position, normal, uv));
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// 頂点数を取得
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// インデックス数を取得
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(v: [f32; 3]) -> f32 {
        v.iter().map(|c| c * c).sum::<f32>().sqrt()
    }

    #[test]
    fn test_vertex_size() {
        // (3 + 3 + 2) floats * 4 bytes = 32 bytes
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(Vertex::desc().array_stride, 32);
    }

    #[test]
    fn test_uv_sphere_counts() {
        let sphere = Mesh::uv_sphere(1.0, 8, 4);
        assert_eq!(sphere.vertex_count(), 9 * 5);
        assert_eq!(sphere.index_count(), 8 * 4 * 6);
        assert!(sphere.indices.iter().all(|&i| (i as usize) < sphere.vertex_count()));
    }

    #[test]
    fn test_uv_sphere_geometry() {
        let sphere = Mesh::textured_sphere();
        for vertex in &sphere.vertices {
            assert!((length(vertex.position) - SPHERE_RADIUS).abs() < 1e-5);
            assert!((length(vertex.normal) - 1.0).abs() < 1e-5);
            assert!(vertex.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
        // first ring is the north pole
        assert!((sphere.vertices[0].position[1] - SPHERE_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn test_uv_sphere_clamps_segments() {
        let sphere = Mesh::uv_sphere(1.0, 1, 1);
        assert_eq!(sphere.vertex_count(), 4 * 3);
    }

    #[test]
    fn test_marker_sphere_radius() {
        let marker = Mesh::marker_sphere();
        assert!(marker
            .vertices
            .iter()
            .all(|v| (length(v.position) - 0.05).abs() < 1e-6));
    }

    #[test]
    fn test_cube() {
        let cube = Mesh::cube();
        // 6 faces * 4 vertices, 2 triangles each
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.index_count(), 36);
        for vertex in &cube.vertices {
            assert!(vertex.position.iter().all(|c| (c.abs() - 0.5).abs() < 1e-6));
            let along_normal: f32 = (0..3).map(|i| vertex.position[i] * vertex.normal[i]).sum();
            assert!((along_normal - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
    }
}
