// mesh.rs — 顶点/UV 缓冲与面顶点数
//
// 顶点 i 与 UV i 描述同一个角点，两者长度始终等于面顶点数之和。

use glam::{DVec2, DVec3};
use serde::Serialize;

/// Interleaved single-precision vertex, ready for GPU upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh {
    positions: Vec<DVec3>,
    uvs: Vec<DVec2>,
    face_vertex_counts: Vec<u32>,
}

impl Mesh {
    /// Empty mesh with a fixed face layout, e.g. `[4, 4, 4]` for three quads.
    pub fn with_faces(face_vertex_counts: &[u32]) -> Self {
        let n: usize = face_vertex_counts.iter().map(|&c| c as usize).sum();
        Self {
            positions: vec![DVec3::ZERO; n],
            uvs: vec![DVec2::ZERO; n],
            face_vertex_counts: face_vertex_counts.to_vec(),
        }
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn uvs(&self) -> &[DVec2] {
        &self.uvs
    }

    pub fn face_vertex_counts(&self) -> &[u32] {
        &self.face_vertex_counts
    }

    pub fn vertex_count(&self) -> usize {
        self.face_vertex_counts.iter().map(|&c| c as usize).sum()
    }

    /// Swap in a fully built position buffer.
    pub fn replace_positions(&mut self, positions: Vec<DVec3>) {
        debug_assert_eq!(positions.len(), self.vertex_count());
        self.positions = positions;
    }

    /// Swap in a fully built UV buffer.
    pub fn replace_uvs(&mut self, uvs: Vec<DVec2>) {
        debug_assert_eq!(uvs.len(), self.vertex_count());
        self.uvs = uvs;
    }

    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.uvs)
            .map(|(p, uv)| Vertex {
                position: p.as_vec3().to_array(),
                uv: uv.as_vec2().to_array(),
            })
            .collect()
    }

    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }

    /// Triangle list for renderers without polygon faces; each face is fanned from its first corner.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut indices = Vec::new();
        let mut first = 0u32;

        for &count in &self.face_vertex_counts {
            for k in 1..count.saturating_sub(1) {
                indices.extend_from_slice(&[first, first + k, first + k + 1]);
            }
            first += count;
        }

        indices
    }
}
