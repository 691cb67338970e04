// Leaf strip mesh shared by every leaf instance.
// No wgpu types here so the host tests can include this file.

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LeafVertex {
    /// fraction across the width from the spine, fraction up the height
    pub grid: [f32; 2],
}

/// Two rows of `segments + 1` vertices and counter-clockwise triangles
/// as seen from +z with the leaf flat on the right of the spine.
pub fn leaf_grid(segments: u16) -> (Vec<LeafVertex>, Vec<u16>) {
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity((segments as usize + 1) * 2);
    for i in 0..=segments {
        let s = i as f32 / segments as f32;
        vertices.push(LeafVertex { grid: [s, 0.0] });
        vertices.push(LeafVertex { grid: [s, 1.0] });
    }
    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let bl = i * 2;
        let tl = bl + 1;
        let br = bl + 2;
        let tr = bl + 3;
        indices.extend_from_slice(&[bl, br, tl, tl, br, tr]);
    }
    (vertices, indices)
}
