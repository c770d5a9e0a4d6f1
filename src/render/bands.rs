use artifact_core::constants::{
    BACKDROP_RING_COLOR, BACKDROP_RING_INNER, BACKDROP_RING_OPACITY, BACKDROP_RING_OUTER,
    GLOW_COLOR,
};
use artifact_core::geometry::{backdrop_matrix, band_matrix};
use artifact_core::{BandVisual, FrameOutput};
use glam::Mat4;

/// Per-draw data for one flat band; radii are expanded in the vertex shader.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BandInstance {
    model: [[f32; 4]; 4],
    // inner radius, outer radius, opacity, emissive intensity
    params: [f32; 4],
    color: [f32; 4],
}

impl BandInstance {
    fn new(model: Mat4, inner: f32, outer: f32, opacity: f32, emissive: f32, color: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            params: [inner, outer, opacity, emissive],
            color: [color[0], color[1], color[2], 1.0],
        }
    }

    fn from_band(model: Mat4, band: &BandVisual) -> Self {
        Self::new(
            model,
            band.inner_radius,
            band.outer_radius,
            band.opacity,
            band.emissive,
            band.color,
        )
    }
}

pub(crate) const TEMPLATE_ATTRS: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];

pub(crate) const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    1 => Float32x4,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4
];

pub(crate) fn template_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &TEMPLATE_ATTRS,
    }
}

pub(crate) fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<BandInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRS,
    }
}

/// Backdrop ring first, then each visible ring's outer band, inner band and ripple.
pub(crate) fn band_instances(out: &FrameOutput) -> Vec<BandInstance> {
    let mut v = Vec::with_capacity(1 + out.rings.len() * 3);
    v.push(BandInstance::new(
        backdrop_matrix(),
        BACKDROP_RING_INNER,
        BACKDROP_RING_OUTER,
        BACKDROP_RING_OPACITY,
        1.0,
        BACKDROP_RING_COLOR,
    ));
    for ring in &out.rings {
        let model = band_matrix(ring.position, ring.rotation);
        v.push(BandInstance::from_band(model, &ring.outer));
        v.push(BandInstance::from_band(model, &ring.inner));
        if let Some(r) = ring.ripple {
            v.push(BandInstance::new(
                model,
                r.inner_radius,
                r.outer_radius,
                r.opacity,
                ring.outer.emissive,
                GLOW_COLOR,
            ));
        }
    }
    v
}
