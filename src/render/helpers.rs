use wgpu;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub fn create_texture(
    device: &wgpu::Device,
    label: &str,
    size: wgpu::Extent3d,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
    view_dimension: wgpu::TextureViewDimension,
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    });
    let view = tex.create_view(&wgpu::TextureViewDescriptor {
        label: Some(label),
        dimension: Some(view_dimension),
        ..Default::default()
    });
    (tex, view)
}

pub fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    create_texture(
        device,
        "depth_tex",
        wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        DEPTH_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT,
        wgpu::TextureViewDimension::D2,
    )
}

/// Page texture array with one layer per page image.
pub fn create_page_array(
    device: &wgpu::Device,
    width: u32,
    height: u32,
    layers: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    create_texture(
        device,
        "page_array",
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: layers.max(1),
        },
        wgpu::TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::RENDER_ATTACHMENT,
        wgpu::TextureViewDimension::D2Array,
    )
}
