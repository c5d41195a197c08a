//! Offscreen render targets for the bloom chain: the two-output scene target and the
//! blur ping-pong pair.

use thiserror::Error;

use crate::texture::Texture;

/// Why an offscreen target cannot be rendered to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TargetError {
    #[error("zero-sized target ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },
    #[error("{width}x{height} exceeds the device limit of {max}")]
    TooLarge { width: u32, height: u32, max: u32 },
    #[error("format {format:?} cannot be both rendered to and sampled")]
    UnsupportedFormat { format: wgpu::TextureFormat },
    #[error("backend rejected the target: {0}")]
    Backend(String),
}

/// Check that a `width` x `height` target of `format` can be attached and later sampled.
pub fn check_target_complete(
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    max_dimension: u32,
    features: wgpu::Features,
) -> Result<(), TargetError> {
    if width == 0 || height == 0 {
        return Err(TargetError::ZeroSize { width, height });
    }
    if width > max_dimension || height > max_dimension {
        return Err(TargetError::TooLarge {
            width,
            height,
            max: max_dimension,
        });
    }
    let needed = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
    if !format
        .guaranteed_format_features(features)
        .allowed_usages
        .contains(needed)
    {
        return Err(TargetError::UnsupportedFormat { format });
    }
    Ok(())
}

/// Run `create` inside a validation error scope after checking every format.
/// Problems are logged and the (possibly invalid) resource is still returned.
fn create_checked<T>(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    formats: &[wgpu::TextureFormat],
    create: impl FnOnce() -> T,
) -> T {
    let max = device.limits().max_texture_dimension_2d;
    for &format in formats {
        if let Err(e) = check_target_complete(format, width, height, max, device.features()) {
            log::error!("Offscreen target not complete: {label}: {e}");
        }
    }

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let resource = create();
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        let e = TargetError::Backend(err.to_string());
        log::error!("Offscreen target not complete: {label}: {e}");
    }
    resource
}

/// A sampled colour attachment.
pub struct ColorTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl ColorTarget {
    fn new(device: &wgpu::Device, width: u32, height: u32, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Texture::HDR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Geometry pass target: colour 0 is the lit scene, colour 1 the bright-only output.
pub struct SceneTarget {
    pub color: ColorTarget,
    pub bright: ColorTarget,
    pub depth: Texture,
}

impl SceneTarget {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        create_checked(
            device,
            "scene target",
            width,
            height,
            &[Texture::HDR_FORMAT, Texture::DEPTH_FORMAT],
            || Self {
                color: ColorTarget::new(device, width, height, "Scene Color"),
                bright: ColorTarget::new(device, width, height, "Scene Bright"),
                depth: Texture::create_depth_texture(device, width, height, "Scene Depth"),
            },
        )
    }
}

/// The two blur buffers, alternately read and written.
pub struct PingPong {
    pub buffers: [ColorTarget; 2],
}

impl PingPong {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        create_checked(device, "ping-pong pair", width, height, &[Texture::HDR_FORMAT], || Self {
            buffers: [
                ColorTarget::new(device, width, height, "Ping-Pong 0"),
                ColorTarget::new(device, width, height, "Ping-Pong 1"),
            ],
        })
    }

    pub fn view(&self, index: usize) -> &wgpu::TextureView {
        &self.buffers[index].view
    }
}
