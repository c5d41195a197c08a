//! Texture loading and render-target helpers.

use std::path::{Path, PathBuf};

use thiserror::Error;
use wgpu::util::DeviceExt;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cubemap face {path} is {got_width}x{got_height}, expected {width}x{height}")]
    FaceSize {
        path: PathBuf,
        width: u32,
        height: u32,
        got_width: u32,
        got_height: u32,
    },
    #[error("cubemap face {path} is not square ({width}x{height})")]
    NotSquare { path: PathBuf, width: u32, height: u32 },
    #[error("{label} is {width}x{height}, larger than the device limit of {max}")]
    TooLarge {
        label: String,
        width: u32,
        height: u32,
        max: u32,
    },
}

/// A texture with its view and sampler.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// Colour format of every offscreen HDR target.
    pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

    /// Create a depth texture for the given size.
    pub fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32, label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Depth Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self { texture, view, sampler }
    }

    /// Create a 1x1 white texture. Used as the fallback for failed loads.
    pub fn white_pixel(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::upload_rgba8(
            device,
            queue,
            &[255, 255, 255, 255],
            1,
            1,
            true,
            wgpu::AddressMode::Repeat,
            "White Pixel",
        )
    }

    /// Upload tightly packed RGBA8 pixels, rejecting sizes the device cannot hold.
    #[allow(clippy::too_many_arguments)]
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
        srgb: bool,
        address_mode: wgpu::AddressMode,
        label: &str,
    ) -> Result<Self, TextureError> {
        check_dimensions(label, width, height, device.limits().max_texture_dimension_2d)?;
        Ok(Self::upload_rgba8(
            device,
            queue,
            pixels,
            width,
            height,
            srgb,
            address_mode,
            label,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn upload_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
        srgb: bool,
        address_mode: wgpu::AddressMode,
        label: &str,
    ) -> Self {
        let format = if srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self { texture, view, sampler }
    }

    /// Decode an image file and upload it.
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        srgb: bool,
        address_mode: wgpu::AddressMode,
    ) -> Result<Self, TextureError> {
        let rgba = image::open(path)
            .map_err(|source| TextureError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        let label = path.display().to_string();
        Self::from_rgba8(
            device,
            queue,
            rgba.as_raw(),
            width,
            height,
            srgb,
            address_mode,
            &label,
        )
    }

    /// Like [`Texture::from_path`], but a failure is logged and a white pixel is returned instead.
    pub fn load_or_white(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        srgb: bool,
        address_mode: wgpu::AddressMode,
    ) -> Self {
        match Self::from_path(device, queue, path, srgb, address_mode) {
            Ok(texture) => {
                log::debug!("Loaded texture {}", path.display());
                texture
            }
            Err(e) => {
                log::error!("Texture failed to load: {e}");
                Self::white_pixel(device, queue)
            }
        }
    }
}

/// Cubemap face file names in wgpu layer order (+X, -X, +Y, -Y, +Z, -Z).
pub const CUBE_FACES: [&str; 6] = [
    "right.jpg",
    "left.jpg",
    "top.jpg",
    "bottom.jpg",
    "front.jpg",
    "back.jpg",
];

/// Six-layer cube texture for the skybox.
pub struct CubeTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl CubeTexture {
    /// Load the six faces from `dir`. Any face failing to decode, exceeding the device
    /// limit or not matching the first face's size aborts the whole cubemap.
    pub fn load(device: &wgpu::Device, queue: &wgpu::Queue, dir: &Path) -> Result<Self, TextureError> {
        let max = device.limits().max_texture_dimension_2d;
        let mut size: Option<(u32, u32)> = None;
        let mut data = Vec::new();

        for face in CUBE_FACES {
            let path = dir.join(face);
            let rgba = match image::open(&path) {
                Ok(img) => img.to_rgba8(),
                Err(source) => {
                    log::error!("Cubemap texture failed to load at path: {}", path.display());
                    return Err(TextureError::Image { path, source });
                }
            };
            let (w, h) = rgba.dimensions();
            if let Err(e) = check_dimensions(&path.display().to_string(), w, h, max) {
                log::error!("Cubemap texture failed to load: {e}");
                return Err(e);
            }
            check_face_size(&path, size, w, h)?;
            size.get_or_insert((w, h));
            data.extend_from_slice(rgba.as_raw());
        }

        let (width, height) = size.unwrap_or((1, 1));
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("Skybox Cubemap"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 6,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &data,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Skybox Cubemap View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Skybox Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self { texture, view, sampler })
    }
}

/// Reject textures wider or taller than `max` texels.
fn check_dimensions(label: &str, width: u32, height: u32, max: u32) -> Result<(), TextureError> {
    if width > max || height > max {
        return Err(TextureError::TooLarge {
            label: label.to_string(),
            width,
            height,
            max,
        });
    }
    Ok(())
}

fn check_face_size(path: &Path, first: Option<(u32, u32)>, w: u32, h: u32) -> Result<(), TextureError> {
    if w != h {
        return Err(TextureError::NotSquare {
            path: path.to_path_buf(),
            width: w,
            height: h,
        });
    }
    match first {
        Some((width, height)) if (width, height) != (w, h) => Err(TextureError::FaceSize {
            path: path.to_path_buf(),
            width,
            height,
            got_width: w,
            got_height: h,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_face_sets_the_size() {
        assert!(check_face_size(Path::new("right.jpg"), None, 512, 512).is_ok());
        assert!(check_face_size(Path::new("left.jpg"), Some((512, 512)), 512, 512).is_ok());
    }

    #[test]
    fn mismatched_face_is_rejected() {
        let err = check_face_size(Path::new("top.jpg"), Some((512, 512)), 256, 256).unwrap_err();
        assert!(matches!(err, TextureError::FaceSize { got_width: 256, .. }));
        assert!(err.to_string().contains("top.jpg"));
    }

    #[test]
    fn non_square_face_is_rejected() {
        let err = check_face_size(Path::new("back.jpg"), None, 512, 256).unwrap_err();
        assert!(matches!(err, TextureError::NotSquare { .. }));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let path = Path::new("definitely/not/here.png");
        let err = image::open(path)
            .map_err(|source| TextureError::Image {
                path: path.to_path_buf(),
                source,
            })
            .err();
        let msg = err.map(|e| e.to_string()).unwrap_or_default();
        assert!(msg.contains("definitely/not/here.png"));
    }

    #[test]
    fn dimensions_up_to_the_limit_are_accepted() {
        assert!(check_dimensions("brick.jpg", 8192, 8192, 8192).is_ok());
        assert!(check_dimensions("brick.jpg", 1, 1, 8192).is_ok());
    }

    #[test]
    fn oversized_image_is_rejected() {
        let err = check_dimensions("grass.png", 8193, 4, 8192).unwrap_err();
        assert!(matches!(
            err,
            TextureError::TooLarge { width: 8193, height: 4, max: 8192, .. }
        ));
        assert!(err.to_string().contains("grass.png"));

        let err = check_dimensions("tall.png", 4, 8193, 8192).unwrap_err();
        assert!(matches!(err, TextureError::TooLarge { height: 8193, .. }));
    }

    #[test]
    fn oversized_file_falls_back_to_white() {
        let Some((device, queue)) = crate::renderer::headless_device() else {
            return;
        };
        crate::renderer::log_device_errors(&device);
        let max = device.limits().max_texture_dimension_2d;

        let path = std::env::temp_dir().join(format!("panda-run-wide-{}.png", std::process::id()));
        image::RgbaImage::new(max + 1, 1).save(&path).unwrap();

        let err = Texture::from_path(&device, &queue, &path, true, wgpu::AddressMode::Repeat)
            .err()
            .unwrap();
        assert!(matches!(err, TextureError::TooLarge { .. }));

        let texture = Texture::load_or_white(&device, &queue, &path, true, wgpu::AddressMode::Repeat);
        assert_eq!((texture.texture.width(), texture.texture.height()), (1, 1));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn oversized_cube_face_aborts_the_cubemap() {
        let Some((device, queue)) = crate::renderer::headless_device() else {
            return;
        };
        crate::renderer::log_device_errors(&device);
        let max = device.limits().max_texture_dimension_2d;

        let dir = std::env::temp_dir().join(format!("panda-run-sky-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // the size limit is checked before squareness, so one row is enough
        image::RgbImage::new(max + 1, 1)
            .save(dir.join(CUBE_FACES[0]))
            .unwrap();

        let err = CubeTexture::load(&device, &queue, &dir).err().unwrap();
        assert!(matches!(err, TextureError::TooLarge { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn face_order_matches_layer_order() {
        assert_eq!(CUBE_FACES[0], "right.jpg");
        assert_eq!(CUBE_FACES[4], "front.jpg");
    }
}
