//! Diffuse textures
//!
//! Images are decoded with the `image` crate, converted to RGBA8 and uploaded
//! as sRGB with a full mip chain built on the CPU. Sampling repeats in both
//! directions with linear filtering between texels and between mip levels.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Error creating a texture
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// File missing, unreadable, or not a supported image format
    #[error("failed to load texture '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    /// Width or height is zero
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
}

/// Number of mip levels down to 1x1 for the given size
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    (width.max(height) as f32).log2().floor() as u32 + 1
}

/// Build every mip level of `base`, largest first
///
/// Each level halves the previous one (rounding down, never below 1).
pub fn build_mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let count = mip_level_count(base.width(), base.height());
    let mut levels = Vec::with_capacity(count as usize);
    levels.push(base.clone());

    for _ in 1..count {
        let prev = &levels[levels.len() - 1];
        let width = (prev.width() / 2).max(1);
        let height = (prev.height() / 2).max(1);
        let next = imageops::resize(prev, width, height, FilterType::Triangle);
        levels.push(next);
    }

    levels
}

/// A sampled GPU texture
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
    pub mip_level_count: u32,
}

impl Texture {
    /// Decode and upload an image file
    pub fn from_path<P: AsRef<Path>>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: P,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let image = image::open(path)
            .map_err(|source| TextureError::Decode { path: label.clone(), source })?
            .to_rgba8();

        let texture = Self::from_image(device, queue, &image, &label)?;
        log::info!(
            "Loaded texture {} ({}x{}, {} mip levels)",
            label,
            texture.size.0,
            texture.size.1,
            texture.mip_level_count
        );
        Ok(texture)
    }

    /// Upload an RGBA8 image with its mip chain
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Result<Self, TextureError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroDimensions { width, height });
        }
        Ok(Self::upload(device, queue, image, label))
    }

    /// 1x1 texture of a single color
    ///
    /// Used for bodies without a texture, so the object color shows through
    /// unchanged, and in place of textures that fail to load.
    pub fn solid(device: &wgpu::Device, queue: &wgpu::Queue, rgba: [u8; 4]) -> Self {
        let image = RgbaImage::from_pixel(1, 1, image::Rgba(rgba));
        Self::upload(device, queue, &image, "Solid Texture")
    }

    /// Create the texture and write every mip level; `image` must not be empty
    fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &RgbaImage, label: &str) -> Self {
        let (width, height) = image.dimensions();
        let levels = build_mip_chain(image);
        let mip_level_count = levels.len() as u32;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, data) in levels.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                data.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * data.width()),
                    rows_per_image: Some(data.height()),
                },
                wgpu::Extent3d {
                    width: data.width(),
                    height: data.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Diffuse Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
            mip_level_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_level_count() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(2048, 1024), 12);
        assert_eq!(mip_level_count(300, 7), 9);
    }

    #[test]
    fn test_mip_chain_halves_down_to_one() {
        let base = RgbaImage::from_pixel(16, 4, image::Rgba([255, 0, 0, 255]));
        let chain = build_mip_chain(&base);
        let sizes: Vec<(u32, u32)> = chain.iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, vec![(16, 4), (8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn test_mip_chain_preserves_flat_color() {
        let base = RgbaImage::from_pixel(8, 8, image::Rgba([10, 200, 30, 255]));
        let chain = build_mip_chain(&base);
        let pixel = chain.last().unwrap().get_pixel(0, 0);
        for (got, want) in pixel.0.iter().zip([10u8, 200, 30, 255]) {
            assert!(got.abs_diff(want) <= 1, "got {:?}", pixel);
        }
    }

    #[test]
    fn test_single_pixel_has_one_level() {
        let base = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]));
        assert_eq!(build_mip_chain(&base).len(), 1);
    }
}
