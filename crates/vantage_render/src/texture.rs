//! Texture decode and GPU upload
//!
//! Textures are decoded to RGBA8 on the CPU ([`TextureData`]) and uploaded
//! as a texture + sampler + bind group bundle ([`GpuTexture`]). A generated
//! checkerboard stands in when an image file is missing, so the demo runs
//! without assets on disk.

use std::path::Path;

/// CPU-side RGBA8 pixel data
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Decode an image file (png or jpeg) to RGBA8
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let image = image::open(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            pixels: image.into_raw(),
        })
    }

    /// Generate a two-color checkerboard
    pub fn checkerboard(size: u32, cell: u32, color_a: [u8; 4], color_b: [u8; 4]) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);

        for y in 0..size {
            for x in 0..size {
                let color = if ((x / cell) + (y / cell)) % 2 == 0 {
                    color_a
                } else {
                    color_b
                };
                pixels.extend_from_slice(&color);
            }
        }

        Self {
            width: size,
            height: size,
            pixels,
        }
    }
}

/// Error decoding a texture file
#[derive(Debug)]
pub enum TextureError {
    /// Decode or IO error from the image loader
    Decode(image::ImageError),
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Decode(e)
    }
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::Decode(e) => write!(f, "Texture decode error: {}", e),
        }
    }
}

impl std::error::Error for TextureError {}

/// A texture uploaded to the GPU, with its sampler and bind group
pub struct GpuTexture {
    bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    /// Upload pixel data and build the texture bind group
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        data: &TextureData,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Node Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * data.width),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Node Texture Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Node Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self { bind_group }
    }

    /// Bind group for drawing
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
