//! Texture upload.

use crate::textures::{AddressMode, FilterMode, TextureConfig};

/// A sampled 2D texture on the GPU.
pub struct GpuTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    /// True when this is the stand-in for a texture that failed to load.
    pub placeholder: bool,
}

impl GpuTexture {
    /// Upload `config` as an sRGB RGBA8 texture.
    ///
    /// A texture the device cannot hold is replaced by the white placeholder.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &TextureConfig,
        label: &str,
    ) -> Self {
        let max_dimension = device.limits().max_texture_dimension_2d;
        let placeholder;
        let config = if config.fits(max_dimension) {
            config
        } else {
            log::warn!(
                "{label}: {}x{} exceeds device limit {max_dimension}, using placeholder",
                config.width,
                config.height
            );
            placeholder = TextureConfig::placeholder();
            &placeholder
        };

        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
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
            &config.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(config.bytes_per_row()),
                rows_per_image: Some(config.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let address_mode = match config.address_mode {
            AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            AddressMode::Repeat => wgpu::AddressMode::Repeat,
        };
        let filter = match config.filter {
            FilterMode::Linear => wgpu::FilterMode::Linear,
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
        };

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            placeholder: config.placeholder,
        }
    }
}
