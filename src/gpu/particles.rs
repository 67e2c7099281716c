//! Particle pipeline.
//!
//! Every particle is its own draw call over the shared cube. Per-particle
//! data lives in one uniform buffer with a slot per pool entry; each draw
//! binds its slot through a dynamic offset.

use std::num::NonZeroU64;

use glam::Mat4;

use super::geometry::{self, CUBE_VERTEX_COUNT};
use super::{create_pipeline, upload_mesh, GpuContext, GpuTexture, PipelineDesc, SceneBindings};
use crate::error::GpuError;
use crate::render::{DrawSubmitter, ParticleDraw};
use crate::system::ParticleSystem;
use crate::textures::TextureConfig;

const DRAW_SIZE: usize = std::mem::size_of::<ParticleDraw>();

/// Additive blending: source weighted by its alpha, destination kept.
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// CPU mirror of the per-particle uniform buffer.
///
/// Submissions are packed at `stride` byte intervals so each one sits on a
/// valid dynamic offset.
#[derive(Debug)]
pub struct DrawStaging {
    bytes: Vec<u8>,
    stride: usize,
    count: u32,
}

impl DrawStaging {
    /// Room for `capacity` draws, each aligned to `alignment` bytes.
    ///
    /// Fails without allocating when the packed size overflows or exceeds
    /// `limit` bytes.
    pub fn new(capacity: usize, alignment: usize, limit: u64) -> Result<Self, GpuError> {
        let stride = aligned_stride(alignment);
        let too_large = |required: u64| GpuError::PoolTooLarge {
            capacity,
            required,
            limit,
        };

        let size = capacity
            .checked_mul(stride)
            .ok_or_else(|| too_large(u64::MAX))?;
        let required = u64::try_from(size).map_err(|_| too_large(u64::MAX))?;
        if required > limit {
            return Err(too_large(required));
        }

        Ok(Self {
            bytes: vec![0; size],
            stride,
            count: 0,
        })
    }

    /// Size of the packed buffer in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Draws submitted since the last clear.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len() / self.stride
    }

    /// Dynamic offset of draw `index`.
    pub fn offset(&self, index: u32) -> u32 {
        (index as usize * self.stride) as u32
    }

    /// The bytes that hold submitted draws.
    pub fn filled(&self) -> &[u8] {
        &self.bytes[..self.count as usize * self.stride]
    }

    pub fn draw(&self, index: u32) -> Option<ParticleDraw> {
        if index >= self.count {
            return None;
        }
        let start = index as usize * self.stride;
        Some(bytemuck::pod_read_unaligned(
            &self.bytes[start..start + DRAW_SIZE],
        ))
    }
}

impl DrawSubmitter for DrawStaging {
    fn submit(&mut self, draw: ParticleDraw) {
        let start = self.count as usize * self.stride;
        let Some(slot) = self.bytes.get_mut(start..start + DRAW_SIZE) else {
            // More draws than slots: the renderer was sized for a smaller pool
            debug_assert!(false, "draw staging overflow at {}", self.count);
            return;
        };
        slot.copy_from_slice(bytemuck::bytes_of(&draw));
        self.count += 1;
    }
}

/// Round the draw size up to the device's uniform offset alignment.
fn aligned_stride(alignment: usize) -> usize {
    let alignment = alignment.max(1);
    DRAW_SIZE.div_ceil(alignment) * alignment
}

/// Draws a particle pool as textured, additively blended cubes.
pub struct ParticleRenderer {
    pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    uv_buffer: wgpu::Buffer,
    scene: SceneBindings,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    staging: DrawStaging,
    texture: GpuTexture,
}

impl ParticleRenderer {
    /// Build the pipeline and a per-particle buffer for `capacity` particles.
    pub fn new(
        gpu: &GpuContext,
        texture: &TextureConfig,
        shader_source: &str,
        capacity: usize,
    ) -> Result<Self, GpuError> {
        let device = &gpu.device;
        let limits = device.limits();

        let staging = DrawStaging::new(
            capacity.max(1),
            limits.min_uniform_buffer_offset_alignment as usize,
            limits.max_buffer_size,
        )?;

        let texture = GpuTexture::upload(device, &gpu.queue, texture, "Particle Texture");
        let scene = SceneBindings::new(device, &texture, "Particle Scene");

        let (position_buffer, uv_buffer) = upload_mesh(device, &geometry::cube(), "Particle Cube");

        let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Draws"),
            size: staging.size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Particle Draw Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(DRAW_SIZE as u64),
                },
                count: None,
            }],
        });

        let draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Draw Bind Group"),
            layout: &draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &draw_buffer,
                    offset: 0,
                    size: NonZeroU64::new(DRAW_SIZE as u64),
                }),
            }],
        });

        let pipeline = create_pipeline(
            device,
            &PipelineDesc {
                label: "Particle Pipeline",
                source: shader_source,
                bind_group_layouts: &[&scene.layout, &draw_layout],
                color_format: gpu.format(),
                blend: ADDITIVE,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
            },
        );

        log::debug!(
            "particle renderer: {} slots, {} byte stride",
            staging.capacity(),
            staging.stride()
        );

        Ok(Self {
            pipeline,
            position_buffer,
            uv_buffer,
            scene,
            draw_buffer,
            draw_bind_group,
            staging,
            texture,
        })
    }

    pub fn set_view_projection(&self, queue: &wgpu::Queue, mvp: Mat4) {
        self.scene.write_mvp(queue, mvp);
    }

    /// Collect this frame's draws from `system` and upload them.
    pub fn prepare<R>(&mut self, queue: &wgpu::Queue, system: &ParticleSystem<R>) {
        self.staging.clear();
        system.render(&mut self.staging);
        if self.staging.count() > 0 {
            queue.write_buffer(&self.draw_buffer, 0, self.staging.filled());
        }
    }

    /// Record one draw per prepared particle.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.staging.count() == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.scene.bind_group, &[]);
        pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        pass.set_vertex_buffer(1, self.uv_buffer.slice(..));
        for i in 0..self.staging.count() {
            pass.set_bind_group(1, &self.draw_bind_group, &[self.staging.offset(i)]);
            pass.draw(0..CUBE_VERTEX_COUNT, 0..1);
        }
    }

    /// Draws recorded by the last [`prepare`](Self::prepare).
    pub fn drawn(&self) -> u32 {
        self.staging.count()
    }

    pub fn uses_placeholder_texture(&self) -> bool {
        self.texture.placeholder
    }
}
