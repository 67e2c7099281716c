//! Textured backdrop quad.

use glam::Mat4;

use super::geometry::{self, QUAD_VERTEX_COUNT};
use super::{create_pipeline, upload_mesh, GpuContext, GpuTexture, PipelineDesc, SceneBindings};
use crate::textures::{AddressMode, TextureConfig};

/// A 10x10 textured quad in the xy plane, drawn with depth testing.
pub struct Background {
    pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    uv_buffer: wgpu::Buffer,
    scene: SceneBindings,
    texture: GpuTexture,
}

impl Background {
    pub fn new(gpu: &GpuContext, texture: TextureConfig, shader_source: &str) -> Self {
        let device = &gpu.device;

        let texture = GpuTexture::upload(
            device,
            &gpu.queue,
            &texture.with_address_mode(AddressMode::Repeat),
            "Background Texture",
        );
        let scene = SceneBindings::new(device, &texture, "Background Scene");
        let (position_buffer, uv_buffer) =
            upload_mesh(device, &geometry::background_quad(), "Background Quad");

        let pipeline = create_pipeline(
            device,
            &PipelineDesc {
                label: "Background Pipeline",
                source: shader_source,
                bind_group_layouts: &[&scene.layout],
                color_format: gpu.format(),
                blend: wgpu::BlendState::REPLACE,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        Self {
            pipeline,
            position_buffer,
            uv_buffer,
            scene,
            texture,
        }
    }

    pub fn set_view_projection(&self, queue: &wgpu::Queue, mvp: Mat4) {
        self.scene.write_mvp(queue, mvp);
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.scene.bind_group, &[]);
        pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        pass.set_vertex_buffer(1, self.uv_buffer.slice(..));
        pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
    }

    pub fn uses_placeholder_texture(&self) -> bool {
        self.texture.placeholder
    }
}
