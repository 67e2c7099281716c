//! Render submission contract between the particle pool and a renderer.
//!
//! The pool hands one [`ParticleDraw`] per particle to a [`DrawSubmitter`],
//! in pool order. What the submitter does with it is up to the backend; the
//! wgpu renderer turns every submission into its own draw call.

use bytemuck::{Pod, Zeroable};

use crate::particle::Particle;

/// Per-draw uniform block for one particle.
///
/// Layout matches the WGSL struct:
///
/// ```wgsl
/// struct ParticleDraw {
///     offset: vec3<f32>,
///     size: f32,
///     color: vec4<f32>,
/// };
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleDraw {
    /// World-space offset applied to the shared geometry.
    pub offset: [f32; 3],
    /// Geometry scale.
    pub size: f32,
    /// RGBA tint.
    pub color: [f32; 4],
}

impl From<&Particle> for ParticleDraw {
    fn from(p: &Particle) -> Self {
        Self {
            offset: p.position.to_array(),
            size: p.size,
            color: p.color.to_array(),
        }
    }
}

/// Receives particle draws in submission order.
pub trait DrawSubmitter {
    /// Queue one draw.
    fn submit(&mut self, draw: ParticleDraw);
}

impl DrawSubmitter for Vec<ParticleDraw> {
    fn submit(&mut self, draw: ParticleDraw) {
        self.push(draw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn test_draw_layout() {
        assert_eq!(std::mem::size_of::<ParticleDraw>(), 32);
        assert_eq!(std::mem::offset_of!(ParticleDraw, size), 12);
        assert_eq!(std::mem::offset_of!(ParticleDraw, color), 16);
    }

    #[test]
    fn test_draw_from_particle() {
        let p = Particle {
            position: Vec3::new(1.0, 2.0, 3.0),
            color: Vec4::new(0.1, 0.2, 0.3, 0.4),
            size: 0.02,
            ..Default::default()
        };
        let draw = ParticleDraw::from(&p);
        assert_eq!(draw.offset, [1.0, 2.0, 3.0]);
        assert_eq!(draw.size, 0.02);
        assert_eq!(draw.color, [0.1, 0.2, 0.3, 0.4]);
    }
}
