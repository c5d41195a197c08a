//! Scene lighting: the editable light state and its packed GPU uniform.
//!
//! Every lit pipeline reads the same `LightUniform` at bind group 1. The struct layout is
//! the field table; there is no per-name lookup at draw time.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

/// Number of point lights in the scene.
pub const POINT_LIGHT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, 0.0),
            ambient: Vec3::splat(0.5),
            diffuse: Vec3::splat(0.6),
            specular: Vec3::splat(0.2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    /// Cosine of the inner cone angle.
    pub cut_off: f32,
    /// Cosine of the outer cone angle.
    pub outer_cut_off: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 1.5),
            direction: Vec3::new(0.2, 0.7, -3.0),
            ambient: Vec3::splat(0.08),
            diffuse: Vec3::splat(0.2),
            specular: Vec3::splat(0.5),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            cut_off: 15.0_f32.to_radians().cos(),
            outer_cut_off: 30.0_f32.to_radians().cos(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl PointLight {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.2),
            specular: Vec3::splat(0.5),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

/// All lights in the scene. Mutated by the record loader and the settings panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingState {
    pub dir: DirLight,
    pub spot: SpotLight,
    pub points: [PointLight; POINT_LIGHT_COUNT],
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            dir: DirLight::default(),
            spot: SpotLight::default(),
            points: [
                PointLight::at(Vec3::new(0.0, 8.0, -8.0)),
                PointLight::at(Vec3::new(0.0, 8.0, -4.0)),
                PointLight::at(Vec3::new(0.0, 8.0, 0.0)),
            ],
        }
    }
}

fn v4(v: Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct DirLightRaw {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SpotLightRaw {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, unused
    pub attenuation: [f32; 4],
    /// cut_off, outer_cut_off, unused, unused
    pub cone: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, unused
    pub attenuation: [f32; 4],
}

/// Light uniform (must match lit.wgsl Lights).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    pub dir: DirLightRaw,
    pub spot: SpotLightRaw,
    pub points: [PointLightRaw; POINT_LIGHT_COUNT],
    pub view_pos: [f32; 4],
    /// x = active point light count
    pub params: [u32; 4],
}

impl LightUniform {
    pub fn new(lights: &LightingState, view_pos: Vec3) -> Self {
        let d = &lights.dir;
        let s = &lights.spot;
        Self {
            dir: DirLightRaw {
                direction: v4(d.direction),
                ambient: v4(d.ambient),
                diffuse: v4(d.diffuse),
                specular: v4(d.specular),
            },
            spot: SpotLightRaw {
                position: v4(s.position),
                direction: v4(s.direction),
                ambient: v4(s.ambient),
                diffuse: v4(s.diffuse),
                specular: v4(s.specular),
                attenuation: [s.constant, s.linear, s.quadratic, 0.0],
                cone: [s.cut_off, s.outer_cut_off, 0.0, 0.0],
            },
            points: lights.points.map(|p| PointLightRaw {
                position: v4(p.position),
                ambient: v4(p.ambient),
                diffuse: v4(p.diffuse),
                specular: v4(p.specular),
                attenuation: [p.constant, p.linear, p.quadratic, 0.0],
            }),
            view_pos: v4(view_pos),
            params: [POINT_LIGHT_COUNT as u32, 0, 0, 0],
        }
    }
}

/// GPU side of the lights: one uniform buffer and its bind group.
pub struct SceneLights {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SceneLights {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let uniform = LightUniform::new(&LightingState::default(), Vec3::ZERO);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Light Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    /// Write the current light state. Once per frame, before the scene pass.
    pub fn upload(&self, queue: &wgpu::Queue, lights: &LightingState, view_pos: Vec3) {
        let uniform = LightUniform::new(lights, view_pos);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Bind at group 1. Call after each `set_pipeline` of a lit pipeline.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(1, &self.bind_group, &[]);
    }
}
