//! Main renderer managing wgpu state and the three-pass bloom frame.

use crate::{
    bloom::{BlurSchedule, BlurSource, BlurUniform, CompositeUniform, PostSettings},
    camera::{Camera, CameraUniform},
    lights::{LightingState, SceneLights},
    mesh::Mesh,
    pipeline::{
        create_blur_bind_group_layout, create_blur_pipeline, create_camera_bind_group_layout,
        create_composite_bind_group_layout, create_composite_pipeline, create_light_bind_group_layout,
        create_lit_pipeline, create_sky_bind_group_layout, create_sky_pipeline,
        create_texture_bind_group_layout, LitMode,
    },
    targets::{PingPong, SceneTarget},
    texture::{CubeTexture, Texture},
    vertex::InstanceData,
};
use anyhow::Result;
use std::ops::Range;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Clear colour of the scene target.
pub const SKY_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.7,
    b: 1.0,
    a: 1.0,
};

const BLACK: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Handle to a texture registered with [`Renderer::create_material`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialId(usize);

/// One instanced draw in the scene pass.
pub struct DrawBatch<'a> {
    pub mesh: &'a Mesh,
    pub material: MaterialId,
    pub mode: LitMode,
    pub instances: &'a [InstanceData],
}

/// Main renderer state.
pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    // Pipelines
    opaque_pipeline: wgpu::RenderPipeline,
    blended_pipeline: wgpu::RenderPipeline,
    sky_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,

    // Camera
    camera_buffer: wgpu::Buffer,
    camera_uniform: CameraUniform,
    camera_bind_group: wgpu::BindGroup,

    lights: SceneLights,

    // Materials (index 0 is the white fallback)
    texture_bind_group_layout: wgpu::BindGroupLayout,
    materials: Vec<wgpu::BindGroup>,

    sky_bind_group_layout: wgpu::BindGroupLayout,
    sky_bind_group: Option<wgpu::BindGroup>,

    // Offscreen targets
    scene_target: SceneTarget,
    ping_pong: PingPong,
    linear_sampler: wgpu::Sampler,

    // Blur: separate direction uniforms for H and V
    blur_schedule: BlurSchedule,
    blur_bind_group_layout: wgpu::BindGroupLayout,
    blur_uniform_h: wgpu::Buffer,
    blur_uniform_v: wgpu::Buffer,
    /// Indexed by `BlurStep::binding_slot`.
    blur_bind_groups: [wgpu::BindGroup; 3],

    // Composite
    composite_bind_group_layout: wgpu::BindGroupLayout,
    composite_uniform_buffer: wgpu::Buffer,
    /// Ping-pong 0, ping-pong 1, bright output.
    composite_bind_groups: [wgpu::BindGroup; 3],

    // Instancing
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    frame_instance_offset: u32,
}

/// Route uncaptured device errors to the log instead of wgpu's default panic.
pub fn log_device_errors(device: &wgpu::Device) {
    device.on_uncaptured_error(Box::new(|e: wgpu::Error| log::error!("wgpu: {e}")));
}

/// Device without a surface, or `None` on machines with no usable adapter.
#[cfg(test)]
pub(crate) fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::default();
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        compatible_surface: None,
        ..Default::default()
    }))?;
    pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default(), None)).ok()
}

impl Renderer {
    /// Create a new renderer for the given window.
    pub async fn new(window: Arc<Window>, vsync: bool, blur_iterations: u32) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using GPU: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        log_device_errors(&device);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Camera
        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group_layout = create_camera_bind_group_layout(&device);
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let light_bind_group_layout = create_light_bind_group_layout(&device);
        let lights = SceneLights::new(&device, &light_bind_group_layout);

        let texture_bind_group_layout = create_texture_bind_group_layout(&device);
        let white = Texture::white_pixel(&device, &queue);
        let materials = vec![material_bind_group(&device, &texture_bind_group_layout, &white)];

        let sky_bind_group_layout = create_sky_bind_group_layout(&device);

        let opaque_pipeline = create_lit_pipeline(
            &device,
            &camera_bind_group_layout,
            &light_bind_group_layout,
            &texture_bind_group_layout,
            LitMode::Opaque,
        );
        let blended_pipeline = create_lit_pipeline(
            &device,
            &camera_bind_group_layout,
            &light_bind_group_layout,
            &texture_bind_group_layout,
            LitMode::Blended,
        );
        let sky_pipeline = create_sky_pipeline(&device, &camera_bind_group_layout, &sky_bind_group_layout);

        // Offscreen targets
        let scene_target = SceneTarget::new(&device, config.width, config.height);
        let ping_pong = PingPong::new(&device, config.width, config.height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Post Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Blur
        let blur_bind_group_layout = create_blur_bind_group_layout(&device);
        let blur_pipeline = create_blur_pipeline(&device, &blur_bind_group_layout);
        let blur_uniform_h = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Blur Uniform H"),
            contents: bytemuck::bytes_of(&BlurUniform::new(true)),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let blur_uniform_v = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Blur Uniform V"),
            contents: bytemuck::bytes_of(&BlurUniform::new(false)),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let blur_bind_groups = blur_bind_groups(
            &device,
            &blur_bind_group_layout,
            &linear_sampler,
            &scene_target,
            &ping_pong,
            &blur_uniform_h,
            &blur_uniform_v,
        );

        // Composite
        let composite_bind_group_layout = create_composite_bind_group_layout(&device);
        let composite_pipeline = create_composite_pipeline(&device, &config, &composite_bind_group_layout);
        let composite_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Composite Uniform"),
            contents: bytemuck::bytes_of(&CompositeUniform::from(PostSettings::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let composite_bind_groups = composite_bind_groups(
            &device,
            &composite_bind_group_layout,
            &linear_sampler,
            &scene_target,
            &ping_pong,
            &composite_uniform_buffer,
        );

        let max_instances = 1024u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (max_instances as usize * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            opaque_pipeline,
            blended_pipeline,
            sky_pipeline,
            blur_pipeline,
            composite_pipeline,
            camera_buffer,
            camera_uniform,
            camera_bind_group,
            lights,
            texture_bind_group_layout,
            materials,
            sky_bind_group_layout,
            sky_bind_group: None,
            scene_target,
            ping_pong,
            linear_sampler,
            blur_schedule: BlurSchedule::new(blur_iterations),
            blur_bind_group_layout,
            blur_uniform_h,
            blur_uniform_v,
            blur_bind_groups,
            composite_bind_group_layout,
            composite_uniform_buffer,
            composite_bind_groups,
            instance_buffer,
            max_instances,
            frame_instance_offset: 0,
        })
    }

    /// Register a texture for lit draws.
    pub fn create_material(&mut self, texture: &Texture) -> MaterialId {
        self.materials.push(material_bind_group(
            &self.device,
            &self.texture_bind_group_layout,
            texture,
        ));
        MaterialId(self.materials.len() - 1)
    }

    /// The untextured (white) material.
    pub fn white_material(&self) -> MaterialId {
        MaterialId(0)
    }

    /// Use `cube` as the skybox. Without one the sky draw is skipped.
    pub fn set_skybox(&mut self, cube: &CubeTexture) {
        self.sky_bind_group = Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sky Bind Group"),
            layout: &self.sky_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&cube.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&cube.sampler),
                },
            ],
        }));
    }

    pub fn has_skybox(&self) -> bool {
        self.sky_bind_group.is_some()
    }

    pub fn blur_schedule(&self) -> BlurSchedule {
        self.blur_schedule
    }

    /// Handle window resize. Offscreen targets follow the window size.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.rebuild_targets();
        }
    }

    /// Reconfigure the surface at its current size (after `Lost`/`Outdated`).
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn rebuild_targets(&mut self) {
        self.scene_target = SceneTarget::new(&self.device, self.config.width, self.config.height);
        self.ping_pong = PingPong::new(&self.device, self.config.width, self.config.height);
        self.blur_bind_groups = blur_bind_groups(
            &self.device,
            &self.blur_bind_group_layout,
            &self.linear_sampler,
            &self.scene_target,
            &self.ping_pong,
            &self.blur_uniform_h,
            &self.blur_uniform_v,
        );
        self.composite_bind_groups = composite_bind_groups(
            &self.device,
            &self.composite_bind_group_layout,
            &self.linear_sampler,
            &self.scene_target,
            &self.ping_pong,
            &self.composite_uniform_buffer,
        );
    }

    /// Update camera uniform.
    pub fn update_camera(&mut self, camera: &Camera) {
        self.camera_uniform.update(camera);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Upload the light state for this frame. Uses the last camera position for specular.
    pub fn upload_lights(&self, lights: &LightingState) {
        let p = self.camera_uniform.position;
        self.lights
            .upload(&self.queue, lights, glam::Vec3::new(p[0], p[1], p[2]));
    }

    /// Update exposure and the bloom toggle for the composite pass.
    pub fn update_post(&self, settings: PostSettings) {
        self.queue.write_buffer(
            &self.composite_uniform_buffer,
            0,
            bytemuck::bytes_of(&CompositeUniform::from(settings)),
        );
    }

    /// Begin a new frame, returns the surface texture and command encoder.
    pub fn begin_frame(&mut self) -> Result<(wgpu::SurfaceTexture, wgpu::CommandEncoder)> {
        self.frame_instance_offset = 0;
        let output = self.surface.get_current_texture()?;
        let encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        Ok((output, encoder))
    }

    /// Copy instances into this frame's region of the instance buffer.
    fn push_instances(&mut self, instances: &[InstanceData]) -> Option<Range<u32>> {
        let offset = self.frame_instance_offset;
        let remaining = self.max_instances.saturating_sub(offset) as usize;
        let count = instances.len().min(remaining);
        if count == 0 {
            return None;
        }
        if count < instances.len() {
            log::warn!("Instance buffer full, dropping {} instances", instances.len() - count);
        }
        let byte_offset = (offset as usize * std::mem::size_of::<InstanceData>()) as u64;
        self.queue.write_buffer(
            &self.instance_buffer,
            byte_offset,
            bytemuck::cast_slice(&instances[..count]),
        );
        self.frame_instance_offset = offset + count as u32;
        Some(offset..offset + count as u32)
    }

    /// Pass 1: draw `batches` in order into the scene target (lit colour + bright output),
    /// then the skybox if one is set.
    pub fn scene_pass(&mut self, encoder: &mut wgpu::CommandEncoder, batches: &[DrawBatch<'_>]) {
        let ranges: Vec<Option<Range<u32>>> =
            batches.iter().map(|b| self.push_instances(b.instances)).collect();

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[
                Some(wgpu::RenderPassColorAttachment {
                    view: &self.scene_target.color.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(SKY_CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                }),
                Some(wgpu::RenderPassColorAttachment {
                    view: &self.scene_target.bright.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                }),
            ],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.scene_target.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        for (batch, range) in batches.iter().zip(ranges) {
            let Some(range) = range else { continue };
            let Some(material) = self.materials.get(batch.material.0) else {
                log::warn!("Unknown material {:?}", batch.material);
                continue;
            };
            pass.set_pipeline(match batch.mode {
                LitMode::Opaque => &self.opaque_pipeline,
                LitMode::Blended => &self.blended_pipeline,
            });
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            self.lights.bind(&mut pass);
            pass.set_bind_group(2, material, &[]);
            pass.set_vertex_buffer(0, batch.mesh.vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            pass.set_index_buffer(batch.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..batch.mesh.num_indices, 0, range);
        }

        if let Some(sky) = &self.sky_bind_group {
            pass.set_pipeline(&self.sky_pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            pass.set_bind_group(1, sky, &[]);
            pass.draw(0..3, 0..1);
        }
    }

    /// Pass 2: ping-pong separable blur of the bright output.
    pub fn run_blur_passes(&self, encoder: &mut wgpu::CommandEncoder) {
        for step in self.blur_schedule.steps() {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(if step.horizontal { "Blur H Pass" } else { "Blur V Pass" }),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.ping_pong.view(step.target),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.blur_pipeline);
            pass.set_bind_group(0, &self.blur_bind_groups[step.binding_slot()], &[]);
            pass.draw(0..3, 0..1);
        }
    }

    /// Pass 3: tone-mapped composite of the scene and blurred bloom into `output_view`.
    /// With `bloom` off the blur result is not read at all.
    pub fn run_composite_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        bloom: bool,
    ) {
        let source = if bloom {
            self.blur_schedule.result()
        } else {
            BlurSource::Bright
        };
        let bind_group = match source {
            BlurSource::PingPong(i) => &self.composite_bind_groups[i],
            BlurSource::Bright => &self.composite_bind_groups[2],
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Composite Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.composite_pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    /// End frame and present.
    pub fn end_frame(&self, output: wgpu::SurfaceTexture, encoder: wgpu::CommandEncoder) {
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    /// Get window dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Access the device for mesh creation.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
}

fn material_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Material Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
    })
}

fn blur_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    source: &wgpu::TextureView,
    direction: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(source) },
            wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(sampler) },
            wgpu::BindGroupEntry { binding: 2, resource: direction.as_entire_binding() },
        ],
    })
}

/// Bright + H, ping-pong 1 + V, ping-pong 0 + H.
fn blur_bind_groups(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    scene: &SceneTarget,
    ping_pong: &PingPong,
    uniform_h: &wgpu::Buffer,
    uniform_v: &wgpu::Buffer,
) -> [wgpu::BindGroup; 3] {
    [
        blur_bind_group(device, layout, sampler, &scene.bright.view, uniform_h, "Blur Bind Bright H"),
        blur_bind_group(device, layout, sampler, ping_pong.view(1), uniform_v, "Blur Bind 1 V"),
        blur_bind_group(device, layout, sampler, ping_pong.view(0), uniform_h, "Blur Bind 0 H"),
    ]
}

/// Scene colour paired with each possible bloom source: ping-pong 0, ping-pong 1, bright.
fn composite_bind_groups(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    scene: &SceneTarget,
    ping_pong: &PingPong,
    uniform: &wgpu::Buffer,
) -> [wgpu::BindGroup; 3] {
    let make = |bloom: &wgpu::TextureView| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Composite Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&scene.color.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(bloom),
                },
            ],
        })
    };
    [
        make(ping_pong.view(0)),
        make(ping_pong.view(1)),
        make(&scene.bright.view),
    ]
}
