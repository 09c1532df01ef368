//! Rendering for the orrery: star points, then the sun and planets

use common::{create_uniform_buffer, create_vertex_buffer, Camera3D, GraphicsContext, Vertex, Viewport};
use glam::{Mat4, Quat, Vec3};
use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::orbit::{OrbitingBody, Orrery};
use crate::sphere::{self, MeshVertex};
use crate::texture;

/// Light and camera state shared by every draw
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub light_direction: [f32; 4],
    pub light_color: [f32; 4],
    pub ambient_color: [f32; 4],
}

/// Directional white light from (5, 5, 5), intensity 1
const LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
const LIGHT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// 0x404040
const AMBIENT_COLOR: [f32; 4] = [0.25, 0.25, 0.25, 1.0];
/// 0x222222 at intensity 0.1
const PLANET_EMISSIVE: [f32; 4] = [0.133, 0.133, 0.133, 0.1];

impl SceneUniform {
    pub fn from_camera(camera: &Camera3D) -> Self {
        let light = LIGHT_POSITION.normalize();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
            light_direction: [light.x, light.y, light.z, 0.0],
            light_color: LIGHT_COLOR,
            ambient_color: AMBIENT_COLOR,
        }
    }
}

/// Per-sphere instance data
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub model: [[f32; 4]; 4],
    pub emissive: [f32; 4],
    pub params: [f32; 4],
}

impl BodyInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }

    /// Unlit sphere at the origin
    pub fn sun(radius: f32) -> Self {
        Self {
            model: Mat4::from_scale(Vec3::splat(radius)).to_cols_array_2d(),
            emissive: [0.0; 4],
            params: [0.0; 4],
        }
    }

    /// Lit, spinning sphere at the body's orbital position
    pub fn planet(body: &OrbitingBody) -> Self {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(body.radius),
            Quat::from_rotation_y(body.spin),
            body.position,
        );
        Self {
            model: model.to_cols_array_2d(),
            emissive: PLANET_EMISSIVE,
            params: [1.0, 0.0, 0.0, 0.0],
        }
    }
}

pub struct Renderer {
    star_pipeline: wgpu::RenderPipeline,
    body_pipeline: wgpu::RenderPipeline,

    star_buffer: wgpu::Buffer,
    star_count: u32,
    sphere_vertices: wgpu::Buffer,
    sphere_indices: wgpu::Buffer,
    sphere_index_count: u32,
    instance_buffer: wgpu::Buffer,
    /// Sun first, then one per planet
    surfaces: Vec<wgpu::BindGroup>,
    surface_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,

    depth_texture: wgpu::TextureView,
    sun_radius: f32,
    max_bodies: usize,
}

impl Renderer {
    /// `surfaces[0]` is the sun's texture; the rest follow the planet order.
    pub fn new(
        ctx: &GraphicsContext,
        camera: &Camera3D,
        stars: &[Vertex],
        surfaces: &[RgbaImage],
        sun_radius: f32,
        sphere_segments: u32,
    ) -> Self {
        let device = &ctx.device;
        let max_bodies = surfaces.len().max(1);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Orrery Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/orrery.wgsl").into()),
        });

        let scene_buffer = create_uniform_buffer(device, &SceneUniform::from_camera(camera));

        let scene_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let surface_layout = texture::bind_group_layout(device);
        let sampler = texture::create_sampler(device);
        let surfaces = surfaces
            .iter()
            .enumerate()
            .map(|(i, image)| {
                texture::upload(
                    device,
                    &ctx.queue,
                    &surface_layout,
                    &sampler,
                    image,
                    &format!("Surface Texture {}", i),
                )
            })
            .collect();

        let star_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Star Pipeline Layout"),
            bind_group_layouts: &[&scene_bind_group_layout],
            push_constant_ranges: &[],
        });

        let body_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Body Pipeline Layout"),
            bind_group_layouts: &[&scene_bind_group_layout, &surface_layout],
            push_constant_ranges: &[],
        });

        let depth_texture = Self::create_depth_texture(device, ctx.viewport);

        let depth_stencil_state = Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let star_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Star Pipeline"),
            layout: Some(&star_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_star",
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_star",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: depth_stencil_state.clone(),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let body_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Body Pipeline"),
            layout: Some(&body_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_body",
                buffers: &[MeshVertex::layout(), BodyInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_body",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: depth_stencil_state,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let star_buffer = create_vertex_buffer(device, stars);

        let mesh = sphere::uv_sphere(sphere_segments, sphere_segments);
        let sphere_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sphere_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Body Instance Buffer"),
            size: (std::mem::size_of::<BodyInstance>() * max_bodies) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!(
            "Renderer ready: {} stars, {} sphere triangles, {} bodies",
            stars.len(),
            mesh.indices.len() / 3,
            max_bodies
        );

        Self {
            star_pipeline,
            body_pipeline,
            star_buffer,
            star_count: stars.len() as u32,
            sphere_vertices,
            sphere_indices,
            sphere_index_count: mesh.indices.len() as u32,
            instance_buffer,
            surfaces,
            surface_layout,
            sampler,
            scene_buffer,
            scene_bind_group,
            depth_texture,
            sun_radius,
            max_bodies,
        }
    }

    fn create_depth_texture(device: &wgpu::Device, viewport: Viewport) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: viewport.width.max(1),
                height: viewport.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Replace a planet's surface texture. `planet` indexes the planet list;
    /// out-of-range indices are ignored.
    pub fn set_planet_surface(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        planet: usize,
        image: &RgbaImage,
    ) {
        let slot = planet + 1;
        if slot >= self.surfaces.len() {
            log::warn!("No surface slot for planet {}", planet);
            return;
        }
        self.surfaces[slot] = texture::upload(
            device,
            queue,
            &self.surface_layout,
            &self.sampler,
            image,
            &format!("Surface Texture {}", slot),
        );
    }

    pub fn resize(&mut self, device: &wgpu::Device, viewport: Viewport) {
        if viewport.has_area() {
            self.depth_texture = Self::create_depth_texture(device, viewport);
        }
    }

    /// Upload camera and body transforms; returns the number of spheres to draw
    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera3D, orrery: &Orrery) -> u32 {
        queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::cast_slice(&[SceneUniform::from_camera(camera)]),
        );

        let instances = body_instances(orrery, self.sun_radius, self.max_bodies);
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        instances.len() as u32
    }

    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, body_count: u32) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.star_count > 0 {
            pass.set_pipeline(&self.star_pipeline);
            pass.set_bind_group(0, &self.scene_bind_group, &[]);
            pass.set_vertex_buffer(0, self.star_buffer.slice(..));
            pass.draw(0..self.star_count, 0..1);
        }

        pass.set_pipeline(&self.body_pipeline);
        pass.set_bind_group(0, &self.scene_bind_group, &[]);
        pass.set_vertex_buffer(0, self.sphere_vertices.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(self.sphere_indices.slice(..), wgpu::IndexFormat::Uint32);
        for (i, surface) in self.surfaces.iter().enumerate().take(body_count as usize) {
            let i = i as u32;
            pass.set_bind_group(1, surface, &[]);
            pass.draw_indexed(0..self.sphere_index_count, 0, i..i + 1);
        }
    }
}

/// Sun first, then planets in orrery order, capped at `max_bodies`
pub fn body_instances(orrery: &Orrery, sun_radius: f32, max_bodies: usize) -> Vec<BodyInstance> {
    std::iter::once(BodyInstance::sun(sun_radius))
        .chain(orrery.bodies().iter().map(BodyInstance::planet))
        .take(max_bodies)
        .collect()
}
